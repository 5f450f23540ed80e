use crate::{
    algorithms::{fitted, hidden_style},
    cells::grid::CellGrid,
    config::SceneConfig,
    foundation::error::{SceneError, SceneResult},
    scene::model::Scene,
    scene::script::Script,
};

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 400;
const COLS: usize = 10;

/// Primality table for `0..=n`: `table[k]` is `true` when `k` is prime.
pub fn sieve(n: usize) -> Vec<bool> {
    let mut table = vec![true; n + 1];
    table[0] = false;
    if n >= 1 {
        table[1] = false;
    }
    let mut p = 2;
    while p * p <= n {
        if table[p] {
            for m in (p * p..=n).step_by(p) {
                table[m] = false;
            }
        }
        p += 1;
    }
    table
}

/// Primes in `2..=n`, ascending.
pub fn primes_up_to(n: usize) -> Vec<usize> {
    sieve(n)
        .into_iter()
        .enumerate()
        .filter_map(|(k, prime)| prime.then_some(k))
        .collect()
}

pub(crate) fn scene(cfg: &SceneConfig) -> SceneResult<Scene> {
    let limit = cfg.inputs.limit.unwrap_or(DEFAULT_LIMIT);
    if !(2..=MAX_LIMIT).contains(&limit) {
        return Err(SceneError::invalid_argument(format!(
            "sieve limit must be in 2..={MAX_LIMIT}, got {limit}"
        )));
    }
    let n = limit as usize;
    let count = n - 1;
    let cols = COLS.min(count);
    let rows = count.div_ceil(cols);

    let cfg = fitted(cfg, cols, rows + 1);
    let palette = cfg.palette.clone();
    let mut script = Script::new("sieve", "Sieve of Eratosthenes", &cfg)?;
    let origin = cfg.geometry.centered_grid_origin(
        cfg.canvas,
        rows,
        cols,
        f64::from(cfg.caption_size_px),
    );
    let mut grid = CellGrid::new(
        rows,
        cols,
        (2..=n).map(|v| v as i64),
        cfg.geometry,
        origin,
        palette.idle.into(),
        script.ids(),
    )?;
    if count < grid.len() {
        grid.highlight_range(count, grid.len() - 1, hidden_style())?;
    }
    // Value v sits at flat index v - 2.
    let at = |v: usize| v - 2;

    script.intro(&grid)?;
    let mut crossed = vec![false; n + 1];
    let mut p = 2;
    while p * p <= n {
        if crossed[p] {
            p += 1;
            continue;
        }
        grid.highlight(at(p), palette.found)?;
        let mut ops = script.sync(&grid);
        ops.extend(script.caption(format!("{p} is prime: cross out its multiples from {}", p * p)));
        script.step(ops)?;

        for m in (p * p..=n).step_by(p) {
            crossed[m] = true;
            grid.highlight(at(m), palette.dimmed)?;
        }
        script.show(&grid)?;
        script.pause();
        p += 1;
    }

    let primes: Vec<usize> = (2..=n).filter(|&k| !crossed[k]).collect();
    debug_assert_eq!(primes, primes_up_to(n));
    for &q in &primes {
        grid.highlight(at(q), palette.done)?;
    }
    let mut ops = script.sync(&grid);
    ops.extend(script.caption(format!(
        "Every survivor is prime: {} primes up to {n}",
        primes.len()
    )));
    script.step(ops)?;
    script.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/algorithms/sieve.rs"]
mod tests;
