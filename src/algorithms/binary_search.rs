use std::cmp::Ordering;

use crate::{
    algorithms::{centered_row, fitted, input_array, int_at, main_row_y},
    config::SceneConfig,
    foundation::error::{SceneError, SceneResult},
    scene::model::Scene,
    scene::script::Script,
};

const EXAMPLE: [i64; 9] = [20, 22, 23, 23, 34, 49, 52, 55, 58];
const EXAMPLE_TARGET: i64 = 52;

/// Index of `target` in the ascending slice `values`, probing the middle of `[lo, hi)` each round.
pub fn binary_search(values: &[i64], target: i64) -> Option<usize> {
    let (mut lo, mut hi) = (0usize, values.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match values[mid].cmp(&target) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
        }
    }
    None
}

pub(crate) fn scene(cfg: &SceneConfig) -> SceneResult<Scene> {
    let values = input_array(cfg, &EXAMPLE)?;
    if !values.is_sorted() {
        return Err(SceneError::invalid_argument(
            "binary search needs an ascending input array",
        ));
    }
    let target = cfg.inputs.target.unwrap_or(EXAMPLE_TARGET);

    let cfg = fitted(cfg, values.len(), 1);
    let palette = cfg.palette.clone();
    let mut script = Script::new("binary-search", "Binary Search", &cfg)?;
    let mut cells = centered_row(&script, &values, main_row_y(&cfg))?;

    script.intro(&cells)?;
    let ops = script.caption(format!("Looking for {target}"));
    script.step(ops)?;

    let (mut lo, mut hi) = (0usize, values.len());
    let mut found = None;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let probe = int_at(&cells, mid)?;
        cells.highlight_one(mid, palette.active)?;

        let mut ops = script.sync(&cells);
        ops.extend(script.pointer("lo", &cells, lo)?);
        ops.extend(script.pointer("hi", &cells, hi)?);
        ops.extend(script.pointer("mid", &cells, mid)?);
        ops.extend(script.caption(format!("mid = {mid}: compare {probe} with {target}")));
        script.step(ops)?;

        match probe.cmp(&target) {
            Ordering::Equal => {
                cells.highlight_one(mid, palette.found)?;
                let mut ops = script.sync(&cells);
                ops.extend(script.caption(format!("{probe} = {target}: found at index {mid}")));
                script.step(ops)?;
                found = Some(mid);
                break;
            }
            Ordering::Less => {
                cells.highlight(lo, mid, palette.dimmed)?;
                let mut ops = script.sync(&cells);
                ops.extend(script.caption(format!(
                    "{probe} < {target}: discard the left half"
                )));
                script.step(ops)?;
                lo = mid + 1;
            }
            Ordering::Greater => {
                cells.highlight(mid, hi - 1, palette.dimmed)?;
                let mut ops = script.sync(&cells);
                ops.extend(script.caption(format!(
                    "{probe} > {target}: discard the right half"
                )));
                script.step(ops)?;
                hi = mid;
            }
        }
        script.pause();
    }

    if found.is_none() {
        let ops = script.caption(format!("lo = hi = {lo}: {target} is not in the array"));
        script.step(ops)?;
    }
    debug_assert_eq!(
        found.map(|i| values[i]),
        binary_search(&values, target).map(|i| values[i])
    );

    let mut ops = Vec::new();
    for name in ["lo", "hi", "mid"] {
        ops.extend(script.drop_pointer(name));
    }
    script.step(ops)?;
    script.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/algorithms/binary_search.rs"]
mod tests;
