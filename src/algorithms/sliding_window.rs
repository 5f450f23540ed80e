use crate::{
    algorithms::{centered_row, fitted, input_array, int_at, main_row_y},
    config::SceneConfig,
    foundation::error::{SceneError, SceneResult},
    scene::model::Scene,
    scene::script::Script,
};

const EXAMPLE: [i64; 6] = [2, 1, 5, 1, 3, 2];
const EXAMPLE_WINDOW: usize = 3;

/// Start and sum of the first length-`k` window with the largest sum.
///
/// Fails with [`SceneError::InvalidArgument`] when `k` is zero or longer than the input, or when
/// some window sum does not fit in `i64`.
pub fn max_window_sum(values: &[i64], k: usize) -> SceneResult<(usize, i64)> {
    if k == 0 || k > values.len() {
        return Err(SceneError::invalid_argument(format!(
            "window must be in 1..={}, got {k}",
            values.len()
        )));
    }
    let mut sum = window_sum(0, values[..k].iter().map(|&v| i128::from(v)).sum())?;
    let mut best = (0, sum);
    for start in 1..=values.len() - k {
        let slid =
            i128::from(sum) + i128::from(values[start + k - 1]) - i128::from(values[start - 1]);
        sum = window_sum(start, slid)?;
        if sum > best.1 {
            best = (start, sum);
        }
    }
    Ok(best)
}

fn window_sum(start: usize, sum: i128) -> SceneResult<i64> {
    i64::try_from(sum).map_err(|_| {
        SceneError::invalid_argument(format!("sum of window at {start} overflows i64"))
    })
}

pub(crate) fn scene(cfg: &SceneConfig) -> SceneResult<Scene> {
    let values = input_array(cfg, &EXAMPLE)?;
    let k = cfg.inputs.window.unwrap_or(EXAMPLE_WINDOW);
    // Rejects bad windows and sums outside i64 before any scripting.
    let expected = max_window_sum(&values, k)?;

    let cfg = fitted(cfg, values.len(), 1);
    let palette = cfg.palette.clone();
    let mut script = Script::new("sliding-window", "Sliding Window", &cfg)?;
    let mut cells = centered_row(&script, &values, main_row_y(&cfg))?;
    let n = cells.len();

    script.intro(&cells)?;

    let mut sum = 0i128;
    for i in 0..k {
        sum += i128::from(int_at(&cells, i)?);
    }
    cells.highlight(0, k - 1, palette.window)?;
    let mut ops = script.sync(&cells);
    ops.extend(script.pointer("L", &cells, 0)?);
    ops.extend(script.pointer("R", &cells, k - 1)?);
    ops.extend(script.caption(format!("First window of {k}: sum = {sum}")));
    script.step(ops)?;
    script.pause();

    let mut best = (0usize, sum);
    for start in 1..=n - k {
        let (out, inn) = (int_at(&cells, start - 1)?, int_at(&cells, start + k - 1)?);
        sum += i128::from(inn) - i128::from(out);
        cells.unhighlight(start - 1, start - 1)?;
        cells.highlight(start, start + k - 1, palette.window)?;
        let verdict = if sum > best.1 {
            best = (start, sum);
            "new best"
        } else {
            "best stays"
        };

        let mut ops = script.sync(&cells);
        ops.extend(script.pointer("L", &cells, start)?);
        ops.extend(script.pointer("R", &cells, start + k - 1)?);
        ops.extend(script.caption(format!(
            "Drop {out}, add {inn}: sum = {sum} ({verdict} {})",
            best.1
        )));
        script.step(ops)?;
    }
    debug_assert_eq!(best, (expected.0, i128::from(expected.1)));

    cells.reset_styles();
    cells.highlight(best.0, best.0 + k - 1, palette.found)?;
    let mut ops = script.sync(&cells);
    ops.extend(script.drop_pointer("L"));
    ops.extend(script.drop_pointer("R"));
    ops.extend(script.caption(format!(
        "Best window starts at {} with sum {}",
        best.0, best.1
    )));
    script.step(ops)?;
    script.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/algorithms/sliding_window.rs"]
mod tests;
