use crate::{
    algorithms::{centered_row, fitted, input_array, int_at, main_row_y},
    config::SceneConfig,
    foundation::error::SceneResult,
    scene::model::Scene,
    scene::script::Script,
};

const EXAMPLE: [i64; 5] = [5, 1, 4, 2, 8];

/// Sort ascending with adjacent swaps; stops after the first pass without a swap.
pub fn bubble_sort(values: &mut [i64]) {
    let n = values.len();
    for pass in 0..n {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            if values[j] > values[j + 1] {
                values.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

pub(crate) fn scene(cfg: &SceneConfig) -> SceneResult<Scene> {
    let values = input_array(cfg, &EXAMPLE)?;
    let cfg = fitted(cfg, values.len(), 1);
    let palette = cfg.palette.clone();
    let mut script = Script::new("bubble-sort", "Bubble Sort", &cfg)?;
    let mut cells = centered_row(&script, &values, main_row_y(&cfg))?;
    let n = cells.len();

    script.intro(&cells)?;

    for pass in 0..n {
        let end = n - 1 - pass;
        let ops = script.caption(format!("Pass {}: bubble the largest of 0..={end} right", pass + 1));
        script.step(ops)?;

        let mut swapped = false;
        for j in 0..end {
            let (a, b) = (int_at(&cells, j)?, int_at(&cells, j + 1)?);
            cells.highlight(j, j + 1, palette.active)?;
            let mut ops = script.sync(&cells);
            ops.extend(script.pointer("j", &cells, j)?);
            ops.extend(script.caption(format!("Compare {a} and {b}")));
            script.step(ops)?;

            if a > b {
                cells.swap(j, j + 1)?;
                let mut ops = script.sync(&cells);
                ops.extend(script.caption(format!("{a} > {b}: swap")));
                script.step(ops)?;
                swapped = true;
            }
            cells.unhighlight(j, j + 1)?;
        }

        cells.highlight_one(end, palette.done)?;
        if !swapped {
            cells.highlight(0, end, palette.done)?;
        }
        let mut ops = script.sync(&cells);
        ops.extend(script.drop_pointer("j"));
        if !swapped {
            ops.extend(script.caption("No swaps in this pass: the array is sorted"));
            script.step(ops)?;
            break;
        }
        script.step(ops)?;
        script.pause();
    }

    if n > 0 {
        cells.highlight(0, n - 1, palette.done)?;
    }
    let mut ops = script.sync(&cells);
    ops.extend(script.caption("Sorted"));
    script.step(ops)?;
    script.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/algorithms/bubble_sort.rs"]
mod tests;
