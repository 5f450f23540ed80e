use crate::{
    algorithms::{centered_row, fitted, hidden_style, input_array, int_at, main_row_y},
    cells::collection::{CellCollection, CellValue, Slot},
    config::SceneConfig,
    foundation::core::Point,
    foundation::error::SceneResult,
    scene::model::Scene,
    scene::ops::VisualOp,
    scene::script::Script,
};

const EXAMPLE: [i64; 6] = [12, 11, 13, 5, 6, 3];

/// Sort ascending by growing a sorted prefix one key at a time.
pub fn insertion_sort(values: &mut [i64]) {
    for i in 1..values.len() {
        let key = values[i];
        let mut j = i;
        while j > 0 && values[j - 1] > key {
            values[j] = values[j - 1];
            j -= 1;
        }
        values[j] = key;
    }
}

pub(crate) fn scene(cfg: &SceneConfig) -> SceneResult<Scene> {
    let values = input_array(cfg, &EXAMPLE)?;
    // Room for the lifted key above the row.
    let cfg = fitted(cfg, values.len(), 2);
    let palette = cfg.palette.clone();
    let mut script = Script::new("insertion-sort", "Insertion Sort", &cfg)?;
    let mut cells = centered_row(&script, &values, main_row_y(&cfg))?;
    let n = cells.len();

    script.intro(&cells)?;
    cells.highlight_one(0, palette.done)?;
    let mut ops = script.sync(&cells);
    ops.extend(script.caption("A single element is already sorted"));
    script.step(ops)?;

    for i in 1..n {
        let key = int_at(&cells, i)?;
        cells.highlight_one(i, palette.active)?;
        let mut ops = script.sync(&cells);
        ops.extend(script.caption(format!("Insert {key} into the sorted prefix 0..{i}")));
        script.step(ops)?;

        // Take the key out and leave an invisible hole behind.
        let key_slot = cells.remove(i)?;
        cells.insert(i, CellValue::Empty)?;
        cells.highlight_one(i, hidden_style())?;
        let mut ops = script.sync(&cells);
        ops.extend(lift(&cells, &key_slot, i)?);
        script.step(ops)?;

        let mut j = i;
        while j > 0 {
            let left = int_at(&cells, j - 1)?;
            if left <= key {
                let ops = script.caption(format!("{left} <= {key}: stop"));
                script.step(ops)?;
                break;
            }
            cells.swap(j - 1, j)?;
            j -= 1;
            let mut ops = script.sync(&cells);
            ops.extend(lift(&cells, &key_slot, j)?);
            ops.extend(script.caption(format!("{left} > {key}: shift {left} right")));
            script.step(ops)?;
        }

        let hole = cells.remove(j)?;
        let mut ops = script.retire_slot(&hole);
        cells.insert_slot(j, key_slot)?;
        cells.highlight(0, i, palette.done)?;
        ops.extend(script.sync(&cells));
        ops.extend(script.caption(format!("Place {key} at index {j}")));
        script.step(ops)?;
        script.pause();
    }

    let ops = script.caption("Sorted");
    script.step(ops)?;
    script.finish()
}

/// Move a slot that left the collection to hover above position `index`.
fn lift(cells: &CellCollection, slot: &Slot, index: usize) -> SceneResult<Vec<VisualOp>> {
    let below = cells.cell_center(index)?;
    let center = Point::new(below.x, below.y - cells.geometry().pitch_y());
    Ok(vec![
        VisualOp::MoveTo {
            id: slot.cell.0,
            center,
        },
        VisualOp::MoveTo {
            id: slot.label.0,
            center,
        },
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/algorithms/insertion_sort.rs"]
mod tests;
