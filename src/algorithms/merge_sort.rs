use crate::{
    algorithms::{centered_row, fitted, input_array, int_at, main_row_y},
    cells::collection::CellCollection,
    config::{Palette, SceneConfig},
    foundation::core::Point,
    foundation::error::SceneResult,
    scene::model::Scene,
    scene::script::Script,
};

const EXAMPLE: [i64; 8] = [38, 27, 43, 3, 9, 82, 10, 1];

/// Top-down merge sort; returns a sorted copy.
pub fn merge_sort(values: &[i64]) -> Vec<i64> {
    if values.len() <= 1 {
        return values.to_vec();
    }
    let mid = values.len() / 2;
    let (left, right) = (merge_sort(&values[..mid]), merge_sort(&values[mid..]));
    merge(&left, &right)
}

fn merge(left: &[i64], right: &[i64]) -> Vec<i64> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        // `<=` keeps equal keys in input order.
        if left[i] <= right[j] {
            out.push(left[i]);
            i += 1;
        } else {
            out.push(right[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&left[i..]);
    out.extend_from_slice(&right[j..]);
    out
}

pub(crate) fn scene(cfg: &SceneConfig) -> SceneResult<Scene> {
    let values = input_array(cfg, &EXAMPLE)?;
    let cfg = fitted(cfg, values.len(), 3);
    let mut script = Script::new("merge-sort", "Merge Sort", &cfg)?;
    let row_y = main_row_y(&cfg) - cfg.geometry.pitch_y() * 0.5;
    let cells = centered_row(&script, &values, row_y)?;

    script.intro(&cells)?;
    let mut run = MergeScene {
        palette: cfg.palette.clone(),
        script,
        cells,
    };
    let n = run.cells.len();
    run.sort(0, n)?;

    let MergeScene {
        mut script,
        mut cells,
        palette,
    } = run;
    cells.highlight(0, n - 1, palette.done)?;
    let mut ops = script.sync(&cells);
    ops.extend(script.caption("Sorted"));
    script.step(ops)?;
    script.finish()
}

struct MergeScene {
    script: Script,
    cells: CellCollection,
    palette: Palette,
}

impl MergeScene {
    fn sort(&mut self, lo: usize, hi: usize) -> SceneResult<()> {
        if hi - lo <= 1 {
            return Ok(());
        }
        let mid = lo + (hi - lo) / 2;
        self.sort(lo, mid)?;
        self.sort(mid, hi)?;
        self.merge(lo, mid, hi)
    }

    /// Merge `[lo, mid)` and `[mid, hi)` through a temporary row below the array.
    fn merge(&mut self, lo: usize, mid: usize, hi: usize) -> SceneResult<()> {
        self.cells.highlight(lo, mid - 1, self.palette.active)?;
        self.cells.highlight(mid, hi - 1, self.palette.window)?;
        let mut ops = self.script.sync(&self.cells);
        ops.extend(self.script.caption(format!(
            "Merge [{lo}..{mid}) with [{mid}..{hi})"
        )));
        self.script.step(ops)?;

        let first = self.cells.cell_rect(lo)?;
        let geometry = self.cells.geometry();
        let mut out = CellCollection::new(
            Vec::<i64>::new(),
            geometry,
            Point::new(first.x0, first.y0 + geometry.pitch_y() * 1.5),
            self.palette.done.into(),
            self.script.ids(),
        )?;

        let (mut i, mut j) = (lo, mid);
        while i < mid || j < hi {
            let take_left = j >= hi || (i < mid && int_at(&self.cells, i)? <= int_at(&self.cells, j)?);
            let from = if take_left { i } else { j };
            let v = int_at(&self.cells, from)?;
            if take_left {
                i += 1;
            } else {
                j += 1;
            }
            self.cells.highlight_one(from, self.palette.dimmed)?;
            out.push(v);

            let mut ops = self.script.sync(&self.cells);
            ops.extend(self.script.sync(&out));
            ops.extend(self.script.caption(format!("Take {v}")));
            self.script.step(ops)?;
        }

        // Copy the merged run back up and clear the temporary row.
        let mut ops = Vec::new();
        for (k, slot) in out.iter().enumerate() {
            let v = slot.value.clone();
            let retired = self.cells.set_value(lo + k, v)?;
            ops.extend(self.script.retire_label(retired));
            ops.extend(self.script.retire_slot(slot));
        }
        self.cells.unhighlight(lo, hi - 1)?;
        ops.extend(self.script.sync(&self.cells));
        ops.extend(self.script.caption(format!("[{lo}..{hi}) is sorted")));
        self.script.step(ops)?;
        self.script.pause();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/algorithms/merge_sort.rs"]
mod tests;
