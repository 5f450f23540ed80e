use crate::{
    algorithms::{fitted, input_array, int_at, main_row_y},
    cells::collection::{CellCollection, CellValue},
    config::SceneConfig,
    foundation::core::Point,
    foundation::error::{SceneError, SceneResult},
    scene::model::Scene,
    scene::script::Script,
};

const EXAMPLE: [i64; 8] = [3, 1, 4, 1, 5, 9, 2, 6];

/// `P` with `P[0] = 0` and `P[i + 1] = P[i] + values[i]`; one longer than the input.
///
/// Fails with [`SceneError::InvalidArgument`] when a prefix does not fit in `i64`.
pub fn prefix_sums(values: &[i64]) -> SceneResult<Vec<i64>> {
    let mut out = Vec::with_capacity(values.len() + 1);
    out.push(0);
    let mut acc = 0i64;
    for (i, &v) in values.iter().enumerate() {
        acc = acc.checked_add(v).ok_or_else(|| {
            SceneError::invalid_argument(format!("prefix sum P[{}] overflows i64", i + 1))
        })?;
        out.push(acc);
    }
    Ok(out)
}

/// Sum of `values[lo..hi]` from its prefix table.
///
/// `None` for an inverted or out-of-table range, or a difference outside `i64`.
pub fn range_sum(prefix: &[i64], lo: usize, hi: usize) -> Option<i64> {
    if lo > hi {
        return None;
    }
    prefix.get(hi)?.checked_sub(*prefix.get(lo)?)
}

pub(crate) fn scene(cfg: &SceneConfig) -> SceneResult<Scene> {
    let values = input_array(cfg, &EXAMPLE)?;
    let prefix = prefix_sums(&values)?;
    let n = values.len();
    let cfg = fitted(cfg, n + 1, 3);
    let palette = cfg.palette.clone();
    let mut script = Script::new("prefix-sum", "Prefix Sums", &cfg)?;
    let g = cfg.geometry;

    // P has one extra cell; the input row sits half a cell right so a[i] lies between P[i] and P[i+1].
    let center_y = main_row_y(&cfg);
    let p_origin = g.centered_row_origin(cfg.canvas, n + 1, center_y + g.pitch_y() * 0.75);
    let a_origin = Point::new(p_origin.x + g.pitch_x() / 2.0, p_origin.y - g.pitch_y() * 1.5);
    let mut a = CellCollection::new(
        values.iter().copied(),
        g,
        a_origin,
        palette.idle.into(),
        script.ids(),
    )?;
    let mut p = CellCollection::new(
        std::iter::once(CellValue::Int(0)).chain((0..n).map(|_| CellValue::Empty)),
        g,
        p_origin,
        palette.idle.into(),
        script.ids(),
    )?;

    let row_tag = |cells: &CellCollection| -> SceneResult<Point> {
        let first = cells.cell_center(0)?;
        Ok(Point::new(first.x - g.pitch_x() * 0.75, first.y))
    };
    let (_, a_tag) = script.text("a", row_tag(&a)?, cfg.label_size_px, palette.pointer);
    let (_, p_tag) = script.text("P", row_tag(&p)?, cfg.label_size_px, palette.pointer);

    script.intro(&a)?;
    let mut ops = vec![a_tag, p_tag];
    ops.extend(script.sync(&p));
    ops.extend(script.caption("P[0] = 0, then P[i+1] = P[i] + a[i]"));
    script.step(ops)?;

    for i in 0..n {
        let v = int_at(&a, i)?;
        let (acc, next) = (prefix[i], prefix[i + 1]);
        a.highlight_one(i, palette.active)?;
        p.highlight_one(i, palette.active)?;
        let retired = p.set_value(i + 1, next)?;
        p.highlight_one(i + 1, palette.done)?;

        let mut ops = script.retire_label(retired);
        ops.extend(script.sync(&a));
        ops.extend(script.sync(&p));
        ops.extend(script.caption(format!("P[{}] = P[{i}] + a[{i}] = {acc} + {v} = {next}", i + 1)));
        script.step(ops)?;

        a.unhighlight(i, i)?;
        p.highlight_one(i, palette.done)?;
    }
    let mut ops = script.sync(&a);
    ops.extend(script.sync(&p));
    script.step(ops)?;
    script.pause();

    // Any range sum is now one subtraction.
    let (lo, hi) = (n / 4, (3 * n).div_ceil(4).max(n / 4 + 1));
    if let Some(sum) = range_sum(&prefix, lo, hi) {
        p.reset_styles();
        a.highlight(lo, hi - 1, palette.window)?;
        p.highlight_one(lo, palette.found)?;
        p.highlight_one(hi, palette.found)?;
        let mut ops = script.sync(&a);
        ops.extend(script.sync(&p));
        ops.extend(script.caption(format!(
            "sum(a[{lo}..{hi}]) = P[{hi}] - P[{lo}] = {} - {} = {sum}",
            prefix[hi], prefix[lo]
        )));
        script.step(ops)?;
    }
    script.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/algorithms/prefix_sum.rs"]
mod tests;
