use crate::{
    cells::collection::{CellLayout, CellValue, Slot},
    cells::layout::CellGeometry,
    cells::style::{CellStyle, StyleSpec},
    foundation::core::{Point, Rect},
    foundation::error::{SceneError, SceneResult, check_index},
    scene::node::{IdAllocator, LabelId},
};

/// Row-major `rows x cols` matrix of slots sharing one geometry.
#[derive(Clone, Debug)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    slots: Vec<Slot>,
    geometry: CellGeometry,
    origin: Point,
    default_style: CellStyle,
    ids: IdAllocator,
}

impl CellGrid {
    /// Build a grid; `values` fill row by row and trailing slots are left [`CellValue::Empty`].
    pub fn new<V: Into<CellValue>>(
        rows: usize,
        cols: usize,
        values: impl IntoIterator<Item = V>,
        geometry: CellGeometry,
        origin: Point,
        styles: StyleSpec,
        ids: &IdAllocator,
    ) -> SceneResult<Self> {
        geometry.validate()?;
        if rows == 0 || cols == 0 {
            return Err(SceneError::invalid_argument(
                "grid rows and cols must be > 0",
            ));
        }
        let capacity = rows
            .checked_mul(cols)
            .ok_or_else(|| SceneError::invalid_argument("grid size overflows usize"))?;

        let mut values: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        if values.len() > capacity {
            return Err(SceneError::invalid_argument(format!(
                "{} values do not fit a {rows}x{cols} grid",
                values.len()
            )));
        }
        values.resize(capacity, CellValue::Empty);

        let default_style = styles.default_style();
        default_style.validate()?;
        let resolved = styles.resolve(capacity)?;

        let slots = values
            .into_iter()
            .zip(resolved)
            .map(|(value, style)| Slot {
                value,
                cell: ids.next_shape(),
                label: ids.next_label(),
                style,
            })
            .collect();

        Ok(Self {
            rows,
            cols,
            slots,
            geometry,
            origin,
            default_style,
            ids: ids.clone(),
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total slot count (`rows * cols`).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`; grids have at least one slot.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Flat index of `(row, col)`.
    pub fn index_of(&self, row: usize, col: usize) -> SceneResult<usize> {
        check_index(row, self.rows)?;
        check_index(col, self.cols)?;
        Ok(row * self.cols + col)
    }

    /// `(row, col)` of flat `index`.
    pub fn coords_of(&self, index: usize) -> SceneResult<(usize, usize)> {
        check_index(index, self.slots.len())?;
        Ok((index / self.cols, index % self.cols))
    }

    /// Snapshot of all values in row-major order.
    pub fn values(&self) -> Vec<CellValue> {
        self.slots.iter().map(|s| s.value.clone()).collect()
    }

    /// Value at flat `index`.
    pub fn value(&self, index: usize) -> SceneResult<&CellValue> {
        Ok(&self.slot(index)?.value)
    }

    /// Slot at flat `index`.
    pub fn slot(&self, index: usize) -> SceneResult<&Slot> {
        self.slots
            .get(index)
            .ok_or_else(|| SceneError::out_of_range(index, self.slots.len()))
    }

    /// Current style at flat `index`.
    pub fn style_at(&self, index: usize) -> SceneResult<CellStyle> {
        Ok(self.slot(index)?.style)
    }

    /// Apply `style` to the single slot at flat `index`.
    pub fn highlight(&mut self, index: usize, style: CellStyle) -> SceneResult<()> {
        self.highlight_range(index, index, style)
    }

    /// Apply `style` to the flat range `start..=end` (row-major).
    pub fn highlight_range(
        &mut self,
        start: usize,
        end: usize,
        style: CellStyle,
    ) -> SceneResult<()> {
        if start > end {
            return Err(SceneError::invalid_argument(format!(
                "highlight range start {start} is after end {end}"
            )));
        }
        check_index(end, self.slots.len())?;
        style.validate()?;
        for slot in &mut self.slots[start..=end] {
            slot.style = style;
        }
        Ok(())
    }

    /// Restore the default style everywhere.
    pub fn reset_styles(&mut self) {
        for slot in &mut self.slots {
            slot.style = self.default_style;
        }
    }

    /// Exchange the whole slots at flat indices `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) -> SceneResult<()> {
        check_index(a, self.slots.len())?;
        check_index(b, self.slots.len())?;
        self.slots.swap(a, b);
        Ok(())
    }

    /// Replace the value at flat `index`, returning the retired label id.
    pub fn set_value(&mut self, index: usize, value: impl Into<CellValue>) -> SceneResult<LabelId> {
        check_index(index, self.slots.len())?;
        let fresh = self.ids.next_label();
        let slot = &mut self.slots[index];
        slot.value = value.into();
        Ok(std::mem::replace(&mut slot.label, fresh))
    }

    /// Screen rectangle of flat `index`.
    pub fn cell_rect(&self, index: usize) -> SceneResult<Rect> {
        check_index(index, self.slots.len())?;
        Ok(self.slot_rect(index))
    }

    /// Screen center of flat `index`.
    pub fn cell_center(&self, index: usize) -> SceneResult<Point> {
        Ok(self.cell_rect(index)?.center())
    }
}

impl CellLayout for CellGrid {
    fn slots(&self) -> &[Slot] {
        &self.slots
    }

    fn slot_rect(&self, index: usize) -> Rect {
        self.geometry
            .cell_rect(self.origin, index / self.cols, index % self.cols)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cells/grid.rs"]
mod tests;
