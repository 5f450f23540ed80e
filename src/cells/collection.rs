use std::fmt;

use crate::{
    cells::layout::CellGeometry,
    cells::style::{CellStyle, StyleSpec},
    foundation::core::{Point, Rect},
    foundation::error::{SceneError, SceneResult, check_index},
    scene::node::{IdAllocator, LabelId, ShapeId},
};

/// Logical content of one slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellValue {
    /// Integer value.
    Int(i64),
    /// Blank slot (rendered as an empty cell).
    Empty,
    /// Free-form marker such as `"?"` or `"∞"`.
    Marker(String),
}

impl CellValue {
    /// Integer payload, if any.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Empty | Self::Marker(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Empty => Ok(()),
            Self::Marker(m) => f.write_str(m),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<Option<i64>> for CellValue {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Self::Empty, Self::Int)
    }
}

/// One position of a collection: value, rendered cell, rendered label and current style.
///
/// Keeping the four together means a swap or insert can never leave a label attached to the
/// wrong cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    /// Logical value.
    pub value: CellValue,
    /// Rectangle node.
    pub cell: ShapeId,
    /// Text node showing `value`.
    pub label: LabelId,
    /// Current cell style.
    pub style: CellStyle,
}

/// Anything whose slots have a screen position; consumed by the scene stage when syncing.
pub trait CellLayout {
    /// Slots in layout order.
    fn slots(&self) -> &[Slot];

    /// Rectangle of position `index`; positions past the end extrapolate the layout.
    fn slot_rect(&self, index: usize) -> Rect;
}

/// One-dimensional indexed cell collection.
#[derive(Clone, Debug)]
pub struct CellCollection {
    slots: Vec<Slot>,
    geometry: CellGeometry,
    origin: Point,
    default_style: CellStyle,
    ids: IdAllocator,
}

impl CellCollection {
    /// Build a row whose first cell's top-left corner sits at `origin`.
    pub fn new<V: Into<CellValue>>(
        values: impl IntoIterator<Item = V>,
        geometry: CellGeometry,
        origin: Point,
        styles: StyleSpec,
        ids: &IdAllocator,
    ) -> SceneResult<Self> {
        geometry.validate()?;
        let values: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        let default_style = styles.default_style();
        default_style.validate()?;
        let resolved = styles.resolve(values.len())?;

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
            slots,
            geometry,
            origin,
            default_style,
            ids: ids.clone(),
        })
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` when there are no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Snapshot of the logical values in order.
    pub fn values(&self) -> Vec<CellValue> {
        self.slots.iter().map(|s| s.value.clone()).collect()
    }

    /// Integer view of the values (`None` for blanks and markers).
    pub fn ints(&self) -> Vec<Option<i64>> {
        self.slots.iter().map(|s| s.value.as_int()).collect()
    }

    /// Value at `index`.
    pub fn value(&self, index: usize) -> SceneResult<&CellValue> {
        Ok(&self.slot(index)?.value)
    }

    /// Slot at `index`.
    pub fn slot(&self, index: usize) -> SceneResult<&Slot> {
        self.slots
            .get(index)
            .ok_or_else(|| SceneError::out_of_range(index, self.slots.len()))
    }

    /// Current style at `index`.
    pub fn style_at(&self, index: usize) -> SceneResult<CellStyle> {
        Ok(self.slot(index)?.style)
    }

    /// Iterate slots in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// Layout parameters.
    pub fn geometry(&self) -> CellGeometry {
        self.geometry
    }

    /// Top-left corner of slot 0.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Move the whole row; the next stage sync animates every slot to its new place.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Style given to inserted slots and restored by [`Self::reset_styles`].
    pub fn default_style(&self) -> CellStyle {
        self.default_style
    }

    /// Apply `style` to every slot in `start..=end`.
    pub fn highlight(&mut self, start: usize, end: usize, style: CellStyle) -> SceneResult<()> {
        self.check_range(start, end)?;
        style.validate()?;
        for slot in &mut self.slots[start..=end] {
            slot.style = style;
        }
        Ok(())
    }

    /// Apply `style` to a single slot.
    pub fn highlight_one(&mut self, index: usize, style: CellStyle) -> SceneResult<()> {
        self.highlight(index, index, style)
    }

    /// Restore the default style on `start..=end`.
    pub fn unhighlight(&mut self, start: usize, end: usize) -> SceneResult<()> {
        self.highlight(start, end, self.default_style)
    }

    /// Restore the default style everywhere.
    pub fn reset_styles(&mut self) {
        for slot in &mut self.slots {
            slot.style = self.default_style;
        }
    }

    /// Exchange the whole slots (value, cell, label and style) at `i` and `j`.
    pub fn swap(&mut self, i: usize, j: usize) -> SceneResult<()> {
        check_index(i, self.slots.len())?;
        check_index(j, self.slots.len())?;
        self.slots.swap(i, j);
        Ok(())
    }

    /// Insert a fresh slot at `index` (`index <= len`), shifting later slots right.
    pub fn insert(&mut self, index: usize, value: impl Into<CellValue>) -> SceneResult<&Slot> {
        if index > self.slots.len() {
            return Err(SceneError::out_of_range(index, self.slots.len()));
        }
        let slot = Slot {
            value: value.into(),
            cell: self.ids.next_shape(),
            label: self.ids.next_label(),
            style: self.default_style,
        };
        self.slots.insert(index, slot);
        Ok(&self.slots[index])
    }

    /// Put back a slot taken out with [`Self::remove`], keeping its node ids and style.
    pub fn insert_slot(&mut self, index: usize, slot: Slot) -> SceneResult<()> {
        if index > self.slots.len() {
            return Err(SceneError::out_of_range(index, self.slots.len()));
        }
        self.slots.insert(index, slot);
        Ok(())
    }

    /// Append a fresh slot.
    pub fn push(&mut self, value: impl Into<CellValue>) -> &Slot {
        let slot = Slot {
            value: value.into(),
            cell: self.ids.next_shape(),
            label: self.ids.next_label(),
            style: self.default_style,
        };
        self.slots.push(slot);
        &self.slots[self.slots.len() - 1]
    }

    /// Remove and return the slot at `index`, shifting later slots left.
    pub fn remove(&mut self, index: usize) -> SceneResult<Slot> {
        check_index(index, self.slots.len())?;
        Ok(self.slots.remove(index))
    }

    /// Replace the value at `index`.
    ///
    /// A changed value gets a new label node; the retired label id is returned so the caller can
    /// fade it out.
    pub fn set_value(&mut self, index: usize, value: impl Into<CellValue>) -> SceneResult<LabelId> {
        check_index(index, self.slots.len())?;
        let fresh = self.ids.next_label();
        let slot = &mut self.slots[index];
        slot.value = value.into();
        Ok(std::mem::replace(&mut slot.label, fresh))
    }

    /// Screen rectangle of slot `index`.
    pub fn cell_rect(&self, index: usize) -> SceneResult<Rect> {
        check_index(index, self.slots.len())?;
        Ok(self.slot_rect(index))
    }

    /// Screen center of slot `index` (where its label sits).
    pub fn cell_center(&self, index: usize) -> SceneResult<Point> {
        Ok(self.cell_rect(index)?.center())
    }

    fn check_range(&self, start: usize, end: usize) -> SceneResult<()> {
        if start > end {
            return Err(SceneError::invalid_argument(format!(
                "highlight range start {start} is after end {end}"
            )));
        }
        check_index(end, self.slots.len())
    }
}

impl CellLayout for CellCollection {
    fn slots(&self) -> &[Slot] {
        &self.slots
    }

    fn slot_rect(&self, index: usize) -> Rect {
        self.geometry.cell_rect(self.origin, 0, index)
    }
}

impl<'a> IntoIterator for &'a CellCollection {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cells/collection.rs"]
mod tests;
