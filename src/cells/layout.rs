use crate::{
    foundation::core::{Canvas, Point, Rect},
    foundation::error::{SceneError, SceneResult},
};

/// Size and spacing of cells; the only inputs to screen-position math.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CellGeometry {
    /// Cell width in pixels.
    pub width: f64,
    /// Cell height in pixels.
    pub height: f64,
    /// Gap between neighbouring cells in pixels.
    pub spacing: f64,
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 80.0,
            spacing: 12.0,
        }
    }
}

impl CellGeometry {
    /// Reject non-positive sizes and negative spacing.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(SceneError::validation("cell width must be finite and > 0"));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(SceneError::validation("cell height must be finite and > 0"));
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(SceneError::validation(
                "cell spacing must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Horizontal distance between the left edges of neighbouring cells.
    pub fn pitch_x(&self) -> f64 {
        self.width + self.spacing
    }

    /// Vertical distance between the top edges of neighbouring rows.
    pub fn pitch_y(&self) -> f64 {
        self.height + self.spacing
    }

    /// Total width of a row of `count` cells.
    pub fn row_width(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        (count as f64) * self.width + ((count - 1) as f64) * self.spacing
    }

    /// Rectangle of column `col`, row `row` for a block whose first cell's top-left is `origin`.
    pub fn cell_rect(&self, origin: Point, row: usize, col: usize) -> Rect {
        let x0 = origin.x + (col as f64) * self.pitch_x();
        let y0 = origin.y + (row as f64) * self.pitch_y();
        Rect::new(x0, y0, x0 + self.width, y0 + self.height)
    }

    /// Origin that centers a row of `count` cells horizontally with its vertical center at `center_y`.
    pub fn centered_row_origin(&self, canvas: Canvas, count: usize, center_y: f64) -> Point {
        let x = (f64::from(canvas.width) - self.row_width(count)) / 2.0;
        Point::new(x, center_y - self.height / 2.0)
    }

    /// Origin that centers a `rows x cols` block on the canvas, shifted down by `offset_y`.
    pub fn centered_grid_origin(
        &self,
        canvas: Canvas,
        rows: usize,
        cols: usize,
        offset_y: f64,
    ) -> Point {
        let w = self.row_width(cols);
        let h = if rows == 0 {
            0.0
        } else {
            (rows as f64) * self.height + ((rows - 1) as f64) * self.spacing
        };
        Point::new(
            (f64::from(canvas.width) - w) / 2.0,
            (f64::from(canvas.height) - h) / 2.0 + offset_y,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cells/layout.rs"]
mod tests;
