use crate::{
    foundation::core::Rgba8,
    foundation::error::{SceneError, SceneResult},
    foundation::math::{lerp, lerp_rgba},
};

/// Visual style of one cell rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CellStyle {
    /// Outline color.
    pub stroke: Rgba8,
    /// Outline width in pixels (0 disables the outline).
    pub stroke_width: f64,
    /// Interior color; alpha 0 leaves the cell hollow.
    #[serde(default = "default_fill")]
    pub fill: Rgba8,
}

fn default_fill() -> Rgba8 {
    Rgba8::TRANSPARENT
}

impl CellStyle {
    /// Hollow cell with the given outline.
    pub const fn outline(stroke: Rgba8, stroke_width: f64) -> Self {
        Self {
            stroke,
            stroke_width,
            fill: Rgba8::TRANSPARENT,
        }
    }

    /// Same outline with an interior fill.
    pub const fn with_fill(self, fill: Rgba8) -> Self {
        Self { fill, ..self }
    }

    /// Reject negative or non-finite stroke widths.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(SceneError::invalid_argument(
                "cell stroke_width must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Blend towards `other` by `t` in `[0, 1]`.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            stroke: lerp_rgba(self.stroke, other.stroke, t),
            stroke_width: lerp(self.stroke_width, other.stroke_width, t),
            fill: lerp_rgba(self.fill, other.fill, t),
        }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::outline(Rgba8::WHITE, 3.0)
    }
}

/// Initial style assignment for a collection.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleSpec {
    /// Every slot gets the same style.
    Uniform(CellStyle),
    /// One style per slot; length must match the value count.
    PerIndex(Vec<CellStyle>),
}

impl StyleSpec {
    /// Resolve into exactly `len` per-slot styles.
    pub fn resolve(self, len: usize) -> SceneResult<Vec<CellStyle>> {
        let styles = match self {
            Self::Uniform(style) => vec![style; len],
            Self::PerIndex(styles) => {
                if styles.len() != len {
                    return Err(SceneError::invalid_argument(format!(
                        "per-index style list has {} entries for {len} values",
                        styles.len()
                    )));
                }
                styles
            }
        };
        for style in &styles {
            style.validate()?;
        }
        Ok(styles)
    }

    /// Style used for slots created after construction.
    pub fn default_style(&self) -> CellStyle {
        match self {
            Self::Uniform(style) => *style,
            Self::PerIndex(styles) => styles.first().copied().unwrap_or_default(),
        }
    }
}

impl From<CellStyle> for StyleSpec {
    fn from(style: CellStyle) -> Self {
        Self::Uniform(style)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cells/style.rs"]
mod tests;
