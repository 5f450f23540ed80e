use std::{
    borrow::Cow,
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;

use crate::foundation::error::{SceneError, SceneResult};

/// Font file bytes plus where they came from.
#[derive(Clone, Debug)]
pub struct FontSource {
    /// Raw font file (TTF/OTF/TTC).
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
    /// File path or family description, for diagnostics.
    pub origin: String,
}

impl FontSource {
    /// Load an explicit font file, or pick a sans-serif system face.
    pub fn resolve(path: Option<&Path>) -> SceneResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::system_sans(),
        }
    }

    /// Read a font file from disk.
    pub fn from_file(path: &Path) -> SceneResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Ok(Self {
            bytes: Arc::new(bytes),
            index: 0,
            origin: path.display().to_string(),
        })
    }

    /// First matching sans-serif face among the installed system fonts.
    pub fn system_sans() -> SceneResult<Self> {
        use usvg::fontdb::{Database, Family, Query};

        let mut db = Database::new();
        db.load_system_fonts();
        let families = [
            Family::Name("DejaVu Sans"),
            Family::Name("Liberation Sans"),
            Family::Name("Noto Sans"),
            Family::Name("Arial"),
            Family::SansSerif,
        ];
        let query = Query {
            families: &families,
            ..Query::default()
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|f| f.id))
            .ok_or_else(|| {
                SceneError::invalid_argument(
                    "no system fonts found; pass a font file with --font or font_path",
                )
            })?;
        let origin = db
            .face(id)
            .and_then(|f| f.families.first())
            .map(|(name, _)| format!("system:{name}"))
            .unwrap_or_else(|| "system".to_string());
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| SceneError::invalid_argument("system font face could not be read"))?;
        tracing::debug!(font = %origin, index, "resolved system font");
        Ok(Self {
            bytes: Arc::new(bytes),
            index,
            origin,
        })
    }

    /// Font handle for glyph rendering.
    pub fn font_data(&self) -> vello_cpu::peniko::FontData {
        vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(self.bytes.as_ref().clone()),
            self.index,
        )
    }
}

/// A shaped single-line label.
pub struct ShapedText {
    /// Parley layout; glyph positions are relative to its top-left corner.
    pub layout: parley::Layout<()>,
    /// Advance width.
    pub width: f32,
    /// Line height.
    pub height: f32,
}

/// Shapes labels with one registered font and caches the result by content and size.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family: String,
    cache: HashMap<(String, u32), Arc<ShapedText>>,
}

impl TextLayoutEngine {
    /// Register `font` as the only family used for layout.
    pub fn new(font: &FontSource) -> SceneResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.as_ref().clone()), None);
        let family_id = family_for_face(
            families
                .iter()
                .map(|(id, faces)| (*id, faces.iter().map(|f| f.index()).collect())),
            font.index,
        )
        .ok_or_else(|| {
            SceneError::invalid_argument(format!("no font families in '{}'", font.origin))
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SceneError::invalid_argument("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            cache: HashMap::new(),
        })
    }

    /// Family name every label is set in.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Shaped layout of `text` at `size_px`.
    pub fn shape(&mut self, text: &str, size_px: f32) -> SceneResult<Arc<ShapedText>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SceneError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let key = (text.to_string(), size_px.to_bits());
        if let Some(hit) = self.cache.get(&key) {
            return Ok(Arc::clone(hit));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let shaped = Arc::new(ShapedText {
            width: layout.width(),
            height: layout.height(),
            layout,
        });
        self.cache.insert(key, Arc::clone(&shaped));
        Ok(shaped)
    }

    /// Number of cached layouts.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

/// Family holding the face at `index` of a collection, so shaping and rasterizing use one face.
/// Falls back to the first family when no family lists that face.
fn family_for_face<F: Copy>(
    families: impl IntoIterator<Item = (F, Vec<u32>)>,
    index: u32,
) -> Option<F> {
    let mut first = None;
    for (id, faces) in families {
        if faces.contains(&index) {
            return Some(id);
        }
        first.get_or_insert(id);
    }
    first
}

/// Explicit font path from the CLI wins over the config file.
pub fn pick_font_path(cli: Option<PathBuf>, config: Option<&Path>) -> Option<PathBuf> {
    cli.or_else(|| config.map(Path::to_path_buf))
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
