use vello_cpu::kurbo::{Affine, Rect, Stroke};

use crate::{
    cells::style::CellStyle,
    eval::evaluator::{Drawable, EvaluatedFrame, EvaluatedNode},
    foundation::core::{Point, Rgba8, Size},
    foundation::error::SceneResult,
    render::backend::{FrameRGBA, RenderBackend, RenderSettings, canvas_dims_u16},
    render::text::{FontSource, TextLayoutEngine},
};

/// CPU rasterizer built on `vello_cpu`.
///
/// Fonts are resolved on the first frame that contains text, so rectangle-only scenes render
/// without any font installed.
pub struct CpuBackend {
    settings: RenderSettings,
    text: TextSlot,
}

enum TextSlot {
    Unresolved,
    Ready(TextState),
    Unavailable,
}

struct TextState {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl CpuBackend {
    /// Backend with the given settings.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            text: TextSlot::Unresolved,
        }
    }

    /// Text renderer, resolved on first use.
    ///
    /// An explicit font path that cannot be loaded is an error. Without one, a machine with no
    /// usable system font renders cells only and logs a warning once.
    fn text_state(&mut self) -> SceneResult<Option<&mut TextState>> {
        if matches!(self.text, TextSlot::Unresolved) {
            self.text = match FontSource::resolve(self.settings.font_path.as_deref()) {
                Ok(source) => {
                    let engine = TextLayoutEngine::new(&source)?;
                    tracing::debug!(family = engine.family(), origin = %source.origin, "text font ready");
                    TextSlot::Ready(TextState {
                        font: source.font_data(),
                        engine,
                    })
                }
                Err(e) if self.settings.font_path.is_none() => {
                    tracing::warn!(error = %e, "no font available, text labels are skipped");
                    TextSlot::Unavailable
                }
                Err(e) => return Err(e),
            };
        }
        Ok(match &mut self.text {
            TextSlot::Ready(state) => Some(state),
            TextSlot::Unresolved | TextSlot::Unavailable => None,
        })
    }

    fn draw_node(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        node: &EvaluatedNode,
    ) -> SceneResult<()> {
        let layered = node.opacity < 1.0;
        if layered {
            ctx.push_opacity_layer(node.opacity as f32);
        }
        match &node.draw {
            Drawable::Rect { size, style } => draw_cell(ctx, node.center, *size, style),
            Drawable::Text {
                text,
                size_px,
                color,
            } => self.draw_text(ctx, node.center, text, *size_px, *color)?,
        }
        if layered {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        center: Point,
        text: &str,
        size_px: f32,
        color: Rgba8,
    ) -> SceneResult<()> {
        if text.is_empty() || color.a == 0 {
            return Ok(());
        }
        let Some(state) = self.text_state()? else {
            return Ok(());
        };
        let shaped = state.engine.shape(text, size_px)?;

        let origin_x = center.x - f64::from(shaped.width) / 2.0;
        let origin_y = center.y - f64::from(shaped.height) / 2.0;
        ctx.set_transform(Affine::translate((origin_x, origin_y)));
        ctx.set_paint(paint(color));
        for line in shaped.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&state.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(Affine::IDENTITY);
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    fn render(&mut self, frame: &EvaluatedFrame) -> SceneResult<FrameRGBA> {
        let (w, h) = canvas_dims_u16(frame.canvas.width, frame.canvas.height)?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);

        ctx.set_transform(Affine::IDENTITY);
        ctx.set_paint(paint(frame.background));
        ctx.fill_rect(&Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
        for node in &frame.nodes {
            self.draw_node(&mut ctx, node)?;
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: frame.canvas.width,
            height: frame.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn worker_render_settings(&self) -> Option<RenderSettings> {
        Some(self.settings.clone())
    }
}

fn draw_cell(ctx: &mut vello_cpu::RenderContext, center: Point, size: Size, style: &CellStyle) {
    let rect = Rect::from_center_size(
        vello_cpu::kurbo::Point::new(center.x, center.y),
        vello_cpu::kurbo::Size::new(size.width, size.height),
    );
    ctx.set_transform(Affine::IDENTITY);
    if style.fill.a > 0 {
        ctx.set_paint(paint(style.fill));
        ctx.fill_rect(&rect);
    }
    if style.stroke_width > 0.0 && style.stroke.a > 0 {
        ctx.set_paint(paint(style.stroke));
        ctx.set_stroke(Stroke::new(style.stroke_width));
        ctx.stroke_rect(&rect);
    }
}

fn paint(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
