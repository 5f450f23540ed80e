use crate::{
    eval::evaluator::{Drawable, EvaluatedFrame},
    foundation::core::Rgba8,
    foundation::math::Fnv1a64,
};
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x8b5ad4a0c7d8e9f1;

/// 128-bit content hash of an evaluated frame.
///
/// Equal fingerprints mean the frames render to the same pixels, which lets the pipeline skip
/// repeated renders of held frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    /// FNV-1a lane.
    pub hi: u64,
    /// Seeded XXH3 lane.
    pub lo: u64,
}

/// Hash everything that affects the pixels of `frame` (but not the frame index).
pub fn fingerprint_frame(frame: &EvaluatedFrame) -> FrameFingerprint {
    let mut h = Pair::new();

    h.u64(u64::from(frame.canvas.width));
    h.u64(u64::from(frame.canvas.height));
    h.color(frame.background);
    h.u64(frame.nodes.len() as u64);
    for node in &frame.nodes {
        h.u64(node.id.0);
        h.f64(node.center.x);
        h.f64(node.center.y);
        h.f64(node.opacity);
        match &node.draw {
            Drawable::Rect { size, style } => {
                h.u8(0);
                h.f64(size.width);
                h.f64(size.height);
                h.color(style.stroke);
                h.f64(style.stroke_width);
                h.color(style.fill);
            }
            Drawable::Text {
                text,
                size_px,
                color,
            } => {
                h.u8(1);
                h.str(text);
                h.f64(f64::from(*size_px));
                h.color(*color);
            }
        }
    }

    FrameFingerprint {
        hi: h.a.finish(),
        lo: h.b.digest(),
    }
}

struct Pair {
    a: Fnv1a64,
    b: Xxh3,
}

impl Pair {
    fn new() -> Self {
        Self {
            a: Fnv1a64::new_default(),
            b: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn u8(&mut self, v: u8) {
        self.a.write_u8(v);
        self.b.update(&[v]);
    }

    fn u64(&mut self, v: u64) {
        self.a.write_u64(v);
        self.b.update(&v.to_le_bytes());
    }

    fn f64(&mut self, v: f64) {
        self.a.write_f64(v);
        self.b.update(&v.to_bits().to_le_bytes());
    }

    fn str(&mut self, s: &str) {
        self.u64(s.len() as u64);
        self.a.write_bytes(s.as_bytes());
        self.b.update(s.as_bytes());
    }

    fn color(&mut self, c: Rgba8) {
        for v in <[u8; 4]>::from(c) {
            self.u8(v);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
