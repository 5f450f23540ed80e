//! Reference algorithms and the scene scripts that animate them.
//!
//! Every module pairs a plain textbook implementation with a `scene(&SceneConfig)` script. The
//! script re-runs the algorithm step by step on a cell collection and records what changes.

use std::{fmt, str::FromStr};

use crate::{
    cells::collection::CellCollection,
    cells::layout::CellGeometry,
    cells::style::CellStyle,
    config::SceneConfig,
    foundation::core::Rgba8,
    foundation::error::{SceneError, SceneResult},
    scene::model::Scene,
    scene::script::Script,
};

pub(crate) mod binary_search;
pub(crate) mod bubble_sort;
pub(crate) mod insertion_sort;
pub(crate) mod merge_sort;
pub(crate) mod prefix_sum;
pub(crate) mod sieve;
pub(crate) mod sliding_window;

pub use binary_search::binary_search;
pub use bubble_sort::bubble_sort;
pub use insertion_sort::insertion_sort;
pub use merge_sort::merge_sort;
pub use prefix_sum::{prefix_sums, range_sum};
pub use sieve::{primes_up_to, sieve};
pub use sliding_window::max_window_sum;

/// The animated algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Halving search over a sorted array.
    BinarySearch,
    /// Adjacent compare-and-swap passes.
    BubbleSort,
    /// Grow a sorted prefix by inserting one key at a time.
    InsertionSort,
    /// Split in halves, sort each, merge.
    MergeSort,
    /// Sieve of Eratosthenes.
    Sieve,
    /// Running totals and O(1) range sums.
    PrefixSum,
    /// Fixed-size window with an incrementally updated sum.
    SlidingWindow,
}

impl Algorithm {
    /// All algorithms in presentation order.
    pub const ALL: [Self; 7] = [
        Self::BinarySearch,
        Self::BubbleSort,
        Self::InsertionSort,
        Self::MergeSort,
        Self::Sieve,
        Self::PrefixSum,
        Self::SlidingWindow,
    ];

    /// Kebab-case name used on the command line and as the scene name.
    pub fn name(self) -> &'static str {
        match self {
            Self::BinarySearch => "binary-search",
            Self::BubbleSort => "bubble-sort",
            Self::InsertionSort => "insertion-sort",
            Self::MergeSort => "merge-sort",
            Self::Sieve => "sieve",
            Self::PrefixSum => "prefix-sum",
            Self::SlidingWindow => "sliding-window",
        }
    }

    /// Title shown at the top of the video.
    pub fn title(self) -> &'static str {
        match self {
            Self::BinarySearch => "Binary Search",
            Self::BubbleSort => "Bubble Sort",
            Self::InsertionSort => "Insertion Sort",
            Self::MergeSort => "Merge Sort",
            Self::Sieve => "Sieve of Eratosthenes",
            Self::PrefixSum => "Prefix Sums",
            Self::SlidingWindow => "Sliding Window",
        }
    }

    /// Which `cfg.inputs` fields the scene reads.
    pub fn inputs_help(self) -> &'static str {
        match self {
            Self::BinarySearch => "array (sorted), target",
            Self::BubbleSort | Self::InsertionSort | Self::MergeSort | Self::PrefixSum => "array",
            Self::Sieve => "limit",
            Self::SlidingWindow => "array, window",
        }
    }

    /// Record the scene for this algorithm.
    #[tracing::instrument(skip(cfg))]
    pub fn build(self, cfg: &SceneConfig) -> SceneResult<Scene> {
        cfg.validate()?;
        match self {
            Self::BinarySearch => binary_search::scene(cfg),
            Self::BubbleSort => bubble_sort::scene(cfg),
            Self::InsertionSort => insertion_sort::scene(cfg),
            Self::MergeSort => merge_sort::scene(cfg),
            Self::Sieve => sieve::scene(cfg),
            Self::PrefixSum => prefix_sum::scene(cfg),
            Self::SlidingWindow => sliding_window::scene(cfg),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|a| a.name()).collect();
                SceneError::invalid_argument(format!(
                    "unknown scene '{s}' (expected one of: {})",
                    names.join(", ")
                ))
            })
    }
}

/// Configured input array, or the scene's textbook example.
pub(crate) fn input_array(cfg: &SceneConfig, default: &[i64]) -> SceneResult<Vec<i64>> {
    let values = cfg
        .inputs
        .array
        .clone()
        .unwrap_or_else(|| default.to_vec());
    if values.is_empty() {
        return Err(SceneError::invalid_argument("input array must be non-empty"));
    }
    Ok(values)
}

/// Copy of `cfg` whose cells (and labels) shrink so a `cols x rows` block fits the canvas.
pub(crate) fn fitted(cfg: &SceneConfig, cols: usize, rows: usize) -> SceneConfig {
    let g = cfg.geometry;
    let rows = rows.max(1);
    let block_w = g.row_width(cols.max(1));
    let block_h = (rows as f64) * g.height + ((rows - 1) as f64) * g.spacing;
    let scale = (f64::from(cfg.canvas.width) * 0.92 / block_w)
        .min(f64::from(cfg.canvas.height) * 0.6 / block_h)
        .min(1.0);
    if scale >= 1.0 {
        return cfg.clone();
    }
    let mut out = cfg.clone();
    out.geometry = CellGeometry {
        width: g.width * scale,
        height: g.height * scale,
        spacing: g.spacing * scale,
    };
    out.label_size_px = (cfg.label_size_px * scale as f32).max(6.0);
    tracing::debug!(scale, "cells scaled down to fit the canvas");
    out
}

/// A row of idle cells centered horizontally around `center_y`.
pub(crate) fn centered_row(
    script: &Script,
    values: &[i64],
    center_y: f64,
) -> SceneResult<CellCollection> {
    let cfg = script.config();
    let origin = cfg
        .geometry
        .centered_row_origin(cfg.canvas, values.len(), center_y);
    CellCollection::new(
        values.iter().copied(),
        cfg.geometry,
        origin,
        cfg.palette.idle.into(),
        script.ids(),
    )
}

/// Integer held at `index`.
pub(crate) fn int_at(cells: &CellCollection, index: usize) -> SceneResult<i64> {
    cells.value(index)?.as_int().ok_or_else(|| {
        SceneError::invalid_argument(format!("slot {index} does not hold an integer"))
    })
}

/// Invisible cell style for placeholders (holes, unused grid slots).
pub(crate) fn hidden_style() -> CellStyle {
    CellStyle::outline(Rgba8::TRANSPARENT, 0.0)
}

/// Vertical center of the main row.
pub(crate) fn main_row_y(cfg: &SceneConfig) -> f64 {
    f64::from(cfg.canvas.height) * 0.5
}

#[cfg(test)]
#[path = "../../tests/unit/algorithms/mod.rs"]
mod tests;
