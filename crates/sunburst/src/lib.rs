//! Radial "sunburst" layout of a word, its senses and their related words.
//!
//! [`to_datum`] shapes a dictionary entry into a tree, [`Partition`] assigns every
//! node an angular span and a ring, [`WordChart`] keeps the interactive state and
//! produces a [`ChartLayout`], and [`SvgRenderer`] draws that layout.

mod chart;
mod datum;
mod label;
mod partition;
mod render;
mod text;

pub use chart::{
    ArcShape, ChartConfig, ChartLayout, ClickOutcome, Rgb, WordChart, WHEEL_SENSITIVITY,
};
pub use datum::{to_datum, WordDatum, DEFAULT_LEAF_WEIGHT};
pub use label::{max_lines, normalize_degrees, place_label, Label, TextChunk, LABEL_MAX_LEN};
pub use partition::{NodeId, Partition, PartitionNode, VisibilityRule};
pub use render::{sector_path, SvgRenderer};
pub use text::split_text;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("there is nothing to draw yet")]
    NoData,
    #[error("failed to write the chart: {0}")]
    Io(#[from] std::io::Error),
}
