//! Box-tree layout engine.
//!
//! This crate turns a parsed document tree into a tree of layout boxes and
//! inline items, then lays that tree out with a greedy line-flow pass and
//! renders it by emitting a display list of drawing commands.
//!
//! # Pipeline
//!
//! ```text
//! Document → Box tree → Layout → Display list
//!   (dom)    (builder)  (flow)      (draw)
//! ```
//!
//! # Module Structure
//!
//! - [`geometry`] - rectangles
//! - [`color`] - sRGB color values
//! - [`metrics`] - font metrics abstraction for text measurement
//! - [`context`] - style/layout state threaded through the passes
//! - [`item`] - inline-level items (words, markers, breaks, images)
//! - [`box_tree`] - block-level boxes and the line-flow layout pass
//! - [`builder`] - document-to-box-tree transducer (per-tag dispatch)
//! - [`display_list`] - drawing commands emitted by the draw pass

pub mod box_tree;
pub mod builder;
pub mod color;
pub mod context;
pub mod display_list;
pub mod geometry;
pub mod item;
pub mod metrics;

pub use box_tree::{BoxChild, BoxKind, LayoutBox};
pub use builder::{TagClass, build_box_tree, classify};
pub use color::ColorValue;
pub use context::{LayoutContext, TextStyle};
pub use display_list::{BlendMode, DisplayCommand, DisplayList};
pub use geometry::Rect;
pub use item::{FormatKind, InlineItem, ItemKind, Marker};
pub use metrics::{ApproximateFontMetrics, FontMetrics};
