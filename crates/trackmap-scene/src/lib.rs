//! trackmap-scene: Scene assembly and SVG serialization (sans-IO).
//!
//! Bundles a normalized [`trackmap_pipeline::types::TransformedTrack`]
//! and one frame's car markers into a [`Scene`], and serializes scenes
//! to SVG. The "no data" display state is represented by the absence
//! of a scene -- callers only compose once a track snapshot exists.

pub mod scene;
pub mod svg;

pub use scene::{Scene, StartMarker};
pub use svg::{build_path_data, to_svg};
