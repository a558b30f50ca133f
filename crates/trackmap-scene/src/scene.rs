//! Scene assembly: bundle a normalized track snapshot and per-frame
//! car markers into the description the rendering surface consumes.

use trackmap_pipeline::annotate::{CornerAnnotation, corner_annotations};
use trackmap_pipeline::project::CarMarker;
use trackmap_pipeline::types::{Point, TransformedTrack, Viewport};

/// Start/finish line marker: a short bar across the track at the first
/// centerline point, oriented along the start/finish straight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartMarker {
    /// First transformed centerline point.
    pub position: Point,
    /// Direction of the start/finish straight in degrees.
    pub angle: f64,
}

/// A complete renderable scene: the static track geometry plus one
/// frame's car markers.
///
/// The static parts (viewport, centerline, start marker, corner
/// annotations, stroke) change only on track selection; `cars` is
/// replaced every telemetry tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Viewport rectangle the renderer should map to its surface.
    pub viewport: Viewport,
    /// Transformed centerline polyline.
    pub centerline: Vec<Point>,
    /// Start/finish marker transform.
    pub start_marker: StartMarker,
    /// Car markers for the current frame; empty when no telemetry is
    /// available.
    pub cars: Vec<CarMarker>,
    /// Corner annotations, static per track.
    pub corners: Vec<CornerAnnotation>,
    /// Shared stroke unit for all line widths.
    pub stroke: f64,
}

impl Scene {
    /// Compose a scene from a normalized track and the current frame's
    /// car markers.
    ///
    /// Corner annotations are derived here from the track's corners so
    /// callers re-composing per tick pay only the (small) annotation
    /// cost; the heavy normalization has already happened.
    #[must_use]
    pub fn compose(track: &TransformedTrack, cars: Vec<CarMarker>) -> Self {
        Self {
            viewport: track.viewport,
            centerline: track.points.clone(),
            start_marker: StartMarker {
                position: track.points.first().copied().unwrap_or_default(),
                angle: track.start_angle,
            },
            cars,
            corners: corner_annotations(&track.corners, track.stroke),
            stroke: track.stroke,
        }
    }
}
