//! Per-frame projection of live car positions into screen space.
//!
//! Runs synchronously on every telemetry tick. Must never block or
//! suspend: telemetry arrives on a tight external cadence and a stalled
//! projection is worse than a dropped frame. The function is pure -- it
//! reads the frame, produces markers, and mutates nothing.

use crate::transform::{range_midpoint_pivot, rotate};
use crate::types::{CarStatus, LiveFrame, Point};

/// Nominal marker radius in stroke units.
const MARKER_RADIUS_STROKES: f64 = 1.5;

/// Label font size in stroke units.
const LABEL_FONT_STROKES: f64 = 3.0;

/// Opacity of a car that is not actively circulating.
const OFF_TRACK_OPACITY: f64 = 0.5;

/// Radius divisor for a car that is not actively circulating.
const OFF_TRACK_RADIUS_DIVISOR: f64 = 2.0;

/// A car marker ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CarMarker {
    /// Racing number the marker belongs to.
    pub racing_number: String,
    /// Marker center in screen space.
    pub position: Point,
    /// Marker radius; halved for off-track cars.
    pub radius: f64,
    /// Team colour as an `RRGGBB` hex string without the leading `#`.
    pub colour: String,
    /// Three-letter driver abbreviation rendered beside the marker.
    pub label: String,
    /// Full opacity on track, half otherwise.
    pub opacity: f64,
    /// Label font size.
    pub font_size: f64,
}

/// Errors produced by [`project_frame`].
///
/// Both variants mean the telemetry maps are not key-consistent, which
/// is a caller contract violation (upstream data corruption), not a
/// condition to absorb.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// A position entry has no matching driver metadata.
    #[error("no driver metadata for racing number {0}")]
    MissingDriver(String),

    /// A position entry has no matching timing record.
    #[error("no timing record for racing number {0}")]
    MissingTiming(String),
}

/// Project one telemetry frame into car markers.
///
/// The rotation pivot is recomputed from this frame's own coordinate
/// extent rather than the survey's. This is deliberate: the live feed's
/// extent may drift slightly from the survey's, and re-deriving the
/// pivot per frame keeps the cars aligned with the static track.
/// `rotation` is the survey's fixed rotation angle and `stroke` the
/// track's shared stroke unit, both from the current
/// [`crate::types::TransformedTrack`] snapshot.
///
/// A car counts as on track iff its status is [`CarStatus::OnTrack`]
/// and none of the knocked-out / retired / stopped timing flags are
/// set. Off-track cars render at half opacity and half radius.
///
/// An empty frame projects to an empty marker list.
///
/// # Errors
///
/// Returns [`ProjectError::MissingDriver`] or
/// [`ProjectError::MissingTiming`] when a racing number present in the
/// position map has no counterpart in the driver or timing map.
pub fn project_frame(
    frame: &LiveFrame,
    rotation: f64,
    stroke: f64,
) -> Result<Vec<CarMarker>, ProjectError> {
    if frame.positions.is_empty() {
        return Ok(Vec::new());
    }

    let xs: Vec<f64> = frame.positions.values().map(|p| p.x).collect();
    let ys: Vec<f64> = frame.positions.values().map(|p| p.y).collect();
    let pivot = range_midpoint_pivot(&xs, &ys);

    frame
        .positions
        .iter()
        .map(|(racing_number, position)| {
            let driver = frame
                .drivers
                .get(racing_number)
                .ok_or_else(|| ProjectError::MissingDriver(racing_number.clone()))?;
            let timing = frame
                .timing
                .get(racing_number)
                .ok_or_else(|| ProjectError::MissingTiming(racing_number.clone()))?;

            let on_track = position.status == CarStatus::OnTrack
                && !timing.knocked_out
                && !timing.retired
                && !timing.stopped;

            let nominal_radius = MARKER_RADIUS_STROKES * stroke;
            let (radius, opacity) = if on_track {
                (nominal_radius, 1.0)
            } else {
                (nominal_radius / OFF_TRACK_RADIUS_DIVISOR, OFF_TRACK_OPACITY)
            };

            Ok(CarMarker {
                racing_number: racing_number.clone(),
                position: rotate(position.x, position.y, rotation, pivot),
                radius,
                colour: driver.team_colour.clone(),
                label: driver.tla.clone(),
                opacity,
                font_size: LABEL_FONT_STROKES * stroke,
            })
        })
        .collect()
}
