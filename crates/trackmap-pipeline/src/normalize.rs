//! Track normalization: one-shot transform of a raw survey into a
//! renderable snapshot.
//!
//! Runs once per track selection. Computes the rotation pivot from the
//! raw coordinate extent, rotates every centerline point and corner
//! marker into screen space, derives the padded bounding viewport and
//! the scale-dependent stroke unit, and measures the direction of the
//! start/finish straight.

use crate::transform::{range_midpoint_pivot, rotate};
use crate::types::{CornerTransformed, Point, RawTrackSurvey, TransformedTrack, Viewport};

/// Margin added around the transformed geometry on every viewport side,
/// in rotated survey units.
pub const VIEWPORT_PADDING: f64 = 1000.0;

/// Minimum number of centerline points a survey must supply.
///
/// The first and fourth points define the start/finish straight
/// direction, so anything shorter cannot be normalized.
pub const MIN_POINTS: usize = 4;

/// Distance of a corner's label anchor from the corner itself, in
/// stroke units, measured along the corner's local track direction.
const LABEL_OFFSET_STROKES: f64 = 5.0;

/// Errors produced by [`normalize_track`].
///
/// Both variants are caller contract violations: they indicate corrupt
/// upstream survey data, not conditions to recover from.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// The centerline coordinate sequences differ in length.
    #[error("survey has {x_len} x coordinates but {y_len} y coordinates")]
    LengthMismatch {
        /// Number of x coordinates supplied.
        x_len: usize,
        /// Number of y coordinates supplied.
        y_len: usize,
    },

    /// The centerline has too few points to orient the track.
    #[error("survey supplies {count} centerline points, at least {MIN_POINTS} required")]
    TooFewPoints {
        /// Number of points supplied.
        count: usize,
    },
}

/// Normalize a raw survey into a [`TransformedTrack`] snapshot.
///
/// The pivot is the half-range of the raw x and y extents (see
/// [`range_midpoint_pivot`]); every centerline point and corner is
/// rotated about it by the survey's rotation angle. The viewport is the
/// tight bounding box of the transformed centerline expanded by
/// [`VIEWPORT_PADDING`] on every side, and the stroke unit is
/// `(width + height) / 200` so visual density stays constant across
/// track sizes.
///
/// Corner label anchors are offset from the raw corner position by
/// `5 × stroke` along the corner's own angle **before** rotation, which
/// keeps the offset aligned with the local track direction rather than
/// a global screen direction.
///
/// # Errors
///
/// Returns [`NormalizeError::LengthMismatch`] if `x` and `y` differ in
/// length, and [`NormalizeError::TooFewPoints`] if fewer than
/// [`MIN_POINTS`] points are supplied.
pub fn normalize_track(survey: &RawTrackSurvey) -> Result<TransformedTrack, NormalizeError> {
    if survey.x.len() != survey.y.len() {
        return Err(NormalizeError::LengthMismatch {
            x_len: survey.x.len(),
            y_len: survey.y.len(),
        });
    }
    if survey.x.len() < MIN_POINTS {
        return Err(NormalizeError::TooFewPoints {
            count: survey.x.len(),
        });
    }

    let pivot = range_midpoint_pivot(&survey.x, &survey.y);

    let points: Vec<Point> = survey
        .x
        .iter()
        .zip(&survey.y)
        .map(|(&x, &y)| rotate(x, y, survey.rotation, pivot))
        .collect();

    let viewport = bounding_viewport(&points);
    let stroke = (viewport.width + viewport.height) / 200.0;

    let corners = survey
        .corners
        .iter()
        .map(|corner| {
            let transformed = rotate(
                corner.track_position.x,
                corner.track_position.y,
                survey.rotation,
                pivot,
            );

            let offset = LABEL_OFFSET_STROKES * stroke;
            let direction = corner.angle.to_radians();
            let label = rotate(
                offset.mul_add(direction.cos(), corner.track_position.x),
                offset.mul_add(direction.sin(), corner.track_position.y),
                survey.rotation,
                pivot,
            );

            CornerTransformed {
                number: corner.number,
                letter: corner.letter.clone(),
                corner: transformed,
                label,
            }
        })
        .collect();

    // Direction of the start/finish straight: the slope angle of the
    // segment from the first to the fourth transformed point.
    let start_angle = ((points[3].y - points[0].y) / (points[3].x - points[0].x))
        .atan()
        .to_degrees();

    Ok(TransformedTrack {
        points,
        corners,
        start_angle,
        viewport,
        stroke,
        rotation: survey.rotation,
    })
}

/// Tight bounding box of `points` expanded by [`VIEWPORT_PADDING`] on
/// every side.
fn bounding_viewport(points: &[Point]) -> Viewport {
    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    Viewport {
        min_x: min_x - VIEWPORT_PADDING,
        min_y: min_y - VIEWPORT_PADDING,
        width: 2.0f64.mul_add(VIEWPORT_PADDING, max_x - min_x),
        height: 2.0f64.mul_add(VIEWPORT_PADDING, max_y - min_y),
    }
}
