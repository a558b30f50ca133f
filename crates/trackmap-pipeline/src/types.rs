//! Shared types for the trackmap geometry pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A 2D point.
///
/// Used for both raw survey coordinates and transformed screen-space
/// coordinates; which space a point lives in is determined by context
/// (fields of [`RawTrackSurvey`] are raw, fields of [`TransformedTrack`]
/// are screen space).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Raw circuit survey data as supplied by the survey endpoint.
///
/// `x` and `y` are parallel sequences describing the track centerline
/// polyline in raw survey units. `rotation` is the survey's display
/// rotation in degrees. Immutable once fetched for a given track and
/// season.
///
/// Unknown fields in the JSON body are ignored, so the type tolerates
/// endpoint additions without breaking deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrackSurvey {
    /// Centerline x coordinates, parallel to `y`.
    pub x: Vec<f64>,
    /// Centerline y coordinates, parallel to `x`.
    pub y: Vec<f64>,
    /// Display rotation in degrees.
    pub rotation: f64,
    /// Corner markers along the centerline.
    pub corners: Vec<CornerRaw>,
}

/// A corner marker in raw survey coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornerRaw {
    /// Corner number (1-based along the lap).
    pub number: u32,
    /// Optional suffix letter for split corners (e.g. turn 13A / 13B).
    #[serde(default)]
    pub letter: Option<String>,
    /// Local track direction at the corner, degrees in raw space.
    pub angle: f64,
    /// Corner position in raw survey coordinates.
    #[serde(rename = "trackPosition")]
    pub track_position: Point,
}

/// A corner after transformation into screen space.
///
/// `label` is the anchor for the corner's number text: the raw corner
/// position offset along the corner's local track direction before the
/// rotation was applied, so the label sits beside the track rather than
/// on top of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornerTransformed {
    /// Corner number.
    pub number: u32,
    /// Optional suffix letter.
    pub letter: Option<String>,
    /// Corner position in screen space.
    pub corner: Point,
    /// Label anchor in screen space.
    pub label: Point,
}

/// Axis-aligned viewport rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge.
    pub min_x: f64,
    /// Top edge.
    pub min_y: f64,
    /// Width, always positive for a loaded track.
    pub width: f64,
    /// Height, always positive for a loaded track.
    pub height: f64,
}

impl Viewport {
    /// Whether `point` lies inside the viewport (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.min_x + self.width
            && point.y >= self.min_y
            && point.y <= self.min_y + self.height
    }
}

/// A normalized track snapshot, computed once per track selection.
///
/// Invariants upheld by [`crate::normalize::normalize_track`]:
///
/// - `points.len()` equals the survey's centerline length (at least 4);
/// - `stroke > 0`;
/// - every point of `points` lies inside `viewport` with a uniform
///   [`crate::normalize::VIEWPORT_PADDING`] margin on all sides.
///
/// The snapshot is immutable: a new track selection replaces it
/// wholesale rather than mutating it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformedTrack {
    /// Centerline points in screen space.
    pub points: Vec<Point>,
    /// Corners in screen space with label anchors.
    pub corners: Vec<CornerTransformed>,
    /// Direction of the start/finish straight in degrees, measured from
    /// the segment between the first and fourth centerline points.
    pub start_angle: f64,
    /// Bounding viewport with padding.
    pub viewport: Viewport,
    /// Scale-dependent stroke unit used for all line widths, marker
    /// radii, and font sizes.
    pub stroke: f64,
    /// The survey rotation in degrees, kept so per-frame projection
    /// shares the same transform basis.
    pub rotation: f64,
}

/// Live car status as reported by the telemetry feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarStatus {
    /// Actively circulating.
    OnTrack,
    /// In the pits, off-line, or otherwise not circulating.
    OffTrack,
}

/// One car's position in a telemetry frame, raw survey coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarPosition {
    /// Raw x coordinate, same space as [`RawTrackSurvey::x`].
    pub x: f64,
    /// Raw y coordinate, same space as [`RawTrackSurvey::y`].
    pub y: f64,
    /// Live status flag.
    pub status: CarStatus,
}

/// Static per-driver presentation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverMeta {
    /// Team colour as an `RRGGBB` hex string without the leading `#`.
    pub team_colour: String,
    /// Three-letter driver abbreviation.
    pub tla: String,
}

/// Per-driver session flags from the timing feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingFlags {
    /// Eliminated in a knockout session segment.
    #[serde(default)]
    pub knocked_out: bool,
    /// Retired from the session.
    #[serde(default)]
    pub retired: bool,
    /// Stopped on track.
    #[serde(default)]
    pub stopped: bool,
}

/// One telemetry tick: positions, driver metadata, and timing flags,
/// all keyed by racing number.
///
/// The three maps must be key-consistent: every racing number present
/// in `positions` must also appear in `drivers` and `timing`. A missing
/// entry is a caller contract violation and surfaces as a
/// [`crate::project::ProjectError`].
///
/// `BTreeMap` keeps projection output deterministic in racing-number
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveFrame {
    /// Car positions for this tick.
    pub positions: BTreeMap<String, CarPosition>,
    /// Driver presentation metadata.
    pub drivers: BTreeMap<String, DriverMeta>,
    /// Timing status flags.
    pub timing: BTreeMap<String, TimingFlags>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn point_new() {
        let p = Point::new(3.0, -4.0);
        assert!((p.x - 3.0).abs() < f64::EPSILON);
        assert!((p.y - (-4.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn viewport_contains_interior_and_edges() {
        let vp = Viewport {
            min_x: -10.0,
            min_y: -10.0,
            width: 20.0,
            height: 20.0,
        };
        assert!(vp.contains(Point::new(0.0, 0.0)));
        assert!(vp.contains(Point::new(-10.0, -10.0)));
        assert!(vp.contains(Point::new(10.0, 10.0)));
        assert!(!vp.contains(Point::new(10.1, 0.0)));
        assert!(!vp.contains(Point::new(0.0, -10.1)));
    }

    #[test]
    fn survey_deserializes_from_wire_shape() {
        let json = r#"{
            "x": [0.0, 10.0, 10.0, 0.0],
            "y": [0.0, 0.0, 10.0, 10.0],
            "rotation": 90.0,
            "corners": [
                {
                    "number": 1,
                    "angle": 45.0,
                    "trackPosition": { "x": 5.0, "y": 5.0 }
                }
            ],
            "circuitName": "ignored extra field"
        }"#;
        let survey: RawTrackSurvey = serde_json::from_str(json).unwrap();
        assert_eq!(survey.x.len(), 4);
        assert!((survey.rotation - 90.0).abs() < f64::EPSILON);
        assert_eq!(survey.corners.len(), 1);
        assert_eq!(survey.corners[0].number, 1);
        assert_eq!(survey.corners[0].letter, None);
        assert_eq!(survey.corners[0].track_position, Point::new(5.0, 5.0));
    }

    #[test]
    fn corner_letter_round_trips() {
        let corner = CornerRaw {
            number: 13,
            letter: Some("A".to_string()),
            angle: 180.0,
            track_position: Point::new(1.0, 2.0),
        };
        let json = serde_json::to_string(&corner).unwrap();
        let back: CornerRaw = serde_json::from_str(&json).unwrap();
        assert_eq!(corner, back);
    }

    #[test]
    fn car_status_wire_strings() {
        let on: CarStatus = serde_json::from_str(r#""OnTrack""#).unwrap();
        let off: CarStatus = serde_json::from_str(r#""OffTrack""#).unwrap();
        assert_eq!(on, CarStatus::OnTrack);
        assert_eq!(off, CarStatus::OffTrack);
    }

    #[test]
    fn timing_flags_default_to_clear() {
        let flags: TimingFlags = serde_json::from_str("{}").unwrap();
        assert_eq!(flags, TimingFlags::default());
        assert!(!flags.knocked_out);
        assert!(!flags.retired);
        assert!(!flags.stopped);
    }

    #[test]
    fn live_frame_iterates_in_racing_number_order() {
        let mut frame = LiveFrame::default();
        for number in ["44", "1", "16"] {
            frame.positions.insert(
                number.to_string(),
                CarPosition {
                    x: 0.0,
                    y: 0.0,
                    status: CarStatus::OnTrack,
                },
            );
        }
        let keys: Vec<&str> = frame.positions.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["1", "16", "44"]);
    }
}
