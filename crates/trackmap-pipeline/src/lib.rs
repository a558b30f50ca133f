//! trackmap-pipeline: Pure track-map geometry (sans-IO).
//!
//! Converts raw circuit survey data and live telemetry frames into a
//! normalized screen-space coordinate system suitable for rendering as
//! a scalable vector overlay:
//!
//! - [`transform`] -- rotation about a pivot with the screen-space
//!   y-flip; used by everything downstream.
//! - [`normalize`] -- one-shot survey normalization: pivot, transformed
//!   centerline and corners, padded viewport, stroke unit, start/finish
//!   direction.
//! - [`project`] -- per-tick projection of live car positions with
//!   on-track/off-track presentation.
//! - [`annotate`] -- corner label and leader-line geometry, computed
//!   once per track and reused every frame.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! data and returns structured results. Fetching the survey lives in
//! `trackmap-io`; serialization of the assembled scene lives in
//! `trackmap-scene`.

pub mod annotate;
pub mod normalize;
pub mod project;
pub mod transform;
pub mod types;

pub use annotate::{CornerAnnotation, corner_annotations};
pub use normalize::{MIN_POINTS, NormalizeError, VIEWPORT_PADDING, normalize_track};
pub use project::{CarMarker, ProjectError, project_frame};
pub use transform::{range_midpoint_pivot, rotate};
pub use types::{
    CarPosition, CarStatus, CornerRaw, CornerTransformed, DriverMeta, LiveFrame, Point,
    RawTrackSurvey, TimingFlags, TransformedTrack, Viewport,
};
