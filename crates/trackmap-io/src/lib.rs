//! trackmap-io: Survey fetching and track-selection state.
//!
//! All I/O for trackmap lives here: the HTTP [`client`] for the survey
//! endpoint and the [`session`] state machine that discards superseded
//! fetch results when the track selection changes mid-flight. The
//! geometry itself stays in `trackmap-pipeline`, which this crate
//! invokes once per applied survey.

pub mod client;
pub mod session;

pub use client::{DEFAULT_BASE_URL, FetchError, SurveyClient, SurveyOutcome};
pub use session::{FetchTicket, SurveyState, TrackSession};
