//! Track selection state with fetch-and-supersede semantics.
//!
//! Selecting a track starts a logical fetch and hands back a ticket
//! carrying the current generation. When the fetch resolves, the
//! ticket is presented together with the outcome; a ticket from a
//! superseded selection is discarded silently, so a slow response for
//! a previously selected track can never clobber the current one.

use trackmap_pipeline::normalize::{NormalizeError, normalize_track};
use trackmap_pipeline::types::TransformedTrack;

use crate::client::SurveyOutcome;

/// Proof of a started fetch: the selection generation plus the circuit
/// and season to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    circuit_id: u32,
    year: u16,
}

impl FetchTicket {
    /// Circuit to fetch.
    #[must_use]
    pub const fn circuit_id(&self) -> u32 {
        self.circuit_id
    }

    /// Season to fetch.
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }
}

/// Current survey display state.
#[derive(Debug, Clone, PartialEq)]
pub enum SurveyState {
    /// No track selected, or the selected track has no survey data.
    /// A valid terminal state: the renderer shows nothing.
    Empty,
    /// A fetch for this circuit and season is in flight.
    Pending {
        /// Circuit being fetched.
        circuit_id: u32,
        /// Season being fetched.
        year: u16,
    },
    /// A normalized snapshot is loaded and renderable.
    Loaded(TransformedTrack),
}

/// Owner of the current track selection and its survey state.
///
/// Single-threaded by design: selection and resolution both happen on
/// the one logical thread driving the display, and the loaded snapshot
/// is replaced wholesale, never mutated.
#[derive(Debug)]
pub struct TrackSession {
    generation: u64,
    state: SurveyState,
}

impl Default for TrackSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackSession {
    /// A session with nothing selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: 0,
            state: SurveyState::Empty,
        }
    }

    /// Select a track, superseding any in-flight fetch.
    ///
    /// Bumps the generation and moves to [`SurveyState::Pending`]; any
    /// outstanding ticket from an earlier selection becomes stale and
    /// will be ignored by [`resolve`](Self::resolve).
    pub fn select(&mut self, circuit_id: u32, year: u16) -> FetchTicket {
        self.generation += 1;
        self.state = SurveyState::Pending { circuit_id, year };
        tracing::debug!(circuit_id, year, generation = self.generation, "track selected");
        FetchTicket {
            generation: self.generation,
            circuit_id,
            year,
        }
    }

    /// Apply a fetch outcome, unless its ticket has been superseded.
    ///
    /// Returns `true` if the outcome was applied, `false` if it was
    /// stale and discarded. An unavailable survey resolves to
    /// [`SurveyState::Empty`].
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError`] when an available survey violates the
    /// normalizer's preconditions -- corrupt upstream data, propagated
    /// rather than absorbed. The session stays in its previous state.
    pub fn resolve(
        &mut self,
        ticket: &FetchTicket,
        outcome: SurveyOutcome,
    ) -> Result<bool, NormalizeError> {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded survey result",
            );
            return Ok(false);
        }

        match outcome {
            SurveyOutcome::Available(survey) => {
                self.state = SurveyState::Loaded(normalize_track(&survey)?);
            }
            SurveyOutcome::Unavailable { status } => {
                tracing::info!(
                    circuit_id = ticket.circuit_id,
                    year = ticket.year,
                    status,
                    "no survey data; clearing display",
                );
                self.state = SurveyState::Empty;
            }
        }
        Ok(true)
    }

    /// Current survey state.
    #[must_use]
    pub const fn state(&self) -> &SurveyState {
        &self.state
    }

    /// The loaded snapshot, if any.
    #[must_use]
    pub const fn track(&self) -> Option<&TransformedTrack> {
        match &self.state {
            SurveyState::Loaded(track) => Some(track),
            SurveyState::Empty | SurveyState::Pending { .. } => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use trackmap_pipeline::types::RawTrackSurvey;

    fn survey(rotation: f64) -> RawTrackSurvey {
        RawTrackSurvey {
            x: vec![0.0, 10.0, 10.0, 0.0],
            y: vec![0.0, 0.0, 10.0, 10.0],
            rotation,
            corners: vec![],
        }
    }

    #[test]
    fn starts_empty() {
        let session = TrackSession::new();
        assert_eq!(*session.state(), SurveyState::Empty);
        assert!(session.track().is_none());
    }

    #[test]
    fn select_then_resolve_loads_the_track() {
        let mut session = TrackSession::new();
        let ticket = session.select(14, 2024);
        assert_eq!(ticket.circuit_id(), 14);
        assert_eq!(ticket.year(), 2024);
        assert_eq!(
            *session.state(),
            SurveyState::Pending {
                circuit_id: 14,
                year: 2024,
            },
        );

        let applied = session
            .resolve(&ticket, SurveyOutcome::Available(survey(0.0)))
            .unwrap();
        assert!(applied);
        assert!(session.track().is_some());
    }

    #[test]
    fn unavailable_survey_resolves_to_empty() {
        let mut session = TrackSession::new();
        let ticket = session.select(3, 2024);
        let applied = session
            .resolve(&ticket, SurveyOutcome::Unavailable { status: 404 })
            .unwrap();
        assert!(applied);
        assert_eq!(*session.state(), SurveyState::Empty);
        assert!(session.track().is_none());
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut session = TrackSession::new();
        let first = session.select(3, 2024);
        let second = session.select(14, 2024);

        // The superseded fetch resolves late; nothing happens.
        let applied = session
            .resolve(&first, SurveyOutcome::Available(survey(90.0)))
            .unwrap();
        assert!(!applied);
        assert_eq!(
            *session.state(),
            SurveyState::Pending {
                circuit_id: 14,
                year: 2024,
            },
        );

        // The current fetch still lands.
        let applied = session
            .resolve(&second, SurveyOutcome::Available(survey(0.0)))
            .unwrap();
        assert!(applied);
        assert!(session.track().is_some());
    }

    #[test]
    fn later_selection_fully_replaces_an_earlier_track() {
        let mut session = TrackSession::new();
        let first = session.select(3, 2024);
        session
            .resolve(&first, SurveyOutcome::Available(survey(90.0)))
            .unwrap();
        let loaded_rotation = session.track().unwrap().rotation;
        assert!((loaded_rotation - 90.0).abs() < f64::EPSILON);

        let second = session.select(14, 2024);
        assert!(session.track().is_none(), "pending selection must clear the snapshot");
        session
            .resolve(&second, SurveyOutcome::Available(survey(45.0)))
            .unwrap();
        let replaced_rotation = session.track().unwrap().rotation;
        assert!((replaced_rotation - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn corrupt_survey_propagates_and_preserves_state() {
        let mut session = TrackSession::new();
        let ticket = session.select(3, 2024);
        let corrupt = RawTrackSurvey {
            x: vec![0.0, 1.0],
            y: vec![0.0, 1.0],
            rotation: 0.0,
            corners: vec![],
        };
        let result = session.resolve(&ticket, SurveyOutcome::Available(corrupt));
        assert!(matches!(result, Err(NormalizeError::TooFewPoints { count: 2 })));
        assert_eq!(
            *session.state(),
            SurveyState::Pending {
                circuit_id: 3,
                year: 2024,
            },
        );
    }

    #[test]
    fn stale_unavailable_result_cannot_clear_a_loaded_track() {
        let mut session = TrackSession::new();
        let first = session.select(3, 2024);
        let second = session.select(14, 2024);
        session
            .resolve(&second, SurveyOutcome::Available(survey(0.0)))
            .unwrap();

        // The long-superseded 404 arrives last.
        let applied = session
            .resolve(&first, SurveyOutcome::Unavailable { status: 404 })
            .unwrap();
        assert!(!applied);
        assert!(session.track().is_some());
    }
}
