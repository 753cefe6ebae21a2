//! Visible UI mode and the single transition function that moves between modes.

use chrono::{DateTime, Local};

use crate::error::{AppError, AppResult};
use crate::models::AnalysisResult;

/// Exactly one of these is on screen at a time
#[derive(Clone, Debug, Default, PartialEq)]
pub enum UiState {
    #[default]
    NoSelection,
    Previewing,
    Loading,
    ShowingResult {
        result: AnalysisResult,
        analyzed_at: DateTime<Local>,
    },
    ShowingError {
        message: String,
    },
}

/// Everything that can move the UI from one mode to another
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    ImageSelected,
    ImageRemoved,
    AnalysisStarted,
    AnalysisSucceeded {
        result: AnalysisResult,
        analyzed_at: DateTime<Local>,
    },
    AnalysisFailed {
        message: String,
    },
}

impl UiState {
    /// Apply `event`, refusing moves the UI must never make.
    ///
    /// Completions that arrive when no analysis is running are stale and
    /// leave the state untouched.
    pub fn transition(self, event: UiEvent) -> AppResult<UiState> {
        use UiEvent::*;
        use UiState::*;

        match (self, event) {
            (Loading, ImageSelected) => Err(AppError::Busy),
            (_, ImageSelected) => Ok(Previewing),

            (_, ImageRemoved) => Ok(NoSelection),

            (NoSelection, AnalysisStarted) => Err(AppError::NoSelection),
            (Loading, AnalysisStarted) => Err(AppError::Busy),
            (_, AnalysisStarted) => Ok(Loading),

            (Loading, AnalysisSucceeded { result, analyzed_at }) => {
                Ok(ShowingResult { result, analyzed_at })
            }
            (Loading, AnalysisFailed { message }) => Ok(ShowingError { message }),
            (state, AnalysisSucceeded { .. } | AnalysisFailed { .. }) => Ok(state),
        }
    }

    pub fn shows_upload(&self) -> bool {
        matches!(self, UiState::NoSelection)
    }

    pub fn shows_preview(&self) -> bool {
        !self.shows_upload()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    /// Whether the analyze trigger is enabled
    pub fn can_analyze(&self) -> bool {
        matches!(
            self,
            UiState::Previewing | UiState::ShowingResult { .. } | UiState::ShowingError { .. }
        )
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            UiState::ShowingResult { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiState::ShowingError { message } => Some(message),
            _ => None,
        }
    }
}
