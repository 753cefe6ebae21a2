//! Upload-to-result lifecycle: selection, preview, analysis and reset.

use std::sync::Arc;

use chrono::Local;

use crate::analyzer::Analyzer;
use crate::error::{AppError, AppResult};
use crate::models::AnalysisResult;
use crate::render::ResultView;
use crate::selection::SelectedImage;
use crate::state::{UiEvent, UiState};

/// A started analysis: what to send, and the id to report completion under
#[derive(Clone, Debug)]
pub struct AnalysisTicket {
    pub id: u64,
    pub image: Arc<SelectedImage>,
}

/// Owns the selected photo and the visible UI mode.
///
/// Nothing here touches a window, so the whole lifecycle can be driven from
/// tests. UIs that cannot hold a borrow across an await use
/// [`begin_analysis`](Self::begin_analysis) and
/// [`finish_analysis`](Self::finish_analysis) directly; everything else can
/// call [`analyze`](Self::analyze).
#[derive(Debug)]
pub struct UploadAnalysisController<A> {
    analyzer: Arc<A>,
    selection: Option<Arc<SelectedImage>>,
    state: UiState,
    next_ticket: u64,
    /// Ticket whose outcome will be shown
    pending: Option<u64>,
    /// Ticket whose request is still running, shown or not
    in_flight: Option<u64>,
}

impl<A: Analyzer> UploadAnalysisController<A> {
    pub fn new(analyzer: A) -> Self {
        Self::from_shared(Arc::new(analyzer))
    }

    pub fn from_shared(analyzer: Arc<A>) -> Self {
        Self {
            analyzer,
            selection: None,
            state: UiState::NoSelection,
            next_ticket: 0,
            pending: None,
            in_flight: None,
        }
    }

    pub fn analyzer(&self) -> Arc<A> {
        Arc::clone(&self.analyzer)
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn selection(&self) -> Option<&SelectedImage> {
        self.selection.as_deref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.selection().map(|image| image.preview_url.as_str())
    }

    /// True while a request is running, including one whose photo was removed
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the analyze trigger is enabled
    pub fn can_analyze(&self) -> bool {
        self.state.can_analyze() && !self.is_busy()
    }

    /// Display strings for the current result, if one is showing
    pub fn result_view(&self) -> Option<ResultView> {
        match &self.state {
            UiState::ShowingResult { result, analyzed_at } => {
                Some(ResultView::new(result, Some(*analyzed_at)))
            }
            _ => None,
        }
    }

    /// Accept a picked or dropped file, replacing any previous photo.
    ///
    /// A rejected file leaves the current selection and mode untouched.
    pub fn select(
        &mut self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> AppResult<()> {
        let next = self.state.clone().transition(UiEvent::ImageSelected)?;

        let image = SelectedImage::from_file(file_name, content_type, bytes).map_err(|e| {
            log::warn!("Rejected {}: {}", file_name, e);
            e
        })?;

        log::info!(
            "Selected {} ({}, {} bytes)",
            image.file_name,
            image.content_type,
            image.bytes.len()
        );
        self.selection = Some(Arc::new(image));
        self.state = next;
        Ok(())
    }

    /// Drop the photo and anything shown for it.
    ///
    /// A request already sent keeps running; its outcome is discarded and no
    /// new analysis starts until it has finished.
    pub fn remove(&mut self) {
        if let Some(image) = self.selection.take() {
            log::info!("Removed {}", image.file_name);
        }
        self.pending = None;
        self.state = UiState::NoSelection;
    }

    /// Switch to loading and hand out the photo to analyze.
    pub fn begin_analysis(&mut self) -> AppResult<AnalysisTicket> {
        let image = self.selection.clone().ok_or(AppError::NoSelection)?;
        if let Some(running) = self.in_flight {
            log::warn!("Analysis #{} still running, not starting another", running);
            return Err(AppError::Busy);
        }
        self.state = self.state.clone().transition(UiEvent::AnalysisStarted)?;

        self.next_ticket += 1;
        self.pending = Some(self.next_ticket);
        self.in_flight = Some(self.next_ticket);

        Ok(AnalysisTicket {
            id: self.next_ticket,
            image,
        })
    }

    /// Record how analysis `ticket` ended.
    ///
    /// Failures are logged, shown as the error mode and handed back so the
    /// caller can raise a notice. Completions for a ticket that is no longer
    /// pending (the photo was removed meanwhile) are dropped.
    pub fn finish_analysis(
        &mut self,
        ticket: u64,
        outcome: AppResult<AnalysisResult>,
    ) -> AppResult<()> {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }
        if self.pending != Some(ticket) {
            log::debug!("Ignoring stale analysis #{}", ticket);
            return Ok(());
        }
        self.pending = None;

        let event = match &outcome {
            Ok(result) => {
                log::info!(
                    "Analysis #{} done: {}",
                    ticket,
                    result.product_name.as_deref().unwrap_or("?")
                );
                UiEvent::AnalysisSucceeded {
                    result: result.clone(),
                    analyzed_at: Local::now(),
                }
            }
            Err(error) => {
                log::error!("Analysis #{} failed: {}", ticket, error);
                UiEvent::AnalysisFailed {
                    message: error.user_message(),
                }
            }
        };
        self.state = self.state.clone().transition(event)?;

        outcome.map(|_| ())
    }

    /// Run one analysis of the current photo end to end.
    pub async fn analyze(&mut self) -> AppResult<()> {
        let ticket = self.begin_analysis()?;
        let outcome = self.analyzer.analyze(&ticket.image).await;
        self.finish_analysis(ticket.id, outcome)
    }
}
