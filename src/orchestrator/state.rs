use crate::model::{AnalysisResult, TimeFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Requesting,
    Succeeded,
    Failed,
}

/// Everything renderers may read about the current search.
///
/// `analysis` from the previous search stays visible while a new request is loading
/// and is replaced wholesale once that request settles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    /// Last submitted ticker, reused by timeframe changes.
    pub ticker: String,
    pub timeframe: TimeFrame,
    pub analysis: Option<AnalysisResult>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SearchState {
    pub fn new(timeframe: TimeFrame) -> Self {
        Self {
            timeframe,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> SearchPhase {
        if self.loading {
            SearchPhase::Requesting
        } else if self.error.is_some() {
            SearchPhase::Failed
        } else if self.analysis.is_some() {
            SearchPhase::Succeeded
        } else {
            SearchPhase::Idle
        }
    }
}
