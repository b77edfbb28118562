pub mod command_handler;
pub mod listener;

use crate::client::AnalysisClient;
use crate::orchestrator::SearchOrchestrator;
use std::sync::Arc;

/// What the interactive prompt works against.
pub struct Session {
    pub orchestrator: SearchOrchestrator,
    pub client: Arc<dyn AnalysisClient>,
}

impl Session {
    pub fn new(client: Arc<dyn AnalysisClient>, orchestrator: SearchOrchestrator) -> Self {
        Self { orchestrator, client }
    }
}
