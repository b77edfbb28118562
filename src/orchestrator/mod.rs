// Orchestrator module: owns the search state and drives one search at a time.

pub mod search;
pub mod state;

pub use search::SearchOrchestrator;
pub use state::{SearchPhase, SearchState};
