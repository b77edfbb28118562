pub mod chart;
pub mod panel;

use crate::orchestrator::{SearchPhase, SearchState};

/// Renders everything the terminal shows for one state snapshot.
pub fn render_state(state: &SearchState, chart_width: usize) -> String {
    match (state.phase(), &state.error, &state.analysis) {
        (SearchPhase::Requesting, _, _) => {
            format!("⏳ Analyzing {} ({})...", state.ticker, state.timeframe.display_name())
        }
        (SearchPhase::Failed, Some(error), _) => format!("⚠️ {}", error),
        (SearchPhase::Succeeded, _, Some(analysis)) => {
            let spec = chart::build_chart_spec(&analysis.chart_data);
            format!(
                "{}\n{}\n\n{}",
                chart::render_chart(&spec, chart_width),
                chart::render_timeframe_toggles(analysis.market, state.timeframe),
                panel::render_result(analysis)
            )
        }
        _ => String::new(),
    }
}
