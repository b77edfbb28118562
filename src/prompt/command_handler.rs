// prompt/command_handler.rs

use crate::classifier::classify_market;
use crate::model::{MarketCode, TickerQuery, TimeFrame};
use crate::prompt::Session;
use tracing::{info, warn};

pub const HELP: &str = "📋 Available commands:\n\
    <TICKER>                 analyze a ticker (e.g. 005930 or AAPL)\n\
    :tf <timeframe>          re-run the last ticker (1m..240m, daily, weekly, monthly)\n\
    :indicators [TICKER]     technical indicators only\n\
    :find <text> [KR|US]     search listings\n\
    :status <KR|US>          market status\n\
    :help                    this list\n\
    :quit                    exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Analyze(String),
    Timeframe(TimeFrame),
    Indicators(Option<String>),
    Find { text: String, market: Option<MarketCode> },
    Status(MarketCode),
    Help,
    Quit,
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Output to print, if any. Search results arrive through the state observer instead.
    Continue(Option<String>),
    Quit,
}

/// Parses one prompt line. Anything not starting with `:` is a ticker.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Analyze(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    match (name.as_str(), args.as_slice()) {
        ("tf" | "timeframe", [tf]) => tf.parse().map(Command::Timeframe).map_err(|e| e.to_string()),
        ("indicators", []) => Ok(Command::Indicators(None)),
        ("indicators", [ticker]) => Ok(Command::Indicators(Some(ticker.to_string()))),
        ("find", [text]) => Ok(Command::Find {
            text: text.to_string(),
            market: None,
        }),
        ("find", [text, market]) => market
            .parse()
            .map(|m| Command::Find {
                text: text.to_string(),
                market: Some(m),
            })
            .map_err(|e| e.to_string()),
        ("status", [market]) => market.parse().map(Command::Status).map_err(|e| e.to_string()),
        ("help", []) => Ok(Command::Help),
        ("quit" | "q" | "exit", []) => Ok(Command::Quit),
        _ => Err(format!("🤖 Unknown command '{}'. Type :help for a list of commands.", line)),
    }
}

/// Executes a parsed command against the session.
pub async fn handle_command(command: Command, session: &Session) -> Outcome {
    info!("Handling command: {:?}", command);
    match command {
        Command::Analyze(ticker) => {
            if let Err(e) = session.orchestrator.submit(&ticker).await {
                warn!("analyze error: {}", e);
            }
            Outcome::Continue(None)
        }
        Command::Timeframe(tf) => {
            if let Err(e) = session.orchestrator.change_timeframe(tf).await {
                warn!("timeframe error: {}", e);
            }
            Outcome::Continue(None)
        }
        Command::Indicators(ticker) => {
            let ticker = ticker.unwrap_or_else(|| session.orchestrator.snapshot().ticker);
            let query = TickerQuery::new(&ticker);
            if query.is_empty() {
                return Outcome::Continue(Some("⚠️ Please enter a ticker symbol.".to_string()));
            }
            let market = classify_market(&query.raw_code);
            let msg = match session.client.fetch_indicators(&query, market).await {
                Ok(ind) => format!(
                    "📊 {} ({}) SMA 50: {:.2} | SMA 200: {:.2} | RSI: {:.2} | MACD: {:.2} / {:.2} / {:.2}",
                    query.raw_code,
                    market,
                    ind.sma_50,
                    ind.sma_200,
                    ind.rsi,
                    ind.macd.macd,
                    ind.macd.signal,
                    ind.macd.histogram
                ),
                Err(e) => {
                    warn!("indicators error: {}", e);
                    format!("⚠️ {}", e.user_message())
                }
            };
            Outcome::Continue(Some(msg))
        }
        Command::Find { text, market } => {
            let market = market.unwrap_or_else(|| classify_market(&text));
            let msg = match session.client.search_stocks(&text, market).await {
                Ok(found) if !found.is_empty() => {
                    let mut msg = format!("🔎 Matches for '{}' in {}:\n", text, market);
                    for item in found {
                        msg.push_str(&format!(
                            "🔹 {} — {} [{}]\n",
                            item.ticker.as_deref().unwrap_or("?"),
                            item.name.as_deref().unwrap_or("(unnamed)"),
                            item.market
                        ));
                    }
                    msg.trim_end().to_string()
                }
                Ok(_) => format!("📭 No matches for '{}' in {}.", text, market),
                Err(e) => {
                    warn!("find error: {}", e);
                    format!("⚠️ {}", e.user_message())
                }
            };
            Outcome::Continue(Some(msg))
        }
        Command::Status(market) => {
            let msg = match session.client.market_status(market).await {
                Ok(status) => match status.timestamp {
                    Some(at) => format!("🏛 {} market: {} (as of {})", status.market, status.status, at),
                    None => format!("🏛 {} market: {}", status.market, status.status),
                },
                Err(e) => {
                    warn!("status error: {}", e);
                    format!("⚠️ {}", e.user_message())
                }
            };
            Outcome::Continue(Some(msg))
        }
        Command::Help => Outcome::Continue(Some(HELP.to_string())),
        Command::Quit => Outcome::Quit,
    }
}
