// Chart panel: describes the price/volume/RSI chart and draws it as terminal sparklines.
use crate::classifier::supported_timeframes;
use crate::model::{ChartData, MarketCode, TimeFrame};
use serde::Serialize;
use tracing::warn;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Left,
    Right,
    /// Fixed 0-100 oscillator scale.
    Oscillator,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub kind: SeriesKind,
    pub axis: Axis,
}

/// Toolkit-neutral chart description: shared x labels plus one dataset per series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

pub fn build_chart_spec(chart: &ChartData) -> ChartSpec {
    let len = chart.usable_len();
    if !chart.is_consistent() {
        warn!(
            "Chart series lengths differ (dates={}, prices={}, volumes={}, rsi={}), truncating to {}",
            chart.dates.len(),
            chart.prices.len(),
            chart.volumes.len(),
            chart.rsi.len(),
            len
        );
    }
    let mut datasets = vec![
        Dataset {
            label: "Price".to_string(),
            data: chart.prices[..len].to_vec(),
            kind: SeriesKind::Line,
            axis: Axis::Left,
        },
        Dataset {
            label: "Volume".to_string(),
            data: chart.volumes[..len].to_vec(),
            kind: SeriesKind::Bar,
            axis: Axis::Right,
        },
    ];
    if !chart.rsi.is_empty() {
        datasets.push(Dataset {
            label: "RSI".to_string(),
            data: chart.rsi.iter().take(len).copied().collect(),
            kind: SeriesKind::Line,
            axis: Axis::Oscillator,
        });
    }

    let title = match chart.timeframe {
        Some(tf) => format!("Price & Volume ({})", tf.display_name()),
        None => "Price & Volume".to_string(),
    };

    ChartSpec {
        title,
        labels: chart.dates[..len].to_vec(),
        datasets,
    }
}

/// Averages `values` into at most `width` buckets and maps each onto a block glyph.
pub fn sparkline(values: &[f64], width: usize, range: Option<(f64, f64)>) -> String {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || width == 0 {
        return String::new();
    }

    let buckets = finite.len().min(width);
    let points: Vec<f64> = (0..buckets)
        .map(|i| {
            let start = i * finite.len() / buckets;
            let end = ((i + 1) * finite.len() / buckets).max(start + 1);
            let slice = &finite[start..end];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect();

    let (min, max) = range.unwrap_or_else(|| {
        points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    });
    let span = max - min;
    let top = (SPARK_LEVELS.len() - 1) as f64;

    points
        .iter()
        .map(|&v| {
            if span <= 0.0 {
                return SPARK_LEVELS[SPARK_LEVELS.len() / 2];
            }
            let level = ((v - min) / span * top).round().clamp(0.0, top);
            SPARK_LEVELS[level as usize]
        })
        .collect()
}

pub fn render_chart(spec: &ChartSpec, width: usize) -> String {
    let mut out = format!("── {} ──", spec.title);
    if spec.labels.is_empty() {
        out.push_str("\n(no chart data)");
        return out;
    }

    for dataset in &spec.datasets {
        let range = match dataset.axis {
            Axis::Oscillator => Some((0.0, 100.0)),
            Axis::Left | Axis::Right => None,
        };
        let (lo, hi) = dataset
            .data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        out.push_str(&format!(
            "\n{:<7}{} [{:.2} .. {:.2}]",
            dataset.label,
            sparkline(&dataset.data, width, range),
            lo,
            hi
        ));
    }

    if let (Some(first), Some(last)) = (spec.labels.first(), spec.labels.last()) {
        out.push_str(&format!("\n{:<7}{} → {}", "", first, last));
    }
    out
}

/// Toggle group for the timeframes `market` supports, current one bracketed.
pub fn render_timeframe_toggles(market: MarketCode, current: TimeFrame) -> String {
    supported_timeframes(market)
        .iter()
        .map(|tf| {
            if *tf == current {
                format!("[{}]", tf)
            } else {
                tf.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
