//! HTML templates using Askama.

use askama::Template;

use crate::adapters::text_report::format_value;
use crate::domain::analysis::AnalysisResult;
use crate::domain::indicator::{IndicatorType, RSI_PERIOD, SMA_PERIOD};
use crate::domain::monitor::MonitorSnapshot;
use crate::domain::signal::Signal;

use super::chart_svg::price_chart_svg;

#[derive(Template)]
#[template(path = "base.html")]
pub struct BasePage<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

pub struct IndicatorRow {
    pub label: String,
    pub value: String,
}

pub struct ResultView {
    pub signal: Signal,
    pub signal_class: &'static str,
    pub confidence: i32,
    pub current_price: String,
    pub indicators: Vec<IndicatorRow>,
    pub reasoning: Vec<String>,
}

impl ResultView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let signal_class = match result.signal {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
        };
        let indicators = vec![
            IndicatorRow {
                label: IndicatorType::Vwap.to_string(),
                value: format_value(result.indicators.vwap),
            },
            IndicatorRow {
                label: IndicatorType::Sma(SMA_PERIOD).to_string(),
                value: result
                    .indicators
                    .sma20
                    .map_or_else(|| "n/a".to_string(), format_value),
            },
            IndicatorRow {
                label: IndicatorType::Rsi(RSI_PERIOD).to_string(),
                value: format_value(result.indicators.rsi),
            },
        ];

        Self {
            signal: result.signal,
            signal_class,
            confidence: result.indicators.confidence,
            current_price: format_value(result.current_price),
            indicators,
            reasoning: result.reasoning.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "panel.html")]
pub struct PanelTemplate {
    pub symbol: String,
    pub view: Option<ResultView>,
    pub last_error: Option<String>,
    pub updated_at: String,
    pub bar_count: usize,
    pub chart_svg: String,
}

impl PanelTemplate {
    pub fn from_snapshot(snapshot: &MonitorSnapshot) -> Self {
        Self {
            symbol: snapshot.symbol.clone(),
            view: snapshot.result.as_ref().map(ResultView::from_result),
            last_error: snapshot.last_error.clone(),
            updated_at: snapshot
                .updated_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "never".to_string()),
            bar_count: snapshot.bars.len(),
            chart_svg: price_chart_svg(&snapshot.bars),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}
