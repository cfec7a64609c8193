//! Signal derivation from indicator values.
//!
//! Rules run in a fixed order (VWAP, volume, RSI, SMA). Each rule that
//! fires adds one reasoning line and adjusts an integer confidence score.
//! The final score maps to BUY (>= 2), SELL (<= -2) or HOLD.

use serde::Serialize;
use std::fmt;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const HIGH_VOLUME_MULTIPLIER: f64 = 1.5;
pub const BUY_THRESHOLD: i32 = 2;
pub const SELL_THRESHOLD: i32 = -2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn from_confidence(confidence: i32) -> Self {
        if confidence >= BUY_THRESHOLD {
            Signal::Buy
        } else if confidence <= SELL_THRESHOLD {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

/// Values the rules read. `vwap` may be NaN and `sma` may be absent;
/// the rule depending on either is skipped in that case.
#[derive(Debug, Clone, Copy)]
pub struct SignalInputs {
    pub current_price: f64,
    pub vwap: f64,
    pub current_volume: f64,
    pub avg_volume: f64,
    pub rsi: f64,
    pub sma: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub confidence: i32,
    pub reasoning: Vec<String>,
}

type Rule = fn(&SignalInputs) -> Option<(i32, &'static str)>;

const RULES: [Rule; 4] = [vwap_rule, volume_rule, rsi_rule, sma_rule];

pub fn evaluate(inputs: &SignalInputs) -> Evaluation {
    let mut confidence = 0;
    let mut reasoning = Vec::new();

    for rule in RULES {
        if let Some((delta, reason)) = rule(inputs) {
            confidence += delta;
            reasoning.push(reason.to_string());
        }
    }

    Evaluation {
        confidence,
        reasoning,
    }
}

fn vwap_rule(inputs: &SignalInputs) -> Option<(i32, &'static str)> {
    if !inputs.vwap.is_finite() {
        return None;
    }
    if inputs.current_price > inputs.vwap {
        Some((1, "Price is trading above VWAP"))
    } else {
        Some((-1, "Price is trading below VWAP"))
    }
}

fn volume_rule(inputs: &SignalInputs) -> Option<(i32, &'static str)> {
    if inputs.current_volume > inputs.avg_volume * HIGH_VOLUME_MULTIPLIER {
        Some((1, "Unusually high volume detected"))
    } else {
        None
    }
}

fn rsi_rule(inputs: &SignalInputs) -> Option<(i32, &'static str)> {
    if inputs.rsi > RSI_OVERBOUGHT {
        Some((-2, "RSI indicates overbought conditions"))
    } else if inputs.rsi < RSI_OVERSOLD {
        Some((2, "RSI indicates oversold conditions"))
    } else {
        None
    }
}

fn sma_rule(inputs: &SignalInputs) -> Option<(i32, &'static str)> {
    let sma = inputs.sma?;
    if inputs.current_price > sma {
        Some((1, "Price is above 20-period moving average"))
    } else {
        Some((-1, "Price is below 20-period moving average"))
    }
}
