//! Closed sets of user choices: timeframe, highlighted indicator and setup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct SelectionError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Shared lookup for the enums below: accepts the slug or the display label,
/// case-insensitively.
fn parse_choice<T: Copy>(
    kind: &'static str,
    value: &str,
    all: &[T],
    slug: fn(&T) -> &'static str,
    label: fn(&T) -> &'static str,
) -> Result<T, SelectionError> {
    let wanted = value.trim();
    all.iter()
        .find(|item| slug(item).eq_ignore_ascii_case(wanted) || label(item).eq_ignore_ascii_case(wanted))
        .copied()
        .ok_or_else(|| SelectionError {
            kind,
            value: value.to_string(),
            expected: all.iter().map(slug).collect::<Vec<_>>().join(", "),
        })
}

/// Bar granularity requested from the market-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "2h")]
    Hour2,
    #[serde(rename = "3h")]
    Hour3,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "monthly")]
    Monthly,
}

impl Timeframe {
    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::Hour1,
            Timeframe::Hour2,
            Timeframe::Hour3,
            Timeframe::Hour4,
            Timeframe::Daily,
            Timeframe::Monthly,
        ]
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Timeframe::Hour1 => "1h",
            Timeframe::Hour2 => "2h",
            Timeframe::Hour3 => "3h",
            Timeframe::Hour4 => "4h",
            Timeframe::Daily => "daily",
            Timeframe::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Hour1 => "1H",
            Timeframe::Hour2 => "2H",
            Timeframe::Hour3 => "3H",
            Timeframe::Hour4 => "4H",
            Timeframe::Daily => "Daily",
            Timeframe::Monthly => "Monthly",
        }
    }

    /// Bar width in minutes for the intraday timeframes.
    pub fn minutes(&self) -> Option<u32> {
        match self {
            Timeframe::Hour1 => Some(60),
            Timeframe::Hour2 => Some(120),
            Timeframe::Hour3 => Some(180),
            Timeframe::Hour4 => Some(240),
            Timeframe::Daily | Timeframe::Monthly => None,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("timeframe", s, Self::all(), Self::slug, Self::label)
    }
}

/// Smoothed close series derived for every bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    /// 20-span exponential average.
    #[serde(rename = "ema20")]
    ShortEma,
    /// 30-bar simple average.
    #[serde(rename = "sma30")]
    MediumSma,
    /// 200-span exponential average.
    #[serde(rename = "ema200")]
    LongEma,
}

impl IndicatorKind {
    pub fn all() -> &'static [IndicatorKind] {
        &[
            IndicatorKind::ShortEma,
            IndicatorKind::MediumSma,
            IndicatorKind::LongEma,
        ]
    }

    pub fn slug(&self) -> &'static str {
        match self {
            IndicatorKind::ShortEma => "ema20",
            IndicatorKind::MediumSma => "sma30",
            IndicatorKind::LongEma => "ema200",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IndicatorKind::ShortEma => "20 EMA",
            IndicatorKind::MediumSma => "30 SMA",
            IndicatorKind::LongEma => "200 EMA",
        }
    }

    /// EMA span or SMA window length.
    pub fn period(&self) -> usize {
        match self {
            IndicatorKind::ShortEma => 20,
            IndicatorKind::MediumSma => 30,
            IndicatorKind::LongEma => 200,
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IndicatorKind {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("indicator", s, Self::all(), Self::slug, Self::label)
    }
}

/// Chart pattern a series is screened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Setup {
    #[serde(rename = "ema200-support")]
    Ema200Support,
    #[serde(rename = "sma30-support")]
    Sma30Support,
    #[serde(rename = "monthly-breakout")]
    MonthlyBreakout,
}

impl Setup {
    pub fn all() -> &'static [Setup] {
        &[Setup::Ema200Support, Setup::Sma30Support, Setup::MonthlyBreakout]
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Setup::Ema200Support => "ema200-support",
            Setup::Sma30Support => "sma30-support",
            Setup::MonthlyBreakout => "monthly-breakout",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Setup::Ema200Support => "200 EMA Support + Green Candle",
            Setup::Sma30Support => "30 SMA Support + Green Candle",
            Setup::MonthlyBreakout => "Monthly Breakout (Prev High)",
        }
    }

    /// Indicator column a support setup measures closes against.
    pub fn support_indicator(&self) -> Option<IndicatorKind> {
        match self {
            Setup::Ema200Support => Some(IndicatorKind::LongEma),
            Setup::Sma30Support => Some(IndicatorKind::MediumSma),
            Setup::MonthlyBreakout => None,
        }
    }
}

impl fmt::Display for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Setup {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("setup", s, Self::all(), Self::slug, Self::label)
    }
}

/// The three inputs of one screening run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub timeframe: Timeframe,
    pub indicator: IndicatorKind,
    pub setup: Setup,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::Hour1,
            indicator: IndicatorKind::ShortEma,
            setup: Setup::Ema200Support,
        }
    }
}
