//! Unit tests for the selection enums

use stockfinder::models::{IndicatorKind, Selection, Setup, Timeframe};

#[test]
fn test_parse_slugs_and_labels() {
    assert_eq!("daily".parse::<Timeframe>().unwrap(), Timeframe::Daily);
    assert_eq!("4H".parse::<Timeframe>().unwrap(), Timeframe::Hour4);
    assert_eq!("200 ema".parse::<IndicatorKind>().unwrap(), IndicatorKind::LongEma);
    assert_eq!("sma30".parse::<IndicatorKind>().unwrap(), IndicatorKind::MediumSma);
    assert_eq!(
        "Monthly Breakout (Prev High)".parse::<Setup>().unwrap(),
        Setup::MonthlyBreakout
    );
    assert_eq!(" ema200-support ".parse::<Setup>().unwrap(), Setup::Ema200Support);
}

#[test]
fn test_parse_unknown_value() {
    let err = "weekly".parse::<Timeframe>().unwrap_err();
    assert_eq!(err.kind, "timeframe");
    assert!(err.to_string().contains("1h, 2h, 3h, 4h, daily, monthly"));
}

#[test]
fn test_setup_indicator_mapping() {
    assert_eq!(Setup::Ema200Support.support_indicator(), Some(IndicatorKind::LongEma));
    assert_eq!(Setup::Sma30Support.support_indicator(), Some(IndicatorKind::MediumSma));
    assert_eq!(Setup::MonthlyBreakout.support_indicator(), None);
}

#[test]
fn test_indicator_periods() {
    assert_eq!(IndicatorKind::ShortEma.period(), 20);
    assert_eq!(IndicatorKind::MediumSma.period(), 30);
    assert_eq!(IndicatorKind::LongEma.period(), 200);
}

#[test]
fn test_serde_uses_slugs() {
    assert_eq!(serde_json::to_string(&Setup::Sma30Support).unwrap(), "\"sma30-support\"");
    assert_eq!(serde_json::to_string(&Timeframe::Hour2).unwrap(), "\"2h\"");
    let kind: IndicatorKind = serde_json::from_str("\"ema20\"").unwrap();
    assert_eq!(kind, IndicatorKind::ShortEma);
}

#[test]
fn test_intraday_minutes() {
    assert_eq!(Timeframe::Hour3.minutes(), Some(180));
    assert_eq!(Timeframe::Monthly.minutes(), None);
}

#[test]
fn test_default_selection() {
    let selection = Selection::default();
    assert_eq!(selection.timeframe, Timeframe::Hour1);
    assert_eq!(selection.indicator, IndicatorKind::ShortEma);
    assert_eq!(selection.setup, Setup::Ema200Support);
}
