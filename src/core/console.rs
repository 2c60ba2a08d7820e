//! Plain-text scan report for the CLI

use crate::models::ScanReport;

/// Render `report` the way the CLI prints it: fetch errors first, then the
/// selection header and one line per match.
pub fn render_report(report: &ScanReport) -> String {
    let mut lines: Vec<String> = report
        .fetch_errors()
        .map(|(symbol, message)| format!("Error fetching data for {}: {}", symbol, message))
        .collect();

    let indicator = report.selection.indicator;
    lines.push(format!(
        "Setup: {} | Timeframe: {} | Indicator: {}",
        report.selection.setup, report.selection.timeframe, indicator
    ));

    if report.matches.is_empty() {
        lines.push("No matching stocks found with the selected criteria.".to_string());
        return lines.join("\n");
    }

    lines.push(format!("Found {} matching stock(s):", report.matches.len()));
    for payload in report.chart_payloads() {
        let Some(last) = payload.bars.last() else {
            continue;
        };
        let highlight = payload
            .latest_highlight()
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "n/a".to_string());
        let trigger = payload
            .trigger_index
            .and_then(|i| payload.bars.get(i))
            .map(|b| b.timestamp.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "  {:<14} close {:>10.2}  {} {:>10}  triggered {}",
            payload.symbol, last.close, indicator, highlight, trigger
        ));
    }

    lines.join("\n")
}
