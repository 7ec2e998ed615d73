//! Report output: CSV rows and an HTML page with the Net vs EV chart.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::ev::EvRow;
use crate::session::{CumulativePoint, SessionReport};

/// CSV column names, in row order.
pub const CSV_HEADER: &str = "hand_id,date,hero,equity,eligible_pot,hero_invested,ev_contrib,hero_net";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const CHART_WIDTH: f64 = 960.0;
const CHART_HEIGHT: f64 = 400.0;
const CHART_PAD: f64 = 40.0;

/// Export EV rows to CSV format.
///
/// Writes nothing (and creates no file) when `rows` is empty; returns
/// whether a file was written.
pub fn export_csv<P: AsRef<Path>>(rows: &[EvRow], path: P) -> Result<bool> {
    if rows.is_empty() {
        return Ok(false);
    }
    let mut file = File::create(path)?;

    writeln!(file, "{}", CSV_HEADER)?;
    for row in rows {
        writeln!(
            file,
            "{},{},{},{:.6},{:.4},{:.4},{:.4},{:.4}",
            csv_field(&row.hand_id),
            row.date.format(DATE_FORMAT),
            csv_field(&row.hero),
            row.equity,
            row.eligible_pot,
            row.hero_invested,
            row.ev_contribution,
            row.hero_net
        )?;
    }

    Ok(true)
}

fn csv_field(s: &str) -> String {
    if s.contains(&[',', '"', '\n'][..]) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Write the HTML page for `report` to `path`.
pub fn save_html<P: AsRef<Path>>(report: &SessionReport, path: P) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(generate_html(report).as_bytes())?;
    Ok(())
}

/// Generate a self-contained HTML page with cumulative Net and EV lines.
pub fn generate_html(report: &SessionReport) -> String {
    let mut html = String::from(r#"<!DOCTYPE html>
<html>
<head>
    <title>All-in Adjusted EV</title>
    <style>
        body { font-family: 'Segoe UI', Arial, sans-serif; background: #1a1a2e; color: #eee; padding: 20px; }
        .container { max-width: 1040px; margin: 0 auto; }
        h1 { text-align: center; color: #fff; }
        .metadata { text-align: center; color: #888; margin-bottom: 20px; }
        .chart { background: #252540; padding: 20px; border-radius: 10px; }
        .legend { display: flex; gap: 20px; margin-bottom: 15px; }
        .legend-item { display: flex; align-items: center; gap: 8px; }
        .legend-color { width: 20px; height: 4px; }
        .axis { stroke: #555; stroke-width: 1; }
        .net { fill: none; stroke: #3498db; stroke-width: 2; }
        .ev { fill: none; stroke: #2ecc71; stroke-width: 2; }
        .empty { text-align: center; color: #888; }
    </style>
</head>
<body>
<div class="container">
    <h1>All-in Adjusted EV</h1>
    <div class="metadata">
"#);

    let totals = &report.totals;
    html.push_str(&format!(
        "{} hands | Net: {:.2} | EV: {:.2} | Diff: {:.2} | {} skipped | {} failed",
        report.rows.len(),
        totals.net_total,
        totals.ev_total,
        totals.diff,
        report.skipped,
        report.failures.len()
    ));
    html.push_str("</div>\n");

    let points = report.cumulative();
    if points.is_empty() {
        html.push_str("    <p class=\"empty\">No qualifying all-in hands.</p>\n");
    } else {
        html.push_str(r#"    <div class="chart">
        <div class="legend">
            <div class="legend-item"><div class="legend-color" style="background: #3498db;"></div>Net</div>
            <div class="legend-item"><div class="legend-color" style="background: #2ecc71;"></div>EV</div>
        </div>
"#);
        html.push_str(&svg_chart(&points));
        html.push_str("    </div>\n");
    }

    html.push_str("</div>\n</body>\n</html>");
    html
}

fn svg_chart(points: &[CumulativePoint]) -> String {
    // The zero line is always in range.
    let (lo, hi) = points.iter().fold((0.0f64, 0.0f64), |(lo, hi), p| {
        (lo.min(p.net).min(p.ev), hi.max(p.net).max(p.ev))
    });
    let span = if hi > lo { hi - lo } else { 1.0 };
    let steps = (points.len().max(2) - 1) as f64;

    let x = |index: usize| CHART_PAD + (index - 1) as f64 / steps * (CHART_WIDTH - 2.0 * CHART_PAD);
    let y = |value: f64| CHART_HEIGHT - CHART_PAD - (value - lo) / span * (CHART_HEIGHT - 2.0 * CHART_PAD);
    let line = |value: fn(&CumulativePoint) -> f64| {
        points
            .iter()
            .map(|p| format!("{:.1},{:.1}", x(p.index), y(value(p))))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut svg = format!(
        "        <svg viewBox=\"0 0 {w} {h}\" width=\"100%\">\n            <line class=\"axis\" x1=\"{pad}\" y1=\"{zero:.1}\" x2=\"{right}\" y2=\"{zero:.1}\"/>\n",
        w = CHART_WIDTH,
        h = CHART_HEIGHT,
        pad = CHART_PAD,
        right = CHART_WIDTH - CHART_PAD,
        zero = y(0.0)
    );
    svg.push_str(&format!(
        "            <polyline class=\"net\" points=\"{}\"/>\n",
        line(|p| p.net)
    ));
    svg.push_str(&format!(
        "            <polyline class=\"ev\" points=\"{}\"/>\n",
        line(|p| p.ev)
    ));
    svg.push_str("        </svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionConfig, SessionTotals};
    use chrono::NaiveDate;
    use std::fs;

    fn row(id: &str, net: f64, ev: f64) -> EvRow {
        EvRow {
            hand_id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(20, 30, 0)
                .unwrap(),
            hero: "Hero".to_string(),
            equity: 0.6,
            eligible_pot: 95.0,
            hero_invested: 47.5,
            ev_contribution: ev,
            hero_net: net,
        }
    }

    fn report(rows: Vec<EvRow>) -> SessionReport {
        SessionReport {
            config: SessionConfig::default(),
            totals: SessionTotals::from_rows(&rows),
            rows,
            skipped: 1,
            failures: Vec::new(),
        }
    }

    #[test]
    fn test_export_csv() {
        let path = std::env::temp_dir().join(format!("allin_ev_csv_{}.csv", std::process::id()));
        let rows = vec![row("1", 10.0, 9.5), row("2", -20.0, -5.0)];
        assert!(export_csv(&rows, &path).unwrap());

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "1,2024-01-15 20:30:00,Hero,0.600000,95.0000,47.5000,9.5000,10.0000"
        );
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_export_csv_empty_writes_nothing() {
        let path = std::env::temp_dir().join(format!("allin_ev_empty_{}.csv", std::process::id()));
        assert!(!export_csv(&[], &path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Hero"), "Hero");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_html_contains_both_series() {
        let html = generate_html(&report(vec![row("1", 10.0, 9.5), row("2", -20.0, -5.0)]));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<polyline class=\"net\""));
        assert!(html.contains("<polyline class=\"ev\""));
        assert!(html.contains("Net: -10.00 | EV: 4.50 | Diff: 14.50"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_html_without_rows() {
        let html = generate_html(&report(Vec::new()));
        assert!(html.contains("No qualifying all-in hands."));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn test_single_point_chart() {
        let svg = svg_chart(&report(vec![row("1", 5.0, 2.0)]).cumulative());
        assert!(svg.contains("points=\"40.0,"));
        assert!(!svg.contains("NaN"));
    }
}
