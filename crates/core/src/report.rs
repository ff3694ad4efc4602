//! Text and JSON rendering of collision reports

use crate::collision::{CollisionReport, CollisionStats};
use crate::Result;
use serde_json::{json, Value};
use std::io::{self, Write};

/// Placeholder printed when a ratio has no defined value
pub const NOT_AVAILABLE: &str = "N/A";

fn format_average(stats: &CollisionStats) -> String {
    stats
        .average_collision_size()
        .map(|avg| format!("{:.3}", avg))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Closing line of the verbose listing
pub fn totals_line(stats: &CollisionStats) -> String {
    format!(
        "Total of {} colliding data on {} unique messages ({:.1}%), concerning {} hashes on {} unique hashes ({:.1}%)",
        stats.colliding_data,
        stats.unique_data,
        stats.collision_rate(),
        stats.colliding_hashes,
        stats.unique_hashes,
        stats.colliding_hash_rate(),
    )
}

/// Condensed one-line summary: collision rate, colliding hashes, average collision size
pub fn summary_line(stats: &CollisionStats) -> String {
    format!(
        "{:.3}%\t{}\t{}",
        stats.collision_rate(),
        stats.colliding_hashes,
        format_average(stats)
    )
}

/// Write every colliding hash with its data values, then the totals line
pub fn write_verbose<W: Write>(out: &mut W, report: &CollisionReport) -> io::Result<()> {
    for group in &report.groups {
        writeln!(out, "Collision with {}", group.hash)?;
        for data in &group.data {
            writeln!(out, "     {}", data)?;
        }
    }
    writeln!(out, "{}", totals_line(&report.stats))
}

/// Write the condensed summary line
pub fn write_summary<W: Write>(out: &mut W, report: &CollisionReport) -> io::Result<()> {
    writeln!(out, "{}", summary_line(&report.stats))
}

/// Write an aligned table with one summary row per labelled run
pub fn write_table<W: Write>(out: &mut W, rows: &[(String, CollisionStats)]) -> io::Result<()> {
    writeln!(
        out,
        "{:<10} {:>10} {:>15} {:>10} {:>12}",
        "algorithm", "messages", "collision rate", "hashes", "avg size"
    )?;
    for (label, stats) in rows {
        writeln!(
            out,
            "{:<10} {:>10} {:>14.3}% {:>10} {:>12}",
            label,
            stats.unique_data,
            stats.collision_rate(),
            stats.colliding_hashes,
            format_average(stats)
        )?;
    }
    Ok(())
}

/// JSON object with statistics and derived rates; groups are included when `verbose`
pub fn to_json(report: &CollisionReport, verbose: bool) -> Result<Value> {
    let stats = &report.stats;
    let mut value = json!({
        "stats": serde_json::to_value(stats)?,
        "collision_rate": stats.collision_rate(),
        "colliding_hash_rate": stats.colliding_hash_rate(),
        "average_collision_size": stats.average_collision_size(),
    });
    if verbose {
        value["groups"] = serde_json::to_value(&report.groups)?;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionCounter;

    fn report_for(records: &[(&str, &str)]) -> CollisionReport {
        let mut counter = CollisionCounter::new();
        counter.extend(records.iter().copied());
        counter.finish()
    }

    fn render_verbose(report: &CollisionReport) -> String {
        let mut out = Vec::new();
        write_verbose(&mut out, report).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_verbose_two_way_collision() {
        let report = report_for(&[("a", "h1"), ("b", "h1"), ("c", "h2")]);

        assert_eq!(
            render_verbose(&report),
            "Collision with h1\n     a\n     b\n\
             Total of 2 colliding data on 3 unique messages (66.7%), concerning 1 hashes on 2 unique hashes (50.0%)\n"
        );
    }

    #[test]
    fn test_verbose_three_way_collision() {
        let report = report_for(&[("a", "h1"), ("b", "h1"), ("c", "h1")]);
        let text = render_verbose(&report);

        assert!(text.starts_with("Collision with h1\n     a\n     b\n     c\n"));
        assert!(text.contains("Total of 3 colliding data on 3 unique messages (100.0%)"));
    }

    #[test]
    fn test_summary_line() {
        let report = report_for(&[("a", "h1"), ("b", "h1"), ("c", "h2")]);
        assert_eq!(summary_line(&report.stats), "66.667%\t1\t2.000");
    }

    #[test]
    fn test_summary_line_without_collisions() {
        let report = report_for(&[("a", "h1"), ("b", "h2")]);
        assert_eq!(summary_line(&report.stats), "0.000%\t0\tN/A");
    }

    #[test]
    fn test_empty_report_renders() {
        let report = report_for(&[]);

        assert_eq!(summary_line(&report.stats), "0.000%\t0\tN/A");
        assert_eq!(
            render_verbose(&report),
            "Total of 0 colliding data on 0 unique messages (0.0%), concerning 0 hashes on 0 unique hashes (0.0%)\n"
        );
    }

    #[test]
    fn test_table_rows() {
        let rows = vec![
            ("adler32".to_string(), report_for(&[("a", "1"), ("b", "1")]).stats),
            ("crc32".to_string(), report_for(&[("a", "1"), ("b", "2")]).stats),
        ];
        let mut out = Vec::new();
        write_table(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("algorithm"));
        assert!(lines[1].starts_with("adler32"));
        assert!(lines[1].contains("100.000%"));
        assert!(lines[2].ends_with("N/A"));
    }

    #[test]
    fn test_json_output() {
        let report = report_for(&[("a", "h1"), ("b", "h1"), ("c", "h2")]);

        let summary = to_json(&report, false).unwrap();
        assert_eq!(summary["stats"]["unique_data"], 3);
        assert_eq!(summary["average_collision_size"], 2.0);
        assert!(summary.get("groups").is_none());

        let verbose = to_json(&report, true).unwrap();
        assert_eq!(verbose["groups"][0]["hash"], "h1");
        assert_eq!(verbose["groups"][0]["data"][1], "b");
    }

    #[test]
    fn test_json_without_collisions_has_null_average() {
        let report = report_for(&[("a", "h1")]);
        let value = to_json(&report, false).unwrap();
        assert!(value["average_collision_size"].is_null());
    }
}
