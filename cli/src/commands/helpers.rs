use anyhow::Result;
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use sugarlog_core::models::{Notification, Reading, Severity};

/// Exit status for a command that ended in a notice instead of output.
pub(crate) fn notice_exit_code(severity: Severity) -> Option<i32> {
    match severity {
        Severity::Info => None,
        Severity::Warning => Some(2),
        Severity::Error => Some(1),
    }
}

pub(crate) fn print_notification(n: &Notification) {
    let line = format!("{}: {}", n.title, n.message);
    match n.severity {
        Severity::Info => println!("{line}"),
        Severity::Warning | Severity::Error => eprintln!("{line}"),
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn format_level(level: f64) -> String {
    if level.fract() == 0.0 {
        format!("{level:.1}")
    } else {
        format!("{level}")
    }
}

pub(crate) fn reading_table(rows: &[Reading]) -> String {
    #[derive(Tabled)]
    struct ReadingRow {
        #[tabled(rename = "Date & Time")]
        timestamp: String,
        #[tabled(rename = "Blood Sugar Level (mg/dL)")]
        level: String,
    }

    let rows: Vec<ReadingRow> = rows
        .iter()
        .map(|r| ReadingRow {
            timestamp: r.timestamp.to_string(),
            level: format_level(r.level),
        })
        .collect();

    Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_exit_code() {
        assert_eq!(notice_exit_code(Severity::Info), None);
        assert_eq!(notice_exit_code(Severity::Warning), Some(2));
        assert_eq!(notice_exit_code(Severity::Error), Some(1));
    }

    #[test]
    fn test_format_level() {
        assert_eq!(format_level(110.0), "110.0");
        assert_eq!(format_level(95.5), "95.5");
    }

    #[test]
    fn test_reading_table() {
        let rows = vec![
            Reading {
                timestamp: "03-01-2024 08:00".parse().unwrap(),
                level: 95.0,
            },
            Reading {
                timestamp: "03-02-2024 07:30".parse().unwrap(),
                level: 88.5,
            },
        ];
        let table = reading_table(&rows);
        assert!(table.contains("Date & Time"));
        assert!(table.contains("Blood Sugar Level (mg/dL)"));
        let first = table.find("03-01-2024 08:00").unwrap();
        let second = table.find("03-02-2024 07:30").unwrap();
        assert!(first < second);
        assert!(table.contains("88.5"));
    }
}
