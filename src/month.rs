use crate::errors::ProgressError;
use crate::models::{DailyLogEntry, MonthKey, MonthPartition, RawLogEntry};
use std::collections::BTreeSet;
use tracing::debug;

/// Validates a decoded backend history. The first bad entry aborts the parse.
pub fn parse_history(raw: &[RawLogEntry]) -> Result<Vec<DailyLogEntry>, ProgressError> {
    raw.iter().map(DailyLogEntry::try_from).collect()
}

/// Distinct months present in `history`, most recent first.
pub fn partition_by_month(history: &[DailyLogEntry]) -> MonthPartition {
    let months: BTreeSet<MonthKey> = history.iter().map(DailyLogEntry::month_key).collect();
    let available_months: Vec<MonthKey> = months.into_iter().rev().collect();
    debug!(months = available_months.len(), entries = history.len(), "partitioned history");

    MonthPartition {
        default_month: available_months.first().copied(),
        available_months,
    }
}

/// Entries of `month`, ordered by day of month. Duplicate days keep their
/// input order.
pub fn entries_for_month(history: &[DailyLogEntry], month: MonthKey) -> Vec<DailyLogEntry> {
    let mut entries: Vec<DailyLogEntry> = history
        .iter()
        .filter(|entry| month.contains(entry.date))
        .copied()
        .collect();
    entries.sort_by_key(DailyLogEntry::day_of_month);
    entries
}

/// Resolves the month to display: the requested one, or the most recent.
pub fn select_month(history: &[DailyLogEntry], requested: Option<MonthKey>) -> Option<MonthKey> {
    requested.or_else(|| partition_by_month(history).default_month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogStatus;
    use chrono::NaiveDate;

    fn entry(y: i32, m: u32, d: u32, status: LogStatus) -> DailyLogEntry {
        DailyLogEntry::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), status)
    }

    #[test]
    fn empty_history_has_no_months() {
        let partition = partition_by_month(&[]);
        assert!(partition.available_months.is_empty());
        assert_eq!(partition.default_month, None);
        assert_eq!(select_month(&[], None), None);
    }

    #[test]
    fn months_sorted_most_recent_first_across_years() {
        let history = vec![
            entry(2024, 1, 5, LogStatus::Done),
            entry(2023, 12, 31, LogStatus::Skipped),
            entry(2024, 2, 1, LogStatus::Pending),
            entry(2024, 1, 1, LogStatus::Done),
        ];
        let partition = partition_by_month(&history);
        let labels: Vec<String> = partition
            .available_months
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, vec!["2024-02", "2024-01", "2023-12"]);
        assert_eq!(partition.default_month, Some(MonthKey::new(2024, 2).unwrap()));
    }

    #[test]
    fn month_entries_sorted_by_day_and_keep_duplicates() {
        let history = vec![
            entry(2024, 1, 9, LogStatus::Done),
            entry(2024, 2, 1, LogStatus::Done),
            entry(2024, 1, 3, LogStatus::Skipped),
            entry(2024, 1, 9, LogStatus::Pending),
            entry(2023, 1, 4, LogStatus::Done),
        ];
        let january = MonthKey::new(2024, 1).unwrap();
        let entries = entries_for_month(&history, january);

        let days: Vec<u32> = entries.iter().map(DailyLogEntry::day_of_month).collect();
        assert_eq!(days, vec![3, 9, 9]);
        assert_eq!(entries[1].status, LogStatus::Done);
        assert_eq!(entries[2].status, LogStatus::Pending);
    }

    #[test]
    fn missing_month_yields_empty_entries() {
        let history = vec![entry(2024, 1, 9, LogStatus::Done)];
        let march = MonthKey::new(2024, 3).unwrap();
        assert!(entries_for_month(&history, march).is_empty());
    }

    #[test]
    fn parse_history_reports_first_invalid_entry() {
        let raw = vec![
            RawLogEntry { date: "2024-01-01".into(), status: "DONE".into() },
            RawLogEntry { date: "01/02/2024".into(), status: "DONE".into() },
            RawLogEntry { date: "2024-01-03".into(), status: "LATE".into() },
        ];
        assert_eq!(
            parse_history(&raw),
            Err(ProgressError::InvalidDate("01/02/2024".into()))
        );
        assert_eq!(
            parse_history(&raw[2..]),
            Err(ProgressError::InvalidStatus("LATE".into()))
        );
        assert_eq!(parse_history(&raw[..1]).unwrap().len(), 1);
    }
}
