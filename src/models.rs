use crate::errors::ProgressError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CHALLENGE_LENGTH: u32 = 21;
pub const MAX_CHALLENGE_LENGTH: u32 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogStatus {
    Done,
    Pending,
    Skipped,
}

impl LogStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LogStatus::Done => "DONE",
            LogStatus::Pending => "PENDING",
            LogStatus::Skipped => "SKIPPED",
        }
    }

    /// Plot value used by the line and bar charts.
    pub fn chart_value(self) -> f64 {
        match self {
            LogStatus::Done => 1.0,
            LogStatus::Pending => 0.5,
            LogStatus::Skipped => 0.0,
        }
    }
}

impl FromStr for LogStatus {
    type Err = ProgressError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "DONE" => Ok(LogStatus::Done),
            "PENDING" => Ok(LogStatus::Pending),
            "SKIPPED" => Ok(LogStatus::Skipped),
            other => Err(ProgressError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A history entry as decoded from the backend, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLogEntry {
    pub date: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLogEntry {
    pub date: NaiveDate,
    pub status: LogStatus,
}

impl DailyLogEntry {
    pub fn new(date: NaiveDate, status: LogStatus) -> Self {
        Self { date, status }
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }
}

impl TryFrom<&RawLogEntry> for DailyLogEntry {
    type Error = ProgressError;

    fn try_from(raw: &RawLogEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_calendar_date(&raw.date)?,
            status: raw.status.parse()?,
        })
    }
}

/// Parses `YYYY-MM-DD`. A full RFC 3339 or offset-less ISO date-time is
/// accepted as the calendar date it names.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, ProgressError> {
    let parsed = if value.contains('T') {
        DateTime::parse_from_rfc3339(value)
            .map(|datetime| datetime.date_naive())
            .or_else(|_| {
                NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|datetime| datetime.date())
            })
    } else {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
    };
    parsed.map_err(|_| ProgressError::InvalidDate(value.to_string()))
}

/// A calendar month. Orders by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, ProgressError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ProgressError::InvalidDate(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        // Only December of the last representable year has no successor.
        first
            .checked_add_months(chrono::Months::new(1))
            .map_or(31, |next| (next - first).num_days() as u32)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ProgressError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ProgressError::InvalidDate(value.to_string());
        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        MonthKey::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeConfig {
    pub challenge_length: u32,
}

impl ChallengeConfig {
    pub fn new(challenge_length: i64) -> Result<Self, ProgressError> {
        if !(1..=i64::from(MAX_CHALLENGE_LENGTH)).contains(&challenge_length) {
            return Err(ProgressError::InvalidConfig(challenge_length.to_string()));
        }
        Ok(Self {
            challenge_length: challenge_length as u32,
        })
    }
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            challenge_length: DEFAULT_CHALLENGE_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    #[serde(rename = "DONE")]
    pub done: u32,
    #[serde(rename = "PENDING")]
    pub pending: u32,
    #[serde(rename = "SKIPPED")]
    pub skipped: u32,
}

impl StatusCounts {
    pub fn record(&mut self, status: LogStatus) {
        let slot = match status {
            LogStatus::Done => &mut self.done,
            LogStatus::Pending => &mut self.pending,
            LogStatus::Skipped => &mut self.skipped,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn get(&self, status: LogStatus) -> u32 {
        match status {
            LogStatus::Done => self.done,
            LogStatus::Pending => self.pending,
            LogStatus::Skipped => self.skipped,
        }
    }

    pub fn total(&self) -> u32 {
        self.done
            .saturating_add(self.pending)
            .saturating_add(self.skipped)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMonthView {
    pub sorted_entries: Vec<DailyLogEntry>,
    pub status_counts: StatusCounts,
    pub streak_run: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthPartition {
    pub available_months: Vec<MonthKey>,
    pub default_month: Option<MonthKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeCycle {
    pub visual_bars: u32,
    pub completed_cycles: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MotivationTier {
    Completed,
    OnFire,
    Momentum,
    Growing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeProgress {
    pub visual_bars: u32,
    pub completed_cycles: u32,
    pub challenge_length: u32,
    pub completed: bool,
    pub milestone_reached: bool,
    pub motivation: MotivationTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub day_of_month: u32,
    pub date: NaiveDate,
    pub status: LogStatus,
    pub value: f64,
    pub streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: &'static str,
    pub value: u32,
    pub total: u32,
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthChart {
    pub month: Option<MonthKey>,
    pub label: Option<String>,
    pub view: DerivedMonthView,
    pub points: Vec<ChartPoint>,
    pub pie: Vec<PieSlice>,
    pub ticks: Vec<u32>,
    pub completion_rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct HistoryRequest {
    pub history: Vec<RawLogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct MonthViewRequest {
    pub history: Vec<RawLogEntry>,
    #[serde(default)]
    pub month: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeQuery {
    pub streak: u32,
    pub length: Option<i64>,
    #[serde(default)]
    pub completed_today: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_rejects_unknown_and_lowercase() {
        assert_eq!("SKIPPED".parse::<LogStatus>(), Ok(LogStatus::Skipped));
        assert_eq!(
            "done".parse::<LogStatus>(),
            Err(ProgressError::InvalidStatus("done".into()))
        );
        assert!("MISSED".parse::<LogStatus>().is_err());
    }

    #[test]
    fn calendar_date_accepts_datetime_prefix() {
        let date = parse_calendar_date("2024-03-09T08:15:00Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert!(matches!(
            parse_calendar_date("2024-3-9"),
            Err(ProgressError::InvalidDate(_))
        ));
        assert!(parse_calendar_date("").is_err());
        assert!(parse_calendar_date("2024-02-30").is_err());
    }

    #[test]
    fn calendar_date_rejects_malformed_time_part() {
        let naive = parse_calendar_date("2024-03-09T23:59:59.250").unwrap();
        assert_eq!(naive, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        let offset = parse_calendar_date("2024-03-09T23:30:00-05:00").unwrap();
        assert_eq!(offset, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());

        for value in [
            "2024-01-01Tnot-a-time",
            "2024-01-01T",
            "2024-01-01T25:00:00",
            "2024-01-01 extra",
        ] {
            assert_eq!(
                parse_calendar_date(value),
                Err(ProgressError::InvalidDate(value.to_string()))
            );
        }
    }

    #[test]
    fn month_key_orders_by_year_then_month() {
        let dec: MonthKey = "2023-12".parse().unwrap();
        let jan: MonthKey = "2024-01".parse().unwrap();
        assert!(dec < jan);
        assert_eq!(jan.to_string(), "2024-01");
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("2024/01".parse::<MonthKey>().is_err());
    }

    #[test]
    fn month_key_days_in_month_handles_leap_years() {
        assert_eq!(MonthKey::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthKey::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthKey::new(2023, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn last_representable_december_has_31_days() {
        let last = MonthKey::new(NaiveDate::MAX.year(), 12).unwrap();
        assert_eq!(last.days_in_month(), 31);
    }

    #[test]
    fn status_counts_total_saturates_like_record() {
        let mut counts = StatusCounts {
            done: u32::MAX,
            pending: 1,
            skipped: 0,
        };
        assert_eq!(counts.total(), u32::MAX);
        counts.record(LogStatus::Done);
        assert_eq!(counts.done, u32::MAX);
    }

    #[test]
    fn challenge_config_bounds() {
        assert_eq!(ChallengeConfig::default().challenge_length, 21);
        assert_eq!(ChallengeConfig::new(30).unwrap().challenge_length, 30);
        assert_eq!(ChallengeConfig::new(0), Err(ProgressError::InvalidConfig("0".into())));
        assert!(ChallengeConfig::new(366).is_err());
    }

    #[test]
    fn status_counts_serialize_with_uppercase_keys() {
        let mut counts = StatusCounts::default();
        counts.record(LogStatus::Done);
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json, serde_json::json!({ "DONE": 1, "PENDING": 0, "SKIPPED": 0 }));
    }
}
