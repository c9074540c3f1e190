use crate::models::{
    ChartPoint, DailyLogEntry, DerivedMonthView, LogStatus, MonthChart, MonthKey, PieSlice,
    StatusCounts,
};
use crate::month::{entries_for_month, select_month};
use tracing::debug;

const PIE_ORDER: [(LogStatus, &str); 3] = [
    (LogStatus::Done, "Completed"),
    (LogStatus::Skipped, "Skipped"),
    (LogStatus::Pending, "Pending"),
];

pub fn status_counts(entries: &[DailyLogEntry]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for entry in entries {
        counts.record(entry.status);
    }
    counts
}

/// Running count of consecutive DONE days; any other status resets it to 0.
pub fn streak_run(entries: &[DailyLogEntry]) -> Vec<u32> {
    let mut current = 0u32;
    entries
        .iter()
        .map(|entry| {
            current = if entry.status == LogStatus::Done {
                current.saturating_add(1)
            } else {
                0
            };
            current
        })
        .collect()
}

pub fn derive_month_view(history: &[DailyLogEntry], month: MonthKey) -> DerivedMonthView {
    let sorted_entries = entries_for_month(history, month);
    let status_counts = status_counts(&sorted_entries);
    let streak_run = streak_run(&sorted_entries);
    debug!(%month, entries = sorted_entries.len(), "derived month view");

    DerivedMonthView {
        sorted_entries,
        status_counts,
        streak_run,
    }
}

/// Chart data for `month`, or for the most recent month when none is given.
/// An empty history produces an empty chart.
pub fn build_month_chart(history: &[DailyLogEntry], month: Option<MonthKey>) -> MonthChart {
    let Some(month) = select_month(history, month) else {
        return MonthChart::default();
    };

    let view = derive_month_view(history, month);
    let points = view
        .sorted_entries
        .iter()
        .zip(&view.streak_run)
        .map(|(entry, &streak)| ChartPoint {
            day_of_month: entry.day_of_month(),
            date: entry.date,
            status: entry.status,
            value: entry.status.chart_value(),
            streak,
        })
        .collect();

    MonthChart {
        month: Some(month),
        label: Some(month_label(month)),
        pie: pie_slices(&view.status_counts),
        ticks: axis_ticks(month.days_in_month()),
        completion_rate: completion_rate(&view.status_counts),
        points,
        view,
    }
}

pub fn pie_slices(counts: &StatusCounts) -> Vec<PieSlice> {
    let total = counts.total();
    PIE_ORDER
        .iter()
        .map(|&(status, name)| {
            let value = counts.get(status);
            PieSlice {
                name,
                value,
                total,
                percent: percent(value, total),
            }
        })
        .filter(|slice| slice.value > 0)
        .collect()
}

/// Day-of-month ticks: the first and last day plus every 5th day (every 3rd
/// for months of 20 days or fewer).
pub fn axis_ticks(month_length: u32) -> Vec<u32> {
    let step = if month_length > 20 { 5 } else { 3 };
    (1..=month_length)
        .filter(|&day| day % step == 0 || day == 1 || day == month_length)
        .collect()
}

pub fn month_label(month: MonthKey) -> String {
    month.first_day().format("%B %Y").to_string()
}

pub fn completion_rate(counts: &StatusCounts) -> f64 {
    percent(counts.done, counts.total())
}

fn percent(value: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(value) / f64::from(total) * 100.0
    }
}
