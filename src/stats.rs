//! Derived dashboard views over the full log history.
//!
//! Everything here is a pure function of a slice of logs; nothing is
//! persisted. Functions that depend on "today" take it as an argument.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::day::DayKey;
use crate::models::activity::{Activity, ActivityFlags};
use crate::models::activity_log::ActivityLog;

const WEEK_LEN: usize = 7;

/// What has to be true of a day for it to extend a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTarget {
    /// All five activities done.
    Combined,
    Activity(Activity),
}

impl StreakTarget {
    pub fn holds(self, flags: &ActivityFlags) -> bool {
        match self {
            StreakTarget::Combined => flags.is_complete(),
            StreakTarget::Activity(activity) => flags.get(activity),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub key: Activity,
    pub label: &'static str,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Days the activity was done.
    pub count: usize,
    /// Percentage of logged days the activity was done.
    pub completion_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_logs: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub success_rate: f64,
    pub activities: Vec<ActivitySummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: DayKey,
    /// Completed activities / 5, or `None` when the day has no log.
    pub completion_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<ActivityFlags>,
}

#[derive(Debug, Serialize)]
pub struct YearCalendar {
    pub year: i32,
    pub weeks: Vec<Vec<CalendarDay>>,
}

/// Consecutive qualifying days counted back from the most recent log.
///
/// A day that fails the target or has no log at all ends the streak.
pub fn current_streak(logs: &[ActivityLog], target: StreakTarget) -> u32 {
    let mut days: Vec<(DayKey, ActivityFlags)> =
        logs.iter().map(|log| (log.day(), log.flags)).collect();
    days.sort_by(|a, b| b.0.cmp(&a.0));

    let Some(&(mut expected, _)) = days.first() else {
        return 0;
    };

    let mut streak = 0;
    for (day, flags) in &days {
        if *day != expected || !target.holds(flags) {
            break;
        }
        streak += 1;
        match expected.pred() {
            Some(day) => expected = day,
            None => break,
        }
    }
    streak
}

/// Longest run of consecutive qualifying days anywhere in the history.
pub fn longest_streak(logs: &[ActivityLog], target: StreakTarget) -> u32 {
    let mut days: Vec<(DayKey, ActivityFlags)> =
        logs.iter().map(|log| (log.day(), log.flags)).collect();
    days.sort_by(|a, b| a.0.cmp(&b.0));

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<DayKey> = None;

    for (day, flags) in &days {
        if !target.holds(flags) {
            run = 0;
        } else if prev.and_then(|p| p.succ()) == Some(*day) && run > 0 {
            run += 1;
        } else {
            run = 1;
        }
        longest = longest.max(run);
        prev = Some(*day);
    }
    longest
}

/// Percentage of logged days with every activity done, one decimal place.
/// An empty history reports 0.0.
pub fn success_rate(logs: &[ActivityLog]) -> f64 {
    let complete = logs.iter().filter(|log| log.flags.is_complete()).count();
    percent(complete, logs.len())
}

pub fn activity_count(logs: &[ActivityLog], activity: Activity) -> usize {
    logs.iter().filter(|log| log.flags.get(activity)).count()
}

/// Percentage of logged days on which `activity` was done.
pub fn completion_rate(logs: &[ActivityLog], activity: Activity) -> f64 {
    percent(activity_count(logs, activity), logs.len())
}

pub fn dashboard(logs: &[ActivityLog]) -> DashboardSummary {
    let activities = Activity::ALL
        .iter()
        .map(|&activity| ActivitySummary {
            key: activity,
            label: activity.label(),
            current_streak: current_streak(logs, StreakTarget::Activity(activity)),
            longest_streak: longest_streak(logs, StreakTarget::Activity(activity)),
            count: activity_count(logs, activity),
            completion_rate: completion_rate(logs, activity),
        })
        .collect();

    DashboardSummary {
        total_logs: logs.len(),
        current_streak: current_streak(logs, StreakTarget::Combined),
        longest_streak: longest_streak(logs, StreakTarget::Combined),
        success_rate: success_rate(logs),
        activities,
    }
}

/// Every day of `year` in rows of seven, starting from 1 January.
pub fn year_calendar(year: i32, logs: &[ActivityLog]) -> YearCalendar {
    let by_day = index_by_day(logs);
    let days: Vec<CalendarDay> = match year_bounds(year) {
        Some((first, last)) => first
            .iter_days()
            .take_while(|date| *date <= last)
            .map(|date| calendar_day(date, &by_day))
            .collect(),
        None => Vec::new(),
    };

    YearCalendar {
        year,
        weeks: days.chunks(WEEK_LEN).map(<[CalendarDay]>::to_vec).collect(),
    }
}

/// Days of `year` up to and including `today`, most recent first.
pub fn history(year: i32, today: NaiveDate, logs: &[ActivityLog]) -> Vec<CalendarDay> {
    let Some((first, last)) = year_bounds(year) else {
        return Vec::new();
    };
    let end = last.min(today);
    if end < first {
        return Vec::new();
    }

    let by_day = index_by_day(logs);
    let mut days: Vec<CalendarDay> = first
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| calendar_day(date, &by_day))
        .collect();
    days.reverse();
    days
}

fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

fn index_by_day(logs: &[ActivityLog]) -> HashMap<NaiveDate, ActivityFlags> {
    logs.iter()
        .map(|log| (log.day().date(), log.flags))
        .collect()
}

fn calendar_day(date: NaiveDate, by_day: &HashMap<NaiveDate, ActivityFlags>) -> CalendarDay {
    let flags = by_day.get(&date).copied();
    CalendarDay {
        date: DayKey::new(date),
        completion_rate: flags.map(|f| f.completion_ratio()),
        flags,
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn log(date: &str, flags: ActivityFlags) -> ActivityLog {
        let day = DayKey::parse(date).unwrap();
        ActivityLog {
            id: Uuid::new_v4(),
            date: day.start_of_day(),
            flags,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn all() -> ActivityFlags {
        ActivityFlags::all_done()
    }

    fn missing(activity: Activity) -> ActivityFlags {
        all().with(activity, false)
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(current_streak(&[], StreakTarget::Combined), 0);
        assert_eq!(longest_streak(&[], StreakTarget::Combined), 0);
    }

    #[test]
    fn streak_stops_at_incomplete_day() {
        let logs = vec![
            log("2026-01-04", missing(Activity::Reading)),
            log("2026-01-05", all()),
        ];
        assert_eq!(current_streak(&logs, StreakTarget::Combined), 1);
    }

    #[test]
    fn streak_ignores_input_order() {
        let logs = vec![
            log("2026-01-05", all()),
            log("2026-01-03", all()),
            log("2026-01-04", all()),
        ];
        assert_eq!(current_streak(&logs, StreakTarget::Combined), 3);
    }

    #[test]
    fn missing_day_breaks_streak() {
        let logs = vec![
            log("2026-01-02", all()),
            log("2026-01-03", all()),
            log("2026-01-05", all()),
        ];
        assert_eq!(current_streak(&logs, StreakTarget::Combined), 1);
        assert_eq!(longest_streak(&logs, StreakTarget::Combined), 2);
    }

    #[test]
    fn most_recent_day_failing_means_zero() {
        let logs = vec![
            log("2026-01-04", all()),
            log("2026-01-05", missing(Activity::Protein)),
        ];
        assert_eq!(current_streak(&logs, StreakTarget::Combined), 0);
        assert_eq!(
            current_streak(&logs, StreakTarget::Activity(Activity::Reading)),
            2
        );
        assert_eq!(
            current_streak(&logs, StreakTarget::Activity(Activity::Protein)),
            0
        );
    }

    #[test]
    fn longest_streak_spans_failures() {
        let logs = vec![
            log("2026-01-01", all()),
            log("2026-01-02", all()),
            log("2026-01-03", all()),
            log("2026-01-04", missing(Activity::CodingLearning)),
            log("2026-01-05", all()),
        ];
        assert_eq!(longest_streak(&logs, StreakTarget::Combined), 3);
        assert_eq!(current_streak(&logs, StreakTarget::Combined), 1);
    }

    #[test]
    fn streaks_at_the_calendar_edges_do_not_overflow() {
        let at = |date: NaiveDate| ActivityLog {
            id: Uuid::new_v4(),
            date: DayKey::new(date).start_of_day(),
            flags: all(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let first = vec![at(NaiveDate::MIN)];
        assert_eq!(current_streak(&first, StreakTarget::Combined), 1);
        assert_eq!(longest_streak(&first, StreakTarget::Combined), 1);

        let last = vec![at(NaiveDate::MAX.pred_opt().unwrap()), at(NaiveDate::MAX)];
        assert_eq!(current_streak(&last, StreakTarget::Combined), 2);
        assert_eq!(longest_streak(&last, StreakTarget::Combined), 2);
    }

    #[test]
    fn success_rate_rounds_to_one_decimal() {
        let logs = vec![
            log("2026-01-01", all()),
            log("2026-01-02", missing(Activity::Reading)),
            log("2026-01-03", missing(Activity::Reading)),
        ];
        assert_eq!(success_rate(&logs), 33.3);
        assert_eq!(success_rate(&[]), 0.0);
    }

    #[test]
    fn dashboard_counts_each_activity() {
        let logs = vec![
            log("2026-01-01", all()),
            log("2026-01-02", missing(Activity::WritingTweeting)),
        ];
        let summary = dashboard(&logs);
        assert_eq!(summary.total_logs, 2);
        assert_eq!(summary.success_rate, 50.0);

        let writing = summary
            .activities
            .iter()
            .find(|a| a.key == Activity::WritingTweeting)
            .unwrap();
        assert_eq!(writing.count, 1);
        assert_eq!(writing.completion_rate, 50.0);
        assert_eq!(writing.current_streak, 0);
        assert_eq!(writing.longest_streak, 1);

        let reading = summary
            .activities
            .iter()
            .find(|a| a.key == Activity::Reading)
            .unwrap();
        assert_eq!(reading.current_streak, 2);
    }

    #[test]
    fn calendar_covers_whole_year() {
        let logs = vec![log("2026-01-08", missing(Activity::Protein))];
        let calendar = year_calendar(2026, &logs);

        assert_eq!(calendar.weeks.len(), 53);
        let total: usize = calendar.weeks.iter().map(Vec::len).sum();
        assert_eq!(total, 365);
        assert_eq!(calendar.weeks[52].len(), 1);

        let logged = &calendar.weeks[1][0];
        assert_eq!(logged.date.to_string(), "2026-01-08");
        assert_eq!(logged.completion_rate, Some(0.8));
        assert!(calendar.weeks[0][0].completion_rate.is_none());
    }

    #[test]
    fn leap_year_calendar_has_366_days() {
        let calendar = year_calendar(2028, &[]);
        let total: usize = calendar.weeks.iter().map(Vec::len).sum();
        assert_eq!(total, 366);
    }

    #[test]
    fn history_runs_back_from_today() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
        let logs = vec![log("2026-01-02", all())];
        let days = history(2026, today, &logs);

        let dates: Vec<String> = days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, ["2026-01-03", "2026-01-02", "2026-01-01"]);
        assert!(days[1].flags.is_some());
        assert!(days[0].flags.is_none());
    }

    #[test]
    fn history_of_past_and_future_years() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
        assert_eq!(history(2025, today, &[]).len(), 365);
        assert!(history(2027, today, &[]).is_empty());
    }
}
