//! NSE trading calendar: India Standard Time, market hours and job schedule

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Asia/Kolkata has no daylight saving, UTC+05:30 all year
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is within one day")
}

pub fn to_ist(now: DateTime<Utc>) -> DateTime<FixedOffset> {
    now.with_timezone(&ist())
}

fn is_weekday(day: Weekday) -> bool {
    !matches!(day, Weekday::Sat | Weekday::Sun)
}

fn market_open_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 15, 0).expect("valid wall clock time")
}

fn market_close_time() -> NaiveTime {
    NaiveTime::from_hms_opt(15, 30, 0).expect("valid wall clock time")
}

/// Regular session: Monday to Friday, 09:15 to 15:30 IST inclusive
pub fn is_market_open(now: DateTime<Utc>) -> bool {
    let local = to_ist(now);
    if !is_weekday(local.weekday()) {
        return false;
    }
    let time = local.time().with_nanosecond(0).unwrap_or(local.time());
    market_open_time() <= time && time <= market_close_time()
}

/// First quarter hour after the close (15:30 to 15:44 IST), when the daily
/// summary goes out
pub fn is_summary_window(now: DateTime<Utc>) -> bool {
    let local = to_ist(now);
    local.hour() == 15 && (30..45).contains(&local.minute())
}

/// Recurring jobs of the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Job {
    /// Every 15 minutes, hours 09 to 15 IST, Monday to Friday
    MarketHoursUpdate,
    /// 15:35 IST, Monday to Friday
    DailySummary,
}

impl Job {
    pub const ALL: [Job; 2] = [Job::MarketHoursUpdate, Job::DailySummary];

    pub fn id(&self) -> &'static str {
        match self {
            Job::MarketHoursUpdate => "market_hours_update",
            Job::DailySummary => "daily_summary",
        }
    }

    /// Whether the job fires at this IST minute
    pub fn matches(&self, local: &DateTime<FixedOffset>) -> bool {
        if !is_weekday(local.weekday()) {
            return false;
        }
        match self {
            Job::MarketHoursUpdate => (9..=15).contains(&local.hour()) && local.minute() % 15 == 0,
            Job::DailySummary => local.hour() == 15 && local.minute() == 35,
        }
    }

    /// Next fire instant strictly after `now`
    pub fn next_fire(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local = to_ist(now);
        let floored = local
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(local);
        let mut candidate = floored + Duration::minutes(1);
        // a week always contains a weekday slot
        for _ in 0..(8 * 24 * 60) {
            if self.matches(&candidate) {
                return candidate.with_timezone(&Utc);
            }
            candidate += Duration::minutes(1);
        }
        candidate.with_timezone(&Utc)
    }
}
