//! Job loop driving periodic updates

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::market::Job;
use crate::service::BotService;

/// Delay of the one-off update after start-up
pub const INITIAL_DELAY_SECS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Initial,
    Recurring(Job),
}

impl Trigger {
    pub fn id(&self) -> &'static str {
        match self {
            Trigger::Initial => "initial_update",
            Trigger::Recurring(job) => job.id(),
        }
    }
}

pub struct Scheduler {
    initial_at: Option<DateTime<Utc>>,
}

impl Scheduler {
    pub fn new(started: DateTime<Utc>) -> Self {
        Self {
            initial_at: Some(started + Duration::seconds(INITIAL_DELAY_SECS)),
        }
    }

    /// Earliest pending trigger after `now`. The initial update counts
    /// until it has been taken.
    pub fn next(&self, now: DateTime<Utc>) -> (DateTime<Utc>, Trigger) {
        let mut best = Job::ALL
            .iter()
            .map(|job| (job.next_fire(now), Trigger::Recurring(*job)))
            .min_by_key(|(at, _)| *at)
            .unwrap_or((now + Duration::days(1), Trigger::Recurring(Job::MarketHoursUpdate)));
        if let Some(initial) = self.initial_at {
            if initial <= best.0 {
                best = (initial.max(now), Trigger::Initial);
            }
        }
        best
    }

    pub fn mark_fired(&mut self, trigger: Trigger) {
        if trigger == Trigger::Initial {
            self.initial_at = None;
        }
    }

    /// Run until the task is dropped
    pub async fn run(mut self, service: Arc<BotService>) {
        log::info!("⏰ Scheduler started");
        loop {
            let now = Utc::now();
            let (at, trigger) = self.next(now);
            let wait = (at - now).to_std().unwrap_or_default();
            log::debug!("⏳ Next job {} at {}", trigger.id(), at);
            tokio::time::sleep(wait).await;

            self.mark_fired(trigger);
            log::info!("🔄 Running {}", trigger.id());
            if !service.update_data().await {
                log::warn!("⚠️ {} finished without data", trigger.id());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::ist;
    use chrono::TimeZone;

    fn ist_at(d: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
        ist().with_ymd_and_hms(2025, 3, d, h, m, s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_initial_update_comes_first() {
        let start = ist_at(3, 10, 0, 0);
        let scheduler = Scheduler::new(start);
        let (at, trigger) = scheduler.next(start);
        assert_eq!(trigger, Trigger::Initial);
        assert_eq!(at, start + Duration::seconds(10));
    }

    #[test]
    fn test_initial_update_yields_to_earlier_job() {
        let start = ist_at(3, 10, 14, 55);
        let scheduler = Scheduler::new(start);
        let (at, trigger) = scheduler.next(start);
        assert_eq!(trigger, Trigger::Recurring(Job::MarketHoursUpdate));
        assert_eq!(at, ist_at(3, 10, 15, 0));
    }

    #[test]
    fn test_after_initial_recurring_jobs_follow() {
        let start = ist_at(3, 15, 31, 0);
        let mut scheduler = Scheduler::new(start);
        scheduler.mark_fired(Trigger::Initial);
        let (at, trigger) = scheduler.next(start);
        assert_eq!(trigger, Trigger::Recurring(Job::DailySummary));
        assert_eq!(at, ist_at(3, 15, 35, 0));

        let (at, trigger) = scheduler.next(ist_at(3, 15, 35, 0));
        assert_eq!(trigger, Trigger::Recurring(Job::MarketHoursUpdate));
        assert_eq!(at, ist_at(3, 15, 45, 0));
    }

    #[test]
    fn test_trigger_ids() {
        assert_eq!(Trigger::Initial.id(), "initial_update");
        assert_eq!(Trigger::Recurring(Job::DailySummary).id(), "daily_summary");
    }
}
