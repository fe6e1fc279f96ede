use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Repeating playback clock. Holds at most one interval; disarming drops it,
/// which cancels any pending tick.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    interval: Option<Interval>,
}

impl Ticker {
    pub(crate) fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Starts a fresh period, replacing any running interval.
    pub(crate) fn arm(&mut self) {
        let mut interval = tokio::time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    pub(crate) fn disarm(&mut self) {
        self.interval = None;
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Armed exactly while `running`. An already running interval keeps its phase.
    pub(crate) fn sync(&mut self, running: bool) {
        match (running, self.is_armed()) {
            (true, false) => self.arm(),
            (false, true) => self.disarm(),
            _ => {}
        }
    }

    /// Resolves on the next period. Never resolves while disarmed.
    pub(crate) async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_period() {
        let mut ticker = Ticker::default();
        ticker.arm();
        let started = Instant::now();

        ticker.tick().await;

        assert_eq!(started.elapsed(), TICK_PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn disarmed_ticker_never_fires() {
        let mut ticker = Ticker::default();

        let fired = timeout(Duration::from_secs(10), ticker.tick()).await;

        assert!(fired.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn disarm_cancels_running_clock() {
        let mut ticker = Ticker::default();
        ticker.arm();
        ticker.tick().await;

        ticker.disarm();
        let fired = timeout(Duration::from_secs(5), ticker.tick()).await;

        assert!(fired.is_err());
        assert!(!ticker.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn sync_keeps_existing_phase() {
        let mut ticker = Ticker::default();
        ticker.sync(true);
        tokio::time::sleep(Duration::from_millis(600)).await;

        ticker.sync(true);
        let started = Instant::now();
        ticker.tick().await;

        assert_eq!(started.elapsed(), Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_restarts_the_period() {
        let mut ticker = Ticker::default();
        ticker.arm();
        tokio::time::sleep(Duration::from_millis(600)).await;

        ticker.arm();
        let started = Instant::now();
        ticker.tick().await;

        assert_eq!(started.elapsed(), TICK_PERIOD);
    }
}
