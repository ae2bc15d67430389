use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::boundary::DayBoundary;
use crate::clock::{Clock, SystemClock};
use crate::policy::DrawPolicy;

/// Result of one atomic read-decide-register cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawOutcome {
    /// Counting day the draw was attributed to.
    pub date: NaiveDate,
    /// Wins already granted on `date` before this draw.
    pub wins_before: u32,
    /// Probability the draw was made with.
    pub probability: f64,
    pub win: bool,
}

/// Global daily win counter plus the draw policy that reads it.
///
/// Counts are keyed by calendar date in the configured [`DayBoundary`], so a
/// new day starts at zero without any explicit reset. Entries are created on
/// the first win of a day and kept for the lifetime of the limiter.
pub struct WinLimiter {
    clock: Arc<dyn Clock>,
    boundary: DayBoundary,
    policy: DrawPolicy,
    wins: Mutex<HashMap<NaiveDate, u32>>,
}

impl WinLimiter {
    pub fn new(boundary: DayBoundary) -> Self {
        Self::with_clock(boundary, Arc::new(SystemClock))
    }

    pub fn with_clock(boundary: DayBoundary, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            boundary,
            policy: DrawPolicy::default(),
            wins: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_policy(mut self, policy: DrawPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn boundary(&self) -> DayBoundary {
        self.boundary
    }

    pub fn policy(&self) -> &DrawPolicy {
        &self.policy
    }

    /// Current counting day.
    pub fn today(&self) -> NaiveDate {
        self.boundary.date_of(self.clock.now())
    }

    pub fn get_today_wins(&self) -> u32 {
        self.wins_on(self.today())
    }

    /// Wins recorded for an arbitrary date; zero when nothing was recorded.
    pub fn wins_on(&self, date: NaiveDate) -> u32 {
        self.wins.lock().get(&date).copied().unwrap_or(0)
    }

    #[instrument(skip(self), target = "reward")]
    pub fn register_win(&self) {
        let today = self.today();
        let mut wins = self.wins.lock();
        let count = bump(&mut wins, today);

        debug!(%today, count, "win registered");
    }

    /// Pure policy decision; does not read or write the counter.
    pub fn decide<R: Rng + ?Sized>(&self, wins_today: u32, rng: &mut R) -> bool {
        self.policy.decide(wins_today, rng)
    }

    /// Reads today's count, decides, and records a win, all under one lock so
    /// concurrent draws on the same day cannot observe the same count.
    #[instrument(skip_all, target = "reward")]
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> DrawOutcome {
        let date = self.today();
        let mut wins = self.wins.lock();

        let wins_before = wins.get(&date).copied().unwrap_or(0);
        let probability = self.policy.win_probability(wins_before);
        let win = self.policy.decide(wins_before, rng);

        if win {
            let count = bump(&mut wins, date);
            if count == self.policy.threshold() {
                info!(%date, count, "daily win threshold reached; switching to reduced rate");
            }
        }

        debug!(%date, wins_before, probability, win, "draw completed");

        DrawOutcome {
            date,
            wins_before,
            probability,
            win,
        }
    }
}

fn bump(wins: &mut HashMap<NaiveDate, u32>, date: NaiveDate) -> u32 {
    let entry = wins.entry(date).or_insert(0);
    *entry = entry.saturating_add(1);
    *entry
}
