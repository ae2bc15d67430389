use rand::Rng;

use crate::error::RewardError;

/// Win probability while fewer than [`THRESHOLD`] wins were granted today.
pub const HIGH_RATE: f64 = 0.7;
/// Win probability once the daily soft ceiling is reached.
pub const REDUCED_RATE: f64 = 0.4;
/// Daily win count at which the reduced rate kicks in.
pub const THRESHOLD: u32 = 30;

/// Two-tier Bernoulli draw. Players can keep winning past the threshold, only
/// less often.
///
/// The policy never touches the win counter: callers read today's count,
/// decide, and record a win themselves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawPolicy {
    high_rate: f64,
    reduced_rate: f64,
    threshold: u32,
}

impl DrawPolicy {
    pub fn new(high_rate: f64, reduced_rate: f64, threshold: u32) -> Result<Self, RewardError> {
        for rate in [high_rate, reduced_rate] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(RewardError::InvalidRate(rate));
            }
        }

        Ok(Self {
            high_rate,
            reduced_rate,
            threshold,
        })
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Success probability for a draw made after `wins_today` wins.
    pub fn win_probability(&self, wins_today: u32) -> f64 {
        if wins_today < self.threshold {
            self.high_rate
        } else {
            self.reduced_rate
        }
    }

    pub fn decide<R: Rng + ?Sized>(&self, wins_today: u32, rng: &mut R) -> bool {
        rng.random_bool(self.win_probability(wins_today))
    }
}

impl Default for DrawPolicy {
    fn default() -> Self {
        Self {
            high_rate: HIGH_RATE,
            reduced_rate: REDUCED_RATE,
            threshold: THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TRIALS: u32 = 20_000;
    const TOLERANCE: f64 = 0.03;

    fn observed_rate(policy: &DrawPolicy, wins_today: u32, seed: u64) -> f64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let hits = (0..TRIALS)
            .filter(|_| policy.decide(wins_today, &mut rng))
            .count();
        hits as f64 / TRIALS as f64
    }

    #[test]
    fn tier_switches_at_threshold() {
        let p = DrawPolicy::default();
        assert_eq!(p.win_probability(0), HIGH_RATE);
        assert_eq!(p.win_probability(29), HIGH_RATE);
        assert_eq!(p.win_probability(30), REDUCED_RATE);
        assert_eq!(p.win_probability(u32::MAX), REDUCED_RATE);
    }

    #[test]
    fn below_threshold_converges_to_high_rate() {
        let p = DrawPolicy::default();
        for (wins, seed) in [(0, 1), (10, 2), (29, 3)] {
            let rate = observed_rate(&p, wins, seed);
            assert!(
                (rate - HIGH_RATE).abs() <= TOLERANCE,
                "wins={wins} observed {rate}"
            );
        }
    }

    #[test]
    fn at_or_above_threshold_converges_to_reduced_rate() {
        let p = DrawPolicy::default();
        for (wins, seed) in [(30, 4), (31, 5), (500, 6)] {
            let rate = observed_rate(&p, wins, seed);
            assert!(
                (rate - REDUCED_RATE).abs() <= TOLERANCE,
                "wins={wins} observed {rate}"
            );
        }
    }

    #[test]
    fn same_seed_same_decisions() {
        let p = DrawPolicy::default();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        let xs: Vec<bool> = (0..256).map(|_| p.decide(5, &mut a)).collect();
        let ys: Vec<bool> = (0..256).map(|_| p.decide(5, &mut b)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn degenerate_rates_are_deterministic() {
        let p = DrawPolicy::new(1.0, 0.0, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        assert!((0..100).all(|_| p.decide(1, &mut rng)));
        assert!((0..100).all(|_| !p.decide(2, &mut rng)));
    }

    #[test]
    fn rejects_rates_outside_unit_interval() {
        assert_eq!(DrawPolicy::new(1.5, 0.4, 30), Err(RewardError::InvalidRate(1.5)));
        assert_eq!(DrawPolicy::new(0.7, -0.1, 30), Err(RewardError::InvalidRate(-0.1)));
        assert!(matches!(
            DrawPolicy::new(f64::NAN, 0.4, 30),
            Err(RewardError::InvalidRate(_))
        ));
    }

    #[test]
    fn decide_accepts_unsized_rng() {
        let p = DrawPolicy::default();
        let mut rng = StdRng::seed_from_u64(9);
        let dyn_rng: &mut dyn rand::RngCore = &mut rng;
        let _ = p.decide(0, dyn_rng);
    }
}
