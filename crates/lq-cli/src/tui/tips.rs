//! The mascot's rotating study tips.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const TIPS: [&str; 5] = [
    "A limit is about where the function is heading, not its value at the point.",
    "If the left and right limits agree, that value is the limit.",
    "Simplify before you substitute: factor, cancel, rationalize.",
    "Infinity is a direction, not a number. The limit may still not exist.",
    "Every wrong answer is a hint about what to review next.",
];

pub struct TipRotator {
    rng: StdRng,
    current: usize,
    interval: Duration,
    shown_at: Instant,
}

impl TipRotator {
    pub fn new(mut rng: StdRng, interval: Duration, now: Instant) -> Self {
        let current = rng.random_range(0..TIPS.len());
        Self {
            rng,
            current,
            interval,
            shown_at: now,
        }
    }

    /// Seeded when `seed` is given, otherwise from OS entropy.
    pub fn from_seed(seed: Option<u64>, interval: Duration) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(rng, interval, Instant::now())
    }

    pub fn current(&self) -> &'static str {
        TIPS[self.current]
    }

    /// Switch to a different random tip once the interval has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now.duration_since(self.shown_at) < self.interval {
            return false;
        }
        // Never repeat the tip on screen.
        let offset = self.rng.random_range(1..TIPS.len());
        self.current = (self.current + offset) % TIPS.len();
        self.shown_at = now;
        true
    }

    /// How long the event loop may block before the next rotation.
    pub fn until_next(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.duration_since(self.shown_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotator(seed: u64) -> (TipRotator, Instant) {
        let now = Instant::now();
        (
            TipRotator::new(StdRng::seed_from_u64(seed), Duration::from_secs(8), now),
            now,
        )
    }

    #[test]
    fn same_seed_same_tips() {
        let (mut a, start) = rotator(42);
        let (mut b, _) = rotator(42);
        for i in 1..20u64 {
            let now = start + Duration::from_secs(8 * i);
            a.tick(now);
            b.tick(now);
            assert_eq!(a.current(), b.current());
        }
    }

    #[test]
    fn rotates_only_after_interval() {
        let (mut tips, start) = rotator(7);
        let first = tips.current();
        assert!(!tips.tick(start + Duration::from_secs(3)));
        assert_eq!(tips.current(), first);
        assert_eq!(
            tips.until_next(start + Duration::from_secs(3)),
            Duration::from_secs(5)
        );

        assert!(tips.tick(start + Duration::from_secs(8)));
        assert_ne!(tips.current(), first);
        assert_eq!(
            tips.until_next(start + Duration::from_secs(8)),
            Duration::from_secs(8)
        );
    }

    #[test]
    fn every_tip_comes_up() {
        let (mut tips, start) = rotator(1);
        let mut seen = std::collections::HashSet::new();
        for i in 0..200u64 {
            tips.tick(start + Duration::from_secs(8 * i));
            seen.insert(tips.current());
        }
        assert_eq!(seen.len(), TIPS.len());
    }
}
