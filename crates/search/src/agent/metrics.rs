use crate::Episode;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Instant;

/// Accumulated self-play counters for one agent.
/// Owns timing for periodic checkpoint logging.
pub struct Metrics {
    episodes: AtomicUsize,
    created: AtomicUsize,
    plies: AtomicUsize,
    shifts: AtomicUsize,
    rounds: AtomicUsize,
    start: Instant,
    prior: Mutex<(Instant, usize)>,
}

impl Default for Metrics {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            episodes: AtomicUsize::new(0),
            created: AtomicUsize::new(0),
            plies: AtomicUsize::new(0),
            shifts: AtomicUsize::new(0),
            rounds: AtomicUsize::new(0),
            start: now,
            prior: Mutex::new((now, 0)),
        }
    }
}

impl Metrics {
    /// Folds one finished episode into the counters.
    pub fn record(&self, episode: &Episode) {
        self.episodes.fetch_add(1, Ordering::Relaxed);
        self.created.fetch_add(episode.created, Ordering::Relaxed);
        self.plies.fetch_add(episode.plies, Ordering::Relaxed);
    }
    pub fn add_shift(&self) {
        self.shifts.fetch_add(1, Ordering::Relaxed);
    }
    pub fn add_round(&self) {
        self.rounds.fetch_add(1, Ordering::Relaxed);
    }
    pub fn episodes(&self) -> usize {
        self.episodes.load(Ordering::Relaxed)
    }
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }
    pub fn plies(&self) -> usize {
        self.plies.load(Ordering::Relaxed)
    }
    pub fn shifts(&self) -> usize {
        self.shifts.load(Ordering::Relaxed)
    }
    pub fn rounds(&self) -> usize {
        self.rounds.load(Ordering::Relaxed)
    }
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
    /// Returns stats only if checkpoint interval has elapsed.
    /// Reports the episode rate since the last checkpoint, not cumulative.
    pub fn checkpoint(&self) -> Option<String> {
        let mut prior = self.prior.lock().expect("poison");
        if prior.0.elapsed() >= incognito_core::TRAINING_LOG_INTERVAL {
            let secs = prior.0.elapsed().as_secs().max(1) as f64;
            let curr = self.episodes();
            let rate = (curr - prior.1) as f64 / secs;
            *prior = (Instant::now(), curr);
            Some(self.format(rate))
        } else {
            None
        }
    }
    fn format(&self, rate: f64) -> String {
        format!(
            "{:<20}{:<20}{:<20}{:<20}{:<20}",
            format!("episodes {}", self.episodes()),
            format!("entries {}", self.created()),
            format!("plies {}", self.plies()),
            format!("rounds {}", self.rounds()),
            format!("E/sec {:.1}", rate),
        )
    }
}

impl std::fmt::Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secs = self.elapsed().as_secs_f64().max(1e-3);
        write!(f, "{}", self.format(self.episodes() as f64 / secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episodes_accumulate() {
        let metrics = Metrics::default();
        let episode = Episode {
            created: 2,
            plies: 3,
            returns: [0.; 2],
            ..Episode::default()
        };
        metrics.record(&episode);
        metrics.record(&episode);
        metrics.add_shift();
        assert_eq!(metrics.episodes(), 2);
        assert_eq!(metrics.created(), 4);
        assert_eq!(metrics.plies(), 6);
        assert_eq!(metrics.shifts(), 1);
        assert_eq!(metrics.rounds(), 0);
        assert!(metrics.checkpoint().is_none());
    }
}
