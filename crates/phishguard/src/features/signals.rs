//! Page-content and domain-history signals.
//!
//! The extractor does not fetch pages or query WHOIS. These three fields are
//! supplied by a [`SignalProvider`]; the default provider simulates them with
//! draws biased by whether the URL already looks suspicious.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::Mutex;

/// Domain age range drawn for URLs that look suspicious.
pub const SUSPICIOUS_AGE_DAYS: RangeInclusive<u32> = 1..=30;

/// Domain age range drawn for URLs that look legitimate.
pub const ESTABLISHED_AGE_DAYS: RangeInclusive<u32> = 100..=1000;

/// The three signals that would normally need network access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSignals {
    pub domain_age_days: u32,
    pub has_form: u32,
    pub has_iframe: u32,
}

/// Source of page and domain signals for a URL.
pub trait SignalProvider: Send + Sync {
    /// Produce signals for `url`. `suspicious` is true when the structural
    /// URL features already raised a red flag.
    fn page_signals(&self, url: &str, suspicious: bool) -> PageSignals;
}

/// Pseudo-random signals correlated with the structural red flags.
pub struct SimulatedSignals {
    rng: Mutex<StdRng>,
}

impl SimulatedSignals {
    /// Provider seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Provider with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }
}

impl Default for SimulatedSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalProvider for SimulatedSignals {
    fn page_signals(&self, _url: &str, suspicious: bool) -> PageSignals {
        // Generator state survives a poisoned lock.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        if suspicious {
            PageSignals {
                domain_age_days: rng.gen_range(SUSPICIOUS_AGE_DAYS),
                has_form: rng.gen_ratio(3, 4) as u32,
                has_iframe: rng.gen_ratio(2, 3) as u32,
            }
        } else {
            PageSignals {
                domain_age_days: rng.gen_range(ESTABLISHED_AGE_DAYS),
                has_form: rng.gen_ratio(1, 3) as u32,
                has_iframe: rng.gen_ratio(1, 3) as u32,
            }
        }
    }
}

/// Provider returning the same signals for every URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSignals(pub PageSignals);

impl SignalProvider for FixedSignals {
    fn page_signals(&self, _url: &str, _suspicious: bool) -> PageSignals {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspicious_draws_stay_in_range() {
        let signals = SimulatedSignals::seeded(7);
        for _ in 0..200 {
            let s = signals.page_signals("http://x.tk", true);
            assert!(SUSPICIOUS_AGE_DAYS.contains(&s.domain_age_days));
            assert!(s.has_form <= 1);
            assert!(s.has_iframe <= 1);
        }
    }

    #[test]
    fn test_legitimate_draws_stay_in_range() {
        let signals = SimulatedSignals::seeded(7);
        for _ in 0..200 {
            let s = signals.page_signals("https://example.com", false);
            assert!(ESTABLISHED_AGE_DAYS.contains(&s.domain_age_days));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = SimulatedSignals::seeded(42);
        let b = SimulatedSignals::seeded(42);
        for suspicious in [true, false, true, true, false] {
            assert_eq!(
                a.page_signals("u", suspicious),
                b.page_signals("u", suspicious)
            );
        }
    }

    #[test]
    fn test_form_bias_follows_suspicion() {
        let signals = SimulatedSignals::seeded(1);
        let n = 3000;
        let suspicious: u32 = (0..n)
            .map(|_| signals.page_signals("u", true).has_form)
            .sum();
        let benign: u32 = (0..n)
            .map(|_| signals.page_signals("u", false).has_form)
            .sum();
        // Expected rates are 3/4 and 1/3.
        assert!(suspicious > n * 2 / 3);
        assert!(benign < n / 2);
    }

    #[test]
    fn test_fixed_signals() {
        let fixed = FixedSignals(PageSignals {
            domain_age_days: 365,
            has_form: 1,
            has_iframe: 0,
        });
        assert_eq!(fixed.page_signals("a", true).domain_age_days, 365);
        assert_eq!(fixed.page_signals("b", false).has_form, 1);
    }
}
