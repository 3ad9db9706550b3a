//! Identifier and clock sources.
//!
//! The engine never reads the wall clock or an ambient RNG. Callers hand in
//! an [`IdSource`] and a [`Clock`]; tests use the deterministic ones here.
//!
//! ```
//! use dix_mille::core::{IdSource, SeededIds};
//!
//! let mut a = SeededIds::new(42);
//! let mut b = SeededIds::new(42);
//! assert_eq!(a.next_id(), b.next_id());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Produces fresh unique identifiers for games, players, turns and entries.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

impl<F> IdSource for F
where
    F: FnMut() -> String,
{
    fn next_id(&mut self) -> String {
        self()
    }
}

/// Deterministic UUID-v4 shaped identifiers.
///
/// Uses ChaCha8, so the same seed produces the same sequence on every
/// platform.
#[derive(Clone, Debug)]
pub struct SeededIds {
    inner: ChaCha8Rng,
}

impl SeededIds {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl IdSource for SeededIds {
    fn next_id(&mut self) -> String {
        let mut bytes: [u8; 16] = self.inner.gen();
        // version 4, RFC 4122 variant
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )
    }
}

/// Supplies the creation timestamp for new games.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

impl<F> Clock for F
where
    F: Fn() -> i64,
{
    fn now_millis(&self) -> i64 {
        self()
    }
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }
}

/// Always returns the same instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}
