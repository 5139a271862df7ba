//! Secure random sources and index sampling.
//!
//! Generation only needs one primitive from its random collaborator: a
//! uniformly distributed `u32` suitable for cryptographic use. Two
//! implementations are provided, one on top of `ring`'s system generator
//! and one on top of the operating system RNG exposed by `rand`.

use rand::{rngs::OsRng, RngCore};
use ring::rand::{SecureRandom as _, SystemRandom};

use crate::error::{Error, Result};

/// Source of cryptographically strong 32-bit values.
pub trait SecureRandom {
    fn next_u32(&mut self) -> Result<u32>;
}

/// `ring`'s system random generator.
#[derive(Debug, Clone)]
pub struct SystemSource {
    rng: SystemRandom,
}

impl SystemSource {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SystemSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureRandom for SystemSource {
    fn next_u32(&mut self) -> Result<u32> {
        let mut bytes = [0u8; 4];
        self.rng.fill(&mut bytes)?;
        Ok(u32::from_ne_bytes(bytes))
    }
}

/// The operating system RNG via `rand::rngs::OsRng`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRngSource;

impl SecureRandom for OsRngSource {
    fn next_u32(&mut self) -> Result<u32> {
        let mut bytes = [0u8; 4];
        OsRng.try_fill_bytes(&mut bytes).map_err(|_| Error::Random)?;
        Ok(u32::from_ne_bytes(bytes))
    }
}

/// How a random `u32` is reduced to an index below the pool size.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// A single `value % bound`. Slightly favours low indices when `bound`
    /// does not divide 2^32.
    Modulo,
    /// Redraw values from the tail above the largest multiple of `bound`,
    /// then reduce. Exactly uniform.
    #[default]
    Rejection,
}

/// Draws an index in `[0, bound)`.
pub fn sample_index<R: SecureRandom + ?Sized>(
    rng: &mut R,
    bound: usize,
    sampling: Sampling,
) -> Result<usize> {
    let bound = u32::try_from(bound)
        .ok()
        .filter(|b| *b > 0)
        .ok_or_else(|| {
            Error::InvalidConfiguration(format!("cannot sample an index below {bound}"))
        })?;

    let value = match sampling {
        Sampling::Modulo => rng.next_u32()?,
        Sampling::Rejection => {
            // Values above zone would over-represent the first (2^32 % bound) indices.
            let zone = u32::MAX - (u32::MAX - bound + 1) % bound;
            loop {
                let value = rng.next_u32()?;
                if value <= zone {
                    break value;
                }
            }
        }
    };

    Ok((value % bound) as usize)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed list of values.
    pub(crate) struct Scripted(pub VecDeque<u32>);

    impl Scripted {
        pub(crate) fn new(values: &[u32]) -> Self {
            Self(values.iter().copied().collect())
        }
    }

    impl SecureRandom for Scripted {
        fn next_u32(&mut self) -> Result<u32> {
            self.0.pop_front().ok_or(Error::Random)
        }
    }

    #[test]
    fn test_system_source_produces_values() {
        let mut rng = SystemSource::new();
        let values: Vec<u32> = (0..16).map(|_| rng.next_u32().unwrap()).collect();

        // 16 identical draws from a working CSPRNG is practically impossible.
        assert!(values.iter().any(|v| *v != values[0]));
    }

    #[test]
    fn test_os_rng_source_produces_values() {
        let mut rng = OsRngSource;
        let values: Vec<u32> = (0..16).map(|_| rng.next_u32().unwrap()).collect();
        assert!(values.iter().any(|v| *v != values[0]));
    }

    #[test]
    fn test_modulo_reduces_once() {
        let mut rng = Scripted::new(&[u32::MAX, 7]);
        let index = sample_index(&mut rng, 10, Sampling::Modulo).unwrap();

        assert_eq!(index, (u32::MAX % 10) as usize);
        assert_eq!(rng.0.len(), 1);
    }

    #[test]
    fn test_rejection_redraws_biased_tail() {
        // 2^32 % 10 == 6, so the last six values are rejected.
        let mut rng = Scripted::new(&[u32::MAX, u32::MAX - 5, 13]);
        let index = sample_index(&mut rng, 10, Sampling::Rejection).unwrap();

        assert_eq!(index, 3);
        assert!(rng.0.is_empty());
    }

    #[test]
    fn test_rejection_accepts_top_of_zone() {
        let zone = u32::MAX - 6;
        let mut rng = Scripted::new(&[zone]);
        let index = sample_index(&mut rng, 10, Sampling::Rejection).unwrap();

        assert_eq!(index, (zone % 10) as usize);
    }

    #[test]
    fn test_rejection_power_of_two_never_rejects() {
        let mut rng = Scripted::new(&[u32::MAX]);
        let index = sample_index(&mut rng, 64, Sampling::Rejection).unwrap();
        assert_eq!(index, 63);
    }

    #[test]
    fn test_bound_of_one() {
        let mut rng = Scripted::new(&[u32::MAX, 0]);
        assert_eq!(sample_index(&mut rng, 1, Sampling::Rejection).unwrap(), 0);
        assert_eq!(sample_index(&mut rng, 1, Sampling::Modulo).unwrap(), 0);
    }

    #[test]
    fn test_zero_bound_is_rejected() {
        let mut rng = Scripted::new(&[1]);
        let result = sample_index(&mut rng, 0, Sampling::Rejection);

        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
        assert_eq!(rng.0.len(), 1);
    }

    #[test]
    fn test_source_failure_propagates() {
        let mut rng = Scripted::new(&[]);
        let result = sample_index(&mut rng, 5, Sampling::Modulo);
        assert!(matches!(result, Err(Error::Random)));
    }
}
