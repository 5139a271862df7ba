use tracing::debug;

use crate::charset::build_pool;
use crate::error::{Error, Result};
use crate::options::PasswordOptions;
use crate::random::{sample_index, Sampling, SecureRandom, SystemSource};

/// Password generator over a secure random source.
///
/// ```
/// use passforge::{PasswordGenerator, PasswordOptions};
///
/// let mut generator = PasswordGenerator::system();
/// let password = generator
///     .generate(&PasswordOptions::none(20).with_lowercase(true))
///     .unwrap();
/// assert_eq!(password.chars().count(), 20);
/// ```
#[derive(Debug)]
pub struct PasswordGenerator<R> {
    rng: R,
    sampling: Sampling,
}

impl PasswordGenerator<SystemSource> {
    pub fn system() -> Self {
        Self::new(SystemSource::new())
    }
}

impl<R: SecureRandom> PasswordGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            sampling: Sampling::default(),
        }
    }

    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// Generates a password of `options.length` characters drawn
    /// independently, with replacement, from the selected pool.
    ///
    /// # Errors
    /// * `Error::InvalidConfiguration` if no character survives the class
    ///   selection and ambiguity filter. Checked before anything is drawn,
    ///   so a zero length with an empty pool still fails.
    /// * `Error::Random` if the random source fails.
    pub fn generate(&mut self, options: &PasswordOptions) -> Result<String> {
        let pool = build_pool(options);
        if pool.is_empty() {
            return Err(Error::InvalidConfiguration(
                "no character class selected".to_string(),
            ));
        }

        debug!(
            pool_size = pool.len(),
            length = options.length,
            sampling = ?self.sampling,
            "generating password"
        );

        let mut password = String::with_capacity(options.length);
        for _ in 0..options.length {
            let index = sample_index(&mut self.rng, pool.len(), self.sampling)?;
            password.push(pool[index]);
        }

        Ok(password)
    }
}

/// Generates a password with the system random source and unbiased sampling.
pub fn generate(options: &PasswordOptions) -> Result<String> {
    PasswordGenerator::system().generate(options)
}
