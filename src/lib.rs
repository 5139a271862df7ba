//! Random password generation from selectable character classes.
//!
//! ```
//! use passforge::{generate, PasswordOptions};
//!
//! let options = PasswordOptions::none(12).with_uppercase(true).with_numbers(true);
//! let password = generate(&options).unwrap();
//! assert_eq!(password.len(), 12);
//! ```

pub mod charset;
pub mod clipboard;
pub mod config;
mod error;
pub mod generator;
mod options;
pub mod random;

pub use error::{Error, Result};
pub use generator::{generate, PasswordGenerator};
pub use options::PasswordOptions;
pub use random::{Sampling, SecureRandom};
