use serde::{Deserialize, Serialize};

/// Which character classes feed the pool and how many characters to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordOptions {
    pub length: usize,
    pub use_uppercase: bool,
    pub use_lowercase: bool,
    pub use_numbers: bool,
    pub use_symbols: bool,
    #[serde(default)]
    pub exclude_ambiguous: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            use_uppercase: true,
            use_lowercase: true,
            use_numbers: true,
            use_symbols: true,
            exclude_ambiguous: false,
        }
    }
}

impl PasswordOptions {
    /// Options with every class switched off; combine with the `with_*`
    /// builders to select classes explicitly.
    pub fn none(length: usize) -> Self {
        Self {
            length,
            use_uppercase: false,
            use_lowercase: false,
            use_numbers: false,
            use_symbols: false,
            exclude_ambiguous: false,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn with_uppercase(mut self, on: bool) -> Self {
        self.use_uppercase = on;
        self
    }

    pub fn with_lowercase(mut self, on: bool) -> Self {
        self.use_lowercase = on;
        self
    }

    pub fn with_numbers(mut self, on: bool) -> Self {
        self.use_numbers = on;
        self
    }

    pub fn with_symbols(mut self, on: bool) -> Self {
        self.use_symbols = on;
        self
    }

    pub fn excluding_ambiguous(mut self, on: bool) -> Self {
        self.exclude_ambiguous = on;
        self
    }

    pub fn any_class_selected(&self) -> bool {
        self.use_uppercase || self.use_lowercase || self.use_numbers || self.use_symbols
    }
}
