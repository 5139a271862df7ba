use std::borrow::Cow;

use crate::options::PasswordOptions;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const NUMBERS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Characters that are easy to misread for one another.
pub const AMBIGUOUS: &str = "Il1O0";

/// Returns `char_set` with the ambiguous characters removed when `exclude`
/// is set. Relative order is preserved.
pub fn filter_set(char_set: &str, exclude: bool) -> Cow<'_, str> {
    if !exclude {
        return Cow::Borrowed(char_set);
    }

    Cow::Owned(char_set.chars().filter(|c| !AMBIGUOUS.contains(*c)).collect())
}

/// Concatenates every selected class, filtered, in the order uppercase,
/// lowercase, numbers, symbols.
pub fn build_pool(options: &PasswordOptions) -> Vec<char> {
    let classes = [
        (options.use_uppercase, UPPERCASE),
        (options.use_lowercase, LOWERCASE),
        (options.use_numbers, NUMBERS),
        (options.use_symbols, SYMBOLS),
    ];

    classes
        .into_iter()
        .filter(|(selected, _)| *selected)
        .flat_map(|(_, set)| {
            filter_set(set, options.exclude_ambiguous)
                .chars()
                .collect::<Vec<_>>()
        })
        .collect()
}
