use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Normalise free text into an executor name.
///
/// Diacritics are stripped, every run of characters outside `[A-Za-z0-9_]`
/// becomes a single separator, and the result is lowercased and joined with `_`.
pub fn to_snake_case(input: &str) -> String {
    let spaced: String = input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();

    spaced.split_whitespace().collect::<Vec<_>>().join("_")
}
