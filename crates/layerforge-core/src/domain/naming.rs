//! Feature identifiers and their casing variants.
//!
//! A [`FeatureName`] is parsed once from operator input and then shared by
//! every path and template of one invocation. All derived forms are computed
//! at construction, so no caller ever re-derives casing from the raw string.
//!
//! # Word splitting
//!
//! The raw identifier is split into words on ASCII punctuation (`_`, `-`,
//! `.`, ...) and on case transitions (`getProducts`, `HTTPServer`). Words are
//! lowercased.
//!
//! | Raw            | snake            | Pascal         |
//! |----------------|------------------|----------------|
//! | `login`        | `login`          | `Login`        |
//! | `get_products` | `get_products`   | `GetProducts`  |
//! | `getProducts`  | `get_products`   | `GetProducts`  |
//! | `Get--Products`| `get_products`   | `GetProducts`  |
//! | `v2_api`       | `v2_api`         | `V2Api`        |
//!
//! Pascal form is built from the lowercased words, so deriving the snake
//! form from it again yields the original snake form.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::DomainError;

/// A validated feature identifier plus its derived casing variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureName {
    raw: String,
    snake: String,
    pascal: String,
    lower: String,
}

impl FeatureName {
    /// Validate `raw` and derive every casing variant.
    ///
    /// Rejected inputs:
    /// - empty strings
    /// - anything containing whitespace
    /// - path separators (the raw name becomes a directory)
    /// - names without a single letter or digit
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = raw.as_ref();

        if raw.is_empty() {
            return Err(DomainError::invalid_name(raw, "name cannot be empty"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(DomainError::invalid_name(raw, "spaces are not allowed"));
        }
        if raw.contains('/') || raw.contains('\\') {
            return Err(DomainError::invalid_name(
                raw,
                "name cannot contain path separators",
            ));
        }
        if !raw.chars().any(char::is_alphanumeric) {
            return Err(DomainError::invalid_name(
                raw,
                "name must contain at least one letter or digit",
            ));
        }

        let words = split_words(raw);

        Ok(Self {
            raw: raw.to_string(),
            snake: words.join("_"),
            pascal: pascal_from_words(&words),
            lower: raw.to_lowercase(),
        })
    }

    /// The identifier exactly as the operator typed it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `get_products`
    pub fn snake(&self) -> &str {
        &self.snake
    }

    /// `GetProducts`
    pub fn pascal(&self) -> &str {
        &self.pascal
    }

    /// The raw identifier lowercased, separators untouched.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Human-friendly form for notifications: `Get Products`.
    pub fn title(&self) -> String {
        self.snake
            .split('_')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for FeatureName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── Casing helpers ───────────────────────────────────────────────────────────

fn is_separator(c: char) -> bool {
    c.is_ascii_punctuation() || c.is_whitespace()
}

fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if is_separator(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            // `getProducts` breaks before `P`; `HTTPServer` breaks only
            // before the `S` that starts a lowercase run.
            let prev_upper = chars[i - 1].is_uppercase();
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if !prev_upper || next_lower {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn pascal_from_words(words: &[String]) -> String {
    let mut out = String::new();
    let mut prev_single_upper = false;

    for (i, word) in words.iter().enumerate() {
        let capitalized = capitalize(word);
        let mut chars = capitalized.chars();
        let first = chars.next();
        let second = chars.next();

        let starts_upper = first.is_some_and(char::is_uppercase);
        let second_lower = second.is_some_and(char::is_lowercase);

        // Keep an explicit boundary wherever splitting the Pascal form again
        // would merge this word into the previous one (`A_1b`, `A_B`).
        if i > 0 && (!starts_upper || (prev_single_upper && !second_lower)) {
            out.push('_');
        }
        out.push_str(&capitalized);

        prev_single_upper = starts_upper && second.is_none();
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut upper = first.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(single), None) => std::iter::once(single).chain(chars).collect(),
                _ => word.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(raw: &str) -> String {
        FeatureName::parse(raw).unwrap().snake().to_string()
    }

    fn pascal(raw: &str) -> String {
        FeatureName::parse(raw).unwrap().pascal().to_string()
    }

    // ---------------------------------------------------------------------
    // Derivation
    // ---------------------------------------------------------------------

    #[test]
    fn derives_all_casings() {
        let name = FeatureName::parse("getProducts").unwrap();
        assert_eq!(name.raw(), "getProducts");
        assert_eq!(name.snake(), "get_products");
        assert_eq!(name.pascal(), "GetProducts");
        assert_eq!(name.lower(), "getproducts");
        assert_eq!(name.title(), "Get Products");
    }

    #[test]
    fn separators_collapse_to_single_underscore() {
        assert_eq!(snake("Get--Products"), "get_products");
        assert_eq!(snake("__a__b__"), "a_b");
        assert_eq!(snake("user.profile-page"), "user_profile_page");
    }

    #[test]
    fn pascal_is_built_from_lowercased_words() {
        assert_eq!(pascal("LOGIN"), "Login");
        assert_eq!(pascal("login_form"), "LoginForm");
        assert_eq!(pascal("v2_api"), "V2Api");
    }

    #[test]
    fn acronyms_stay_together() {
        assert_eq!(snake("HTTPServer"), "http_server");
        assert_eq!(snake("getHTTP"), "get_http");
        assert_eq!(snake("LOGIN"), "login");
    }

    #[test]
    fn single_letter_words_keep_a_boundary() {
        assert_eq!(pascal("a_b"), "A_B");
        assert_eq!(pascal("a_bc"), "ABc");
        assert_eq!(pascal("a_b2"), "A_B2");
    }

    #[test]
    fn digit_led_words_keep_a_boundary() {
        let name = FeatureName::parse("a_1b").unwrap();
        assert_eq!(name.pascal(), "A_1b");
        assert_eq!(snake(name.pascal()), "a_1b");
    }

    #[test]
    fn non_ascii_letters_survive() {
        assert_eq!(snake("straße_ß"), "straße_ß");
        assert_eq!(snake("ÉtatCivil"), "état_civil");
    }

    // ---------------------------------------------------------------------
    // Validation
    // ---------------------------------------------------------------------

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            FeatureName::parse(""),
            Err(DomainError::InvalidName { .. })
        ));
    }

    #[test]
    fn rejects_whitespace() {
        for raw in ["get products", " login", "login ", "a\tb"] {
            assert!(FeatureName::parse(raw).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn rejects_path_separators() {
        assert!(FeatureName::parse("a/b").is_err());
        assert!(FeatureName::parse("a\\b").is_err());
    }

    #[test]
    fn rejects_punctuation_only() {
        assert!(FeatureName::parse("___").is_err());
        assert!(FeatureName::parse("..").is_err());
    }

    #[test]
    fn from_str_matches_parse() {
        let parsed: FeatureName = "login".parse().unwrap();
        assert_eq!(parsed, FeatureName::parse("login").unwrap());
    }
}
