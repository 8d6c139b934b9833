//! Field name translation.
//!
//! A [`NamingStrategy`] rewrites any identifier into its own convention. A
//! [`NameTranslator`] pairs the local (Rust side) and remote (wire side)
//! strategies, which makes the mapping derivable in both directions from one
//! declared pair.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Rewrites an identifier into a naming convention.
///
/// Implementations must be pure: the same input always yields the same output.
pub trait NamingStrategy: fmt::Debug + Send + Sync {
    /// Transform `name` into this convention.
    fn transform(&self, name: &str) -> String;
}

/// Strategy that leaves names untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Identity;

impl NamingStrategy for Identity {
    fn transform(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Case conversion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::enum_variant_names)]
pub enum Case {
    /// `lowercase`
    Lower,
    /// `UPPERCASE`
    Upper,
    /// `camelCase`
    Camel,
    /// `PascalCase`
    Pascal,
    /// `snake_case`
    Snake,
    /// `SCREAMING_SNAKE_CASE`
    ScreamingSnake,
    /// `kebab-case`
    Kebab,
    /// `SCREAMING-KEBAB-CASE`
    ScreamingKebab,
}

impl Case {
    /// All supported rules.
    pub const ALL: [Self; 8] = [
        Self::Lower,
        Self::Upper,
        Self::Camel,
        Self::Pascal,
        Self::Snake,
        Self::ScreamingSnake,
        Self::Kebab,
        Self::ScreamingKebab,
    ];

    /// The rule name as written in declarations.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lower => "lowercase",
            Self::Upper => "UPPERCASE",
            Self::Camel => "camelCase",
            Self::Pascal => "PascalCase",
            Self::Snake => "snake_case",
            Self::ScreamingSnake => "SCREAMING_SNAKE_CASE",
            Self::Kebab => "kebab-case",
            Self::ScreamingKebab => "SCREAMING-KEBAB-CASE",
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Case {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|case| case.as_str() == s)
            .ok_or_else(|| {
                crate::Error::invalid_request(format!(
                    "unknown case: \"{s}\". Expected one of: lowercase, UPPERCASE, camelCase, \
                     PascalCase, snake_case, SCREAMING_SNAKE_CASE, kebab-case, SCREAMING-KEBAB-CASE"
                ))
            })
    }
}

impl NamingStrategy for Case {
    fn transform(&self, name: &str) -> String {
        match self {
            Self::Lower => name.to_lowercase(),
            Self::Upper => name.to_uppercase(),
            Self::Camel => {
                let mut words = split_words(name).into_iter();
                let first = words.next().unwrap_or_default();
                words.fold(first, |mut acc, word| {
                    acc.push_str(&capitalize(&word));
                    acc
                })
            }
            Self::Pascal => split_words(name).iter().map(|w| capitalize(w)).collect(),
            Self::Snake => split_words(name).join("_"),
            Self::ScreamingSnake => split_words(name).join("_").to_uppercase(),
            Self::Kebab => split_words(name).join("-"),
            Self::ScreamingKebab => split_words(name).join("-").to_uppercase(),
        }
    }
}

/// Split an identifier into lowercase words.
///
/// Boundaries are `_`, `-`, whitespace, a lower-to-upper transition and the
/// last capital of an acronym followed by a lowercase letter (`HTTPServer`).
/// Digits stay attached to the preceding word.
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            flush(&mut words, &mut current);
            prev = None;
            continue;
        }

        if c.is_uppercase()
            && let Some(p) = prev
        {
            let next_is_lower = chars.peek().is_some_and(|next| next.is_lowercase());
            if p.is_lowercase() || p.is_ascii_digit() || (p.is_uppercase() && next_is_lower) {
                flush(&mut words, &mut current);
            }
        }

        current.extend(c.to_lowercase());
        prev = Some(c);
    }
    flush(&mut words, &mut current);

    words
}

fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Name Translator
// ============================================================================

/// Bidirectional mapping between local field names and wire names.
///
/// Created fresh for every request build from the resolved strategies and
/// attached to the produced request, so serializers and response decoders use
/// the same mapping.
#[derive(Debug, Clone)]
pub struct NameTranslator {
    local: Arc<dyn NamingStrategy>,
    remote: Arc<dyn NamingStrategy>,
}

impl NameTranslator {
    /// Pair a local and a remote strategy.
    #[must_use]
    pub fn new(local: Arc<dyn NamingStrategy>, remote: Arc<dyn NamingStrategy>) -> Self {
        Self { local, remote }
    }

    /// Translator that leaves names untouched in both directions.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(Arc::new(Identity), Arc::new(Identity))
    }

    /// Map a local field name to its wire name.
    #[must_use]
    pub fn local_to_remote(&self, name: &str) -> String {
        self.remote.transform(name)
    }

    /// Map a wire name back to the local field name.
    #[must_use]
    pub fn remote_to_local(&self, name: &str) -> String {
        self.local.transform(name)
    }

    /// The local strategy.
    #[must_use]
    pub fn local(&self) -> &dyn NamingStrategy {
        self.local.as_ref()
    }

    /// The remote strategy.
    #[must_use]
    pub fn remote(&self) -> &dyn NamingStrategy {
        self.remote.as_ref()
    }
}

impl Default for NameTranslator {
    fn default() -> Self {
        Self::identity()
    }
}
