//! Entry name collation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Orders directory entry names.
///
/// Implementations must be a total order so that listings are deterministic.
///
/// The default, [`Collation::Codepoint`], compares names by Unicode code
/// point. That is what `strcoll` does under the C/POSIX locale and nothing
/// more: there is no locale lookup, so accented letters sort after `z` and
/// uppercase sorts before lowercase. Hosts that want the ordering of a
/// specific locale implement this trait with their own comparison and pass it
/// to [`DirectoryExpander::with_collator`](crate::DirectoryExpander::with_collator).
pub trait Collator: Send + Sync {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Built-in collations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Collation {
    /// Unicode code point order.
    ///
    /// Equal to `strcoll` under the C/POSIX locale only; other locales are
    /// not consulted.
    #[default]
    Codepoint,
    /// Case-insensitive order, ties broken by code point.
    CaseFold,
}

impl Collator for Collation {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Collation::Codepoint => a.cmp(b),
            Collation::CaseFold => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
                .then_with(|| a.cmp(b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(collation: Collation, names: &[&'static str]) -> Vec<&'static str> {
        let mut names = names.to_vec();
        names.sort_by(|a, b| collation.compare(a, b));
        names
    }

    #[test]
    fn test_codepoint_puts_uppercase_first() {
        assert_eq!(
            sorted(Collation::Codepoint, &["b.mp3", "B.mp3", "a.mp3"]),
            vec!["B.mp3", "a.mp3", "b.mp3"]
        );
    }

    #[test]
    fn test_codepoint_ignores_locale() {
        assert_eq!(
            sorted(Collation::Codepoint, &["zz.mp3", "\u{e9}t\u{e9}.mp3", "ete.mp3"]),
            vec!["ete.mp3", "zz.mp3", "\u{e9}t\u{e9}.mp3"]
        );
    }

    #[test]
    fn test_casefold_groups_letters() {
        assert_eq!(
            sorted(Collation::CaseFold, &["b.mp3", "B.mp3", "a.mp3"]),
            vec!["a.mp3", "B.mp3", "b.mp3"]
        );
    }
}
