//! User profile and name detection
//!
//! The profile remembers the user's name across sessions. The name is
//! inferred from free text with a small set of introduction patterns
//! ("my name is …", "I am …", "I'm …"); it is a heuristic, not a parser.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Shortest accepted name, in characters
pub const MIN_NAME_CHARS: usize = 2;

/// Longest accepted name, in characters
pub const MAX_NAME_CHARS: usize = 40;

/// Introduction patterns, tried in order. Each captures one to three
/// words made of ASCII letters, apostrophes and hyphens.
///
/// Letters, literals and word boundaries are ASCII-only (`(?-u:...)`), so
/// "José" yields "Jos" and the Kelvin sign is not a `k`. Whitespace stays
/// Unicode-aware.
const NAME_PATTERNS: [&str; 3] = [
    r"(?i)(?-u:\bmy name is)\s+((?-u:[a-z][a-z'-]*)(?:\s+(?-u:[a-z][a-z'-]*)){0,2})(?-u:\b)",
    r"(?i)(?-u:\bi am)\s+((?-u:[a-z][a-z'-]*)(?:\s+(?-u:[a-z][a-z'-]*)){0,2})(?-u:\b)",
    r"(?i)(?-u:\bi'm)\s+((?-u:[a-z][a-z'-]*)(?:\s+(?-u:[a-z][a-z'-]*)){0,2})(?-u:\b)",
];

fn name_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        NAME_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("name pattern is a valid regex"))
            .collect()
    })
}

/// Persisted user profile
///
/// Serialized as `{"name": ...}`. An empty stored name counts as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    name: Option<String>,
}

impl Profile {
    /// Profile with a known name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// The user's name, if one has been recorded
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Whether a name has been recorded
    pub fn has_name(&self) -> bool {
        self.name().is_some()
    }

    /// Record `name` unless one is already set
    ///
    /// Returns `true` when the profile changed.
    pub fn adopt_name(&mut self, name: &str) -> bool {
        if self.has_name() {
            return false;
        }
        self.name = Some(name.to_string());
        true
    }
}

/// Extract a self-introduced name from `text`
///
/// Patterns are tried in order and only the first occurrence of each is
/// considered. The captured words are joined with single spaces; the first
/// candidate between 2 and 40 characters long wins.
///
/// # Examples
///
/// ```
/// use advisor_chat::conversation::extract_name;
///
/// assert_eq!(extract_name("Hi, my name is Ana Maria"), Some("Ana Maria".to_string()));
/// assert_eq!(extract_name("hello there"), None);
/// ```
pub fn extract_name(text: &str) -> Option<String> {
    name_patterns().iter().find_map(|re| {
        let captured = re.captures(text)?.get(1)?.as_str();
        let name = captured.split_whitespace().collect::<Vec<_>>().join(" ");
        let len = name.chars().count();
        (MIN_NAME_CHARS..=MAX_NAME_CHARS)
            .contains(&len)
            .then_some(name)
    })
}
