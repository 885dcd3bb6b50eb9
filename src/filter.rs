//! Compiles user-supplied name lists into exact-match filter patterns.
//!
//! Filters select which API versions and extensions a generation pass includes
//! or emits. A wrong filter does not crash anything; it silently changes the
//! API surface of the generated artifact, so matching must be exact: a listed
//! name matches itself and nothing else, never as a substring of a longer name.
//! Every literal is escaped before the alternation is assembled, so names
//! containing regex metacharacters match themselves too.

use regex::Regex;

use crate::errors::{VkGenError, VkGenResult};

/// Fallback behavior for an empty name list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDefault {
    /// Match every name (e.g. emit all versions when no `--feature` is given).
    MatchAll,
    /// Match no name (e.g. add no extra extensions when no `--extension` is given).
    MatchNone,
}

#[derive(Debug, Clone)]
enum PatternKind {
    All,
    None,
    Names { regex: Regex, source: String },
}

/// An immutable matching rule compiled from a list of literal names, or from a
/// caller-supplied default when the list is empty. Recompiled fresh each run.
#[derive(Debug, Clone)]
pub struct FilterPattern {
    kind: PatternKind,
}

impl FilterPattern {
    /// Compile `names` into an anchored exact-alternation pattern
    /// (`^(name1|name2|...)$`). An empty list falls back to `default`; an
    /// empty list with no default is an operator error, reported before any
    /// generation is attempted.
    pub fn compile(names: &[String], default: Option<FilterDefault>) -> VkGenResult<Self> {
        if names.is_empty() {
            return match default {
                Some(FilterDefault::MatchAll) => Ok(FilterPattern {
                    kind: PatternKind::All,
                }),
                Some(FilterDefault::MatchNone) => Ok(FilterPattern {
                    kind: PatternKind::None,
                }),
                None => Err(VkGenError::Configuration(
                    "empty filter list with no default pattern".to_string(),
                )),
            };
        }
        let source = format!(
            "^({})$",
            names
                .iter()
                .map(|n| regex::escape(n))
                .collect::<Vec<_>>()
                .join("|")
        );
        let regex = Regex::new(&source).map_err(|e| {
            VkGenError::Configuration(format!("cannot compile filter pattern {source}: {e}"))
        })?;
        Ok(FilterPattern {
            kind: PatternKind::Names { regex, source },
        })
    }

    pub fn match_all() -> Self {
        FilterPattern {
            kind: PatternKind::All,
        }
    }

    pub fn match_none() -> Self {
        FilterPattern {
            kind: PatternKind::None,
        }
    }

    /// Whether `name` is selected by this filter.
    pub fn matches(&self, name: &str) -> bool {
        match &self.kind {
            PatternKind::All => true,
            PatternKind::None => false,
            PatternKind::Names { regex, .. } => regex.is_match(name),
        }
    }
}

impl PartialEq for FilterPattern {
    fn eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (PatternKind::All, PatternKind::All) => true,
            (PatternKind::None, PatternKind::None) => true,
            (PatternKind::Names { source: a, .. }, PatternKind::Names { source: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for FilterPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            PatternKind::All => write!(f, ".*"),
            PatternKind::None => write!(f, "(none)"),
            PatternKind::Names { source, .. } => write!(f, "{source}"),
        }
    }
}

impl From<FilterDefault> for FilterPattern {
    fn from(default: FilterDefault) -> Self {
        match default {
            FilterDefault::MatchAll => FilterPattern::match_all(),
            FilterDefault::MatchNone => FilterPattern::match_none(),
        }
    }
}
