use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AgentKind
// ---------------------------------------------------------------------------

/// Category of a registered named entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Person,
    Company,
    Place,
    /// An alternative name for another agent; `alias_of` must point at the
    /// canonical agent's id.
    Alias,
}

impl AgentKind {
    /// Canonical snake_case string representation of this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Person => "person",
            AgentKind::Company => "company",
            AgentKind::Place => "place",
            AgentKind::Alias => "alias",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for AgentKind {
    fn from(s: &str) -> Self {
        match s {
            "company" => AgentKind::Company,
            "place" => AgentKind::Place,
            "alias" => AgentKind::Alias,
            _ => AgentKind::Person, // graceful fallback
        }
    }
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// A named entity registered by the user for recognition across articles.
///
/// Ids are assigned by the store (SQLite auto-increment) and never reused;
/// agents are never auto-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: i64,
    pub name: String,
    pub kind: AgentKind,
    /// Id of the canonical agent this record is an alias of.
    /// `Some` iff `kind == AgentKind::Alias`.
    pub alias_of: Option<i64>,
}

impl Agent {
    /// The agent's name split into lowercase words, as matched by the span
    /// marker's sliding window.
    pub fn name_words(&self) -> Vec<String> {
        self.name
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
