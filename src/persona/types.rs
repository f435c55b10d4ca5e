//! Core types for persona records.
//!
//! A persona (assistant) record as returned by the persistence API. Only
//! `id` and `display_priority` take part in ordering; the remaining fields
//! drive the visibility and ownership rules.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Backend-assigned persona identifier. Negative ids are reserved for
/// built-in records created by the system.
pub type PersonaId = i64;

/// Explicit display priority per persona id, as persisted by a reorder.
pub type PriorityMap = BTreeMap<PersonaId, i64>;

// ─────────────────────────────────────────────────────────────────
// Persona Record
// ─────────────────────────────────────────────────────────────────

/// A user reference carried on persona records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimalUser {
    pub id: String,
    pub email: String,
}

/// A persona as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaRecord {
    /// Stable, never reused.
    pub id: PersonaId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// `None` means unordered; such records sort after all ordered ones.
    #[serde(default)]
    pub display_priority: Option<i64>,

    #[serde(default = "default_true")]
    pub is_public: bool,

    #[serde(default = "default_true")]
    pub is_visible: bool,

    #[serde(default, alias = "default_assistant")]
    pub default_persona: bool,

    /// Shipped by the system rather than created by a user.
    #[serde(default)]
    pub builtin_persona: bool,

    #[serde(default)]
    pub owner: Option<MinimalUser>,

    /// Users this persona is explicitly shared with.
    #[serde(default)]
    pub users: Vec<MinimalUser>,

    /// User groups (teamspaces) this persona is shared with.
    #[serde(default)]
    pub groups: Vec<i64>,
}

fn default_true() -> bool {
    true
}

impl PersonaRecord {
    /// Minimal public, visible record with no owner.
    pub fn new(id: PersonaId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            display_priority: None,
            is_public: true,
            is_visible: true,
            default_persona: false,
            builtin_persona: false,
            owner: None,
            users: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: Option<i64>) -> Self {
        self.display_priority = priority;
        self
    }
}

// ─────────────────────────────────────────────────────────────────
// Current User
// ─────────────────────────────────────────────────────────────────

/// Role of the viewing user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Sees and edits every persona.
    Admin,
    /// Manages personas of the groups they belong to.
    Curator,
    #[default]
    Basic,
}

impl UserRole {
    pub fn slug(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Curator => "curator",
            UserRole::Basic => "basic",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "curator" => Ok(UserRole::Curator),
            "basic" => Ok(UserRole::Basic),
            _ => Err(format!(
                "Unknown user role '{}'. Valid: admin, curator, basic",
                s
            )),
        }
    }
}

/// The user on whose behalf personas are listed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    /// Ids of the user groups this user belongs to.
    #[serde(default)]
    pub groups: Vec<i64>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
