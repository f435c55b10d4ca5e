//! Visibility and ownership rules for personas.
//!
//! These never influence ordering; they decide which records a user sees and
//! how each record is labelled.

use std::fmt;

use super::types::{CurrentUser, PersonaRecord, UserRole};

/// Whether `user` may use `persona` at all, ignoring `is_visible`.
pub fn is_accessible_to(persona: &PersonaRecord, user: &CurrentUser) -> bool {
    if user.is_admin() || persona.is_public {
        return true;
    }
    if is_owned_by(persona, user) {
        return true;
    }
    if persona.users.iter().any(|u| u.id == user.id) {
        return true;
    }
    shares_group(persona, user)
}

/// Records `user` can see. Hidden records are dropped unless `include_hidden`.
pub fn visible_personas<'a>(
    personas: &'a [PersonaRecord],
    user: &CurrentUser,
    include_hidden: bool,
) -> Vec<&'a PersonaRecord> {
    personas
        .iter()
        .filter(|p| include_hidden || p.is_visible)
        .filter(|p| is_accessible_to(p, user))
        .collect()
}

/// Built-in records are never editable. Otherwise admins, owners, and curators
/// of a group the persona is shared with may edit.
pub fn can_edit(persona: &PersonaRecord, user: &CurrentUser) -> bool {
    if persona.builtin_persona {
        return false;
    }
    match user.role {
        UserRole::Admin => true,
        UserRole::Curator => is_owned_by(persona, user) || shares_group(persona, user),
        UserRole::Basic => is_owned_by(persona, user),
    }
}

fn is_owned_by(persona: &PersonaRecord, user: &CurrentUser) -> bool {
    persona
        .owner
        .as_ref()
        .is_some_and(|owner| owner.id == user.id)
}

fn shares_group(persona: &PersonaRecord, user: &CurrentUser) -> bool {
    persona.groups.iter().any(|g| user.groups.contains(g))
}

// ─────────────────────────────────────────────────────────────────
// Ownership label
// ─────────────────────────────────────────────────────────────────

/// Who a persona belongs to, from the viewer's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnershipLabel {
    BuiltIn,
    You,
    Owner(String),
    /// No owner recorded.
    Unowned,
}

impl fmt::Display for OwnershipLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnershipLabel::BuiltIn => write!(f, "Built-in"),
            OwnershipLabel::You => write!(f, "You"),
            OwnershipLabel::Owner(email) => write!(f, "{}", email),
            OwnershipLabel::Unowned => write!(f, "-"),
        }
    }
}

pub fn ownership_label(persona: &PersonaRecord, user: &CurrentUser) -> OwnershipLabel {
    if persona.builtin_persona {
        return OwnershipLabel::BuiltIn;
    }
    match &persona.owner {
        Some(owner) if owner.id == user.id => OwnershipLabel::You,
        Some(owner) => OwnershipLabel::Owner(owner.email.clone()),
        None => OwnershipLabel::Unowned,
    }
}
