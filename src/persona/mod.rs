//! Persona (assistant) ordering and visibility.
//!
//! Personas are shown to users in a deterministic order derived from an
//! optional explicit display priority and the persona id. Reordering assigns
//! fresh priorities and writes them back through a [`PersonaStore`].

pub mod manager;
pub mod ordering;
pub mod store;
pub mod types;
pub mod visibility;

pub use manager::OrderingManager;
pub use ordering::{
    apply_priorities, assign_priorities, compare_ids, complete_order, move_persona, persona_comparator,
    sort_personas, sorted_ids, PersonaLike, PriorityKey,
};
pub use store::{build_store, DisplayPriorityRequest, FileStore, HttpStore, PersonaStore};
pub use types::{CurrentUser, MinimalUser, PersonaId, PersonaRecord, PriorityMap, UserRole};
pub use visibility::{can_edit, is_accessible_to, ownership_label, visible_personas, OwnershipLabel};
