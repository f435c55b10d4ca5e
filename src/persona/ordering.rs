//! Display ordering for personas.
//!
//! Records are ordered by explicit `display_priority` (nulls last) and then
//! by id using the "closer to zero, negatives first" rule. Together the two
//! keys form a total order, so sorting is deterministic for any set of
//! records with distinct ids.
//!
//! A reorder gesture produces a new sequence of ids; [`assign_priorities`]
//! turns that sequence into the explicit priorities that get persisted.

use std::cmp::Ordering;
use std::collections::btree_map::Entry;

use tracing::debug;

use crate::error::{Error, Result};

use super::types::{PersonaId, PersonaRecord, PriorityMap};

// ─────────────────────────────────────────────────────────────────
// Orderable records
// ─────────────────────────────────────────────────────────────────

/// Anything that carries the two ordering keys.
pub trait PersonaLike {
    fn id(&self) -> PersonaId;
    fn display_priority(&self) -> Option<i64>;
}

impl PersonaLike for PersonaRecord {
    fn id(&self) -> PersonaId {
        self.id
    }

    fn display_priority(&self) -> Option<i64> {
        self.display_priority
    }
}

impl<T: PersonaLike + ?Sized> PersonaLike for &T {
    fn id(&self) -> PersonaId {
        (**self).id()
    }

    fn display_priority(&self) -> Option<i64> {
        (**self).display_priority()
    }
}

/// Just the ordering keys of a persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriorityKey {
    pub id: PersonaId,
    pub display_priority: Option<i64>,
}

impl PriorityKey {
    pub fn new(id: PersonaId, display_priority: Option<i64>) -> Self {
        Self {
            id,
            display_priority,
        }
    }
}

impl PersonaLike for PriorityKey {
    fn id(&self) -> PersonaId {
        self.id
    }

    fn display_priority(&self) -> Option<i64> {
        self.display_priority
    }
}

// ─────────────────────────────────────────────────────────────────
// Comparators
// ─────────────────────────────────────────────────────────────────

/// Id tie-break: negatives before positives, then smaller magnitude first.
///
/// The branch order matters and is part of the observable behaviour: built-in
/// records carry negative ids, and this rule decides where they land
/// relative to user-created ones. With equal magnitudes the larger raw value
/// sorts first; for distinct integers that case is only reachable through
/// zero, and for `x == y` it yields `Equal`.
pub fn compare_ids(x: PersonaId, y: PersonaId) -> Ordering {
    if x < 0 && y > 0 {
        return Ordering::Less;
    }
    if x > 0 && y < 0 {
        return Ordering::Greater;
    }

    let abs_x = x.unsigned_abs();
    let abs_y = y.unsigned_abs();
    if abs_x == abs_y {
        return y.cmp(&x);
    }
    abs_x.cmp(&abs_y)
}

/// Total order over personas: `display_priority` ascending with nulls last,
/// then [`compare_ids`].
pub fn persona_comparator<A, B>(a: &A, b: &B) -> Ordering
where
    A: PersonaLike + ?Sized,
    B: PersonaLike + ?Sized,
{
    match (a.display_priority(), b.display_priority()) {
        (None, None) => compare_ids(a.id(), b.id()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(pa), Some(pb)) => pa.cmp(&pb).then_with(|| compare_ids(a.id(), b.id())),
    }
}

/// Sort in place. Stable, so already-sorted input is left untouched.
pub fn sort_personas<T: PersonaLike>(personas: &mut [T]) {
    personas.sort_by(|a, b| persona_comparator(a, b));
}

/// Ids of `personas` in display order.
pub fn sorted_ids<T: PersonaLike>(personas: &[T]) -> Vec<PersonaId> {
    let mut refs: Vec<&T> = personas.iter().collect();
    sort_personas(&mut refs);
    refs.into_iter().map(|p| p.id()).collect()
}

// ─────────────────────────────────────────────────────────────────
// Priority assignment
// ─────────────────────────────────────────────────────────────────

/// Map each id to its zero-based position in `ordered_ids`.
///
/// Fails only if an id appears twice, since the result must be injective.
pub fn assign_priorities(ordered_ids: &[PersonaId]) -> Result<PriorityMap> {
    let mut map = PriorityMap::new();
    for (index, id) in ordered_ids.iter().enumerate() {
        match map.entry(*id) {
            Entry::Vacant(slot) => {
                slot.insert(index as i64);
            }
            Entry::Occupied(_) => return Err(Error::DuplicatePersonaId { id: *id }),
        }
    }

    debug!(count = map.len(), "Assigned display priorities");
    Ok(map)
}

/// Move `id` to `to_index` within `ordered_ids`, shifting the others.
///
/// An index past the end places the persona last.
pub fn move_persona(
    ordered_ids: &[PersonaId],
    id: PersonaId,
    to_index: usize,
) -> Result<Vec<PersonaId>> {
    let from = ordered_ids
        .iter()
        .position(|candidate| *candidate == id)
        .ok_or(Error::PersonaNotFound { id })?;

    let mut reordered = ordered_ids.to_vec();
    let moved = reordered.remove(from);
    let to = to_index.min(reordered.len());
    reordered.insert(to, moved);
    Ok(reordered)
}

/// `requested` followed by the ids of `current` it leaves out that still
/// carry a priority, in `current`'s order.
///
/// `current` must already be in display order. Priorities assigned from the
/// result cannot collide with ones left behind; null-priority personas stay
/// null and keep sorting last.
pub fn complete_order<T: PersonaLike>(requested: &[PersonaId], current: &[T]) -> Vec<PersonaId> {
    let mut full = requested.to_vec();
    full.extend(
        current
            .iter()
            .filter(|p| p.display_priority().is_some() && !requested.contains(&p.id()))
            .map(|p| p.id()),
    );
    full
}

/// Copies of `records` with priorities taken from `map` where present.
pub fn apply_priorities(records: &[PersonaRecord], map: &PriorityMap) -> Vec<PersonaRecord> {
    records
        .iter()
        .map(|record| match map.get(&record.id) {
            Some(priority) => record.clone().with_priority(Some(*priority)),
            None => record.clone(),
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
