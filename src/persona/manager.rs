//! Ordering manager — keeps the displayed persona list and persists reorders.
//!
//! A reorder is applied locally first, then written through the store. If the
//! write fails the list is re-read from the store so the store's order wins,
//! and the write error is returned. There are no retries.

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

use super::ordering::{
    apply_priorities, assign_priorities, complete_order, move_persona, sort_personas,
};
use super::store::PersonaStore;
use super::types::{PersonaId, PersonaRecord, PriorityMap};

pub struct OrderingManager {
    store: Box<dyn PersonaStore>,

    /// Current list in display order.
    personas: Vec<PersonaRecord>,
}

impl OrderingManager {
    pub fn new(store: Box<dyn PersonaStore>) -> Self {
        Self {
            store,
            personas: Vec::new(),
        }
    }

    /// Personas in display order, as of the last refresh or reorder.
    pub fn personas(&self) -> &[PersonaRecord] {
        &self.personas
    }

    pub fn ordered_ids(&self) -> Vec<PersonaId> {
        self.personas.iter().map(|p| p.id).collect()
    }

    /// Replace the local list with the store's records.
    pub async fn refresh(&mut self) -> Result<&[PersonaRecord]> {
        let mut records = self.store.fetch_all().await?;
        sort_personas(&mut records);
        debug!(store = self.store.name(), count = records.len(), "Persona list refreshed");
        self.personas = records;
        Ok(&self.personas)
    }

    /// Persist `new_order` as explicit priorities 0..N-1.
    ///
    /// `new_order` normally holds the ids the user can see. Personas missing
    /// from it that already carry a priority are renumbered after N-1 in their
    /// current order; null-priority personas are left alone.
    pub async fn reorder(&mut self, new_order: &[PersonaId]) -> Result<PriorityMap> {
        if let Some(unknown) = new_order
            .iter()
            .find(|id| !self.personas.iter().any(|p| p.id == **id))
        {
            return Err(Error::PersonaNotFound { id: *unknown });
        }

        let priorities = assign_priorities(&complete_order(new_order, &self.personas))?;

        let mut optimistic = apply_priorities(&self.personas, &priorities);
        sort_personas(&mut optimistic);
        self.personas = optimistic;

        if let Err(e) = self.store.update_display_priorities(&priorities).await {
            warn!(
                store = self.store.name(),
                error = %e.format_for_log(),
                "Failed to save display priorities, reloading from store"
            );
            if let Err(refresh_err) = self.refresh().await {
                warn!(error = %refresh_err.format_for_log(), "Reload after failed save also failed");
            }
            return Err(e);
        }

        info!(store = self.store.name(), count = priorities.len(), "Personas reordered");
        Ok(priorities)
    }

    /// Move one persona within `visible_order` and persist the result.
    pub async fn move_within(
        &mut self,
        visible_order: &[PersonaId],
        id: PersonaId,
        to_index: usize,
    ) -> Result<PriorityMap> {
        let new_order = move_persona(visible_order, id, to_index)?;
        self.reorder(&new_order).await
    }
}
