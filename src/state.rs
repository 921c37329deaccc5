//! Shared application state: one repository handle per resource, all backed by
//! the datastore built once at startup.

use crate::models::{Desire, Dream, RitualReminder, Spell};
use crate::store::{HealthCheck, MemoryStore, PgStore, Repository};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub spells: Arc<dyn Repository<Spell>>,
    pub dreams: Arc<dyn Repository<Dream>>,
    pub desires: Arc<dyn Repository<Desire>>,
    pub rituals: Arc<dyn Repository<RitualReminder>>,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Wire every repository to the same datastore.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: Repository<Spell>
            + Repository<Dream>
            + Repository<Desire>
            + Repository<RitualReminder>
            + HealthCheck
            + 'static,
    {
        AppState {
            spells: store.clone(),
            dreams: store.clone(),
            desires: store.clone(),
            rituals: store.clone(),
            health: store,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::from_store(Arc::new(PgStore::new(pool)))
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }
}
