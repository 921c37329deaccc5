//! Process-local datastore with the same contract as Postgres. Used with
//! `GRIMOIRE_STORE=memory` and by the test suite.

use super::{HealthCheck, Repository};
use crate::error::AppError;
use crate::models::{Desire, Dream, Resource, RitualReminder, Spell};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

/// One table: rows by id and the id sequence.
pub struct MemoryTable<R> {
    rows: RwLock<BTreeMap<i64, R>>,
    next_id: AtomicI64,
}

impl<R> Default for MemoryTable<R> {
    fn default() -> Self {
        MemoryTable {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    spells: MemoryTable<Spell>,
    dreams: MemoryTable<Dream>,
    desires: MemoryTable<Desire>,
    rituals: MemoryTable<RitualReminder>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Selects the table holding `R`.
pub trait HasTable<R> {
    fn table(&self) -> &MemoryTable<R>;
}

impl HasTable<Spell> for MemoryStore {
    fn table(&self) -> &MemoryTable<Spell> {
        &self.spells
    }
}

impl HasTable<Dream> for MemoryStore {
    fn table(&self) -> &MemoryTable<Dream> {
        &self.dreams
    }
}

impl HasTable<Desire> for MemoryStore {
    fn table(&self) -> &MemoryTable<Desire> {
        &self.desires
    }
}

impl HasTable<RitualReminder> for MemoryStore {
    fn table(&self) -> &MemoryTable<RitualReminder> {
        &self.rituals
    }
}

#[async_trait]
impl<R> Repository<R> for MemoryStore
where
    R: Resource,
    MemoryStore: HasTable<R>,
{
    async fn list_all(&self) -> Result<Vec<R>, AppError> {
        let rows = <Self as HasTable<R>>::table(self).rows.read().await;
        let mut out: Vec<R> = rows.values().cloned().collect();
        out.sort_by(R::listing_order);
        Ok(out)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<R>, AppError> {
        Ok(<Self as HasTable<R>>::table(self).rows.read().await.get(&id).cloned())
    }

    async fn create(&self, input: R::Create) -> Result<R, AppError> {
        let table = <Self as HasTable<R>>::table(self);
        let id = table.next_id.fetch_add(1, Ordering::SeqCst);
        let row = R::materialize(id, Utc::now(), input);
        table.rows.write().await.insert(id, row.clone());
        tracing::debug!(id, "memory insert");
        Ok(row)
    }

    async fn update(&self, id: i64, patch: R::Patch) -> Result<Option<R>, AppError> {
        let mut rows = <Self as HasTable<R>>::table(self).rows.write().await;
        Ok(rows.get_mut(&id).map(|row| {
            row.apply(patch);
            row.clone()
        }))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(<Self as HasTable<R>>::table(self).rows.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
