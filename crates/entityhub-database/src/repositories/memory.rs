//! Process-local repository backed by an ordered map.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use entityhub_core::error::AppError;
use entityhub_core::query;
use entityhub_core::result::AppResult;
use entityhub_core::traits::{Entity, EntityId, Repository};
use entityhub_core::types::{FieldValue, PagedResult, QueryFilter};

const COMPONENT: &str = "MemoryRepository";

struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T: Entity> Table<T> {
    /// The first unique key `entity` shares with a row other than itself.
    fn conflict(&self, unique: &[&'static str], entity: &T) -> Option<(&'static str, FieldValue)> {
        let id = entity.id().raw();
        unique.iter().find_map(|&field| {
            let value = entity.field(field).filter(|v| !v.is_null())?;
            self.rows
                .iter()
                .any(|(row_id, row)| *row_id != id && row.field(field).as_ref() == Some(&value))
                .then_some((field, value))
        })
    }
}

/// In-memory repository for any [`Entity`].
///
/// Rows are keyed by raw identifier, so iteration is already in id order.
/// Writes take the write lock; searches evaluate under a single read lock,
/// so a page and its total always come from the same snapshot.
///
/// Unique keys are checked under the write lock, matching the UNIQUE
/// constraints of the Postgres schema.
pub struct MemoryRepository<T: Entity> {
    table: RwLock<Table<T>>,
    unique: Vec<&'static str>,
}

impl<T: Entity> MemoryRepository<T> {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
            unique: Vec::new(),
        }
    }

    /// Reject writes that would give two rows the same non-null `field`.
    pub fn with_unique_key(mut self, field: &'static str) -> Self {
        self.unique.push(field);
        self
    }

    fn check_unique(&self, table: &Table<T>, entity: &T, operation: &str) -> AppResult<()> {
        match table.conflict(&self.unique, entity) {
            Some((field, value)) => {
                debug!(entity = T::NAME, field, %value, operation, "Unique key conflict");
                Err(AppError::domain_rule(
                    COMPONENT,
                    operation,
                    format!("A {} row with {field} '{value}' already exists", T::NAME),
                ))
            }
            None => Ok(()),
        }
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// Whether the repository holds no rows.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> fmt::Debug for MemoryRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRepository")
            .field("entity", &T::NAME)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn get(&self) -> AppResult<Vec<T>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: T::Id) -> AppResult<Option<T>> {
        Ok(self.table.read().await.rows.get(&id.raw()).cloned())
    }

    async fn search(&self, filter: &QueryFilter) -> AppResult<PagedResult<T>> {
        let table = self.table.read().await;
        Ok(query::evaluate(filter, table.rows.values()))
    }

    async fn add(&self, mut entity: T) -> AppResult<T> {
        let mut table = self.table.write().await;
        entity.set_id(T::Id::UNSET);
        self.check_unique(&table, &entity, "add")?;
        table.last_id += 1;
        let id = T::Id::from_raw(table.last_id);
        entity.set_id(id);
        table.rows.insert(id.raw(), entity.clone());
        debug!(entity = T::NAME, %id, "Row inserted");
        Ok(entity)
    }

    async fn update(&self, entity: T) -> AppResult<T> {
        let id = entity.id();
        let mut table = self.table.write().await;
        if table.rows.contains_key(&id.raw()) {
            self.check_unique(&table, &entity, "update")?;
        }
        match table.rows.get_mut(&id.raw()) {
            Some(row) => {
                *row = entity.clone();
                debug!(entity = T::NAME, %id, "Row updated");
                Ok(entity)
            }
            None => Err(AppError::not_found(format!("{} {id} not found", T::NAME))
                .in_context(COMPONENT, "update")),
        }
    }

    async fn delete_by_id(&self, id: T::Id) -> AppResult<()> {
        let removed = self.table.write().await.rows.remove(&id.raw());
        debug!(entity = T::NAME, %id, removed = removed.is_some(), "Row deleted");
        Ok(())
    }
}
