//! PostgreSQL repository for any entity whose rows sqlx can decode.
//!
//! Statements are assembled from `T::NAME` and `T::FIELDS` only; filter
//! keys that are not declared fields never reach SQL text, and every value
//! is sent as a bind parameter.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;

use entityhub_core::error::{AppError, ErrorKind};
use entityhub_core::query::{CompiledFilter, Condition};
use entityhub_core::result::AppResult;
use entityhub_core::traits::entity::ID_FIELD;
use entityhub_core::traits::{Entity, EntityId, Repository};
use entityhub_core::types::{FieldValue, PagedResult, QueryFilter};

const COMPONENT: &str = "PgRepository";

/// Generic sqlx-backed repository.
pub struct PgRepository<T> {
    pool: PgPool,
    _entity: PhantomData<fn() -> T>,
}

impl<T> PgRepository<T> {
    /// Create a repository over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

impl<T> Clone for PgRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<T: Entity> fmt::Debug for PgRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgRepository")
            .field("table", &T::NAME)
            .finish_non_exhaustive()
    }
}

/// Map a sqlx error, turning unique-constraint hits into domain-rule
/// violations so racing creates surface like guard failures.
fn db_error<T: Entity>(operation: &str, err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or("unique key").to_string();
            return AppError::domain_rule(
                COMPONENT,
                operation,
                format!("A {} row violating {constraint} already exists", T::NAME),
            );
        }
    }
    AppError::with_source(
        ErrorKind::Database,
        format!("Failed to {operation} {}", T::NAME),
        err,
    )
    .in_context(COMPONENT, operation)
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: FieldValue) {
    match value {
        FieldValue::Null => qb.push_bind(None::<String>),
        FieldValue::Bool(b) => qb.push_bind(b),
        FieldValue::Integer(i) => qb.push_bind(i),
        FieldValue::Float(x) => qb.push_bind(x),
        FieldValue::Text(s) => qb.push_bind(s),
    };
}

/// Append `WHERE a = $1 AND b IS NULL ...`; an uncoercible value becomes `FALSE`.
fn push_where(qb: &mut QueryBuilder<'_, Postgres>, conditions: &[Condition]) {
    for (i, condition) in conditions.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match &condition.value {
            Some(FieldValue::Null) => {
                qb.push(condition.field);
                qb.push(" IS NULL");
            }
            Some(value) => {
                qb.push(condition.field);
                qb.push(" = ");
                push_value(qb, value.clone());
            }
            None => {
                qb.push("FALSE");
            }
        }
    }
}

/// The value an entity stores in a column; declared fields always resolve.
fn column_value<T: Entity>(entity: &T, column: &str) -> FieldValue {
    entity.field(column).unwrap_or(FieldValue::Null)
}

#[async_trait]
impl<T> Repository<T> for PgRepository<T>
where
    T: Entity + for<'r> FromRow<'r, PgRow> + Unpin,
{
    async fn get(&self) -> AppResult<Vec<T>> {
        let sql = format!("SELECT * FROM {} ORDER BY {ID_FIELD} ASC", T::NAME);
        sqlx::query_as::<_, T>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error::<T>("get", e))
    }

    async fn get_by_id(&self, id: T::Id) -> AppResult<Option<T>> {
        let sql = format!("SELECT * FROM {} WHERE {ID_FIELD} = $1", T::NAME);
        sqlx::query_as::<_, T>(&sql)
            .bind(id.raw())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error::<T>("get_by_id", e))
    }

    async fn search(&self, filter: &QueryFilter) -> AppResult<PagedResult<T>> {
        let compiled = CompiledFilter::compile::<T>(filter);
        let window = compiled.window();
        if compiled.is_unsatisfiable() {
            return Ok(PagedResult::empty(window));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error::<T>("search", e))?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error::<T>("search", e))?;

        let mut count = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {}", T::NAME));
        push_where(&mut count, compiled.conditions());
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db_error::<T>("search", e))?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT * FROM {}", T::NAME));
        push_where(&mut select, compiled.conditions());
        select.push(format!(" ORDER BY {ID_FIELD} ASC LIMIT "));
        select.push_bind(i64::try_from(window.limit()).unwrap_or(i64::MAX));
        select.push(" OFFSET ");
        select.push_bind(i64::try_from(window.offset()).unwrap_or(i64::MAX));
        let items = select
            .build_query_as::<T>()
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| db_error::<T>("search", e))?;

        tx.commit().await.map_err(|e| db_error::<T>("search", e))?;

        debug!(
            table = T::NAME,
            total,
            returned = items.len(),
            "Search executed"
        );
        Ok(PagedResult::new(items, total.max(0) as u64, window))
    }

    async fn add(&self, entity: T) -> AppResult<T> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("INSERT INTO {} (", T::NAME));
        let mut columns = qb.separated(", ");
        for def in T::data_fields() {
            columns.push(def.name);
        }
        qb.push(") VALUES (");
        let mut values = qb.separated(", ");
        for def in T::data_fields() {
            match column_value(&entity, def.name) {
                FieldValue::Null => values.push_bind(None::<String>),
                FieldValue::Bool(b) => values.push_bind(b),
                FieldValue::Integer(i) => values.push_bind(i),
                FieldValue::Float(x) => values.push_bind(x),
                FieldValue::Text(s) => values.push_bind(s),
            };
        }
        qb.push(") RETURNING *");

        let stored = qb
            .build_query_as::<T>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error::<T>("add", e))?;

        debug!(table = T::NAME, id = %stored.id(), "Row inserted");
        Ok(stored)
    }

    async fn update(&self, entity: T) -> AppResult<T> {
        let id = entity.id();
        let mut qb = QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", T::NAME));
        for (i, def) in T::data_fields().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(def.name);
            qb.push(" = ");
            push_value(&mut qb, column_value(&entity, def.name));
        }
        qb.push(format!(" WHERE {ID_FIELD} = "));
        qb.push_bind(id.raw());
        qb.push(" RETURNING *");

        qb.build_query_as::<T>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error::<T>("update", e))?
            .ok_or_else(|| {
                AppError::not_found(format!("{} {id} not found", T::NAME))
                    .in_context(COMPONENT, "update")
            })
    }

    async fn delete_by_id(&self, id: T::Id) -> AppResult<()> {
        let sql = format!("DELETE FROM {} WHERE {ID_FIELD} = $1", T::NAME);
        let result = sqlx::query(&sql)
            .bind(id.raw())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error::<T>("delete", e))?;

        debug!(table = T::NAME, %id, removed = result.rows_affected(), "Row deleted");
        Ok(())
    }
}
