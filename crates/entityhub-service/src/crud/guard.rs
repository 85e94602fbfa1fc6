//! Reusable create guards.

use async_trait::async_trait;

use entityhub_core::error::AppError;
use entityhub_core::result::AppResult;
use entityhub_core::traits::{CreateGuard, Entity, Repository};
use entityhub_core::types::QueryFilter;

/// Rejects a create when another stored entity already has the same value
/// in `field`.
///
/// A null candidate value never conflicts. The lookup goes through
/// [`Repository::search`], so it works against any backend.
#[derive(Debug, Clone)]
pub struct UniqueField {
    /// Component reported in the violation context.
    component: &'static str,
    /// Field that must be unique.
    field: &'static str,
    /// Human-readable field name used in messages.
    label: &'static str,
}

impl UniqueField {
    /// Creates a guard for `field`, reporting violations as `label`.
    pub fn new(component: &'static str, field: &'static str, label: &'static str) -> Self {
        Self {
            component,
            field,
            label,
        }
    }
}

#[async_trait]
impl<T: Entity> CreateGuard<T> for UniqueField {
    fn name(&self) -> &str {
        self.field
    }

    async fn check(&self, candidate: &T, repo: &dyn Repository<T>) -> AppResult<()> {
        let value = candidate.field(self.field).ok_or_else(|| {
            AppError::internal(format!("{} has no field '{}'", T::NAME, self.field))
                .in_context(self.component, "add")
        })?;
        if value.is_null() {
            return Ok(());
        }

        let filter = QueryFilter::new().with(self.field, value.clone()).limit(1);
        let existing = repo.search(&filter).await?;
        if existing.total > 0 {
            return Err(AppError::domain_rule(
                self.component,
                "add",
                format!("{} '{value}' is already taken", self.label),
            ));
        }
        Ok(())
    }
}
