//! Query filter evaluation.
//!
//! [`CompiledFilter`] resolves a [`QueryFilter`] against an entity's field
//! table once; [`evaluate`] then applies it to a snapshot of rows. Both
//! repository backends share the compiled form so that filtering rules are
//! identical regardless of storage:
//!
//! * constraints are equality predicates combined with AND;
//! * each value is coerced to the field's kind first, and a value that
//!   cannot be coerced matches nothing;
//! * unknown field names are ignored;
//! * rows are ordered by identifier ascending;
//! * the total is counted before the page window is applied.

use tracing::debug;

use crate::traits::entity::{Entity, EntityId};
use crate::types::field::FieldValue;
use crate::types::filter::QueryFilter;
use crate::types::pagination::{PageRequest, PagedResult};

/// A single resolved equality constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Field (and storage column) name.
    pub field: &'static str,
    /// Value to compare with; `None` if the filter value could not be
    /// coerced to the field kind.
    pub value: Option<FieldValue>,
}

impl Condition {
    /// Whether this condition can match any row.
    pub fn is_satisfiable(&self) -> bool {
        self.value.is_some()
    }

    /// Evaluate this condition against an entity.
    pub fn matches<T: Entity>(&self, entity: &T) -> bool {
        match (&self.value, entity.field(self.field)) {
            (Some(expected), Some(actual)) => *expected == actual,
            _ => false,
        }
    }
}

/// A query filter resolved against one entity type.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    conditions: Vec<Condition>,
    ignored: Vec<String>,
    window: PageRequest,
}

impl CompiledFilter {
    /// Resolve `filter` against `T::FIELDS`.
    pub fn compile<T: Entity>(filter: &QueryFilter) -> Self {
        let mut conditions = Vec::with_capacity(filter.fields.len());
        let mut ignored = Vec::new();

        for (name, value) in &filter.fields {
            match T::field_def(name) {
                Some(def) => conditions.push(Condition {
                    field: def.name,
                    value: value.coerce(def.kind),
                }),
                None => ignored.push(name.clone()),
            }
        }

        if !ignored.is_empty() {
            debug!(entity = T::NAME, fields = ?ignored, "Ignoring unknown filter fields");
        }

        Self {
            conditions,
            ignored,
            window: filter.page_request(),
        }
    }

    /// Resolved constraints, in field-name order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Filter keys that did not name a field.
    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }

    /// The clamped page window.
    pub fn window(&self) -> PageRequest {
        self.window
    }

    /// Whether some constraint can never match.
    pub fn is_unsatisfiable(&self) -> bool {
        self.conditions.iter().any(|c| !c.is_satisfiable())
    }

    /// Whether `entity` satisfies every constraint.
    pub fn matches<T: Entity>(&self, entity: &T) -> bool {
        self.conditions.iter().all(|c| c.matches(entity))
    }
}

/// Evaluate `filter` over `rows` without mutating them.
///
/// `rows` is the snapshot; callers holding a lock should keep it for the
/// duration of this call so the page and the total agree.
pub fn evaluate<'a, T, I>(filter: &QueryFilter, rows: I) -> PagedResult<T>
where
    T: Entity,
    I: IntoIterator<Item = &'a T>,
{
    let compiled = CompiledFilter::compile::<T>(filter);
    evaluate_compiled(&compiled, rows)
}

/// Evaluate an already compiled filter over `rows`.
pub fn evaluate_compiled<'a, T, I>(compiled: &CompiledFilter, rows: I) -> PagedResult<T>
where
    T: Entity,
    I: IntoIterator<Item = &'a T>,
{
    let window = compiled.window();
    if compiled.is_unsatisfiable() {
        return PagedResult::empty(window);
    }

    let mut matched: Vec<&T> = rows.into_iter().filter(|e| compiled.matches(*e)).collect();
    matched.sort_by_key(|e| e.id().raw());

    let total = matched.len() as u64;
    let offset = usize::try_from(window.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(window.limit()).unwrap_or(usize::MAX);

    let items = matched
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();

    PagedResult::new(items, total, window)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::types::field::FieldDef;
    use crate::types::filter::FilterValue;
    use crate::types::id::TeamId;
    use crate::types::validation::ValidationResult;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Widget {
        id: TeamId,
        name: String,
        size: i64,
        shiny: bool,
    }

    impl Entity for Widget {
        type Id = TeamId;
        const NAME: &'static str = "widgets";
        const FIELDS: &'static [FieldDef] = &[
            FieldDef::integer("id"),
            FieldDef::text("name"),
            FieldDef::integer("size"),
            FieldDef::bool("shiny"),
        ];

        fn id(&self) -> TeamId {
            self.id
        }

        fn set_id(&mut self, id: TeamId) {
            self.id = id;
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "id" => Some(FieldValue::Integer(self.id.raw())),
                "name" => Some(self.name.as_str().into()),
                "size" => Some(self.size.into()),
                "shiny" => Some(self.shiny.into()),
                _ => None,
            }
        }

        fn validate(&self) -> ValidationResult {
            ValidationResult::valid()
        }
    }

    fn widgets(n: i64) -> Vec<Widget> {
        // Reverse insertion order to prove the engine sorts by id.
        (1..=n)
            .rev()
            .map(|i| Widget {
                id: TeamId::new(i),
                name: format!("w{i}"),
                size: i % 3,
                shiny: i % 2 == 0,
            })
            .collect()
    }

    fn ids(page: &PagedResult<Widget>) -> Vec<i64> {
        page.items.iter().map(|w| w.id.raw()).collect()
    }

    #[test]
    fn test_pages_are_disjoint_and_complete() {
        let rows = widgets(25);
        let mut seen = HashSet::new();
        let mut sizes = Vec::new();

        for page in 1..=3 {
            let result = evaluate(&QueryFilter::new().page(page).limit(10), &rows);
            assert_eq!(result.total, 25);
            sizes.push(result.items.len());
            for id in ids(&result) {
                assert!(seen.insert(id), "id {id} appeared on two pages");
            }
            let again = evaluate(&QueryFilter::new().page(page).limit(10), &rows);
            assert_eq!(ids(&result), ids(&again));
        }

        assert_eq!(sizes, vec![10, 10, 5]);
        assert_eq!(seen.len(), 25);
    }

    #[test]
    fn test_page_is_ordered_by_id() {
        let rows = widgets(8);
        let result = evaluate(&QueryFilter::new().limit(100), &rows);
        assert_eq!(ids(&result), (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_conditions_are_anded() {
        let rows = widgets(12);
        let filter = QueryFilter::new()
            .with("size", "0")
            .with("shiny", FilterValue::Boolean(true))
            .limit(50);
        let result = evaluate(&filter, &rows);
        assert_eq!(ids(&result), vec![6, 12]);
        assert_eq!(result.total, 2);
    }

    #[test]
    fn test_total_counts_unpaged_set() {
        let rows = widgets(30);
        let result = evaluate(&QueryFilter::new().with("shiny", "true").limit(4), &rows);
        assert_eq!(result.total, 15);
        assert_eq!(result.items.len(), 4);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let rows = widgets(5);
        let filter = QueryFilter::new().with("colour", "red").limit(10);
        let compiled = CompiledFilter::compile::<Widget>(&filter);
        assert_eq!(compiled.ignored(), ["colour".to_string()]);
        assert_eq!(evaluate(&filter, &rows).total, 5);
    }

    #[test]
    fn test_uncoercible_value_matches_nothing() {
        let rows = widgets(5);
        let result = evaluate(&QueryFilter::new().with("size", "big"), &rows);
        assert_eq!(result.total, 0);
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_bad_window_is_clamped() {
        let rows = widgets(5);
        let result = evaluate(&QueryFilter::new().page(0).limit(0), &rows);
        assert_eq!(result.page, 1);
        assert_eq!(result.limit, 1);
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let rows = widgets(5);
        let result = evaluate(&QueryFilter::new().page(9).limit(10), &rows);
        assert!(result.items.is_empty());
        assert_eq!(result.total, 5);
    }

    #[test]
    fn test_bounds_hold_for_varied_filters() {
        let rows = widgets(40);
        let filters = [
            QueryFilter::new(),
            QueryFilter::new().limit(1),
            QueryFilter::new().limit(7).page(3),
            QueryFilter::new().with("size", 2i64).limit(3),
            QueryFilter::new().with("name", "w13"),
            QueryFilter::new().with("name", "missing"),
            QueryFilter::new().with("nope", "x").page(100),
        ];
        for filter in filters {
            let result = evaluate(&filter, &rows);
            assert!(result.items.len() as u64 <= filter.page_request().limit());
            assert!(result.total >= result.items.len() as u64);
        }
    }

    #[test]
    fn test_does_not_mutate_rows() {
        let rows = widgets(6);
        let before = rows.clone();
        let _ = evaluate(&QueryFilter::new().with("shiny", "false"), &rows);
        assert_eq!(rows, before);
    }
}
