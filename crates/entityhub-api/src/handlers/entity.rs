//! Collection handlers shared by every entity.
//!
//! Each handler resolves the collection's [`EntityAdapter`] from state and
//! returns its [`Outcome`] as the response. Malformed JSON bodies are
//! reported in the same error body as every other client error.

use std::collections::HashMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, Path, Query, State};

use entityhub_core::config::QueryConfig;
use entityhub_core::traits::{Entity, EntityId};
use entityhub_core::types::QueryFilter;

use crate::adapter::{EntityAdapter, Outcome};
use crate::dto::SearchPage;
use crate::error::ApiResult;
use crate::mapping::ViewMapper;
use crate::state::AppState;

/// GET /api/{collection}
pub async fn list<T, M>(
    State(adapter): State<EntityAdapter<T, M>>,
) -> ApiResult<Outcome<Vec<M::List>>>
where
    T: Entity,
    M: ViewMapper<T>,
    EntityAdapter<T, M>: FromRef<AppState>,
{
    Ok(adapter.get().await?)
}

/// GET /api/{collection}/search
pub async fn search<T, M>(
    State(adapter): State<EntityAdapter<T, M>>,
    State(query): State<QueryConfig>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Outcome<SearchPage<M::List>>>
where
    T: Entity,
    M: ViewMapper<T>,
    EntityAdapter<T, M>: FromRef<AppState>,
{
    let filter = QueryFilter::from_params(params, &query);
    Ok(adapter.search(&filter).await?)
}

/// GET /api/{collection}/{id}
pub async fn get_one<T, M>(
    State(adapter): State<EntityAdapter<T, M>>,
    Path(id): Path<i64>,
) -> ApiResult<Outcome<M::Edit>>
where
    T: Entity,
    M: ViewMapper<T>,
    EntityAdapter<T, M>: FromRef<AppState>,
{
    Ok(adapter.get_by_id(T::Id::from_raw(id)).await?)
}

/// POST /api/{collection}
pub async fn create<T, M>(
    State(adapter): State<EntityAdapter<T, M>>,
    payload: Result<Json<M::Edit>, JsonRejection>,
) -> ApiResult<Outcome<M::Edit>>
where
    T: Entity,
    M: ViewMapper<T>,
    EntityAdapter<T, M>: FromRef<AppState>,
{
    let Json(edit) = payload?;
    Ok(adapter.add(edit).await?)
}

/// PUT /api/{collection}/{id}
pub async fn update<T, M>(
    State(adapter): State<EntityAdapter<T, M>>,
    Path(id): Path<i64>,
    payload: Result<Json<M::Edit>, JsonRejection>,
) -> ApiResult<Outcome<M::Edit>>
where
    T: Entity,
    M: ViewMapper<T>,
    EntityAdapter<T, M>: FromRef<AppState>,
{
    let Json(edit) = payload?;
    Ok(adapter.put(T::Id::from_raw(id), edit).await?)
}

/// DELETE /api/{collection}/{id}
pub async fn remove<T, M>(
    State(adapter): State<EntityAdapter<T, M>>,
    Path(id): Path<i64>,
) -> ApiResult<Outcome<()>>
where
    T: Entity,
    M: ViewMapper<T>,
    EntityAdapter<T, M>: FromRef<AppState>,
{
    Ok(adapter.delete(T::Id::from_raw(id)).await?)
}
