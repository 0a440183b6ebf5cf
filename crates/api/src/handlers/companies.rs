use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use db::normalize::Row;
use db::repository::companies::{self as repo, CompanyFields};
use db::repository::{ListParams, MutationOutcome};
use db::Paginated;

use super::{fail, not_found, AppState, ErrorResponse};

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<Row>>, ErrorResponse> {
    repo::list_companies(state.invoker.as_ref(), &params)
        .await
        .map(Json)
        .map_err(fail)
}

pub async fn get(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Row>, ErrorResponse> {
    match repo::get_company(state.invoker.as_ref(), id).await {
        Ok(Some(row)) => Ok(Json(row)),
        Ok(None) => Err(not_found()),
        Err(e) => Err(fail(e)),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(fields): Json<CompanyFields>,
) -> Result<(StatusCode, Json<MutationOutcome>), ErrorResponse> {
    repo::create_company(state.invoker.as_ref(), &fields)
        .await
        .map(|outcome| (StatusCode::CREATED, Json(outcome)))
        .map_err(fail)
}

pub async fn edit(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(fields): Json<CompanyFields>,
) -> Result<Json<MutationOutcome>, ErrorResponse> {
    repo::edit_company(state.invoker.as_ref(), id, &fields)
        .await
        .map(Json)
        .map_err(fail)
}

pub async fn delete(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<MutationOutcome>, ErrorResponse> {
    repo::delete_company(state.invoker.as_ref(), id)
        .await
        .map(Json)
        .map_err(fail)
}
