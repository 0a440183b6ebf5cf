use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use db::decode::MenuNode;
use db::normalize::Row;
use db::repository::menus::{self as repo, MenuFields};
use db::repository::{ListParams, MutationOutcome};
use db::Paginated;

use super::{fail, not_found, AppState, ErrorResponse};

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<Row>>, ErrorResponse> {
    repo::list_menus(state.invoker.as_ref(), &params)
        .await
        .map(Json)
        .map_err(fail)
}

pub async fn get(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Row>, ErrorResponse> {
    match repo::get_menu(state.invoker.as_ref(), id).await {
        Ok(Some(row)) => Ok(Json(row)),
        Ok(None) => Err(not_found()),
        Err(e) => Err(fail(e)),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(fields): Json<MenuFields>,
) -> Result<(StatusCode, Json<MutationOutcome>), ErrorResponse> {
    repo::create_menu(state.invoker.as_ref(), &fields)
        .await
        .map(|outcome| (StatusCode::CREATED, Json(outcome)))
        .map_err(fail)
}

pub async fn edit(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(fields): Json<MenuFields>,
) -> Result<Json<MutationOutcome>, ErrorResponse> {
    repo::edit_menu(state.invoker.as_ref(), id, &fields)
        .await
        .map(Json)
        .map_err(fail)
}

pub async fn delete(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<MutationOutcome>, ErrorResponse> {
    repo::delete_menu(state.invoker.as_ref(), id)
        .await
        .map(Json)
        .map_err(fail)
}

/// Plain list — no pagination envelope.
pub async fn options(State(state): State<AppState>) -> Result<Json<Vec<Row>>, ErrorResponse> {
    repo::list_menu_options(state.invoker.as_ref())
        .await
        .map(Json)
        .map_err(fail)
}

/// The tree is always a 200, possibly empty: upstream payload problems are
/// absorbed by the gateway, only transport failures surface.
pub async fn tree(
    Path(user_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<MenuNode>>, ErrorResponse> {
    repo::get_menu_tree(state.invoker.as_ref(), user_id)
        .await
        .map(Json)
        .map_err(fail)
}
