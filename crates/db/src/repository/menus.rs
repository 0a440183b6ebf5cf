//! Menu gateway.
//!
//! Backing functions, in declared parameter order:
//!   menus_listar(busqueda, limit, offset)
//!   menus_obtener(id)
//!   menus_crear(nombre, url, icono, id_padre, orden)
//!   menus_editar(id, nombre, url, icono, id_padre, orden)
//!   menus_eliminar(id)
//!   menus_opciones_listar()
//!   menu_arbol_obtener(id_usuario)
//!
//! Two shapes are specific to this resource: `menus_opciones_listar`
//! returns a plain row-set (no count column) whose `opciones` column is a
//! JSON-encoded string, and `menu_arbol_obtener` returns one row holding
//! the whole pre-serialized navigation tree.

use serde::Deserialize;
use serde_json::json;

use super::{ListParams, MutationOutcome};
use crate::decode::{decode_known_fields, decode_menu_tree, MenuNode};
use crate::invoker::{call, call_single};
use crate::normalize::{classify, Row};
use crate::pagination::Paginated;
use crate::{DbError, FunctionInvoker};

/// Fields accepted by `menus_crear` / `menus_editar`.  Omitted optionals
/// are passed as explicit nulls.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuFields {
    pub nombre: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icono: Option<String>,
    #[serde(default)]
    pub id_padre: Option<i64>,
    #[serde(default)]
    pub orden: Option<i64>,
}

pub async fn list_menus(
    inv: &dyn FunctionInvoker,
    params: &ListParams,
) -> Result<Paginated<Row>, DbError> {
    super::list_paginated(
        inv,
        "menus_listar",
        &[json!(params.busqueda), json!(params.limit), json!(params.offset)],
        params.page(),
    )
    .await
}

/// `None` means "not found" — a normal outcome, not an error.
pub async fn get_menu(inv: &dyn FunctionInvoker, id: i64) -> Result<Option<Row>, DbError> {
    let row = call_single(inv, "menus_obtener", &[json!(id)]).await?;
    Ok(row.map(|r| {
        let mut rows = vec![r];
        decode_known_fields(&mut rows);
        rows.pop().unwrap_or_default()
    }))
}

pub async fn create_menu(
    inv: &dyn FunctionInvoker,
    fields: &MenuFields,
) -> Result<MutationOutcome, DbError> {
    super::mutate(
        inv,
        "menus_crear",
        &[
            json!(fields.nombre),
            json!(fields.url),
            json!(fields.icono),
            json!(fields.id_padre),
            json!(fields.orden),
        ],
    )
    .await
}

pub async fn edit_menu(
    inv: &dyn FunctionInvoker,
    id: i64,
    fields: &MenuFields,
) -> Result<MutationOutcome, DbError> {
    super::mutate(
        inv,
        "menus_editar",
        &[
            json!(id),
            json!(fields.nombre),
            json!(fields.url),
            json!(fields.icono),
            json!(fields.id_padre),
            json!(fields.orden),
        ],
    )
    .await
}

pub async fn delete_menu(inv: &dyn FunctionInvoker, id: i64) -> Result<MutationOutcome, DbError> {
    super::mutate(inv, "menus_eliminar", &[json!(id)]).await
}

/// Plain-list shape: no count column, no envelope.  The `opciones` column
/// is opportunistically decoded on every row.
pub async fn list_menu_options(inv: &dyn FunctionInvoker) -> Result<Vec<Row>, DbError> {
    let mut rows = call(inv, "menus_opciones_listar", &[]).await?;
    decode_known_fields(&mut rows);
    Ok(rows)
}

/// Fetch the navigation tree for one user.  Never fails on upstream
/// payload problems; the worst case is an empty tree.
pub async fn get_menu_tree(
    inv: &dyn FunctionInvoker,
    user_id: i64,
) -> Result<Vec<MenuNode>, DbError> {
    let rows = call(inv, "menu_arbol_obtener", &[json!(user_id)]).await?;
    Ok(decode_menu_tree(classify(rows)))
}
