//! Permission (permiso) gateway.
//!
//! Backing functions, in declared parameter order:
//!   permisos_listar(busqueda, limit, offset)
//!   permisos_obtener(id)
//!   permisos_crear(nombre, clave, descripcion)
//!   permisos_editar(id, nombre, clave, descripcion)
//!   permisos_eliminar(id)

use serde::Deserialize;
use serde_json::json;

use super::{ListParams, MutationOutcome};
use crate::invoker::call_single;
use crate::normalize::Row;
use crate::pagination::Paginated;
use crate::{DbError, FunctionInvoker};

/// Fields accepted by `permisos_crear` / `permisos_editar`.
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionFields {
    pub nombre: String,
    pub clave: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}

pub async fn list_permissions(
    inv: &dyn FunctionInvoker,
    params: &ListParams,
) -> Result<Paginated<Row>, DbError> {
    super::list_paginated(
        inv,
        "permisos_listar",
        &[json!(params.busqueda), json!(params.limit), json!(params.offset)],
        params.page(),
    )
    .await
}

/// `None` means "not found" — a normal outcome, not an error.
pub async fn get_permission(inv: &dyn FunctionInvoker, id: i64) -> Result<Option<Row>, DbError> {
    call_single(inv, "permisos_obtener", &[json!(id)]).await
}

pub async fn create_permission(
    inv: &dyn FunctionInvoker,
    fields: &PermissionFields,
) -> Result<MutationOutcome, DbError> {
    super::mutate(
        inv,
        "permisos_crear",
        &[json!(fields.nombre), json!(fields.clave), json!(fields.descripcion)],
    )
    .await
}

pub async fn edit_permission(
    inv: &dyn FunctionInvoker,
    id: i64,
    fields: &PermissionFields,
) -> Result<MutationOutcome, DbError> {
    super::mutate(
        inv,
        "permisos_editar",
        &[
            json!(id),
            json!(fields.nombre),
            json!(fields.clave),
            json!(fields.descripcion),
        ],
    )
    .await
}

pub async fn delete_permission(
    inv: &dyn FunctionInvoker,
    id: i64,
) -> Result<MutationOutcome, DbError> {
    super::mutate(inv, "permisos_eliminar", &[json!(id)]).await
}
