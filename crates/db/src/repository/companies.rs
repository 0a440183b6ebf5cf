//! Company (empresa) gateway.
//!
//! Backing functions, in declared parameter order:
//!   empresas_listar(busqueda, limit, offset)
//!   empresas_obtener(id)
//!   empresas_crear(nombre, ruc, direccion, telefono)
//!   empresas_editar(id, nombre, ruc, direccion, telefono)
//!   empresas_eliminar(id)

use serde::Deserialize;
use serde_json::json;

use super::{ListParams, MutationOutcome};
use crate::invoker::call_single;
use crate::normalize::Row;
use crate::pagination::Paginated;
use crate::{DbError, FunctionInvoker};

/// Fields accepted by `empresas_crear`.  Omitted optionals are passed to
/// the function as explicit nulls, never dropped positionally.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyFields {
    pub nombre: String,
    pub ruc: String,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
}

pub async fn list_companies(
    inv: &dyn FunctionInvoker,
    params: &ListParams,
) -> Result<Paginated<Row>, DbError> {
    super::list_paginated(
        inv,
        "empresas_listar",
        &[json!(params.busqueda), json!(params.limit), json!(params.offset)],
        params.page(),
    )
    .await
}

/// `None` means "not found" — a normal outcome, not an error.
pub async fn get_company(inv: &dyn FunctionInvoker, id: i64) -> Result<Option<Row>, DbError> {
    call_single(inv, "empresas_obtener", &[json!(id)]).await
}

pub async fn create_company(
    inv: &dyn FunctionInvoker,
    fields: &CompanyFields,
) -> Result<MutationOutcome, DbError> {
    super::mutate(
        inv,
        "empresas_crear",
        &[
            json!(fields.nombre),
            json!(fields.ruc),
            json!(fields.direccion),
            json!(fields.telefono),
        ],
    )
    .await
}

pub async fn edit_company(
    inv: &dyn FunctionInvoker,
    id: i64,
    fields: &CompanyFields,
) -> Result<MutationOutcome, DbError> {
    super::mutate(
        inv,
        "empresas_editar",
        &[
            json!(id),
            json!(fields.nombre),
            json!(fields.ruc),
            json!(fields.direccion),
            json!(fields.telefono),
        ],
    )
    .await
}

pub async fn delete_company(
    inv: &dyn FunctionInvoker,
    id: i64,
) -> Result<MutationOutcome, DbError> {
    super::mutate(inv, "empresas_eliminar", &[json!(id)]).await
}
