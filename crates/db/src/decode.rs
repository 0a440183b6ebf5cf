//! Opportunistic JSON-in-string decoding and the menu-tree decoder.
//!
//! Some stored functions embed serialized JSON inside text columns: the
//! menu tree comes back as one row holding one pre-built JSON document, and
//! menu rows carry an `opciones` column encoding a collection.  Both cases
//! share one rule: try to parse, and on failure degrade (raw string kept,
//! or empty tree) — a menu fetch never fails because of malformed upstream
//! JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::normalize::{Normalized, Row};

/// Columns that are conventionally JSON-encoded strings.  An explicit
/// allow-list, so ordinary strings that happen to look like JSON are never
/// parsed by accident.
pub const DECODED_FIELDS: &[&str] = &["opciones"];

/// If `value` is a string that parses as JSON, the parsed value; otherwise
/// the original value untouched.
pub fn try_parse(value: Value) -> Value {
    match value {
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(parsed) => parsed,
            Err(_) => Value::String(s),
        },
        other => other,
    }
}

/// Apply `try_parse` to every allow-listed column, on every row.
pub fn decode_known_fields(rows: &mut [Row]) {
    for row in rows.iter_mut() {
        for field in DECODED_FIELDS {
            if let Some(value) = row.remove(*field) {
                row.insert((*field).to_string(), try_parse(value));
            }
        }
    }
}

/// One node of the navigation menu.  `hijos` ownership is exclusive: the
/// tree is rebuilt fresh from the serialized payload on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: i64,
    /// Upstream trees sometimes omit labels on structural nodes.
    #[serde(default)]
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icono: Option<String>,
    /// The wire spelling is camelCase (`idPadre`); the snake_case form is
    /// also accepted.
    #[serde(default, alias = "idPadre", skip_serializing_if = "Option::is_none")]
    pub id_padre: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orden: Option<i64>,
    #[serde(default)]
    pub estado: bool,
    #[serde(default)]
    pub hijos: Vec<MenuNode>,
}

/// Decode the serialized menu tree out of a classified result.
///
/// Anything other than a well-formed tree yields an empty sequence — the
/// contract is that a menu fetch never fails on upstream payload problems.
/// "No menu" and "broken menu" both produce `vec![]` but emit distinct
/// diagnostics so operators can tell them apart.
pub fn decode_menu_tree(result: Normalized) -> Vec<MenuNode> {
    match result {
        Normalized::NestedJson(value) => match serde_json::from_value::<Vec<MenuNode>>(value) {
            Ok(tree) => tree,
            Err(err) => {
                warn!(error = %err, "malformed menu payload, returning empty tree");
                Vec::new()
            }
        },
        Normalized::Empty => {
            warn!("empty menu result, returning empty tree");
            Vec::new()
        }
        other => {
            warn!(shape = ?shape_name(&other), "unexpected menu result shape, returning empty tree");
            Vec::new()
        }
    }
}

fn shape_name(n: &Normalized) -> &'static str {
    match n {
        Normalized::Empty => "empty",
        Normalized::Single(_) => "single",
        Normalized::List(_) => "list",
        Normalized::Paginated { .. } => "paginated",
        Normalized::NestedJson(_) => "nested_json",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::classify;
    use serde_json::json;

    fn row(v: Value) -> Row {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn json_string_is_parsed() {
        assert_eq!(try_parse(json!("[\"a\",\"b\"]")), json!(["a", "b"]));
    }

    #[test]
    fn non_json_string_passes_through() {
        assert_eq!(try_parse(json!("not json")), json!("not json"));
    }

    #[test]
    fn non_string_values_pass_through() {
        assert_eq!(try_parse(json!(42)), json!(42));
        assert_eq!(try_parse(Value::Null), Value::Null);
    }

    #[test]
    fn opciones_decodes_on_every_row_not_just_the_first() {
        let mut rows = vec![
            row(json!({"id": 1, "opciones": "[\"a\",\"b\"]"})),
            row(json!({"id": 2, "opciones": "[\"c\"]"})),
            row(json!({"id": 3, "opciones": "not json"})),
        ];
        decode_known_fields(&mut rows);
        assert_eq!(rows[0]["opciones"], json!(["a", "b"]));
        assert_eq!(rows[1]["opciones"], json!(["c"]));
        assert_eq!(rows[2]["opciones"], json!("not json"));
    }

    #[test]
    fn non_allowlisted_json_looking_fields_are_left_alone() {
        let mut rows = vec![row(json!({"id": 1, "nombre": "[\"looks\",\"like\",\"json\"]"}))];
        decode_known_fields(&mut rows);
        assert_eq!(rows[0]["nombre"], json!("[\"looks\",\"like\",\"json\"]"));
    }

    #[test]
    fn serialized_tree_decodes_to_menu_nodes() {
        let rows = vec![row(json!({
            "arbol": "[{\"id\":1,\"nombre\":\"Inicio\",\"estado\":true,\"hijos\":[{\"id\":2,\"nombre\":\"Reportes\",\"id_padre\":1,\"orden\":1,\"estado\":true,\"hijos\":[]}]}]"
        }))];
        let tree = decode_menu_tree(classify(rows));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, 1);
        assert_eq!(tree[0].nombre, "Inicio");
        assert_eq!(tree[0].hijos.len(), 1);
        assert_eq!(tree[0].hijos[0].id_padre, Some(1));
        assert!(tree[0].hijos[0].hijos.is_empty());
    }

    #[test]
    fn minimal_tree_literal_from_the_wire() {
        let rows = vec![row(json!({"arbol": "[{\"id\":1,\"hijos\":[]}]"}))];
        let tree = decode_menu_tree(classify(rows));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, 1);
        assert!(tree[0].hijos.is_empty());
    }

    #[test]
    fn camel_case_parent_key_is_decoded() {
        let rows = vec![row(json!({
            "arbol": "[{\"id\":1,\"idPadre\":5,\"hijos\":[]}]"
        }))];
        let tree = decode_menu_tree(classify(rows));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id_padre, Some(5));
    }

    #[test]
    fn malformed_payload_yields_empty_tree_without_panic() {
        let rows = vec![row(json!({"arbol": "{invalid"}))];
        let tree = decode_menu_tree(classify(rows));
        assert!(tree.is_empty());
    }

    #[test]
    fn empty_result_yields_empty_tree() {
        let tree = decode_menu_tree(classify(vec![]));
        assert!(tree.is_empty());
    }
}
