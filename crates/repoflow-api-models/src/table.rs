//! Presentation contract shared by the API DTOs and the CLI table renderer.
//!
//! # Design
//! - Each DTO declares its own column list through [`Record`]; there is no
//!   runtime introspection of field names.
//! - [`Renderable`] describes how a whole result maps onto a table so the
//!   renderer can normalise lone records and sequences the same way.

use std::fmt::Display;

use serde::Serialize;
use serde_json::{Map, Value};

/// Placeholder rendered for optional values that are absent.
pub const ABSENT: &str = "<nil>";

/// A flat value that renders as one table row.
pub trait Record {
    /// Ordered `(header, value)` pairs.
    ///
    /// Headers are the wire (serialisation) names in declaration order; the
    /// renderer upper-cases them.
    fn fields(&self) -> Vec<(&str, String)>;
}

/// How a result value maps onto a table.
pub enum Shape<'a> {
    /// A lone record, rendered exactly like a one-element sequence.
    Record(&'a dyn Record),
    /// An ordered sequence of records.
    Records(Vec<&'a dyn Record>),
    /// A value without a tabular form, labelled for diagnostics.
    Opaque(&'static str),
}

/// A result value accepted by every output mode.
pub trait Renderable: Serialize {
    /// Describe how this value maps onto a table.
    fn shape(&self) -> Shape<'_>;
}

impl<T: Record + Serialize> Renderable for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::Records(self.iter().map(|item| item as &dyn Record).collect())
    }
}

impl<T: Record + Serialize> Renderable for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        self.as_slice().shape()
    }
}

impl Record for Map<String, Value> {
    fn fields(&self) -> Vec<(&str, String)> {
        self.iter()
            .map(|(key, value)| (key.as_str(), value_cell(value)))
            .collect()
    }
}

impl Renderable for Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            Self::Object(map) => Shape::Record(map),
            Self::Array(items) => items
                .iter()
                .map(|item| match item {
                    Self::Object(map) => Some(map as &dyn Record),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map_or(Shape::Opaque("array of scalars"), Shape::Records),
            Self::Null => Shape::Opaque("null"),
            Self::Bool(_) => Shape::Opaque("boolean"),
            Self::Number(_) => Shape::Opaque("number"),
            Self::String(_) => Shape::Opaque("string"),
        }
    }
}

impl<T: Renderable> Renderable for Option<T> {
    fn shape(&self) -> Shape<'_> {
        self.as_ref().map_or(Shape::Opaque("null"), Renderable::shape)
    }
}

/// Stringify an optional value, rendering [`ABSENT`] when there is none.
#[must_use]
pub fn optional_cell<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| ABSENT.to_string(), ToString::to_string)
}

/// Stringify a list as `[a b c]`.
#[must_use]
pub fn list_cell<T: Display>(items: &[T]) -> String {
    let inner = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    format!("[{inner}]")
}

fn value_cell(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => ABSENT.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_cell_marks_absent_values() {
        assert_eq!(optional_cell::<i64>(None), "<nil>");
        assert_eq!(optional_cell(Some(&0_i64)), "0");
    }

    #[test]
    fn list_cell_joins_with_spaces() {
        assert_eq!(list_cell(&["a", "b"]), "[a b]");
        assert_eq!(list_cell::<&str>(&[]), "[]");
    }

    #[test]
    fn json_objects_render_as_records() {
        let value = json!({"repositoryId": "r1", "status": null});
        let Shape::Record(record) = value.shape() else {
            panic!("object should render as a record");
        };
        let fields = record.fields();
        assert!(fields.contains(&("repositoryId", "r1".to_string())));
        assert!(fields.contains(&("status", "<nil>".to_string())));
    }

    #[test]
    fn json_arrays_of_scalars_are_opaque() {
        let value = json!([1, 2, 3]);
        assert!(matches!(value.shape(), Shape::Opaque("array of scalars")));
        assert!(matches!(json!([]).shape(), Shape::Records(rows) if rows.is_empty()));
    }

    #[test]
    fn scalars_are_opaque() {
        assert!(matches!(json!("text").shape(), Shape::Opaque("string")));
        assert!(matches!(json!(7).shape(), Shape::Opaque("number")));
        assert!(matches!(Value::Null.shape(), Shape::Opaque("null")));
    }

    #[test]
    fn absent_optional_is_opaque_and_present_delegates() {
        let absent: Option<Value> = None;
        assert!(matches!(absent.shape(), Shape::Opaque("null")));
        let present = Some(json!({"repositoryId": "r1"}));
        assert!(matches!(present.shape(), Shape::Record(_)));
    }
}
