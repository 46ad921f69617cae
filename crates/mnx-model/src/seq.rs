//! Lazy, restartable sequences over JSON arrays, plus the field-access
//! helpers shared by the entity views.

use std::marker::PhantomData;

use serde_json::Value;

use crate::error::StructureError;

/// A view type constructed from one element of a JSON array.
pub trait FromValue<'a>: Sized {
    /// Wrap one array element. Views never fail to construct; accessors on
    /// a malformed element simply report its fields as absent.
    fn from_value(value: &'a Value) -> Self;
}

/// Finite, restartable, ordered sequence of entity views.
///
/// Wraps a borrowed JSON array. [`Seq::iter`] can be called any number of
/// times and yields each element together with its structural array
/// position.
#[derive(Clone, Copy)]
pub struct Seq<'a, T> {
    items: &'a [Value],
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T> std::fmt::Debug for Seq<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seq").field("items", &self.items).finish()
    }
}

impl<'a, T: FromValue<'a>> Seq<'a, T> {
    pub(crate) fn new(items: &'a [Value]) -> Self {
        Self {
            items,
            _marker: PhantomData,
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new(&[])
    }

    /// Number of elements in the sequence.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate `(array position, view)` pairs from the start.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + 'a
    where
        T: 'a,
    {
        self.items
            .iter()
            .enumerate()
            .map(|(position, value)| (position, T::from_value(value)))
    }
}

/// An optional array field: absent is `None`, present-but-not-an-array is
/// fatal.
pub(crate) fn optional_array<'a>(
    value: &'a Value,
    key: &'static str,
) -> Result<Option<&'a [Value]>, StructureError> {
    match value.get(key) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(_) => Err(StructureError::NotAnArray { node: key }),
    }
}

/// An array field exposed as a [`Seq`]; an absent field yields an empty
/// sequence.
pub(crate) fn seq_field<'a, T: FromValue<'a>>(
    value: &'a Value,
    key: &'static str,
) -> Result<Seq<'a, T>, StructureError> {
    Ok(optional_array(value, key)?
        .map(Seq::new)
        .unwrap_or_else(Seq::empty))
}

pub(crate) fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

pub(crate) fn int_field(value: &Value, key: &str) -> Option<i64> {
    value.get(key).and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct Raw<'a>(&'a Value);

    impl<'a> FromValue<'a> for Raw<'a> {
        fn from_value(value: &'a Value) -> Self {
            Raw(value)
        }
    }

    #[test]
    fn seq_is_restartable() {
        let doc = json!({ "items": [1, 2, 3] });
        let seq: Seq<'_, Raw<'_>> = seq_field(&doc, "items").unwrap();
        assert_eq!(seq.iter().count(), 3);
        // A second pass over the same sequence starts from the beginning.
        let positions: Vec<usize> = seq.iter().map(|(p, _)| p).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn absent_field_is_an_empty_sequence() {
        let doc = json!({});
        let seq: Seq<'_, Raw<'_>> = seq_field(&doc, "items").unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
    }

    #[test]
    fn non_array_field_is_fatal() {
        let doc = json!({ "items": { "oops": true } });
        let err = seq_field::<Raw<'_>>(&doc, "items").unwrap_err();
        assert_eq!(err, StructureError::NotAnArray { node: "items" });
    }

    #[test]
    fn scalar_helpers_ignore_wrong_types() {
        let doc = json!({ "id": 7, "count": "many" });
        assert_eq!(str_field(&doc, "id"), None);
        assert_eq!(int_field(&doc, "count"), None);
        assert_eq!(int_field(&doc, "id"), Some(7));
    }
}
