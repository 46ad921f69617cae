//! Layouts and their polymorphic content tree.
//!
//! Content forms a tree, not a graph: group nodes nest further content with
//! no enforced depth limit, staff nodes reference part sources by id.

use serde_json::Value;

use crate::error::StructureError;
use crate::seq::{int_field, seq_field, str_field, FromValue, Seq};

/// One layout: a named arrangement of staves and groups.
#[derive(Clone, Copy)]
pub struct Layout<'a> {
    node: &'a Value,
}

impl<'a> FromValue<'a> for Layout<'a> {
    fn from_value(node: &'a Value) -> Self {
        Self { node }
    }
}

impl<'a> Layout<'a> {
    pub fn id(&self) -> Option<&'a str> {
        str_field(self.node, "id")
    }

    /// The ordered, recursive content sequence.
    pub fn content(&self) -> Result<Seq<'a, ContentNode<'a>>, StructureError> {
        seq_field(self.node, "content")
    }
}

/// One node of a layout's content tree, before narrowing.
#[derive(Clone, Copy)]
pub struct ContentNode<'a> {
    node: &'a Value,
}

impl<'a> FromValue<'a> for ContentNode<'a> {
    fn from_value(node: &'a Value) -> Self {
        Self { node }
    }
}

impl<'a> ContentNode<'a> {
    /// Narrow to the concrete node kind.
    ///
    /// The schema admits only `group` and `staff` as `type` tags; a node
    /// without a recognized tag yields `None` and is skipped by traversals.
    pub fn kind(&self) -> Option<ContentKind<'a>> {
        match str_field(self.node, "type")? {
            "group" => Some(ContentKind::Group(Group { node: self.node })),
            "staff" => Some(ContentKind::Staff(Staff { node: self.node })),
            _ => None,
        }
    }
}

/// Concrete layout-content node kinds.
pub enum ContentKind<'a> {
    /// A group of nested content.
    Group(Group<'a>),
    /// A staff drawing from one or more part sources.
    Staff(Staff<'a>),
}

/// A group node.
#[derive(Clone, Copy)]
pub struct Group<'a> {
    node: &'a Value,
}

impl<'a> Group<'a> {
    /// Nested content.
    pub fn content(&self) -> Result<Seq<'a, ContentNode<'a>>, StructureError> {
        seq_field(self.node, "content")
    }
}

/// A staff node.
#[derive(Clone, Copy)]
pub struct Staff<'a> {
    node: &'a Value,
}

impl<'a> Staff<'a> {
    pub fn sources(&self) -> Result<Seq<'a, StaffSource<'a>>, StructureError> {
        seq_field(self.node, "sources")
    }
}

/// One staff source: which part, and which staff within that part, the
/// staff draws from.
#[derive(Clone, Copy)]
pub struct StaffSource<'a> {
    node: &'a Value,
}

impl<'a> FromValue<'a> for StaffSource<'a> {
    fn from_value(node: &'a Value) -> Self {
        Self { node }
    }
}

impl<'a> StaffSource<'a> {
    /// Id of the referenced part.
    pub fn part(&self) -> Option<&'a str> {
        str_field(self.node, "part")
    }

    /// Staff number within the referenced part, defaulting to 1.
    pub fn staff(&self) -> i64 {
        int_field(self.node, "staff").unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn layout_of(root: &Value) -> Layout<'_> {
        Layout::from_value(&root["layouts"][0])
    }

    #[test]
    fn kind_narrows_group_and_staff() {
        let root = json!({
            "layouts": [{
                "id": "L1",
                "content": [
                    { "type": "group", "content": [] },
                    { "type": "staff", "sources": [{ "part": "P1" }] }
                ]
            }]
        });
        let layout = layout_of(&root);
        let kinds: Vec<&str> = layout
            .content()
            .unwrap()
            .iter()
            .map(|(_, node)| match node.kind() {
                Some(ContentKind::Group(_)) => "group",
                Some(ContentKind::Staff(_)) => "staff",
                None => "unknown",
            })
            .collect();
        assert_eq!(kinds, vec!["group", "staff"]);
    }

    #[test]
    fn unrecognized_type_yields_none() {
        let root = json!({
            "layouts": [{ "content": [{ "type": "ossia" }, {}] }]
        });
        let layout = layout_of(&root);
        for (_, node) in layout.content().unwrap().iter() {
            assert!(node.kind().is_none());
        }
    }

    #[test]
    fn group_nesting_is_unbounded() {
        let root = json!({
            "layouts": [{
                "content": [{
                    "type": "group",
                    "content": [{
                        "type": "group",
                        "content": [{ "type": "staff", "sources": [] }]
                    }]
                }]
            }]
        });
        let layout = layout_of(&root);
        let (_, outer) = layout.content().unwrap().iter().next().unwrap();
        let Some(ContentKind::Group(outer)) = outer.kind() else {
            panic!("expected group");
        };
        let (_, inner) = outer.content().unwrap().iter().next().unwrap();
        let Some(ContentKind::Group(inner)) = inner.kind() else {
            panic!("expected nested group");
        };
        assert_eq!(inner.content().unwrap().len(), 1);
    }

    #[test]
    fn staff_source_defaults_to_staff_one() {
        let root = json!({
            "layouts": [{
                "content": [{
                    "type": "staff",
                    "sources": [{ "part": "P1" }, { "part": "P2", "staff": 2 }]
                }]
            }]
        });
        let layout = layout_of(&root);
        let (_, node) = layout.content().unwrap().iter().next().unwrap();
        let Some(ContentKind::Staff(staff)) = node.kind() else {
            panic!("expected staff");
        };
        let staves: Vec<i64> = staff
            .sources()
            .unwrap()
            .iter()
            .map(|(_, s)| s.staff())
            .collect();
        assert_eq!(staves, vec![1, 2]);
    }

    #[test]
    fn non_array_content_is_fatal() {
        let root = json!({ "layouts": [{ "content": "nope" }] });
        let err = layout_of(&root).content().unwrap_err();
        assert_eq!(err, StructureError::NotAnArray { node: "content" });
    }
}
