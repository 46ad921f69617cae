//! Scores, pages, systems, layout changes, and multimeasure rests.

use serde_json::Value;

use crate::error::StructureError;
use crate::seq::{int_field, seq_field, str_field, FromValue, Seq};

/// One rendering of the piece, composed of pages and systems.
#[derive(Clone, Copy)]
pub struct Score<'a> {
    node: &'a Value,
}

impl<'a> FromValue<'a> for Score<'a> {
    fn from_value(node: &'a Value) -> Self {
        Self { node }
    }
}

impl<'a> Score<'a> {
    pub fn name(&self) -> Option<&'a str> {
        str_field(self.node, "name")
    }

    /// Id of the layout the score is bound to, if any.
    pub fn layout(&self) -> Option<&'a str> {
        str_field(self.node, "layout")
    }

    pub fn multimeasure_rests(&self) -> Result<Seq<'a, MultimeasureRest<'a>>, StructureError> {
        seq_field(self.node, "multimeasureRests")
    }

    pub fn pages(&self) -> Result<Seq<'a, Page<'a>>, StructureError> {
        seq_field(self.node, "pages")
    }
}

/// A single notated rest spanning several measures.
#[derive(Clone, Copy)]
pub struct MultimeasureRest<'a> {
    node: &'a Value,
}

impl<'a> FromValue<'a> for MultimeasureRest<'a> {
    fn from_value(node: &'a Value) -> Self {
        Self { node }
    }
}

impl MultimeasureRest<'_> {
    /// Logical id of the first measure covered by the rest.
    pub fn start(&self) -> Option<i64> {
        int_field(self.node, "start")
    }

    /// Number of measures the rest covers.
    pub fn duration(&self) -> Option<u64> {
        self.node.get("duration").and_then(Value::as_u64)
    }
}

/// One page of a score.
#[derive(Clone, Copy)]
pub struct Page<'a> {
    node: &'a Value,
}

impl<'a> FromValue<'a> for Page<'a> {
    fn from_value(node: &'a Value) -> Self {
        Self { node }
    }
}

impl<'a> Page<'a> {
    pub fn layout(&self) -> Option<&'a str> {
        str_field(self.node, "layout")
    }

    pub fn systems(&self) -> Result<Seq<'a, System<'a>>, StructureError> {
        seq_field(self.node, "systems")
    }
}

/// One line of music, anchored to a starting measure.
#[derive(Clone, Copy)]
pub struct System<'a> {
    node: &'a Value,
}

impl<'a> FromValue<'a> for System<'a> {
    fn from_value(node: &'a Value) -> Self {
        Self { node }
    }
}

impl<'a> System<'a> {
    pub fn layout(&self) -> Option<&'a str> {
        str_field(self.node, "layout")
    }

    /// Logical id of the measure the system starts at. Required by the
    /// format; `None` only in documents that bypassed schema validation.
    pub fn measure(&self) -> Option<i64> {
        int_field(self.node, "measure")
    }

    pub fn layout_changes(&self) -> Result<Seq<'a, LayoutChange<'a>>, StructureError> {
        seq_field(self.node, "layoutChanges")
    }
}

/// A mid-system instruction to switch layouts at a given location.
#[derive(Clone, Copy)]
pub struct LayoutChange<'a> {
    node: &'a Value,
}

impl<'a> FromValue<'a> for LayoutChange<'a> {
    fn from_value(node: &'a Value) -> Self {
        Self { node }
    }
}

impl<'a> LayoutChange<'a> {
    /// Id of the layout to switch to. Required by the format.
    pub fn layout(&self) -> Option<&'a str> {
        str_field(self.node, "layout")
    }

    /// Logical measure id of the change location.
    pub fn location_measure(&self) -> Option<i64> {
        self.node
            .get("location")
            .and_then(|location| location.get("measure"))
            .and_then(Value::as_i64)
    }
}
