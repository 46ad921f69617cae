//! The top-level document view, the global measure sequence, and parts.

use serde_json::Value;

use crate::error::StructureError;
use crate::layout::Layout;
use crate::score::Score;
use crate::seq::{int_field, optional_array, seq_field, str_field, FromValue, Seq};

/// Read-only view over one parsed MNX document.
///
/// Owned exclusively by the active validation run and discarded when the
/// run returns; nothing from one document leaks into the next.
#[derive(Clone, Copy)]
pub struct Document<'a> {
    root: &'a Value,
}

impl<'a> Document<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// The `global` section declaring the canonical measure sequence shared
    /// by all parts.
    pub fn global(&self) -> Option<Global<'a>> {
        self.root.get("global").map(|node| Global { node })
    }

    /// All parts, in declaration order.
    pub fn parts(&self) -> Result<Seq<'a, Part<'a>>, StructureError> {
        seq_field(self.root, "parts")
    }

    /// The part at a given array position, if any. Used when a registry
    /// lookup has already resolved an id to its position.
    pub fn part(&self, position: usize) -> Option<Part<'a>> {
        let items = optional_array(self.root, "parts").ok()??;
        items.get(position).map(Part::from_value)
    }

    /// All layouts. Layouts are not required in MNX; an absent node yields
    /// an empty sequence.
    pub fn layouts(&self) -> Result<Seq<'a, Layout<'a>>, StructureError> {
        seq_field(self.root, "layouts")
    }

    /// All scores. Scores are not required in MNX.
    pub fn scores(&self) -> Result<Seq<'a, Score<'a>>, StructureError> {
        seq_field(self.root, "scores")
    }
}

/// The `global` section.
#[derive(Clone, Copy)]
pub struct Global<'a> {
    node: &'a Value,
}

impl<'a> Global<'a> {
    /// The canonical measure sequence.
    pub fn measures(&self) -> Result<Seq<'a, Measure<'a>>, StructureError> {
        seq_field(self.node, "measures")
    }
}

/// One global measure.
///
/// The logical measure id is a running computation (explicit `index` if
/// present, else previous id plus one starting at 1), so it lives in the
/// pass that walks the sequence, not here.
#[derive(Clone, Copy)]
pub struct Measure<'a> {
    node: &'a Value,
}

impl<'a> FromValue<'a> for Measure<'a> {
    fn from_value(node: &'a Value) -> Self {
        Self { node }
    }
}

impl Measure<'_> {
    /// Explicit measure index, when the document overrides the implicit
    /// numbering.
    pub fn index(&self) -> Option<i64> {
        int_field(self.node, "index")
    }
}

/// One part (a single instrument or voice).
#[derive(Clone, Copy)]
pub struct Part<'a> {
    node: &'a Value,
}

impl<'a> FromValue<'a> for Part<'a> {
    fn from_value(node: &'a Value) -> Self {
        Self { node }
    }
}

impl<'a> Part<'a> {
    pub fn id(&self) -> Option<&'a str> {
        str_field(self.node, "id")
    }

    /// Number of measures the part declares; a part without a `measures`
    /// array declares zero.
    pub fn measure_count(&self) -> Result<usize, StructureError> {
        Ok(optional_array(self.node, "measures")?.map_or(0, <[Value]>::len))
    }

    /// Declared staff count, defaulting to 1.
    pub fn staves(&self) -> i64 {
        int_field(self.node, "staves").unwrap_or(1)
    }
}
