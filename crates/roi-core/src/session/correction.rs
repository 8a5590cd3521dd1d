//! Correction round state.
//!
//! A correction round starts when the agent reports fields that are invalid or
//! were never supplied, and ends on validation success or completion.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Describes one field the agent wants re-collected.
///
/// The agent sends either a bare field name or an object carrying `field`
/// and/or `field_description` plus arbitrary extra detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FieldDescriptorRepr")]
pub struct FieldDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_description: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldDescriptorRepr {
    Name(String),
    Detailed {
        #[serde(default)]
        field: Option<String>,
        #[serde(default)]
        field_description: Option<String>,
        #[serde(flatten)]
        details: Map<String, Value>,
    },
}

impl From<FieldDescriptorRepr> for FieldDescriptor {
    fn from(repr: FieldDescriptorRepr) -> Self {
        match repr {
            FieldDescriptorRepr::Name(name) => FieldDescriptor::named(name),
            FieldDescriptorRepr::Detailed {
                field,
                field_description,
                details,
            } => FieldDescriptor {
                field,
                field_description,
                details,
            },
        }
    }
}

impl FieldDescriptor {
    pub fn named(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            field_description: None,
            details: Map::new(),
        }
    }

    /// Label sent back to the agent: the field name, else its description.
    pub fn label(&self) -> Option<&str> {
        self.field
            .as_deref()
            .filter(|f| !f.is_empty())
            .or_else(|| self.field_description.as_deref().filter(|d| !d.is_empty()))
    }
}

/// Why the agent opened the correction round. Presentational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionKind {
    InvalidValues,
    MissingData,
}

/// Correction context attached to the next outgoing turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionContext {
    pub is_correction: bool,
    pub valid_data: Value,
    pub correcting_fields: Vec<String>,
}

/// State of an open correction round.
///
/// Only constructible with at least one field, so holding a value always
/// means corrections are awaited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionState {
    kind: CorrectionKind,
    valid_data: Value,
    invalid_fields: Vec<FieldDescriptor>,
}

impl CorrectionState {
    /// Opens a correction round, or returns `None` when no field is pending.
    pub fn open(
        kind: CorrectionKind,
        valid_data: Option<Value>,
        invalid_fields: Vec<FieldDescriptor>,
    ) -> Option<Self> {
        if invalid_fields.is_empty() {
            return None;
        }
        Some(Self {
            kind,
            valid_data: valid_data
                .filter(|v| !v.is_null())
                .unwrap_or_else(|| Value::Object(Map::new())),
            invalid_fields,
        })
    }

    pub fn awaiting_corrections(&self) -> bool {
        !self.invalid_fields.is_empty()
    }

    pub fn kind(&self) -> CorrectionKind {
        self.kind
    }

    pub fn valid_data(&self) -> &Value {
        &self.valid_data
    }

    pub fn invalid_fields(&self) -> &[FieldDescriptor] {
        &self.invalid_fields
    }

    pub fn pending_count(&self) -> usize {
        self.invalid_fields.len()
    }

    /// Builds the block sent with the next turn. Fields without any label are skipped.
    pub fn context(&self) -> CorrectionContext {
        CorrectionContext {
            is_correction: true,
            valid_data: self.valid_data.clone(),
            correcting_fields: self
                .invalid_fields
                .iter()
                .filter_map(|f| f.label().map(str::to_string))
                .collect(),
        }
    }
}
