// File: starter-forms/src/field.rs
// Purpose: Field model tracked by the form state engine

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Registered fields keyed by name
pub type Fields = HashMap<String, FieldModel>;

/// Field type used when none is given
pub const DEFAULT_FIELD_TYPE: &str = "text";

/// One named input unit within a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FieldRecord")]
pub struct FieldModel {
    pub name: String,
    /// Display name, defaults to `name`
    pub label: String,
    /// Rendering type (`text`, `checkbox`, `radio-group`, ...)
    #[serde(rename = "type")]
    pub field_type: String,
    pub value: Value,
    pub default_value: Value,
    pub disabled: bool,
    pub readonly: bool,
    pub pristine: bool,
    pub valid: bool,
    pub message: String,
}

/// Wire shape of a field; `label` falls back to `name` once both are known
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldRecord {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(rename = "type", default = "default_field_type")]
    field_type: String,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    default_value: Value,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    readonly: bool,
    #[serde(default = "default_true")]
    pristine: bool,
    #[serde(default = "default_true")]
    valid: bool,
    #[serde(default)]
    message: String,
}

impl From<FieldRecord> for FieldModel {
    fn from(record: FieldRecord) -> Self {
        Self {
            label: record.label.unwrap_or_else(|| record.name.clone()),
            name: record.name,
            field_type: record.field_type,
            value: record.value,
            default_value: record.default_value,
            disabled: record.disabled,
            readonly: record.readonly,
            pristine: record.pristine,
            valid: record.valid,
            message: record.message,
        }
    }
}

fn default_field_type() -> String {
    DEFAULT_FIELD_TYPE.to_string()
}

fn default_true() -> bool {
    true
}

impl FieldModel {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            field_type: default_field_type(),
            value: Value::Null,
            default_value: Value::Null,
            disabled: false,
            readonly: false,
            pristine: true,
            valid: true,
            message: String::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn field_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = field_type.into();
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the default value; also becomes the current value when none is set
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = value.into();
        if self.value.is_null() {
            self.value = self.default_value.clone();
        }
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    /// Validation message to surface, if any.
    ///
    /// Pristine fields never surface their message even when invalid.
    pub fn visible_message(&self) -> Option<&str> {
        if !self.valid && !self.pristine {
            Some(&self.message)
        } else {
            None
        }
    }
}

/// Payload of an `UpdateField` transition
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPatch {
    pub name: String,
    pub value: Value,
    /// `None` keeps the field's current flag
    pub disabled: Option<bool>,
    pub readonly: Option<bool>,
}

impl FieldPatch {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            disabled: None,
            readonly: None,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = Some(readonly);
        self
    }
}
