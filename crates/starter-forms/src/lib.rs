// File: starter-forms/src/lib.rs
// Purpose: Main entry point for the starter-forms library

//! # starter-forms
//!
//! Form state engine for dynamic sets of named fields.
//!
//! - [`reduce`] is the pure state machine (`SetFields`, `AddField`,
//!   `UpdateField`, `RemoveField`)
//! - [`rules`] holds composable validation rules and the open
//!   [`RuleRegistry`]
//! - [`render`] turns fields into maud markup and normalizes widget changes
//! - [`Form`] ties them together with a registration buffer and change events
//!
//! ## Quick Start
//!
//! ```rust
//! use starter_forms::{field_compare, length, required, FieldModel, Form};
//!
//! let mut form = Form::builder("signup")
//!     .rule("name", required())
//!     .rule("name", length().min(3))
//!     .rule("confirm", field_compare("password"))
//!     .build();
//!
//! form.register_field(FieldModel::new("name").label("Name"));
//! form.register_field(FieldModel::new("password"));
//! form.register_field(FieldModel::new("confirm"));
//! form.mount_complete();
//!
//! form.set_value("name", "Al");
//! assert_eq!(
//!     form.field("name").unwrap().visible_message(),
//!     Some("Name must be a minimum of 3 characters")
//! );
//! ```

pub mod error;
pub mod field;
pub mod form;
pub mod reducer;
pub mod render;
pub mod rules;
pub mod value;

pub use error::{RuleError, RuleResult};
pub use field::{FieldModel, FieldPatch, Fields, DEFAULT_FIELD_TYPE};
pub use form::{Form, FormBuilder, FormData, Submission};
pub use reducer::{reduce, FormAction, FormState};
pub use render::{
    field_group, ChangeEvent, ChoiceOption, DefaultFieldRenderer, FieldProps, FieldRenderer, FieldType,
    FieldTypeRegistry, FileUploadField, MultiSelectField, MultiValField, NativeInput,
};
pub use rules::{
    email, field_compare, length, number, pattern, required, validate_field, BoxedRule, FieldValidity, Rule,
    RuleRegistry, RuleTable, Validation,
};
