// File: starter-forms/src/render.rs
// Purpose: Field type renderers, change-event normalization and the field wrapper

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use maud::{html, Markup};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::field::{FieldModel, DEFAULT_FIELD_TYPE};
use crate::reducer::FormState;
use crate::value::{is_truthy, string_value};

/// Registry key used when a field's type has no renderer
pub const FALLBACK_FIELD_TYPE: &str = "input";

/// One choice of a `select` or `radio-group`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub disabled: bool,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            disabled: false,
        }
    }
}

/// Properties a field component hands to its renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldProps {
    pub name: String,
    pub field_type: String,
    pub id: Option<String>,
    pub label: Option<String>,
    pub hint: Option<String>,
    pub class_name: Option<String>,
    pub placeholder: Option<String>,
    /// Button text
    pub text: Option<String>,
    pub value: Value,
    pub disabled: bool,
    pub readonly: bool,
    pub options: Vec<ChoiceOption>,
}

impl FieldProps {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            ..Self::default()
        }
    }

    /// Props describing a registered field
    pub fn for_field(model: &FieldModel) -> Self {
        Self {
            name: model.name.clone(),
            field_type: model.field_type.clone(),
            label: Some(model.label.clone()),
            value: model.value.clone(),
            disabled: model.disabled,
            readonly: model.readonly,
            ..Self::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    pub fn options(mut self, options: Vec<ChoiceOption>) -> Self {
        self.options = options;
        self
    }

    fn type_or_default(&self) -> &str {
        if self.field_type.is_empty() {
            DEFAULT_FIELD_TYPE
        } else {
            &self.field_type
        }
    }
}

/// What a native widget reports on change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeInput {
    pub value: Value,
    /// Checked state for checkbox-like widgets. Collection widgets report
    /// `Some(false)` when an entry is removed.
    pub checked: Option<bool>,
    /// Field value before the change; [`crate::Form::input`] fills it in
    pub current: Value,
}

impl NativeInput {
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn checked(checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Self::default()
        }
    }

    /// An entry removed from a collection widget
    pub fn removed(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            checked: Some(false),
            ..Self::default()
        }
    }

    pub fn current(mut self, current: impl Into<Value>) -> Self {
        self.current = current.into();
        self
    }

    fn current_items(&self) -> Vec<Value> {
        match &self.current {
            Value::Array(items) => items.clone(),
            _ => Vec::new(),
        }
    }
}

/// Uniform change event consumed by the form engine
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub value: Value,
}

/// Renderer for one field type.
///
/// Every type funnels its native change into a [`ChangeEvent`] so the
/// reducer never deals with widget differences. The default normalization
/// forwards the native value.
pub trait FieldType: Send + Sync {
    fn render(&self, props: &FieldProps, form: &FormState) -> Markup;

    fn normalize(&self, input: &NativeInput) -> ChangeEvent {
        ChangeEvent {
            value: input.value.clone(),
        }
    }
}

impl<F> FieldType for F
where
    F: Fn(&FieldProps, &FormState) -> Markup + Send + Sync,
{
    fn render(&self, props: &FieldProps, form: &FormState) -> Markup {
        self(props, form)
    }
}

/// Text-like `<input>`; the fallback for unknown types
pub struct InputField;

impl FieldType for InputField {
    fn render(&self, props: &FieldProps, _form: &FormState) -> Markup {
        html! {
            input type=(props.type_or_default())
                name=(props.name)
                id=[props.id.as_deref()]
                value=(string_value(&props.value))
                placeholder=[props.placeholder.as_deref()]
                disabled[props.disabled]
                readonly[props.readonly];
        }
    }
}

pub struct CheckboxField;

impl FieldType for CheckboxField {
    fn render(&self, props: &FieldProps, _form: &FormState) -> Markup {
        html! {
            span.checkbox-container {
                input type="checkbox"
                    name=(props.name)
                    id=[props.id.as_deref()]
                    checked[is_truthy(&props.value)]
                    disabled[props.disabled];
                span.indicator {}
            }
        }
    }

    fn normalize(&self, input: &NativeInput) -> ChangeEvent {
        ChangeEvent {
            value: Value::Bool(input.checked.unwrap_or(false)),
        }
    }
}

pub struct RadioField;

impl RadioField {
    fn markup(name: &str, value: &str, checked: bool, disabled: bool) -> Markup {
        html! {
            span.radio-container {
                input type="radio" name=(name) value=(value) checked[checked] disabled[disabled];
                span.indicator {}
            }
        }
    }
}

impl FieldType for RadioField {
    fn render(&self, props: &FieldProps, _form: &FormState) -> Markup {
        Self::markup(&props.name, "on", is_truthy(&props.value), props.disabled)
    }

    fn normalize(&self, input: &NativeInput) -> ChangeEvent {
        ChangeEvent {
            value: Value::Bool(input.checked.unwrap_or(false)),
        }
    }
}

/// Radio buttons sharing one name; the value is the chosen option's value
pub struct RadioGroupField;

impl FieldType for RadioGroupField {
    fn render(&self, props: &FieldProps, _form: &FormState) -> Markup {
        let current = string_value(&props.value);
        html! {
            fieldset.radio-group disabled[props.disabled] {
                @for option in &props.options {
                    label.radio-group-item {
                        (RadioField::markup(
                            &props.name,
                            &option.value,
                            option.value == current,
                            props.disabled || option.disabled,
                        ))
                        span.radio-group-label { (option.label) }
                    }
                }
            }
        }
    }
}

pub struct SelectField;

impl FieldType for SelectField {
    fn render(&self, props: &FieldProps, _form: &FormState) -> Markup {
        let current = string_value(&props.value);
        html! {
            select name=(props.name) id=[props.id.as_deref()] disabled[props.disabled] {
                @for option in &props.options {
                    option value=(option.value)
                        selected[option.value == current]
                        disabled[option.disabled] { (option.label) }
                }
            }
        }
    }
}

pub struct TextareaField;

impl FieldType for TextareaField {
    fn render(&self, props: &FieldProps, _form: &FormState) -> Markup {
        html! {
            textarea name=(props.name)
                id=[props.id.as_deref()]
                placeholder=[props.placeholder.as_deref()]
                disabled[props.disabled]
                readonly[props.readonly] { (string_value(&props.value)) }
        }
    }
}

pub struct ButtonField;

impl FieldType for ButtonField {
    fn render(&self, props: &FieldProps, _form: &FormState) -> Markup {
        html! {
            button type="button" name=(props.name) disabled[props.disabled] {
                (props.text.as_deref().unwrap_or(""))
            }
        }
    }
}

pub struct HiddenField;

impl FieldType for HiddenField {
    fn render(&self, props: &FieldProps, _form: &FormState) -> Markup {
        html! {
            input type="hidden" name=(props.name) value=(string_value(&props.value));
        }
    }
}

/// Options rendered as toggleable items; the value is the array of
/// selected option values
pub struct MultiSelectField;

impl FieldType for MultiSelectField {
    fn render(&self, props: &FieldProps, _form: &FormState) -> Markup {
        let selected: Vec<String> = match &props.value {
            Value::Array(items) => items.iter().map(string_value).collect(),
            _ => Vec::new(),
        };
        let class = format!(
            "input multi-select{} {}",
            if props.disabled { " disabled" } else { "" },
            props.class_name.as_deref().unwrap_or("")
        );
        html! {
            div class=(class.trim_end()) tabindex="0" data-name=(props.name) {
                @for (index, option) in props.options.iter().enumerate() {
                    @let item = if selected.contains(&option.value) {
                        "multi-select-item selected"
                    } else {
                        "multi-select-item"
                    };
                    div class=(item)
                        tabindex=(index + 1)
                        data-value=(option.value)
                        disabled[option.disabled] { (option.label) }
                }
            }
        }
    }

    /// A whole array replaces the selection; a single value toggles that
    /// option in the current selection
    fn normalize(&self, input: &NativeInput) -> ChangeEvent {
        if let Value::Array(_) = input.value {
            return ChangeEvent {
                value: input.value.clone(),
            };
        }
        let toggled = string_value(&input.value);
        let mut items = input.current_items();
        let before = items.len();
        items.retain(|item| string_value(item) != toggled);
        if items.len() == before {
            items.push(Value::String(toggled));
        }
        ChangeEvent {
            value: Value::Array(items),
        }
    }
}

/// Free-form list of values typed into one text input
pub struct MultiValField {
    /// Splits one typed entry into several values
    pub delimiter: String,
}

impl Default for MultiValField {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
        }
    }
}

impl FieldType for MultiValField {
    fn render(&self, props: &FieldProps, _form: &FormState) -> Markup {
        let values: Vec<String> = match &props.value {
            Value::Array(items) => items.iter().map(string_value).collect(),
            _ => Vec::new(),
        };
        let item = if props.disabled { "value-item disabled" } else { "value-item" };
        html! {
            div.multi-val-input data-name=(props.name) {
                div.values {
                    @for value in &values {
                        span class=(item) {
                            (value)
                            i.icon.icon-x-circle data-value=(value) {}
                        }
                    }
                }
                input.value-input type="text"
                    name="__input"
                    placeholder=[props.placeholder.as_deref()]
                    disabled[props.disabled];
            }
        }
    }

    /// `Some(false)` removes the reported entry. Otherwise the entry is
    /// split on the delimiter and each new, non-blank piece is appended.
    fn normalize(&self, input: &NativeInput) -> ChangeEvent {
        if let Value::Array(_) = input.value {
            return ChangeEvent {
                value: input.value.clone(),
            };
        }
        let entry = string_value(&input.value);
        let mut items = input.current_items();
        if input.checked == Some(false) {
            items.retain(|item| string_value(item) != entry);
        } else {
            for piece in entry.split(self.delimiter.as_str()).map(str::trim) {
                if !piece.is_empty() && !items.iter().any(|item| string_value(item) == piece) {
                    items.push(Value::String(piece.to_string()));
                }
            }
        }
        ChangeEvent {
            value: Value::Array(items),
        }
    }
}

/// File picker whose value is an array of `{name, size, type}` entries
pub struct FileUploadField;

impl FieldType for FileUploadField {
    fn render(&self, props: &FieldProps, _form: &FormState) -> Markup {
        let files: &[Value] = match &props.value {
            Value::Array(items) => items,
            _ => &[],
        };
        html! {
            div.file-upload-input disabled[props.disabled] {
                input.file-input type="file"
                    name=(props.name)
                    style="display: none"
                    multiple
                    disabled[props.disabled];
                div.fu-content {
                    div.actions {
                        button.action.icon-folder type="button" disabled[props.disabled] {}
                        button.action.icon-trash type="button" disabled[files.is_empty() || props.disabled] {}
                    }
                    div.files {
                        @for file in files {
                            @let name = string_value(&file["name"]);
                            div.file-item {
                                i.icon-file {}
                                div.file-details {
                                    span.file-name { (name) }
                                    div.file-meta {
                                        @if let Some(kind) = file["type"].as_str().filter(|k| !k.is_empty()) {
                                            span.badge.file-type { (kind) }
                                        }
                                        span.badge.file-size { (string_value(&file["size"])) "b" }
                                    }
                                }
                                button.action.icon.icon-x type="button" data-value=(name) {}
                            }
                        }
                    }
                }
            }
        }
    }

    /// A picked file list replaces the value. `Some(false)` removes the
    /// named file, or every file when no name is given.
    fn normalize(&self, input: &NativeInput) -> ChangeEvent {
        let value = match (&input.value, input.checked) {
            (Value::Null, Some(false)) => Value::Array(Vec::new()),
            (removed, Some(false)) => {
                let name = string_value(removed);
                let mut files = input.current_items();
                files.retain(|file| string_value(&file["name"]) != name);
                Value::Array(files)
            }
            (Value::Array(_), _) => input.value.clone(),
            (Value::Null, _) => Value::Array(Vec::new()),
            (file, _) => Value::Array(vec![file.clone()]),
        };
        ChangeEvent { value }
    }
}

/// Field types keyed by name.
///
/// Handed to a form at construction. [`FieldTypeRegistry::global`] is a
/// ready-made registry of the built-in types for callers that do not need
/// custom ones.
#[derive(Clone, Default)]
pub struct FieldTypeRegistry {
    types: HashMap<String, Arc<dyn FieldType>>,
}

static DEFAULT_FIELD_TYPES: Lazy<FieldTypeRegistry> = Lazy::new(FieldTypeRegistry::with_defaults);

impl FieldTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in types: text-like inputs, the choice widgets, textarea,
    /// button, hidden and the array-valued `multiselect`, `multival` and
    /// `fileupload`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register(FALLBACK_FIELD_TYPE, InputField)
            .register("checkbox", CheckboxField)
            .register("radio", RadioField)
            .register("radio-group", RadioGroupField)
            .register("select", SelectField)
            .register("textarea", TextareaField)
            .register("button", ButtonField)
            .register("hidden", HiddenField)
            .register("multiselect", MultiSelectField)
            .register("multival", MultiValField::default())
            .register("fileupload", FileUploadField);
        registry
    }

    /// Shared default registry
    pub fn global() -> &'static FieldTypeRegistry {
        &DEFAULT_FIELD_TYPES
    }

    pub fn register(&mut self, name: impl Into<String>, field_type: impl FieldType + 'static) -> &mut Self {
        self.types.insert(name.into(), Arc::new(field_type));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn FieldType>> {
        self.types.get(name)
    }

    /// Renderer for `name`, falling back to the plain input
    pub fn resolve(&self, name: &str) -> Option<&Arc<dyn FieldType>> {
        self.types.get(name).or_else(|| self.types.get(FALLBACK_FIELD_TYPE))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }
}

impl fmt::Debug for FieldTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.types.keys().collect();
        names.sort();
        f.debug_struct("FieldTypeRegistry").field("types", &names).finish()
    }
}

/// Wraps a rendered field with its label, hint and validation message
pub trait FieldRenderer: Send + Sync {
    fn render(&self, field: Markup, model: &FieldModel, props: &FieldProps) -> Markup;
}

impl<F> FieldRenderer for F
where
    F: Fn(Markup, &FieldModel, &FieldProps) -> Markup + Send + Sync,
{
    fn render(&self, field: Markup, model: &FieldModel, props: &FieldProps) -> Markup {
        self(field, model, props)
    }
}

/// Default wrapper: container classes reflect pristine/valid state and the
/// message only shows once the field is dirty.
pub struct DefaultFieldRenderer;

impl FieldRenderer for DefaultFieldRenderer {
    fn render(&self, field: Markup, model: &FieldModel, props: &FieldProps) -> Markup {
        let class = format!(
            "field-container {} field-container-{} pristine-{} valid-{} {}",
            props.name,
            props.type_or_default(),
            model.pristine,
            model.valid,
            props.class_name.as_deref().unwrap_or("")
        );
        html! {
            div class=(class.trim_end()) {
                (field_label(props, &model.value))
                (field)
                @if let Some(message) = model.visible_message() {
                    span.v-msg.hint { (message) }
                }
            }
        }
    }
}

fn field_label(props: &FieldProps, value: &Value) -> Markup {
    html! {
        @if let Some(label) = &props.label {
            label.label for=[props.id.as_deref()] {
                span.title { (label) }
                @if let Some(hint) = &props.hint {
                    span.hint { (hint) }
                }
                @if props.field_type == "range" {
                    span.value { (string_value(value)) }
                }
            }
        }
    }
}

/// Group of fields under a shared label
pub fn field_group(label: Option<&str>, hint: Option<&str>, disabled: bool, content: Markup) -> Markup {
    html! {
        fieldset.field-group disabled[disabled] {
            @if let Some(label) = label {
                label.label {
                    span.title { (label) }
                    @if let Some(hint) = hint {
                        span.hint { (hint) }
                    }
                }
            }
            div.field-group-content { (content) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn render(field_type: &str, props: &FieldProps) -> String {
        let registry = FieldTypeRegistry::with_defaults();
        let renderer = registry.resolve(field_type).unwrap();
        renderer.render(props, &FormState::default()).into_string()
    }

    #[test]
    fn test_input_renders_value_and_flags() {
        let props = FieldProps::new("email", "email").value("a@b.io");
        let html = render("email", &FieldProps { disabled: true, ..props });

        assert!(html.contains(r#"type="email""#));
        assert!(html.contains(r#"value="a@b.io""#));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn test_unknown_type_falls_back_to_input() {
        let html = render("color", &FieldProps::new("tint", "color"));
        assert!(html.starts_with("<input"));
        assert!(html.contains(r#"type="color""#));
    }

    #[test]
    fn test_checkbox_reflects_value() {
        let html = render("checkbox", &FieldProps::new("agree", "checkbox").value(true));
        assert!(html.contains("checked"));
        let html = render("checkbox", &FieldProps::new("agree", "checkbox").value(false));
        assert!(!html.contains("checked"));
    }

    #[test]
    fn test_checkbox_and_radio_normalize_checked_state() {
        let registry = FieldTypeRegistry::with_defaults();
        for ty in ["checkbox", "radio"] {
            let field_type = registry.resolve(ty).unwrap();
            let event = field_type.normalize(&NativeInput::checked(true));
            assert_eq!(event.value, json!(true));
            let event = field_type.normalize(&NativeInput::value("on"));
            assert_eq!(event.value, json!(false));
        }
    }

    #[test]
    fn test_value_types_forward_native_value() {
        let registry = FieldTypeRegistry::with_defaults();
        for ty in ["text", "select", "textarea", "radio-group"] {
            let event = registry.resolve(ty).unwrap().normalize(&NativeInput::value("x"));
            assert_eq!(event.value, json!("x"));
        }
    }

    #[test]
    fn test_radio_group_marks_current_option() {
        let props = FieldProps::new("size", "radio-group")
            .value("m")
            .options(vec![ChoiceOption::new("Small", "s"), ChoiceOption::new("Medium", "m")]);
        let html = render("radio-group", &props);

        assert!(html.contains(r#"value="m" checked"#));
        assert!(!html.contains(r#"value="s" checked"#));
        assert!(html.contains("Medium"));
    }

    #[test]
    fn test_select_marks_selected_option() {
        let props = FieldProps::new("sport", "select")
            .value("hockey")
            .options(vec![ChoiceOption::new("Soccer", "soccer"), ChoiceOption::new("Hockey", "hockey")]);
        let html = render("select", &props);
        assert!(html.contains(r#"<option value="hockey" selected>Hockey</option>"#));
    }

    #[test]
    fn test_wrapper_hides_message_while_pristine() {
        let mut model = FieldModel::new("name").label("Name");
        model.valid = false;
        model.message = "Name is required".to_string();
        let props = FieldProps::for_field(&model);

        let html = DefaultFieldRenderer.render(html! { input; }, &model, &props).into_string();
        assert!(html.contains("pristine-true valid-false"));
        assert!(!html.contains("Name is required"));

        model.pristine = false;
        let html = DefaultFieldRenderer.render(html! { input; }, &model, &props).into_string();
        assert!(html.contains(r#"<span class="v-msg hint">Name is required</span>"#));
    }

    #[test]
    fn test_custom_field_type() {
        let mut registry = FieldTypeRegistry::with_defaults();
        registry.register("stars", |props: &FieldProps, _: &FormState| {
            html! { span.stars data-name=(props.name) { "★★★" } }
        });

        let html = registry
            .resolve("stars")
            .unwrap()
            .render(&FieldProps::new("rating", "stars"), &FormState::default())
            .into_string();
        assert_eq!(html, r#"<span class="stars" data-name="rating">★★★</span>"#);
    }

    #[test]
    fn test_hidden_field() {
        let html = render("hidden", &FieldProps::new("token", "hidden").value(42));
        assert_eq!(html, r#"<input type="hidden" name="token" value="42">"#);
    }

    #[test]
    fn test_multiselect_toggles_option() {
        let registry = FieldTypeRegistry::with_defaults();
        let multiselect = registry.get("multiselect").unwrap();
        let current = json!(["soccer", "hockey"]);

        let event = multiselect.normalize(&NativeInput::value("tennis").current(current.clone()));
        assert_eq!(event.value, json!(["soccer", "hockey", "tennis"]));

        let event = multiselect.normalize(&NativeInput::value("soccer").current(current));
        assert_eq!(event.value, json!(["hockey"]));

        let event = multiselect.normalize(&NativeInput::value("golf"));
        assert_eq!(event.value, json!(["golf"]));
    }

    #[test]
    fn test_multiselect_marks_selected_items() {
        let props = FieldProps::new("sports", "multiselect")
            .value(json!(["hockey"]))
            .options(vec![ChoiceOption::new("Soccer", "soccer"), ChoiceOption::new("Hockey", "hockey")]);
        let html = render("multiselect", &props);

        assert!(html.starts_with(r#"<div class="input multi-select" tabindex="0" data-name="sports">"#));
        assert!(html.contains(
            r#"<div class="multi-select-item selected" tabindex="2" data-value="hockey">Hockey</div>"#
        ));
        assert!(html.contains(r#"<div class="multi-select-item" tabindex="1" data-value="soccer">Soccer</div>"#));
    }

    #[test]
    fn test_multival_adds_and_removes_entries() {
        let multival = MultiValField::default();
        let current = json!(["rust"]);

        let event = multival.normalize(&NativeInput::value(" go, rust ,, zig").current(current.clone()));
        assert_eq!(event.value, json!(["rust", "go", "zig"]));

        let event = multival.normalize(&NativeInput::removed("rust").current(current.clone()));
        assert_eq!(event.value, json!([]));

        let event = multival.normalize(&NativeInput::value("   ").current(current));
        assert_eq!(event.value, json!(["rust"]));
    }

    #[test]
    fn test_multival_renders_values() {
        let html = render("multival", &FieldProps::new("hobbies", "multival").value(json!(["chess"])));
        assert!(html.contains(
            r#"<span class="value-item">chess<i class="icon icon-x-circle" data-value="chess"></i></span>"#
        ));
        assert!(html.contains(r#"name="__input""#));
    }

    #[rstest]
    #[case(
        NativeInput::value(json!([{"name": "b.txt", "size": 3}])),
        json!([{"name": "b.txt", "size": 3}])
    )]
    #[case(NativeInput::removed("a.txt"), json!([{"name": "c.txt", "size": 2}]))]
    #[case(NativeInput::checked(false), json!([]))]
    fn test_fileupload_normalize(#[case] input: NativeInput, #[case] expected: Value) {
        let current = json!([{"name": "a.txt", "size": 1}, {"name": "c.txt", "size": 2}]);
        let event = FileUploadField.normalize(&input.current(current));
        assert_eq!(event.value, expected);
    }

    #[test]
    fn test_fileupload_lists_files() {
        let value = json!([{"name": "a.txt", "size": 12, "type": "text/plain"}]);
        let html = render("fileupload", &FieldProps::new("files", "fileupload").value(value));

        assert!(html.contains(r#"<span class="file-name">a.txt</span>"#));
        assert!(html.contains(r#"<span class="badge file-type">text/plain</span>"#));
        assert!(html.contains(r#"<span class="badge file-size">12b</span>"#));
        assert!(html.contains(r#"<button class="action icon-trash" type="button"></button>"#));

        let html = render("fileupload", &FieldProps::new("files", "fileupload"));
        assert!(html.contains(r#"<button class="action icon-trash" type="button" disabled></button>"#));
    }

    #[test]
    fn test_field_group() {
        let html = field_group(Some("Account"), None, false, html! { input; }).into_string();
        assert!(html.starts_with(r#"<fieldset class="field-group">"#));
        assert!(html.contains(r#"<span class="title">Account</span>"#));
    }
}
