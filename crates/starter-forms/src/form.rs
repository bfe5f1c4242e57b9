// File: starter-forms/src/form.rs
// Purpose: Form engine wrapper (registration buffer, change events, submission)

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use maud::Markup;
use serde::Serialize;
use serde_json::Value;
use starter_events::{EventEmitter, Subscription};

use crate::error::RuleResult;
use crate::field::{FieldModel, FieldPatch, Fields};
use crate::reducer::{reduce, FormAction, FormState};
use crate::render::{DefaultFieldRenderer, FieldProps, FieldRenderer, FieldTypeRegistry, NativeInput};
use crate::rules::{BoxedRule, Rule, RuleRegistry, RuleTable};

const CHANGE_EVENT: &str = "change";
const SUBMIT_EVENT: &str = "submit";

/// Snapshot handed to change listeners
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormData {
    pub valid: bool,
    pub pristine: bool,
    /// Values of every enabled field
    pub data: BTreeMap<String, Value>,
}

/// Payload of a submit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub valid: bool,
    pub pristine: bool,
    /// All fields, disabled ones included
    pub fields: Fields,
    pub data: BTreeMap<String, Value>,
}

fn enabled_values(fields: &Fields) -> BTreeMap<String, Value> {
    fields
        .values()
        .filter(|f| !f.disabled)
        .map(|f| (f.name.clone(), f.value.clone()))
        .collect()
}

/// Builder for [`Form`]
pub struct FormBuilder {
    name: String,
    rules: RuleTable,
    rule_registry: RuleRegistry,
    field_types: Option<FieldTypeRegistry>,
    renderer: Option<Arc<dyn FieldRenderer>>,
}

impl FormBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: RuleTable::new(),
            rule_registry: RuleRegistry::with_builtins(),
            field_types: None,
            renderer: None,
        }
    }

    /// Append a rule for `field`. Rules run in the order they were added.
    pub fn rule(mut self, field: &str, rule: impl Rule + 'static) -> Self {
        self.rules.entry(field.to_string()).or_default().push(rule.boxed());
        self
    }

    pub fn rules(mut self, field: &str, rules: Vec<BoxedRule>) -> Self {
        self.rules.entry(field.to_string()).or_default().extend(rules);
        self
    }

    /// Registry used by [`FormBuilder::rule_named`]
    pub fn rule_registry(mut self, registry: RuleRegistry) -> Self {
        self.rule_registry = registry;
        self
    }

    /// Append a rule built by name from JSON options
    pub fn rule_named(self, field: &str, rule: &str, options: &Value) -> RuleResult<Self> {
        let built = self.rule_registry.build(rule, options)?;
        Ok(self.rules(field, vec![built]))
    }

    pub fn field_types(mut self, field_types: FieldTypeRegistry) -> Self {
        self.field_types = Some(field_types);
        self
    }

    /// Wrapper applied around every rendered field
    pub fn renderer(mut self, renderer: impl FieldRenderer + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    pub fn build(self) -> Form {
        tracing::debug!(form = %self.name, fields_with_rules = self.rules.len(), "form created");
        Form {
            name: self.name,
            state: FormState::new(self.rules),
            pending: Fields::new(),
            field_types: self
                .field_types
                .unwrap_or_else(|| FieldTypeRegistry::global().clone()),
            renderer: self.renderer.unwrap_or_else(|| Arc::new(DefaultFieldRenderer)),
            changes: EventEmitter::new(),
            submits: EventEmitter::new(),
        }
    }
}

/// One form instance.
///
/// Fields register while the form mounts and are held in a pending buffer
/// until [`Form::mount_complete`] installs them in a single `SetFields`
/// transition. Later registrations go straight through `AddField`.
///
/// ```rust
/// use starter_forms::{required, FieldModel, Form};
///
/// let mut form = Form::builder("signup").rule("name", required()).build();
/// form.register_field(FieldModel::new("name").label("Name"));
/// form.mount_complete();
/// assert!(!form.state().valid);
///
/// form.set_value("name", "Ada");
/// assert!(form.state().valid);
/// assert_eq!(form.form_data().data["name"], "Ada");
/// ```
pub struct Form {
    name: String,
    state: FormState,
    pending: Fields,
    field_types: FieldTypeRegistry,
    renderer: Arc<dyn FieldRenderer>,
    changes: EventEmitter<FormData>,
    submits: EventEmitter<Submission>,
}

impl Form {
    pub fn builder(name: impl Into<String>) -> FormBuilder {
        FormBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    /// Registered field by name, including fields still buffered
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.state.field(name).or_else(|| self.pending.get(name))
    }

    /// Register a field. A name that is already registered is ignored.
    pub fn register_field(&mut self, field: FieldModel) {
        if self.field(&field.name).is_some() {
            tracing::debug!(form = %self.name, field = %field.name, "field already registered");
            return;
        }

        if self.state.initialized {
            self.dispatch(FormAction::AddField(field));
        } else {
            self.pending.insert(field.name.clone(), field);
        }
    }

    /// Flush the registration buffer. Only the first call has an effect.
    pub fn mount_complete(&mut self) {
        if self.state.initialized {
            return;
        }
        let fields = std::mem::take(&mut self.pending);
        tracing::debug!(form = %self.name, fields = fields.len(), "form initialized");
        self.dispatch(FormAction::SetFields(fields));
        self.changes.emit(CHANGE_EVENT, &self.form_data());
    }

    pub fn remove_field(&mut self, name: &str) {
        if self.state.initialized {
            self.dispatch(FormAction::RemoveField(name.to_string()));
        } else {
            self.pending.remove(name);
        }
    }

    pub fn update_field(&mut self, patch: FieldPatch) {
        self.dispatch(FormAction::UpdateField(patch));
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) {
        self.update_field(FieldPatch::new(name, value));
    }

    /// Feed a native widget change through the field's type
    pub fn input(&mut self, name: &str, input: &NativeInput) {
        let Some(field) = self.state.field(name) else {
            tracing::warn!(form = %self.name, field = name, "input for unregistered field ignored");
            return;
        };
        let Some(field_type) = self.field_types.resolve(&field.field_type) else {
            tracing::warn!(form = %self.name, field_type = %field.field_type, "no renderer for field type");
            return;
        };
        let input = NativeInput {
            current: field.value.clone(),
            ..input.clone()
        };
        let event = field_type.normalize(&input);
        self.set_value(name, event.value);
    }

    /// Apply a transition and notify change listeners once the form is dirty
    pub fn dispatch(&mut self, action: FormAction) {
        self.state = reduce(&self.state, action);
        if !self.state.pristine {
            self.changes.emit(CHANGE_EVENT, &self.form_data());
        }
    }

    pub fn form_data(&self) -> FormData {
        FormData {
            valid: self.state.valid,
            pristine: self.state.pristine,
            data: enabled_values(&self.state.fields),
        }
    }

    /// Build the submission and hand it to submit listeners
    pub fn submit(&self) -> Submission {
        let submission = Submission {
            valid: self.state.valid,
            pristine: self.state.pristine,
            fields: self.state.fields.clone(),
            data: enabled_values(&self.state.fields),
        };
        tracing::debug!(form = %self.name, valid = submission.valid, "form submitted");
        self.submits.emit(SUBMIT_EVENT, &submission);
        submission
    }

    pub fn on_change<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&FormData) + Send + Sync + 'static,
    {
        self.changes.on(CHANGE_EVENT, handler)
    }

    pub fn on_submit<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&Submission) + Send + Sync + 'static,
    {
        self.submits.on(SUBMIT_EVENT, handler)
    }

    /// Render a field widget inside the configured wrapper. Hidden fields
    /// render bare.
    ///
    /// Value and flags come from the field's model when it is registered;
    /// otherwise the props are rendered as given.
    pub fn render_field(&self, props: &FieldProps) -> Markup {
        let model = self
            .field(&props.name)
            .cloned()
            .unwrap_or_else(|| FieldModel::new(&props.name).value(props.value.clone()));

        let props = FieldProps {
            value: model.value.clone(),
            disabled: props.disabled || model.disabled,
            readonly: props.readonly || model.readonly,
            ..props.clone()
        };
        let widget = match self.field_types.resolve(&props.field_type) {
            Some(field_type) => field_type.render(&props, &self.state),
            None => maud::html! {},
        };
        if props.field_type == "hidden" {
            return widget;
        }
        self.renderer.render(widget, &model, &props)
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("pending", &self.pending.keys().collect::<Vec<_>>())
            .field("field_types", &self.field_types)
            .finish()
    }
}
