// File: starter-forms/src/reducer.rs
// Purpose: Pure form state reducer (set-fields, add-field, update-field, remove-field)

use std::fmt;
use std::sync::Arc;

use crate::field::{FieldModel, FieldPatch, Fields};
use crate::rules::{validate_field, RuleTable};

/// State of one form instance
#[derive(Clone)]
pub struct FormState {
    pub fields: Fields,
    /// True iff no field is invalid (see [`FormAction::RemoveField`])
    pub valid: bool,
    /// True until the first `UpdateField`
    pub pristine: bool,
    /// Set once by the first `SetFields`
    pub initialized: bool,
    rules: Arc<RuleTable>,
}

impl FormState {
    pub fn new(rules: RuleTable) -> Self {
        Self {
            fields: Fields::new(),
            valid: true,
            pristine: true,
            initialized: false,
            rules: Arc::new(rules),
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.get(name)
    }

    /// Whether any field currently holds `valid == false`
    pub fn has_invalid_field(&self) -> bool {
        self.fields.values().any(|f| !f.valid)
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(RuleTable::new())
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rules: Vec<&String> = self.rules.keys().collect();
        rules.sort();
        f.debug_struct("FormState")
            .field("fields", &self.fields)
            .field("valid", &self.valid)
            .field("pristine", &self.pristine)
            .field("initialized", &self.initialized)
            .field("rules", &rules)
            .finish()
    }
}

/// Form state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// Bulk install of the fields registered during the first mount pass
    SetFields(Fields),
    /// A field registered after initialization
    AddField(FieldModel),
    /// User or programmatic change of a field
    UpdateField(FieldPatch),
    /// A field unregistered
    RemoveField(String),
}

impl FormAction {
    pub fn kind(&self) -> &'static str {
        match self {
            FormAction::SetFields(_) => "set-fields",
            FormAction::AddField(_) => "add-field",
            FormAction::UpdateField(_) => "update-field",
            FormAction::RemoveField(_) => "remove-field",
        }
    }
}

/// Apply `action` to `state`, returning the next state.
///
/// Revalidation requested by a rule runs before this returns; callers never
/// observe a half-applied cascade.
pub fn reduce(state: &FormState, action: FormAction) -> FormState {
    tracing::debug!(action = action.kind(), "form transition");
    match action {
        FormAction::SetFields(payload) => set_fields(state, payload),
        FormAction::AddField(field) => add_field(state, field),
        FormAction::UpdateField(patch) => update_field(state, patch),
        FormAction::RemoveField(name) => remove_field(state, &name),
    }
}

fn set_fields(state: &FormState, payload: Fields) -> FormState {
    let mut fields = Fields::with_capacity(payload.len());
    for (name, field) in &payload {
        let validity = validate_field(field, &state.rules, &payload);
        fields.insert(
            name.clone(),
            FieldModel {
                valid: validity.valid,
                message: validity.message,
                pristine: true,
                ..field.clone()
            },
        );
    }

    let valid = fields.values().all(|f| f.valid);
    FormState {
        fields,
        valid,
        initialized: true,
        ..state.clone()
    }
}

fn add_field(state: &FormState, field: FieldModel) -> FormState {
    let validity = validate_field(&field, &state.rules, &state.fields);
    let mut fields = state.fields.clone();
    fields.insert(
        field.name.clone(),
        FieldModel {
            valid: validity.valid,
            message: validity.message,
            pristine: true,
            ..field
        },
    );

    let valid = fields.values().all(|f| f.valid);
    FormState {
        fields,
        valid,
        ..state.clone()
    }
}

fn update_field(state: &FormState, patch: FieldPatch) -> FormState {
    let Some(current) = state.fields.get(&patch.name) else {
        tracing::warn!(field = %patch.name, "update for unregistered field ignored");
        return state.clone();
    };

    let candidate = FieldModel {
        value: patch.value,
        ..current.clone()
    };
    let validity = validate_field(&candidate, &state.rules, &state.fields);

    let mut fields = state.fields.clone();
    fields.insert(
        patch.name.clone(),
        FieldModel {
            valid: validity.valid,
            message: validity.message,
            disabled: patch.disabled.unwrap_or(candidate.disabled),
            readonly: patch.readonly.unwrap_or(candidate.readonly),
            pristine: false,
            ..candidate
        },
    );

    for name in &validity.revalidate {
        let Some(other) = fields.get(name).cloned() else {
            continue;
        };
        let revalidated = validate_field(&other, &state.rules, &fields);
        tracing::trace!(field = %name, valid = revalidated.valid, "revalidated");
        fields.insert(
            name.clone(),
            FieldModel {
                valid: revalidated.valid,
                message: revalidated.message,
                ..other
            },
        );
    }

    let valid = fields.values().all(|f| f.valid);
    FormState {
        fields,
        valid,
        pristine: false,
        ..state.clone()
    }
}

/// Removes the field without recomputing the aggregate `valid` flag. If the
/// removed field was the only invalid one, `valid` stays `false` until the
/// next `UpdateField`.
fn remove_field(state: &FormState, name: &str) -> FormState {
    let mut fields = state.fields.clone();
    fields.remove(name);
    FormState {
        fields,
        ..state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{field_compare, required, BoxedRule, Rule};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn rules(entries: Vec<(&str, Vec<BoxedRule>)>) -> RuleTable {
        entries
            .into_iter()
            .map(|(name, rules)| (name.to_string(), rules))
            .collect()
    }

    fn fields(models: Vec<FieldModel>) -> Fields {
        models.into_iter().map(|f| (f.name.clone(), f)).collect()
    }

    fn password_form() -> FormState {
        let table = rules(vec![
            ("password", vec![required().boxed()]),
            ("confirm", vec![field_compare("password").boxed()]),
        ]);
        reduce(
            &FormState::new(table),
            FormAction::SetFields(fields(vec![
                FieldModel::new("password").value("a"),
                FieldModel::new("confirm").value("b"),
            ])),
        )
    }

    #[test]
    fn test_set_fields_initializes_and_validates() {
        let state = password_form();

        assert!(state.initialized);
        assert!(state.pristine);
        assert!(!state.valid);
        assert!(state.fields["password"].valid);
        assert!(!state.fields["confirm"].valid);
        assert!(state.fields["confirm"].pristine);
    }

    #[test]
    fn test_one_invalid_field_invalidates_form() {
        let table = rules(vec![("name", vec![required().boxed()])]);
        let state = reduce(
            &FormState::new(table),
            FormAction::SetFields(fields(vec![
                FieldModel::new("name"),
                FieldModel::new("email").value("x@y.io"),
                FieldModel::new("city").value("Pune"),
            ])),
        );

        assert!(!state.valid);
        assert_eq!(state.fields.values().filter(|f| !f.valid).count(), 1);
    }

    #[test]
    fn test_add_field_validates_against_current_fields() {
        let state = reduce(
            &FormState::new(rules(vec![("name", vec![required().boxed()])])),
            FormAction::SetFields(Fields::new()),
        );
        let state = reduce(&state, FormAction::AddField(FieldModel::new("name")));

        let name = &state.fields["name"];
        assert!(name.pristine);
        assert!(!name.valid);
        assert_eq!(name.message, "name is required");
        assert!(!state.valid);
    }

    #[test]
    fn test_update_field_marks_form_dirty() {
        let state = password_form();
        let state = reduce(&state, FormAction::UpdateField(FieldPatch::new("password", "z")));

        assert!(!state.pristine);
        assert!(state.initialized);
        assert!(!state.fields["password"].pristine);
        assert_eq!(state.fields["password"].value, json!("z"));
    }

    #[test]
    fn test_field_compare_revalidates_counterpart() {
        let state = password_form();

        // confirm now matches password; password is re-checked too
        let state = reduce(&state, FormAction::UpdateField(FieldPatch::new("confirm", "a")));
        assert!(state.fields["confirm"].valid);
        assert!(state.valid);

        // breaking the pair from the confirm side
        let state = reduce(&state, FormAction::UpdateField(FieldPatch::new("confirm", "c")));
        assert!(!state.fields["confirm"].valid);
        assert_eq!(state.fields["confirm"].message, "confirm must be same as password");
        assert!(!state.valid);
    }

    #[test]
    fn test_symmetric_compare_rechecks_other_side() {
        let table = rules(vec![
            ("password", vec![field_compare("confirm").boxed()]),
            ("confirm", vec![field_compare("password").boxed()]),
        ]);
        let state = reduce(
            &FormState::new(table),
            FormAction::SetFields(fields(vec![
                FieldModel::new("password").value("a"),
                FieldModel::new("confirm").value("b"),
            ])),
        );
        assert!(!state.fields["password"].valid);
        assert!(!state.fields["confirm"].valid);

        let state = reduce(&state, FormAction::UpdateField(FieldPatch::new("confirm", "a")));
        assert!(state.fields["confirm"].valid);
        assert!(state.fields["password"].valid);
        assert!(state.valid);
    }

    #[test]
    fn test_update_patches_flags_only_when_given() {
        let state = reduce(
            &FormState::default(),
            FormAction::SetFields(fields(vec![FieldModel::new("name").disabled(true)])),
        );

        let state = reduce(&state, FormAction::UpdateField(FieldPatch::new("name", "x")));
        assert!(state.fields["name"].disabled);

        let state = reduce(
            &state,
            FormAction::UpdateField(FieldPatch::new("name", "x").disabled(false).readonly(true)),
        );
        assert!(!state.fields["name"].disabled);
        assert!(state.fields["name"].readonly);
    }

    #[test]
    fn test_update_unknown_field_is_noop() {
        let state = password_form();
        let next = reduce(&state, FormAction::UpdateField(FieldPatch::new("ghost", "x")));

        assert_eq!(next.fields, state.fields);
        assert!(next.pristine);
    }

    #[test]
    fn test_remove_field_keeps_stale_validity() {
        let table = rules(vec![("name", vec![required().boxed()])]);
        let state = reduce(
            &FormState::new(table),
            FormAction::SetFields(fields(vec![
                FieldModel::new("name"),
                FieldModel::new("email").value("x@y.io"),
            ])),
        );
        assert!(!state.valid);

        // The only invalid field goes away, the aggregate flag does not follow
        let state = reduce(&state, FormAction::RemoveField("name".to_string()));
        assert!(!state.fields.contains_key("name"));
        assert!(!state.valid);
        assert!(!state.has_invalid_field());

        // The next update recomputes it
        let state = reduce(&state, FormAction::UpdateField(FieldPatch::new("email", "a@b.io")));
        assert!(state.valid);
    }

    #[test]
    fn test_fields_track_add_and_remove_sequences() {
        let mut state = reduce(&FormState::default(), FormAction::SetFields(Fields::new()));
        let mut mounted: Vec<String> = Vec::new();

        let script = [
            ("add", "a"),
            ("add", "b"),
            ("remove", "a"),
            ("add", "c"),
            ("remove", "missing"),
            ("add", "a"),
            ("remove", "b"),
        ];
        for (op, name) in script {
            if op == "add" {
                state = reduce(&state, FormAction::AddField(FieldModel::new(name)));
                mounted.push(name.to_string());
            } else {
                state = reduce(&state, FormAction::RemoveField(name.to_string()));
                mounted.retain(|m| m != name);
            }
            let mut names: Vec<String> = state.fields.keys().cloned().collect();
            names.sort();
            let mut expected = mounted.clone();
            expected.sort();
            assert_eq!(names, expected);
        }
    }
}
