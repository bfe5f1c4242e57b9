// File: starter-forms/tests/form_lifecycle.rs
// Purpose: End-to-end form lifecycle (register, mount, edit, validate, submit)

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use starter_forms::{
    email, field_compare, length, number, required, FieldModel, FieldPatch, Fields, Form, FormData, RuleRegistry,
    Validation,
};

fn registration_form() -> Form {
    let mut registry = RuleRegistry::with_builtins();
    registry.register("count", |options: &Value| {
        let exact = options["exact"].as_u64().unwrap_or(0) as usize;
        let rule = move |value: &Value, _: &FieldModel, _: &Fields| match value.as_array() {
            Some(items) if items.len() == exact => None,
            _ => Some(Validation::invalid(format!("Choose any {exact}"))),
        };
        Ok(starter_forms::Rule::boxed(rule))
    });

    Form::builder("registration")
        .rule("name", required().message("Name is required"))
        .rule("name", length().min(3).max(20))
        .rule("email", required())
        .rule("email", email())
        .rule("age", number().min(18.0).max(99.0))
        .rule("password", length().min(3))
        .rule("confirm", field_compare("password"))
        .rule_registry(registry)
        .rule_named("sports", "count", &json!({"exact": 2}))
        .unwrap()
        .build()
}

fn mount(form: &mut Form) {
    form.register_field(FieldModel::new("name").label("Name"));
    form.register_field(FieldModel::new("email").label("Email"));
    form.register_field(FieldModel::new("age").label("Age").default_value(30));
    form.register_field(FieldModel::new("password").label("Password"));
    form.register_field(FieldModel::new("confirm").label("Confirm password"));
    form.register_field(FieldModel::new("sports").label("Sports").default_value(json!([])));
    form.register_field(FieldModel::new("user_id").value("u-1").disabled(true));
    form.mount_complete();
}

#[test]
fn test_fresh_form_is_invalid_but_silent() {
    let mut form = registration_form();
    mount(&mut form);

    let state = form.state();
    assert!(state.initialized);
    assert!(state.pristine);
    assert!(!state.valid);
    assert!(state.fields.values().all(|f| f.visible_message().is_none()));
}

#[test]
fn test_filling_the_form_makes_it_valid() {
    let mut form = registration_form();
    let changes: Arc<Mutex<Vec<FormData>>> = Arc::new(Mutex::new(Vec::new()));
    let log = changes.clone();
    form.on_change(move |data| log.lock().unwrap().push(data.clone()));
    mount(&mut form);

    form.set_value("name", "Ada");
    form.set_value("email", "ada@example.com");
    form.set_value("password", "secret");
    form.set_value("confirm", "secret");
    assert!(!form.state().valid);
    assert_eq!(form.field("sports").unwrap().message, "Choose any 2");

    form.set_value("sports", json!(["soccer", "hockey"]));
    assert!(form.state().valid);

    let last = changes.lock().unwrap().last().cloned().unwrap();
    assert!(last.valid);
    assert!(!last.pristine);
    assert!(!last.data.contains_key("user_id"));
    assert_eq!(last.data["age"], json!(30));
}

#[test]
fn test_messages_surface_after_edit() {
    let mut form = registration_form();
    mount(&mut form);

    form.set_value("name", "Al");
    assert_eq!(
        form.field("name").unwrap().visible_message(),
        Some("Name must be a minimum of 3 characters")
    );

    form.set_value("email", "not-an-email");
    assert_eq!(
        form.field("email").unwrap().visible_message(),
        Some("Email must be a valid email")
    );

    form.set_value("age", "12");
    assert_eq!(
        form.field("age").unwrap().visible_message(),
        Some("Age is an invalid number")
    );

    // untouched fields stay quiet
    assert_eq!(form.field("password").unwrap().visible_message(), None);
}

#[test]
fn test_password_confirmation_pair() {
    let mut form = registration_form();
    mount(&mut form);

    form.set_value("password", "a");
    form.set_value("confirm", "b");
    assert_eq!(
        form.field("confirm").unwrap().message,
        "Confirm password must be same as Password"
    );

    form.set_value("confirm", "a");
    assert!(form.field("confirm").unwrap().valid);
}

#[test]
fn test_disabling_a_field_removes_it_from_submission() {
    let mut form = registration_form();
    mount(&mut form);
    form.update_field(FieldPatch::new("name", "Ada").disabled(true));

    let submission = form.submit();
    assert!(submission.fields["name"].disabled);
    assert!(!submission.data.contains_key("name"));
    assert!(!submission.data.contains_key("user_id"));
    assert!(submission.data.contains_key("email"));
}

#[test]
fn test_late_field_joins_after_mount() {
    let mut form = registration_form();
    mount(&mut form);

    form.register_field(FieldModel::new("newsletter").field_type("checkbox").value(false));
    form.remove_field("sports");

    let names: Vec<&str> = {
        let mut names: Vec<&str> = form.state().fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    };
    assert_eq!(
        names,
        vec!["age", "confirm", "email", "name", "newsletter", "password", "user_id"]
    );
}
