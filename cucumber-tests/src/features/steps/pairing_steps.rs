use cucumber::{given, then, when};
use formwire_compiler::{ClassModel, ErrorMessageSource, FieldModel, Rule};

use crate::features::world::PlanWorld;

fn rule(kind: &str) -> Rule {
    serde_json::from_value(serde_json::json!({ "rule": kind }))
        .unwrap_or_else(|e| panic!("`{}` is not a parameterless rule: {}", kind, e))
}

#[given(expr = "a host type {string} with success callback {string}")]
async fn host_type(world: &mut PlanWorld, name: String, on_success: String) {
    world.class = Some(ClassModel::new(name, on_success));
}

#[given("data binding is enabled")]
async fn data_binding(world: &mut PlanWorld) {
    world.options = world.options.clone().with_data_binding(true);
}

#[given(expr = "field {string} declares {word}")]
async fn field_declares(world: &mut PlanWorld, name: String, kind: String) {
    world.class_mut().fields.push(FieldModel::new(name, rule(&kind)));
}

#[given(expr = "field {string} declares {word} with message {string}")]
async fn field_declares_message(
    world: &mut PlanWorld,
    name: String,
    kind: String,
    message: String,
) {
    let field = FieldModel::new(name, rule(&kind)).with_error_message(message);
    world.class_mut().fields.push(field);
}

#[given(expr = "field {string} declares {word} with resource {int}")]
async fn field_declares_resource(world: &mut PlanWorld, name: String, kind: String, id: i32) {
    let field = FieldModel::new(name, rule(&kind)).with_error_message_res(id);
    world.class_mut().fields.push(field);
}

#[given(expr = "{string} is the validate action")]
async fn validate_action(world: &mut PlanWorld, name: String) {
    world.class_mut().validate_action = Some(name);
}

#[when("I plan the host type")]
async fn plan(world: &mut PlanWorld) {
    let class = world.class.as_ref().expect("no host type declared");
    match formwire_compiler::plan(class, &world.options) {
        Ok(plan) => world.plan = Some(plan),
        Err(e) => world.error = Some(e.to_string()),
    }
}

#[then(expr = "the unit should be {string}")]
async fn unit_name(world: &mut PlanWorld, expected: String) {
    assert_eq!(world.plan().unit, expected);
}

#[then(expr = "the variant should be {word}")]
async fn variant(world: &mut PlanWorld, expected: String) {
    let actual = serde_json::to_value(world.plan().variant).expect("variant serializes");
    assert_eq!(actual, serde_json::Value::String(expected));
}

#[then(expr = "the plan should list {int} validator(s)")]
async fn validator_count(world: &mut PlanWorld, expected: usize) {
    assert_eq!(world.plan().descriptors.len(), expected);
}

#[then(expr = "validator {int} should be {word} bound to {string}")]
async fn validator_binding(world: &mut PlanWorld, index: usize, kind: String, targets: String) {
    let descriptor = &world.plan().descriptors[index - 1];
    assert_eq!(descriptor.kind.type_name(), kind);
    assert_eq!(descriptor.targets.join(", "), targets);
}

#[then(expr = "validator {int} should use resource {int}")]
async fn validator_resource(world: &mut PlanWorld, index: usize, id: i32) {
    assert_eq!(world.plan().descriptors[index - 1].message, ErrorMessageSource::Resource(id));
}

#[then(expr = "validator {int} should use message {string}")]
async fn validator_literal(world: &mut PlanWorld, index: usize, message: String) {
    assert_eq!(world.plan().descriptors[index - 1].message, ErrorMessageSource::Literal(message));
}

#[then(expr = "planning should fail with {string}")]
async fn planning_fails(world: &mut PlanWorld, expected: String) {
    let error = world.error.as_deref().expect("planning succeeded");
    assert!(error.contains(&expected), "unexpected error: {}", error);
}
