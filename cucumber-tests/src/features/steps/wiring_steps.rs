use cucumber::{given, then, when};

use crate::features::world::{Interaction, WiringWorld};

#[given(regex = r#"^the sign-up form is filled with "([^"]*)", "([^"]*)" and "([^"]*)"$"#)]
async fn form_filled(world: &mut WiringWorld, username: String, password: String, confirm: String) {
    world.username = username;
    world.password = password;
    world.confirm_password = confirm;
}

#[when("I submit the form")]
async fn submit(world: &mut WiringWorld) {
    world.interactions.push(Interaction::Submit);
}

#[when("I reset the form")]
async fn reset(world: &mut WiringWorld) {
    world.interactions.push(Interaction::Reset);
}

#[when(expr = "I type {string} into {word}")]
async fn type_into(world: &mut WiringWorld, text: String, input: String) {
    world.interactions.push(Interaction::Type { input, text });
}

#[then(expr = "the success callback should have run {int} time(s)")]
async fn successes(world: &mut WiringWorld, expected: usize) {
    assert_eq!(world.replay().successes, expected);
}

#[then("the error callback should not have run")]
async fn no_failures(world: &mut WiringWorld) {
    let outcome = world.replay();
    assert!(outcome.failures.is_empty(), "unexpected failures: {:?}", outcome.failures);
}

#[then(regex = r#"^the error callback should have received "([^"]*)"$"#)]
async fn last_failure(world: &mut WiringWorld, expected: String) {
    let outcome = world.replay();
    let last = outcome.failures.last().expect("the error callback never ran");
    let expected: Vec<String> = expected.split(" | ").map(str::to_string).collect();
    assert_eq!(*last, expected);
}

#[then(expr = "every submission should report the same errors")]
async fn same_failures(world: &mut WiringWorld) {
    let outcome = world.replay();
    assert!(outcome.failures.len() > 1, "expected several submissions");
    assert!(outcome.failures.windows(2).all(|pair| pair[0] == pair[1]));
}

#[then(expr = "{word} should show {string}")]
async fn input_shows(world: &mut WiringWorld, input: String, error: String) {
    assert_eq!(world.replay().input_error(&input), Some(error.as_str()));
}

#[then(expr = "{word} should show no error")]
async fn input_clean(world: &mut WiringWorld, input: String) {
    assert_eq!(world.replay().input_error(&input), None);
}

#[then("no input should show an error")]
async fn all_clean(world: &mut WiringWorld) {
    let outcome = world.replay();
    for (input, error) in &outcome.input_errors {
        assert!(error.is_none(), "{} still shows {:?}", input, error);
    }
}
