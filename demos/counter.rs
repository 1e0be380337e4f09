//! Counter application with middleware, combined reducers and bound action creators

use std::sync::Arc;
use tincan_redux::{
    action_creator, apply_middleware, bind_action_creators, combine_reducers, create_store,
    logger, middleware_fn, reducer, Dispatch, MiddlewareApi,
};

#[derive(Clone, Debug)]
enum Action {
    Increment,
    Decrement,
    Reset,
}

type State = std::collections::BTreeMap<&'static str, i32>;

fn main() {
    env_logger::init();
    println!("=== Complete Counter Application ===\n");

    let count = reducer(|count: Option<&i32>, action: &Action| {
        let count = count.copied().unwrap_or(0);
        match action {
            Action::Increment => count + 1,
            Action::Decrement => count - 1,
            Action::Reset => 0,
        }
    });
    let changes = reducer(|changes: Option<&i32>, _: &Action| changes.copied().unwrap_or(0) + 1);

    // Refuse to go below zero.
    let floor = middleware_fn(
        |api: &MiddlewareApi<State, Action>, next: &Dispatch<Action>, action: Action| {
            let count = api
                .get_state()
                .and_then(|s| s.get("count").copied())
                .unwrap_or(0);
            match action {
                Action::Decrement if count == 0 => {
                    println!("   [floor] ignoring decrement at zero");
                    Ok(action)
                }
                other => next(other),
            }
        },
    );

    println!("1. Creating store with logger and floor middleware");
    let store = create_store(
        combine_reducers([("count", count), ("changes", changes)]),
        None,
        Some(apply_middleware(vec![logger(), floor])),
    );

    let reader = store.clone();
    store.subscribe(move || {
        if let Some(state) = reader.get_state() {
            println!("   [State] {:?}", state);
        }
    });

    println!("\n2. Binding action creators");
    let actions = bind_action_creators(
        [
            ("increment", action_creator(|()| Action::Increment)),
            ("decrement", action_creator(|()| Action::Decrement)),
            ("reset", action_creator(|()| Action::Reset)),
        ],
        store.dispatcher(),
    );

    println!("\n3. Dispatching");
    for name in ["increment", "increment", "decrement", "reset", "decrement"] {
        println!(" -> {}", name);
        if let Err(err) = actions[name](()) {
            println!("   dispatch failed: {}", err);
        }
    }

    let state = store.get_state().unwrap_or_else(|| Arc::new(State::new()));
    println!("\n4. Final state: {:?}", state);
    println!("\n✓ Example complete!");
}
