//! # Tincan Redux
//!
//! A minimal unidirectional state container for Rust.
//!
//! State lives in a single [`Store`] and only changes when an action is
//! dispatched: the reducer computes the next state, then every listener is
//! notified synchronously.
//!
//! ## Building blocks
//!
//! - [`Store`] - Holds the state, runs the reducer, notifies listeners
//! - [`combine_reducers`] - Builds one reducer out of named slice reducers
//! - [`apply_middleware`] - Enhancer that wraps dispatch in a middleware chain
//! - [`compose`] - Right-to-left function composition
//! - [`bind_action_creators`] - Action creators that dispatch what they build
//!
//! ## Example
//!
//! ```
//! use tincan_redux::{apply_middleware, create_store, logger, reducer};
//!
//! #[derive(Debug)]
//! enum Action {
//!     Increment,
//!     Decrement,
//! }
//!
//! let store = create_store(
//!     reducer(|count: Option<&i64>, action: &Action| {
//!         let count = count.copied().unwrap_or(0);
//!         match action {
//!             Action::Increment => count + 1,
//!             Action::Decrement => count - 1,
//!         }
//!     }),
//!     None,
//!     Some(apply_middleware(vec![logger()])),
//! );
//!
//! store.subscribe(|| println!("state changed"));
//! store.dispatch(Action::Increment).unwrap();
//! store.dispatch(Action::Increment).unwrap();
//! store.dispatch(Action::Decrement).unwrap();
//!
//! assert_eq!(store.get_state().as_deref(), Some(&1));
//! ```

pub mod action;
pub mod middleware;
pub mod reducer;
pub mod store;

// Re-export main types for convenience
pub use action::{
    action_creator, bind_action_creator, bind_action_creators, ActionCreator, BoundActionCreator,
};
pub use middleware::{
    apply_middleware, compose, logger, middleware_fn, Link, Middleware, MiddlewareApi, Unary,
};
pub use reducer::{combine_optional_reducers, combine_reducers, reducer, Reducer};
pub use store::{
    create_store, create_store_with, listener, Dispatch, DispatchError, DispatchResult, Enhancer,
    Listener, Store, StoreArg, StoreCreator, Unsubscribe,
};
