//! Middleware for the dispatch chain.
//!
//! Middleware sits between `dispatch` and the reducer, allowing side effects,
//! logging, and action rewriting to be handled in a composable way.
//!
//! ## Design
//!
//! ```text
//! dispatch(action) → m1 → m2 → m3 → base dispatch → reducer → listeners
//! ```
//!
//! Each middleware can:
//! - Inspect the action and the current state
//! - Dispatch new actions through the whole chain
//! - Transform the action before forwarding it
//! - Stop the action from reaching the reducer
//!
//! Middleware is installed with [`apply_middleware`], which produces an
//! [`Enhancer`](crate::Enhancer) for [`create_store`](crate::create_store).

mod apply;
mod compose;
mod logger;

pub use apply::{apply_middleware, middleware_fn, Link, Middleware, MiddlewareApi};
pub use compose::{compose, Unary};
pub use logger::logger;
