//! Reducers and reducer combination.
//!
//! A reducer computes the next state from the current state and an action.
//! The current state is `None` when it has not been produced yet; the reducer
//! is then expected to return its default.

mod combine;

pub use combine::{combine_optional_reducers, combine_reducers};

use std::sync::Arc;

/// A pure function `(state, action) -> state`.
pub type Reducer<S, A> = Arc<dyn Fn(Option<&S>, &A) -> S + Send + Sync>;

/// Wrap a closure into a [`Reducer`].
pub fn reducer<S, A, F>(f: F) -> Reducer<S, A>
where
    F: Fn(Option<&S>, &A) -> S + Send + Sync + 'static,
{
    Arc::new(f)
}
