//! The store: current state, the reducer, and subscribed listeners.
//!
//! Stores are created with [`create_store`] (or its two-argument form
//! [`create_store_with`]) and optionally built through an [`Enhancer`] such as
//! the one returned by [`apply_middleware`](crate::apply_middleware).

mod error;
mod store;

pub(crate) use store::{read_lock, write_lock};
pub use error::{DispatchError, DispatchResult};
pub use store::{
    create_store, create_store_with, listener, Dispatch, Enhancer, Listener, Store, StoreArg,
    StoreCreator, Unsubscribe,
};
