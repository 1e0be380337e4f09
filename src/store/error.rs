use thiserror::Error;

/// Result of a dispatch: the action handed back on success.
pub type DispatchResult<A> = Result<A, DispatchError>;

/// Errors that can occur while dispatching an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The store's own reducer tried to dispatch on the thread that is running it.
    #[error("store is already dispatching an action")]
    Reentrant,

    /// Middleware dispatched through a store that no longer exists.
    #[error("store has been dropped")]
    StoreDropped,
}
