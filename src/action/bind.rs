use crate::store::{Dispatch, DispatchResult};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Builds an action from a payload. Use `()` as the payload for creators
/// that take no arguments.
pub type ActionCreator<P, A> = Arc<dyn Fn(P) -> A + Send + Sync>;

/// An action creator that dispatches the action it builds.
pub type BoundActionCreator<P, A> = Arc<dyn Fn(P) -> DispatchResult<A> + Send + Sync>;

/// Wrap a closure into an [`ActionCreator`].
pub fn action_creator<P, A, F>(f: F) -> ActionCreator<P, A>
where
    F: Fn(P) -> A + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Bind a single creator: calling the result builds the action and
/// dispatches it, returning dispatch's result.
pub fn bind_action_creator<P, A>(
    creator: ActionCreator<P, A>,
    dispatch: Dispatch<A>,
) -> BoundActionCreator<P, A>
where
    P: 'static,
    A: 'static,
{
    Arc::new(move |payload: P| dispatch(creator(payload)))
}

/// Bind every creator in `creators` to `dispatch`, keeping their keys.
///
/// Nothing is dispatched until a bound creator is called.
///
/// # Examples
///
/// ```
/// use tincan_redux::{action_creator, bind_action_creators, create_store, reducer};
///
/// #[derive(Debug, PartialEq)]
/// enum Action {
///     Add(i32),
///     Reset,
/// }
///
/// let store = create_store(
///     reducer(|n: Option<&i32>, action: &Action| match action {
///         Action::Add(k) => n.copied().unwrap_or(0) + k,
///         Action::Reset => 0,
///     }),
///     None,
///     None,
/// );
///
/// let actions = bind_action_creators(
///     [
///         ("add", action_creator(Action::Add)),
///         ("reset", action_creator(|_: i32| Action::Reset)),
///     ],
///     store.dispatcher(),
/// );
///
/// assert_eq!(actions["add"](5), Ok(Action::Add(5)));
/// assert_eq!(store.get_state().as_deref(), Some(&5));
/// actions["reset"](0).unwrap();
/// assert_eq!(store.get_state().as_deref(), Some(&0));
/// ```
pub fn bind_action_creators<K, P, A, I>(
    creators: I,
    dispatch: Dispatch<A>,
) -> BTreeMap<K, BoundActionCreator<P, A>>
where
    K: Ord,
    P: 'static,
    A: 'static,
    I: IntoIterator<Item = (K, ActionCreator<P, A>)>,
{
    creators
        .into_iter()
        .map(|(key, creator)| (key, bind_action_creator(creator, Arc::clone(&dispatch))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{apply_middleware, middleware_fn, MiddlewareApi};
    use crate::reducer::reducer;
    use crate::store::create_store;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Action {
        Rename(String),
        Clear,
    }

    fn name() -> crate::reducer::Reducer<String, Action> {
        reducer(|_state: Option<&String>, action: &Action| match action {
            Action::Rename(name) => name.clone(),
            Action::Clear => String::new(),
        })
    }

    #[test]
    fn binding_does_not_dispatch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let dispatch: Dispatch<Action> = Arc::new(move |action: Action| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            Ok(action)
        });

        let bound = bind_action_creators(
            [
                ("rename", action_creator(Action::Rename)),
                ("rename_again", action_creator(Action::Rename)),
            ],
            dispatch,
        );
        assert_eq!(bound.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(
            bound["rename"]("tin".to_string()),
            Ok(Action::Rename("tin".to_string()))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn bound_creator_updates_the_store() {
        let store = create_store(name(), None, None);
        let clear = bind_action_creator(action_creator(|()| Action::Clear), store.dispatcher());
        let rename = bind_action_creator(action_creator(Action::Rename), store.dispatcher());

        rename("can".to_string()).unwrap();
        assert_eq!(store.get_state().as_deref().map(String::as_str), Some("can"));

        clear(()).unwrap();
        assert_eq!(store.get_state().as_deref().map(String::as_str), Some(""));
    }

    #[test]
    fn bound_creator_goes_through_middleware() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let spy = middleware_fn(
            move |_api: &MiddlewareApi<String, Action>,
                  next: &Dispatch<Action>,
                  action: Action| {
                seen_clone.lock().unwrap().push(action.clone());
                next(action)
            },
        );
        let store = create_store(name(), None, Some(apply_middleware(vec![spy])));
        let rename = bind_action_creator(action_creator(Action::Rename), store.dispatcher());

        rename("x".to_string()).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![Action::Rename("x".to_string())]);
    }
}
