use super::compose::{compose, Unary};
use crate::reducer::Reducer;
use crate::store::{
    read_lock, write_lock, Dispatch, DispatchError, DispatchResult, Enhancer, Store, StoreCreator,
};
use std::sync::{Arc, RwLock, Weak};

/// One link of the dispatch chain: given the next dispatch, returns a dispatch.
pub type Link<A> = Unary<Dispatch<A>>;

/// A dispatch interceptor with access to the store.
///
/// Middleware is called once per store with a [`MiddlewareApi`] and returns
/// the [`Link`] it contributes to the chain.
pub type Middleware<S, A> = Arc<dyn Fn(&MiddlewareApi<S, A>) -> Link<A> + Send + Sync>;

/// The store as seen by middleware.
///
/// `dispatch` always goes through the complete chain, even when the
/// middleware captured this API before the chain was finished.
pub struct MiddlewareApi<S, A> {
    store: Store<S, A>,
    dispatch: Weak<RwLock<Dispatch<A>>>,
}

impl<S, A> MiddlewareApi<S, A> {
    /// Get the current state of the underlying store.
    pub fn get_state(&self) -> Option<Arc<S>> {
        self.store.get_state()
    }

    /// Dispatch an action from the start of the chain.
    pub fn dispatch(&self, action: A) -> DispatchResult<A> {
        let Some(cell) = self.dispatch.upgrade() else {
            return Err(DispatchError::StoreDropped);
        };
        let dispatch = Arc::clone(&*read_lock(&cell));
        dispatch(action)
    }
}

impl<S, A> Clone for MiddlewareApi<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            dispatch: Weak::clone(&self.dispatch),
        }
    }
}

/// Build a middleware from a single handler `(api, next, action) -> result`.
///
/// The handler decides whether to call `next`; not calling it stops the
/// action from reaching the reducer.
///
/// # Example
///
/// ```
/// use tincan_redux::{apply_middleware, create_store, middleware_fn, reducer, Dispatch, MiddlewareApi};
///
/// // Double every action before it reaches the reducer.
/// let doubler = middleware_fn(|_api: &MiddlewareApi<i32, i32>, next: &Dispatch<i32>, action: i32| {
///     next(action * 2)
/// });
///
/// let store = create_store(
///     reducer(|sum: Option<&i32>, n: &i32| sum.copied().unwrap_or(0) + n),
///     Some(0),
///     Some(apply_middleware(vec![doubler])),
/// );
///
/// assert_eq!(store.dispatch(4), Ok(8));
/// assert_eq!(store.get_state().as_deref(), Some(&8));
/// ```
pub fn middleware_fn<S, A, F>(handler: F) -> Middleware<S, A>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
    F: Fn(&MiddlewareApi<S, A>, &Dispatch<A>, A) -> DispatchResult<A> + Send + Sync + 'static,
{
    let handler = Arc::new(handler);
    Arc::new(move |api: &MiddlewareApi<S, A>| -> Link<A> {
        let handler = Arc::clone(&handler);
        let api = api.clone();
        Arc::new(move |next: Dispatch<A>| -> Dispatch<A> {
            let handler = Arc::clone(&handler);
            let api = api.clone();
            Arc::new(move |action: A| handler(&api, &next, action))
        })
    })
}

/// Create an enhancer that runs every dispatch through `middlewares`.
///
/// For `[m1, m2, m3]` an action flows `m1 → m2 → m3 → base dispatch`.
pub fn apply_middleware<S, A>(middlewares: Vec<Middleware<S, A>>) -> Enhancer<S, A>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    let middlewares: Arc<[Middleware<S, A>]> = middlewares.into();

    Enhancer::new(move |create: StoreCreator<S, A>| -> StoreCreator<S, A> {
        let middlewares = Arc::clone(&middlewares);
        Arc::new(
            move |reducer: Reducer<S, A>,
                  preloaded_state: Option<S>,
                  enhancer: Option<Enhancer<S, A>>| {
                let store = create(reducer, preloaded_state, enhancer);
                let next = store.dispatcher();

                // Late-bound: seeded with the store's dispatch, replaced by the full chain below.
                let cell = Arc::new(RwLock::new(Arc::clone(&next)));
                let api = MiddlewareApi {
                    store: store.clone(),
                    dispatch: Arc::downgrade(&cell),
                };

                let chain: Vec<Link<A>> = middlewares.iter().map(|m| m(&api)).collect();
                *write_lock(&cell) = compose(chain)(next);
                log::debug!("installed {} middleware(s)", middlewares.len());

                store.with_dispatch(Arc::new(move |action: A| {
                    let dispatch = Arc::clone(&*read_lock(&cell));
                    dispatch(action)
                }))
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::reducer;
    use crate::store::{create_store, create_store_with, StoreArg};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Action {
        Inc,
        Add(i32),
        Ignored,
    }

    fn counter() -> Reducer<i32, Action> {
        reducer(|state: Option<&i32>, action: &Action| {
            let state = state.copied().unwrap_or(0);
            match action {
                Action::Inc => state + 1,
                Action::Add(n) => state + n,
                Action::Ignored => state,
            }
        })
    }

    fn tagging(tag: &'static str, log: Arc<Mutex<Vec<&'static str>>>) -> Middleware<i32, Action> {
        middleware_fn(
            move |_api: &MiddlewareApi<i32, Action>, next: &Dispatch<Action>, action: Action| {
                log.lock().unwrap().push(tag);
                next(action)
            },
        )
    }

    #[test]
    fn chain_runs_in_order_before_base_dispatch() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let reducer_log = log.clone();
        let inner = counter();
        let logged_reducer = reducer(move |state: Option<&i32>, action: &Action| {
            reducer_log.lock().unwrap().push("reducer");
            inner(state, action)
        });

        let store = create_store(
            logged_reducer,
            Some(0),
            Some(apply_middleware(vec![
                tagging("m1", log.clone()),
                tagging("m2", log.clone()),
                tagging("m3", log.clone()),
            ])),
        );

        store.dispatch(Action::Inc).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["m1", "m2", "m3", "reducer"]);
        assert_eq!(store.get_state().as_deref(), Some(&1));
    }

    #[test]
    fn middleware_can_short_circuit() {
        let blocker = middleware_fn(
            |_api: &MiddlewareApi<i32, Action>, next: &Dispatch<Action>, action: Action| {
                match action {
                    Action::Ignored => Ok(action),
                    other => next(other),
                }
            },
        );
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let store = create_store(
            reducer(move |state: Option<&i32>, action: &Action| {
                seen_clone.lock().unwrap().push(action.clone());
                state.copied().unwrap_or(0)
            }),
            Some(0),
            Some(apply_middleware(vec![blocker])),
        );

        store.dispatch(Action::Ignored).unwrap();
        store.dispatch(Action::Inc).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![Action::Inc]);
    }

    #[test]
    fn api_dispatch_goes_through_the_whole_chain() {
        let log = Arc::new(Mutex::new(Vec::new()));

        // Expands Add(n) into n increments, each dispatched from the top.
        let expander = middleware_fn(
            |api: &MiddlewareApi<i32, Action>, next: &Dispatch<Action>, action: Action| {
                match action {
                    Action::Add(n) => {
                        for _ in 0..n {
                            api.dispatch(Action::Inc)?;
                        }
                        Ok(Action::Add(n))
                    }
                    other => next(other),
                }
            },
        );

        let store = create_store(
            counter(),
            Some(0),
            Some(apply_middleware(vec![tagging("outer", log.clone()), expander])),
        );

        assert_eq!(store.dispatch(Action::Add(3)), Ok(Action::Add(3)));
        assert_eq!(store.get_state().as_deref(), Some(&3));
        assert_eq!(log.lock().unwrap().len(), 4);
    }

    #[test]
    fn api_reads_state_of_the_real_store() {
        let observed = Arc::new(Mutex::new(Vec::new()));
        let observed_clone = observed.clone();
        let observer = middleware_fn(
            move |api: &MiddlewareApi<i32, Action>, next: &Dispatch<Action>, action: Action| {
                let before = api.get_state().map(|s| *s);
                let result = next(action);
                let after = api.get_state().map(|s| *s);
                observed_clone.lock().unwrap().push((before, after));
                result
            },
        );

        let store = create_store(counter(), Some(5), Some(apply_middleware(vec![observer])));
        store.dispatch(Action::Inc).unwrap();
        assert_eq!(*observed.lock().unwrap(), vec![(Some(5), Some(6))]);
    }

    #[test]
    fn preloaded_state_survives_the_enhancer() {
        let store = create_store(
            counter(),
            Some(41),
            Some(apply_middleware(vec![tagging("m", Arc::default())])),
        );
        assert_eq!(store.get_state().as_deref(), Some(&41));

        let store = create_store_with(
            counter(),
            StoreArg::Enhancer(apply_middleware(vec![tagging("m", Arc::default())])),
        );
        assert!(store.get_state().is_none());
        store.dispatch(Action::Inc).unwrap();
        assert_eq!(store.get_state().as_deref(), Some(&1));
    }

    #[test]
    fn empty_middleware_list_keeps_plain_dispatch() {
        let store = create_store(counter(), Some(0), Some(apply_middleware(Vec::new())));
        assert_eq!(store.dispatch(Action::Add(2)), Ok(Action::Add(2)));
        assert_eq!(store.get_state().as_deref(), Some(&2));
    }

    #[test]
    fn base_dispatch_bypasses_middleware() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let store = create_store(
            counter(),
            Some(0),
            Some(apply_middleware(vec![tagging("m", log.clone())])),
        );

        (store.base_dispatch())(Action::Inc).unwrap();
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(store.get_state().as_deref(), Some(&1));
    }

    #[test]
    fn api_dispatch_after_store_dropped() {
        let stash: Arc<Mutex<Option<MiddlewareApi<i32, Action>>>> = Arc::default();
        let stash_clone = stash.clone();
        let grabber: Middleware<i32, Action> = Arc::new(move |api: &MiddlewareApi<i32, Action>| {
            *stash_clone.lock().unwrap() = Some(api.clone());
            Arc::new(|next: Dispatch<Action>| next) as Link<Action>
        });

        let store = create_store(counter(), Some(0), Some(apply_middleware(vec![grabber])));
        drop(store);

        let api = stash.lock().unwrap().take().unwrap();
        assert_eq!(api.dispatch(Action::Inc), Err(DispatchError::StoreDropped));
    }
}
