use crate::reducer::Reducer;
use crate::store::error::{DispatchError, DispatchResult};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak,
};
use std::thread::{self, ThreadId};

/// A zero-argument callback notified after every successful dispatch.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// A dispatch function: takes an action, hands it back once it has been reduced.
pub type Dispatch<A> = Arc<dyn Fn(A) -> DispatchResult<A> + Send + Sync>;

/// The signature of [`create_store`] as a value, so enhancers can wrap it.
pub type StoreCreator<S, A> =
    Arc<dyn Fn(Reducer<S, A>, Option<S>, Option<Enhancer<S, A>>) -> Store<S, A> + Send + Sync>;

/// A transformation over store creation, used to inject middleware or other augmentation.
///
/// An enhancer receives the store creator it wraps and returns a creator with
/// the same signature.
pub struct Enhancer<S, A>(Arc<dyn Fn(StoreCreator<S, A>) -> StoreCreator<S, A> + Send + Sync>);

impl<S, A> Enhancer<S, A> {
    /// Wrap a closure into an [`Enhancer`].
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(StoreCreator<S, A>) -> StoreCreator<S, A> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wrap `base`, returning the enhanced store creator.
    pub fn apply(&self, base: StoreCreator<S, A>) -> StoreCreator<S, A> {
        (self.0)(base)
    }
}

impl<S, A> Clone for Enhancer<S, A> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

type ListenerList = Arc<RwLock<Vec<Listener>>>;

/// Wrap a closure into a [`Listener`].
///
/// Keep the returned `Arc` around to register it more than once or to remove it
/// later with [`Store::unsubscribe`].
pub fn listener<F>(f: F) -> Listener
where
    F: Fn() + Send + Sync + 'static,
{
    Arc::new(f)
}

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the reducer lock and clears the owning thread when the reducer
/// returns or unwinds.
struct DispatchGuard<'a> {
    owner: &'a Mutex<Option<ThreadId>>,
    _reducing: MutexGuard<'a, ()>,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        *lock(self.owner) = None;
    }
}

struct StoreInner<S, A> {
    reducer: Reducer<S, A>,
    state: RwLock<Option<Arc<S>>>,
    listeners: ListenerList,
    // Thread currently running the reducer, used to spot nested dispatches.
    owner: Mutex<Option<ThreadId>>,
    reducing: Mutex<()>,
}

impl<S, A> StoreInner<S, A> {
    fn dispatch(&self, action: A) -> DispatchResult<A> {
        let current_thread = thread::current().id();
        if *lock(&self.owner) == Some(current_thread) {
            log::debug!("rejected nested dispatch: store is already reducing an action");
            return Err(DispatchError::Reentrant);
        }

        {
            // Dispatches from other threads wait here for the running reducer.
            let reducing = lock(&self.reducing);
            *lock(&self.owner) = Some(current_thread);
            let _guard = DispatchGuard {
                owner: &self.owner,
                _reducing: reducing,
            };

            // Clone the reference out so the reducer may call get_state.
            let current = read_lock(&self.state).clone();
            let next = (self.reducer)(current.as_deref(), &action);
            *write_lock(&self.state) = Some(Arc::new(next));
        }

        // Snapshot, so listeners may subscribe or unsubscribe while being notified.
        let listeners = read_lock(&self.listeners).clone();
        log::trace!("state replaced, notifying {} listener(s)", listeners.len());
        for listener in listeners.iter() {
            listener();
        }

        Ok(action)
    }
}

/// The single source of truth for an application's state.
///
/// State only changes by dispatching actions through the reducer. Listeners
/// are notified synchronously after every successful dispatch. Cloning a
/// store yields another handle to the same state.
///
/// # Examples
///
/// ```
/// use tincan_redux::{create_store, reducer};
///
/// let store = create_store(
///     reducer(|count: Option<&i32>, step: &i32| count.copied().unwrap_or(0) + step),
///     None,
///     None,
/// );
///
/// store.dispatch(2).unwrap();
/// store.dispatch(3).unwrap();
/// assert_eq!(store.get_state().as_deref(), Some(&5));
/// ```
pub struct Store<S, A> {
    inner: Arc<StoreInner<S, A>>,
    dispatch: Dispatch<A>,
}

impl<S, A> Store<S, A>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    /// Create a store directly, without an enhancer.
    ///
    /// With no preloaded state, [`get_state`](Store::get_state) returns `None`
    /// until the first dispatch.
    pub fn new(reducer: Reducer<S, A>, preloaded_state: Option<S>) -> Self {
        let inner = Arc::new(StoreInner {
            reducer,
            state: RwLock::new(preloaded_state.map(Arc::new)),
            listeners: Arc::new(RwLock::new(Vec::new())),
            owner: Mutex::new(None),
            reducing: Mutex::new(()),
        });
        let dispatch = Self::dispatch_to(&inner);
        Self { inner, dispatch }
    }

    fn dispatch_to(inner: &Arc<StoreInner<S, A>>) -> Dispatch<A> {
        let inner = Arc::clone(inner);
        Arc::new(move |action| inner.dispatch(action))
    }

    /// The dispatch function that goes straight to the reducer, bypassing
    /// any installed middleware.
    pub fn base_dispatch(&self) -> Dispatch<A> {
        Self::dispatch_to(&self.inner)
    }

    /// Replace this handle's dispatch function.
    ///
    /// Enhancers use this to install a wrapped dispatch on the store they return.
    pub fn with_dispatch(mut self, dispatch: Dispatch<A>) -> Self {
        self.dispatch = dispatch;
        self
    }
}

impl<S, A> Store<S, A> {
    /// Get the current state.
    pub fn get_state(&self) -> Option<Arc<S>> {
        read_lock(&self.inner.state).clone()
    }

    /// Read the state with a function.
    ///
    /// The function sees the state as it was when `read` was called and may
    /// dispatch on this store.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(Option<&S>) -> R,
    {
        let state = self.get_state();
        f(state.as_deref())
    }

    /// Dispatch an action through the installed dispatch chain.
    ///
    /// Returns the action once the reducer has run and listeners have been
    /// notified, or [`DispatchError::Reentrant`] if called from inside this
    /// store's reducer. A dispatch from another thread waits for the running
    /// reducer to finish.
    pub fn dispatch(&self, action: A) -> DispatchResult<A> {
        (self.dispatch)(action)
    }

    /// The dispatch function currently installed on this handle.
    pub fn dispatcher(&self) -> Dispatch<A> {
        Arc::clone(&self.dispatch)
    }

    /// Subscribe to state changes.
    ///
    /// The callback is called after every successful dispatch, in subscription
    /// order.
    pub fn subscribe<F>(&self, callback: F) -> Unsubscribe
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe_listener(listener(callback))
    }

    /// Register an existing listener. The same listener may be registered
    /// several times; each registration is notified and removed separately.
    pub fn subscribe_listener(&self, listener: Listener) -> Unsubscribe {
        let mut listeners = write_lock(&self.inner.listeners);
        listeners.push(Arc::clone(&listener));
        log::trace!("listener subscribed ({} total)", listeners.len());

        Unsubscribe {
            listener,
            listeners: Arc::downgrade(&self.inner.listeners),
        }
    }

    /// Remove the first registration of `listener`.
    ///
    /// Returns `false` if the listener was not registered.
    pub fn unsubscribe(&self, listener: &Listener) -> bool {
        remove_first(&self.inner.listeners, listener)
    }

    /// Number of active listener registrations.
    pub fn listener_count(&self) -> usize {
        read_lock(&self.inner.listeners).len()
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dispatch: Arc::clone(&self.dispatch),
        }
    }
}

fn remove_first(listeners: &RwLock<Vec<Listener>>, listener: &Listener) -> bool {
    let mut listeners = write_lock(listeners);
    match listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
        Some(index) => {
            listeners.remove(index);
            log::trace!("listener unsubscribed ({} left)", listeners.len());
            true
        }
        None => false,
    }
}

/// Handle returned by [`Store::subscribe`] that removes the registration.
///
/// Dropping the handle leaves the listener subscribed.
pub struct Unsubscribe {
    listener: Listener,
    listeners: Weak<RwLock<Vec<Listener>>>,
}

impl Unsubscribe {
    /// Remove the listener this handle was created for.
    ///
    /// Removes the first matching registration. Does nothing if the listener
    /// is already gone or the store has been dropped.
    pub fn unsubscribe(self) -> bool {
        match self.listeners.upgrade() {
            Some(listeners) => remove_first(&listeners, &self.listener),
            None => false,
        }
    }

    /// The listener this handle refers to.
    pub fn listener(&self) -> &Listener {
        &self.listener
    }
}

/// The second argument of the two-argument [`create_store_with`] overload.
pub enum StoreArg<S, A> {
    /// Preloaded state.
    State(S),
    /// An enhancer; the store starts with no state.
    Enhancer(Enhancer<S, A>),
}

impl<S, A> From<Enhancer<S, A>> for StoreArg<S, A> {
    fn from(enhancer: Enhancer<S, A>) -> Self {
        StoreArg::Enhancer(enhancer)
    }
}

/// Create a store.
///
/// When an enhancer is given, construction is handed over to it entirely:
/// the enhancer receives `create_store` itself and must build the final store.
pub fn create_store<S, A>(
    reducer: Reducer<S, A>,
    preloaded_state: Option<S>,
    enhancer: Option<Enhancer<S, A>>,
) -> Store<S, A>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    if let Some(enhancer) = enhancer {
        let base: StoreCreator<S, A> = Arc::new(create_store::<S, A>);
        return enhancer.apply(base)(reducer, preloaded_state, None);
    }

    Store::new(reducer, preloaded_state)
}

/// Two-argument form of [`create_store`]: the second argument is either the
/// preloaded state or an enhancer.
pub fn create_store_with<S, A>(reducer: Reducer<S, A>, arg: StoreArg<S, A>) -> Store<S, A>
where
    S: Send + Sync + 'static,
    A: Send + 'static,
{
    match arg {
        StoreArg::State(state) => create_store(reducer, Some(state), None),
        StoreArg::Enhancer(enhancer) => create_store(reducer, None, Some(enhancer)),
    }
}
