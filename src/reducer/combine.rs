use super::Reducer;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Build one reducer from a set of named slice reducers.
///
/// The combined state is a map with exactly one entry per reducer key. Each
/// slice reducer sees only its own slice (`None` if the slice does not exist
/// yet), and keys in the incoming state that have no reducer are dropped.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use tincan_redux::{combine_reducers, create_store, reducer};
///
/// let hits = reducer(|n: Option<&u32>, action: &&'static str| {
///     n.copied().unwrap_or(0) + u32::from(*action == "hit")
/// });
/// let misses = reducer(|n: Option<&u32>, action: &&'static str| {
///     n.copied().unwrap_or(0) + u32::from(*action == "miss")
/// });
///
/// let store = create_store(combine_reducers([("hits", hits), ("misses", misses)]), None, None);
/// store.dispatch("hit").unwrap();
///
/// let state = store.get_state().unwrap();
/// assert_eq!(*state, BTreeMap::from([("hits", 1), ("misses", 0)]));
/// ```
pub fn combine_reducers<K, V, A, I>(reducers: I) -> Reducer<BTreeMap<K, V>, A>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: 'static,
    A: 'static,
    I: IntoIterator<Item = (K, Reducer<V, A>)>,
{
    combine_optional_reducers(reducers.into_iter().map(|(key, r)| (key, Some(r))))
}

/// Like [`combine_reducers`], but entries without a reducer are skipped: their
/// keys never appear in the combined state.
pub fn combine_optional_reducers<K, V, A, I>(reducers: I) -> Reducer<BTreeMap<K, V>, A>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: 'static,
    A: 'static,
    I: IntoIterator<Item = (K, Option<Reducer<V, A>>)>,
{
    let reducers: BTreeMap<K, Reducer<V, A>> = reducers
        .into_iter()
        .filter_map(|(key, r)| r.map(|r| (key, r)))
        .collect();
    log::trace!("combined {} slice reducer(s)", reducers.len());

    Arc::new(move |state: Option<&BTreeMap<K, V>>, action: &A| {
        reducers
            .iter()
            .map(|(key, reduce)| {
                let slice = state.and_then(|state| state.get(key));
                (key.clone(), reduce(slice, action))
            })
            .collect()
    })
}
