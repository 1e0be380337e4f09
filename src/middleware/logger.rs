use super::apply::{middleware_fn, Middleware, MiddlewareApi};
use crate::store::Dispatch;
use std::fmt::Debug;

/// Middleware that logs every action passing through.
///
/// Actions are logged at `debug` before being forwarded; the outcome is
/// logged after the rest of the chain has run. Actions are never blocked.
pub fn logger<S, A>() -> Middleware<S, A>
where
    S: Send + Sync + 'static,
    A: Debug + Send + 'static,
{
    middleware_fn(|_api: &MiddlewareApi<S, A>, next: &Dispatch<A>, action: A| {
        log::debug!("Action: {:?}", action);
        let result = next(action);
        match &result {
            Ok(_) => log::trace!("action reduced"),
            Err(err) => log::debug!("action not reduced: {}", err),
        }
        result
    })
}
