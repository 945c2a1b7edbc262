//! Page data loading on top of [`QueryCache`].

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::cache::QueryCache;
use crate::core::error::ApiResult;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<V> {
    Loading,
    Ready(V),
    Failed(String),
}

impl<V> QueryState<V> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Run `request` for `key` and publish the outcome into `state`.
///
/// A cached value for `key` is shown while the request is in flight. The
/// outcome is published only if no later `load` on the same cache was
/// started meanwhile, whatever its key; results for other keys are still
/// cached.
pub fn load<V, Fut>(cache: &QueryCache<V>, key: &str, state: RwSignal<QueryState<V>>, request: Fut)
where
    V: Clone + Send + Sync + 'static,
    Fut: Future<Output = ApiResult<V>> + 'static,
{
    let ticket = cache.begin(key);
    state.set(match cache.get(key) {
        Some(cached) => QueryState::Ready(cached),
        None => QueryState::Loading,
    });

    let cache = cache.clone();
    spawn_local(async move {
        match request.await {
            Ok(value) => {
                if cache.complete(&ticket, value.clone()) && cache.is_latest(&ticket) {
                    let _ = state.try_set(QueryState::Ready(value));
                }
            }
            Err(err) => {
                if cache.abandon(&ticket) && cache.is_latest(&ticket) {
                    let _ = state.try_set(QueryState::Failed(err.user_message()));
                }
            }
        }
    });
}
