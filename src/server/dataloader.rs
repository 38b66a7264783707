use std::collections::HashMap;
use std::fmt::Debug;
use std::future::poll_fn;
use std::hash::Hash;
use std::pin::{Pin, pin};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Poll, Waker};

use tracing::trace;

pub type BatchFuture<K, V> = Pin<Box<dyn Future<Output = HashMap<K, V>> + Send>>;

pub trait BatchLoader {
    type K: Hash + Eq + Clone;
    type V: Clone;

    /// Resolves a batch of keys.
    ///
    /// The returned map must hold an entry for every key, otherwise the
    /// `load` calls waiting on a missing key never complete.
    fn load_batch(&self, keys: Vec<Self::K>) -> BatchFuture<Self::K, Self::V>;
}

enum Entry<V> {
    Requested(Vec<Waker>),
    Ready(V),
}

struct LoaderInner<B: BatchLoader> {
    values: HashMap<B::K, Entry<B::V>>,
    pending_keys: HashMap<B::K, Vec<Waker>>,
    load_batch: B,
}

/// Per-request cache which collects the keys requested by concurrently
/// resolving fields and loads them in batches.
///
/// `load` only makes progress while the request future is driven through
/// [`DataLoader::wrap`].
pub struct DataLoader<B: BatchLoader> {
    inner: Arc<Mutex<LoaderInner<B>>>,
}
impl<B: BatchLoader> Clone for DataLoader<B> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<B: BatchLoader> DataLoader<B>
where
    B::K: Debug,
{
    pub fn new(load_batch: B) -> Self {
        let inner = LoaderInner {
            load_batch,
            values: Default::default(),
            pending_keys: Default::default(),
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoaderInner<B>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn load(&self, key: B::K) -> impl Future<Output = B::V> {
        poll_fn(move |cx| {
            let mut inner = self.lock();

            let wakers = match inner.values.get_mut(&key) {
                Some(Entry::Ready(v)) => {
                    return Poll::Ready(v.clone());
                }
                Some(Entry::Requested(wakers)) => wakers,
                None => inner.pending_keys.entry(key.clone()).or_insert_with(|| {
                    trace!(?key, "queueing key for the next batch");
                    vec![]
                }),
            };

            if !wakers.iter().any(|w| w.will_wake(cx.waker())) {
                wakers.push(cx.waker().clone());
            }
            Poll::Pending
        })
    }

    /// Drops every resolved value, so the next `load` of a key hits the store again.
    ///
    /// Keys that are still being loaded are kept.
    pub fn clear(&self) {
        self.lock()
            .values
            .retain(|_, entry| matches!(entry, Entry::Requested(_)));
    }

    pub async fn wrap<O>(&self, fut: impl Future<Output = O>) -> O {
        let mut currently_loading: Option<BatchFuture<B::K, B::V>> = None;

        let mut fut = pin!(fut);
        poll_fn(move |cx| {
            if let Some(currently_loading_fut) = &mut currently_loading {
                match currently_loading_fut.as_mut().poll(cx) {
                    Poll::Ready(v) => {
                        let mut inner = self.lock();

                        // Wake all the `load` calls waiting on this batch
                        for (k, v) in v {
                            if let Some(Entry::Requested(wakers)) =
                                inner.values.insert(k, Entry::Ready(v))
                            {
                                for w in wakers {
                                    w.wake();
                                }
                            }
                        }

                        currently_loading = None;
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            let res = fut.as_mut().poll(cx);
            if res.is_pending() {
                // We have polled the inner future once, during which it may have registered more
                // keys to load.
                let mut inner = self.lock();

                if !inner.pending_keys.is_empty() {
                    let mut keys = Vec::with_capacity(inner.pending_keys.len());
                    for (k, v) in std::mem::take(&mut inner.pending_keys) {
                        keys.push(k.clone());
                        inner.values.insert(k, Entry::Requested(v));
                    }

                    currently_loading = Some(inner.load_batch.load_batch(keys));

                    // Wake immediately, to instruct the runtime to call `poll` again.
                    cx.waker().wake_by_ref();
                }
            }
            res
        })
        .await
    }
}
