//! Per-key serialization of asynchronous units of work.
//!
//! Each key maps to the tail of its pending chain. Enqueuing replaces the tail with a unit that
//! first awaits the previous tail, so units for one key run one at a time in submission order
//! while different keys proceed independently. The entry is pruned when the unit that owns the
//! tail settles, which keeps the map empty whenever the node is idle.

use std::{
    future::Future,
    panic::AssertUnwindSafe,
    sync::{
        Arc, Weak,
        atomic::{AtomicU64, Ordering},
    },
};

use dashmap::DashMap;
use futures::{
    FutureExt,
    future::{self, BoxFuture, Shared},
};
use tokio::sync::oneshot;
use tracing::{debug, error};

use crate::error::ServiceError;

type Tail = Shared<BoxFuture<'static, ()>>;

struct Pending {
    ticket: u64,
    tail: Tail,
}

/// Serializes units of work submitted for the same key.
///
/// Units are spawned on the runtime: dropping the future returned by [`MutationQueue::enqueue`]
/// does not cancel the unit. A unit must not enqueue work for its own key and wait for it.
#[derive(Default)]
pub struct MutationQueue {
    chains: Arc<DashMap<String, Pending>>,
    tickets: AtomicU64,
}

impl MutationQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `work` once every unit previously enqueued for `key` has settled.
    ///
    /// The outcome of `work` is delivered to this caller only; a failing or panicking unit
    /// does not affect later units for the same key.
    pub async fn enqueue<F, Fut, T>(&self, key: &str, work: F) -> Result<T, ServiceError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ServiceError>> + Send + 'static,
        T: Send + 'static,
    {
        let ticket = self.tickets.fetch_add(1, Ordering::Relaxed);
        let (done_tx, done_rx) = oneshot::channel();

        let unit = {
            let mut pending = self
                .chains
                .entry(key.to_owned())
                .or_insert_with(|| Pending {
                    ticket,
                    tail: future::ready(()).boxed().shared(),
                });

            let unit = run_after(
                pending.tail.clone(),
                Arc::downgrade(&self.chains),
                key.to_owned(),
                ticket,
                work,
                done_tx,
            )
            .boxed()
            .shared();

            *pending = Pending {
                ticket,
                tail: unit.clone(),
            };
            unit
        };

        tokio::spawn(unit);

        done_rx
            .await
            .unwrap_or_else(|_| Err(ServiceError::Internal("queued unit was dropped".into())))
    }

    /// Number of keys with work in flight.
    pub fn pending_keys(&self) -> usize {
        self.chains.len()
    }
}

async fn run_after<F, Fut, T>(
    previous: Tail,
    chains: Weak<DashMap<String, Pending>>,
    key: String,
    ticket: u64,
    work: F,
    done: oneshot::Sender<Result<T, ServiceError>>,
) where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, ServiceError>> + Send + 'static,
    T: Send + 'static,
{
    previous.await;
    debug!(key = %key, ticket, "acquired mutation slot");

    let outcome = match AssertUnwindSafe(async move { work().await })
        .catch_unwind()
        .await
    {
        Ok(outcome) => outcome,
        Err(_) => {
            error!(key = %key, ticket, "queued unit panicked");
            Err(ServiceError::Internal("queued unit panicked".into()))
        }
    };

    if let Some(chains) = chains.upgrade() {
        chains.remove_if(&key, |_, pending| pending.ticket == ticket);
    }
    debug!(key = %key, ticket, "released mutation slot");

    // The caller may have stopped waiting; the unit still ran to completion.
    let _ = done.send(outcome);
}
