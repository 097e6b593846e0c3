//! Side-effect hook queue
//!
//! Collection writes enqueue their side effects (cache revalidation,
//! order completion email) here instead of running them inline. A
//! single worker drains the queue; the HTTP request path never waits
//! on, and never fails because of, a side effect.
//!
//! The queue is bounded: when it is full the job is dropped with a
//! warning rather than applying backpressure to the request.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::Config;
use crate::orders::notifier;
use crate::services::email::Mailer;
use crate::services::revalidate::Revalidator;

/// Queue capacity; jobs beyond this are dropped with a warning
pub const HOOK_QUEUE_CAPACITY: usize = 256;

/// A queued side effect
#[derive(Debug, Clone)]
pub enum SideEffect {
    /// Ping the storefront cache revalidation endpoint
    Revalidate { tags: Vec<String> },
    /// Send the completion email for an order
    OrderCompletedEmail { order_id: String },
}

/// Producer handle for the hook queue
#[derive(Clone, Debug)]
pub struct HookQueue {
    tx: mpsc::Sender<SideEffect>,
}

impl HookQueue {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<SideEffect>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Enqueue a side effect, dropping it if the queue is full
    pub fn dispatch(&self, effect: SideEffect) {
        if let Err(e) = self.tx.try_send(effect) {
            tracing::warn!(error = %e, "Side-effect queue full, dropping job");
        }
    }

    /// Enqueue a cache revalidation for the given tags
    pub fn revalidate(&self, tags: &[&str]) {
        self.dispatch(SideEffect::Revalidate {
            tags: tags.iter().map(|t| t.to_string()).collect(),
        });
    }

    /// Enqueue the completion email for an order
    pub fn order_completed(&self, order_id: impl Into<String>) {
        self.dispatch(SideEffect::OrderCompletedEmail {
            order_id: order_id.into(),
        });
    }
}

/// Worker draining the hook queue
///
/// Owns everything a side effect needs: database handle, mailer,
/// revalidation client and config.
pub struct HookWorker {
    db: Surreal<Db>,
    mailer: Mailer,
    revalidator: Revalidator,
    config: Config,
}

impl HookWorker {
    pub fn new(db: Surreal<Db>, mailer: Mailer, revalidator: Revalidator, config: Config) -> Self {
        Self {
            db,
            mailer,
            revalidator,
            config,
        }
    }

    /// Run the worker until shutdown or queue close
    pub async fn run(self, mut rx: mpsc::Receiver<SideEffect>, shutdown: CancellationToken) {
        tracing::info!("Hook worker started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Hook worker received shutdown signal");
                    break;
                }
                effect = rx.recv() => {
                    let Some(effect) = effect else {
                        tracing::info!("Hook queue closed, worker stopping");
                        break;
                    };
                    self.handle(effect).await;
                }
            }
        }
    }

    async fn handle(&self, effect: SideEffect) {
        match effect {
            SideEffect::Revalidate { tags } => {
                self.revalidator.revalidate(&tags).await;
            }
            SideEffect::OrderCompletedEmail { order_id } => {
                notifier::send_completion_email(&self.db, &self.mailer, &self.config, &order_id)
                    .await;
            }
        }
    }
}
