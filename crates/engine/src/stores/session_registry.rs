//! Message id -> live session routing table.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use flakerank_domain::{DeleteButtonToken, MessageId, SessionId};

use crate::session::{InteractiveSession, SessionState};

/// Shared handle to one session. Presses on the same message queue on the
/// mutex in arrival order.
pub type SessionHandle = Arc<Mutex<InteractiveSession>>;

/// A registry binding as seen by callers.
#[derive(Clone)]
pub struct BoundSession {
    pub session_id: SessionId,
    pub handle: SessionHandle,
}

/// A binding evicted because its session timed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvictedSession {
    pub message_id: MessageId,
    pub session_id: SessionId,
    pub delete_token: DeleteButtonToken,
}

/// Result of resolving a message id.
pub enum Lookup {
    Bound(BoundSession),
    /// The session had timed out and was evicted by this lookup. The
    /// caller owns unbinding the message controls.
    Expired(EvictedSession),
    Missing,
}

impl Lookup {
    pub fn into_bound(self) -> Option<BoundSession> {
        match self {
            Lookup::Bound(bound) => Some(bound),
            Lookup::Expired(_) | Lookup::Missing => None,
        }
    }
}

/// Process-wide session registry.
///
/// Owned by the composition root and injected into every handler. At most
/// one session is bound to a message; nothing is persisted, so a restart
/// leaves previously posted messages inert.
#[derive(Default)]
pub struct SessionRegistry {
    bindings: RwLock<HashMap<MessageId, BoundSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `session` to `message_id`, replacing and releasing any prior
    /// session on that message.
    pub async fn register(&self, message_id: MessageId, mut session: InteractiveSession) -> BoundSession {
        session.bind(message_id);
        let bound = BoundSession {
            session_id: session.id(),
            handle: Arc::new(Mutex::new(session)),
        };

        let prior = {
            let mut bindings = self.bindings.write().await;
            bindings.insert(message_id, bound.clone())
        };

        if let Some(prior) = prior {
            prior.handle.lock().await.release();
            tracing::info!(
                message_id = %message_id,
                replaced_session_id = %prior.session_id,
                session_id = %bound.session_id,
                "Replaced session on message"
            );
        } else {
            tracing::info!(
                message_id = %message_id,
                session_id = %bound.session_id,
                "Registered session"
            );
        }

        bound
    }

    /// Resolve the session bound to `message_id`.
    ///
    /// An idle session found to be expired is evicted and reported as
    /// [`Lookup::Expired`]. A session with an operation in flight is
    /// returned as-is; the caller queues on its mutex.
    pub async fn lookup(&self, message_id: MessageId) -> Lookup {
        let Some(bound) = self.bindings.read().await.get(&message_id).cloned() else {
            return Lookup::Missing;
        };

        let expired_token = match bound.handle.try_lock() {
            Ok(mut session) => {
                (session.refresh_expiry() == SessionState::Expired).then(|| session.delete_token())
            }
            Err(_) => None,
        };

        let Some(delete_token) = expired_token else {
            return Lookup::Bound(bound);
        };

        // A concurrent sweep may have evicted it first; it then owns the unbind.
        match self.detach(message_id, bound.session_id).await {
            Some(_) => {
                tracing::info!(message_id = %message_id, session_id = %bound.session_id, "Evicted expired session on lookup");
                Lookup::Expired(EvictedSession {
                    message_id,
                    session_id: bound.session_id,
                    delete_token,
                })
            }
            None => Lookup::Missing,
        }
    }

    /// Remove whatever is bound to `message_id`.
    pub async fn unregister(&self, message_id: MessageId) -> Option<BoundSession> {
        let removed = self.bindings.write().await.remove(&message_id);
        if let Some(bound) = &removed {
            tracing::debug!(message_id = %message_id, session_id = %bound.session_id, "Unregistered session");
        }
        removed
    }

    /// Remove the binding only if it still belongs to `session_id`.
    pub async fn detach(&self, message_id: MessageId, session_id: SessionId) -> Option<BoundSession> {
        let mut bindings = self.bindings.write().await;
        if bindings.get(&message_id).map(|b| b.session_id) != Some(session_id) {
            return None;
        }
        let removed = bindings.remove(&message_id);
        tracing::debug!(message_id = %message_id, session_id = %session_id, "Detached session");
        removed
    }

    /// Whether `message_id` is still bound to `session_id`.
    pub async fn is_current(&self, message_id: MessageId, session_id: SessionId) -> bool {
        self.bindings
            .read()
            .await
            .get(&message_id)
            .is_some_and(|b| b.session_id == session_id)
    }

    /// Evict every idle session whose timeout has elapsed.
    ///
    /// Sessions with an operation in flight are skipped; they are picked up
    /// by a later sweep or by `lookup`.
    pub async fn sweep_expired(&self) -> Vec<EvictedSession> {
        let mut evicted = Vec::new();
        let mut bindings = self.bindings.write().await;

        bindings.retain(|message_id, bound| {
            let Ok(mut session) = bound.handle.try_lock() else {
                return true;
            };
            if session.refresh_expiry() != SessionState::Expired {
                return true;
            }
            evicted.push(EvictedSession {
                message_id: *message_id,
                session_id: bound.session_id,
                delete_token: session.delete_token(),
            });
            false
        });

        if !evicted.is_empty() {
            tracing::info!(count = evicted.len(), remaining = bindings.len(), "Swept expired sessions");
        }
        evicted
    }

    /// Release every session. Called once at shutdown.
    pub async fn close_all(&self) -> usize {
        let drained: Vec<BoundSession> = {
            let mut bindings = self.bindings.write().await;
            bindings.drain().map(|(_, bound)| bound).collect()
        };

        for bound in &drained {
            bound.handle.lock().await.release();
        }
        tracing::info!(count = drained.len(), "Closed all sessions");
        drained.len()
    }

    pub async fn len(&self) -> usize {
        self.bindings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.bindings.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::infrastructure::clock::ManualClock;
    use crate::paging::MockEntrySource;
    use crate::test_fixtures::{manual_clock, owners, MESSAGE};

    fn session(clock: &Arc<ManualClock>) -> InteractiveSession {
        InteractiveSession::new(
            Box::new(MockEntrySource::new()),
            owners(),
            Duration::from_secs(600),
            clock.clone(),
        )
    }

    #[tokio::test]
    async fn register_then_lookup() {
        let clock = manual_clock();
        let registry = SessionRegistry::new();
        let bound = registry.register(MESSAGE, session(&clock)).await;

        let found = registry.lookup(MESSAGE).await.into_bound().expect("bound");
        assert_eq!(found.session_id, bound.session_id);
        assert_eq!(found.handle.lock().await.bound_message(), Some(MESSAGE));
        assert!(matches!(registry.lookup(MessageId::new(1)).await, Lookup::Missing));
    }

    #[tokio::test]
    async fn register_replaces_and_closes_prior() {
        let clock = manual_clock();
        let registry = SessionRegistry::new();
        let first = registry.register(MESSAGE, session(&clock)).await;
        let second = registry.register(MESSAGE, session(&clock)).await;

        assert_eq!(first.handle.lock().await.state(), SessionState::Closed);
        let found = registry.lookup(MESSAGE).await.into_bound().expect("bound");
        assert_eq!(found.session_id, second.session_id);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn expired_session_is_not_resolved() {
        let clock = manual_clock();
        let registry = SessionRegistry::new();
        let bound = registry.register(MESSAGE, session(&clock)).await;

        clock.advance(chrono::Duration::minutes(10));

        match registry.lookup(MESSAGE).await {
            Lookup::Expired(evicted) => {
                assert_eq!(evicted.message_id, MESSAGE);
                assert_eq!(evicted.session_id, bound.session_id);
                assert_eq!(evicted.delete_token.encode(), "AUTHOR_DELETE_BUTTON:111,222");
            }
            _ => panic!("expected the expired session to be evicted"),
        }
        assert!(registry.is_empty().await);
        assert!(registry.sweep_expired().await.is_empty());
        assert!(matches!(registry.lookup(MESSAGE).await, Lookup::Missing));
    }

    #[tokio::test]
    async fn sweep_evicts_only_idle_expired_sessions() {
        let clock = manual_clock();
        let registry = SessionRegistry::new();
        let busy_message = MessageId::new(801);
        let fresh_message = MessageId::new(802);

        let idle = registry.register(MESSAGE, session(&clock)).await;
        let busy = registry.register(busy_message, session(&clock)).await;
        clock.advance(chrono::Duration::minutes(11));
        registry.register(fresh_message, session(&clock)).await;

        // An in-flight operation holds the lock; the sweeper must not touch it.
        let guard = busy.handle.lock().await;
        let evicted = registry.sweep_expired().await;
        drop(guard);

        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].message_id, MESSAGE);
        assert_eq!(evicted[0].session_id, idle.session_id);
        assert_eq!(evicted[0].delete_token.encode(), "AUTHOR_DELETE_BUTTON:111,222");
        assert_eq!(idle.handle.lock().await.state(), SessionState::Expired);
        assert!(registry.is_current(busy_message, busy.session_id).await);
        assert!(registry.lookup(fresh_message).await.into_bound().is_some());
    }

    #[tokio::test]
    async fn detach_ignores_newer_binding() {
        let clock = manual_clock();
        let registry = SessionRegistry::new();
        let old = registry.register(MESSAGE, session(&clock)).await;
        let new = registry.register(MESSAGE, session(&clock)).await;

        assert!(registry.detach(MESSAGE, old.session_id).await.is_none());
        assert!(registry.is_current(MESSAGE, new.session_id).await);
        assert!(!registry.is_current(MESSAGE, old.session_id).await);
    }

    #[tokio::test]
    async fn close_all_releases_everything() {
        let clock = manual_clock();
        let registry = SessionRegistry::new();
        let a = registry.register(MESSAGE, session(&clock)).await;
        registry.register(MessageId::new(801), session(&clock)).await;

        assert_eq!(registry.close_all().await, 2);
        assert!(registry.is_empty().await);
        assert_eq!(a.handle.lock().await.state(), SessionState::Closed);
    }
}
