//! Resilience score store
//!
//! The store is an explicitly owned object: create it once with
//! [`ScoreStore::open`], share it (typically through an `Arc`) with every
//! consumer, and call [`ScoreStore::flush`] before tearing it down.

use crate::StoreError;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};
use veracity_domain::traits::KeyValueStorage;
use veracity_domain::{ResilienceScore, RESILIENCE_SCORE_KEY};

/// Handle returned by [`ScoreStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(ResilienceScore) + Send + Sync>;

struct State<S> {
    storage: S,
    score: ResilienceScore,
}

/// Owner of the persisted resilience score
///
/// Every change goes through [`ScoreStore::update_score`], which clamps the
/// value, writes it through to storage under `"resilienceScore"` and then
/// notifies subscribers synchronously.
pub struct ScoreStore<S> {
    state: Mutex<State<S>>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
}

impl<S> ScoreStore<S>
where
    S: KeyValueStorage,
    S::Error: fmt::Display,
{
    /// Load the persisted score from `storage`
    ///
    /// An absent or unparsable value yields the initial score of 50. Nothing
    /// is written until the score first changes.
    pub fn open(storage: S) -> Result<Self, StoreError> {
        let stored = storage
            .get(RESILIENCE_SCORE_KEY)
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        let score = match stored {
            None => ResilienceScore::default(),
            Some(text) => ResilienceScore::parse_stored(&text).unwrap_or_else(|| {
                warn!("Ignoring unparsable stored score {:?}", text);
                ResilienceScore::default()
            }),
        };

        debug!("Resilience score loaded: {}", score);

        Ok(Self {
            state: Mutex::new(State { storage, score }),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        })
    }

    /// Current score
    pub fn score(&self) -> ResilienceScore {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .score
    }

    /// Apply `delta`, clamp to `[0, 100]`, persist and notify
    ///
    /// The write goes to storage before the in-memory value changes: if
    /// persisting fails the score is left untouched and the error returned.
    pub fn update_score(&self, delta: i64) -> Result<ResilienceScore, StoreError> {
        let next = {
            let mut state = self.state.lock().map_err(|_| StoreError::Lock)?;
            let next = state.score.apply(delta);
            state
                .storage
                .set(RESILIENCE_SCORE_KEY, &next.to_stored())
                .map_err(|e| StoreError::Storage(e.to_string()))?;
            state.score = next;
            next
        };

        debug!(delta, score = next.value(), "Resilience score updated");
        self.notify(next);
        Ok(next)
    }

    /// Record one quiz answer: +10 when correct, -5 otherwise
    pub fn record_quiz_answer(&self, is_correct: bool) -> Result<ResilienceScore, StoreError> {
        self.update_score(ResilienceScore::quiz_delta(is_correct))
    }

    /// Register a callback invoked with every new score
    ///
    /// Callbacks run synchronously on the updating thread and must not call
    /// back into [`ScoreStore::update_score`] or [`ScoreStore::subscribe`].
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(ResilienceScore) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription; returns whether it existed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    /// Write the current score to storage
    pub fn flush(&self) -> Result<(), StoreError> {
        let mut state = self.state.lock().map_err(|_| StoreError::Lock)?;
        let value = state.score.to_stored();
        state
            .storage
            .set(RESILIENCE_SCORE_KEY, &value)
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    /// Tear the store down and hand back its storage
    pub fn into_storage(self) -> S {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .storage
    }

    fn notify(&self, score: ResilienceScore) {
        let subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        for (_, callback) in subscribers.iter() {
            callback(score);
        }
    }
}

impl<S> fmt::Debug for ScoreStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let score = self
            .state
            .lock()
            .map(|state| state.score.value())
            .unwrap_or_default();
        f.debug_struct("ScoreStore").field("score", &score).finish()
    }
}
