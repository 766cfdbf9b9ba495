//! Last-request-wins state holder
//!
//! A flow may start a new LLM request while an earlier one is still in
//! flight. Each request takes a [`Ticket`] when it starts; only the holder of
//! the most recent ticket may publish its completion.

use crate::error::AnalyzerError;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use veracity_domain::traits::{GenerationRequest, LlmProvider};

/// Proof that a request was started, used to publish its completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What happened to a completed request
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The request was the latest one; its state is now visible
    Applied(T),
    /// A newer request started meanwhile; the result was discarded
    Superseded,
}

impl<T> Outcome<T> {
    /// The applied value, if any
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Superseded => None,
        }
    }

    /// Whether a newer request won
    pub fn is_superseded(&self) -> bool {
        matches!(self, Outcome::Superseded)
    }
}

struct Slot<T> {
    state: T,
    generation: u64,
}

/// A state value guarded by a request generation counter
pub(crate) struct Guarded<T> {
    slot: Mutex<Slot<T>>,
}

impl<T: Clone> Guarded<T> {
    pub(crate) fn new(state: T) -> Self {
        Self {
            slot: Mutex::new(Slot {
                state,
                generation: 0,
            }),
        }
    }

    /// Start a request: publish `state` and invalidate every older ticket
    pub(crate) fn begin(&self, state: T) -> Ticket {
        let mut slot = self.lock();
        slot.generation += 1;
        slot.state = state;
        Ticket(slot.generation)
    }

    /// Publish `state` if `ticket` is still the latest
    pub(crate) fn complete(&self, ticket: Ticket, state: T) -> Outcome<T> {
        let mut slot = self.lock();
        if slot.generation != ticket.0 {
            return Outcome::Superseded;
        }
        slot.state = state.clone();
        Outcome::Applied(state)
    }

    pub(crate) fn snapshot(&self) -> T {
        self.lock().state.clone()
    }

    /// Mutate the current state in place, without starting a request
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.lock().state)
    }

    /// Replace the state and invalidate any in-flight request
    pub(crate) fn reset(&self, state: T) {
        let mut slot = self.lock();
        slot.generation += 1;
        slot.state = state;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Send `request` to `provider`, bounded by `timeout` when one is set
pub(crate) async fn generate<L: LlmProvider>(
    provider: &L,
    request: &GenerationRequest,
    timeout: Option<Duration>,
) -> Result<String, AnalyzerError> {
    let call = provider.generate(request);
    let reply = match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| AnalyzerError::Timeout)?,
        None => call.await,
    };
    reply.map_err(|e| AnalyzerError::Llm(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_applies() {
        let guarded = Guarded::new("idle");
        let ticket = guarded.begin("loading");
        assert_eq!(guarded.snapshot(), "loading");
        assert_eq!(guarded.complete(ticket, "done"), Outcome::Applied("done"));
        assert_eq!(guarded.snapshot(), "done");
    }

    #[test]
    fn test_older_ticket_is_superseded() {
        let guarded = Guarded::new(0);
        let first = guarded.begin(1);
        let second = guarded.begin(2);

        assert_eq!(guarded.complete(second, 20), Outcome::Applied(20));
        assert!(guarded.complete(first, 10).is_superseded());
        assert_eq!(guarded.snapshot(), 20);
    }

    #[test]
    fn test_completion_order_does_not_matter() {
        let guarded = Guarded::new(0);
        let first = guarded.begin(1);
        let second = guarded.begin(2);

        assert!(guarded.complete(first, 10).is_superseded());
        assert_eq!(guarded.snapshot(), 2);
        assert_eq!(guarded.complete(second, 20).applied(), Some(20));
    }

    #[test]
    fn test_reset_invalidates_in_flight() {
        let guarded = Guarded::new(0);
        let ticket = guarded.begin(1);
        guarded.reset(0);
        assert!(guarded.complete(ticket, 5).is_superseded());
        assert_eq!(guarded.snapshot(), 0);
    }

    #[test]
    fn test_update_keeps_ticket_valid() {
        let guarded = Guarded::new(0);
        let ticket = guarded.begin(1);
        guarded.update(|state| *state += 1);
        assert_eq!(guarded.snapshot(), 2);
        assert!(!guarded.complete(ticket, 3).is_superseded());
    }
}
