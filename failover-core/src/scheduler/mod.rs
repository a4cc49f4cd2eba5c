//! Adaptive failover scheduler
//!
//! The scheduler holds an ordered set of interchangeable backends, each with a
//! reliability score. A call tries backends in ascending score order and stops
//! at the first success. Successes and failures adjust the score of the
//! backend involved, every score then decays toward zero, and the set is
//! re-sorted for the next call.
//!
//! Concurrent calls on one scheduler are allowed and are not serialized. The
//! state table is only locked for the synchronous score updates and the final
//! sort, never across an `.await`, so overlapping calls can observe a slightly
//! stale order but never lose an entry or tear a single score update.

mod error;
mod policy;

pub use error::{SchedulerError, SchedulerResult};
pub use policy::ScoringPolicy;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace, warn};

/// A backend together with its current score
struct BackendState<B: ?Sized> {
    /// Position in the list given at construction, stable for the scheduler's lifetime
    index: usize,
    backend: Arc<B>,
    score: f64,
}

/// Point-in-time view of one backend's score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackendScore {
    /// Position of the backend in the construction list
    pub index: usize,

    /// Current score (lower is tried first)
    pub score: f64,
}

/// Failover scheduler over a fixed set of backends
pub struct Scheduler<B: ?Sized> {
    states: Mutex<Vec<BackendState<B>>>,
    policy: ScoringPolicy,
}

impl<B: ?Sized> Scheduler<B> {
    /// Create a scheduler with the default scoring policy
    pub fn new(backends: Vec<Arc<B>>) -> SchedulerResult<Self> {
        Self::with_policy(backends, ScoringPolicy::default())
    }

    /// Create a scheduler with a custom scoring policy
    pub fn with_policy(backends: Vec<Arc<B>>, policy: ScoringPolicy) -> SchedulerResult<Self> {
        if backends.is_empty() {
            return Err(SchedulerError::NoBackends);
        }
        policy
            .validate("")
            .map_err(|e| SchedulerError::InvalidPolicy(e.to_string()))?;

        let states = backends
            .into_iter()
            .enumerate()
            .map(|(index, backend)| BackendState {
                index,
                backend,
                score: policy.initial_score,
            })
            .collect();

        Ok(Self {
            states: Mutex::new(states),
            policy,
        })
    }

    /// Number of backends managed by this scheduler
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Always false: construction rejects empty backend lists
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The scoring policy in use
    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Current scores in the order the next call will try them
    pub fn snapshot(&self) -> Vec<BackendScore> {
        self.lock()
            .iter()
            .map(|state| BackendScore {
                index: state.index,
                score: state.score,
            })
            .collect()
    }

    /// Backends in the order the next call will try them
    pub fn backends(&self) -> Vec<Arc<B>> {
        self.lock().iter().map(|state| Arc::clone(&state.backend)).collect()
    }

    /// Run `operation` against backends in score order until one succeeds.
    ///
    /// Each attempt receives the next backend. The first `Ok` is returned and
    /// no further backends are tried. If every backend fails, the error from
    /// the last one tried is returned and earlier errors are dropped.
    ///
    /// Scores decay and the order is re-sorted when the call finishes, whether
    /// it succeeded, failed, or was cancelled by dropping the future.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut(Arc<B>) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display + From<SchedulerError>,
    {
        let order = self.order();
        let _settle = Settle { scheduler: self };
        let total = order.len();
        let mut last_error = None;

        for (position, (index, backend)) in order.into_iter().enumerate() {
            debug!(attempt = position + 1, total, backend = index, "Trying backend");

            match operation(backend).await {
                Ok(value) => {
                    let score = self.adjust(index, self.policy.reward);
                    debug!(
                        attempt = position + 1,
                        backend = index,
                        score = ?score,
                        "Backend succeeded"
                    );
                    return Ok(value);
                }
                Err(error) => {
                    let score = self.adjust(index, self.policy.penalty);
                    warn!(
                        attempt = position + 1,
                        total,
                        backend = index,
                        score = ?score,
                        error = %error,
                        "Backend failed"
                    );
                    last_error = Some(error);
                }
            }
        }

        warn!(attempts = total, "All backends failed");
        Err(last_error.unwrap_or_else(|| SchedulerError::NoBackends.into()))
    }

    /// Current try order as (index, backend) pairs
    fn order(&self) -> Vec<(usize, Arc<B>)> {
        self.lock()
            .iter()
            .map(|state| (state.index, Arc::clone(&state.backend)))
            .collect()
    }

    /// Multiply one backend's score by `factor`, returning the new score
    fn adjust(&self, index: usize, factor: f64) -> Option<f64> {
        let mut states = self.lock();
        let state = states.iter_mut().find(|state| state.index == index)?;
        state.score *= factor;
        Some(state.score)
    }

    /// Decay every score and re-sort ascending
    fn settle(&self) {
        let mut states = self.lock();
        for state in states.iter_mut() {
            state.score = self.policy.settle(state.score);
        }
        states.sort_by(|a, b| a.score.total_cmp(&b.score));
        trace!(
            order = ?states.iter().map(|s| s.index).collect::<Vec<_>>(),
            "Backend order updated"
        );
    }

    // Scores stay meaningful even if a holder panicked, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Vec<BackendState<B>>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B: ?Sized> fmt::Debug for Scheduler<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("policy", &self.policy)
            .field("scores", &self.snapshot())
            .finish()
    }
}

/// Runs the decay-and-sort step when a call ends, including on cancellation
struct Settle<'a, B: ?Sized> {
    scheduler: &'a Scheduler<B>,
}

impl<B: ?Sized> Drop for Settle<'_, B> {
    fn drop(&mut self) {
        self.scheduler.settle();
    }
}
