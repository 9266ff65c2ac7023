//! One-shot start barrier.
//!
//! Workers and the coordinator meet here before rendering starts, so the
//! render clock only starts once every worker thread is live.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// How a [`StartBarrier::cross`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Every party arrived.
    Released,
    /// The barrier was abandoned before the quorum was reached.
    Abandoned,
}

#[derive(Debug, Default)]
struct State {
    arrived: usize,
    open: bool,
    abandoned: bool,
}

/// A rendezvous for a fixed number of parties, used once.
///
/// Unlike `std::sync::Barrier`, a waiting party can be released without the
/// full quorum through [`abandon`](StartBarrier::abandon). The coordinator
/// uses this when it fails to start every worker.
#[derive(Debug)]
pub struct StartBarrier {
    parties: usize,
    state: Mutex<State>,
    released: Condvar,
}

impl StartBarrier {
    /// Create a barrier for exactly `parties` participants.
    pub fn new(parties: usize) -> Self {
        debug_assert!(parties > 0, "a barrier needs at least one party");
        Self {
            parties,
            state: Mutex::new(State::default()),
            released: Condvar::new(),
        }
    }

    /// Number of participants the barrier waits for.
    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Block until all parties have called `cross`, or the barrier is
    /// abandoned.
    ///
    /// Each party must call this at most once.
    pub fn cross(&self) -> Crossing {
        let mut state = self.lock();
        state.arrived += 1;
        log::trace!("barrier: {}/{} arrived", state.arrived, self.parties);

        if !state.abandoned && state.arrived == self.parties {
            state.open = true;
            self.released.notify_all();
        }

        while !(state.open || state.abandoned) {
            state = self
                .released
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        if state.open {
            Crossing::Released
        } else {
            Crossing::Abandoned
        }
    }

    /// Release every current and future waiter without the quorum.
    ///
    /// Has no effect once the barrier has opened.
    pub fn abandon(&self) {
        let mut state = self.lock();
        if !state.open {
            log::debug!(
                "barrier abandoned with {}/{} arrived",
                state.arrived,
                self.parties
            );
            state.abandoned = true;
            self.released.notify_all();
        }
    }

    // Nothing panics while holding the lock, so a poisoned state is still
    // consistent.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_single_party_passes_immediately() {
        let barrier = StartBarrier::new(1);
        assert_eq!(barrier.cross(), Crossing::Released);
    }

    #[test]
    fn test_no_party_leaves_before_all_arrive() {
        const PARTIES: usize = 16;
        let barrier = StartBarrier::new(PARTIES);
        let arrived = AtomicUsize::new(0);

        thread::scope(|s| {
            for _ in 0..PARTIES {
                s.spawn(|| {
                    arrived.fetch_add(1, Ordering::SeqCst);
                    assert_eq!(barrier.cross(), Crossing::Released);
                    assert_eq!(arrived.load(Ordering::SeqCst), PARTIES);
                });
            }
        });
    }

    #[test]
    fn test_waits_for_last_party() {
        let barrier = StartBarrier::new(4);
        let passed = AtomicUsize::new(0);

        thread::scope(|s| {
            for _ in 0..3 {
                s.spawn(|| {
                    barrier.cross();
                    passed.fetch_add(1, Ordering::SeqCst);
                });
            }

            thread::sleep(Duration::from_millis(50));
            assert_eq!(passed.load(Ordering::SeqCst), 0);

            assert_eq!(barrier.cross(), Crossing::Released);
        });

        assert_eq!(passed.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_abandon_releases_waiters() {
        let barrier = StartBarrier::new(5);

        thread::scope(|s| {
            let waiters: Vec<_> = (0..3).map(|_| s.spawn(|| barrier.cross())).collect();

            thread::sleep(Duration::from_millis(20));
            barrier.abandon();

            for waiter in waiters {
                assert_eq!(waiter.join().unwrap(), Crossing::Abandoned);
            }
        });

        // Late arrivals do not block either
        assert_eq!(barrier.cross(), Crossing::Abandoned);
    }

    #[test]
    fn test_abandon_after_release_is_ignored() {
        let barrier = StartBarrier::new(2);

        thread::scope(|s| {
            let other = s.spawn(|| barrier.cross());
            assert_eq!(barrier.cross(), Crossing::Released);
            assert_eq!(other.join().unwrap(), Crossing::Released);
        });

        barrier.abandon();
        assert_eq!(barrier.parties(), 2);
    }
}
