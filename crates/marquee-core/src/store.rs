//! Reducer-driven state store
//!
//! A [`Store`] owns one state value inside a `tokio::sync::watch` channel.
//! Mutations go through [`Store::dispatch`], which applies the reducer under
//! the channel's lock and notifies every subscriber. Reads are snapshots
//! ([`Store::state`]) or projections ([`Store::select`]).
//!
//! ```text
//!  action ──► dispatch ──► R::reduce(&mut state, action) ──► watch::Sender
//!                                                              │
//!                              subscribe() ◄── watch::Receiver ┘
//! ```

use tokio::sync::watch;

/// Pure state transition for one container
pub trait Reducer {
    type State: Clone + Default + Send + Sync + 'static;
    type Action: std::fmt::Debug;

    /// Apply `action` to `state`. Must not perform I/O.
    fn reduce(state: &mut Self::State, action: Self::Action);
}

/// Injectable state container
pub struct Store<R: Reducer> {
    tx: watch::Sender<R::State>,
}

impl<R: Reducer> Store<R> {
    /// Create a store holding `R::State::default()`
    pub fn new() -> Self {
        Self::with_state(R::State::default())
    }

    /// Create a store with a preloaded state
    pub fn with_state(state: R::State) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { tx }
    }

    /// Apply an action through the reducer and notify subscribers
    pub fn dispatch(&self, action: R::Action) {
        log::trace!("[store] dispatch {:?}", action);
        self.tx.send_modify(|state| R::reduce(state, action));
    }

    /// Snapshot of the current state
    pub fn state(&self) -> R::State {
        self.tx.borrow().clone()
    }

    /// Project the current state without cloning all of it
    pub fn select<T>(&self, selector: impl FnOnce(&R::State) -> T) -> T {
        selector(&self.tx.borrow())
    }

    /// Receiver that observes every subsequent state change
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.tx.subscribe()
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}
