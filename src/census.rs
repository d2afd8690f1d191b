//! Live node accounting.
//!
//! Every node owns a [`Tally`]. With the census compiled in (under `cfg(test)`
//! or the `node-census` feature) creating a `Tally` bumps a thread-local
//! counter and dropping it decrements the counter again, so once every tree on
//! a thread has been emptied the counter must read zero. Without the census a
//! `Tally` is a plain zero-sized marker and nothing is counted.

#[cfg(any(test, feature = "node-census"))]
mod imp {
    use std::cell::Cell;

    thread_local! {
        static LIVE_NODES: Cell<usize> = Cell::new(0);
    }

    /// Token held by each node for as long as it is alive.
    pub(crate) struct Tally(());

    impl Tally {
        pub(crate) fn new() -> Self {
            LIVE_NODES.with(|live| live.set(live.get() + 1));
            Self(())
        }
    }

    impl Drop for Tally {
        fn drop(&mut self) {
            LIVE_NODES.with(|live| live.set(live.get() - 1));
        }
    }

    pub(crate) fn live_nodes() -> usize {
        LIVE_NODES.with(Cell::get)
    }
}

#[cfg(not(any(test, feature = "node-census")))]
mod imp {
    pub(crate) struct Tally(());

    impl Tally {
        pub(crate) fn new() -> Self {
            Self(())
        }
    }
}

pub(crate) use imp::*;
