//! Per-order submit guard.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bloom::orders::OrderUuid;
use rustc_hash::FxHashSet;

/// Tracks orders with a submit outstanding.
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    outstanding: Arc<Mutex<FxHashSet<OrderUuid>>>,
}

/// Held while a submit for one order is in progress. Released on drop.
#[derive(Debug)]
pub struct SubmitPermit {
    outstanding: Arc<Mutex<FxHashSet<OrderUuid>>>,
    order: OrderUuid,
}

fn lock(set: &Mutex<FxHashSet<OrderUuid>>) -> MutexGuard<'_, FxHashSet<OrderUuid>> {
    set.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SubmitGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `order`, or `None` when a submit for it is already outstanding.
    pub fn try_acquire(&self, order: OrderUuid) -> Option<SubmitPermit> {
        lock(&self.outstanding)
            .insert(order)
            .then(|| SubmitPermit {
                outstanding: Arc::clone(&self.outstanding),
                order,
            })
    }

    /// Whether a submit for `order` is outstanding.
    pub fn is_held(&self, order: OrderUuid) -> bool {
        lock(&self.outstanding).contains(&order)
    }
}

impl SubmitPermit {
    /// The order this permit was issued for.
    pub const fn order(&self) -> OrderUuid {
        self.order
    }
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        lock(&self.outstanding).remove(&self.order);
    }
}
