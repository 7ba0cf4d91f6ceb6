use std::sync::atomic::{AtomicU64, Ordering};

/// One insert that passed the capacity check and has not finished yet.
///
/// Counted in the owner's in-flight counter until dropped, so concurrent
/// capacity checks see it even across an `.await` or a cancelled future.
pub(crate) struct Reservation<'a> {
    in_flight: &'a AtomicU64,
}

impl<'a> Reservation<'a> {
    pub(crate) fn acquire(in_flight: &'a AtomicU64) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self { in_flight }
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
