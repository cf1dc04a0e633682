// In crates/risk/src/manager.rs

use crate::position::{ClosedPosition, ExitReason, StopLossPosition};
use crate::{Error, Result};

/// Owns the bot's single position slot.
///
/// The slot is an `Option`, so it cannot hold more than one position. Opening into an
/// occupied slot is an error rather than a silent replacement.
#[derive(Debug, Default, Clone)]
pub struct PositionManager {
    slot: Option<StopLossPosition>,
}

impl PositionManager {
    /// Creates a manager with an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a stop-loss position at `(index, price)`.
    ///
    /// # Errors
    ///
    /// * `Error::PositionAlreadyOpen`: the slot is occupied; it is left untouched.
    pub fn open(
        &mut self,
        index: usize,
        price: f64,
        amount: f64,
        stop_loss_percent: f64,
    ) -> Result<&StopLossPosition> {
        if let Some(existing) = &self.slot {
            return Err(Error::PositionAlreadyOpen { entry_index: existing.entry_index });
        }
        Ok(&*self
            .slot
            .insert(StopLossPosition::new(index, price, amount, stop_loss_percent)))
    }

    /// Closes the open position at `(index, price)` and vacates the slot.
    ///
    /// The realized pnl is `(price - entry_price) * amount`.
    ///
    /// # Errors
    ///
    /// * `Error::NoOpenPosition`: the slot is empty.
    pub fn close(&mut self, index: usize, price: f64, reason: ExitReason) -> Result<ClosedPosition> {
        let position = self.slot.take().ok_or(Error::NoOpenPosition)?;
        Ok(ClosedPosition {
            entry_index: position.entry_index,
            entry_price: position.entry_price,
            exit_index: index,
            exit_price: price,
            amount: position.amount,
            pnl: position.pnl_at(price),
            reason,
        })
    }

    pub fn position(&self) -> Option<&StopLossPosition> {
        self.slot.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.slot.is_some()
    }

    /// Number of open positions: always 0 or 1.
    pub fn open_count(&self) -> usize {
        usize::from(self.slot.is_some())
    }

    /// Drops any open position without realizing it.
    pub fn clear(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn open_then_close_realizes_pnl() {
        let mut manager = PositionManager::new();
        manager.open(3, 100.0, 2.0, 5.0).unwrap();
        assert!(manager.is_open());
        assert_eq!(manager.open_count(), 1);

        let closed = manager.close(7, 112.0, ExitReason::Signal).unwrap();
        assert_relative_eq!(closed.pnl, 24.0);
        assert_eq!(closed.entry_index, 3);
        assert_eq!(closed.exit_index, 7);
        assert_eq!(closed.holding_bars(), 4);
        assert!(!manager.is_open());
        assert_eq!(manager.open_count(), 0);
    }

    #[test]
    fn second_open_is_rejected_and_keeps_the_first() {
        let mut manager = PositionManager::new();
        manager.open(1, 100.0, 1.0, 5.0).unwrap();

        let err = manager.open(2, 120.0, 1.0, 5.0).unwrap_err();
        assert_eq!(err, Error::PositionAlreadyOpen { entry_index: 1 });
        assert_eq!(manager.position().map(|p| p.entry_price), Some(100.0));
        assert_eq!(manager.open_count(), 1);
    }

    #[test]
    fn closing_an_empty_slot_fails() {
        let mut manager = PositionManager::new();
        assert_eq!(manager.close(0, 100.0, ExitReason::Signal), Err(Error::NoOpenPosition));
    }

    #[test]
    fn clear_discards_without_realizing() {
        let mut manager = PositionManager::new();
        manager.open(0, 50.0, 1.0, 5.0).unwrap();
        manager.clear();
        assert!(manager.position().is_none());
    }
}
