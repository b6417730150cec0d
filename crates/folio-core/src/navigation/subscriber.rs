//! Reading position subscriber trait

use super::ReadingPosition;

/// Trait for components that need to respond to reading position changes
pub trait PositionSubscriber: Send + Sync {
    /// Called after every change to the published position
    fn on_position_change(&self, position: &ReadingPosition);
}
