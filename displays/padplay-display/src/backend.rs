//! Display backend trait
//!
//! Defines the interface a physical panel has to offer.

use crate::FrameBuffer;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Display not initialized
    NotInitialized,
}

/// Display backend trait
///
/// Implementations own the bus to the panel. The frame buffer is always
/// transmitted as a whole; there is no partial invalidation.
#[allow(async_fn_in_trait)]
pub trait DisplayBackend {
    /// Run the panel bring-up sequence
    async fn init(&mut self) -> Result<(), DisplayError>;

    /// Transmit the frame buffer to the panel
    async fn present(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError>;
}
