//! 4x4 matrix keypad
//!
//! The keypad is wired as four row outputs and four column inputs with
//! pull-downs. A key closes the circuit between its row and column, so a
//! column reads high only while its row is energized and the key is held.

pub mod matrix;
pub mod scanner;

pub use matrix::{Key, COLS, KEY_MATRIX, ROWS};
pub use scanner::Keypad;

/// Keypad hardware errors
///
/// The index identifies the failing pin within its row/column set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeypadError {
    /// Driving a row output failed
    Row { index: u8 },
    /// Reading a column input failed
    Column { index: u8 },
}

/// Source of discrete key events
///
/// Implemented by the matrix scanner; the frame loop only depends on this.
#[allow(async_fn_in_trait)]
pub trait KeySource {
    /// Check for a key press without waiting for one
    ///
    /// Returns `Ok(None)` when no key is down.
    async fn scan(&mut self) -> Result<Option<Key>, KeypadError>;

    /// Block until a key has been pressed and released
    async fn wait_for_key(&mut self) -> Result<Key, KeypadError>;
}
