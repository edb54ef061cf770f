//! Frame loop driver
//!
//! Every mode runs the same cooperative lifecycle:
//!
//! ```text
//! intro ──any key──▶ reset ──▶ ┌──────────── frame ────────────┐
//!                              │ scan ▶ handle_key ▶ step ▶    │
//!                              │ clear ▶ render ▶ present ▶    │
//!                              │ sleep remaining budget        │
//!                              └───────────────┬───────────────┘
//!                                      Halted  │
//!                              summary ──any key──▶ acknowledge
//! ```
//!
//! Input is always read before the simulation advances, and the simulation
//! always advances before drawing. The frame buffer is redrawn in full on
//! every frame.

pub mod pacer;
pub mod runner;

pub use pacer::{Clock, FramePacer};
pub use runner::FrameLoop;

use padplay_display::{DisplayError, FrameBuffer};

use crate::keypad::{Key, KeypadError};

/// Outcome of one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Keep running frames at the mode's pace
    Running,
    /// Terminal or summary state; wait for a key, then acknowledge
    Halted,
}

/// An interactive mode driven by the frame loop
pub trait Mode {
    /// Target frame period in milliseconds
    fn frame_period_ms(&self) -> u32;

    /// Draw the static instruction screen shown before the mode starts
    fn render_intro(&self, frame: &mut FrameBuffer);

    /// Return to the initial state
    fn reset(&mut self);

    /// Apply one key press; keys that are invalid in the current state are
    /// ignored
    fn handle_key(&mut self, key: Key);

    /// Advance the simulation by one frame
    fn step(&mut self) -> Status;

    /// Draw the current state into a cleared frame buffer
    fn render(&self, frame: &mut FrameBuffer);

    /// Leave the halted state after the user pressed a key
    fn acknowledge(&mut self);
}

/// Frame loop errors
///
/// Both variants are hardware faults and are not recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Keypad pin failure
    Keypad(KeypadError),
    /// Display bus failure
    Display(DisplayError),
}

impl From<KeypadError> for FrameError {
    fn from(e: KeypadError) -> Self {
        FrameError::Keypad(e)
    }
}

impl From<DisplayError> for FrameError {
    fn from(e: DisplayError) -> Self {
        FrameError::Display(e)
    }
}
