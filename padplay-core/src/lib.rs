//! Board-agnostic core logic for the Padplay handheld
//!
//! This crate contains everything that does not depend on a specific board:
//!
//! - Debounced 4x4 matrix keypad scanner
//! - Frame loop driver (input, simulation, render, pacing)
//! - Geometry helpers shared by the games
//! - Tuning/configuration types
//! - The modes: calculator, car race and pong

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod frame;
pub mod geometry;
pub mod keypad;
pub mod modes;

// Re-export key types
pub use frame::{FrameError, FrameLoop, Mode, Status};
pub use keypad::{Key, KeySource, Keypad, KeypadError};
pub use modes::{Game, ModeKind};
