//! Display abstraction for Padplay
//!
//! This crate provides:
//! - `FrameBuffer`, an off-screen 128x64 monochrome bitmap
//! - `DisplayBackend` trait for panels that can present a frame buffer
//!
//! # Architecture
//!
//! Modes never talk to the panel. They draw into the `FrameBuffer`, and the
//! frame loop hands the finished buffer to a `DisplayBackend`, which pushes
//! it to the hardware (e.g. an SSD1306 over I2C).
//!
//! The buffer layout matches the SSD1306/SH1106 page format so drivers can
//! stream pages without conversion.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod framebuffer;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use framebuffer::{FrameBuffer, CHAR_HEIGHT, CHAR_WIDTH, HEIGHT, PAGES, WIDTH};
