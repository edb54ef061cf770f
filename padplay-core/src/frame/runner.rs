//! Frame loop runner
//!
//! Owns the key source, the panel and the single frame buffer, and drives a
//! [`Mode`] through its lifecycle on a fixed cadence.

use core::convert::Infallible;

use embedded_hal_async::delay::DelayNs;
use padplay_display::{DisplayBackend, FrameBuffer};

use super::pacer::{Clock, FramePacer};
use super::{FrameError, Mode, Status};
use crate::keypad::KeySource;
use crate::modes::{self, ModeKind};

/// Cooperative frame loop
pub struct FrameLoop<K, P, D, C> {
    keys: K,
    panel: P,
    delay: D,
    clock: C,
    frame: FrameBuffer,
    pacer: FramePacer,
}

impl<K, P, D, C> FrameLoop<K, P, D, C>
where
    K: KeySource,
    P: DisplayBackend,
    D: DelayNs,
    C: Clock,
{
    /// Create a loop over an already initialized panel
    pub fn new(keys: K, panel: P, delay: D, clock: C) -> Self {
        Self {
            keys,
            panel,
            delay,
            clock,
            frame: FrameBuffer::new(),
            pacer: FramePacer::new(0),
        }
    }

    /// Last frame drawn
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Redraw the whole frame with `draw` and present it
    pub async fn show<F>(&mut self, draw: F) -> Result<(), FrameError>
    where
        F: FnOnce(&mut FrameBuffer),
    {
        self.frame.clear();
        draw(&mut self.frame);
        self.panel.present(&self.frame).await?;
        Ok(())
    }

    /// Show a static screen for a fixed time
    pub async fn show_for<F>(&mut self, ms: u32, draw: F) -> Result<(), FrameError>
    where
        F: FnOnce(&mut FrameBuffer),
    {
        self.show(draw).await?;
        self.delay.delay_ms(ms).await;
        Ok(())
    }

    /// Boot screens, `ms` each
    pub async fn splash(&mut self, ms: u32) -> Result<(), FrameError> {
        self.show_for(ms, modes::render_welcome).await?;
        self.show_for(ms, modes::render_credits).await
    }

    /// Show the menu and block until a mode key is pressed
    ///
    /// Keys that do not name a mode are ignored.
    pub async fn select_mode(&mut self) -> Result<ModeKind, FrameError> {
        self.show(modes::render_menu).await?;
        loop {
            let key = self.keys.wait_for_key().await?;
            if let Some(kind) = ModeKind::from_key(key) {
                #[cfg(feature = "defmt")]
                defmt::info!("mode selected: {}", kind);
                return Ok(kind);
            }
            #[cfg(feature = "defmt")]
            defmt::debug!("menu: ignoring {}", key);
        }
    }

    /// Show the mode's instructions until any key is pressed
    pub async fn intro<M: Mode>(&mut self, mode: &M) -> Result<(), FrameError> {
        self.show(|frame| mode.render_intro(frame)).await?;
        self.keys.wait_for_key().await?;
        Ok(())
    }

    /// Run one frame
    ///
    /// Input is applied before the step, the frame is redrawn from scratch
    /// after it. Only a running mode sleeps out the rest of its frame
    /// budget; a halted one returns straight away so the caller can block
    /// on the keypad.
    pub async fn tick<M: Mode>(&mut self, mode: &mut M) -> Result<Status, FrameError> {
        self.pacer.begin(self.clock.now_ms(), mode.frame_period_ms());

        if let Some(key) = self.keys.scan().await? {
            #[cfg(feature = "defmt")]
            defmt::debug!("key {}", key);
            mode.handle_key(key);
        }

        let status = mode.step();

        self.frame.clear();
        mode.render(&mut self.frame);
        self.panel.present(&self.frame).await?;

        if status == Status::Running {
            let remaining = self.pacer.remaining(self.clock.now_ms());
            if remaining > 0 {
                self.delay.delay_ms(remaining).await;
            }
        }

        Ok(status)
    }

    /// Run a mode forever
    ///
    /// Only returns on a hardware fault.
    pub async fn run<M: Mode>(&mut self, mode: &mut M) -> Result<Infallible, FrameError> {
        self.intro(&*mode).await?;
        mode.reset();

        loop {
            if self.tick(mode).await? == Status::Halted {
                #[cfg(feature = "defmt")]
                defmt::info!("halted, waiting for acknowledge");
                self.keys.wait_for_key().await?;
                mode.acknowledge();
            }
        }
    }
}
