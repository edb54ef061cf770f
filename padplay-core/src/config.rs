//! Tuning parameters
//!
//! Timing and gameplay constants grouped per subsystem. The firmware bakes a
//! validated `Tuning` in at build time; the defaults below match the stock
//! handheld.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::modes::car::{self, MAX_OBSTACLES, SPEED_LIMIT};

/// Keypad timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct KeypadTiming {
    /// Settle time after a column is first seen high
    pub debounce_ms: u32,
    /// Poll interval while waiting for a key to be released
    pub release_poll_ms: u32,
    /// Poll interval while waiting for any key
    pub idle_poll_ms: u32,
}

impl Default for KeypadTiming {
    fn default() -> Self {
        Self {
            debounce_ms: 20,
            release_poll_ms: 1,
            idle_poll_ms: 100,
        }
    }
}

/// Frame pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct FrameTiming {
    /// Target frame period for the games
    pub game_frame_ms: u32,
    /// Target frame period for the calculator
    pub calculator_frame_ms: u32,
    /// How long each boot splash screen stays up
    pub splash_ms: u32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self {
            game_frame_ms: 30,
            calculator_frame_ms: 10,
            splash_ms: 2000,
        }
    }
}

/// Car race gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct CarTuning {
    /// Scroll speed at game start (pixels per frame)
    pub initial_speed: u8,
    /// Lowest selectable speed
    pub min_speed: u8,
    /// Highest selectable speed
    pub max_speed: u8,
    /// Frames between obstacle spawns
    pub spawn_rate: u16,
}

impl Default for CarTuning {
    fn default() -> Self {
        Self {
            initial_speed: 2,
            min_speed: 1,
            max_speed: 5,
            spawn_rate: 30,
        }
    }
}

/// Pong gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PongTuning {
    /// Points needed to win the match
    pub winning_score: u8,
    /// Player paddle movement per key press
    pub paddle_step: u8,
    /// AI paddle movement per frame
    pub ai_step: u8,
}

impl Default for PongTuning {
    fn default() -> Self {
        Self {
            winning_score: 5,
            paddle_step: 4,
            ai_step: 2,
        }
    }
}

/// Complete device tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Tuning {
    pub keypad: KeypadTiming,
    pub frame: FrameTiming,
    pub car: CarTuning,
    pub pong: PongTuning,
}

/// Tuning validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A poll interval of zero would spin without yielding
    ZeroPollInterval,
    /// A frame period of zero
    ZeroFramePeriod,
    /// Speed bounds empty, above `SPEED_LIMIT` or initial speed outside them
    SpeedRange,
    /// Spawn rate of zero frames
    ZeroSpawnRate,
    /// Spawns faster than the road can hold at the lowest speed
    ObstacleCapacity,
    /// Winning score of zero
    ZeroWinningScore,
    /// Paddle step larger than the playfield allows
    PaddleStep,
}

impl Tuning {
    /// Check that the parameters describe a playable device
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keypad.release_poll_ms == 0 || self.keypad.idle_poll_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.frame.game_frame_ms == 0 || self.frame.calculator_frame_ms == 0 {
            return Err(ConfigError::ZeroFramePeriod);
        }

        let car = &self.car;
        if car.min_speed == 0
            || car.min_speed > car.max_speed
            || car.max_speed > SPEED_LIMIT
            || !(car.min_speed..=car.max_speed).contains(&car.initial_speed)
        {
            return Err(ConfigError::SpeedRange);
        }
        if car.spawn_rate == 0 {
            return Err(ConfigError::ZeroSpawnRate);
        }
        if car::obstacles_on_road(car) > MAX_OBSTACLES as u32 {
            return Err(ConfigError::ObstacleCapacity);
        }

        if self.pong.winning_score == 0 {
            return Err(ConfigError::ZeroWinningScore);
        }
        // Paddle and AI steps must stay below the free travel of a paddle
        if self.pong.paddle_step == 0 || self.pong.paddle_step > 48 || self.pong.ai_step > 48 {
            return Err(ConfigError::PaddleStep);
        }

        Ok(())
    }
}
