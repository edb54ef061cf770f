//! Interactive modes
//!
//! Each mode implements [`Mode`] on its own; [`Game`] wraps the selected
//! one so the firmware can run whichever the user picked from the menu
//! without dynamic dispatch.

pub mod calculator;
pub mod car;
pub mod pong;

use padplay_display::{FrameBuffer, CHAR_HEIGHT, CHAR_WIDTH};
use rand::RngCore;

pub use calculator::Calculator;
pub use car::CarGame;
pub use pong::Pong;

use crate::config::Tuning;
use crate::frame::{Mode, Status};
use crate::keypad::Key;

/// Selectable modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeKind {
    Calculator,
    Car,
    Pong,
}

impl ModeKind {
    pub const ALL: [ModeKind; 3] = [ModeKind::Calculator, ModeKind::Car, ModeKind::Pong];

    /// Menu key for this mode
    pub fn key(&self) -> Key {
        match self {
            ModeKind::Calculator => Key::Digit(1),
            ModeKind::Car => Key::Digit(2),
            ModeKind::Pong => Key::Digit(3),
        }
    }

    /// Mode chosen by a menu key, if any
    pub fn from_key(key: Key) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModeKind::Calculator => "Calculator",
            ModeKind::Car => "Car race",
            ModeKind::Pong => "Pong",
        }
    }
}

/// First boot screen
pub fn render_welcome(frame: &mut FrameBuffer) {
    frame.text(0, 0, "Welcome!");
}

/// Second boot screen
pub fn render_credits(frame: &mut FrameBuffer) {
    frame.text(0, 0, "Padplay handheld");
    frame.text(0, 10, "Calculator and");
    frame.text(0, 20, "two small games");
}

/// Rule under the menu title, one row below the glyph cells
const MENU_RULE_Y: i32 = CHAR_HEIGHT + 1;
const MENU_RULE_LENGTH: i32 = "Select a mode:".len() as i32 * CHAR_WIDTH;

/// Mode selection screen
pub fn render_menu(frame: &mut FrameBuffer) {
    frame.text(0, 0, "Select a mode:");
    frame.hline(0, MENU_RULE_Y, MENU_RULE_LENGTH, true);
    frame.text(0, 20, "1 Calculator");
    frame.text(0, 32, "2 Car race");
    frame.text(0, 44, "3 Pong");
}

/// The mode picked at startup
pub enum Game<R> {
    Calculator(Calculator),
    Car(CarGame<R>),
    Pong(Pong),
}

impl<R: RngCore> Game<R> {
    /// Build a mode from the device tuning
    ///
    /// `rng` is only consumed by the car race.
    pub fn new(kind: ModeKind, tuning: &Tuning, rng: R) -> Self {
        let frame = &tuning.frame;
        match kind {
            ModeKind::Calculator => Game::Calculator(Calculator::new(frame.calculator_frame_ms)),
            ModeKind::Car => Game::Car(CarGame::new(tuning.car, frame.game_frame_ms, rng)),
            ModeKind::Pong => Game::Pong(Pong::new(tuning.pong, frame.game_frame_ms)),
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            Game::Calculator(_) => ModeKind::Calculator,
            Game::Car(_) => ModeKind::Car,
            Game::Pong(_) => ModeKind::Pong,
        }
    }
}

impl<R: RngCore> Mode for Game<R> {
    fn frame_period_ms(&self) -> u32 {
        match self {
            Game::Calculator(m) => m.frame_period_ms(),
            Game::Car(m) => m.frame_period_ms(),
            Game::Pong(m) => m.frame_period_ms(),
        }
    }

    fn render_intro(&self, frame: &mut FrameBuffer) {
        match self {
            Game::Calculator(m) => m.render_intro(frame),
            Game::Car(m) => m.render_intro(frame),
            Game::Pong(m) => m.render_intro(frame),
        }
    }

    fn reset(&mut self) {
        match self {
            Game::Calculator(m) => m.reset(),
            Game::Car(m) => m.reset(),
            Game::Pong(m) => m.reset(),
        }
    }

    fn handle_key(&mut self, key: Key) {
        match self {
            Game::Calculator(m) => m.handle_key(key),
            Game::Car(m) => m.handle_key(key),
            Game::Pong(m) => m.handle_key(key),
        }
    }

    fn step(&mut self) -> Status {
        match self {
            Game::Calculator(m) => m.step(),
            Game::Car(m) => m.step(),
            Game::Pong(m) => m.step(),
        }
    }

    fn render(&self, frame: &mut FrameBuffer) {
        match self {
            Game::Calculator(m) => m.render(frame),
            Game::Car(m) => m.render(frame),
            Game::Pong(m) => m.render(frame),
        }
    }

    fn acknowledge(&mut self) {
        match self {
            Game::Calculator(m) => m.acknowledge(),
            Game::Car(m) => m.acknowledge(),
            Game::Pong(m) => m.acknowledge(),
        }
    }
}
