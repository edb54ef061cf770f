//! Calculator mode
//!
//! Keys are collected into an expression buffer, validated one character at
//! a time. `=` evaluates the buffer; the result (or `Error`) stays on screen
//! until the next key, which clears the buffer.

pub mod eval;
pub mod input;

use core::fmt::Write;

use heapless::String;
use padplay_display::FrameBuffer;

pub use eval::{evaluate, EvalError, Value};
pub use input::{is_operator, is_valid_input};

use crate::frame::{Mode, Status};
use crate::keypad::Key;

/// Maximum expression length (one display line)
pub const INPUT_CAPACITY: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Entering,
    Answer(Value),
    Failed(EvalError),
}

/// Calculator state
pub struct Calculator {
    input: String<INPUT_CAPACITY>,
    phase: Phase,
    frame_period_ms: u32,
}

impl Calculator {
    pub fn new(frame_period_ms: u32) -> Self {
        Self {
            input: String::new(),
            phase: Phase::Entering,
            frame_period_ms,
        }
    }

    /// Expression typed so far
    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    /// Result of the last evaluation, if one is on screen
    pub fn result(&self) -> Option<Result<Value, EvalError>> {
        match self.phase {
            Phase::Entering => None,
            Phase::Answer(value) => Some(Ok(value)),
            Phase::Failed(e) => Some(Err(e)),
        }
    }

    fn push(&mut self, ch: char) {
        if is_valid_input(&self.input, ch) {
            // A full buffer ignores further keys
            let _ = self.input.push(ch);
        }
    }
}

impl Mode for Calculator {
    fn frame_period_ms(&self) -> u32 {
        self.frame_period_ms
    }

    fn render_intro(&self, frame: &mut FrameBuffer) {
        frame.text(0, 0, "CALCULATOR");
        frame.text(0, 20, "x = multiply");
        frame.text(0, 30, "/ = divide");
        frame.text(0, 45, "Enter a key to");
        frame.text(0, 54, "continue...");
    }

    fn reset(&mut self) {
        self.input.clear();
        self.phase = Phase::Entering;
    }

    fn handle_key(&mut self, key: Key) {
        if self.phase != Phase::Entering {
            return;
        }

        match key {
            Key::Equals => {
                self.phase = match evaluate(&self.input) {
                    Ok(value) => Phase::Answer(value),
                    Err(e) => Phase::Failed(e),
                };
            }
            other => self.push(other.symbol()),
        }
    }

    fn step(&mut self) -> Status {
        match self.phase {
            Phase::Entering => Status::Running,
            _ => Status::Halted,
        }
    }

    fn render(&self, frame: &mut FrameBuffer) {
        match self.phase {
            Phase::Entering => frame.text(0, 0, &self.input),
            Phase::Answer(value) => {
                let mut line: String<32> = String::new();
                let _ = write!(line, "= {}", value);
                frame.text(0, 0, &line);
            }
            Phase::Failed(_) => frame.text(0, 0, "Error"),
        }
    }

    fn acknowledge(&mut self) {
        self.reset();
    }
}
