//! Pong mode
//!
//! Player paddle on the left, AI paddle on the right. The AI chases the
//! ball's vertical position at a fixed step without prediction. Each point
//! pauses on a score screen; the first side to `winning_score` takes the
//! match.

use core::fmt::Write;

use heapless::String;
use padplay_display::{FrameBuffer, HEIGHT, WIDTH};

use crate::config::PongTuning;
use crate::frame::{Mode, Status};
use crate::geometry::Rect;
use crate::keypad::Key;

pub const PADDLE_WIDTH: i16 = 3;
pub const PADDLE_HEIGHT: i16 = 16;
pub const PADDLE_START_Y: i16 = 24;

/// Lowest paddle position that keeps it on screen
pub const PADDLE_MAX_Y: i16 = HEIGHT as i16 - PADDLE_HEIGHT;

pub const PLAYER_X: i16 = 0;
pub const AI_X: i16 = WIDTH as i16 - PADDLE_WIDTH;

pub const BALL_SIZE: i16 = 3;
pub const BALL_START: (i16, i16) = (64, 32);
pub const BALL_VELOCITY: (i16, i16) = (2, 1);

/// Vertical bounce bounds for the ball's top edge
pub const BALL_MIN_Y: i16 = 0;
pub const BALL_MAX_Y: i16 = HEIGHT as i16 - BALL_SIZE;

/// Ball x at which each paddle face is reached
pub const PLAYER_CONTACT_X: i16 = PLAYER_X + PADDLE_WIDTH;
pub const AI_CONTACT_X: i16 = AI_X - BALL_SIZE;

/// Ball x beyond which a side has missed
pub const PLAYER_MISS_X: i16 = -BALL_SIZE;
pub const AI_MISS_X: i16 = WIDTH as i16 + BALL_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    Playing,
    Point { player_scored: bool },
    MatchOver { player_won: bool },
}

/// Pong state
pub struct Pong {
    tuning: PongTuning,
    frame_period_ms: u32,
    player_y: i16,
    ai_y: i16,
    ball_x: i16,
    ball_y: i16,
    ball_dx: i16,
    ball_dy: i16,
    player_score: u8,
    ai_score: u8,
    phase: Phase,
}

impl Pong {
    pub fn new(tuning: PongTuning, frame_period_ms: u32) -> Self {
        Self {
            tuning,
            frame_period_ms,
            player_y: PADDLE_START_Y,
            ai_y: PADDLE_START_Y,
            ball_x: BALL_START.0,
            ball_y: BALL_START.1,
            ball_dx: BALL_VELOCITY.0,
            ball_dy: BALL_VELOCITY.1,
            player_score: 0,
            ai_score: 0,
            phase: Phase::Playing,
        }
    }

    pub fn player_y(&self) -> i16 {
        self.player_y
    }

    pub fn ai_y(&self) -> i16 {
        self.ai_y
    }

    pub fn ball(&self) -> (i16, i16) {
        (self.ball_x, self.ball_y)
    }

    pub fn velocity(&self) -> (i16, i16) {
        (self.ball_dx, self.ball_dy)
    }

    /// (player, AI)
    pub fn scores(&self) -> (u8, u8) {
        (self.player_score, self.ai_score)
    }

    pub fn is_match_over(&self) -> bool {
        matches!(self.phase, Phase::MatchOver { .. })
    }

    /// Put the ball and paddles back at their serve positions
    pub fn reset_positions(&mut self) {
        self.player_y = PADDLE_START_Y;
        self.ai_y = PADDLE_START_Y;
        self.ball_x = BALL_START.0;
        self.ball_y = BALL_START.1;
        self.ball_dx = BALL_VELOCITY.0;
        self.ball_dy = BALL_VELOCITY.1;
    }

    fn player_paddle(&self) -> Rect {
        Rect::new(PLAYER_X, self.player_y, PADDLE_WIDTH, PADDLE_HEIGHT)
    }

    fn ai_paddle(&self) -> Rect {
        Rect::new(AI_X, self.ai_y, PADDLE_WIDTH, PADDLE_HEIGHT)
    }

    fn move_ai(&mut self) {
        let centre = self.ai_y + PADDLE_HEIGHT / 2;
        let step = self.tuning.ai_step as i16;
        if self.ball_y > centre {
            self.ai_y += step;
        } else if self.ball_y < centre {
            self.ai_y -= step;
        }
        self.ai_y = self.ai_y.clamp(0, PADDLE_MAX_Y);
    }

    fn move_ball(&mut self) {
        self.ball_x += self.ball_dx;
        self.ball_y += self.ball_dy;

        if self.ball_y < BALL_MIN_Y {
            self.ball_y = BALL_MIN_Y;
            self.ball_dy = -self.ball_dy;
        } else if self.ball_y > BALL_MAX_Y {
            self.ball_y = BALL_MAX_Y;
            self.ball_dy = -self.ball_dy;
        }

        if self.ball_x <= PLAYER_CONTACT_X && self.player_paddle().spans_y(self.ball_y) {
            self.ball_x = PLAYER_CONTACT_X;
            self.ball_dx = -self.ball_dx;
        }

        if self.ball_x >= AI_CONTACT_X && self.ai_paddle().spans_y(self.ball_y) {
            self.ball_x = AI_CONTACT_X;
            self.ball_dx = -self.ball_dx;
        }
    }

    fn score_point(&mut self, player_scored: bool) {
        let score = if player_scored {
            &mut self.player_score
        } else {
            &mut self.ai_score
        };
        *score += 1;

        self.phase = if *score >= self.tuning.winning_score {
            Phase::MatchOver {
                player_won: player_scored,
            }
        } else {
            Phase::Point { player_scored }
        };
    }

    fn score_line(&self) -> String<24> {
        let mut line = String::new();
        let _ = write!(
            line,
            "Score: P{} - AI{}",
            self.player_score, self.ai_score
        );
        line
    }
}

impl Mode for Pong {
    fn frame_period_ms(&self) -> u32 {
        self.frame_period_ms
    }

    fn render_intro(&self, frame: &mut FrameBuffer) {
        frame.text(10, 10, "PONG: AI Edition");
        frame.text(0, 30, "÷ = UP, x = DOWN");
        frame.text(0, 50, "Press any key...");
    }

    fn reset(&mut self) {
        self.reset_positions();
        self.player_score = 0;
        self.ai_score = 0;
        self.phase = Phase::Playing;
    }

    fn handle_key(&mut self, key: Key) {
        if self.phase != Phase::Playing {
            return;
        }

        let step = self.tuning.paddle_step as i16;
        match key {
            Key::Divide => self.player_y -= step,
            Key::Times => self.player_y += step,
            _ => {}
        }
        self.player_y = self.player_y.clamp(0, PADDLE_MAX_Y);
    }

    fn step(&mut self) -> Status {
        if self.phase != Phase::Playing {
            return Status::Halted;
        }

        self.move_ai();
        self.move_ball();

        if self.ball_x < PLAYER_MISS_X {
            self.score_point(false);
        } else if self.ball_x > AI_MISS_X {
            self.score_point(true);
        }

        match self.phase {
            Phase::Playing => Status::Running,
            _ => Status::Halted,
        }
    }

    fn render(&self, frame: &mut FrameBuffer) {
        match self.phase {
            Phase::Playing => {
                let mut line: String<24> = String::new();
                let _ = write!(
                    line,
                    "P: {}  AI: {}",
                    self.player_score, self.ai_score
                );
                frame.text(20, 0, &line);
                self.player_paddle().fill(frame);
                self.ai_paddle().fill(frame);
                Rect::new(self.ball_x, self.ball_y, BALL_SIZE, BALL_SIZE).fill(frame);
            }
            Phase::Point { player_scored } => {
                frame.text(30, 20, if player_scored { "You Win!" } else { "You Lose!" });
                frame.text(15, 40, &self.score_line());
                frame.text(0, 54, "Press any key");
            }
            Phase::MatchOver { player_won } => {
                frame.text(30, 20, "GAME OVER");
                frame.text(
                    0,
                    40,
                    if player_won {
                        "You are the Champ!"
                    } else {
                        "AI wins! Try again"
                    },
                );
                frame.text(0, 54, "Press any key");
            }
        }
    }

    fn acknowledge(&mut self) {
        match self.phase {
            Phase::Point { .. } => {
                self.reset_positions();
                self.phase = Phase::Playing;
            }
            Phase::MatchOver { .. } => self.reset(),
            Phase::Playing => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pong() -> Pong {
        Pong::new(PongTuning::default(), 30)
    }

    #[test]
    fn test_initial_state() {
        let pong = pong();
        assert_eq!(pong.ball(), (64, 32));
        assert_eq!(pong.velocity(), (2, 1));
        assert_eq!(pong.scores(), (0, 0));
        assert_eq!(pong.player_y(), 24);
    }

    #[test]
    fn test_bottom_bounce() {
        let mut pong = pong();
        pong.ball_y = 61;

        assert_eq!(pong.step(), Status::Running);
        assert_eq!(pong.ball(), (66, 61));
        assert_eq!(pong.velocity(), (2, -1));
    }

    #[test]
    fn test_top_bounce() {
        let mut pong = pong();
        pong.ball_y = 0;
        pong.ball_dy = -1;

        pong.step();
        assert_eq!(pong.ball().1, 0);
        assert_eq!(pong.velocity(), (2, 1));
    }

    #[test]
    fn test_player_paddle_contact() {
        let mut pong = pong();
        pong.ball_x = 5;
        pong.ball_y = 30;
        pong.ball_dx = -2;
        pong.ball_dy = 0;

        pong.step();
        assert_eq!(pong.ball(), (3, 30));
        assert_eq!(pong.velocity(), (2, 0));
    }

    #[test]
    fn test_ai_paddle_contact() {
        let mut pong = pong();
        pong.ball_x = 120;
        pong.ball_y = 30;
        pong.ball_dy = 0;

        assert_eq!(pong.step(), Status::Running);
        // Paddle centre was below the ball, so the AI moved up first
        assert_eq!(pong.ai_y(), 22);
        assert_eq!(pong.ball(), (AI_CONTACT_X, 30));
        assert_eq!(pong.velocity(), (-2, 0));
    }

    #[test]
    fn test_player_miss_scores_ai() {
        let mut pong = pong();
        pong.player_y = 0;
        pong.ball_x = -2;
        pong.ball_y = 60;
        pong.ball_dx = -2;
        pong.ball_dy = 0;

        assert_eq!(pong.step(), Status::Halted);
        assert_eq!(pong.scores(), (0, 1));
        assert!(!pong.is_match_over());

        pong.acknowledge();
        assert_eq!(pong.ball(), BALL_START);
        assert_eq!(pong.scores(), (0, 1));
        assert_eq!(pong.step(), Status::Running);
    }

    #[test]
    fn test_ai_tracks_ball() {
        let mut pong = pong();
        pong.ball_y = 60;
        pong.ball_dy = 0;

        pong.step();
        assert_eq!(pong.ai_y(), 26);

        pong.ball_y = 0;
        pong.step();
        assert_eq!(pong.ai_y(), 24);
    }

    #[test]
    fn test_player_paddle_clamped() {
        let mut pong = pong();
        for _ in 0..20 {
            pong.handle_key(Key::Divide);
        }
        assert_eq!(pong.player_y(), 0);

        for _ in 0..20 {
            pong.handle_key(Key::Times);
        }
        assert_eq!(pong.player_y(), PADDLE_MAX_Y);
    }

    #[test]
    fn test_match_ends_at_winning_score() {
        let mut pong = pong();
        pong.player_score = 4;
        pong.ai_y = 0;
        pong.ball_x = 131;
        pong.ball_y = 60;
        pong.ball_dy = 0;

        assert_eq!(pong.step(), Status::Halted);
        assert_eq!(pong.scores(), (5, 0));
        assert!(pong.is_match_over());

        // Keys ignored, stays halted until acknowledged
        pong.handle_key(Key::Divide);
        assert_eq!(pong.step(), Status::Halted);

        pong.acknowledge();
        assert_eq!(pong.scores(), (0, 0));
        assert!(!pong.is_match_over());
    }

    #[test]
    fn test_ai_wins_match() {
        let mut pong = pong();
        pong.ai_score = 4;
        pong.player_y = 0;
        pong.ball_x = -2;
        pong.ball_y = 60;
        pong.ball_dx = -2;
        pong.ball_dy = 0;

        assert_eq!(pong.step(), Status::Halted);
        assert_eq!(pong.scores(), (0, 5));
        assert!(pong.is_match_over());

        let mut frame = FrameBuffer::new();
        pong.render(&mut frame);
        let mut expected = FrameBuffer::new();
        expected.text(30, 20, "GAME OVER");
        expected.text(0, 40, "AI wins! Try again");
        expected.text(0, 54, "Press any key");
        assert_eq!(frame, expected);

        pong.acknowledge();
        assert_eq!(pong.scores(), (0, 0));
        assert_eq!(pong.ball(), BALL_START);
        assert_eq!(pong.step(), Status::Running);
    }
}
