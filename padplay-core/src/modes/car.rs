//! Car race mode
//!
//! The player drives in one of three lanes near the bottom of the screen
//! while obstacles scroll down. Every obstacle that leaves the bottom edge
//! scores a point; touching one ends the game.

use core::fmt::Write;

use heapless::{String, Vec};
use padplay_display::{FrameBuffer, HEIGHT};
use rand::{Rng, RngCore};

use crate::config::CarTuning;
use crate::frame::{Mode, Status};
use crate::geometry::Rect;
use crate::keypad::Key;

/// Left edge of each lane in pixels
pub const LANES: [i16; 3] = [28, 59, 90];

/// Highest lane index
pub const MAX_LANE: u8 = LANES.len() as u8 - 1;

/// Lane the car starts in
pub const START_LANE: u8 = 1;

/// Fixed vertical position of the player car
pub const CAR_Y: i16 = 50;

pub const CAR_WIDTH: i16 = 20;
pub const CAR_HEIGHT: i16 = 12;
pub const OBSTACLE_WIDTH: i16 = 20;
pub const OBSTACLE_HEIGHT: i16 = 12;

/// Obstacles spawn just above the top edge
pub const SPAWN_Y: i16 = -OBSTACLE_HEIGHT;

/// Obstacles below this line are removed and scored
pub const BOTTOM: i16 = HEIGHT as i16;

/// Dashed lane separators
const LANE_MARKINGS: [i32; 2] = [43, 74];
const MARKING_GAP: usize = 10;

/// Obstacles that can be on screen at once
pub const MAX_OBSTACLES: usize = 8;

/// Fastest scroll speed a tuning may select
pub const SPEED_LIMIT: u8 = OBSTACLE_HEIGHT as u8;

/// Most obstacles on the road at once under `tuning`
///
/// The worst case is the road crawling at `min_speed`: an obstacle then
/// survives `(BOTTOM - SPAWN_Y) / min_speed` frames and a new one arrives
/// every `spawn_rate` frames.
pub fn obstacles_on_road(tuning: &CarTuning) -> u32 {
    let lifetime = (BOTTOM - SPAWN_Y) as u32 / tuning.min_speed.max(1) as u32;
    lifetime.div_ceil(tuning.spawn_rate.max(1) as u32)
}

/// An oncoming car
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Obstacle {
    pub lane: u8,
    pub y: i16,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(
            LANES[self.lane as usize],
            self.y,
            OBSTACLE_WIDTH,
            OBSTACLE_HEIGHT,
        )
    }
}

/// Car race state
pub struct CarGame<R> {
    tuning: CarTuning,
    frame_period_ms: u32,
    rng: R,
    lane: u8,
    speed: u8,
    obstacles: Vec<Obstacle, MAX_OBSTACLES>,
    frame_count: u32,
    score: u32,
    game_over: bool,
}

impl<R: RngCore> CarGame<R> {
    pub fn new(tuning: CarTuning, frame_period_ms: u32, rng: R) -> Self {
        Self {
            tuning,
            frame_period_ms,
            rng,
            lane: START_LANE,
            speed: tuning.initial_speed,
            obstacles: Vec::new(),
            frame_count: 0,
            score: 0,
            game_over: false,
        }
    }

    pub fn lane(&self) -> u8 {
        self.lane
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Bounding box of the player car (spoiler excluded)
    pub fn car_rect(&self) -> Rect {
        Rect::new(LANES[self.lane as usize], CAR_Y, CAR_WIDTH, CAR_HEIGHT)
    }

    fn spawn(&mut self) {
        let lane = self.rng.gen_range(0..=MAX_LANE);
        // Validated tunings never exceed MAX_OBSTACLES
        let _ = self.obstacles.push(Obstacle { lane, y: SPAWN_Y });
    }

    fn draw_road(frame: &mut FrameBuffer) {
        for x in LANE_MARKINGS {
            frame.vline(x, 0, HEIGHT as i32, true);
            for y in (0..HEIGHT).step_by(MARKING_GAP) {
                frame.set_pixel(x, y as i32, false);
            }
        }
    }

    fn draw_car(&self, frame: &mut FrameBuffer) {
        let body = self.car_rect();
        body.fill(frame);
        Rect::new(body.x + 5, body.y - 4, CAR_WIDTH - 10, 4).fill(frame);
    }

    fn draw_hud(&self, frame: &mut FrameBuffer) {
        let mut line: String<16> = String::new();
        let _ = write!(line, "Score: {}", self.score);
        frame.text(0, 0, &line);

        line.clear();
        let _ = write!(line, "Speed: {}", self.speed);
        frame.text(80, 0, &line);
    }

    fn draw_game_over(&self, frame: &mut FrameBuffer) {
        let mut line: String<16> = String::new();
        let _ = write!(line, "Score: {}", self.score);
        frame.text(30, 20, "GAME OVER");
        frame.text(30, 40, &line);
        frame.text(0, 54, "Press any key");
    }
}

impl<R: RngCore> Mode for CarGame<R> {
    fn frame_period_ms(&self) -> u32 {
        self.frame_period_ms
    }

    fn render_intro(&self, frame: &mut FrameBuffer) {
        frame.text(30, 10, "CAR RACE!");
        frame.text(0, 26, "÷=Accel x=Decel");
        frame.text(0, 38, "-=Right +=Left");
        frame.text(0, 54, "Press any key");
    }

    fn reset(&mut self) {
        self.obstacles.clear();
        self.score = 0;
        self.game_over = false;
        self.lane = START_LANE;
        self.speed = self.tuning.initial_speed;
        self.frame_count = 0;
    }

    fn handle_key(&mut self, key: Key) {
        if self.game_over {
            return;
        }

        match key {
            Key::Divide => self.speed = self.speed.saturating_add(1).min(self.tuning.max_speed),
            Key::Times => {
                self.speed = self.speed.saturating_sub(1).max(self.tuning.min_speed)
            }
            Key::Plus => self.lane = self.lane.saturating_sub(1),
            Key::Minus => self.lane = (self.lane + 1).min(MAX_LANE),
            _ => {}
        }
    }

    fn step(&mut self) -> Status {
        if self.game_over {
            return Status::Halted;
        }

        self.frame_count += 1;
        if self.frame_count % self.tuning.spawn_rate as u32 == 0 {
            self.spawn();
        }

        let speed = self.speed as i16;
        for obstacle in self.obstacles.iter_mut() {
            obstacle.y += speed;
        }

        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.y <= BOTTOM);
        self.score += (before - self.obstacles.len()) as u32;

        let car = self.car_rect();
        if self.obstacles.iter().any(|o| o.rect().overlaps(&car)) {
            self.game_over = true;
            return Status::Halted;
        }

        Status::Running
    }

    fn render(&self, frame: &mut FrameBuffer) {
        if self.game_over {
            self.draw_game_over(frame);
            return;
        }

        Self::draw_road(frame);
        self.draw_car(frame);
        for obstacle in self.obstacles.iter() {
            obstacle.rect().fill(frame);
        }
        self.draw_hud(frame);
    }

    fn acknowledge(&mut self) {
        self.reset();
    }
}
