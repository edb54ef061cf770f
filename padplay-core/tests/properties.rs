//! Property tests across the public API

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embassy_futures::block_on;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use padplay_core::config::{CarTuning, KeypadTiming, PongTuning};
use padplay_core::keypad::{Key, Keypad, KEY_MATRIX};
use padplay_core::modes::calculator::{evaluate, is_valid_input, EvalError, INPUT_CAPACITY};
use padplay_core::modes::car::{CarGame, MAX_LANE};
use padplay_core::modes::pong::{Pong, BALL_MAX_Y, BALL_MIN_Y};
use padplay_core::{Mode, Status};

// Keypad wiring where every pressed key lets go once the scanner sleeps

#[derive(Default)]
struct Wiring {
    energized: [Cell<bool>; 4],
    peak: Cell<usize>,
    held: [[Cell<bool>; 4]; 4],
}

impl Wiring {
    fn energized_count(&self) -> usize {
        self.energized.iter().filter(|r| r.get()).count()
    }
}

struct Row(Rc<Wiring>, usize);
struct Col(Rc<Wiring>, usize);
struct Sleep(Rc<Wiring>);

impl ErrorType for Row {
    type Error = Infallible;
}

impl OutputPin for Row {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.energized[self.1].set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.energized[self.1].set(true);
        let count = self.0.energized_count();
        self.0.peak.set(self.0.peak.get().max(count));
        Ok(())
    }
}

impl ErrorType for Col {
    type Error = Infallible;
}

impl InputPin for Col {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        let w = &self.0;
        Ok((0..4).any(|r| w.energized[r].get() && w.held[r][self.1].get()))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

impl DelayNs for Sleep {
    async fn delay_ns(&mut self, _ns: u32) {
        for row in self.0.held.iter() {
            for key in row.iter() {
                key.set(false);
            }
        }
    }
}

fn keypad(wiring: &Rc<Wiring>) -> Keypad<Row, Col, Sleep> {
    let rows = [0, 1, 2, 3].map(|i| Row(wiring.clone(), i));
    let cols = [0, 1, 2, 3].map(|i| Col(wiring.clone(), i));
    match Keypad::new(rows, cols, Sleep(wiring.clone()), KeypadTiming::default()) {
        Ok(pad) => pad,
        Err(e) => panic!("keypad init failed: {:?}", e),
    }
}

fn any_key() -> impl Strategy<Value = Key> {
    let keys: Vec<Key> = KEY_MATRIX.iter().flatten().copied().collect();
    prop::sample::select(keys)
}

proptest! {
    #[test]
    fn scan_energizes_one_row_and_picks_first_key(
        held in prop::array::uniform4(prop::array::uniform4(any::<bool>()))
    ) {
        let wiring = Rc::new(Wiring::default());
        for (r, row) in held.iter().enumerate() {
            for (c, &down) in row.iter().enumerate() {
                wiring.held[r][c].set(down);
            }
        }

        let mut pad = keypad(&wiring);
        let key = block_on(pad.scan()).unwrap();

        let expected = (0..4)
            .flat_map(|r| (0..4).map(move |c| (r, c)))
            .find(|&(r, c)| held[r][c])
            .map(|(r, c)| KEY_MATRIX[r][c]);

        prop_assert_eq!(key, expected);
        prop_assert!(wiring.peak.get() <= 1);
        prop_assert_eq!(wiring.energized_count(), 0);
    }

    #[test]
    fn accepted_input_completes_with_a_digit(keys in prop::collection::vec(any_key(), 0..40)) {
        let mut buffer = String::new();
        for key in keys {
            let ch = key.symbol();
            if buffer.len() < INPUT_CAPACITY && is_valid_input(&buffer, ch) {
                buffer.push(ch);
            }
        }

        buffer.push('1');
        prop_assert_ne!(evaluate(&buffer), Err(EvalError::Syntax));
    }

    #[test]
    fn car_stays_within_bounds(
        keys in prop::collection::vec(prop::option::of(any_key()), 0..300),
        seed in any::<u64>(),
    ) {
        let tuning = CarTuning::default();
        let mut game = CarGame::new(tuning, 30, SmallRng::seed_from_u64(seed));
        game.reset();

        for key in keys {
            if let Some(key) = key {
                game.handle_key(key);
            }
            if game.step() == Status::Halted {
                game.acknowledge();
            }
            prop_assert!(game.lane() <= MAX_LANE);
            prop_assert!((tuning.min_speed..=tuning.max_speed).contains(&game.speed()));
        }
    }

    #[test]
    fn pong_ball_stays_on_the_court(keys in prop::collection::vec(prop::option::of(any_key()), 0..600)) {
        let mut pong = Pong::new(PongTuning::default(), 30);

        for key in keys {
            if let Some(key) = key {
                pong.handle_key(key);
            }
            match pong.step() {
                Status::Running => {
                    let (_, y) = pong.ball();
                    let (dx, dy) = pong.velocity();
                    prop_assert!((BALL_MIN_Y..=BALL_MAX_Y).contains(&y));
                    prop_assert_eq!(dx.abs(), 2);
                    prop_assert_eq!(dy.abs(), 1);
                }
                Status::Halted => pong.acknowledge(),
            }
            prop_assert!(pong.scores().0 < 5 && pong.scores().1 < 5);
        }
    }
}
