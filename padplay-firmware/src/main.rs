//! Padplay - Keypad Handheld Firmware
//!
//! Main firmware binary for the RP2040 handheld: a 4x4 keypad on GPIO and
//! an SSD1306 OLED on I2C0. Boots into a splash, lets the user pick a mode
//! from the menu and runs it until power-off.
//!
//! Wiring:
//! - I2C0: SDA = GP0, SCL = GP1 (400 kHz)
//! - Keypad rows (outputs): GP3, GP4, GP5, GP6
//! - Keypad columns (inputs, pull-down): GP7, GP9, GP10, GP11

#![no_std]
#![no_main]

use core::convert::Infallible;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Instant};
use embedded_hal_async::delay::DelayNs;
use padplay_display::DisplayBackend;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use {defmt_rtt as _, panic_probe as _};

use padplay_core::frame::Clock;
use padplay_core::{FrameError, FrameLoop, Game, KeySource, Keypad};

use crate::ssd1306::Ssd1306;
use crate::tuning::TUNING;

mod ssd1306;

/// Tuning baked in from padplay.toml by build.rs
mod tuning {
    use padplay_core::config::{CarTuning, FrameTiming, KeypadTiming, PongTuning, Tuning};

    include!(concat!(env!("OUT_DIR"), "/tuning.rs"));
}

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// I2C bus speed for the OLED
const I2C_FREQUENCY: u32 = 400_000;

/// Milliseconds since boot from the embassy time driver
struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Padplay firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // OLED on I2C0 (GP1 = SCL, GP0 = SDA)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY;
    let i2c = I2c::new_async(p.I2C0, p.PIN_1, p.PIN_0, Irqs, i2c_config);

    let mut panel = Ssd1306::new(i2c);
    if let Err(e) = panel.init().await {
        defmt::panic!("Failed to initialize display: {:?}", e);
    }
    info!("OLED initialized");

    // Keypad matrix
    let rows = [
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
    ];
    let cols = [
        Input::new(p.PIN_7, Pull::Down),
        Input::new(p.PIN_9, Pull::Down),
        Input::new(p.PIN_10, Pull::Down),
        Input::new(p.PIN_11, Pull::Down),
    ];

    let keypad = match Keypad::new(rows, cols, Delay, TUNING.keypad) {
        Ok(keypad) => keypad,
        Err(e) => defmt::panic!("Failed to initialize keypad: {:?}", e),
    };
    info!("Keypad initialized");

    let mut frames = FrameLoop::new(keypad, panel, Delay, SystemClock);

    let e = match run(&mut frames).await {
        Ok(never) => match never {},
        Err(e) => e,
    };
    defmt::panic!("Fatal hardware error: {:?}", e);
}

/// Splash, menu, then the chosen mode forever
async fn run<K, P, D, C>(frames: &mut FrameLoop<K, P, D, C>) -> Result<Infallible, FrameError>
where
    K: KeySource,
    P: DisplayBackend,
    D: DelayNs,
    C: Clock,
{
    frames.splash(TUNING.frame.splash_ms).await?;
    let kind = frames.select_mode().await?;

    // The moment of the menu key press is the only entropy on the board
    let rng = SmallRng::seed_from_u64(Instant::now().as_ticks());

    let mut game = Game::new(kind, &TUNING, rng);
    info!("Starting {}", game.kind().name());
    frames.run(&mut game).await
}
