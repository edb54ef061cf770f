//! Build script for padplay-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Parses and validates padplay.toml, then bakes it in as `TUNING`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use padplay_core::config::Tuning;

fn main() {
    setup_linker();
    generate_tuning();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse padplay.toml and write `tuning.rs` into OUT_DIR
fn generate_tuning() {
    println!("cargo:rerun-if-changed=padplay.toml");

    let config_path = Path::new("padplay.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: padplay.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a padplay.toml tuning file.               ║\n\
            ║  Please create one in the padplay-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read padplay.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let tuning: Tuning = match toml::from_str(&content) {
        Ok(tuning) => tuning,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid padplay.toml                                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                error_msg
                    .lines()
                    .map(|l| format!("║  {:<64} ║", l))
                    .collect::<Vec<_>>()
                    .join("\n")
            );
        }
    };

    if let Err(e) = tuning.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Unplayable tuning in padplay.toml                        ║\n\
            ║                                                                  ║\n\
            ║  Error: {:<56} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!("{:?}", e)
        );
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("tuning.rs"), render_tuning(&tuning)).unwrap();
}

/// Emit `tuning` as a Rust constant expression
fn render_tuning(t: &Tuning) -> String {
    format!(
        "pub const TUNING: Tuning = Tuning {{\n\
         \x20   keypad: KeypadTiming {{ debounce_ms: {}, release_poll_ms: {}, idle_poll_ms: {} }},\n\
         \x20   frame: FrameTiming {{ game_frame_ms: {}, calculator_frame_ms: {}, splash_ms: {} }},\n\
         \x20   car: CarTuning {{ initial_speed: {}, min_speed: {}, max_speed: {}, spawn_rate: {} }},\n\
         \x20   pong: PongTuning {{ winning_score: {}, paddle_step: {}, ai_step: {} }},\n\
         }};\n",
        t.keypad.debounce_ms,
        t.keypad.release_poll_ms,
        t.keypad.idle_poll_ms,
        t.frame.game_frame_ms,
        t.frame.calculator_frame_ms,
        t.frame.splash_ms,
        t.car.initial_speed,
        t.car.min_speed,
        t.car.max_speed,
        t.car.spawn_rate,
        t.pong.winning_score,
        t.pong.paddle_step,
        t.pong.ai_step,
    )
}
