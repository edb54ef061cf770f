//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 SSD1306-based OLED panels via I2C. The frame buffer
//! lives in `padplay-display`; this only pushes it to the panel page by
//! page.

use embedded_hal_async::i2c::I2c;
use padplay_display::{DisplayBackend, DisplayError, FrameBuffer, PAGES, WIDTH};

/// SSD1306 I2C address (typically 0x3C or 0x3D)
const SSD1306_ADDR: u8 = 0x3C;

/// Control bytes
const COMMAND: u8 = 0x00;
const DATA: u8 = 0x40;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_ENTIRE_ON_RESUME: u8 = 0xA4;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEM_ADDR_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    initialized: bool,
}

impl<I2C: I2c> Ssd1306<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            initialized: false,
        }
    }

    /// Send a command to the display
    async fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(SSD1306_ADDR, &[COMMAND, cmd])
            .await
            .map_err(|_| DisplayError::Communication)
    }

    async fn commands(&mut self, cmds: &[u8]) -> Result<(), DisplayError> {
        for &c in cmds {
            self.command(c).await?;
        }
        Ok(())
    }
}

impl<I2C: I2c> DisplayBackend for Ssd1306<I2C> {
    async fn init(&mut self) -> Result<(), DisplayError> {
        self.commands(&[
            cmd::DISPLAY_OFF,
            cmd::SET_MEM_ADDR_MODE,
            0x00, // Horizontal addressing
            cmd::SET_START_LINE | 0x00,
            cmd::SET_SEG_REMAP,
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_COM_SCAN_DEC,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x30,
            cmd::SET_CONTRAST,
            0xFF,
            cmd::SET_ENTIRE_ON_RESUME,
            cmd::SET_NORMAL,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::DISPLAY_ON,
        ])
        .await?;

        self.initialized = true;
        Ok(())
    }

    async fn present(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        // Full window, then stream every page
        self.commands(&[
            cmd::SET_COLUMN_ADDR,
            0,
            (WIDTH - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            (PAGES - 1) as u8,
        ])
        .await?;

        let mut data = [0u8; WIDTH + 1];
        data[0] = DATA;
        for page in (0..PAGES).filter_map(|page| frame.page(page)) {
            data[1..].copy_from_slice(page);
            self.i2c
                .write(SSD1306_ADDR, &data)
                .await
                .map_err(|_| DisplayError::Communication)?;
        }

        Ok(())
    }
}
