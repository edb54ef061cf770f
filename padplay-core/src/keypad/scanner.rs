//! Matrix scanner
//!
//! Energizes one row at a time and samples the columns. The first high
//! column in row-major order wins, so simultaneous presses resolve to the
//! lowest row, then the lowest column.
//!
//! A detected key is debounced, then the scanner waits for the key to be
//! released before reporting it. Holding a key therefore produces exactly
//! one event per press/release cycle. A column stuck high blocks the release
//! wait indefinitely.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use super::{Key, KeySource, KeypadError, COLS, KEY_MATRIX, ROWS};
use crate::config::KeypadTiming;

/// Debounced 4x4 keypad scanner
pub struct Keypad<R, C, D> {
    rows: [R; ROWS],
    cols: [C; COLS],
    delay: D,
    timing: KeypadTiming,
}

impl<R, C, D> Keypad<R, C, D>
where
    R: OutputPin,
    C: InputPin,
    D: DelayNs,
{
    /// Create a scanner and drive every row low
    pub fn new(
        rows: [R; ROWS],
        cols: [C; COLS],
        delay: D,
        timing: KeypadTiming,
    ) -> Result<Self, KeypadError> {
        let mut keypad = Self {
            rows,
            cols,
            delay,
            timing,
        };
        for row in 0..ROWS {
            keypad.drive(row, false)?;
        }
        Ok(keypad)
    }

    /// Scan the matrix once
    ///
    /// Returns the first pressed key after it has been released, or `None`
    /// if no key is down. Only one row is energized at any time, including
    /// when a pin error aborts the scan.
    pub async fn scan(&mut self) -> Result<Option<Key>, KeypadError> {
        for row in 0..ROWS {
            self.drive(row, true)?;
            let hit = self.sample_row(row).await;
            self.drive(row, false)?;

            if let Some(key) = hit? {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }

    /// Block until a key is pressed, polling at the idle interval
    pub async fn wait_for_key(&mut self) -> Result<Key, KeypadError> {
        loop {
            if let Some(key) = self.scan().await? {
                return Ok(key);
            }
            self.delay.delay_ms(self.timing.idle_poll_ms).await;
        }
    }

    /// Sample the columns of an energized row
    async fn sample_row(&mut self, row: usize) -> Result<Option<Key>, KeypadError> {
        for col in 0..COLS {
            if !self.column_high(col)? {
                continue;
            }

            self.delay.delay_ms(self.timing.debounce_ms).await;
            while self.column_high(col)? {
                self.delay.delay_ms(self.timing.release_poll_ms).await;
            }
            return Ok(Some(KEY_MATRIX[row][col]));
        }
        Ok(None)
    }

    fn drive(&mut self, row: usize, high: bool) -> Result<(), KeypadError> {
        let pin = &mut self.rows[row];
        let result = if high { pin.set_high() } else { pin.set_low() };
        result.map_err(|_| KeypadError::Row { index: row as u8 })
    }

    fn column_high(&mut self, col: usize) -> Result<bool, KeypadError> {
        self.cols[col]
            .is_high()
            .map_err(|_| KeypadError::Column { index: col as u8 })
    }
}

impl<R, C, D> KeySource for Keypad<R, C, D>
where
    R: OutputPin,
    C: InputPin,
    D: DelayNs,
{
    async fn scan(&mut self) -> Result<Option<Key>, KeypadError> {
        Keypad::scan(self).await
    }

    async fn wait_for_key(&mut self) -> Result<Key, KeypadError> {
        Keypad::wait_for_key(self).await
    }
}
