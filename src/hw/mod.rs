//! Hardware glue for the nRF52840 build (cargo feature `embedded`).
//!
//! Implements the capability traits from [`crate::hal`] against real
//! peripherals: an nRF24L01+ over SPI, an SSD1306 OLED over I2C, a UARTE
//! console, and board-level buttons/battery/sleep. None of this is
//! compiled for host tests.

pub mod board;
pub mod display;
pub mod nrf24;
pub mod serial;

use crate::hal::Clock;

/// Tick source backed by the embassy RTC time driver. Keeps counting
/// while the control loop is parked, so the idle rearm after wake sees
/// real elapsed time.
#[derive(Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now_ticks(&self) -> u64 {
        embassy_time::Instant::now().as_ticks()
    }

    fn ticks_from_secs(&self, secs: u32) -> u64 {
        secs as u64 * embassy_time::TICK_HZ
    }
}
