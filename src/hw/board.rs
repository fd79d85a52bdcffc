//! Board-level inputs: buttons, battery divider, and the low-power park.

use embassy_futures::block_on;
use embassy_nrf::gpio::Input;
use embassy_nrf::saadc::Saadc;
use embassy_time::{Duration, Timer};

use crate::config::{BUTTON_COUNT, BUTTON_DEBOUNCE_MS};
use crate::hal::Board;
use crate::latch::Latches;

pub struct NodeBoard {
    buttons: [Input<'static>; BUTTON_COUNT],
    adc: Saadc<'static, 1>,
    latches: &'static Latches,
    settled: [bool; BUTTON_COUNT],
}

impl NodeBoard {
    pub fn new(
        buttons: [Input<'static>; BUTTON_COUNT],
        adc: Saadc<'static, 1>,
        latches: &'static Latches,
    ) -> Self {
        Self {
            buttons,
            adc,
            latches,
            settled: [false; BUTTON_COUNT],
        }
    }

    fn sample(&self) -> [bool; BUTTON_COUNT] {
        // Active-low with pull-ups.
        [
            self.buttons[0].is_low(),
            self.buttons[1].is_low(),
            self.buttons[2].is_low(),
        ]
    }
}

impl Board for NodeBoard {
    fn read_buttons(&mut self) -> [bool; BUTTON_COUNT] {
        let raw = self.sample();
        if raw != self.settled {
            // Contact bounce: wait out the settle window and re-sample
            // before trusting the new levels.
            block_on(Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)));
            self.settled = self.sample();
        }
        self.settled
    }

    fn read_battery(&mut self) -> u16 {
        let mut sample = [0i16; 1];
        // Blocks until the conversion completes; a busy converter is a
        // wait, not an error.
        block_on(self.adc.sample(&mut sample));
        sample[0].max(0) as u16
    }

    fn sleep_until_wake(&mut self) {
        block_on(async {
            loop {
                if self.latches.radio_ready.is_raised() || self.latches.serial_ready.is_raised() {
                    break;
                }

                let levels = self.sample();
                let mut woken = false;
                for (i, held) in levels.iter().enumerate() {
                    if *held {
                        self.latches.button_edge[i].raise();
                        woken = true;
                    }
                }
                if woken {
                    break;
                }

                Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
            }
        });
    }
}
