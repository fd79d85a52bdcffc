//! Capability traits consumed by the control core.
//!
//! Each trait is the narrow surface of one external collaborator: the
//! radio driver, the display driver, the serial console, the tick source,
//! and the board (buttons, battery, sleep). The embedded build implements
//! them in `hw/`; the test suite implements them with recording mocks.
//!
//! The traits are infallible on purpose: every anomaly the device can hit
//! either degrades to a no-op inside the driver or is reported through the
//! console, matching a unit whose only recovery is a power cycle.

use crate::command::CommandLine;

/// Interrupt status snapshot from the transceiver, read-and-cleared in
/// one transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrqStatus {
    pub tx_ok: bool,
    pub tx_fail: bool,
    pub rx_ok: bool,
}

/// 2.4 GHz packet transceiver (nRF24L01+ class).
///
/// Bring-up (payload size, PA level, retries, pipe addresses) happens in
/// the concrete driver before the control loop starts; the core only ever
/// needs the operations below.
pub trait Transceiver {
    /// Select RF channel `ch` (offset from 2400 MHz). Caller guarantees
    /// `ch <= 125`.
    fn set_channel(&mut self, ch: u8);

    /// Enter receive mode on the configured reading pipe.
    fn start_listening(&mut self);

    /// Leave receive mode.
    fn stop_listening(&mut self);

    /// Read and clear the pending interrupt status.
    fn irq_status(&mut self) -> IrqStatus;

    /// Copy the most recent payload into `buf`.
    fn read(&mut self, buf: &mut [u8]);

    /// Drop anything still queued in the receive FIFO.
    fn flush_rx(&mut self);

    fn power_up(&mut self);
    fn power_down(&mut self);
}

/// Text display with a backlight, wrapped line rendering, and a
/// low-power sleep mode.
pub trait DisplaySurface {
    /// Clear the frame buffer (not yet pushed to the panel).
    fn clear(&mut self);

    /// Draw `text` starting at pixel `(x, y)`, wrapping at the right edge.
    fn text(&mut self, x: u8, y: u8, text: &str);

    /// Push the frame buffer to the panel.
    fn present(&mut self);

    fn sleep(&mut self);
    fn wake(&mut self);

    fn set_backlight(&mut self, on: bool);
}

/// Serial console: tokenized command input, formatted text output.
///
/// Byte-level buffering and tokenization live outside the core; the loop
/// sees at most one complete command line per poll.
pub trait Console {
    /// Non-blocking: the next complete command line, if one has arrived.
    fn poll_command(&mut self) -> Option<CommandLine>;

    /// Write one line of log/output text.
    fn write_line(&mut self, line: &str);
}

/// Monotonic tick source, convertible from seconds.
pub trait Clock {
    fn now_ticks(&self) -> u64;
    fn ticks_from_secs(&self, secs: u32) -> u64;
}

/// Everything wired straight to the board: buttons, battery divider,
/// and the low-power sleep entry.
pub trait Board {
    /// Raw button levels in wiring order, `true` = held.
    fn read_buttons(&mut self) -> [bool; crate::config::BUTTON_COUNT];

    /// Sample the battery divider. Blocks until the conversion completes;
    /// a busy converter is a wait, not an error.
    fn read_battery(&mut self) -> u16;

    /// Park the CPU until a wake-capable interrupt fires. Blocks the
    /// entire control loop; resuming returns here.
    fn sleep_until_wake(&mut self);
}
