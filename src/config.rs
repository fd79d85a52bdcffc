//! Application-wide constants and compile-time configuration.
//!
//! All radio parameters, timing constants, and display geometry live
//! here so they can be tuned in one place.

// Radio

/// Channel selected at power-up.
pub const DEFAULT_CHANNEL: u8 = 3;

/// Highest configurable RF channel (2400 + 125 MHz).
pub const CHANNEL_MAX: u8 = 125;

/// Fixed payload size in bytes. Both ends of the link must agree.
pub const PAYLOAD_SIZE: usize = 8;

/// Auto-retransmit setup for the transceiver: (delay steps, count).
pub const RADIO_RETRIES: (u8, u8) = (15, 15);

/// Writing pipe address.
pub const PIPE_TX: u64 = 0xF0F0_F0F0_E1;

/// Reading pipe address (pipe 1).
pub const PIPE_RX: u64 = 0xF0F0_F0F0_D2;

// Power

/// Seconds of inactivity before the node powers down radio + display
/// and parks the CPU until a wake-capable interrupt fires.
pub const IDLE_TIMEOUT_SECS: u32 = 10;

// Input

/// Number of physical buttons wired to the front panel.
pub const BUTTON_COUNT: usize = 3;

/// Settle time after a button edge before levels are trusted (ms).
/// Applied by the board glue, not the tracker.
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

// Display

/// Pixel row where the packet/menu body starts (header occupies rows 0-15).
pub const BODY_ROW: u8 = 16;

/// Menu entry count. The menu state machine cycles over exactly this many.
pub const MENU_ITEMS: usize = 4;

// Control loop

/// Period of the cooperative control loop tick in the embedded build (ms).
pub const LOOP_PERIOD_MS: u64 = 10;

/// Capacity of the parsed-command queue between the serial reader and
/// the control loop.
pub const COMMAND_QUEUE_DEPTH: usize = 4;
