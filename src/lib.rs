//! Control core of a battery-powered nRF24L01+ receiver node.
//!
//! Everything here is the event coordination and state-machine layer:
//! turning radio IRQs, button edges, serial commands, and timer ticks into
//! deterministic state transitions - channel switching, menu navigation,
//! display-dirty coalescing, and idle-driven power transitions.
//!
//! Hardware is reached only through the capability traits in [`hal`], so
//! the whole layer builds and tests on the host (`cargo test`). The
//! embedded binary in `main.rs` (cargo feature `embedded`) wires the
//! traits to an nRF52840, an nRF24L01+ shim, an SSD1306 OLED, and a
//! UARTE console.
//!
//! Concurrency model: a single cooperative loop owns all structured
//! state. Interrupt context touches nothing but the primitive latches in
//! [`latch`]; the loop polls and clears them each pass.

#![cfg_attr(not(test), no_std)]

pub mod channel;
pub mod command;
pub mod config;
pub mod control;
pub mod error;
pub mod hal;
pub mod idle;
pub mod latch;
pub mod ui;

#[cfg(feature = "embedded")]
pub mod hw;

pub use channel::{normalize, ChannelController, ReceiveCounters};
pub use command::{Action, ChannelRequest, CommandLine};
pub use control::Node;
pub use error::Error;
pub use hal::{Board, Clock, Console, DisplaySurface, IrqStatus, Transceiver};
pub use idle::IdleTimer;
pub use latch::{EventLatch, Latches, TickCounter};
pub use ui::{Button, DisplayMode, MenuEntry, UiState};
