//! Unified error type for rxnode.
//!
//! Only the hardware glue produces these; the control core degrades every
//! anomaly to a no-op or a console notice, so the capability traits it
//! consumes are infallible. All variants carry fixed-size data - no `alloc`.

/// Top-level error type used by the hardware shims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// SPI transaction with the transceiver failed.
    Radio,

    /// I2C transaction with the display failed.
    Display,

    /// UARTE read/write failed or the line buffer overflowed.
    Serial,
}
