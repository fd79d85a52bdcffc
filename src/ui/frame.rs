//! Display refresh gating and frame assembly.
//!
//! Mutators call [`DisplayGate::mark`]; the render step takes the flag at
//! most once per loop pass, so any number of changes in one pass collapse
//! into a single render. The frame itself is rebuilt in full from current
//! state every time - no incremental buffer editing.

use core::fmt::Write;

use heapless::String;

use crate::channel::ReceiveCounters;
use crate::ui::{DisplayMode, MenuEntry, UiState};

/// Process-wide display-stale flag.
#[derive(Debug, Default)]
pub struct DisplayGate {
    dirty: bool,
}

impl DisplayGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag the rendered output as stale. Callable by any mutator, any
    /// number of times per pass.
    pub fn mark(&mut self) {
        self.dirty = true;
    }

    /// Check-and-clear. The render step calls this exactly once per pass.
    pub fn take(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// One complete frame: header line plus wrapped body block.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Frame {
    /// Frequency, channel, battery, packet count in fixed-width fields.
    pub header: String<32>,
    /// Menu overlay, payload dump, or empty before the first packet.
    pub body: String<96>,
}

/// Rebuild the frame from scratch out of current state.
pub fn build_frame(
    channel: u8,
    battery: u16,
    counters: &ReceiveCounters,
    payload: &[u8],
    ui: &UiState,
) -> Frame {
    let mut frame = Frame::default();

    let _ = write!(
        frame.header,
        "F={}Mhz  {:03}B={} P={:05}",
        2400 + channel as u16,
        channel,
        battery,
        counters.count
    );

    if ui.menu_visible {
        for entry in MenuEntry::ALL {
            let marker = if entry == ui.selected { "->" } else { "  " };
            let _ = write!(frame.body, "{}{}\n", marker, entry.label());
        }
    } else if counters.has_data {
        match ui.display_mode {
            DisplayMode::Decimal => {
                for (i, b) in payload.iter().enumerate() {
                    if i == 0 {
                        let _ = write!(frame.body, "{}", b);
                    } else {
                        let _ = write!(frame.body, " {}", b);
                    }
                }
            }
            DisplayMode::Ascii => {
                for &b in payload {
                    let _ = frame.body.push(b as char);
                }
            }
        }
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters(count: u16, has_data: bool) -> ReceiveCounters {
        ReceiveCounters { count, has_data }
    }

    #[test]
    fn gate_take_clears_and_coalesces() {
        let mut g = DisplayGate::new();
        assert!(!g.take());

        g.mark();
        g.mark();
        g.mark();
        assert!(g.take());
        assert!(!g.take());
    }

    #[test]
    fn header_uses_fixed_width_fields() {
        let f = build_frame(3, 512, &counters(12, true), &[0; 8], &UiState::default());
        assert_eq!(f.header.as_str(), "F=2403Mhz  003B=512 P=00012");
    }

    #[test]
    fn body_empty_before_first_packet() {
        let f = build_frame(3, 0, &counters(0, false), &[0; 8], &UiState::default());
        assert!(f.body.is_empty());
    }

    #[test]
    fn menu_marks_the_selected_entry() {
        let ui = UiState {
            menu_visible: true,
            selected: MenuEntry::ShowMode,
            ..UiState::default()
        };
        let f = build_frame(3, 0, &counters(0, false), &[0; 8], &ui);
        assert_eq!(
            f.body.as_str(),
            "  Send Data\n->Show D/A\n  Led ON/OFF\n  Exit\n"
        );
    }

    #[test]
    fn menu_overlay_hides_payload() {
        let ui = UiState {
            menu_visible: true,
            ..UiState::default()
        };
        let f = build_frame(3, 0, &counters(5, true), &[65; 8], &ui);
        assert!(f.body.starts_with("->Send Data"));
    }

    #[test]
    fn decimal_mode_renders_byte_values() {
        let f = build_frame(
            3,
            0,
            &counters(1, true),
            &[0, 1, 10, 255, 42, 7, 0, 128],
            &UiState::default(),
        );
        assert_eq!(f.body.as_str(), "0 1 10 255 42 7 0 128");
    }

    #[test]
    fn ascii_mode_renders_glyphs() {
        let ui = UiState {
            display_mode: DisplayMode::Ascii,
            ..UiState::default()
        };
        let f = build_frame(3, 0, &counters(1, true), b"RXNODE!!", &ui);
        assert_eq!(f.body.as_str(), "RXNODE!!");
    }
}
