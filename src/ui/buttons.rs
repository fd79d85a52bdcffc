//! Debounced button input.
//!
//! Raw levels are sampled once per loop pass; the tracker turns them into
//! discrete press events. A press fires exactly once on the released→held
//! transition and never again until a release has been observed, so both
//! sustained holding and release bounce are silent. Holding any button
//! still counts as activity every pass (idle keepalive).

use heapless::Vec;

use crate::config::BUTTON_COUNT;
use crate::ui::Button;

/// Result of one tracker poll.
#[derive(Debug, Default)]
pub struct ButtonScan {
    /// Fresh press events this pass, in wiring order.
    pub pressed: Vec<Button, BUTTON_COUNT>,
    /// Any input currently held, edge or not.
    pub any_held: bool,
}

/// Tracks per-button held state across polls. Purely transient: nothing
/// here outlives the released→held edge detection.
#[derive(Debug, Default)]
pub struct ButtonTracker {
    held: [bool; BUTTON_COUNT],
}

impl ButtonTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate one sample of raw levels (`true` = held).
    pub fn poll(&mut self, levels: [bool; BUTTON_COUNT]) -> ButtonScan {
        let mut scan = ButtonScan::default();

        for (i, button) in Button::ALL.iter().enumerate() {
            if levels[i] {
                scan.any_held = true;
                if !self.held[i] {
                    // Capacity equals BUTTON_COUNT, push cannot fail.
                    let _ = scan.pressed.push(*button);
                }
            }
            self.held[i] = levels[i];
        }

        scan
    }
}
