//! User interface state - menu overlay, display mode, physical buttons.
//!
//! The UI is a single struct of plain state mutated only by the control
//! loop; rendering rebuilds the whole frame from it each time (`frame`).

pub mod buttons;
pub mod frame;
pub mod menu;

pub use menu::MenuEntry;

/// Physical buttons in wiring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Button 0: confirm the menu selection / toggle the menu.
    Confirm,
    /// Button 1: next menu entry / next channel.
    Next,
    /// Button 2: previous menu entry / previous channel.
    Prev,
}

impl Button {
    /// Wiring order used by the input tracker.
    pub const ALL: [Button; crate::config::BUTTON_COUNT] =
        [Button::Confirm, Button::Next, Button::Prev];
}

/// How a received payload is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Raw character glyphs.
    Ascii,
    /// Space-separated decimal byte values.
    Decimal,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Ascii => DisplayMode::Decimal,
            DisplayMode::Decimal => DisplayMode::Ascii,
        }
    }
}

/// UI-visible state. `selected` stays meaningful across menu close/reopen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    pub menu_visible: bool,
    pub selected: MenuEntry,
    pub display_mode: DisplayMode,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            menu_visible: false,
            selected: MenuEntry::SendData,
            display_mode: DisplayMode::Decimal,
        }
    }
}
