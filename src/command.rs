//! Command dispatch: serial lines and button edges map onto one small
//! action set, consumed by the control loop.

use heapless::{String, Vec};

use crate::ui::{Button, UiState};

/// Maximum length of one token on the serial console.
pub const TOKEN_LEN: usize = 16;

/// Maximum number of arguments after the command name.
pub const MAX_ARGS: usize = 4;

/// A tokenized console line: command name plus ordered arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    pub cmd: String<TOKEN_LEN>,
    pub args: Vec<String<TOKEN_LEN>, MAX_ARGS>,
}

/// Split a raw line on whitespace into a `CommandLine`.
///
/// Overlong tokens and surplus arguments are dropped rather than erroring;
/// an empty or all-whitespace line yields `None`.
pub fn tokenize(line: &str) -> Option<CommandLine> {
    let mut parts = line.split_whitespace();

    let cmd_tok = parts.next()?;
    let mut out = CommandLine::default();
    if out.cmd.push_str(cmd_tok).is_err() {
        return None;
    }

    for tok in parts {
        let mut arg = String::new();
        if arg.push_str(tok).is_err() {
            continue;
        }
        if out.args.push(arg).is_err() {
            break;
        }
    }

    Some(out)
}

/// How a channel change was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelRequest {
    /// `channel <n>` from the console.
    Absolute(u8),
    /// Dial up one channel.
    Up,
    /// Dial down one channel.
    Down,
}

/// Everything the node can be asked to do, from any input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    ChangeChannel(ChannelRequest),
    ToggleMenu,
    MenuNext,
    MenuPrev,
    ChangeDisplayMode,
    ToggleBacklight,
    /// Transmit placeholder; selectable from the menu, currently inert.
    SendData,
    Noop,
}

/// Map a console command onto an action.
///
/// `q`/`w`/`e` mirror the three physical buttons so the node can be
/// driven entirely over serial. Anything unrecognized, and `channel`
/// without a parseable `u8` argument, is a `Noop` - never an error.
pub fn dispatch_command(line: &CommandLine, ui: &UiState) -> Action {
    match line.cmd.as_str() {
        "channel" => match line.args.first().and_then(|a| a.parse::<u8>().ok()) {
            Some(n) => Action::ChangeChannel(ChannelRequest::Absolute(n)),
            None => Action::Noop,
        },
        "q" => Action::ToggleMenu,
        "w" => next_or_dial_up(ui),
        "e" => prev_or_dial_down(ui),
        _ => Action::Noop,
    }
}

/// Map a debounced button press onto an action.
pub fn dispatch_button(button: Button, ui: &UiState) -> Action {
    match button {
        Button::Confirm => Action::ToggleMenu,
        Button::Next => next_or_dial_up(ui),
        Button::Prev => prev_or_dial_down(ui),
    }
}

fn next_or_dial_up(ui: &UiState) -> Action {
    if ui.menu_visible {
        Action::MenuNext
    } else {
        Action::ChangeChannel(ChannelRequest::Up)
    }
}

fn prev_or_dial_down(ui: &UiState) -> Action {
    if ui.menu_visible {
        Action::MenuPrev
    } else {
        Action::ChangeChannel(ChannelRequest::Down)
    }
}
