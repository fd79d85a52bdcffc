//! Shared test infrastructure: recording mock capabilities and a
//! controllable clock, wired into a ready-to-poll `Node`.

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use rxnode::command::{tokenize, CommandLine};
use rxnode::config::PAYLOAD_SIZE;
use rxnode::hal::{Board, Clock, Console, DisplaySurface, IrqStatus, Transceiver};
use rxnode::latch::Latches;
use rxnode::Node;

/// Mock tick rate: 100 ticks per second, so the default 10 s idle
/// timeout is 1000 ticks.
pub const TICKS_PER_SEC: u64 = 100;

pub type Trace = Rc<RefCell<Vec<&'static str>>>;

// ============================================================================
// Mock Transceiver
// ============================================================================

#[derive(Default)]
pub struct RadioState {
    pub channel_writes: Vec<u8>,
    pub next_status: IrqStatus,
    pub next_payload: [u8; PAYLOAD_SIZE],
    pub flushes: usize,
}

pub struct MockRadio {
    pub state: Rc<RefCell<RadioState>>,
    trace: Trace,
}

impl Transceiver for MockRadio {
    fn set_channel(&mut self, ch: u8) {
        self.state.borrow_mut().channel_writes.push(ch);
        self.trace.borrow_mut().push("radio.set_channel");
    }

    fn start_listening(&mut self) {
        self.trace.borrow_mut().push("radio.start_listening");
    }

    fn stop_listening(&mut self) {
        self.trace.borrow_mut().push("radio.stop_listening");
    }

    fn irq_status(&mut self) -> IrqStatus {
        self.state.borrow().next_status
    }

    fn read(&mut self, buf: &mut [u8]) {
        let state = self.state.borrow();
        buf.copy_from_slice(&state.next_payload[..buf.len()]);
    }

    fn flush_rx(&mut self) {
        self.state.borrow_mut().flushes += 1;
    }

    fn power_up(&mut self) {
        self.trace.borrow_mut().push("radio.power_up");
    }

    fn power_down(&mut self) {
        self.trace.borrow_mut().push("radio.power_down");
    }
}

// ============================================================================
// Mock Display
// ============================================================================

#[derive(Default)]
pub struct DisplayState {
    pub presents: usize,
    pub sleeps: usize,
    pub wakes: usize,
    pub backlight: Vec<bool>,
    /// (x, y, text) of every draw since construction.
    pub texts: Vec<(u8, u8, String)>,
}

pub struct MockDisplay {
    pub state: Rc<RefCell<DisplayState>>,
    trace: Trace,
}

impl DisplaySurface for MockDisplay {
    fn clear(&mut self) {}

    fn text(&mut self, x: u8, y: u8, text: &str) {
        self.state.borrow_mut().texts.push((x, y, text.to_owned()));
    }

    fn present(&mut self) {
        self.state.borrow_mut().presents += 1;
        self.trace.borrow_mut().push("display.present");
    }

    fn sleep(&mut self) {
        self.state.borrow_mut().sleeps += 1;
        self.trace.borrow_mut().push("display.sleep");
    }

    fn wake(&mut self) {
        self.state.borrow_mut().wakes += 1;
        self.trace.borrow_mut().push("display.wake");
    }

    fn set_backlight(&mut self, on: bool) {
        self.state.borrow_mut().backlight.push(on);
        self.trace
            .borrow_mut()
            .push(if on { "display.backlight_on" } else { "display.backlight_off" });
    }
}

// ============================================================================
// Mock Console
// ============================================================================

#[derive(Default)]
pub struct ConsoleState {
    pub inbox: VecDeque<CommandLine>,
    pub lines: Vec<String>,
}

impl ConsoleState {
    /// Queue a raw console line as if the reader task had tokenized it.
    pub fn type_line(&mut self, line: &str) {
        if let Some(cmd) = tokenize(line) {
            self.inbox.push_back(cmd);
        }
    }
}

pub struct MockConsole {
    pub state: Rc<RefCell<ConsoleState>>,
}

impl Console for MockConsole {
    fn poll_command(&mut self) -> Option<CommandLine> {
        self.state.borrow_mut().inbox.pop_front()
    }

    fn write_line(&mut self, line: &str) {
        self.state.borrow_mut().lines.push(line.to_owned());
    }
}

// ============================================================================
// Mock Clock
// ============================================================================

#[derive(Clone)]
pub struct MockClock {
    pub now: Rc<Cell<u64>>,
}

impl MockClock {
    pub fn advance(&self, ticks: u64) {
        self.now.set(self.now.get() + ticks);
    }
}

impl Clock for MockClock {
    fn now_ticks(&self) -> u64 {
        self.now.get()
    }

    fn ticks_from_secs(&self, secs: u32) -> u64 {
        secs as u64 * TICKS_PER_SEC
    }
}

// ============================================================================
// Mock Board
// ============================================================================

pub struct BoardState {
    pub levels: [bool; 3],
    pub battery: u16,
    pub sleep_count: usize,
    /// Ticks the mock clock jumps while parked, simulating time passing
    /// before the wake interrupt.
    pub wake_advance: u64,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            levels: [false; 3],
            battery: 0,
            sleep_count: 0,
            wake_advance: 0,
        }
    }
}

pub struct MockBoard {
    pub state: Rc<RefCell<BoardState>>,
    clock: MockClock,
    trace: Trace,
}

impl Board for MockBoard {
    fn read_buttons(&mut self) -> [bool; 3] {
        self.state.borrow().levels
    }

    fn read_battery(&mut self) -> u16 {
        self.state.borrow().battery
    }

    fn sleep_until_wake(&mut self) {
        let mut state = self.state.borrow_mut();
        state.sleep_count += 1;
        self.clock.advance(state.wake_advance);
        self.trace.borrow_mut().push("board.sleep");
    }
}

// ============================================================================
// Harness
// ============================================================================

pub type TestNode = Node<'static, MockRadio, MockDisplay, MockConsole, MockClock, MockBoard>;

/// Handles into the mocks backing a `TestNode`.
pub struct Handles {
    pub radio: Rc<RefCell<RadioState>>,
    pub display: Rc<RefCell<DisplayState>>,
    pub console: Rc<RefCell<ConsoleState>>,
    pub board: Rc<RefCell<BoardState>>,
    pub clock: MockClock,
    pub trace: Trace,
    pub latches: &'static Latches,
}

impl Handles {
    /// Queue a packet and raise the radio-ready latch, as the IRQ path
    /// would.
    pub fn deliver_packet(&self, payload: [u8; PAYLOAD_SIZE]) {
        {
            let mut radio = self.radio.borrow_mut();
            radio.next_status = IrqStatus {
                rx_ok: true,
                ..IrqStatus::default()
            };
            radio.next_payload = payload;
        }
        self.latches.radio_ready.raise();
    }

    pub fn type_line(&self, line: &str) {
        self.console.borrow_mut().type_line(line);
    }

    pub fn presents(&self) -> usize {
        self.display.borrow().presents
    }

    pub fn trace_log(&self) -> Vec<&'static str> {
        self.trace.borrow().clone()
    }

    pub fn clear_trace(&self) {
        self.trace.borrow_mut().clear();
    }
}

/// Build a node around fresh mocks. Latches are leaked: each test gets
/// its own set and tests are short-lived processes.
pub fn harness() -> (TestNode, Handles) {
    let latches: &'static Latches = Box::leak(Box::new(Latches::new()));
    let trace: Trace = Rc::new(RefCell::new(Vec::new()));

    let radio_state = Rc::new(RefCell::new(RadioState::default()));
    let display_state = Rc::new(RefCell::new(DisplayState::default()));
    let console_state = Rc::new(RefCell::new(ConsoleState::default()));
    let board_state = Rc::new(RefCell::new(BoardState::default()));
    let clock = MockClock {
        now: Rc::new(Cell::new(0)),
    };

    let node = Node::new(
        latches,
        MockRadio {
            state: radio_state.clone(),
            trace: trace.clone(),
        },
        MockDisplay {
            state: display_state.clone(),
            trace: trace.clone(),
        },
        MockConsole {
            state: console_state.clone(),
        },
        clock.clone(),
        MockBoard {
            state: board_state.clone(),
            clock: clock.clone(),
            trace: trace.clone(),
        },
    );

    let handles = Handles {
        radio: radio_state,
        display: display_state,
        console: console_state,
        board: board_state,
        clock,
        trace,
        latches,
    };

    (node, handles)
}
