//! The control loop: one context owning every piece of structured state,
//! polled in a fixed phase order.
//!
//! Per pass: drain one serial command, drain the radio-ready latch, poll
//! buttons, evaluate the idle timer, render if dirty. Later phases depend
//! on dirty/action state produced by earlier ones, so the order is part of
//! the contract. Interrupt sources hand events over exclusively through
//! [`Latches`]; everything else has exactly one writer - this loop.

use core::fmt::Write;

use heapless::String;

use crate::channel::{ChannelController, ReceiveCounters};
use crate::command::{dispatch_button, dispatch_command, Action, ChannelRequest, CommandLine};
use crate::config::{BODY_ROW, DEFAULT_CHANNEL, IDLE_TIMEOUT_SECS, PAYLOAD_SIZE};
use crate::hal::{Board, Clock, Console, DisplaySurface, Transceiver};
use crate::idle::IdleTimer;
use crate::latch::Latches;
use crate::ui::buttons::ButtonTracker;
use crate::ui::frame::{build_frame, DisplayGate};
use crate::ui::UiState;

/// The receiver node's control context.
pub struct Node<'a, R, D, C, K, B> {
    latches: &'a Latches,
    radio: R,
    display: D,
    console: C,
    clock: K,
    board: B,

    channel: ChannelController,
    counters: ReceiveCounters,
    payload: [u8; PAYLOAD_SIZE],
    ui: UiState,
    tracker: ButtonTracker,
    idle: IdleTimer,
    gate: DisplayGate,
    battery: u16,
    backlight: bool,
}

impl<'a, R, D, C, K, B> Node<'a, R, D, C, K, B>
where
    R: Transceiver,
    D: DisplaySurface,
    C: Console,
    K: Clock,
    B: Board,
{
    /// Build the context around already-initialized capabilities. The
    /// first pass renders unconditionally.
    pub fn new(latches: &'a Latches, radio: R, display: D, console: C, clock: K, board: B) -> Self {
        let timeout = clock.ticks_from_secs(IDLE_TIMEOUT_SECS);
        let idle = IdleTimer::new(timeout, clock.now_ticks());

        let mut gate = DisplayGate::new();
        gate.mark();

        Self {
            latches,
            radio,
            display,
            console,
            clock,
            board,
            channel: ChannelController::new(DEFAULT_CHANNEL),
            counters: ReceiveCounters::default(),
            payload: [0; PAYLOAD_SIZE],
            ui: UiState::default(),
            tracker: ButtonTracker::new(),
            idle,
            gate,
            battery: 0,
            backlight: false,
        }
    }

    /// One cooperative pass over every event source.
    pub fn poll_once(&mut self) {
        self.drain_serial();
        self.drain_radio();
        self.poll_buttons();
        self.evaluate_idle();
        self.render();
    }

    // - Phase 1: serial ------------------------------------------

    fn drain_serial(&mut self) {
        // The byte-level latch is a wake hint; the parsed queue is the
        // real source, so poll it even when no new bytes arrived.
        self.latches.serial_ready.take();

        let Some(line) = self.console.poll_command() else {
            return;
        };
        self.idle.reset(self.clock.now_ticks());

        if line.cmd.as_str() == "test" {
            self.echo_args(&line);
            return;
        }

        let action = dispatch_command(&line, &self.ui);
        if matches!(action, Action::ChangeChannel(ChannelRequest::Absolute(_))) {
            self.console.write_line("set channel");
        }
        self.apply(action);
    }

    fn echo_args(&mut self, line: &CommandLine) {
        for (i, arg) in line.args.iter().enumerate() {
            let mut out: String<40> = String::new();
            let _ = write!(out, " ARG[{}]=[{}]", i, arg);
            self.console.write_line(&out);
        }
    }

    // - Phase 2: radio -------------------------------------------

    fn drain_radio(&mut self) {
        if !self.latches.radio_ready.take() {
            return;
        }

        let status = self.radio.irq_status();
        if !status.rx_ok {
            // Nothing to recover: the next IRQ produces a fresh attempt.
            self.console.write_line("RX is not ok");
            return;
        }

        self.radio.read(&mut self.payload);
        self.radio.flush_rx();
        self.echo_payload();

        self.counters.record();
        self.idle.reset(self.clock.now_ticks());
        self.gate.mark();
    }

    fn echo_payload(&mut self) {
        let mut out: String<64> = String::new();
        let _ = out.push_str("DATA");
        for b in &self.payload {
            let _ = write!(out, ",{}", b);
        }
        let _ = out.push_str(",DATA");
        self.console.write_line(&out);
    }

    // - Phase 3: buttons -----------------------------------------

    fn poll_buttons(&mut self) {
        // Edge latches only wake the sleeper; levels carry the state.
        for latch in &self.latches.button_edge {
            latch.take();
        }

        let levels = self.board.read_buttons();
        let scan = self.tracker.poll(levels);

        for button in scan.pressed {
            let action = dispatch_button(button, &self.ui);
            self.apply(action);
        }

        // Holding any button keeps the node awake even without an edge.
        if scan.any_held {
            self.idle.reset(self.clock.now_ticks());
        }
    }

    // - Phase 4: idle --------------------------------------------

    fn evaluate_idle(&mut self) {
        if !self.idle.due(self.clock.now_ticks()) {
            return;
        }

        self.console.write_line("sleep");
        self.radio.power_down();
        self.display.set_backlight(false);
        self.display.sleep();

        // Suspends the whole loop until a wake-capable interrupt fires.
        self.board.sleep_until_wake();

        self.console.write_line("wake");
        self.radio.power_up();
        self.display.wake();
        if self.backlight {
            self.display.set_backlight(true);
        }
        self.gate.mark();
        self.idle.reset(self.clock.now_ticks());
    }

    // - Phase 5: render ------------------------------------------

    fn render(&mut self) {
        let battery = self.board.read_battery();
        if battery != self.battery {
            self.battery = battery;
            self.gate.mark();
        }

        if !self.gate.take() {
            return;
        }

        let frame = build_frame(
            self.channel.current(),
            self.battery,
            &self.counters,
            &self.payload,
            &self.ui,
        );
        self.display.clear();
        self.display.text(0, 0, &frame.header);
        if !frame.body.is_empty() {
            self.display.text(0, BODY_ROW, &frame.body);
        }
        self.display.present();
    }

    // - Actions --------------------------------------------------

    /// Execute one dispatched action against the owned state.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::ChangeChannel(req) => {
                let requested = match req {
                    ChannelRequest::Absolute(n) => n,
                    // The dial wraps through u8 space; normalize() turns
                    // 126 into 0 and the 0 - 1 underflow into 125.
                    ChannelRequest::Up => self.channel.current().wrapping_add(1),
                    ChannelRequest::Down => self.channel.current().wrapping_sub(1),
                };
                if self
                    .channel
                    .reconfigure(&mut self.radio, &mut self.counters, requested)
                {
                    self.gate.mark();
                }
            }
            Action::ToggleMenu => {
                // Confirming an entry runs its sub-action before the
                // overlay closes; opening the menu runs nothing.
                if self.ui.menu_visible {
                    if let Some(sub) = self.ui.selected.bound_action() {
                        self.apply(sub);
                    }
                }
                self.ui.menu_visible = !self.ui.menu_visible;
                self.gate.mark();
            }
            Action::MenuNext => {
                self.ui.selected = self.ui.selected.next();
                self.gate.mark();
            }
            Action::MenuPrev => {
                self.ui.selected = self.ui.selected.prev();
                self.gate.mark();
            }
            Action::ChangeDisplayMode => {
                self.ui.display_mode = self.ui.display_mode.toggled();
                self.gate.mark();
            }
            Action::ToggleBacklight => {
                self.backlight = !self.backlight;
                self.display.set_backlight(self.backlight);
            }
            Action::SendData => self.send_data(),
            Action::Noop => {}
        }
    }

    fn send_data(&mut self) {
        // Transmit path is not wired up; the menu entry is a placeholder.
    }

    // - Read-only views (used by the test suite) -----------------

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn channel(&self) -> u8 {
        self.channel.current()
    }

    pub fn counters(&self) -> &ReceiveCounters {
        &self.counters
    }

    pub fn payload(&self) -> &[u8; PAYLOAD_SIZE] {
        &self.payload
    }

    pub fn idle_deadline(&self) -> u64 {
        self.idle.deadline_ticks()
    }

    pub fn backlight_enabled(&self) -> bool {
        self.backlight
    }

    pub fn is_dirty(&self) -> bool {
        self.gate.is_dirty()
    }
}
