//! UARTE console: an async reader task tokenizes lines into a bounded
//! queue; the control loop polls the queue through the `Console` trait.

use embassy_futures::block_on;
use embassy_nrf::peripherals::UARTE0;
use embassy_nrf::uarte::{UarteRx, UarteTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::command::{tokenize, CommandLine};
use crate::config::COMMAND_QUEUE_DEPTH;
use crate::hal::Console;
use crate::latch::Latches;

/// Longest accepted console line; anything longer is dropped whole.
const LINE_LEN: usize = 64;

/// Parsed commands travelling from the reader task to the control loop.
pub type CommandQueue = Channel<CriticalSectionRawMutex, CommandLine, COMMAND_QUEUE_DEPTH>;

/// Reader half: accumulate bytes, tokenize on end-of-line, enqueue.
///
/// Runs as its own task so byte handling never blocks the control loop;
/// its only shared state is the queue and the serial-ready latch.
#[embassy_executor::task]
pub async fn serial_reader_task(
    mut rx: UarteRx<'static, UARTE0>,
    queue: &'static CommandQueue,
    latches: &'static Latches,
) -> ! {
    let mut line: heapless::String<LINE_LEN> = heapless::String::new();
    let mut overflow = false;

    loop {
        let mut byte = [0u8; 1];
        if rx.read(&mut byte).await.is_err() {
            defmt::warn!("console: {:?}", crate::error::Error::Serial);
            continue;
        }
        latches.serial_ready.raise();

        match byte[0] {
            b'\r' | b'\n' => {
                if !overflow {
                    if let Some(cmd) = tokenize(line.as_str()) {
                        // Queue full means the loop is behind; drop the
                        // oldest-pending behavior is not needed, drop new.
                        let _ = queue.try_send(cmd);
                    }
                }
                line.clear();
                overflow = false;
            }
            b => {
                if line.push(b as char).is_err() {
                    overflow = true;
                }
            }
        }
    }
}

/// Writer half plus queue front, owned by the control loop.
pub struct UarteConsole {
    tx: UarteTx<'static, UARTE0>,
    queue: &'static CommandQueue,
}

impl UarteConsole {
    pub fn new(tx: UarteTx<'static, UARTE0>, queue: &'static CommandQueue) -> Self {
        Self { tx, queue }
    }
}

impl Console for UarteConsole {
    fn poll_command(&mut self) -> Option<CommandLine> {
        self.queue.try_receive().ok()
    }

    fn write_line(&mut self, line: &str) {
        // UARTE writes are short and the console is a debug surface;
        // blocking here keeps the trait synchronous.
        let _ = block_on(self.tx.write(line.as_bytes()));
        let _ = block_on(self.tx.write(b"\r\n"));
    }
}
