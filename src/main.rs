//! Embedded entry point: nRF52840 + nRF24L01+ + SSD1306 + UARTE console.
//!
//! Wiring follows the two-tier model of the core: interrupt-adjacent
//! tasks do nothing but raise latches or enqueue one parsed command; the
//! control task runs `Node::poll_once` on a short ticker and owns every
//! piece of structured state.

#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::saadc::{ChannelConfig, Config as SaadcConfig, Saadc};
use embassy_nrf::{bind_interrupts, peripherals, saadc, spim, twim, uarte};
use embassy_time::{Duration, Timer};
use panic_probe as _;
use static_cell::StaticCell;

use rxnode::config::{DEFAULT_CHANNEL, LOOP_PERIOD_MS};
use rxnode::control::Node;
use rxnode::hal::Transceiver;
use rxnode::hw::board::NodeBoard;
use rxnode::hw::display::Oled;
use rxnode::hw::nrf24::Nrf24;
use rxnode::hw::serial::{serial_reader_task, CommandQueue, UarteConsole};
use rxnode::hw::MonotonicClock;
use rxnode::latch::Latches;

bind_interrupts!(struct Irqs {
    UARTE0_UART0 => uarte::InterruptHandler<peripherals::UARTE0>;
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SAADC => saadc::InterruptHandler;
});

/// The only state interrupt-adjacent tasks may touch.
static LATCHES: Latches = Latches::new();

static COMMANDS: StaticCell<CommandQueue> = StaticCell::new();

/// Radio IRQ line is active-low: one falling edge per transceiver event.
#[embassy_executor::task]
async fn radio_irq_task(mut irq: Input<'static>, latches: &'static Latches) -> ! {
    loop {
        irq.wait_for_falling_edge().await;
        latches.radio_ready.raise();
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());

    info!("rxnode start");

    // Radio: SPI3 + CSN/CE, IRQ on P0.03
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M8;
    let spi = spim::Spim::new(p.SPI3, Irqs, p.P0_13, p.P0_15, p.P0_14, spi_config);
    let csn = Output::new(p.P0_17, Level::High, OutputDrive::Standard);
    let ce = Output::new(p.P0_20, Level::Low, OutputDrive::Standard);
    let radio_irq = Input::new(p.P0_03, Pull::Up);

    let mut radio = Nrf24::new(spi, csn, ce);
    radio.begin();
    radio.set_channel(DEFAULT_CHANNEL);
    radio.start_listening();

    // Display: I2C on TWISPI0
    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let display = Oled::new(i2c);

    // Console: UARTE0, split so the reader runs as its own task
    let uart = uarte::Uarte::new(p.UARTE0, Irqs, p.P0_08, p.P0_06, uarte::Config::default());
    let (tx, rx) = uart.split();
    let commands = COMMANDS.init(CommandQueue::new());
    let console = UarteConsole::new(tx, commands);

    // Buttons (active-low) and battery divider on AIN0
    let buttons = [
        Input::new(p.P0_11, Pull::Up),
        Input::new(p.P0_12, Pull::Up),
        Input::new(p.P0_24, Pull::Up),
    ];
    let adc_channel = ChannelConfig::single_ended(p.P0_02);
    let adc = Saadc::new(p.SAADC, Irqs, SaadcConfig::default(), [adc_channel]);
    let board = NodeBoard::new(buttons, adc, &LATCHES);

    spawner.must_spawn(radio_irq_task(radio_irq, &LATCHES));
    spawner.must_spawn(serial_reader_task(rx, commands, &LATCHES));

    let mut node = Node::new(&LATCHES, radio, display, console, MonotonicClock, board);

    loop {
        node.poll_once();
        Timer::after(Duration::from_millis(LOOP_PERIOD_MS)).await;
    }
}
