//! Minimal nRF24L01+ shim over blocking SPI.
//!
//! Only the slice of the chip the node uses: fixed-size payloads on one
//! reading pipe, channel hopping, IRQ status, and power control. SPI
//! faults are logged and otherwise degrade to no-ops - the link layer
//! retries by itself and the node has no other recovery path.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::config::{PAYLOAD_SIZE, PIPE_RX, PIPE_TX, RADIO_RETRIES};
use crate::error::Error;
use crate::hal::{IrqStatus, Transceiver};

// Commands
const W_REGISTER: u8 = 0x20;
const R_RX_PAYLOAD: u8 = 0x61;
const FLUSH_TX: u8 = 0xE1;
const FLUSH_RX: u8 = 0xE2;
const NOP: u8 = 0xFF;

// Registers
const REG_CONFIG: u8 = 0x00;
const REG_EN_RXADDR: u8 = 0x02;
const REG_SETUP_RETR: u8 = 0x04;
const REG_RF_CH: u8 = 0x05;
const REG_RF_SETUP: u8 = 0x06;
const REG_STATUS: u8 = 0x07;
const REG_RX_ADDR_P1: u8 = 0x0B;
const REG_TX_ADDR: u8 = 0x10;
const REG_RX_PW_P1: u8 = 0x12;

// CONFIG bits
const CFG_EN_CRC: u8 = 1 << 3;
const CFG_PWR_UP: u8 = 1 << 1;
const CFG_PRIM_RX: u8 = 1 << 0;

// STATUS bits
const ST_RX_DR: u8 = 1 << 6;
const ST_TX_DS: u8 = 1 << 5;
const ST_MAX_RT: u8 = 1 << 4;

// RF_SETUP: 0 dBm output, 1 Mbps
const RF_SETUP_PA_HIGH: u8 = 0b0000_0110;

fn degrade(result: Result<(), Error>) {
    if let Err(e) = result {
        defmt::warn!("radio: {:?}", e);
    }
}

pub struct Nrf24<SPI, CSN, CE> {
    spi: SPI,
    csn: CSN,
    ce: CE,
    config: u8,
}

impl<SPI, CSN, CE> Nrf24<SPI, CSN, CE>
where
    SPI: SpiBus,
    CSN: OutputPin,
    CE: OutputPin,
{
    pub fn new(spi: SPI, csn: CSN, ce: CE) -> Self {
        Self {
            spi,
            csn,
            ce,
            config: CFG_EN_CRC,
        }
    }

    /// One-time bring-up: retries, PA level, payload size, pipe
    /// addresses, clean FIFOs, powered up in standby.
    pub fn begin(&mut self) {
        let (delay, count) = RADIO_RETRIES;
        self.write_register(REG_SETUP_RETR, (delay << 4) | (count & 0x0F));
        self.write_register(REG_RF_SETUP, RF_SETUP_PA_HIGH);
        self.write_register(REG_RX_PW_P1, PAYLOAD_SIZE as u8);
        self.write_register(REG_EN_RXADDR, 0b0000_0010); // pipe 1 only
        self.write_address(REG_TX_ADDR, PIPE_TX);
        self.write_address(REG_RX_ADDR_P1, PIPE_RX);
        self.command(FLUSH_RX);
        self.command(FLUSH_TX);
        self.write_register(REG_STATUS, ST_RX_DR | ST_TX_DS | ST_MAX_RT);
        self.power_up();
    }

    fn transfer(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        let _ = self.csn.set_low();
        let result = self.spi.transfer_in_place(buf).map_err(|_| Error::Radio);
        let _ = self.csn.set_high();
        result
    }

    fn command(&mut self, op: u8) {
        let mut buf = [op];
        let result = self.transfer(&mut buf);
        degrade(result);
    }

    fn write_register(&mut self, reg: u8, value: u8) {
        let mut buf = [W_REGISTER | reg, value];
        let result = self.transfer(&mut buf);
        degrade(result);
    }

    fn write_address(&mut self, reg: u8, addr: u64) {
        let mut buf = [0u8; 6];
        buf[0] = W_REGISTER | reg;
        buf[1..6].copy_from_slice(&addr.to_le_bytes()[..5]);
        let result = self.transfer(&mut buf);
        degrade(result);
    }

    fn read_status(&mut self) -> u8 {
        let mut buf = [NOP];
        let result = self.transfer(&mut buf);
        degrade(result);
        buf[0]
    }
}

impl<SPI, CSN, CE> Transceiver for Nrf24<SPI, CSN, CE>
where
    SPI: SpiBus,
    CSN: OutputPin,
    CE: OutputPin,
{
    fn set_channel(&mut self, ch: u8) {
        self.write_register(REG_RF_CH, ch & 0x7F);
    }

    fn start_listening(&mut self) {
        self.config |= CFG_PRIM_RX;
        self.write_register(REG_CONFIG, self.config);
        let _ = self.ce.set_high();
    }

    fn stop_listening(&mut self) {
        let _ = self.ce.set_low();
        self.config &= !CFG_PRIM_RX;
        self.write_register(REG_CONFIG, self.config);
    }

    fn irq_status(&mut self) -> IrqStatus {
        let status = self.read_status();
        // Write-1-to-clear so the IRQ line releases.
        self.write_register(REG_STATUS, status & (ST_RX_DR | ST_TX_DS | ST_MAX_RT));
        IrqStatus {
            tx_ok: status & ST_TX_DS != 0,
            tx_fail: status & ST_MAX_RT != 0,
            rx_ok: status & ST_RX_DR != 0,
        }
    }

    fn read(&mut self, buf: &mut [u8]) {
        let mut frame = [0u8; PAYLOAD_SIZE + 1];
        frame[0] = R_RX_PAYLOAD;
        let result = self.transfer(&mut frame);
        degrade(result);
        let n = buf.len().min(PAYLOAD_SIZE);
        buf[..n].copy_from_slice(&frame[1..=n]);
    }

    fn flush_rx(&mut self) {
        self.command(FLUSH_RX);
    }

    fn power_up(&mut self) {
        self.config |= CFG_PWR_UP;
        self.write_register(REG_CONFIG, self.config);
    }

    fn power_down(&mut self) {
        let _ = self.ce.set_low();
        self.config &= !CFG_PWR_UP;
        self.write_register(REG_CONFIG, self.config);
    }
}
