//! In-memory stand-ins for the TCA8418, its pins and a delay provider.

#![allow(dead_code)]

use std::cell::{RefCell, RefMut};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType as PinErrorType, InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};
use tca8418_keyboard_async::registers::{
    DEFAULT_ADDRESS, REG_INT_STAT, REG_KEY_EVENT_A, REG_KEY_LCK_EC,
};

/// Bus error raised by [`FakeKeypad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

impl embedded_hal_async::i2c::Error for BusFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One register access seen on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Write(u8, u8),
    Read(u8),
}

/// Register file, FIFO and transaction log of a simulated TCA8418.
#[derive(Debug, Default)]
pub struct Chip {
    pub fifo: VecDeque<u8>,
    /// Extra bits reported in KEY_LCK_EC next to the event count.
    pub lock_bits: u8,
    pub int_stat: u8,
    pub log: Vec<Access>,
    /// Fail the n-th FIFO read (0-based, counted over the lifetime of the chip).
    pub fail_event_read: Option<usize>,
    /// Fail every transfer while set.
    pub offline: bool,
    event_reads: usize,
    register: u8,
}

impl Chip {
    pub fn queue(&mut self, events: &[u8]) {
        self.fifo.extend(events.iter().copied());
        if !self.fifo.is_empty() {
            self.int_stat |= 0x01;
        }
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.log
            .iter()
            .filter_map(|access| match access {
                Access::Write(register, value) => Some((*register, *value)),
                Access::Read(_) => None,
            })
            .collect()
    }

    pub fn reads_of(&self, register: u8) -> usize {
        self.log
            .iter()
            .filter(|access| **access == Access::Read(register))
            .count()
    }

    pub fn clears(&self) -> usize {
        self.writes()
            .iter()
            .filter(|(register, _)| *register == REG_INT_STAT)
            .count()
    }

    fn write_register(&mut self, register: u8, value: u8) {
        self.log.push(Access::Write(register, value));
        if register == REG_INT_STAT {
            self.int_stat &= !value;
        }
    }

    fn read_register(&mut self, register: u8) -> Result<u8, BusFault> {
        if register == REG_KEY_EVENT_A {
            let index = self.event_reads;
            self.event_reads += 1;
            if self.fail_event_read == Some(index) {
                return Err(BusFault);
            }
        }
        self.log.push(Access::Read(register));
        Ok(match register {
            REG_KEY_LCK_EC => self.lock_bits | self.fifo.len() as u8,
            REG_KEY_EVENT_A => self.fifo.pop_front().unwrap_or(0),
            REG_INT_STAT => self.int_stat,
            _ => 0,
        })
    }

    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), BusFault> {
        if self.offline || address != DEFAULT_ADDRESS {
            return Err(BusFault);
        }
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    if let Some((register, values)) = bytes.split_first() {
                        self.register = *register;
                        for value in values {
                            self.write_register(self.register, *value);
                        }
                    }
                }
                Operation::Read(buffer) => {
                    for byte in buffer.iter_mut() {
                        *byte = self.read_register(self.register)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Bus handle to a shared [`Chip`]; clones talk to the same chip.
#[derive(Debug, Clone, Default)]
pub struct FakeKeypad {
    chip: Rc<RefCell<Chip>>,
}

impl FakeKeypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chip with `events` already queued.
    pub fn with_events(events: &[u8]) -> Self {
        let keypad = Self::new();
        keypad.chip().queue(events);
        keypad
    }

    pub fn chip(&self) -> RefMut<'_, Chip> {
        self.chip.borrow_mut()
    }
}

impl ErrorType for FakeKeypad {
    type Error = BusFault;
}

impl I2c<SevenBitAddress> for FakeKeypad {
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.chip().transaction(address, operations)
    }
}

/// The INT line of the chip.
#[derive(Debug, Default)]
pub struct FakeIrq {
    pub low: bool,
    pub edges_awaited: usize,
}

impl FakeIrq {
    pub fn asserted() -> Self {
        Self {
            low: true,
            edges_awaited: 0,
        }
    }
}

impl PinErrorType for FakeIrq {
    type Error = Infallible;
}

impl InputPin for FakeIrq {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.low)
    }
}

impl Wait for FakeIrq {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        self.low = false;
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        self.low = true;
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        self.low = false;
        Ok(())
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        self.edges_awaited += 1;
        self.low = true;
        Ok(())
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        self.low = !self.low;
        Ok(())
    }
}

/// The RESET line of the chip, recording every level driven.
#[derive(Debug, Default)]
pub struct FakeReset {
    pub levels: Vec<bool>,
}

impl PinErrorType for FakeReset {
    type Error = Infallible;
}

impl OutputPin for FakeReset {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.push(true);
        Ok(())
    }
}

/// A delay that only adds up the time requested.
#[derive(Debug, Default)]
pub struct NoDelay {
    pub total_ns: u64,
}

impl DelayNs for NoDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
