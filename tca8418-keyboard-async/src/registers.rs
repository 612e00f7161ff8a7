//! TCA8418 register map and the register-level protocol.

use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::event::KeyEvent;

/// Default I2C address of the TCA8418.
pub const DEFAULT_ADDRESS: u8 = 0x34;

// --- Register Addresses ---
/// Configuration register.
pub const REG_CFG: u8 = 0x01;
/// Interrupt status register.
pub const REG_INT_STAT: u8 = 0x02;
/// Key lock and event counter register.
pub const REG_KEY_LCK_EC: u8 = 0x03;
/// Head of the key event FIFO.
pub const REG_KEY_EVENT_A: u8 = 0x04;
/// Keypad or GPIO selection for ROW7:0.
pub const REG_KP_GPIO1: u8 = 0x1D;
/// Keypad or GPIO selection for COL7:0.
pub const REG_KP_GPIO2: u8 = 0x1E;
/// Keypad or GPIO selection for COL9:8.
pub const REG_KP_GPIO3: u8 = 0x1F;

// --- CFG bits ---
const CFG_AI: u8 = 0b1000_0000;
const CFG_INT_CFG: u8 = 0b0001_0000;
const CFG_KE_IEN: u8 = 0b0000_0001;

/// Auto-increment, interrupt re-assert and key event interrupt enable.
pub const CFG_ARMED: u8 = CFG_AI | CFG_INT_CFG | CFG_KE_IEN;

// --- Bitmasks for INT_STAT ---
const INT_STAT_K_INT: u8 = 0b0000_0001;
const INT_STAT_GPI_INT: u8 = 0b0000_0010;
const INT_STAT_K_LCK_INT: u8 = 0b0000_0100;
const INT_STAT_OVR_FLOW_INT: u8 = 0b0000_1000;
const INT_STAT_CAD_INT: u8 = 0b0001_0000;

/// Value written to INT_STAT to acknowledge a key event interrupt.
pub const INT_STAT_CLEAR: u8 = INT_STAT_K_INT;

// --- Bitmasks for KEY_LCK_EC ---
const KEY_EVENT_COUNT_MASK: u8 = 0b0000_1111;

const MAX_ROWS: u8 = 8;
const MAX_COLUMNS: u8 = 10;

/// The rows and columns of the chip that are wired to the key matrix.
///
/// Rows and columns are used from index 0 upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixGeometry {
    rows: u8,
    columns: u8,
}

impl MatrixGeometry {
    /// The full 8x10 matrix.
    pub const FULL: Self = Self {
        rows: MAX_ROWS,
        columns: MAX_COLUMNS,
    };

    /// Creates a geometry of `rows` x `columns`.
    ///
    /// Returns `None` unless `1 <= rows <= 8` and `1 <= columns <= 10`.
    pub const fn new(rows: u8, columns: u8) -> Option<Self> {
        if rows == 0 || rows > MAX_ROWS || columns == 0 || columns > MAX_COLUMNS {
            return None;
        }
        Some(Self { rows, columns })
    }

    /// Number of matrix rows.
    pub const fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of matrix columns.
    pub const fn columns(&self) -> u8 {
        self.columns
    }

    /// Value for KP_GPIO1.
    pub const fn row_mask(&self) -> u8 {
        low_bits(self.rows)
    }

    /// Value for KP_GPIO2.
    pub const fn column_low_mask(&self) -> u8 {
        low_bits(if self.columns > 8 { 8 } else { self.columns })
    }

    /// Value for KP_GPIO3.
    pub const fn column_high_mask(&self) -> u8 {
        low_bits(self.columns.saturating_sub(8))
    }
}

impl Default for MatrixGeometry {
    fn default() -> Self {
        Self::FULL
    }
}

const fn low_bits(count: u8) -> u8 {
    ((1u16 << count) - 1) as u8
}

/// The interrupt flags reported by INT_STAT.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct InterruptStatus {
    inner: u8,
}

impl From<u8> for InterruptStatus {
    fn from(status: u8) -> Self {
        Self { inner: status }
    }
}

impl core::fmt::Debug for InterruptStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InterruptStatus")
            .field("key_event", &self.key_event())
            .field("gpi", &self.gpi())
            .field("key_lock", &self.key_lock())
            .field("overflow", &self.overflow())
            .field("ctrl_alt_del", &self.ctrl_alt_del())
            .finish()
    }
}

impl InterruptStatus {
    /// A key event is waiting in the FIFO.
    pub fn key_event(self) -> bool {
        (self.inner & INT_STAT_K_INT) > 0
    }

    /// A GPI input changed.
    pub fn gpi(self) -> bool {
        (self.inner & INT_STAT_GPI_INT) > 0
    }

    /// The keypad lock was engaged or released.
    pub fn key_lock(self) -> bool {
        (self.inner & INT_STAT_K_LCK_INT) > 0
    }

    /// The FIFO overflowed and events were lost.
    pub fn overflow(self) -> bool {
        (self.inner & INT_STAT_OVR_FLOW_INT) > 0
    }

    /// The CTRL-ALT-DEL sequence was detected.
    pub fn ctrl_alt_del(self) -> bool {
        (self.inner & INT_STAT_CAD_INT) > 0
    }
}

/// Register access to one TCA8418 on an I2C bus.
pub struct Registers<I2C> {
    i2c: I2C,
    address: SevenBitAddress,
}

impl<I2C> Registers<I2C> {
    /// Creates register access for the chip at `address`.
    pub fn new(i2c: I2C, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    /// Gives the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// The I2C address in use.
    pub fn address(&self) -> SevenBitAddress {
        self.address
    }
}

impl<I2C, E> Registers<I2C>
where
    I2C: I2c<SevenBitAddress, Error = E>,
    E: embedded_hal_async::i2c::Error,
{
    /// Writes one byte to a register.
    pub async fn write(&mut self, register: u8, value: u8) -> Result<(), E> {
        log::trace!("tca8418 write {register:#04x} <- {value:#04x}");
        self.i2c
            .write(self.address, &[register, value])
            .await
            .inspect_err(|err| log::warn!("Error writing register {register:#04x}: {err:?}"))
    }

    /// Reads one byte from a register.
    pub async fn read(&mut self, register: u8) -> Result<u8, E> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .await
            .inspect_err(|err| log::warn!("Error reading register {register:#04x}: {err:?}"))?;
        log::trace!("tca8418 read {register:#04x} -> {:#04x}", buf[0]);
        Ok(buf[0])
    }

    /// Puts the rows and columns of `geometry` into keypad mode and enables key
    /// event interrupts with auto-increment.
    pub async fn arm(&mut self, geometry: MatrixGeometry) -> Result<(), E> {
        self.write(REG_KP_GPIO1, geometry.row_mask()).await?;
        self.write(REG_KP_GPIO2, geometry.column_low_mask()).await?;
        self.write(REG_KP_GPIO3, geometry.column_high_mask()).await?;
        self.write(REG_CFG, CFG_ARMED).await
    }

    /// Number of events waiting in the FIFO.
    pub async fn pending_count(&mut self) -> Result<u8, E> {
        Ok(self.read(REG_KEY_LCK_EC).await? & KEY_EVENT_COUNT_MASK)
    }

    /// Pops one event from the FIFO.
    ///
    /// Only call this as many times as [`Self::pending_count`] reported; reading an
    /// empty FIFO returns a zero event.
    pub async fn read_event(&mut self) -> Result<KeyEvent, E> {
        Ok(KeyEvent::from(self.read(REG_KEY_EVENT_A).await?))
    }

    /// Acknowledges the key event interrupt so the INT line can fire again.
    pub async fn clear_interrupt(&mut self) -> Result<(), E> {
        self.write(REG_INT_STAT, INT_STAT_CLEAR).await
    }

    /// Reads the interrupt flags.
    pub async fn interrupt_status(&mut self) -> Result<InterruptStatus, E> {
        Ok(InterruptStatus::from(self.read(REG_INT_STAT).await?))
    }
}
