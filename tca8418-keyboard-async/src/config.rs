//! Configuration of the keyboard controller.

use embedded_hal_async::i2c::SevenBitAddress;

use crate::registers::{MatrixGeometry, DEFAULT_ADDRESS};
use crate::remap::KeyRemap;

/// Number of consecutive failed drain passes before the chip is reported as
/// unavailable.
pub const DEFAULT_FAULT_THRESHOLD: u8 = 3;

/// Configuration for the [`crate::keyboard::KeyboardController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardConfig {
    /// I2C address of the TCA8418.
    pub address: SevenBitAddress,
    /// Rows and columns wired to the key matrix.
    pub geometry: MatrixGeometry,
    /// Consecutive failed drain passes tolerated before giving up. `0` is treated as `1`.
    pub fault_threshold: u8,
    /// Key to button translation.
    pub remap: KeyRemap,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            geometry: MatrixGeometry::FULL,
            fault_threshold: DEFAULT_FAULT_THRESHOLD,
            remap: KeyRemap::STANDARD,
        }
    }
}

impl KeyboardConfig {
    /// Sets the I2C address.
    pub fn with_address(mut self, address: SevenBitAddress) -> Self {
        self.address = address;
        self
    }

    /// Sets the matrix geometry.
    pub fn with_geometry(mut self, geometry: MatrixGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Sets the number of consecutive failures tolerated.
    pub fn with_fault_threshold(mut self, fault_threshold: u8) -> Self {
        self.fault_threshold = fault_threshold;
        self
    }

    /// Sets the key remap.
    pub fn with_remap(mut self, remap: KeyRemap) -> Self {
        self.remap = remap;
        self
    }
}
