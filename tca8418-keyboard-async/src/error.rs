//! Error types for the keyboard driver.

use embedded_hal::digital::ErrorKind as PinErrorKind;

/// The error type of [`crate::keyboard::KeyboardController`], generic over the I2C
/// bus error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// An I2C transfer failed. The current drain pass was abandoned.
    Bus(E),
    /// The interrupt or reset pin reported an error.
    Pin(PinErrorKind),
    /// `init` was called on a controller that is already armed.
    AlreadyInitialized,
    /// Events were requested before `init`.
    NotInitialized,
    /// Too many drain passes failed in a row; the chip is considered gone until
    /// the controller is reset and initialized again.
    DeviceUnavailable,
}

impl<E> Error<E> {
    /// `true` if the error may go away on the next interrupt or tick.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Bus(_))
    }
}

pub(crate) fn pin_error<P: embedded_hal::digital::Error>(err: P) -> PinErrorKind {
    err.kind()
}
