//! Core implementation of the TCA8418 keyboard driver.

use core::convert::Infallible;

use embassy_time::{Duration, Timer};
use embedded_hal::digital::{ErrorType as PinErrorType, InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::config::KeyboardConfig;
use crate::error::{pin_error, Error};
use crate::event::{ButtonEvent, EventSink};
use crate::registers::{InterruptStatus, Registers};

const RESET_PULSE_MS: u32 = 1;
const RESET_SETTLE_MS: u32 = 5;
const RETRY_BACKOFF: Duration = Duration::from_millis(10);

/// Lifecycle of a [`KeyboardController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Not armed yet, or reset since.
    Uninitialized,
    /// Armed and producing events.
    Ready,
    /// Too many consecutive drain passes failed.
    Faulted,
}

/// Stand-in for a pin that is not connected.
///
/// As an interrupt pin it never asserts, so only the polling runner is useful
/// with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl PinErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl InputPin for NoPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

impl Wait for NoPin {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        core::future::pending().await
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        core::future::pending().await
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        core::future::pending().await
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        core::future::pending().await
    }
}

/// A controller for the TCA8418 keyboard scanner.
///
/// The controller owns the bus handle, the active-low INT pin, an optional
/// active-low reset pin and the [`EventSink`] that receives button notifications.
/// Pass `&mut` references to keep ownership of the bus or pins elsewhere.
///
/// Every operation takes `&mut self`, so two drain passes can never interleave
/// on the FIFO.
pub struct KeyboardController<I2C, IRQ, S, RST = NoPin> {
    registers: Registers<I2C>,
    irq: IRQ,
    rst: Option<RST>,
    sink: S,
    config: KeyboardConfig,
    state: DriverState,
    failed_drains: u8,
    idle_low_passes: u8,
}

impl<I2C, IRQ, S> KeyboardController<I2C, IRQ, S> {
    /// Creates a new `KeyboardController`.
    ///
    /// # Arguments
    ///
    /// * `i2c` - An I2C peripheral that implements `embedded-hal-async::i2c::I2c`.
    /// * `irq` - The INT pin of the TCA8418, configured as an input with pull-up.
    /// * `sink` - Where button notifications are delivered.
    /// * `config` - Address, matrix geometry, fault threshold and key remap.
    pub fn new(i2c: I2C, irq: IRQ, sink: S, config: KeyboardConfig) -> Self {
        Self {
            registers: Registers::new(i2c, config.address),
            irq,
            rst: None,
            sink,
            config,
            state: DriverState::Uninitialized,
            failed_drains: 0,
            idle_low_passes: 0,
        }
    }

    /// Adds the reset pin of the TCA8418, pulsed by [`KeyboardController::reset`].
    pub fn with_reset<RST>(self, rst: RST) -> KeyboardController<I2C, IRQ, S, RST> {
        KeyboardController {
            registers: self.registers,
            irq: self.irq,
            rst: Some(rst),
            sink: self.sink,
            config: self.config,
            state: self.state,
            failed_drains: self.failed_drains,
            idle_low_passes: self.idle_low_passes,
        }
    }
}

impl<I2C, IRQ, S, RST> KeyboardController<I2C, IRQ, S, RST> {
    /// The current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// `true` once the matrix has been armed.
    pub fn is_armed(&self) -> bool {
        self.state != DriverState::Uninitialized
    }

    /// The configuration in use.
    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    /// The event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The event sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Gives back the bus, the pins and the sink.
    pub fn release(self) -> (I2C, IRQ, Option<RST>, S) {
        (self.registers.release(), self.irq, self.rst, self.sink)
    }
}

impl<I2C, IRQ, S, RST, E> KeyboardController<I2C, IRQ, S, RST>
where
    I2C: I2c<SevenBitAddress, Error = E>,
    E: embedded_hal_async::i2c::Error,
    IRQ: InputPin + Wait,
    RST: OutputPin,
    S: EventSink,
{
    /// Arms the key matrix.
    ///
    /// Declares every configured row and column as part of the matrix, enables the
    /// key event interrupt and flushes any interrupt left over from before
    /// power-up. Fails with [`Error::AlreadyInitialized`], without touching the
    /// bus, unless the controller is uninitialized.
    pub async fn init(&mut self) -> Result<(), Error<E>> {
        if self.state != DriverState::Uninitialized {
            log::warn!("Keyboard controller already initialized.");
            return Err(Error::AlreadyInitialized);
        }

        self.registers
            .arm(self.config.geometry)
            .await
            .map_err(Error::Bus)?;
        self.registers.clear_interrupt().await.map_err(Error::Bus)?;

        self.state = DriverState::Ready;
        self.failed_drains = 0;
        self.idle_low_passes = 0;
        log::debug!(
            "Keyboard controller armed at {:#04x}, {}x{} matrix.",
            self.registers.address(),
            self.config.geometry.rows(),
            self.config.geometry.columns()
        );
        Ok(())
    }

    /// Returns the controller to the uninitialized state.
    ///
    /// If a reset pin was provided the chip is pulsed into its power-on state.
    pub async fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<E>> {
        if let Some(rst) = &mut self.rst {
            rst.set_low().map_err(|err| Error::Pin(pin_error(err)))?;
            delay.delay_ms(RESET_PULSE_MS).await;
            rst.set_high().map_err(|err| Error::Pin(pin_error(err)))?;
            delay.delay_ms(RESET_SETTLE_MS).await;
        }
        self.state = DriverState::Uninitialized;
        self.failed_drains = 0;
        self.idle_low_passes = 0;
        log::debug!("Keyboard controller reset.");
        Ok(())
    }

    /// Reads the interrupt flags of the chip.
    pub async fn interrupt_status(&mut self) -> Result<InterruptStatus, Error<E>> {
        self.registers.interrupt_status().await.map_err(Error::Bus)
    }

    /// Waits until the INT line signals pending events.
    ///
    /// Returns at once if the line is already held low, e.g. because the previous
    /// drain pass was aborted before acknowledging the interrupt.
    pub async fn wait_for_interrupt(&mut self) -> Result<(), Error<E>> {
        if self.irq.is_low().map_err(|err| Error::Pin(pin_error(err)))? {
            return Ok(());
        }
        self.irq
            .wait_for_falling_edge()
            .await
            .map_err(|err| Error::Pin(pin_error(err)))
    }

    /// Reads every pending event, emits one notification per mapped key and
    /// acknowledges the interrupt.
    ///
    /// Returns the number of notifications emitted. A bus error abandons the rest
    /// of the pass; once `fault_threshold` passes in a row have failed the
    /// controller is faulted and reports [`Error::DeviceUnavailable`].
    pub async fn drain(&mut self) -> Result<usize, Error<E>> {
        match self.state {
            DriverState::Uninitialized => return Err(Error::NotInitialized),
            DriverState::Faulted => return Err(Error::DeviceUnavailable),
            DriverState::Ready => {}
        }

        match self.drain_pass().await {
            Ok(emitted) => {
                self.failed_drains = 0;
                Ok(emitted)
            }
            Err(err) => {
                self.failed_drains = self.failed_drains.saturating_add(1);
                if self.failed_drains >= self.config.fault_threshold.max(1) {
                    log::error!(
                        "Keyboard controller failed {} drains in a row, giving up: {err:?}",
                        self.failed_drains
                    );
                    self.state = DriverState::Faulted;
                    return Err(Error::DeviceUnavailable);
                }
                log::warn!("Key event drain aborted: {err:?}");
                Err(Error::Bus(err))
            }
        }
    }

    async fn drain_pass(&mut self) -> Result<usize, E> {
        let pending = self.registers.pending_count().await?;
        let mut emitted = 0;

        for _ in 0..pending {
            let event = self.registers.read_event().await?;
            match self.config.remap.decode(event.scancode) {
                Some(button) => {
                    let notification = ButtonEvent::new(button, event.pressed);
                    log::trace!("Key event {notification:?}");
                    self.sink.emit(notification);
                    emitted += 1;
                }
                None => log::trace!("Ignoring key {} ({:#04x})", event.key(), event.scancode),
            }
        }

        self.registers.clear_interrupt().await?;
        Ok(emitted)
    }

    /// Handles one interrupt: waits for the INT line, then drains the FIFO.
    pub async fn service(&mut self) -> Result<usize, Error<E>> {
        self.wait_for_interrupt().await?;
        self.drain().await
    }

    /// One polling tick. Does nothing until the controller is armed.
    pub async fn tick(&mut self) -> Result<usize, Error<E>> {
        if !self.is_armed() {
            return Ok(0);
        }
        self.drain().await
    }

    /// Services interrupts until a non-transient error occurs.
    ///
    /// Bus errors are retried on the next interrupt. Repeated failures end in
    /// [`Error::DeviceUnavailable`], which is returned. So does an INT line that
    /// stays low while the FIFO is empty for `fault_threshold` passes in a row.
    pub async fn run(&mut self) -> Error<E> {
        loop {
            match self.service().await {
                Ok(0) => {
                    if let Err(err) = self.check_idle_line().await {
                        return err;
                    }
                }
                Ok(_) => self.idle_low_passes = 0,
                Err(err) if err.is_transient() => Timer::after(RETRY_BACKOFF).await,
                Err(err) => return err,
            }
        }
    }

    /// Backs off when the INT line is still asserted after a pass found nothing.
    async fn check_idle_line(&mut self) -> Result<(), Error<E>> {
        if !self.irq.is_low().map_err(|err| Error::Pin(pin_error(err)))? {
            self.idle_low_passes = 0;
            return Ok(());
        }

        self.idle_low_passes = self.idle_low_passes.saturating_add(1);
        if self.idle_low_passes >= self.config.fault_threshold.max(1) {
            log::error!(
                "Keyboard INT line held low over {} empty drains, giving up.",
                self.idle_low_passes
            );
            self.state = DriverState::Faulted;
            return Err(Error::DeviceUnavailable);
        }
        log::warn!("Keyboard INT line still low with an empty FIFO.");
        Timer::after(RETRY_BACKOFF).await;
        Ok(())
    }

    /// Drains the FIFO every `period` instead of waiting for the INT line.
    pub async fn run_polling(&mut self, period: Duration) -> Error<E> {
        loop {
            Timer::after(period).await;
            if let Err(err) = self.tick().await {
                if !err.is_transient() {
                    return err;
                }
            }
        }
    }
}
