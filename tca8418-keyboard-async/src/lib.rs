//! An asynchronous, `no_std` driver for TCA8418 keyboard matrix scanners.
//!
//! This driver provides a `KeyboardController` that arms the TCA8418 I2C keypad
//! scanner, drains its key event FIFO whenever the INT line fires (or on a polling
//! tick) and turns each event into a button press or release for the application.
//!
//! Scancodes are first looked up in a fixed [`scancode`] table and then mapped onto
//! the application's logical buttons by a [`remap::KeyRemap`], which can differ per
//! deployment. Keys without a logical button are dropped silently.
//!
//! # Usage
//!
//! To use this driver, you need an I2C peripheral implementation that satisfies the
//! `embedded-hal-async::i2c::I2c` trait, the INT pin as an input with pull-up that
//! implements `embedded-hal-async::digital::Wait`, and an [`event::EventSink`] such
//! as an `embassy-sync` channel sender.
//!
//! ```ignore
//! # #![no_std]
//! # #![no_main]
//! # use esp_hal::i2c::master::I2c;
//! # use esp_hal::gpio::{Input, InputConfig, Pull};
//! # use esp_hal::Config;
//! # use esp_hal::clock::CpuClock;
//! # use esp_hal::time::Rate;
//! # use embassy_executor::Spawner;
//! # use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
//! use tca8418_keyboard_async::config::KeyboardConfig;
//! use tca8418_keyboard_async::event::ButtonEvent;
//! use tca8418_keyboard_async::keyboard::KeyboardController;
//!
//! static EVENTS: Channel<CriticalSectionRawMutex, ButtonEvent, 16> = Channel::new();
//!
//! #[esp_hal_embassy::main]
//! async fn main(spawner: Spawner) {
//!     // Initialize peripherals and I2C
//!     let peripherals = esp_hal::init(Config::default().with_cpu_clock(CpuClock::max()));
//!     let keyboard_int = Input::new(
//!         peripherals.GPIO15,
//!         InputConfig::default().with_pull(Pull::Up),
//!     );
//!     let config = esp_hal::i2c::master::Config::default().with_frequency(Rate::from_khz(100));
//!     let i2c = I2c::new(peripherals.I2C0, config)
//!         .unwrap()
//!         .with_sda(peripherals.GPIO13)
//!         .with_scl(peripherals.GPIO14)
//!         .into_async();
//!
//!     // Create and arm the keyboard controller
//!     let mut keyboard =
//!         KeyboardController::new(i2c, keyboard_int, EVENTS.sender(), KeyboardConfig::default());
//!     keyboard.init().await.unwrap();
//!
//!     // Drain the FIFO on every interrupt
//!     let err = keyboard.run().await;
//!     log::error!("Keyboard stopped: {err:?}");
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod event;
pub mod keyboard;
pub mod registers;
pub mod remap;
pub mod scancode;

pub use error::Error;
pub use remap::decode;
