//! Raw FIFO events, button notifications and the sinks that receive them.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;

use crate::remap::Button;
use crate::scancode::Key;

const EVENT_PRESSED_MASK: u8 = 0b1000_0000;
const EVENT_SCANCODE_MASK: u8 = 0b0111_1111;

/// One entry of the chip's key event FIFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// `true` for a press, `false` for a release.
    pub pressed: bool,
    /// The 7-bit scancode of the key.
    pub scancode: u8,
}

impl From<u8> for KeyEvent {
    fn from(raw: u8) -> Self {
        Self {
            pressed: (raw & EVENT_PRESSED_MASK) != 0,
            scancode: raw & EVENT_SCANCODE_MASK,
        }
    }
}

impl KeyEvent {
    /// The key this event refers to.
    pub fn key(&self) -> Key {
        Key::from_scancode(self.scancode)
    }
}

/// A press or release of a logical button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// The button went down.
    Down(Button),
    /// The button was released.
    Up(Button),
}

impl ButtonEvent {
    /// Builds the notification for a decoded FIFO entry.
    pub fn new(button: Button, pressed: bool) -> Self {
        if pressed {
            ButtonEvent::Down(button)
        } else {
            ButtonEvent::Up(button)
        }
    }

    /// The button concerned.
    pub fn button(&self) -> Button {
        match self {
            ButtonEvent::Down(button) | ButtonEvent::Up(button) => *button,
        }
    }

    /// `true` for [`ButtonEvent::Down`].
    pub fn is_down(&self) -> bool {
        matches!(self, ButtonEvent::Down(_))
    }
}

/// Receives button notifications from the keyboard controller.
///
/// Delivery is fire-and-forget: a sink that cannot accept an event drops it.
pub trait EventSink {
    /// Delivers one notification.
    fn emit(&mut self, event: ButtonEvent);
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn emit(&mut self, event: ButtonEvent) {
        (**self).emit(event)
    }
}

impl<const N: usize> EventSink for heapless::Vec<ButtonEvent, N> {
    fn emit(&mut self, event: ButtonEvent) {
        if self.push(event).is_err() {
            log::warn!("Event buffer full, dropping {event:?}");
        }
    }
}

impl<M: RawMutex, const N: usize> EventSink for Sender<'_, M, ButtonEvent, N> {
    fn emit(&mut self, event: ButtonEvent) {
        if self.try_send(event).is_err() {
            log::warn!("Event channel full, dropping {event:?}");
        }
    }
}
