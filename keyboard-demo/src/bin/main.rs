#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those     holding buffers for the duration of a data transfer."
)]

use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender};
use embassy_time::{Delay, Duration, Timer};
use esp_hal::i2c::master::I2c;
use esp_hal::{
    clock::CpuClock,
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    time::Rate,
    timer::systimer::SystemTimer,
};
use esp_println::println;
use log::{error, info, warn};
use tca8418_keyboard_async::config::KeyboardConfig;
use tca8418_keyboard_async::event::ButtonEvent;
use tca8418_keyboard_async::keyboard::KeyboardController;

const EVENT_QUEUE_DEPTH: usize = 16;

type EventSender = Sender<'static, CriticalSectionRawMutex, ButtonEvent, EVENT_QUEUE_DEPTH>;
type Keyboard = KeyboardController<
    I2c<'static, esp_hal::Async>,
    Input<'static>,
    EventSender,
    Output<'static>,
>;

static EVENTS: Channel<CriticalSectionRawMutex, ButtonEvent, EVENT_QUEUE_DEPTH> = Channel::new();

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    println!("{}", info);
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

/// The main entry point of the application.
#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    esp_println::logger::init_logger(log::LevelFilter::Debug);
    info!("Logger initialized");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timer0 = SystemTimer::new(peripherals.SYSTIMER);
    esp_hal_embassy::init(timer0.alarm0);

    let keyboard_rst = Output::new(peripherals.GPIO45, Level::High, OutputConfig::default());
    let keyboard_scl = peripherals.GPIO14;
    let keyboard_sda = peripherals.GPIO13;
    let keyboard_int = Input::new(
        peripherals.GPIO15,
        InputConfig::default().with_pull(Pull::Up),
    );

    let config = esp_hal::i2c::master::Config::default().with_frequency(Rate::from_khz(100));
    let keyboard_i2c = I2c::new(peripherals.I2C0, config)
        .unwrap()
        .with_sda(keyboard_sda)
        .with_scl(keyboard_scl)
        .into_async();

    let mut keyboard = KeyboardController::new(
        keyboard_i2c,
        keyboard_int,
        EVENTS.sender(),
        KeyboardConfig::default(),
    )
    .with_reset(keyboard_rst);

    if let Err(err) = keyboard.reset(&mut Delay).await {
        warn!("Error resetting keyboard controller: {err:?}");
    }
    match keyboard.init().await {
        Ok(_) => log::debug!("Keyboard controller initialized."),
        Err(err) => warn!("Error initializing keyboard controller: {err:?}"),
    };

    spawner.spawn(scan_keys(keyboard)).unwrap();
    spawner.spawn(log_buttons()).unwrap();

    loop {
        Timer::after(Duration::from_secs(1)).await;
    }
}

/// Drains the keyboard FIFO on every interrupt.
#[embassy_executor::task]
async fn scan_keys(mut keyboard: Keyboard) {
    let err = keyboard.run().await;
    error!("Keyboard controller stopped: {err:?}");
}

/// Logs the button notifications produced by the keyboard.
#[embassy_executor::task]
async fn log_buttons() {
    let receiver = EVENTS.receiver();
    loop {
        match receiver.receive().await {
            ButtonEvent::Down(button) => info!("{button} down"),
            ButtonEvent::Up(button) => info!("{button} up"),
        }
    }
}
