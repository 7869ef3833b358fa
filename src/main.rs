//! RF Chain Selector Main Application
//!
//! Entry point for the STM32G474-based RF selector firmware.
//! Brings up the discrete outputs and the USB serial link, then serves
//! opcodes until power is removed.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::usb::{self, Driver};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_time::{Duration, Timer};
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, UsbDevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use rf_selector::config::{SETTLE_DELAY_MS, USB_CDC_PACKET_SIZE};
use rf_selector::controller::{Controller, PollOutcome};
use rf_selector::hal::gpio::GpioBase;
use rf_selector::serial::{LineBuffer, ResponseBuffer, SerialLink};
use rf_selector::usb::cdc::{self, UsbDeviceInfo, UsbStrings};

type UsbDriver = Driver<'static, peripherals::USB>;
type Base = GpioBase<Output<'static>, Input<'static>, { rf_selector::config::DISCRETE_CHANNELS }>;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    USB_LP => usb::InterruptHandler<peripherals::USB>;
});

static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static CDC_STATE: StaticCell<State<'static>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("RF Selector Firmware v{}", env!("CARGO_PKG_VERSION"));

    // USB needs the 48 MHz clock trimmed from SOF packets
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::{mux, Hsi48Config};
        config.rcc.hsi48 = Some(Hsi48Config { sync_from_usb: true });
        config.rcc.mux.clk48sel = mux::Clk48sel::HSI48;
    }
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // Initialize status LED (typically on PA5 for Nucleo boards)
    let led = Output::new(p.PA5, Level::Low, Speed::Low);

    // Discrete channels 1-10 on PC0-PC9, warning light on PB0, 24V sense on PB1
    let discrete = [
        Output::new(p.PC0, Level::Low, Speed::Low),
        Output::new(p.PC1, Level::Low, Speed::Low),
        Output::new(p.PC2, Level::Low, Speed::Low),
        Output::new(p.PC3, Level::Low, Speed::Low),
        Output::new(p.PC4, Level::Low, Speed::Low),
        Output::new(p.PC5, Level::Low, Speed::Low),
        Output::new(p.PC6, Level::Low, Speed::Low),
        Output::new(p.PC7, Level::Low, Speed::Low),
        Output::new(p.PC8, Level::Low, Speed::Low),
        Output::new(p.PC9, Level::Low, Speed::Low),
    ];
    let warning_light = Output::new(p.PB0, Level::Low, Speed::Low);
    let supply_sense = Input::new(p.PB1, Pull::Down);

    let base: Base = GpioBase::new(discrete, warning_light, supply_sense);
    let mut controller = Controller::new(base);
    controller.bring_up();
    Timer::after(Duration::from_millis(SETTLE_DELAY_MS)).await;

    info!("Outputs initialized");

    // USB device with a single CDC ACM function (PA12 = D+, PA11 = D-)
    let driver = Driver::new(p.USB, Irqs, p.PA12, p.PA11);
    let info = UsbDeviceInfo::default();
    let usb_config = cdc::device_config(info, &UsbStrings::default());

    let mut builder = Builder::new(
        driver,
        usb_config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        &mut [],
        CONTROL_BUF.init([0; 64]),
    );
    let cdc_state = CDC_STATE.init(State::new());
    let mut class = CdcAcmClass::new(&mut builder, cdc_state, USB_CDC_PACKET_SIZE);
    let usb = builder.build();

    info!("USB initialized as {}", info);

    // Spawn background tasks
    spawner.spawn(usb_task(usb)).unwrap();
    spawner.spawn(heartbeat_task(led)).unwrap();

    info!("Tasks spawned, entering main loop");

    let mut rx = LineBuffer::new();
    let mut tx = ResponseBuffer::new();
    loop {
        class.wait_connection().await;
        info!("Host connected");
        rx.clear();
        tx.clear();
        let _ = serve(&mut class, &mut controller, &mut rx, &mut tx).await;
        info!("Host disconnected");
    }
}

/// Serve opcodes until the host goes away
async fn serve(
    class: &mut CdcAcmClass<'static, UsbDriver>,
    controller: &mut Controller<Base>,
    rx: &mut LineBuffer,
    tx: &mut ResponseBuffer,
) -> Result<(), EndpointError> {
    loop {
        cdc::fill_line(class, rx).await?;
        match controller.poll(rx, tx) {
            PollOutcome::Idle => {}
            PollOutcome::Rejected(err) => warn!("Line rejected: {}", err),
            PollOutcome::Dispatched(opcode, result) => {
                if result.is_ok() {
                    info!("Opcode {} -> {}", opcode, controller.status());
                }
            }
        }
        cdc::flush(class, tx).await?;
    }
}

/// USB device task - services the bus
#[embassy_executor::task]
async fn usb_task(mut usb: UsbDevice<'static, UsbDriver>) -> ! {
    usb.run().await
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}
