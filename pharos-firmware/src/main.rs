//! Pharos - Peripheral Panel Firmware
//!
//! Firmware for an RP2040 board that fronts a small bank of GPIO
//! peripherals: an MCP3008 ADC, a two-digit display behind a 74HC595,
//! eight pulsed relay lines and three status LEDs. Panel events stream to a
//! bridge over UART0, which relays commands back.
//!
//! Named after the lighthouse of Alexandria, which also only cared whether
//! it was dark.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pharos_core::panel::Panel;
use pharos_drivers::{Hc595, LedBank, Mcp3008, PulseController};

mod channels;
mod config;
mod tasks;
mod uplink;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pharos firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();

    // Uplink to the bridge, 115200 baud default
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for uplink");

    // MCP3008: CLK=GPIO2, DIN=GPIO3, DOUT=GPIO4, CS=GPIO5
    let adc = Mcp3008::new(
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Input::new(p.PIN_4, Pull::None),
        Output::new(p.PIN_5, Level::High),
    );

    // 74HC595: DS=GPIO6, SHCP=GPIO7, STCP=GPIO8
    let display = unwrap!(Hc595::new(
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::Low),
    ));

    // Relay lines GPIO10-17, in line index order
    let relays = unwrap!(PulseController::new([
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
        Output::new(p.PIN_13, Level::Low),
        Output::new(p.PIN_14, Level::Low),
        Output::new(p.PIN_15, Level::Low),
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_17, Level::Low),
    ]));

    // Status LEDs GPIO18-20
    let leds = unwrap!(LedBank::new([
        Output::new(p.PIN_18, Level::Low),
        Output::new(p.PIN_19, Level::Low),
        Output::new(p.PIN_20, Level::Low),
    ]));

    info!("Panel lines initialized");

    let tick_interval_ms = config.timing.tick_interval_ms;
    let panel: tasks::BoardPanel = Panel::new(config, adc, display, relays, leds);

    // Spawn tasks
    spawner.spawn(tasks::tick_task(tick_interval_ms)).unwrap();
    spawner.spawn(tasks::uplink_rx_task(rx)).unwrap();
    spawner.spawn(tasks::uplink_tx_task(tx)).unwrap();
    spawner.spawn(tasks::panel_task(panel)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
