// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use log::{error, info, LevelFilter};
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
    spi::{Mode, Phase, Polarity, Spi},
};
use stm32f7xx_hal as hal;

use adbms_pal::config::{
    CELL_MONITOR_CHAIN_ID, CELL_MONITOR_DEVICES, CONSOLE_BAUD, SPI_FREQUENCY_HZ, SPI_MODE,
};
use adbms_pal::pal::LogSink;
use adbms_pal::Pal;
use embedded_hal::spi as eh_spi;

mod console;
mod hw;
mod logger;

use console::Command;
use hw::{BoardPins, CycleDelay, DwtClock, OutPin, SpiBus, StatusLeds, Usart, UsartRx};

/// Translate the PAL's bus mode into the HAL's.
fn hal_mode(mode: eh_spi::Mode) -> Mode {
    Mode {
        polarity: match mode.polarity {
            eh_spi::Polarity::IdleLow => Polarity::IdleLow,
            eh_spi::Polarity::IdleHigh => Polarity::IdleHigh,
        },
        phase: match mode.phase {
            eh_spi::Phase::CaptureOnFirstTransition => Phase::CaptureOnFirstTransition,
            eh_spi::Phase::CaptureOnSecondTransition => Phase::CaptureOnSecondTransition,
        },
    }
}

#[entry]
fn main() -> ! {
    // Peripherals
    let (Some(dp), Some(mut cp)) = (pac::Peripherals::take(), cortex_m::Peripherals::take()) else {
        panic!("peripherals already taken");
    };

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let mut apb2 = rcc.apb2;
    let sysclk_hz = clocks.sysclk().raw();

    // Timebases
    cp.DCB.enable_trace();
    cp.DWT.enable_cycle_counter();
    let clock = DwtClock::new(&cp.DWT, sysclk_hz);
    let delay = CycleDelay::new(cortex_m::delay::Delay::new(cp.SYST, sysclk_hz));

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);

    // LED
    let mut leds = StatusLeds::new(OutPin::new(pins.leds.green), OutPin::new(pins.leds.red));

    // USART3 (ST-LINK VCP)
    let usart_cfg = Config {
        baud_rate: CONSOLE_BAUD.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART3,
        (pins.usart3.tx, pins.usart3.rx),
        &clocks,
        usart_cfg,
    );
    let (tx, rx) = serial.split();
    let mut console_rx = UsartRx::new(rx);
    if logger::init(Usart::new(tx), LevelFilter::Info).is_err() {
        leds.show_fault(true);
    }

    // SPI1 to the daisy chain
    let spi1_raw = Spi::new(
        dp.SPI1,
        (pins.spi1.sck, pins.spi1.miso, pins.spi1.mosi),
    );
    let spi1_enabled =
        spi1_raw.enable::<u8>(hal_mode(SPI_MODE), SPI_FREQUENCY_HZ.Hz(), &clocks, &mut apb2);
    let spi_bus = SpiBus::new(spi1_enabled);
    let cs = OutPin::new(pins.spi1.cs);

    let mut pal = Pal::new(spi_bus, [cs], delay, clock, LogSink::default());

    info!(
        "sysclk {} Hz, SPI1 {} Hz, {} device(s) on chain {}",
        sysclk_hz, SPI_FREQUENCY_HZ, CELL_MONITOR_DEVICES, CELL_MONITOR_CHAIN_ID
    );
    console::print_menu();

    loop {
        let n = match console_rx.read_number() {
            Ok(n) => n,
            Err(_) => {
                error!("console read error");
                continue;
            }
        };
        cprintln!("Entered Command:{}", n);

        if let Err(err) = pal.init() {
            error!("PAL init failed: {}", err);
        }
        console::execute(&mut pal, Command::from(n));
        if let Err(err) = pal.deinit() {
            error!("PAL deinit failed: {}", err);
        }

        leds.show_fault(pal.is_error(CELL_MONITOR_CHAIN_ID));
        leds.beat();
    }
}
