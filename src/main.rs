//! Prosthetic hand firmware for nRF52840 + S140 SoftDevice.
//!
//! Task layout:
//!
//! ```text
//!  button_task ──┐
//!                ├──► COMMANDS ──► control_task ──► ServoBank (PWM0)
//!  ble_task ─────┘                    (HandController)
//!     ▲
//!     └── battery report ◄── telemetry_task ◄── SAADC
//! ```

#![no_std]
#![no_main]

mod ble;
mod control;
mod error;
mod power;
mod servo;
mod ui;

use core::mem;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::peripherals::PWM0;
use embassy_nrf::pwm::SimplePwm;
use embassy_nrf::saadc::{self, ChannelConfig, Gain, Reference, Resolution, Saadc};
use embassy_nrf::bind_interrupts;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use nrf_softdevice::{raw, Softdevice};
use prosthetic_hand::config::{BLE_DEVICE_NAME, COMMAND_QUEUE_DEPTH};
use prosthetic_hand::input::{Command, BUTTON_COUNT};

use {defmt_rtt as _, panic_probe as _};

use crate::ble::gatt::Server;
use crate::power::BatteryMonitor;
use crate::servo::ServoBank;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
});

/// Commands from buttons and BLE, consumed by the control task.
static COMMANDS: Channel<CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH> = Channel::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn ble_task(
    sd: &'static Softdevice,
    server: &'static Server,
    cmd_tx: Sender<'static, CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH>,
) -> ! {
    ble::peripheral::ble_task(sd, server, cmd_tx).await
}

#[embassy_executor::task]
async fn control_task(
    servos: ServoBank<'static, PWM0>,
    cmd_rx: Receiver<'static, CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH>,
) -> ! {
    control::control_task(servos, cmd_rx).await
}

#[embassy_executor::task]
async fn button_task(
    pins: [Input<'static>; BUTTON_COUNT],
    cmd_tx: Sender<'static, CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH>,
) -> ! {
    ui::buttons::button_task(pins, cmd_tx).await
}

#[embassy_executor::task]
async fn telemetry_task(monitor: BatteryMonitor) -> ! {
    power::telemetry_task(monitor).await
}

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 128 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: BLE_DEVICE_NAME.as_ptr() as _,
            current_len: BLE_DEVICE_NAME.len() as u16,
            max_len: BLE_DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Prosthetic hand starting");

    // The SoftDevice reserves priorities 0, 1 and 4.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);
    interrupt::SAADC.set_priority(Priority::P3);

    // Servos first, so the hand holds Relax before anything else runs.
    let pwm = SimplePwm::new_3ch(p.PWM0, p.P0_13, p.P0_14, p.P0_15);
    let servos = ServoBank::new(pwm);

    // Buttons, in `Button::ALL` order.
    let buttons = [
        Input::new(p.P0_11, Pull::Up),
        Input::new(p.P0_12, Pull::Up),
        Input::new(p.P0_24, Pull::Up),
        Input::new(p.P0_25, Pull::Up),
        Input::new(p.P1_08, Pull::Up),
        Input::new(p.P1_07, Pull::Up),
    ];

    // Battery sense on AIN2 with a 3.3 V full scale.
    let mut channel_config = ChannelConfig::single_ended(p.P0_04);
    channel_config.reference = Reference::VDD1_4;
    channel_config.gain = Gain::GAIN1_4;
    let mut saadc_config = saadc::Config::default();
    saadc_config.resolution = Resolution::_12BIT;
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    let monitor = BatteryMonitor::new(saadc).await;

    let sd = Softdevice::enable(&softdevice_config());
    let server = unwrap!(ble::gatt::init(sd));
    let sd: &'static Softdevice = sd;
    spawner.must_spawn(softdevice_task(sd));

    spawner.must_spawn(control_task(servos, COMMANDS.receiver()));
    spawner.must_spawn(button_task(buttons, COMMANDS.sender()));
    spawner.must_spawn(telemetry_task(monitor));
    spawner.must_spawn(ble_task(sd, server, COMMANDS.sender()));
}
