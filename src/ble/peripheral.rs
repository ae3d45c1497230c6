//! Advertising and connection handling for the hand service.

use core::cell::Cell;

use crate::ble::gatt::{HandServiceEvent, Server, ServerEvent, HAND_SERVICE_UUID_LE};
use crate::ble::{battery_report, set_connected};
use crate::error::{BleError, Error};
use defmt::{info, warn};
use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};
use heapless::Vec;
use nrf_softdevice::ble::advertisement_builder::{
    Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
};
use nrf_softdevice::ble::{gatt_server, peripheral, Connection};
use nrf_softdevice::Softdevice;
use prosthetic_hand::config::{
    BLE_ADV_INTERVAL, BLE_BATTERY_CHAR_UUID, BLE_COMMAND_CHAR_UUID, BLE_DEVICE_NAME,
    BLE_SERVICE_UUID, COMMAND_QUEUE_DEPTH,
};
use prosthetic_hand::input::Command;
use prosthetic_hand::telemetry::reporter::BATTERY_PAYLOAD_LEN;
use prosthetic_hand::telemetry::{BatterySubscription, Delivery};

static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .services_128(ServiceList::Complete, &[HAND_SERVICE_UUID_LE])
    .build();

static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .full_name(BLE_DEVICE_NAME)
    .build();

/// Back-off before retrying a failed advertising start.
const ADVERTISE_RETRY_MS: u64 = 500;

/// Advertise until a central connects.
async fn advertise(sd: &'static Softdevice) -> Result<Connection, Error> {
    let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
        adv_data: &ADV_DATA,
        scan_data: &SCAN_DATA,
    };
    let config = peripheral::Config {
        interval: BLE_ADV_INTERVAL,
        ..Default::default()
    };

    peripheral::advertise_connectable(sd, adv, &config)
        .await
        .map_err(|e| match e {
            peripheral::AdvertiseError::Raw(raw) => BleError::Raw(raw as u32).into(),
            _ => BleError::AdvertiseFailed.into(),
        })
}

/// Parse a command write and queue it for the control task.
fn on_command_write(
    data: &[u8],
    cmd_tx: &Sender<'static, CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH>,
) {
    let Some(command) = Command::from_bytes(data) else {
        return;
    };

    info!("BLE command received: {}", command);
    if cmd_tx.try_send(command).is_err() {
        warn!("Command queue full - dropping BLE command");
    }
}

/// Store one battery report, notifying it if the central subscribed.
fn push_battery(
    server: &Server,
    conn: &Connection,
    payload: &[u8],
    delivery: Delivery,
) -> Result<(), Error> {
    let value: Vec<u8, BATTERY_PAYLOAD_LEN> =
        Vec::from_slice(payload).map_err(|_| BleError::NotifyFailed)?;

    server
        .hand
        .battery_set(&value)
        .map_err(|_| BleError::NotifyFailed)?;
    if delivery == Delivery::StoreAndNotify {
        server
            .hand
            .battery_notify(conn, &value)
            .map_err(|_| BleError::NotifyFailed)?;
    }
    Ok(())
}

/// Serve one connection until the central disconnects.
async fn serve(
    conn: &Connection,
    server: &Server,
    cmd_tx: &Sender<'static, CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH>,
) {
    let subscription = Cell::new(BatterySubscription::new());

    let gatt = gatt_server::run(conn, server, |event| match event {
        ServerEvent::Hand(HandServiceEvent::CommandWrite(data)) => on_command_write(&data, cmd_tx),
        ServerEvent::Hand(HandServiceEvent::BatteryCccdWrite { notifications }) => {
            info!("Battery notifications enabled: {}", notifications);
            let mut sub = subscription.get();
            sub.set_notify(notifications);
            subscription.set(sub);
        }
    });

    let reports = async {
        loop {
            let payload = battery_report().wait().await;
            info!("Sending battery: {}", payload.as_str());
            let delivery = subscription.get().delivery();
            if let Err(e) = push_battery(server, conn, payload.as_bytes(), delivery) {
                warn!("Battery notify failed: {}", e);
            }
        }
    };

    select(gatt, reports).await;
}

/// BLE peripheral task - must be spawned once after the SoftDevice is
/// running.
pub async fn ble_task(
    sd: &'static Softdevice,
    server: &'static Server,
    cmd_tx: Sender<'static, CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH>,
) -> ! {
    info!(
        "BLE service {} (command {}, battery {})",
        BLE_SERVICE_UUID, BLE_COMMAND_CHAR_UUID, BLE_BATTERY_CHAR_UUID
    );

    loop {
        info!("BLE advertising started: {}", BLE_DEVICE_NAME);
        let conn = match advertise(sd).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Advertising failed: {}", e);
                Timer::after(Duration::from_millis(ADVERTISE_RETRY_MS)).await;
                continue;
            }
        };

        info!("BLE device connected");
        battery_report().reset();
        set_connected(true);

        serve(&conn, server, &cmd_tx).await;

        set_connected(false);
        battery_report().reset();
        info!("BLE device disconnected");
    }
}
