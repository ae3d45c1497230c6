//! GATT server definition for the hand service.
//!
//! The `#[nrf_softdevice::gatt_service]` macro generates the attribute
//! table, value setters/notifiers and an event enum for the listed
//! characteristics.  UUIDs must be literals here; they match
//! `config::BLE_*_UUID`.

use crate::error::{BleError, Error};
use heapless::Vec;
use nrf_softdevice::Softdevice;
use prosthetic_hand::config::BLE_COMMAND_MAX_LEN;
use prosthetic_hand::telemetry::reporter::BATTERY_PAYLOAD_LEN;
use static_cell::StaticCell;

/// Hand service UUID (`4fafc201-1fb5-459e-8fcc-c5c9c331914b`) in the
/// little-endian byte order used by advertising data.
pub const HAND_SERVICE_UUID_LE: [u8; 16] = [
    0x4b, 0x91, 0x31, 0xc3, 0xc9, 0xc5, 0xcc, 0x8f, 0x9e, 0x45, 0xb5, 0x1f, 0x01, 0xc2, 0xaf, 0x4f,
];

#[nrf_softdevice::gatt_service(uuid = "4fafc201-1fb5-459e-8fcc-c5c9c331914b")]
pub struct HandService {
    /// Text command from the app (`RELAX`, `INC`, ...).
    #[characteristic(uuid = "beb5483e-36e1-4688-b7f5-ea07361b26a8", write, write_without_response)]
    pub command: Vec<u8, BLE_COMMAND_MAX_LEN>,

    /// Latest battery report (`BAT:<percent>`).
    #[characteristic(uuid = "19b10001-e8f2-537e-4f6c-d104768a1214", read, notify)]
    pub battery: Vec<u8, BATTERY_PAYLOAD_LEN>,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub hand: HandService,
}

static SERVER: StaticCell<Server> = StaticCell::new();

/// Register the GATT server with the SoftDevice.
///
/// Must be called exactly once, before advertising starts.
pub fn init(sd: &mut Softdevice) -> Result<&'static Server, Error> {
    let server = Server::new(sd).map_err(|_| BleError::RegisterFailed)?;
    Ok(SERVER.init(server))
}
