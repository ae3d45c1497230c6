//! GPIO button input with poll-and-settle debouncing.
//!
//! Six physical buttons (active-low with internal pull-up):
//!   - RELAX / PINCH / GRASP / POINT - switch grip mode
//!   - INC / DEC                      - open / close the current grip
//!
//! One task samples all six every `BUTTON_POLL_MS`.  Each falling edge
//! becomes a `Command` on the control channel and adds a
//! `BUTTON_SETTLE_MS` pause before the next sample to ride out contact
//! bounce.

use defmt::{info, warn};
use embassy_nrf::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};
use embedded_hal::digital::InputPin;
use prosthetic_hand::config::COMMAND_QUEUE_DEPTH;
use prosthetic_hand::input::{next_sample_delay_ms, ButtonBank, Command, BUTTON_COUNT};

/// Read every button level (`true` = high = released).
fn read_levels<P: InputPin>(pins: &mut [P; BUTTON_COUNT]) -> [bool; BUTTON_COUNT] {
    let mut levels = [true; BUTTON_COUNT];
    for (level, pin) in levels.iter_mut().zip(pins.iter_mut()) {
        *level = pin.is_high().unwrap_or(true);
    }
    levels
}

/// Run the button polling loop.
///
/// `pins` are in `Button::ALL` order.
pub async fn button_task(
    mut pins: [Input<'static>; BUTTON_COUNT],
    cmd_tx: Sender<'static, CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH>,
) -> ! {
    let mut bank = ButtonBank::new(read_levels(&mut pins));

    loop {
        let fired = bank.sample(read_levels(&mut pins));
        for &button in &fired {
            info!("Button: {}", button);
            if cmd_tx.try_send(button.command()).is_err() {
                warn!("Command queue full - dropping button {}", button);
            }
        }

        Timer::after(Duration::from_millis(next_sample_delay_ms(fired.len()))).await;
    }
}
