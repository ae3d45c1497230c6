//! Control task - the single owner of the hand state.
//!
//! Buttons and BLE only enqueue [`Command`]s.  This task takes them one
//! at a time, hands them to the [`HandController`] and plays back any
//! resulting motion frame by frame on the servos.  A command that
//! arrives during a motion waits in the queue until the motion is done.

use defmt::info;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Instant, Timer};
use prosthetic_hand::actuator::Effector;
use prosthetic_hand::config::COMMAND_QUEUE_DEPTH;
use prosthetic_hand::hand::{HandController, MotionPoll, Outcome};
use prosthetic_hand::input::Command;

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Play the motion in flight until it settles.
async fn run_motion(hand: &mut HandController, servos: &mut impl Effector) {
    loop {
        match hand.poll_motion(now_ms()) {
            MotionPoll::Idle => return,
            MotionPoll::Pending { until_ms } => Timer::at(Instant::from_millis(until_ms)).await,
            MotionPoll::Frame(posture) => servos.apply(posture),
            MotionPoll::Settled(posture) => {
                servos.apply(posture);
                return;
            }
        }
    }
}

pub async fn control_task(
    mut servos: impl Effector,
    cmd_rx: Receiver<'static, CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH>,
) -> ! {
    let mut hand = HandController::new();
    servos.apply(hand.actuator().current());
    info!("Hand ready: {}", hand.mode());

    loop {
        let command = cmd_rx.receive().await;
        let outcome = hand.handle(&command, now_ms());
        if let Outcome::Moving { mode, target } = outcome {
            info!("Moving to {} {}", mode, target);
            run_motion(&mut hand, &mut servos).await;
        }
    }
}
