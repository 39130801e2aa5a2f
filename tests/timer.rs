// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

mod common;

use adbms_pal::config::{DELAY_1MS_US, DELAY_8MS_US};
use adbms_pal::pal::TimerState;
use adbms_pal::PalError;
use common::{Reply, Rig};

#[test]
fn poll_expires_after_the_period() {
    let mut rig = Rig::<1>::new(Reply::Echo);
    rig.clock.set(5_000);

    rig.pal.timer_start(1000, 0).unwrap();
    assert_eq!(rig.pal.timeout_status(0), Ok(false));

    rig.clock.advance(999);
    assert_eq!(rig.pal.timeout_status(0), Ok(false));

    rig.clock.advance(1);
    assert_eq!(rig.pal.timeout_status(0), Ok(true));

    rig.clock.advance(50_000);
    assert_eq!(rig.pal.timeout_status(0), Ok(true));
}

#[test]
fn chains_keep_independent_timers() {
    let mut rig = Rig::<2>::new(Reply::Echo);

    rig.pal.timer_start(1000, 0).unwrap();
    rig.clock.advance(600);
    rig.pal.timer_start(1000, 1).unwrap();

    rig.clock.advance(400);
    assert_eq!(rig.pal.timeout_status(0), Ok(true));
    assert_eq!(rig.pal.timeout_status(1), Ok(false));

    // Restarting chain 0 leaves chain 1 alone.
    rig.pal.timer_start(DELAY_8MS_US, 0).unwrap();
    rig.clock.advance(600);
    assert_eq!(rig.pal.timeout_status(0), Ok(false));
    assert_eq!(rig.pal.timeout_status(1), Ok(true));
}

#[test]
fn unstarted_timer_reports_expired() {
    let mut rig = Rig::<2>::new(Reply::Echo);
    assert_eq!(rig.pal.timer_state(1), Ok(TimerState::Idle));
    assert_eq!(rig.pal.timeout_status(1), Ok(true));
}

#[test]
fn restart_overwrites_pending_wait() {
    let mut rig = Rig::<1>::new(Reply::Echo);
    rig.pal.timer_start(10_000, 0).unwrap();
    rig.clock.advance(100);

    rig.pal.timer_start(50, 0).unwrap();
    assert_eq!(
        rig.pal.timer_state(0),
        Ok(TimerState::Running {
            started_at: 100,
            period_us: 50
        })
    );
    rig.clock.advance(50);
    assert_eq!(rig.pal.timeout_status(0), Ok(true));
}

#[test]
fn init_returns_timers_to_idle() {
    let mut rig = Rig::<1>::new(Reply::Echo);
    rig.pal.timer_start(10_000, 0).unwrap();
    rig.pal.init().unwrap();
    assert_eq!(rig.pal.timer_state(0), Ok(TimerState::Idle));
}

#[test]
fn timer_survives_clock_wrap() {
    let mut rig = Rig::<1>::new(Reply::Echo);
    rig.clock.set(u32::MAX - 200);
    rig.pal.timer_start(DELAY_1MS_US, 0).unwrap();

    rig.clock.advance(500);
    assert_eq!(rig.pal.timeout_status(0), Ok(false));
    rig.clock.advance(500);
    assert_eq!(rig.pal.timeout_status(0), Ok(true));
}

#[test]
fn nb_wait_blocks_until_expiry() {
    let mut rig = Rig::<1>::new(Reply::Echo);
    rig.pal.timer_start(300, 0).unwrap();

    let mut polls = 0;
    let result: Result<(), PalError> = nb::block!({
        polls += 1;
        rig.clock.advance(100);
        rig.pal.wait_timeout(0)
    });

    assert_eq!(result, Ok(()));
    assert_eq!(polls, 3);
}

#[test]
fn blocking_delay_waits_the_requested_time() {
    let mut rig = Rig::<1>::new(Reply::Echo);
    rig.pal.timer_start(DELAY_8MS_US, 0).unwrap();

    rig.pal.timer_delay(DELAY_8MS_US, 0).unwrap();

    assert_eq!(rig.delay.waits_us(), vec![DELAY_8MS_US]);
    assert_eq!(rig.pal.timeout_status(0), Ok(true));
}

#[test]
fn unknown_chain_is_rejected() {
    let mut rig = Rig::<1>::new(Reply::Echo);
    assert_eq!(rig.pal.timer_start(1, 1), Err(PalError::UnknownChain(1)));
    assert_eq!(rig.pal.timeout_status(7), Err(PalError::UnknownChain(7)));
    assert_eq!(rig.pal.timer_delay(10, 1), Err(PalError::UnknownChain(1)));
    assert!(matches!(
        rig.pal.wait_timeout(1),
        Err(nb::Error::Other(PalError::UnknownChain(1)))
    ));
    assert!(rig.delay.waits_us().is_empty());
}
