//! The main supervisory loop.
//!
//! One [`App`] tick advances the session supervisor first and the clock
//! display second, in that order, every tick. [`App::run`] repeats the tick
//! at a fixed cadence until the cancellation token reports cancelled,
//! sleeping [`TICK_INTERVAL_MS`] between iterations. The indicator loop and
//! the shell session run on their own threads and interleave freely with
//! this one; only the supervisor-before-clock ordering inside a tick is
//! guaranteed.

use crate::clock::ClockDisplay;
use crate::platform::{CancelToken, Display, LinkState, Rtc, SessionHost, Sleep, UsbLink};
use crate::supervisor::{Error, Supervisor};

/// Interval between supervisory ticks, in milliseconds.
pub const TICK_INTERVAL_MS: u32 = 50;

/// One-time display bring-up, run at boot before the supervisory loop: the
/// controller initialization sequence followed by the driver's built-in test
/// pattern.
///
/// Returns the controller status code so the board can act on it, for
/// example gating the backlight on a successful init.
pub fn bring_up_display<D: Display>(display: &mut D) -> u16 {
    let status = display.init();
    display.self_test();
    status
}

/// The application: session supervisor plus clock display state.
#[derive(Debug)]
pub struct App<H: SessionHost> {
    supervisor: Supervisor<H>,
    clock: ClockDisplay,
}

impl<H: SessionHost> Default for App<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: SessionHost> App<H> {
    /// Create the application state.
    pub fn new() -> Self {
        Self {
            supervisor: Supervisor::new(),
            clock: ClockDisplay::new(),
        }
    }

    /// The session supervisor, for state inspection.
    pub fn supervisor(&self) -> &Supervisor<H> {
        &self.supervisor
    }

    /// Run one supervisory tick: supervisor, then clock.
    ///
    /// The only error path is supervisor spawn exhaustion, which is fatal
    /// to the loop.
    pub fn tick<L, R, D>(
        &mut self,
        host: &mut H,
        link: &L,
        rtc: &mut R,
        display: &mut D,
    ) -> Result<(), Error<H::Error>>
    where
        L: UsbLink,
        R: Rtc,
        D: Display,
    {
        self.supervisor
            .tick(host, link.state() == LinkState::Active)?;
        self.clock.tick(rtc, display);
        Ok(())
    }

    /// Tick at [`TICK_INTERVAL_MS`] until cancellation is observed.
    ///
    /// The token is checked once per tick, before the tick body, so
    /// cancellation lands within one interval.
    pub fn run<L, R, D, S, C>(
        &mut self,
        host: &mut H,
        link: &L,
        rtc: &mut R,
        display: &mut D,
        sleep: &mut S,
        cancel: &C,
    ) -> Result<(), Error<H::Error>>
    where
        L: UsbLink,
        R: Rtc,
        D: Display,
        S: Sleep,
        C: CancelToken,
    {
        while !cancel.is_cancelled() {
            self.tick(host, link, rtc, display)?;
            sleep.sleep_ms(TICK_INTERVAL_MS);
        }
        Ok(())
    }
}
