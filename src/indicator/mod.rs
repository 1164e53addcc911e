//! Connectivity-aware status blinker.
//!
//! A background loop that toggles the indicator pin for the life of the
//! process, fast while the USB link is active and slow while it is not.
//! The loop body is one half-cycle: check the cancellation token, toggle,
//! sleep for the half-period chosen from the link state *at that moment*.
//! Because the period is recomputed every half-cycle, a link change takes
//! effect at the next half-cycle boundary, never mid-sleep.
//!
//! The pin is owned by this loop for its whole run; nothing else writes it.

use crate::platform::{CancelToken, IndicatorPin, LinkState, Sleep, UsbLink};

/// Half-period while the link is active, in milliseconds.
pub const FAST_HALF_PERIOD_MS: u32 = 250;

/// Half-period while the link is inactive, in milliseconds.
pub const SLOW_HALF_PERIOD_MS: u32 = 500;

/// Half-period for a link state. Pure function; a full on/off cycle lasts
/// twice this long.
pub fn half_period_ms(link: LinkState) -> u32 {
    match link {
        LinkState::Active => FAST_HALF_PERIOD_MS,
        LinkState::Inactive => SLOW_HALF_PERIOD_MS,
    }
}

/// Run the blink loop until cancellation is observed.
///
/// Intended as the body of a dedicated low-stakes thread. Cancellation is
/// cooperative: the token is consulted once per half-cycle, so a request
/// lands within one half-period plus one sleep.
pub fn run<L, P, S, C>(link: &L, pin: &mut P, sleep: &mut S, cancel: &C)
where
    L: UsbLink,
    P: IndicatorPin,
    S: Sleep,
    C: CancelToken,
{
    while !cancel.is_cancelled() {
        pin.toggle();
        sleep.sleep_ms(half_period_ms(link.state()));
    }
}
