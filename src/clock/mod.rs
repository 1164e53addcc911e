//! Change-driven clock display loop.
//!
//! Each tick reads the RTC as epoch seconds and re-renders only when the
//! value differs from the last one seen, so the display is written at most
//! once per wall-clock second regardless of the tick rate. Two fields are
//! drawn at fixed positions with compile-time color pairs: the raw epoch
//! value and a `YYYY/MM/DD HH:MM:SS` calendar string. The calendar is read
//! from the RTC only on the render path.

use core::fmt::Write as _;

use heapless::String;

use crate::platform::{Display, Rgb565, Rtc};

/// Screen position of the epoch-seconds field.
pub const EPOCH_POS: (u16, u16) = (20, 20);

/// Screen position of the calendar field.
pub const CALENDAR_POS: (u16, u16) = (20, 28);

const EPOCH_FG: Rgb565 = Rgb565::RED;
const CALENDAR_FG: Rgb565 = Rgb565::GREEN;
const BG: Rgb565 = Rgb565::BLACK;

/// State carried across ticks: the last rendered second and a scratch
/// formatting buffer.
///
/// ```rust
/// use libboard::clock::ClockDisplay;
/// # use libboard::platform::{Calendar, Display, Rgb565, Rtc};
/// # struct FixedRtc;
/// # impl Rtc for FixedRtc {
/// #     fn unix_seconds(&mut self) -> u32 { 1700000000 }
/// #     fn calendar(&mut self) -> Calendar { Calendar::default() }
/// #     fn set_unix_seconds(&mut self, _secs: u32) {}
/// # }
/// # struct NullDisplay;
/// # impl Display for NullDisplay {
/// #     fn init(&mut self) -> u16 { 0 }
/// #     fn write_str(&mut self, _x: u16, _y: u16, _t: &str, _f: Rgb565, _b: Rgb565) {}
/// #     fn self_test(&mut self) {}
/// # }
///
/// let mut clock = ClockDisplay::new();
/// let mut rtc = FixedRtc;
/// let mut lcd = NullDisplay;
///
/// assert!(clock.tick(&mut rtc, &mut lcd));  // first observation renders
/// assert!(!clock.tick(&mut rtc, &mut lcd)); // same second: no redraw
/// ```
pub struct ClockDisplay {
    last_seen: u32,
    scratch: String<24>,
}

impl core::fmt::Debug for ClockDisplay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClockDisplay")
            .field("last_seen", &self.last_seen)
            .finish_non_exhaustive()
    }
}

impl Default for ClockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockDisplay {
    /// Create the loop state. The last-seen value starts at zero, so the
    /// first tick with a nonzero clock renders.
    pub fn new() -> Self {
        Self {
            last_seen: 0,
            scratch: String::new(),
        }
    }

    /// The epoch value rendered most recently.
    pub fn last_seen(&self) -> u32 {
        self.last_seen
    }

    /// Run one iteration: poll the RTC and re-render on change.
    ///
    /// Returns `true` when the display was written. Rendering is
    /// best-effort; there is no retry path at this layer.
    pub fn tick<R: Rtc, D: Display>(&mut self, rtc: &mut R, display: &mut D) -> bool {
        let now = rtc.unix_seconds();
        if now == self.last_seen {
            return false;
        }
        self.last_seen = now;

        self.scratch.clear();
        let _ = write!(self.scratch, "{now:>10}");
        display.write_str(EPOCH_POS.0, EPOCH_POS.1, &self.scratch, EPOCH_FG, BG);

        let cal = rtc.calendar();
        self.scratch.clear();
        let _ = write!(
            self.scratch,
            "{:04}/{:02}/{:02} {:02}:{:02}:{:02}",
            1900 + u32::from(cal.years_from_1900),
            cal.month0 + 1,
            cal.day,
            cal.hour,
            cal.minute,
            cal.second,
        );
        display.write_str(CALENDAR_POS.0, CALENDAR_POS.1, &self.scratch, CALENDAR_FG, BG);

        true
    }
}
