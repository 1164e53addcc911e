//! A platform abstraction layer for demo-board firmware
//!
//! This module defines the trait seams between the portable application layer
//! and the board it runs on. The RTOS kernel, USB device stack, LCD
//! controller and RTC hardware are consumed through these traits and never
//! reimplemented here; a board crate provides one implementation per
//! collaborator.
//!
//! Methods are fallible only where the underlying contract can actually
//! report failure. Sleeping, toggling a pad and reading the RTC are modeled
//! as infallible — a board implementation that can fail there has no caller
//! that could do anything about it.

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Re-exports of the traits for convenient importing
pub mod prelude {
    pub use super::{
        CancelToken, Display, IndicatorPin, Kernel, Rtc, SessionHost, Sleep, Stream, UsbLink,
    };
}

/// Reported state of the USB transport.
///
/// Read-only to this crate: the indicator task and the supervisor poll it,
/// the USB driver owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// The transport is not usable (cable out, enumeration pending, fault).
    Inactive,
    /// The transport is enumerated and ready to carry a session.
    Active,
}

#[cfg(feature = "defmt")]
impl defmt::Format for LinkState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            LinkState::Inactive => defmt::write!(f, "Inactive"),
            LinkState::Active => defmt::write!(f, "Active"),
        }
    }
}

/// Connectivity state query against the USB driver.
pub trait UsbLink {
    /// Current link state. Cheap enough to call once per blink half-cycle.
    fn state(&self) -> LinkState;
}

/// The status indicator output (typically an LED pad).
///
/// The indicator task is the only writer; boards should hand the pin to it
/// by value so the single-writer discipline is enforced by ownership.
pub trait IndicatorPin {
    /// Invert the output level.
    fn toggle(&mut self);
}

/// Blocking sleep supplied by the RTOS.
pub trait Sleep {
    /// Suspend the calling thread for at least `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);
}

/// Advisory cancellation token.
///
/// Cancellation is cooperative, never preemptive: loops in this crate check
/// the token only between sleep segments or once per tick, so a pending
/// request takes effect at the next such point and never mid-sleep.
pub trait CancelToken {
    /// Whether termination has been requested.
    fn is_cancelled(&self) -> bool;
}

/// Calendar fields as decomposed by the RTC driver.
///
/// The fields follow the driver's `struct tm` convention: the year is an
/// offset from 1900 and the month is zero-based. Consumers doing human
/// rendering apply the offsets themselves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    /// Years since 1900.
    pub years_from_1900: u16,
    /// Month, zero-based (0 = January).
    pub month0: u8,
    /// Day of month, 1-based.
    pub day: u8,
    /// Hour of day, 0..=23.
    pub hour: u8,
    /// Minute, 0..=59.
    pub minute: u8,
    /// Second, 0..=59.
    pub second: u8,
}

/// Real-time clock driver.
pub trait Rtc {
    /// Current time as Unix epoch seconds.
    fn unix_seconds(&mut self) -> u32;

    /// Current time decomposed into calendar fields.
    fn calendar(&mut self) -> Calendar;

    /// Set the clock from a Unix epoch seconds value.
    fn set_unix_seconds(&mut self, secs: u32);
}

/// An RGB565 color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    pub const RED: Rgb565 = Rgb565(0xF800);
    pub const GREEN: Rgb565 = Rgb565(0x07E0);
    pub const BLUE: Rgb565 = Rgb565(0x001F);
}

/// LCD display driver.
///
/// Rendering is best-effort at this layer: `write_str` has no error channel
/// because the application would not retry a failed glyph write anyway.
/// Initialization surfaces the controller status code so the user can see it.
pub trait Display {
    /// Run the controller initialization sequence and return its status code.
    fn init(&mut self) -> u16;

    /// Draw `text` with its top-left corner at `(x, y)` using the given
    /// foreground and background colors.
    fn write_str(&mut self, x: u16, y: u16, text: &str, fg: Rgb565, bg: Rgb565);

    /// Run the driver's built-in test pattern.
    fn self_test(&mut self);
}

/// Scheduling state of a registered thread, as named by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadState {
    /// Runnable, waiting for the CPU.
    Ready,
    /// Currently executing.
    Current,
    /// Explicitly suspended.
    Suspended,
    /// Sleeping on a timed wait.
    Sleeping,
    /// Blocked on a synchronization object.
    Waiting,
    /// Exited, waiting to be reclaimed.
    Final,
}

impl ThreadState {
    /// Human-readable state name, as printed by the `threads` command.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreadState::Ready => "READY",
            ThreadState::Current => "CURRENT",
            ThreadState::Suspended => "SUSPENDED",
            ThreadState::Sleeping => "SLEEPING",
            ThreadState::Waiting => "WAITING",
            ThreadState::Final => "FINAL",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ThreadState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.as_str());
    }
}

/// Snapshot of one registered thread, in kernel registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadInfo {
    /// Address of the thread control block.
    pub addr: u32,
    /// Saved stack pointer.
    pub stack_ptr: u32,
    /// Scheduling priority.
    pub priority: u32,
    /// Reference count. Includes the enumerator's own reference, which
    /// reporting code subtracts before printing.
    pub refs: u32,
    /// Scheduling state.
    pub state: ThreadState,
    /// Accumulated run time in system ticks.
    pub run_time: u32,
}

/// Allocator statistics reported by the kernel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeapStats {
    /// Number of free fragments in the heap.
    pub fragments: usize,
    /// Total free heap bytes across all fragments.
    pub free_total: usize,
    /// Free bytes remaining in the core (never-allocated) arena.
    pub core_free: usize,
}

/// Kernel introspection: allocator statistics and the thread registry.
///
/// Thread enumeration follows the kernel's first/next cursor convention:
///
/// ```rust
/// # use libboard::platform::{Kernel, ThreadInfo};
/// fn count_threads<K: Kernel>(kernel: &mut K) -> usize {
///     let mut n = 0;
///     let mut cursor = kernel.thread_first();
///     while let Some(thread) = cursor {
///         n += 1;
///         cursor = kernel.thread_next(&thread);
///     }
///     n
/// }
/// ```
pub trait Kernel {
    /// Current allocator statistics.
    fn heap_stats(&mut self) -> HeapStats;

    /// Oldest-registered live thread, or `None` when the registry is empty.
    fn thread_first(&mut self) -> Option<ThreadInfo>;

    /// Thread registered after `current`, or `None` at the end of the
    /// registry. Enumeration visits every live thread exactly once.
    fn thread_next(&mut self, current: &ThreadInfo) -> Option<ThreadInfo>;
}

/// Priority tier for spawned threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Normal,
    High,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Priority {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Priority::Low => defmt::write!(f, "Low"),
            Priority::Normal => defmt::write!(f, "Normal"),
            Priority::High => defmt::write!(f, "High"),
        }
    }
}

/// A serial-like byte stream, typically the USB CDC channel.
pub trait Stream {
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Read available bytes into `buf`, blocking until at least one byte
    /// arrives. `Ok(0)` means the transport closed.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write the whole of `buf` to the stream.
    fn write(&mut self, buf: &[u8]) -> Result<(), Self::Error>;
}

/// Creation, observation and teardown of the interactive session thread.
///
/// The host owns what a "session" physically is: it allocates the thread
/// with the requested stack budget and priority, runs the shell's REPL on
/// it, and reports termination once that loop returns. The supervisor only
/// ever sees the opaque handle.
pub trait SessionHost {
    /// Opaque handle to a running session.
    type Handle;
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Start a new interactive session on a dedicated thread.
    fn spawn(
        &mut self,
        stack_bytes: usize,
        priority: Priority,
    ) -> Result<Self::Handle, Self::Error>;

    /// Whether the session's loop has exited. Termination is voluntary:
    /// the host never preempts a running session.
    fn is_terminated(&mut self, handle: &Self::Handle) -> bool;

    /// Release the terminated session's thread resources back to the
    /// allocator. Must only be called after [`is_terminated`] reported true.
    ///
    /// [`is_terminated`]: SessionHost::is_terminated
    fn reclaim(&mut self, handle: Self::Handle);
}
