//! # libboard - demo-board firmware application layer
//!
//! A portable application layer for microcontroller demo boards. The crate
//! owns the pieces of firmware that sit *above* the RTOS and the hardware
//! drivers: an interactive command shell, the supervisor that manages the
//! shell session's lifetime, a change-driven clock display loop and a
//! connectivity-aware status blinker. Everything below — thread creation,
//! sleeping, the USB serial channel, the LCD controller, the RTC — is reached
//! through the trait seams in [`platform`] and supplied by a board crate.
//!
//! ## Components
//!
//! - **[`system::shell`]**: line-oriented command shell with echo, backspace
//!   editing and an ordered command table
//! - **[`system::commands`]**: the standard command set (`mem`, `threads`,
//!   `init`, `set_utime`)
//! - **[`supervisor`]**: single-slot shell-session lifecycle state machine
//! - **[`clock`]**: renders wall-clock time to the display only when the
//!   seconds value changes
//! - **[`indicator`]**: background blink loop whose period tracks USB link
//!   state
//! - **[`app`]**: the main supervisory loop tying the above together
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libboard = "0.1.0"
//! ```
//!
//! A board crate implements the [`platform`] traits for its hardware, then
//! spawns the indicator loop on a dedicated thread and drives [`app::App`]
//! from its main thread:
//!
//! ```rust,no_run
//! use libboard::app::App;
//! use libboard::platform::prelude::*;
//! # struct Board;
//! # impl libboard::platform::SessionHost for Board {
//! #     type Handle = ();
//! #     type Error = ();
//! #     fn spawn(&mut self, _stack_bytes: usize, _priority: libboard::platform::Priority)
//! #         -> Result<(), ()> { Ok(()) }
//! #     fn is_terminated(&mut self, _handle: &()) -> bool { false }
//! #     fn reclaim(&mut self, _handle: ()) {}
//! # }
//! # struct Link;
//! # impl UsbLink for Link {
//! #     fn state(&self) -> libboard::platform::LinkState {
//! #         libboard::platform::LinkState::Inactive
//! #     }
//! # }
//! # struct Clock;
//! # impl Rtc for Clock {
//! #     fn unix_seconds(&mut self) -> u32 { 0 }
//! #     fn calendar(&mut self) -> libboard::platform::Calendar {
//! #         libboard::platform::Calendar::default()
//! #     }
//! #     fn set_unix_seconds(&mut self, _secs: u32) {}
//! # }
//! # struct Lcd;
//! # impl Display for Lcd {
//! #     fn init(&mut self) -> u16 { 0 }
//! #     fn write_str(&mut self, _x: u16, _y: u16, _text: &str,
//! #         _fg: libboard::platform::Rgb565, _bg: libboard::platform::Rgb565) {}
//! #     fn self_test(&mut self) {}
//! # }
//! # struct Timer;
//! # impl Sleep for Timer { fn sleep_ms(&mut self, _ms: u32) {} }
//! # struct Token;
//! # impl CancelToken for Token { fn is_cancelled(&self) -> bool { true } }
//!
//! let mut host = Board;
//! let link = Link;
//! let mut rtc = Clock;
//! let mut display = Lcd;
//! let mut timer = Timer;
//! let token = Token;
//!
//! let mut app = App::new();
//! app.run(&mut host, &link, &mut rtc, &mut display, &mut timer, &token)
//!     .unwrap();
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Any RTOS that can expose thread spawn/join, sleep and a serial stream
//! - Host builds (with the `std` feature) for tests and simulation
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Trait seams for the external collaborators: RTOS services, USB link,
/// RTC, display and the session host.
///
/// Board crates implement these traits for their hardware; the rest of the
/// crate is written purely against them.
pub mod platform;

/// System utilities: the command shell engine and the standard command set.
pub mod system;

/// Shell-session lifecycle supervisor.
pub mod supervisor;

/// Change-driven clock display loop.
pub mod clock;

/// Connectivity-aware status blinker.
pub mod indicator;

/// The main supervisory loop.
pub mod app;
