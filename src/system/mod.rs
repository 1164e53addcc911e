//! System utilities for demo-board firmware.
//!
//! This module holds the interactive side of the application: the command
//! shell engine and the standard command set wired against the
//! [`platform`](crate::platform) traits.
//!
//! # Usage
//!
//! ```rust
//! use libboard::system::commands;
//! use libboard::system::shell::Shell;
//! # use libboard::platform::{Calendar, Display, HeapStats, Kernel, Rgb565, Rtc, ThreadInfo};
//! # struct Board;
//! # impl Kernel for Board {
//! #     fn heap_stats(&mut self) -> HeapStats { HeapStats::default() }
//! #     fn thread_first(&mut self) -> Option<ThreadInfo> { None }
//! #     fn thread_next(&mut self, _c: &ThreadInfo) -> Option<ThreadInfo> { None }
//! # }
//! # impl Display for Board {
//! #     fn init(&mut self) -> u16 { 0 }
//! #     fn write_str(&mut self, _x: u16, _y: u16, _t: &str, _f: Rgb565, _b: Rgb565) {}
//! #     fn self_test(&mut self) {}
//! # }
//! # impl Rtc for Board {
//! #     fn unix_seconds(&mut self) -> u32 { 0 }
//! #     fn calendar(&mut self) -> Calendar { Calendar::default() }
//! #     fn set_unix_seconds(&mut self, _secs: u32) {}
//! # }
//!
//! let table = commands::standard_table::<Board>();
//! let mut shell = Shell::new(&table);
//!
//! let mut board = Board;
//! let mut out = String::new();
//! shell.input(&mut board, &mut out, b"mem\r");
//! ```

/// Line-oriented command shell engine.
pub mod shell;

/// The standard command set: `mem`, `threads`, `init`, `set_utime`.
pub mod commands;
