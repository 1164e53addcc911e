//! The standard command set.
//!
//! Four commands wired against the [`platform`](crate::platform) traits:
//!
//! | Command | Arguments | Effect |
//! |---------|-----------|--------|
//! | `mem` | none | print allocator fragmentation and free-byte counters |
//! | `threads` | none | list every registered thread, oldest first |
//! | `init` | none | re-run LCD initialization and print its status code |
//! | `set_utime` | `<unix-seconds>` | set the RTC from an epoch value |
//!
//! Argument errors are recovered locally: the handler emits exactly its
//! usage line and performs no other action. Hardware status (the LCD init
//! code) is printed to the user, never treated as fatal.

use core::fmt;
use core::fmt::Write as _;

use crate::platform::{Display, Kernel, Rtc};
use crate::system::shell::{Command, CommandStatus};

/// Build the standard command table.
///
/// Entries appear in the order they are listed by `help`: `mem`, `threads`,
/// `init`, `set_utime`. The target type must supply kernel introspection,
/// the display driver and the RTC driver.
pub const fn standard_table<P>() -> [Command<P>; 4]
where
    P: Kernel + Display + Rtc,
{
    [
        Command {
            name: "mem",
            description: "Show allocator statistics",
            handler: cmd_mem::<P>,
        },
        Command {
            name: "threads",
            description: "List registered threads",
            handler: cmd_threads::<P>,
        },
        Command {
            name: "init",
            description: "Re-run LCD initialization",
            handler: cmd_init::<P>,
        },
        Command {
            name: "set_utime",
            description: "Set the RTC from Unix epoch seconds",
            handler: cmd_set_utime::<P>,
        },
    ]
}

/// `mem` — allocator statistics.
fn cmd_mem<P: Kernel>(
    target: &mut P,
    out: &mut dyn fmt::Write,
    argc: usize,
    _argv: &[&str],
) -> CommandStatus {
    if argc > 1 {
        let _ = out.write_str("Usage: mem\r\n");
        return CommandStatus::Usage;
    }
    let stats = target.heap_stats();
    let _ = write!(out, "core free memory : {} bytes\r\n", stats.core_free);
    let _ = write!(out, "heap fragments   : {}\r\n", stats.fragments);
    let _ = write!(out, "heap free total  : {} bytes\r\n", stats.free_total);
    CommandStatus::Ok
}

/// `threads` — one line per registered thread, oldest first.
///
/// The printed reference count excludes the enumerator's own reference.
fn cmd_threads<P: Kernel>(
    target: &mut P,
    out: &mut dyn fmt::Write,
    argc: usize,
    _argv: &[&str],
) -> CommandStatus {
    if argc > 1 {
        let _ = out.write_str("Usage: threads\r\n");
        return CommandStatus::Usage;
    }
    let _ = out.write_str("    addr    stack prio refs     state time\r\n");
    let mut cursor = target.thread_first();
    while let Some(thread) = cursor {
        let _ = write!(
            out,
            "{:08x} {:08x} {:4} {:4} {:>9} {}\r\n",
            thread.addr,
            thread.stack_ptr,
            thread.priority,
            thread.refs.saturating_sub(1),
            thread.state.as_str(),
            thread.run_time,
        );
        cursor = target.thread_next(&thread);
    }
    CommandStatus::Ok
}

/// `init` — re-run the LCD initialization sequence.
fn cmd_init<P: Display>(
    target: &mut P,
    out: &mut dyn fmt::Write,
    _argc: usize,
    _argv: &[&str],
) -> CommandStatus {
    let _ = out.write_str("\r\nTry to init LCD\r\n");
    let status = target.init();
    let _ = write!(out, "LCD status 0x{status:04x}\r\n");
    CommandStatus::Ok
}

/// `set_utime <unix-seconds>` — set the RTC.
///
/// Exactly one argument, a non-zero decimal value. Zero and non-numeric
/// input are rejected with the usage line and no clock write.
fn cmd_set_utime<P: Rtc>(
    target: &mut P,
    out: &mut dyn fmt::Write,
    argc: usize,
    argv: &[&str],
) -> CommandStatus {
    let parsed = if argc == 2 {
        argv[1].parse::<u32>().ok().filter(|&secs| secs != 0)
    } else {
        None
    };
    let Some(secs) = parsed else {
        let _ = out.write_str("Usage: set_utime <unix time value>\r\n");
        return CommandStatus::Usage;
    };
    target.set_unix_seconds(secs);
    let _ = write!(out, "Set new time {secs}\r\n");
    CommandStatus::Ok
}
