//! Command shell engine for embedded systems.
//!
//! The shell processes transport bytes one at a time, maintains a fixed-size
//! line buffer with echo and backspace editing, tokenizes completed lines on
//! whitespace and dispatches them against an ordered command table. Unmatched
//! input is reported by the shell itself, not by the table; a built-in `help`
//! lists the table in registration order.
//!
//! The engine owns no I/O. Input arrives through [`Shell::input`], output
//! leaves through any [`core::fmt::Write`] sink, and [`run_session`] glues
//! both ends of a [`Stream`] into a blocking read-eval-print loop suitable
//! for a dedicated session thread.
//!
//! # Zero allocation
//!
//! Line and argument storage are fixed-capacity `heapless` buffers sized by
//! [`MAX_LINE`] and [`MAX_ARGS`]. A line longer than the buffer is discarded
//! beyond the capacity limit; overflow never writes past it.
//!
//! # Examples
//!
//! ```rust
//! use libboard::system::shell::{Command, CommandStatus, Shell};
//! # use core::fmt::Write as _;
//!
//! fn hello(_target: &mut (), out: &mut dyn core::fmt::Write,
//!          _argc: usize, _argv: &[&str]) -> CommandStatus {
//!     let _ = out.write_str("hello\r\n");
//!     CommandStatus::Ok
//! }
//!
//! let table = [Command { name: "hello", description: "Say hello", handler: hello }];
//! let mut shell = Shell::new(&table);
//! shell.set_echo(false);
//!
//! let mut out = String::new();
//! shell.input(&mut (), &mut out, b"hello\r");
//! assert!(out.contains("hello"));
//! ```

use core::fmt;
use core::fmt::Write as _;
use core::str;

use heapless::Vec;

use crate::platform::{CancelToken, Stream};

/// Maximum length of one command line in bytes.
pub const MAX_LINE: usize = 128;

/// Maximum number of whitespace-separated tokens per line, command name
/// included.
pub const MAX_ARGS: usize = 8;

/// ASCII backspace character (0x08).
pub const ASCII_BACKSPACE: u8 = 0x08;
/// ASCII line feed character (0x0A).
pub const ASCII_LF: u8 = 0x0A;
/// ASCII carriage return character (0x0D).
pub const ASCII_CR: u8 = 0x0D;
/// ASCII delete character (0x7F).
pub const ASCII_DEL: u8 = 0x7F;

/// Outcome of one command handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The command ran.
    Ok,
    /// The arguments were rejected; the handler emitted its usage line and
    /// performed no other action.
    Usage,
}

#[cfg(feature = "defmt")]
impl defmt::Format for CommandStatus {
    fn format(&self, f: defmt::Formatter) {
        match self {
            CommandStatus::Ok => defmt::write!(f, "Ok"),
            CommandStatus::Usage => defmt::write!(f, "Usage"),
        }
    }
}

/// Function signature for command handlers.
///
/// Handlers receive the platform target the command operates on, an output
/// sink for the response, and the parsed arguments. `argv[0]` is always the
/// command name and `argc == argv.len()`.
pub type CommandFn<P> =
    fn(target: &mut P, out: &mut dyn fmt::Write, argc: usize, argv: &[&str]) -> CommandStatus;

/// One entry of the command table.
///
/// Tables are ordered slices; insertion order defines `help` listing order.
/// Lookup is by exact name match.
pub struct Command<P> {
    /// The command name as typed by the user. Case-sensitive.
    pub name: &'static str,
    /// One-line description shown by `help`.
    pub description: &'static str,
    /// The function implementing the command.
    pub handler: CommandFn<P>,
}

impl<P> Clone for Command<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Command<P> {}

impl<P> fmt::Debug for Command<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// The shell engine: line buffer, editing state and command dispatch.
pub struct Shell<'c, P> {
    commands: &'c [Command<P>],
    line: Vec<u8, MAX_LINE>,
    echo_enabled: bool,
}

impl<P> fmt::Debug for Shell<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("commands", &self.commands.len())
            .field("pending", &self.line.len())
            .field("echo_enabled", &self.echo_enabled)
            .finish()
    }
}

impl<'c, P> Shell<'c, P> {
    /// Create a shell over a command table. Echo starts enabled.
    pub fn new(commands: &'c [Command<P>]) -> Self {
        Self {
            commands,
            line: Vec::new(),
            echo_enabled: true,
        }
    }

    /// Enable or disable input echo.
    ///
    /// Echo is for interactive use over a terminal; automated drivers
    /// (and tests) usually turn it off.
    pub fn set_echo(&mut self, enabled: bool) {
        self.echo_enabled = enabled;
    }

    /// Write the banner and the first prompt.
    pub fn greet(&self, out: &mut dyn fmt::Write) {
        let _ = out.write_str("\r\nboard shell - type 'help' for commands\r\n");
        self.prompt(out);
    }

    /// Process raw transport bytes.
    ///
    /// CR or LF completes the pending line, executes it and prompts again.
    /// Backspace and DEL remove the last pending character with terminal
    /// feedback. Printable ASCII is buffered (and echoed); other control
    /// characters are ignored. Characters beyond [`MAX_LINE`] are dropped.
    pub fn input(&mut self, target: &mut P, out: &mut dyn fmt::Write, data: &[u8]) {
        for &byte in data {
            match byte {
                ASCII_CR | ASCII_LF => {
                    if self.echo_enabled {
                        let _ = out.write_str("\r\n");
                    }
                    self.execute(target, out);
                    self.line.clear();
                    self.prompt(out);
                }
                ASCII_BACKSPACE | ASCII_DEL => {
                    if self.line.pop().is_some() && self.echo_enabled {
                        let _ = out.write_str("\x08 \x08");
                    }
                }
                0x20..=0x7E => {
                    if self.line.push(byte).is_ok() && self.echo_enabled {
                        let _ = out.write_char(byte as char);
                    }
                }
                _ => {}
            }
        }
    }

    fn prompt(&self, out: &mut dyn fmt::Write) {
        if self.echo_enabled {
            let _ = out.write_str("> ");
        }
    }

    /// Tokenize and dispatch the pending line.
    fn execute(&mut self, target: &mut P, out: &mut dyn fmt::Write) {
        // Buffered bytes are printable ASCII by construction.
        let Ok(line) = str::from_utf8(&self.line) else {
            return;
        };

        let mut argv: Vec<&str, MAX_ARGS> = Vec::new();
        for token in line.split_whitespace() {
            if argv.push(token).is_err() {
                let _ = out.write_str("Too many arguments.\r\n");
                return;
            }
        }
        let Some(&name) = argv.first() else {
            return;
        };

        if let Some(cmd) = self.commands.iter().find(|cmd| cmd.name == name) {
            let _ = (cmd.handler)(target, out, argv.len(), &argv);
        } else if name == "help" {
            let _ = out.write_str("Available commands:\r\n");
            for cmd in self.commands {
                let _ = out.write_str(cmd.name);
                let _ = out.write_str("\t\t");
                let _ = out.write_str(cmd.description);
                let _ = out.write_str("\r\n");
            }
        } else {
            let _ = out.write_str("Unknown command. Type 'help' to see available commands.\r\n");
        }
    }
}

/// Adapter exposing a [`Stream`] as a [`core::fmt::Write`] sink.
///
/// Stream write errors surface as [`fmt::Error`]; callers treat shell output
/// as best-effort and pick the failure up on the next stream read instead.
#[derive(Debug)]
pub struct StreamWriter<'a, S: Stream> {
    stream: &'a mut S,
}

impl<'a, S: Stream> StreamWriter<'a, S> {
    /// Wrap a stream.
    pub fn new(stream: &'a mut S) -> Self {
        Self { stream }
    }
}

impl<S: Stream> fmt::Write for StreamWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.stream.write(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Run one interactive session over a stream until it ends.
///
/// This is the body of the session thread: a blocking read-eval-print loop
/// that feeds transport bytes to the shell and returns when the transport
/// closes (`read` yields 0), the transport errors, or cancellation is
/// requested. Termination is always voluntary — the loop checks the token
/// only between reads, never mid-read.
pub fn run_session<P, S, C>(
    shell: &mut Shell<'_, P>,
    target: &mut P,
    stream: &mut S,
    cancel: &C,
) -> Result<(), S::Error>
where
    S: Stream,
    C: CancelToken,
{
    {
        let mut out = StreamWriter::new(stream);
        shell.greet(&mut out);
    }

    let mut buf = [0u8; 32];
    loop {
        if cancel.is_cancelled() {
            return Ok(());
        }
        let n = stream.read(&mut buf)?;
        if n == 0 {
            return Ok(());
        }
        let (chunk, _) = buf.split_at(n);
        let mut out = StreamWriter::new(stream);
        shell.input(target, &mut out, chunk);
    }
}
