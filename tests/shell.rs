use libboard::platform::{
    Calendar, Display, HeapStats, Kernel, Rgb565, Rtc, Stream, ThreadInfo, ThreadState,
};
use libboard::system::commands::standard_table;
use libboard::system::shell::{run_session, Command, CommandStatus, Shell};

use core::fmt::Write as _;
use std::collections::VecDeque;

// -------------------------
// Recording board mock
// -------------------------

#[derive(Default)]
struct MockBoard {
    heap: HeapStats,
    threads: Vec<ThreadInfo>,
    init_status: u16,
    init_calls: usize,
    display_writes: Vec<(u16, u16, String)>,
    unix: u32,
    calendar: Calendar,
    set_times: Vec<u32>,
}

impl Kernel for MockBoard {
    fn heap_stats(&mut self) -> HeapStats {
        self.heap
    }

    fn thread_first(&mut self) -> Option<ThreadInfo> {
        self.threads.first().copied()
    }

    fn thread_next(&mut self, current: &ThreadInfo) -> Option<ThreadInfo> {
        let pos = self.threads.iter().position(|t| t.addr == current.addr)?;
        self.threads.get(pos + 1).copied()
    }
}

impl Display for MockBoard {
    fn init(&mut self) -> u16 {
        self.init_calls += 1;
        self.init_status
    }

    fn write_str(&mut self, x: u16, y: u16, text: &str, _fg: Rgb565, _bg: Rgb565) {
        self.display_writes.push((x, y, text.to_string()));
    }

    fn self_test(&mut self) {}
}

impl Rtc for MockBoard {
    fn unix_seconds(&mut self) -> u32 {
        self.unix
    }

    fn calendar(&mut self) -> Calendar {
        self.calendar
    }

    fn set_unix_seconds(&mut self, secs: u32) {
        self.set_times.push(secs);
    }
}

fn run_line(board: &mut MockBoard, line: &str) -> String {
    let table = standard_table::<MockBoard>();
    let mut shell = Shell::new(&table);
    shell.set_echo(false);

    let mut out = String::new();
    shell.input(board, &mut out, line.as_bytes());
    shell.input(board, &mut out, b"\r");
    out
}

// -------------------------
// Command contract tests
// -------------------------

#[test]
fn mem_reports_allocator_statistics() {
    let mut board = MockBoard {
        heap: HeapStats {
            fragments: 3,
            free_total: 8192,
            core_free: 1024,
        },
        ..Default::default()
    };

    let out = run_line(&mut board, "mem");
    assert_eq!(
        out,
        "core free memory : 1024 bytes\r\nheap fragments   : 3\r\nheap free total  : 8192 bytes\r\n"
    );
}

#[test]
fn mem_with_any_argument_emits_usage_only() {
    let mut board = MockBoard::default();
    let out = run_line(&mut board, "mem verbose");
    assert_eq!(out, "Usage: mem\r\n");
    assert!(board.display_writes.is_empty());
    assert!(board.set_times.is_empty());
}

#[test]
fn threads_lists_single_thread_and_terminates() {
    let mut board = MockBoard {
        threads: vec![ThreadInfo {
            addr: 0x2000_1000,
            stack_ptr: 0x2000_1800,
            priority: 64,
            refs: 2,
            state: ThreadState::Current,
            run_time: 12345,
        }],
        ..Default::default()
    };

    let out = run_line(&mut board, "threads");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2, "header plus exactly one thread line");
    assert_eq!(lines[0], "    addr    stack prio refs     state time");
    // Printed refcount excludes the enumerator's own reference.
    assert_eq!(lines[1], "20001000 20001800   64    1   CURRENT 12345");
}

#[test]
fn threads_lists_in_registry_order() {
    let first = ThreadInfo {
        addr: 0x1000,
        stack_ptr: 0x1100,
        priority: 64,
        refs: 1,
        state: ThreadState::Ready,
        run_time: 10,
    };
    let second = ThreadInfo {
        addr: 0x2000,
        stack_ptr: 0x2100,
        priority: 32,
        refs: 1,
        state: ThreadState::Sleeping,
        run_time: 20,
    };
    let mut board = MockBoard {
        threads: vec![first, second],
        ..Default::default()
    };

    let out = run_line(&mut board, "threads");
    let first_at = out.find("00001000").expect("first thread printed");
    let second_at = out.find("00002000").expect("second thread printed");
    assert!(first_at < second_at, "oldest-registered thread prints first");
}

#[test]
fn threads_with_any_argument_emits_usage_only() {
    let mut board = MockBoard {
        threads: vec![ThreadInfo {
            addr: 1,
            stack_ptr: 1,
            priority: 1,
            refs: 1,
            state: ThreadState::Ready,
            run_time: 0,
        }],
        ..Default::default()
    };

    let out = run_line(&mut board, "threads all");
    assert_eq!(out, "Usage: threads\r\n");
}

#[test]
fn init_reruns_lcd_initialization_and_prints_status() {
    let mut board = MockBoard {
        init_status: 0x9341,
        ..Default::default()
    };

    let out = run_line(&mut board, "init");
    assert_eq!(board.init_calls, 1);
    assert_eq!(out, "\r\nTry to init LCD\r\nLCD status 0x9341\r\n");
}

#[test]
fn init_status_is_zero_padded_hex() {
    let mut board = MockBoard {
        init_status: 0x7,
        ..Default::default()
    };

    let out = run_line(&mut board, "init");
    assert!(out.contains("LCD status 0x0007"));
}

#[test]
fn set_utime_forwards_value_and_echoes_it() {
    let mut board = MockBoard::default();
    let out = run_line(&mut board, "set_utime 1700000000");
    assert_eq!(board.set_times, vec![1_700_000_000]);
    assert_eq!(out, "Set new time 1700000000\r\n");
}

#[test]
fn set_utime_is_idempotent_under_reinvocation() {
    let mut board = MockBoard::default();
    run_line(&mut board, "set_utime 1700000000");
    run_line(&mut board, "set_utime 1700000000");
    // The driver receives the literal value twice and nothing else changes.
    assert_eq!(board.set_times, vec![1_700_000_000, 1_700_000_000]);
}

#[test]
fn set_utime_rejects_non_numeric_value() {
    let mut board = MockBoard::default();
    let out = run_line(&mut board, "set_utime abc");
    assert_eq!(out, "Usage: set_utime <unix time value>\r\n");
    assert!(board.set_times.is_empty());
}

#[test]
fn set_utime_rejects_zero() {
    let mut board = MockBoard::default();
    let out = run_line(&mut board, "set_utime 0");
    assert_eq!(out, "Usage: set_utime <unix time value>\r\n");
    assert!(board.set_times.is_empty());
}

#[test]
fn set_utime_rejects_wrong_argument_count() {
    let mut board = MockBoard::default();

    let out = run_line(&mut board, "set_utime");
    assert_eq!(out, "Usage: set_utime <unix time value>\r\n");

    let out = run_line(&mut board, "set_utime 1 2");
    assert_eq!(out, "Usage: set_utime <unix time value>\r\n");

    assert!(board.set_times.is_empty());
}

// -------------------------
// Engine behavior tests
// -------------------------

#[test]
fn unknown_command_is_reported_by_the_shell() {
    let mut board = MockBoard::default();
    let out = run_line(&mut board, "frobnicate");
    assert_eq!(
        out,
        "Unknown command. Type 'help' to see available commands.\r\n"
    );
}

#[test]
fn help_lists_commands_in_table_order() {
    let mut board = MockBoard::default();
    let out = run_line(&mut board, "help");

    let mem_at = out.find("mem").unwrap();
    let threads_at = out.find("threads").unwrap();
    let init_at = out.find("init").unwrap();
    let set_utime_at = out.find("set_utime").unwrap();
    assert!(mem_at < threads_at && threads_at < init_at && init_at < set_utime_at);
}

#[test]
fn empty_and_whitespace_lines_produce_no_output() {
    let mut board = MockBoard::default();
    assert_eq!(run_line(&mut board, ""), "");
    assert_eq!(run_line(&mut board, "   "), "");
}

#[test]
fn backspace_edits_the_pending_line() {
    let table = standard_table::<MockBoard>();
    let mut shell = Shell::new(&table);
    shell.set_echo(false);
    let mut board = MockBoard::default();
    let mut out = String::new();

    // "memx" then backspace leaves "mem".
    shell.input(&mut board, &mut out, b"memx\x08\r");
    assert!(out.contains("core free memory"));
}

#[test]
fn echo_reflects_typed_characters() {
    let table = standard_table::<MockBoard>();
    let mut shell = Shell::new(&table);
    let mut board = MockBoard::default();
    let mut out = String::new();

    shell.input(&mut board, &mut out, b"mem");
    assert_eq!(out, "mem");
}

#[test]
fn overlong_line_is_truncated_not_overflowed() {
    let table = standard_table::<MockBoard>();
    let mut shell = Shell::new(&table);
    shell.set_echo(false);
    let mut board = MockBoard::default();
    let mut out = String::new();

    let long = vec![b'a'; 4 * libboard::system::shell::MAX_LINE];
    shell.input(&mut board, &mut out, &long);
    shell.input(&mut board, &mut out, b"\r");
    assert!(out.contains("Unknown command"));
}

// -------------------------
// Session loop tests
// -------------------------

struct MockStream {
    reads: VecDeque<Vec<u8>>,
    written: String,
}

impl Stream for MockStream {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        match self.reads.pop_front() {
            Some(chunk) => {
                buf[..chunk.len()].copy_from_slice(&chunk);
                Ok(chunk.len())
            }
            None => Ok(0), // transport closed
        }
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        self.written.push_str(&String::from_utf8_lossy(buf));
        Ok(())
    }
}

struct NeverCancel;

impl libboard::platform::CancelToken for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

struct AlwaysCancel;

impl libboard::platform::CancelToken for AlwaysCancel {
    fn is_cancelled(&self) -> bool {
        true
    }
}

#[test]
fn session_runs_until_transport_closes() {
    let table = standard_table::<MockBoard>();
    let mut shell = Shell::new(&table);
    shell.set_echo(false);
    let mut board = MockBoard::default();

    let mut stream = MockStream {
        reads: VecDeque::from([b"mem".to_vec(), b"\r".to_vec()]),
        written: String::new(),
    };

    run_session(&mut shell, &mut board, &mut stream, &NeverCancel).unwrap();
    assert!(stream.written.contains("board shell"));
    assert!(stream.written.contains("core free memory"));
}

#[test]
fn session_observes_cancellation_between_reads() {
    let table = standard_table::<MockBoard>();
    let mut shell = Shell::new(&table);
    let mut board = MockBoard::default();

    let mut stream = MockStream {
        reads: VecDeque::from([b"mem\r".to_vec()]),
        written: String::new(),
    };

    run_session(&mut shell, &mut board, &mut stream, &AlwaysCancel).unwrap();
    // Cancelled before the first read: banner only, command never ran.
    assert!(stream.written.contains("board shell"));
    assert!(!stream.written.contains("core free memory"));
}

#[test]
fn custom_command_tables_dispatch_by_exact_name() {
    fn beep(_target: &mut u32, out: &mut dyn core::fmt::Write, _argc: usize, _argv: &[&str]) -> CommandStatus {
        let _ = out.write_str("beep\r\n");
        CommandStatus::Ok
    }

    let table = [Command {
        name: "beep",
        description: "Beep",
        handler: beep,
    }];
    let mut shell = Shell::new(&table);
    shell.set_echo(false);
    let mut target = 0u32;
    let mut out = String::new();

    shell.input(&mut target, &mut out, b"bee\r");
    assert!(out.contains("Unknown command"));

    out.clear();
    shell.input(&mut target, &mut out, b"beep\r");
    assert_eq!(out, "beep\r\n");
}
