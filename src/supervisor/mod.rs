//! # Shell-session lifecycle supervisor
//!
//! At most one interactive shell session exists at a time. The supervisor
//! owns that single slot and advances it once per main-loop tick:
//!
//! * `Absent`: no session. If the transport reports active, spawn one on a
//!   dedicated thread with a fixed stack budget and priority.
//! * `Running`: a session thread exists. The supervisor only observes it;
//!   it never preempts a running session.
//! * `Terminated`: the session's loop has exited (transport closed, stream
//!   error or explicit quit) but its thread resources are still allocated.
//!   The tick that observes this reclaims them and clears the slot.
//!
//! Start and reclaim checks are evaluated at most once per tick, start
//! first: a slot reclaimed on some tick is not refilled until the next tick
//! re-observes the ready condition.
//!
//! Session creation can fail under resource exhaustion. The supervisor
//! retries on subsequent ticks, bounded by [`MAX_SPAWN_ATTEMPTS`]
//! consecutive failures; after that [`tick`](Supervisor::tick) returns
//! [`Error::SpawnFailed`] and the caller treats the condition as fatal.
//! A spawn failure is never silently dropped.

use crate::platform::{Priority, SessionHost};

/// Stack budget for the session thread, in bytes.
pub const SESSION_STACK_BYTES: usize = 2048;

/// Priority tier for the session thread.
pub const SESSION_PRIORITY: Priority = Priority::Normal;

/// Consecutive spawn failures tolerated before [`tick`](Supervisor::tick)
/// reports [`Error::SpawnFailed`].
pub const MAX_SPAWN_ATTEMPTS: u8 = 3;

/// Observable lifecycle state of the session slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session exists.
    Absent,
    /// A session thread is running.
    Running,
    /// The session has exited but its resources are not yet reclaimed.
    Terminated,
}

#[cfg(feature = "defmt")]
impl defmt::Format for SessionState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SessionState::Absent => defmt::write!(f, "Absent"),
            SessionState::Running => defmt::write!(f, "Running"),
            SessionState::Terminated => defmt::write!(f, "Terminated"),
        }
    }
}

/// Represents an error that can occur while supervising the session.
#[derive(Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// Session creation failed [`MAX_SPAWN_ATTEMPTS`] times in a row.
    /// Carries the host error from the last attempt.
    SpawnFailed(E),
}

/// The session slot. Exclusive owner of the session handle; holding the
/// handle inside the variant makes "at most one session" a type invariant.
enum Slot<H> {
    Absent,
    Running(H),
    Terminated(H),
}

/// The supervisor.
///
/// Generic over the [`SessionHost`] so tests can drive it with a mock host
/// and boards with their RTOS binding.
pub struct Supervisor<H: SessionHost> {
    slot: Slot<H::Handle>,
    spawn_failures: u8,
}

impl<H: SessionHost> core::fmt::Debug for Supervisor<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Supervisor")
            .field("state", &self.state())
            .field("spawn_failures", &self.spawn_failures)
            .finish()
    }
}

impl<H: SessionHost> Default for Supervisor<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: SessionHost> Supervisor<H> {
    /// Create a supervisor with an empty slot.
    pub fn new() -> Self {
        Self {
            slot: Slot::Absent,
            spawn_failures: 0,
        }
    }

    /// Current lifecycle state of the slot.
    pub fn state(&self) -> SessionState {
        match self.slot {
            Slot::Absent => SessionState::Absent,
            Slot::Running(_) => SessionState::Running,
            Slot::Terminated(_) => SessionState::Terminated,
        }
    }

    /// Advance the state machine by one tick.
    ///
    /// First refreshes the slot against the host (a running session whose
    /// loop has exited becomes `Terminated`), then evaluates the start and
    /// reclaim checks, start taking priority. Reclamation happens on the
    /// same tick that observes termination.
    pub fn tick(&mut self, host: &mut H, link_active: bool) -> Result<(), Error<H::Error>> {
        let exited = match &self.slot {
            Slot::Running(handle) => host.is_terminated(handle),
            _ => false,
        };
        if exited {
            if let Slot::Running(handle) = core::mem::replace(&mut self.slot, Slot::Absent) {
                self.slot = Slot::Terminated(handle);
            }
        }

        match core::mem::replace(&mut self.slot, Slot::Absent) {
            Slot::Absent if link_active => match host.spawn(SESSION_STACK_BYTES, SESSION_PRIORITY)
            {
                Ok(handle) => {
                    self.spawn_failures = 0;
                    self.slot = Slot::Running(handle);
                }
                Err(err) => {
                    self.spawn_failures = self.spawn_failures.saturating_add(1);
                    if self.spawn_failures >= MAX_SPAWN_ATTEMPTS {
                        return Err(Error::SpawnFailed(err));
                    }
                    #[cfg(feature = "defmt")]
                    defmt::warn!(
                        "shell session spawn failed (attempt {} of {})",
                        self.spawn_failures,
                        MAX_SPAWN_ATTEMPTS
                    );
                }
            },
            Slot::Terminated(handle) => {
                // Recovers the memory of the previous session; the cleared
                // slot triggers a new spawn on a later tick.
                host.reclaim(handle);
            }
            other => self.slot = other,
        }

        Ok(())
    }
}
