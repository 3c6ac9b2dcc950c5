use core::fmt;
use core::sync::atomic::AtomicU8;
use core::sync::atomic::Ordering;

/// The lifecycle state of a `Coroutine`, as reported by `Coroutine::status()`.
///
/// A coroutine starts out `Suspended`, alternates between `Running` and
/// `Suspended` while it is driven with `resume()`, and ends up `Dead` exactly
/// once, either because its body returned, because its body faulted, or
/// because it was cancelled. `Dead` is absorbing.
///
/// Compare to the strings returned by Lua's `coroutine.status()`.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Status {
    /// Created but not started, or parked at a yield point.
    #[default]
    Suspended,
    /// The body is executing and the caller is blocked in `resume()`.
    Running,
    /// Finished. No further resumes will run any code.
    Dead,
}

impl Status {
    /// The display name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Suspended => "Suspended",
            Status::Running => "Running",
            Status::Dead => "Dead",
        }
    }

    fn to_bits(self) -> u8 {
        match self {
            Status::Suspended => 0,
            Status::Running => 1,
            Status::Dead => 2,
        }
    }

    fn from_bits(bits: u8) -> Self {
        match bits {
            0 => Status::Suspended,
            1 => Status::Running,
            _ => Status::Dead,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `Status` that both sides of the handshake can read and write.
///
/// Stores use `Release` and loads use `Acquire`, so a status written before a
/// channel handoff is visible to whoever receives that handoff.
#[derive(Debug, Default)]
pub(crate) struct StatusCell(AtomicU8);

impl StatusCell {
    pub(crate) fn get(&self) -> Status {
        Status::from_bits(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn set(&self, status: Status) {
        self.0.store(status.to_bits(), Ordering::Release);
    }

    /// Atomically moves from `from` to `to`. Returns the status that was
    /// actually observed if it wasn't `from`.
    pub(crate) fn transition(
        &self,
        from: Status,
        to: Status,
    ) -> Result<(), Status> {
        self.0
            .compare_exchange(
                from.to_bits(),
                to.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(Status::from_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_suspended() {
        assert_eq!(Status::default(), Status::Suspended);
        assert_eq!(StatusCell::default().get(), Status::Suspended);
    }

    #[test]
    fn display_names() {
        assert_eq!(Status::Suspended.to_string(), "Suspended");
        assert_eq!(Status::Running.to_string(), "Running");
        assert_eq!(Status::Dead.to_string(), "Dead");
    }

    #[test]
    fn transition_only_from_expected_state() {
        let cell = StatusCell::default();
        assert_eq!(cell.transition(Status::Suspended, Status::Running), Ok(()));
        assert_eq!(
            cell.transition(Status::Suspended, Status::Running),
            Err(Status::Running)
        );
        cell.set(Status::Dead);
        assert_eq!(
            cell.transition(Status::Suspended, Status::Running),
            Err(Status::Dead)
        );
        assert_eq!(cell.get(), Status::Dead);
    }
}
