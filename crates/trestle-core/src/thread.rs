use std::thread::{self, ThreadId};

use crate::PreconditionViolation;

/// Identity of the thread that owns a tree.
///
/// Every public tree operation checks it first. Access from any other thread
/// is reported as a precondition violation; nothing is marshalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiThread {
    owner: ThreadId,
    enforce: bool,
}

impl UiThread {
    /// Binds to the calling thread.
    pub fn current() -> Self {
        Self {
            owner: thread::current().id(),
            enforce: true,
        }
    }

    /// Binds to the calling thread but never rejects access.
    pub fn unchecked() -> Self {
        Self {
            owner: thread::current().id(),
            enforce: false,
        }
    }

    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    pub fn is_current(&self) -> bool {
        thread::current().id() == self.owner
    }

    pub fn check(&self) -> Result<(), PreconditionViolation> {
        if !self.enforce {
            return Ok(());
        }
        let actual = thread::current().id();
        if actual == self.owner {
            Ok(())
        } else {
            Err(PreconditionViolation::WrongThread {
                owner: self.owner,
                actual,
            })
        }
    }
}
