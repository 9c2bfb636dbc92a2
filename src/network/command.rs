//! Command handles
//!
//! A [`Command`] is one pending operation: the argument list queued on a
//! connection and a slot for its reply. The connection owns the queues; the
//! handle only shares the slot and keeps a weak link back to the pipeline so
//! that reading the result can drive the network.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use bytes::Bytes;

use crate::error::{RespError, Result};
use crate::protocol::Value;

/// Where a command is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    /// In the send queue; nothing written yet
    Queued,

    /// Written to the stream, reply not read yet
    Sent,

    /// Reply read and cached
    Resolved,
}

#[derive(Debug)]
enum Progress {
    Queued,
    Sent,
    Resolved(Value),
}

/// Shared state of one command, referenced from a queue and from handles
#[derive(Debug)]
pub(crate) struct Slot {
    args: Vec<Bytes>,
    progress: RefCell<Progress>,
}

impl Slot {
    pub(crate) fn new(args: Vec<Bytes>) -> Rc<Self> {
        Rc::new(Self {
            args,
            progress: RefCell::new(Progress::Queued),
        })
    }

    pub(crate) fn args(&self) -> &[Bytes] {
        &self.args
    }

    pub(crate) fn state(&self) -> CommandState {
        match *self.progress.borrow() {
            Progress::Queued => CommandState::Queued,
            Progress::Sent => CommandState::Sent,
            Progress::Resolved(_) => CommandState::Resolved,
        }
    }

    pub(crate) fn mark_sent(&self) {
        *self.progress.borrow_mut() = Progress::Sent;
    }

    pub(crate) fn resolve(&self, value: Value) {
        *self.progress.borrow_mut() = Progress::Resolved(value);
    }

    pub(crate) fn cached(&self) -> Option<Value> {
        match &*self.progress.borrow() {
            Progress::Resolved(value) => Some(value.clone()),
            _ => None,
        }
    }
}

/// The pipeline operations a command handle can trigger
pub(crate) trait Resolver {
    /// Write every queued command up to and including `target`
    fn flush_up_to(&mut self, target: &Rc<Slot>) -> Result<()>;

    /// Make sure `target` is sent, then read replies up to and including it
    fn resolve_up_to(&mut self, target: &Rc<Slot>) -> Result<Value>;
}

/// Handle to a queued command
///
/// Cloning the handle shares the same command. Handles never keep the
/// connection alive; once it is dropped, unresolved handles report
/// [`RespError::ConnectionClosed`]. Closing a connection resolves every
/// command first, so results stay readable afterwards.
#[derive(Clone)]
pub struct Command {
    slot: Rc<Slot>,
    pipeline: Weak<RefCell<dyn Resolver>>,
}

impl Command {
    pub(crate) fn new(slot: Rc<Slot>, pipeline: Weak<RefCell<dyn Resolver>>) -> Self {
        Self { slot, pipeline }
    }

    /// Arguments as they will be written, operation name first
    pub fn args(&self) -> &[Bytes] {
        self.slot.args()
    }

    /// Operation name (the first argument), lossily decoded
    pub fn name(&self) -> Option<String> {
        self.slot
            .args()
            .first()
            .map(|name| String::from_utf8_lossy(name).into_owned())
    }

    pub fn state(&self) -> CommandState {
        self.slot.state()
    }

    pub fn is_resolved(&self) -> bool {
        self.state() == CommandState::Resolved
    }

    /// Write this command (and everything queued before it) now
    ///
    /// A no-op once the command has left the send queue.
    pub fn send(&self) -> Result<()> {
        if self.state() != CommandState::Queued {
            return Ok(());
        }
        let pipeline = self.pipeline.upgrade().ok_or(RespError::ConnectionClosed)?;
        let result = pipeline.borrow_mut().flush_up_to(&self.slot);
        result
    }

    /// The reply, reading it from the stream if needed
    ///
    /// Blocks until the reply has arrived. An `Error` reply is returned as an
    /// ordinary [`Value::Error`]; it only fails once used as data.
    pub fn result(&self) -> Result<Value> {
        if let Some(value) = self.slot.cached() {
            return Ok(value);
        }
        let pipeline = self.pipeline.upgrade().ok_or(RespError::ConnectionClosed)?;
        let value = pipeline.borrow_mut().resolve_up_to(&self.slot)?;
        Ok(value)
    }

    /// The reply if it has already been read, without touching the stream
    pub fn cached_result(&self) -> Option<Value> {
        self.slot.cached()
    }

    /// Same command, compared by identity
    pub fn same_as(&self, other: &Command) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<_> = self
            .slot
            .args()
            .iter()
            .map(|arg| String::from_utf8_lossy(arg))
            .collect();
        f.debug_struct("Command")
            .field("args", &args)
            .field("state", &self.state())
            .finish()
    }
}
