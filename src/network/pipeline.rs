//! Pipeline
//!
//! The two FIFO queues behind a connection and the flush/resolve algorithm.
//!
//! ```text
//!  queue_command        flush                      resolve
//! ──────────────▶ [ send queue ] ──write──▶ [ recv queue ] ──read──▶ resolved
//!                  front ◀── back            front ◀── back
//! ```
//!
//! Commands only ever leave a queue from the front, so the byte order on the
//! wire equals enqueue order and replies are read back in that same order.
//! Reading a command's reply first reads (and caches) the replies of every
//! command sent before it.

use std::collections::VecDeque;
use std::io::{BufReader, BufWriter, Read, Write};
use std::rc::Rc;

use crate::config::{Config, ReadPolicy};
use crate::error::{RespError, Result};
use crate::protocol::{read_value, write_command, Value};

use super::command::{CommandState, Resolver, Slot};

/// Owns the stream halves and both queues
pub(crate) struct Pipeline<R: Read, W: Write> {
    // Fields drop in declaration order: writer first, then reader.
    /// Outbound half (buffered so a batch leaves in one write)
    writer: BufWriter<W>,

    /// Inbound half
    reader: BufReader<R>,

    /// Queued, not yet written
    send_queue: VecDeque<Rc<Slot>>,

    /// Written, reply not yet read
    recv_queue: VecDeque<Rc<Slot>>,

    policy: ReadPolicy,

    /// Set after a fatal failure; the stream position is unknown from then on
    broken: bool,
}

impl<R: Read, W: Write> Pipeline<R, W> {
    pub(crate) fn new(reader: R, writer: W, config: &Config) -> Self {
        Self {
            writer: BufWriter::with_capacity(config.write_buffer_size, writer),
            reader: BufReader::with_capacity(config.read_buffer_size, reader),
            send_queue: VecDeque::new(),
            recv_queue: VecDeque::new(),
            policy: config.read_policy,
            broken: false,
        }
    }

    /// Append a command to the send queue. Never touches the stream.
    pub(crate) fn enqueue(&mut self, slot: Rc<Slot>) {
        self.send_queue.push_back(slot);
    }

    pub(crate) fn pending_sends(&self) -> usize {
        self.send_queue.len()
    }

    pub(crate) fn pending_reads(&self) -> usize {
        self.recv_queue.len()
    }

    pub(crate) fn policy(&self) -> ReadPolicy {
        self.policy
    }

    pub(crate) fn is_broken(&self) -> bool {
        self.broken
    }

    // =========================================================================
    // Flushing
    // =========================================================================

    /// Write the whole send queue, then flush the stream once
    pub(crate) fn flush_all(&mut self) -> Result<()> {
        self.ensure_usable()?;
        let result = self.flush_all_inner();
        self.poison_on_fatal(result)
    }

    fn flush_all_inner(&mut self) -> Result<()> {
        let mut written = 0usize;
        while self.send_front()?.is_some() {
            written += 1;
        }
        self.writer.flush()?;
        if written > 0 {
            tracing::debug!("Flushed {} command(s)", written);
        }
        Ok(())
    }

    fn flush_up_to_inner(&mut self, target: &Rc<Slot>) -> Result<()> {
        if target.state() != CommandState::Queued {
            return Ok(());
        }
        let mut written = 0usize;
        while let Some(sent) = self.send_front()? {
            written += 1;
            if Rc::ptr_eq(&sent, target) {
                break;
            }
        }
        self.writer.flush()?;
        tracing::debug!(
            "Flushed {} command(s), {} still queued",
            written,
            self.send_queue.len()
        );
        Ok(())
    }

    /// Pop the front of the send queue onto the wire and the receive queue
    fn send_front(&mut self) -> Result<Option<Rc<Slot>>> {
        let Some(slot) = self.send_queue.pop_front() else {
            return Ok(None);
        };
        write_command(&mut self.writer, slot.args())?;
        tracing::trace!("Wrote command with {} argument(s)", slot.args().len());
        slot.mark_sent();
        self.recv_queue.push_back(Rc::clone(&slot));
        Ok(Some(slot))
    }

    // =========================================================================
    // Resolving
    // =========================================================================

    /// Flush everything, then read every outstanding reply
    pub(crate) fn resolve_all(&mut self) -> Result<()> {
        self.ensure_usable()?;
        let result = self.resolve_all_inner();
        self.poison_on_fatal(result)
    }

    fn resolve_all_inner(&mut self) -> Result<()> {
        self.flush_all_inner()?;
        let mut read = 0usize;
        while self.receive_front()?.is_some() {
            read += 1;
        }
        if read > 0 {
            tracing::debug!("Read {} reply(ies)", read);
        }
        Ok(())
    }

    fn resolve_up_to_inner(&mut self, target: &Rc<Slot>) -> Result<Value> {
        if target.state() == CommandState::Queued {
            match self.policy {
                ReadPolicy::FlushAll => self.flush_all_inner()?,
                ReadPolicy::FlushExact => self.flush_up_to_inner(target)?,
            }
        }
        if target.state() == CommandState::Sent {
            while let Some((slot, value)) = self.receive_front()? {
                if Rc::ptr_eq(&slot, target) {
                    return Ok(value);
                }
            }
        }
        // Resolved earlier, or by the drain above.
        target.cached().ok_or_else(|| {
            RespError::ProtocolMisuse("command was not queued on this connection".to_string())
        })
    }

    /// Read the reply for the front of the receive queue
    fn receive_front(&mut self) -> Result<Option<(Rc<Slot>, Value)>> {
        let Some(slot) = self.recv_queue.front().cloned() else {
            return Ok(None);
        };
        let value = read_value(&mut self.reader)?;
        tracing::trace!("Read {:?} reply", value.value_type());
        self.recv_queue.pop_front();
        slot.resolve(value.clone());
        Ok(Some((slot, value)))
    }

    // =========================================================================
    // Shutdown
    // =========================================================================

    /// Send everything pending and read every reply
    ///
    /// Leaves no command unsent and no reply unread on the stream.
    pub(crate) fn shutdown(&mut self) -> Result<()> {
        let pending = self.send_queue.len() + self.recv_queue.len();
        self.resolve_all()?;
        tracing::debug!("Pipeline drained ({} command(s) outstanding at close)", pending);
        Ok(())
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.broken {
            return Err(RespError::ConnectionBroken);
        }
        Ok(())
    }

    fn poison_on_fatal<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref e) = result {
            if e.is_fatal() {
                tracing::warn!("Pipeline failed, refusing further use: {}", e);
                self.broken = true;
            }
        }
        result
    }
}

impl<R: Read, W: Write> Resolver for Pipeline<R, W> {
    fn flush_up_to(&mut self, target: &Rc<Slot>) -> Result<()> {
        self.ensure_usable()?;
        let result = self.flush_up_to_inner(target);
        self.poison_on_fatal(result)
    }

    fn resolve_up_to(&mut self, target: &Rc<Slot>) -> Result<Value> {
        self.ensure_usable()?;
        let result = self.resolve_up_to_inner(target);
        self.poison_on_fatal(result)
    }
}
