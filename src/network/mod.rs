//! Network Module
//!
//! Client connection and command pipelining.
//!
//! ## Architecture
//! - One [`Connection`] per server stream, split into buffered read/write halves
//! - Commands queue locally and are written in batches
//! - Replies are read lazily, in send order, when a result is requested

mod command;
mod pipeline;
mod connection;

pub use command::{Command, CommandState};
pub use connection::{CommandBuilder, Connection, TcpConnection};
