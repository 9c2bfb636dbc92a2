//! Protocol Module
//!
//! Defines the typed values exchanged with the server and their wire codec.
//!
//! ## Protocol Format
//!
//! Every value starts with a one byte type tag; lines end with CRLF.
//!
//! ### Tags
//! - `-`: Error    - Body: text line
//! - `+`: Status   - Body: text line
//! - `:`: Integer  - Body: decimal line
//! - `$`: Bulk     - Body: length line, raw bytes, CRLF (length -1 = nil)
//! - `*`: Array    - Body: count line, nested values (count -1 = nil)
//!
//! ### Requests
//! A command is always sent as an Array of Bulk strings:
//! ```text
//! *3\r\n$3\r\nSET\r\n$1\r\nk\r\n$1\r\nv\r\n
//! ```

mod value;
mod codec;

pub use value::{ToArg, Value, ValueType};
pub use codec::{
    encode_command, encode_value, decode_value,
    read_value, write_command, write_value,
    CRLF, MAX_BULK_LEN, MAX_DEPTH,
};
