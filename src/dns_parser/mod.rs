//! Decoder for DNS-format messages as seen on the mDNS multicast group
//!
//! Everything here reads from a borrowed datagram and never trusts the
//! counts, lengths or offsets it contains.

mod cursor;
mod error;
mod header;
mod name;
mod parser;
mod structs;

pub use self::cursor::Cursor;
pub use self::error::Error;
pub use self::header::{Header, HEADER_SIZE};
pub use self::name::{Label, Name, MAX_LABEL_LEN, MAX_NAME_LEN, MAX_POINTER_HOPS};
pub use self::structs::{Decoded, Location, Packet, Question, ResourceRecord, Section};
