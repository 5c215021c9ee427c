use super::{Cursor, Error};

/// Size of the fixed message header in bytes
pub const HEADER_SIZE: usize = 12;

mod flag {
    pub const QUERY: u16 = 0b1000_0000_0000_0000;
    pub const OPCODE_MASK: u16 = 0b0111_1000_0000_0000;
    pub const AUTHORITATIVE: u16 = 0b0000_0100_0000_0000;
    pub const TRUNCATED: u16 = 0b0000_0010_0000_0000;
    pub const RESPONSE_CODE_MASK: u16 = 0b0000_0000_0000_1111;
}

/// Represents parsed header of the packet
///
/// Fields are in host byte order. `flags` is kept as it was on the wire;
/// the accessors below only read bits out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    pub fn parse(cursor: &mut Cursor) -> Result<Header, Error> {
        if cursor.remaining() < HEADER_SIZE {
            return Err(Error::Truncated);
        }
        Ok(Header {
            id: cursor.read_u16()?,
            flags: cursor.read_u16()?,
            qdcount: cursor.read_u16()?,
            ancount: cursor.read_u16()?,
            nscount: cursor.read_u16()?,
            arcount: cursor.read_u16()?,
        })
    }

    /// Number of resource records following the questions
    pub fn record_count(&self) -> usize {
        self.ancount as usize + self.nscount as usize + self.arcount as usize
    }

    pub fn is_query(&self) -> bool {
        self.flags & flag::QUERY == 0
    }

    pub fn opcode(&self) -> u8 {
        ((self.flags & flag::OPCODE_MASK) >> 11) as u8
    }

    pub fn is_authoritative(&self) -> bool {
        self.flags & flag::AUTHORITATIVE != 0
    }

    pub fn is_truncated(&self) -> bool {
        self.flags & flag::TRUNCATED != 0
    }

    pub fn response_code(&self) -> u8 {
        (self.flags & flag::RESPONSE_CODE_MASK) as u8
    }
}
