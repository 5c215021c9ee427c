use byteorder::{BigEndian, ByteOrder};

use super::Error;

/// Read position over one received datagram
///
/// Every read is checked against the datagram length before touching the
/// data, and successful reads advance the position.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Cursor<'a> {
        Cursor { data, pos: 0 }
    }

    /// Starts reading at `pos`, which may point anywhere up to the end
    pub fn at(data: &'a [u8], pos: usize) -> Cursor<'a> {
        Cursor {
            data,
            pos: pos.min(data.len()),
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// The whole datagram, regardless of the current position
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn peek_u8(&self) -> Result<u8, Error> {
        self.data.get(self.pos).copied().ok_or(Error::OutOfBounds)
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let byte = self.peek_u8()?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_u16(&mut self) -> Result<u16, Error> {
        self.read_bytes(2)
            .map(BigEndian::read_u16)
            .map_err(|_| Error::Truncated)
    }

    pub fn read_u32(&mut self) -> Result<u32, Error> {
        self.read_bytes(4)
            .map(BigEndian::read_u32)
            .map_err(|_| Error::Truncated)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], Error> {
        if n > self.remaining() {
            return Err(Error::Truncated);
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Moves to an absolute offset, used for name compression jumps
    pub fn seek(&mut self, offset: usize) -> Result<(), Error> {
        if offset >= self.data.len() {
            return Err(Error::InvalidOffset(offset));
        }
        self.pos = offset;
        Ok(())
    }
}
