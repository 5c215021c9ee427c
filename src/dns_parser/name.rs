use std::fmt;
use std::fmt::Write;

use super::{Cursor, Error};

/// Longest label the length byte may announce
pub const MAX_LABEL_LEN: u8 = 63;

/// Longest name in wire form, length bytes and root label included
pub const MAX_NAME_LEN: usize = 255;

/// Upper bound on compression pointers followed for a single name
///
/// Pointers may point anywhere in the datagram, including at themselves,
/// so the chain is cut off here and reported as `Error::CompressionLoop`.
pub const MAX_POINTER_HOPS: usize = 128;

/// A single label of a name, borrowed from the datagram
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label<'a>(&'a [u8]);

impl<'a> Label<'a> {
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> fmt::Display for Label<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(&String::from_utf8_lossy(self.0))
    }
}

impl<'a> fmt::Debug for Label<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&String::from_utf8_lossy(self.0), fmt)
    }
}

/// The DNS name as stored in the original packet
///
/// Labels are kept in the order they were read, with compression pointers
/// already followed and without the terminating root label. An empty name
/// is the root. You may turn this into a string using `.to_string()`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name<'a> {
    labels: Vec<Label<'a>>,
}

impl<'a> Name<'a> {
    /// Reads a name at the cursor position
    ///
    /// On success the cursor sits right after the name: past the zero byte
    /// for a literal name, or past the first compression pointer otherwise.
    /// On failure the cursor position is unspecified.
    pub fn scan(cursor: &mut Cursor<'a>) -> Result<Name<'a>, Error> {
        let mut labels = Vec::new();
        let mut resume = None;
        let mut hops = 0;
        // root label
        let mut wire_len = 1;
        loop {
            let byte = cursor.peek_u8()?;
            if byte == 0 {
                cursor.read_u8()?;
                break;
            } else if byte & 0b1100_0000 == 0b1100_0000 {
                let off = (cursor.read_u16()? & !0b1100_0000_0000_0000) as usize;
                if off >= cursor.data().len() {
                    return Err(Error::InvalidOffset(off));
                }
                hops += 1;
                if hops > MAX_POINTER_HOPS {
                    return Err(Error::CompressionLoop);
                }
                if resume.is_none() {
                    resume = Some(cursor.position());
                }
                cursor.seek(off)?;
            } else if byte > MAX_LABEL_LEN {
                return Err(Error::InvalidLabel(byte));
            } else {
                let len = byte as usize;
                if cursor.remaining() < len + 1 {
                    return Err(Error::InvalidLabel(byte));
                }
                wire_len += len + 1;
                if wire_len > MAX_NAME_LEN {
                    return Err(Error::NameTooLong);
                }
                cursor.read_u8()?;
                labels.push(Label(cursor.read_bytes(len)?));
            }
        }

        if let Some(pos) = resume {
            *cursor = Cursor::at(cursor.data(), pos);
        }
        Ok(Name { labels })
    }

    pub fn labels(&self) -> &[Label<'a>] {
        &self.labels
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<'a> fmt::Display for Name<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for (i, label) in self.labels.iter().enumerate() {
            if i != 0 {
                fmt.write_char('.')?;
            }
            fmt::Display::fmt(label, fmt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{Name, MAX_NAME_LEN, MAX_POINTER_HOPS};
    use crate::dns_parser::{Cursor, Error};

    fn texts(name: &Name) -> Vec<String> {
        name.labels().iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn literal_name() {
        let data = b"\x03www\x07example\x03com\x00\x00\x01";
        let mut cursor = Cursor::new(data);
        let name = Name::scan(&mut cursor).unwrap();
        assert_eq!(texts(&name), ["www", "example", "com"]);
        assert_eq!(name.to_string(), "www.example.com");
        assert_eq!(cursor.position(), 17);

        let again = Name::scan(&mut Cursor::new(data)).unwrap();
        assert_eq!(again, name);
    }

    #[test]
    fn root_name() {
        let mut cursor = Cursor::new(b"\x00\x00\x01");
        let name = Name::scan(&mut cursor).unwrap();
        assert!(name.is_root());
        assert_eq!(name.to_string(), "");
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn pointer_resumes_after_itself() {
        // "local" at 0, then "_http._tcp" + pointer to it at 7
        let data = b"\x05local\x00\x05_http\x04_tcp\xc0\x00\xab\xcd";
        let target = Name::scan(&mut Cursor::new(data)).unwrap();

        let mut cursor = Cursor::at(data, 7);
        let name = Name::scan(&mut cursor).unwrap();
        assert_eq!(texts(&name), ["_http", "_tcp", "local"]);
        assert_eq!(&name.labels()[2..], target.labels());
        assert_eq!(cursor.position(), 20);
        assert_eq!(cursor.read_u16(), Ok(0xabcd));
    }

    #[test]
    fn bare_pointer_equals_target() {
        let data = b"\x04host\x05local\x00\xc0\x00";
        let target = Name::scan(&mut Cursor::new(data)).unwrap();
        let mut cursor = Cursor::at(data, 12);
        let name = Name::scan(&mut cursor).unwrap();
        assert_eq!(name, target);
        assert_eq!(cursor.position(), 14);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn chained_pointers_resume_after_first() {
        let data = b"\x05local\x00\x04host\xc0\x00\x03www\xc0\x07\xff";
        let mut cursor = Cursor::at(data, 14);
        let name = Name::scan(&mut cursor).unwrap();
        assert_eq!(name.to_string(), "www.host.local");
        assert_eq!(cursor.position(), 20);
    }

    #[test]
    fn pointer_past_end() {
        let data = b"\x03www\xc0\x10";
        let result = Name::scan(&mut Cursor::new(data));
        assert_eq!(result, Err(Error::InvalidOffset(16)));
    }

    #[test]
    fn pointer_cut_in_half() {
        let result = Name::scan(&mut Cursor::new(b"\x03www\xc0"));
        assert_eq!(result, Err(Error::Truncated));
    }

    #[test]
    fn label_overruns_datagram() {
        let result = Name::scan(&mut Cursor::new(b"\x03www\x07exam"));
        assert_eq!(result, Err(Error::InvalidLabel(7)));
        // no terminator
        let result = Name::scan(&mut Cursor::new(b"\x03www"));
        assert_eq!(result, Err(Error::OutOfBounds));
    }

    #[test]
    fn reserved_label_types() {
        let result = Name::scan(&mut Cursor::new(b"\x41aaaa\x00"));
        assert_eq!(result, Err(Error::InvalidLabel(0x41)));
        let result = Name::scan(&mut Cursor::new(b"\x80aaaa\x00"));
        assert_eq!(result, Err(Error::InvalidLabel(0x80)));
    }

    #[test]
    fn label_length_boundary() {
        let mut data = vec![63u8];
        data.extend_from_slice(&[b'x'; 63]);
        data.push(0);
        let mut cursor = Cursor::new(&data);
        let name = Name::scan(&mut cursor).unwrap();
        assert_eq!(name.labels().len(), 1);
        assert_eq!(name.labels()[0].len(), 63);
        assert_eq!(cursor.position(), 65);

        data[0] = 0x40;
        data.insert(1, b'x');
        let result = Name::scan(&mut Cursor::new(&data));
        assert_eq!(result, Err(Error::InvalidLabel(0x40)));
    }

    #[test]
    fn longest_name() {
        // 127 one-byte labels make exactly 255 bytes
        let mut data = b"\x01a".repeat(127);
        data.push(0);
        assert_eq!(data.len(), MAX_NAME_LEN);
        let name = Name::scan(&mut Cursor::new(&data)).unwrap();
        assert_eq!(name.labels().len(), 127);

        data.insert(0, b'b');
        data.insert(0, 1);
        let result = Name::scan(&mut Cursor::new(&data));
        assert_eq!(result, Err(Error::NameTooLong));
    }

    #[test]
    fn labels_looping_back_stop_early() {
        let mut data = b"\x01a".repeat(32_500);
        data.extend_from_slice(b"\xc0\x00");
        let mut cursor = Cursor::new(&data);
        let result = Name::scan(&mut cursor);
        assert_eq!(result, Err(Error::NameTooLong));
        assert!(cursor.position() < MAX_NAME_LEN);

        // same shape with a short label run cycling through the pointer
        let result = Name::scan(&mut Cursor::new(b"\x01a\x01b\xc0\x00"));
        assert_eq!(result, Err(Error::NameTooLong));
    }

    #[test]
    fn missing_terminator() {
        let result = Name::scan(&mut Cursor::new(b""));
        assert_eq!(result, Err(Error::OutOfBounds));
    }

    #[test]
    fn self_pointer_is_a_loop() {
        let result = Name::scan(&mut Cursor::new(b"\xc0\x00"));
        assert_eq!(result, Err(Error::CompressionLoop));

        // labels between the pointers hit the length cap first
        let data = b"\x01a\xc0\x04\x01b\xc0\x00";
        let result = Name::scan(&mut Cursor::new(data));
        assert_eq!(result, Err(Error::NameTooLong));
    }

    #[test]
    fn long_chain_within_cap() {
        // each pointer jumps two bytes back, ending at a root label
        let mut data = vec![0u8];
        for i in 0..MAX_POINTER_HOPS {
            let target = if i == 0 { 0 } else { 1 + 2 * (i - 1) };
            data.push(0xc0);
            data.push(target as u8);
        }
        let start = data.len() - 2;
        let mut cursor = Cursor::at(&data, start);
        let name = Name::scan(&mut cursor).unwrap();
        assert!(name.is_root());
        assert_eq!(cursor.position(), data.len());
    }
}
