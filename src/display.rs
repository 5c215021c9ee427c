//! Console rendering of decoded datagrams
//!
//! A datagram is rendered into one block of text: the header line, one
//! indented line per question and record, and on failure the error followed
//! by a hex dump of the raw bytes.

use std::fmt;

use crate::dns_parser::{Decoded, Header, Name, Packet, Question, ResourceRecord, Section};

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const YELLOW: &str = "\x1b[33m";
const CRIMSON: &str = "\x1b[38;5;161m";
const TEAL: &str = "\x1b[38;5;73m";

fn section_color(section: Section) -> &'static str {
    match section {
        Section::Answer => YELLOW,
        Section::Authority => CRIMSON,
        Section::Additional => TEAL,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new(color: bool) -> Printer {
        Printer { color }
    }

    /// Renders everything known about one datagram
    pub fn render(&self, data: &[u8], decoded: &Decoded) -> String {
        Report {
            printer: *self,
            data,
            decoded,
        }
        .to_string()
    }

    fn open(&self, f: &mut fmt::Formatter, color: &str) -> fmt::Result {
        if self.color {
            f.write_str(color)?;
        }
        Ok(())
    }

    fn close(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.color {
            f.write_str(RESET)?;
        }
        Ok(())
    }

    fn header(&self, f: &mut fmt::Formatter, header: &Header, len: usize) -> fmt::Result {
        writeln!(
            f,
            "received: bytes={:<4}, id={}, flags={:<5}, qdcount={:<2}, ancount={:<2}, nscount={:<2}, arcount={:<2}",
            len, header.id, header.flags, header.qdcount, header.ancount, header.nscount, header.arcount
        )
    }

    /// Dot-joined name with control characters replaced by `?`
    fn name(&self, f: &mut fmt::Formatter, name: &Name) -> fmt::Result {
        for (i, label) in name.labels().iter().enumerate() {
            if i != 0 {
                f.write_str(".")?;
            }
            for c in String::from_utf8_lossy(label.as_bytes()).chars() {
                fmt::Write::write_char(f, if c.is_control() { '?' } else { c })?;
            }
        }
        Ok(())
    }

    fn question(&self, f: &mut fmt::Formatter, question: &Question, num: u16) -> fmt::Result {
        f.write_str("\t")?;
        self.open(f, BLUE)?;
        write!(
            f,
            "qd{}, qtype={}, qclass={}, qname=",
            num, question.qtype, question.qclass
        )?;
        self.name(f, &question.qname)?;
        self.close(f)?;
        f.write_str("\n")
    }

    fn record(
        &self,
        f: &mut fmt::Formatter,
        section: Section,
        rr: &ResourceRecord,
        num: u16,
    ) -> fmt::Result {
        f.write_str("\t")?;
        self.open(f, section_color(section))?;
        write!(
            f,
            "{}{}, rtype={}, rclass={}, ttl={}, rdlength={}, rname=",
            section.tag(),
            num,
            rr.rtype,
            rr.rclass,
            rr.ttl,
            rr.rdlength()
        )?;
        self.name(f, &rr.name)?;
        f.write_str(", rdata=")?;
        for &byte in rr.rdata {
            let c = if (32..=127).contains(&byte) {
                byte as char
            } else {
                '?'
            };
            fmt::Write::write_char(f, c)?;
        }
        self.close(f)?;
        f.write_str("\n")
    }

    fn packet(&self, f: &mut fmt::Formatter, packet: &Packet, len: usize) -> fmt::Result {
        self.header(f, &packet.header, len)?;
        for (i, question) in packet.questions.iter().enumerate() {
            self.question(f, question, i as u16 + 1)?;
        }
        // sections are contiguous, so numbering restarts whenever it changes
        let mut current = None;
        let mut num = 0;
        for (section, rr) in &packet.records {
            if current != Some(*section) {
                current = Some(*section);
                num = 0;
            }
            num += 1;
            self.record(f, *section, rr, num)?;
        }
        Ok(())
    }
}

/// Writes `data` as a hex dump line, each byte followed by a space
pub fn write_hex(f: &mut dyn fmt::Write, data: &[u8]) -> fmt::Result {
    f.write_str("\tHex=")?;
    for byte in data {
        write!(f, "{:02x} ", byte)?;
    }
    f.write_str("\n")
}

struct Report<'p> {
    printer: Printer,
    data: &'p [u8],
    decoded: &'p Decoded<'p>,
}

impl<'p> fmt::Display for Report<'p> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let printer = &self.printer;
        match self.decoded {
            Decoded::Complete(packet) => printer.packet(f, packet, self.data.len()),
            Decoded::Failed { error, at, partial } => {
                if let Some(packet) = partial {
                    printer.packet(f, packet, self.data.len())?;
                }
                printer.open(f, RED)?;
                write!(f, "{} ({})", error, at)?;
                printer.close(f)?;
                f.write_str("\n")?;
                write_hex(f, self.data)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{write_hex, Printer};
    use crate::dns_parser::Packet;

    const RESPONSE: &[u8] = b"\x00\x00\x84\x00\x00\x01\x00\x02\x00\x00\x00\x01\
        \x04host\x05local\x00\x00\x01\x00\x01\
        \xc0\x0c\x00\x01\x80\x01\x00\x00\x00\x78\x00\x04\xc0\xa8\x01\x0a\
        \xc0\x0c\x00\x10\x80\x01\x00\x00\x11\x94\x00\x04\x03a=b\
        \xc0\x0c\x00\x1c\x80\x01\x00\x00\x00\x78\x00\x02\x00\x7f";

    #[test]
    fn plain_report() {
        let text = Printer::new(false).render(RESPONSE, &Packet::decode(RESPONSE));
        let expected = "\
received: bytes=74  , id=0, flags=33792, qdcount=1 , ancount=2 , nscount=0 , arcount=1 \n\
\tqd1, qtype=1, qclass=1, qname=host.local\n\
\tan1, rtype=1, rclass=32769, ttl=120, rdlength=4, rname=host.local, rdata=????\n\
\tan2, rtype=16, rclass=32769, ttl=4500, rdlength=4, rname=host.local, rdata=?a=b\n\
\tar1, rtype=28, rclass=32769, ttl=120, rdlength=2, rname=host.local, rdata=?\x7f\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn colored_lines() {
        let text = Printer::new(true).render(RESPONSE, &Packet::decode(RESPONSE));
        let lines: Vec<&str> = text.lines().collect();
        assert!(!lines[0].contains('\x1b'));
        assert!(lines[1].starts_with("\t\x1b[34mqd1,"));
        assert!(lines[2].starts_with("\t\x1b[33man1,"));
        assert!(lines[4].starts_with("\t\x1b[38;5;73mar1,"));
        assert!(lines[4].ends_with("\x1b[0m"));
    }

    #[test]
    fn failure_shows_partial_then_hex() {
        let data = b"\x00\x01\x00\x00\x00\x01\x00\x01\x00\x00\x00\x00\
            \x01a\x00\x00\x01\x00\x01\xc0\x40";
        let text = Printer::new(false).render(data, &Packet::decode(data));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "\tqd1, qtype=1, qclass=1, qname=a");
        assert_eq!(lines[2], "invalid compression offset 64 (an1)");
        assert_eq!(
            lines[3],
            "\tHex=00 01 00 00 00 01 00 01 00 00 00 00 01 61 00 00 01 00 01 c0 40 "
        );
    }

    #[test]
    fn empty_datagram_gives_empty_hex_line() {
        let text = Printer::new(false).render(b"", &Packet::decode(b""));
        assert_eq!(text, "buffer too small for the next field (header)\n\tHex=\n");

        let mut hex = String::new();
        write_hex(&mut hex, b"").unwrap();
        assert_eq!(hex, "\tHex=\n");
    }

    #[test]
    fn names_cannot_carry_escapes() {
        let data = b"\x00\x00\x84\x00\x00\x01\x00\x01\x00\x00\x00\x00\
            \x07\x1b[2Jcaf\x06\xc3\xa9\x0a\x7fok\x00\x00\x01\x00\x01\
            \xc0\x0c\x00\x01\x00\x01\x00\x00\x00\x78\x00\x00";
        let text = Printer::new(false).render(data, &Packet::decode(data));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "\tqd1, qtype=1, qclass=1, qname=?[2Jcaf.\u{e9}??ok");
        assert_eq!(
            lines[2],
            "\tan1, rtype=1, rclass=1, ttl=120, rdlength=0, rname=?[2Jcaf.\u{e9}??ok, rdata="
        );
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn error_is_red() {
        let text = Printer::new(true).render(b"\x00", &Packet::decode(b"\x00"));
        assert!(text.starts_with("\x1b[31mbuffer too small"));
        assert!(text.ends_with("\tHex=00 \n"));
    }
}
