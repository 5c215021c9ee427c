use std::fmt;

use super::{Error, Header, Name};

const TOP_BIT: u16 = 0b1000_0000_0000_0000;

/// Parsed DNS packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet<'a> {
    pub header: Header,
    pub questions: Vec<Question<'a>>,
    /// Answer, authority and additional records in wire order
    pub records: Vec<(Section, ResourceRecord<'a>)>,
}

impl<'a> Packet<'a> {
    pub fn section(&self, section: Section) -> impl Iterator<Item = &ResourceRecord<'a>> {
        self.records
            .iter()
            .filter(move |(s, _)| *s == section)
            .map(|(_, rr)| rr)
    }
}

/// A parsed chunk of data in the Query section of the packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question<'a> {
    pub qname: Name<'a>,
    pub qtype: u16,
    pub qclass: u16,
}

impl<'a> Question<'a> {
    /// The mDNS "QU" bit, asking for a unicast reply
    pub fn unicast_response(&self) -> bool {
        self.qclass & TOP_BIT != 0
    }

    pub fn class(&self) -> u16 {
        self.qclass & !TOP_BIT
    }
}

/// A single DNS record
///
/// The record data is not interpreted and stays a slice of the datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord<'a> {
    pub name: Name<'a>,
    pub rtype: u16,
    pub rclass: u16,
    pub ttl: u32,
    pub rdata: &'a [u8],
}

impl<'a> ResourceRecord<'a> {
    /// The mDNS cache-flush bit
    pub fn cache_flush(&self) -> bool {
        self.rclass & TOP_BIT != 0
    }

    pub fn class(&self) -> u16 {
        self.rclass & !TOP_BIT
    }

    pub fn rdlength(&self) -> u16 {
        self.rdata.len() as u16
    }
}

/// The section a resource record appeared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Answer,
    Authority,
    Additional,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Answer, Section::Authority, Section::Additional];

    /// Short tag used when printing records
    pub fn tag(self) -> &'static str {
        match self {
            Section::Answer => "an",
            Section::Authority => "ns",
            Section::Additional => "ar",
        }
    }

    pub fn count(self, header: &Header) -> u16 {
        match self {
            Section::Answer => header.ancount,
            Section::Authority => header.nscount,
            Section::Additional => header.arcount,
        }
    }
}

/// Where in the packet decoding stopped
///
/// Entry numbers start at 1 and count within their own section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Header,
    Question(u16),
    Record(Section, u16),
}

impl fmt::Display for Location {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Location::Header => fmt.write_str("header"),
            Location::Question(n) => write!(fmt, "qd{}", n),
            Location::Record(section, n) => write!(fmt, "{}{}", section.tag(), n),
        }
    }
}

/// Outcome of decoding a whole datagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<'a> {
    Complete(Packet<'a>),
    /// Decoding stopped at the first malformed entry. `partial` holds what
    /// was decoded before it, or nothing if the header itself failed.
    Failed {
        error: Error,
        at: Location,
        partial: Option<Packet<'a>>,
    },
}

impl<'a> Decoded<'a> {
    pub fn into_result(self) -> Result<Packet<'a>, Error> {
        match self {
            Decoded::Complete(packet) => Ok(packet),
            Decoded::Failed { error, .. } => Err(error),
        }
    }
}
