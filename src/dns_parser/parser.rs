use super::{
    Cursor, Decoded, Error, Header, Location, Name, Packet, Question, ResourceRecord, Section,
};

impl<'a> Packet<'a> {
    /// Parse a full DNS Packet and return a structure that has all the
    /// data borrowed from the passed buffer.
    pub fn parse(data: &'a [u8]) -> Result<Packet<'a>, Error> {
        Packet::decode(data).into_result()
    }

    /// Decodes header, questions and records in order, stopping at the
    /// first entry that fails and keeping everything before it.
    pub fn decode(data: &'a [u8]) -> Decoded<'a> {
        let mut cursor = Cursor::new(data);
        let header = match Header::parse(&mut cursor) {
            Ok(header) => header,
            Err(error) => {
                return Decoded::Failed {
                    error,
                    at: Location::Header,
                    partial: None,
                }
            }
        };

        // Counts come from the wire, so capacity is capped by what could fit
        let fit = data.len() / 5;
        let mut packet = Packet {
            header,
            questions: Vec::with_capacity((header.qdcount as usize).min(fit)),
            records: Vec::with_capacity(header.record_count().min(fit)),
        };

        for n in 1..=header.qdcount {
            match Question::parse(&mut cursor) {
                Ok(question) => packet.questions.push(question),
                Err(error) => return failed(error, Location::Question(n), packet),
            }
        }

        for &section in Section::ALL.iter() {
            for n in 1..=section.count(&header) {
                match ResourceRecord::parse(&mut cursor) {
                    Ok(rr) => packet.records.push((section, rr)),
                    Err(error) => return failed(error, Location::Record(section, n), packet),
                }
            }
        }

        Decoded::Complete(packet)
    }
}

fn failed<'a>(error: Error, at: Location, packet: Packet<'a>) -> Decoded<'a> {
    Decoded::Failed {
        error,
        at,
        partial: Some(packet),
    }
}

impl<'a> Question<'a> {
    pub fn parse(cursor: &mut Cursor<'a>) -> Result<Question<'a>, Error> {
        let qname = Name::scan(cursor)?;
        if cursor.remaining() < 4 {
            return Err(Error::Truncated);
        }
        Ok(Question {
            qname,
            qtype: cursor.read_u16()?,
            qclass: cursor.read_u16()?,
        })
    }
}

impl<'a> ResourceRecord<'a> {
    pub fn parse(cursor: &mut Cursor<'a>) -> Result<ResourceRecord<'a>, Error> {
        let name = Name::scan(cursor)?;
        if cursor.remaining() < 10 {
            return Err(Error::Truncated);
        }
        let rtype = cursor.read_u16()?;
        let rclass = cursor.read_u16()?;
        let ttl = cursor.read_u32()?;
        let rdlength = cursor.read_u16()?;
        if rdlength as usize > cursor.remaining() {
            return Err(Error::InvalidLength(rdlength));
        }
        Ok(ResourceRecord {
            name,
            rtype,
            rclass,
            ttl,
            rdata: cursor.read_bytes(rdlength as usize)?,
        })
    }
}
