#![allow(dead_code)]

use authdns_domain::wire::{decode_question, decode_resource_record, ResourceRecord, HEADER_LEN};
use authdns_domain::{Header, Question, RecordClass, RecordStore, RecordType, ZoneRecord};

pub fn record(name: &str, record_type: RecordType, ttl: u32, rdata: &str) -> ZoneRecord {
    ZoneRecord::new(
        name,
        record_type,
        RecordClass::IN,
        ttl,
        rdata.split_whitespace().map(str::to_string).collect(),
    )
}

/// `example.com` with name servers, mail, aliases and text records.
pub fn example_zone() -> RecordStore {
    let mut store = RecordStore::new();
    let zone = "example.com";
    store.add(
        zone,
        record(
            "@",
            RecordType::SOA,
            3600,
            "ns1.example.com admin.example.com 2024010101 7200 3600 1209600 300",
        ),
    );
    store.add(zone, record("@", RecordType::NS, 3600, "ns1.example.com"));
    store.add(zone, record("@", RecordType::NS, 3600, "ns2.example.com"));
    store.add(zone, record("@", RecordType::A, 300, "93.184.216.34"));
    store.add(zone, record("@", RecordType::MX, 300, "10 mail.example.com"));
    store.add(zone, record("@", RecordType::TXT, 300, "v=spf1 mx -all"));
    store.add(zone, record("ns1", RecordType::A, 3600, "192.0.2.53"));
    store.add(zone, record("mail", RecordType::A, 300, "192.0.2.25"));
    store.add(zone, record("www", RecordType::A, 300, "93.184.216.34"));
    store.add(zone, record("www", RecordType::AAAA, 300, "2001:db8::1"));
    store.add(zone, record("docs", RecordType::CNAME, 300, "www.example.com"));
    store
}

pub fn query(id: u16, name: &str, qtype: u16) -> Vec<u8> {
    let header = Header {
        id,
        rd: true,
        qdcount: 1,
        ..Header::default()
    };
    let mut bytes = header.encode().to_vec();
    bytes.extend(Question::new(name, qtype, 1).encode().unwrap());
    bytes
}

pub struct ParsedReply {
    pub header: Header,
    pub question: Question,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
}

pub fn parse_reply(bytes: &[u8]) -> ParsedReply {
    let header = Header::decode(bytes).unwrap();
    let (question, mut offset) = decode_question(bytes, HEADER_LEN).unwrap();

    let mut read = |count: u16| {
        let mut records = Vec::new();
        for _ in 0..count {
            let (record, next) = decode_resource_record(bytes, offset).unwrap();
            records.push(record);
            offset = next;
        }
        records
    };

    let answers = read(header.ancount);
    let authority = read(header.nscount);
    let additional = read(header.arcount);
    assert_eq!(offset, bytes.len(), "trailing bytes after the last record");

    ParsedReply {
        header,
        question,
        answers,
        authority,
        additional,
    }
}
