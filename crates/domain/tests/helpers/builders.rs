#![allow(dead_code)]
use authdns_domain::{RecordClass, RecordStore, RecordType, ZoneRecord};

pub struct ZoneRecordBuilder {
    name: String,
    record_type: RecordType,
    class: RecordClass,
    ttl: u32,
    rdata: Vec<String>,
}

impl ZoneRecordBuilder {
    pub fn new() -> Self {
        Self {
            name: "@".to_string(),
            record_type: RecordType::A,
            class: RecordClass::IN,
            ttl: 300,
            rdata: vec!["192.0.2.1".to_string()],
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn class(mut self, class: RecordClass) -> Self {
        self.class = class;
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn rdata(mut self, tokens: &[&str]) -> Self {
        self.rdata = tokens.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn build(self) -> ZoneRecord {
        ZoneRecord::new(self.name, self.record_type, self.class, self.ttl, self.rdata)
    }
}

impl Default for ZoneRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `example.com` with apex A/NS/SOA, `www` A records and a CH-class TXT.
pub fn example_store() -> RecordStore {
    let mut store = RecordStore::new();
    let apex = "example.com";

    store.add(apex, ZoneRecordBuilder::new().rdata(&["93.184.216.34"]).build());
    store.add(
        apex,
        ZoneRecordBuilder::new()
            .record_type(RecordType::NS)
            .rdata(&["ns1.example.com"])
            .build(),
    );
    store.add(
        apex,
        ZoneRecordBuilder::new()
            .record_type(RecordType::SOA)
            .rdata(&[
                "ns1.example.com",
                "admin.example.com",
                "1",
                "7200",
                "3600",
                "1209600",
                "300",
            ])
            .build(),
    );
    store.add(
        apex,
        ZoneRecordBuilder::new().name("www").rdata(&["10.0.0.1"]).build(),
    );
    store.add(
        apex,
        ZoneRecordBuilder::new().name("www").rdata(&["10.0.0.2"]).build(),
    );
    store.add(
        apex,
        ZoneRecordBuilder::new()
            .name("www")
            .record_type(RecordType::TXT)
            .class(RecordClass::CH)
            .rdata(&["chaos"])
            .build(),
    );
    store
}
