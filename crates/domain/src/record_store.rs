use crate::dns_record::{RecordClass, RecordType, ZoneRecord, APEX};
use rustc_hash::FxHashMap;

/// Zone apex → records, in zone-file order.
///
/// Filled once before serving starts and shared read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    zones: FxHashMap<String, Vec<ZoneRecord>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, domain: &str, record: ZoneRecord) {
        self.zones
            .entry(normalize(domain))
            .or_default()
            .push(record);
    }

    /// Finds the zone apex `qname` belongs to: the apex itself or any name
    /// ending in `.apex`. The longest matching apex wins.
    pub fn find_domain(&self, qname: &str) -> Option<&str> {
        let qname = normalize(qname);

        self.zones
            .keys()
            .filter(|apex| is_within_zone(&qname, apex))
            .max_by_key(|apex| apex.len())
            .map(String::as_str)
    }

    /// Records named `qname` with the given type and class, in insertion
    /// order. An empty result means "not found".
    pub fn find_records(
        &self,
        qname: &str,
        record_type: RecordType,
        class: RecordClass,
    ) -> Vec<&ZoneRecord> {
        let Some(apex) = self.find_domain(qname) else {
            return Vec::new();
        };

        let qname = normalize(qname);
        let subdomain = relative_name(&qname, apex);

        self.zones
            .get(apex)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| {
                        r.name.eq_ignore_ascii_case(subdomain)
                            && r.record_type == record_type
                            && r.class == class
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn zone_records(&self, apex: &str) -> &[ZoneRecord] {
        self.zones
            .get(&normalize(apex))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// `@` records of the given type and class in zone `apex`.
    pub fn records_at_apex(
        &self,
        apex: &str,
        record_type: RecordType,
        class: RecordClass,
    ) -> Vec<&ZoneRecord> {
        self.zone_records(apex)
            .iter()
            .filter(|r| r.is_apex() && r.record_type == record_type && r.class == class)
            .collect()
    }

    pub fn zones(&self) -> impl Iterator<Item = &str> {
        self.zones.keys().map(String::as_str)
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn record_count(&self) -> usize {
        self.zones.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

fn is_within_zone(qname: &str, apex: &str) -> bool {
    if qname == apex {
        return true;
    }
    qname
        .strip_suffix(apex)
        .is_some_and(|prefix| prefix.ends_with('.'))
}

fn relative_name<'a>(qname: &'a str, apex: &str) -> &'a str {
    if qname == apex {
        return APEX;
    }
    &qname[..qname.len() - apex.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a(name: &str, ip: &str) -> ZoneRecord {
        ZoneRecord::new(name, RecordType::A, RecordClass::IN, 300, vec![ip.to_string()])
    }

    #[test]
    fn test_relative_name() {
        assert_eq!(relative_name("example.com", "example.com"), "@");
        assert_eq!(relative_name("www.example.com", "example.com"), "www");
        assert_eq!(relative_name("a.b.example.com", "example.com"), "a.b");
    }

    #[test]
    fn test_is_within_zone_requires_label_boundary() {
        assert!(is_within_zone("example.com", "example.com"));
        assert!(is_within_zone("www.example.com", "example.com"));
        assert!(!is_within_zone("notexample.com", "example.com"));
        assert!(!is_within_zone("example.com.attacker.net", "ple.com"));
    }

    #[test]
    fn test_add_normalizes_apex() {
        let mut store = RecordStore::new();
        store.add("Example.COM.", a("@", "1.1.1.1"));

        assert_eq!(store.find_domain("example.com"), Some("example.com"));
        assert_eq!(store.zone_records("EXAMPLE.com").len(), 1);
    }

    #[test]
    fn test_records_at_apex_ignores_subdomains() {
        let mut store = RecordStore::new();
        store.add("example.com", a("@", "1.1.1.1"));
        store.add("example.com", a("www", "2.2.2.2"));

        let apex = store.records_at_apex("example.com", RecordType::A, RecordClass::IN);
        assert_eq!(apex.len(), 1);
        assert_eq!(apex[0].rdata[0], "1.1.1.1");
    }
}
