#![allow(dead_code)]
use authdns_domain::{Header, Question};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const EXAMPLE_ZONE: &str = "\
example.com
@,3600,IN,SOA,ns1.example.com admin.example.com 2024010101 7200 3600 1209600 300
@,3600,IN,NS,ns1.example.com
@,300,IN,A,93.184.216.34
@,300,IN,MX,10 mail.example.com
@,300,IN,TXT,v=spf1 mx -all
ns1,3600,IN,A,192.0.2.53
mail,300,IN,A,192.0.2.25
www,300,IN,A,93.184.216.34
www,300,IN,AAAA,2001:db8::1
docs,300,IN,CNAME,www.example.com
";

/// A config directory with a config file and its zone files on disk.
pub struct ZoneFixture {
    dir: TempDir,
    config: PathBuf,
}

impl ZoneFixture {
    /// `zones` are `(domain, file name, zone file contents)`.
    pub fn new(upstream: &str, zones: &[(&str, &str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();

        let mut config = format!("{}\n", upstream);
        for (domain, file, contents) in zones {
            config.push_str(&format!("{},{}\n", domain, file));
            std::fs::write(dir.path().join(file), contents).unwrap();
        }

        let config_path = dir.path().join("config");
        std::fs::write(&config_path, config).unwrap();

        Self {
            dir,
            config: config_path,
        }
    }

    pub fn example() -> Self {
        Self::new("127.0.0.1", &[("example.com", "example.com.zone", EXAMPLE_ZONE)])
    }

    pub fn config_path(&self) -> &Path {
        &self.config
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
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
