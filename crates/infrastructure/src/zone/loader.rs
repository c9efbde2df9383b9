//! Zone configuration loading.
//!
//! The config file names the upstream resolver on its first line and lists
//! one `domain,zone-file` pair per following line. Each zone file starts
//! with its apex, followed by `name,ttl,class,type,rdata` records.

use authdns_domain::{ConfigError, RecordClass, RecordStore, RecordType, ZoneRecord};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct LoadedZones {
    pub upstream: IpAddr,
    pub store: RecordStore,
}

/// Reads the config file at `config_path` and every zone file it lists.
/// Zone file paths are resolved against the config file's directory.
pub fn load_zones(config_path: &Path) -> Result<LoadedZones, ConfigError> {
    let path_str = config_path.display().to_string();
    let contents = std::fs::read_to_string(config_path)
        .map_err(|e| ConfigError::FileRead(path_str.clone(), e.to_string()))?;

    info!(path = %path_str, "Reading zone config");

    let mut lines = significant_lines(&contents);
    let upstream_line = lines
        .next()
        .ok_or_else(|| ConfigError::Zone(path_str.clone(), "missing upstream resolver".into()))?;
    let upstream: IpAddr = upstream_line.parse().map_err(|_| {
        ConfigError::Zone(
            path_str.clone(),
            format!("'{}' is not an IP address", upstream_line),
        )
    })?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let mut store = RecordStore::new();

    for line in lines {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 2 {
            return Err(ConfigError::Zone(
                path_str,
                format!("expected 'domain,zone-file', got '{}'", line),
            ));
        }

        let zone_path: PathBuf = base_dir.join(fields[1]);
        let apex = load_zone_file(&zone_path, &mut store)?;
        if !apex.eq_ignore_ascii_case(fields[0].trim_end_matches('.')) {
            warn!(
                listed = fields[0],
                apex = %apex,
                path = %zone_path.display(),
                "Zone file apex differs from config entry, using the zone file"
            );
        }
    }

    info!(
        upstream = %upstream,
        zones = store.zone_count(),
        records = store.record_count(),
        "Zones loaded"
    );
    for apex in store.zones() {
        debug!(zone = apex, records = store.zone_records(apex).len(), "Serving zone");
    }

    Ok(LoadedZones { upstream, store })
}

fn load_zone_file(path: &Path, store: &mut RecordStore) -> Result<String, ConfigError> {
    let path_str = path.display().to_string();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::FileRead(path_str.clone(), e.to_string()))?;

    let (apex, records) = parse_zone(&contents, &path_str)?;
    info!(path = %path_str, zone = %apex, records = records.len(), "Zone file loaded");

    for record in records {
        store.add(&apex, record);
    }
    Ok(apex)
}

/// Parses a zone file body into its apex and records. Malformed record
/// lines are skipped with a warning; a missing apex is an error.
pub fn parse_zone(contents: &str, source: &str) -> Result<(String, Vec<ZoneRecord>), ConfigError> {
    let mut lines = significant_lines(contents);
    let apex = lines
        .next()
        .map(|line| line.trim_end_matches('.').to_ascii_lowercase())
        .ok_or_else(|| ConfigError::Zone(source.to_string(), "missing zone apex".into()))?;

    let mut records = Vec::new();
    for line in lines {
        match parse_record_line(line) {
            Ok(record) => {
                if let Err(e) = record.encode_rdata() {
                    warn!(zone = %apex, line, error = %e, "Record rdata will not encode");
                }
                debug!(zone = %apex, name = %record.name, record_type = %record.record_type, "Record loaded");
                records.push(record);
            }
            Err(reason) => warn!(zone = %apex, line, reason = %reason, "Invalid record skipped"),
        }
    }

    Ok((apex, records))
}

/// `name,ttl,class,type,rdata`. Rdata may itself contain commas; it is
/// split into tokens on whitespace.
pub fn parse_record_line(line: &str) -> Result<ZoneRecord, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 5 {
        return Err(format!("expected 5 fields, got {}", fields.len()));
    }

    let ttl: u32 = fields[1]
        .parse()
        .map_err(|_| format!("TTL '{}' is not a number", fields[1]))?;
    let class: RecordClass = fields[2].parse()?;
    let record_type: RecordType = fields[3].parse()?;
    let rdata: Vec<String> = fields[4..]
        .join(",")
        .split_whitespace()
        .map(str::to_string)
        .collect();

    if rdata.is_empty() {
        return Err("empty rdata".to_string());
    }

    Ok(ZoneRecord::new(fields[0], record_type, class, ttl, rdata))
}

/// Non-blank lines that are not `#` comments, trimmed.
fn significant_lines(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}
