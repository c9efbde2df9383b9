mod loader;

pub use loader::{load_zones, parse_record_line, parse_zone, LoadedZones};
