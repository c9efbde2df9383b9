//! authdns Domain Layer
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod record_store;
pub mod wire;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::{RecordClass, RecordType, ZoneRecord, APEX};
pub use errors::DomainError;
pub use record_store::RecordStore;
pub use wire::{Header, Message, PacketBuilder, Question};
