//! DNS wire codec (RFC 1035 §4).
//!
//! Decoding follows compression pointers; encoding always writes names as
//! plain label sequences.

pub mod builder;
pub mod header;
pub mod message;
pub mod name;
pub mod question;
pub mod resource_record;

pub use builder::{PacketBuilder, DEFAULT_PACKET_SIZE};
pub use header::{Header, HEADER_LEN};
pub use message::Message;
pub use name::{decode_name, encode_domain, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use question::{decode_question, Question};
pub use resource_record::{
    decode_resource_record, encode_resource_record, ResourceRecord, RR_FIXED_LEN,
};
