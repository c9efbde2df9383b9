//! authdns Infrastructure Layer
pub mod dns;
pub mod zone;
