mod mock_forwarder;
mod zones;

pub use mock_forwarder::*;
pub use zones::*;
