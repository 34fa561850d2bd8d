pub mod discovery_messages;
pub mod selection_messages;
pub mod trip_messages;

pub use discovery_messages::*;
pub use selection_messages::*;
pub use trip_messages::*;
