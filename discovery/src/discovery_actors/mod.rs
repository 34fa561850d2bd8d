pub mod discovery_service;
pub mod selection_state;
