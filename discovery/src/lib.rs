pub mod adapters;
pub mod discovery_actors;
pub mod orchestrator;
pub mod providers;
pub mod route_sampler;

#[cfg(test)]
mod testing;
