pub mod serve;
pub mod snapshot;
pub mod sources;
