pub mod config;
pub mod decode;
pub mod engine;
pub mod errors;
pub mod fingerprint;
pub mod judge;
pub mod metrics_api;
pub mod model;
pub mod providers;
