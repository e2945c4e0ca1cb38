//! Responsibility boundaries:
//! - run.rs: evaluate / get_reason flows
//! - client.rs: model call + decode boundary

pub(crate) mod client;
pub(crate) mod run;
