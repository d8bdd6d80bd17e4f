#![forbid(unsafe_code)]

pub mod access_guard;
pub mod event_log;
pub mod measurement;
pub mod ownership;
