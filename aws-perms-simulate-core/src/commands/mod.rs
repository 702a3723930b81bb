//! Commands module - service layer for permission simulation operations

mod resolve;
pub(crate) mod service;
mod simulate;

pub use service::PermsSimulateService;
