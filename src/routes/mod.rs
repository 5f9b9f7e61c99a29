pub mod contact;
mod health_check;
mod helpers;

pub use contact::submit_contact;
pub use health_check::health_check;
pub use helpers::{ApiEnvelope, error_chain_fmt, json_error_handler, not_found};
