mod contact_handler;
mod errors;
mod types;

pub use contact_handler::{CONFIRMATION_MESSAGE, submit_contact};
pub use errors::ContactError;
pub use types::SubmissionPayload;
