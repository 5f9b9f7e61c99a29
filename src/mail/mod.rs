pub mod composer;
mod relay;

pub use composer::OutgoingEmail;
#[cfg(test)]
pub use relay::MockMailRelay;
pub use relay::{MailRelay, SandboxMailRelay, SmtpMailRelay};
