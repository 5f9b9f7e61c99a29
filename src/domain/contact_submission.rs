use crate::routes::contact::SubmissionPayload;

use super::{ContactEmail, ContactMessage, ContactName, ContactSubject};

/// A fully validated contact-form submission. Constructing one is the only
/// way past validation; the mail layer never re-checks these fields.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub subject: Option<ContactSubject>,
    pub message: ContactMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: String) -> Self {
        Self {
            field: field.into(),
            message,
        }
    }
}

impl TryFrom<SubmissionPayload> for ContactSubmission {
    type Error = Vec<FieldError>;

    /// Checks every field and reports all failures at once, so the caller
    /// can surface the full list in a single 422 response.
    fn try_from(payload: SubmissionPayload) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let name = match ContactName::parse(payload.name.unwrap_or_default()) {
            Ok(name) => Some(name),
            Err(message) => {
                errors.push(FieldError::new("name", message));
                None
            }
        };

        let email = match ContactEmail::parse(payload.email.unwrap_or_default()) {
            Ok(email) => Some(email),
            Err(message) => {
                errors.push(FieldError::new("email", message));
                None
            }
        };

        let subject = match payload.subject {
            Some(raw) if !raw.trim().is_empty() => match ContactSubject::parse(raw) {
                Ok(subject) => Some(subject),
                Err(message) => {
                    errors.push(FieldError::new("subject", message));
                    None
                }
            },
            _ => None,
        };

        let message = match ContactMessage::parse(payload.message.unwrap_or_default()) {
            Ok(message) => Some(message),
            Err(message) => {
                errors.push(FieldError::new("message", message));
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        // All four parses succeeded, the options are guaranteed filled.
        Ok(Self {
            name: name.unwrap(),
            email: email.unwrap(),
            subject,
            message: message.unwrap(),
        })
    }
}
