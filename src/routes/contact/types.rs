/// The raw request body, before validation. Every field is optional so that
/// missing keys surface as field-level validation errors instead of a
/// deserialization failure.
#[derive(serde::Deserialize, Debug)]
pub struct SubmissionPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}
