use validator::ValidateEmail;

/// A syntactically valid, normalized (trimmed and lowercased) email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(s: String) -> Result<Self, String> {
        let normalized = s.trim().to_lowercase();

        if normalized.is_empty() {
            return Err("Email is required.".into());
        }
        if !normalized.validate_email() {
            return Err("A valid email address is required.".into());
        }

        Ok(Self(normalized))
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
