use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage(String);

impl ContactMessage {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Message is required.".into());
        }

        let length = trimmed.graphemes(true).count();
        if !(10..=2000).contains(&length) {
            return Err("Message must be between 10 and 2000 characters.".into());
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
