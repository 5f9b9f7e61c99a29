use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

impl ContactName {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Name is required.".into());
        }

        let length = trimmed.graphemes(true).count();
        if !(2..=100).contains(&length) {
            return Err("Name must be between 2 and 100 characters.".into());
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
