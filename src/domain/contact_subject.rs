use unicode_segmentation::UnicodeSegmentation;

/// Optional at the submission level; a present subject must fit 200 graphemes
/// after trimming. Blank subjects are dropped before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubject(String);

impl ContactSubject {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.graphemes(true).count() > 200 {
            return Err("Subject must be under 200 characters.".into());
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for ContactSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
