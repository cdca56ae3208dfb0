/// Name used to greet the recipient of a verification email.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Blank or absent names fall back to [`DEFAULT_DISPLAY_NAME`].
    pub fn parse(raw: Option<String>) -> Self {
        match raw {
            Some(name) if !name.trim().is_empty() => Self(name.trim().to_owned()),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DisplayName {
    fn default() -> Self {
        Self(DEFAULT_DISPLAY_NAME.to_owned())
    }
}
