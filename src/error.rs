use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum DigestError {
    Config(String),
    InvalidUrl(String),
    Http(String),
    Io(String),
    Region(pdf_regions::RegionError),
}

impl DigestError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Http(_) => "http_error",
            Self::Io(_) => "io_error",
            Self::Region(_) => "region_error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Config(message)
            | Self::InvalidUrl(message)
            | Self::Http(message)
            | Self::Io(message) => message.clone(),
            Self::Region(error) => error.to_string(),
        }
    }
}

impl Display for DigestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for DigestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Region(error) => Some(error),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DigestError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error.to_string())
    }
}

impl From<std::io::Error> for DigestError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<url::ParseError> for DigestError {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidUrl(error.to_string())
    }
}

impl From<serde_json::Error> for DigestError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}

impl From<pdf_regions::RegionError> for DigestError {
    fn from(error: pdf_regions::RegionError) -> Self {
        Self::Region(error)
    }
}
