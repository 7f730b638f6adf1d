use std::fmt;
use std::str::FromStr;

use super::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Pdf,
    Video,
    Document,
    Link,
    Other,
}

impl MaterialKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MaterialKind::Pdf => "pdf",
            MaterialKind::Video => "video",
            MaterialKind::Document => "document",
            MaterialKind::Link => "link",
            MaterialKind::Other => "other",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(MaterialKind::Pdf),
            "video" => Ok(MaterialKind::Video),
            "document" | "doc" => Ok(MaterialKind::Document),
            "link" | "url" => Ok(MaterialKind::Link),
            "other" => Ok(MaterialKind::Other),
            _ => Err(DomainError::UnknownMaterialKind(s.to_string())),
        }
    }
}
