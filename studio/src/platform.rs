//! Target social platforms and their canvas dimensions.

#[cfg(test)]
#[path = "platform_test.rs"]
mod platform_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::Size;

/// Social platform a campaign graphic is sized for.
///
/// Unknown identifiers resolve to [`Platform::Instagram`], on parse and on
/// deserialization alike, so the dimension lookup is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Platform {
    #[default]
    Instagram,
    Facebook,
    Twitter,
    Linkedin,
}

impl Platform {
    pub const ALL: [Self; 4] = [Self::Instagram, Self::Facebook, Self::Twitter, Self::Linkedin];

    /// Resolve a platform identifier, falling back to Instagram.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "facebook" => Self::Facebook,
            "twitter" => Self::Twitter,
            "linkedin" => Self::Linkedin,
            _ => Self::Instagram,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
            Self::Linkedin => "linkedin",
        }
    }
}

impl From<String> for Platform {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canvas size in logical pixels for a platform.
#[must_use]
pub fn dimensions_for(platform: Platform) -> Size {
    match platform {
        Platform::Instagram => Size::new(600, 600),
        Platform::Facebook | Platform::Linkedin => Size::new(600, 315),
        Platform::Twitter => Size::new(600, 335),
    }
}
