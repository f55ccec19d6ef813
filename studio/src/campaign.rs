//! Campaign input: what the form collaborator hands to the studio.
//!
//! DESIGN
//! ======
//! `CampaignSpec` mirrors the form's JSON (camelCase keys, `type` for the
//! campaign kind). The paid-only fields are stored flat, as on the wire, but
//! are only reachable for layout through [`CampaignSpec::paid_fields`], which
//! yields nothing for organic campaigns. The optional source image travels as
//! base64 (a bare string or a `data:` URL).

#[cfg(test)]
#[path = "campaign_test.rs"]
mod campaign_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("invalid campaign JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignKind {
    #[default]
    Organic,
    Paid,
}

/// The fixed call-to-action buttons a paid campaign can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallToAction {
    ShopNow,
    LearnMore,
    SignUp,
    Download,
    ContactUs,
}

impl CallToAction {
    pub const ALL: [Self; 5] = [Self::ShopNow, Self::LearnMore, Self::SignUp, Self::Download, Self::ContactUs];

    /// Wire identifier, e.g. `shop_now`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShopNow => "shop_now",
            Self::LearnMore => "learn_more",
            Self::SignUp => "sign_up",
            Self::Download => "download",
            Self::ContactUs => "contact_us",
        }
    }

    /// Button label: upper-case words, e.g. `SHOP NOW`.
    #[must_use]
    pub fn label(self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

impl fmt::Display for CallToAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Campaign data collected by the form. Immutable once handed over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSpec {
    #[serde(rename = "type", alias = "kind")]
    pub kind: CampaignKind,
    pub platform: Platform,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hashtags: String,
    #[serde(default)]
    pub primary_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<CallToAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_description: Option<String>,
    #[serde(default, alias = "uploadedImage", with = "base64_image", skip_serializing_if = "Option::is_none")]
    pub source_image: Option<Vec<u8>>,
}

/// Read-only view of the paid-only campaign fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaidFields<'a> {
    pub website_url: Option<&'a str>,
    pub call_to_action: Option<CallToAction>,
    pub headline: Option<&'a str>,
    pub ad_description: Option<&'a str>,
}

impl CampaignSpec {
    /// Parse a campaign from the form's JSON payload and validate it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidJson` for malformed input and `MissingField` when the
    /// description is blank.
    pub fn from_json(raw: &str) -> Result<Self, CampaignError> {
        let spec: Self = serde_json::from_str(raw)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Check the minimum the form guarantees: a non-blank description.
    ///
    /// # Errors
    ///
    /// Returns `MissingField("description")` when the description is blank.
    pub fn validate(&self) -> Result<(), CampaignError> {
        if is_blank(&self.description) {
            return Err(CampaignError::MissingField("description"));
        }
        Ok(())
    }

    /// Paid-only fields; `None` for organic campaigns regardless of what was sent.
    #[must_use]
    pub fn paid_fields(&self) -> Option<PaidFields<'_>> {
        if self.kind != CampaignKind::Paid {
            return None;
        }
        Some(PaidFields {
            website_url: non_blank(self.website_url.as_deref()),
            call_to_action: self.call_to_action,
            headline: non_blank(self.headline.as_deref()),
            ad_description: non_blank(self.ad_description.as_deref()),
        })
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// `Some(s)` only when `s` has visible content.
pub(crate) fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !is_blank(v))
}

// =============================================================================
// TEMPLATES
// =============================================================================

/// A stylistic preset chosen from the gallery before editing begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRef {
    pub id: String,
    pub name: String,
    pub category: String,
}

const TEMPLATE_NAMES: [&str; 5] =
    ["Bold Gradient", "Minimalist Clean", "Dynamic Layout", "Creative Splash", "Professional Focus"];

/// The built-in template gallery for a platform.
#[must_use]
pub fn catalog(platform: Platform) -> Vec<TemplateRef> {
    TEMPLATE_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| TemplateRef {
            id: (i + 1).to_string(),
            name: (*name).to_string(),
            category: platform.as_str().to_string(),
        })
        .collect()
}

/// Look up a template by id in a platform's catalog.
#[must_use]
pub fn find_template(platform: Platform, id: &str) -> Option<TemplateRef> {
    catalog(platform).into_iter().find(|t| t.id == id)
}

// =============================================================================
// BASE64 IMAGE FIELD
// =============================================================================

mod base64_image {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, ser: S) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(b) => ser.serialize_str(&STANDARD.encode(b)),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Vec<u8>>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(de)? else {
            return Ok(None);
        };
        let payload = match raw.split_once(";base64,") {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => raw.as_str(),
        };
        if payload.trim().is_empty() {
            return Ok(None);
        }
        STANDARD.decode(payload.trim()).map(Some).map_err(serde::de::Error::custom)
    }
}
