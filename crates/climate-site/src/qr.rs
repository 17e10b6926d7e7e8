//! QR share links
//!
//! Images come from an external QR service; this module only builds the
//! URLs it is asked for.

use crate::error::{Error, Result};
use crate::page::Page;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

pub const QR_SERVICE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";
pub const DEFAULT_QR_SIZE: u32 = 200;
pub const MIN_QR_SIZE: u32 = 10;
pub const MAX_QR_SIZE: u32 = 1000;

/// Characters a URI component keeps unescaped
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Image URL for a square QR code of `data`
pub fn qr_image_url(data: &str, size: u32) -> Result<String> {
    if !(MIN_QR_SIZE..=MAX_QR_SIZE).contains(&size) {
        return Err(Error::InvalidSize {
            size,
            min: MIN_QR_SIZE,
            max: MAX_QR_SIZE,
        });
    }
    Ok(format!(
        "{}?size={}x{}&data={}",
        QR_SERVICE_URL,
        size,
        size,
        encode_component(data)
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareTarget {
    App,
    Game,
    Dashboard,
    Calculator,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 4] = [
        ShareTarget::App,
        ShareTarget::Game,
        ShareTarget::Dashboard,
        ShareTarget::Calculator,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ShareTarget::App => "app",
            ShareTarget::Game => "game",
            ShareTarget::Dashboard => "dashboard",
            ShareTarget::Calculator => "calculator",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShareTarget::App => "Main App",
            ShareTarget::Game => "Climate Quest Game",
            ShareTarget::Dashboard => "Climate Dashboard",
            ShareTarget::Calculator => "Carbon Calculator",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ShareTarget::App => "Scan to access the complete Climate Action app",
            ShareTarget::Game => "Scan to play the educational climate game",
            ShareTarget::Dashboard => "Scan to view climate data visualizations",
            ShareTarget::Calculator => "Scan to calculate your carbon footprint",
        }
    }

    /// Linked page; the main app links the bare origin
    pub fn page(&self) -> Option<Page> {
        match self {
            ShareTarget::App => None,
            ShareTarget::Game => Some(Page::ClimateGame),
            ShareTarget::Dashboard => Some(Page::ClimateDashboard),
            ShareTarget::Calculator => Some(Page::CarbonCalculator),
        }
    }
}

/// A printable share card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    pub target: ShareTarget,
    pub label: String,
    pub description: String,
    /// Where the code points
    pub url: String,
    /// Rendered QR image
    pub image_url: String,
}

/// The site's origin (scheme and host, no trailing slash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOrigin(String);

impl SiteOrigin {
    pub fn parse(origin: &str) -> Result<Self> {
        let trimmed = origin.trim().trim_end_matches('/');
        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));
        match host {
            Some(host) if !host.is_empty() && !host.contains('/') => Ok(Self(trimmed.to_string())),
            _ => Err(Error::InvalidOrigin(origin.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute URL of a page
    pub fn page_url(&self, page: Page) -> String {
        format!("{}{}", self.0, page.path())
    }

    pub fn share_link(&self, target: ShareTarget, size: u32) -> Result<ShareLink> {
        let url = match target.page() {
            Some(page) => self.page_url(page),
            None => self.0.clone(),
        };
        Ok(ShareLink {
            target,
            label: target.label().to_string(),
            description: target.description().to_string(),
            image_url: qr_image_url(&url, size)?,
            url,
        })
    }

    /// Cards for every target, in display order
    pub fn share_links(&self, size: u32) -> Result<Vec<ShareLink>> {
        ShareTarget::ALL
            .iter()
            .map(|target| self.share_link(*target, size))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_url_encodes_data() {
        let url = qr_image_url("https://example.com/climate-game?x=1&y=2", 200).unwrap();
        assert_eq!(
            url,
            "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=https%3A%2F%2Fexample.com%2Fclimate-game%3Fx%3D1%26y%3D2"
        );
    }

    #[test]
    fn test_component_encoding_matches_uri_rules() {
        assert_eq!(encode_component("a b"), "a%20b");
        assert_eq!(encode_component("it's (ok)!*~._-"), "it's%20(ok)!*~._-");
        assert_eq!(encode_component("°C"), "%C2%B0C");
    }

    #[test]
    fn test_size_bounds() {
        assert!(qr_image_url("x", 0).is_err());
        assert!(qr_image_url("x", MAX_QR_SIZE + 1).is_err());
        assert!(qr_image_url("x", MAX_QR_SIZE).is_ok());
    }

    #[test]
    fn test_origin_parsing() {
        assert_eq!(
            SiteOrigin::parse("https://climate.example/").unwrap().as_str(),
            "https://climate.example"
        );
        assert!(SiteOrigin::parse("climate.example").is_err());
        assert!(SiteOrigin::parse("https://").is_err());
        assert!(SiteOrigin::parse("https://climate.example/app").is_err());
    }

    #[test]
    fn test_share_links() {
        let origin = SiteOrigin::parse("https://example.com").unwrap();
        let links = origin.share_links(DEFAULT_QR_SIZE).unwrap();

        assert_eq!(links.len(), 4);
        assert_eq!(links[0].label, "Main App");
        assert_eq!(links[0].url, "https://example.com");
        assert_eq!(links[1].url, "https://example.com/climate-game");
        assert_eq!(links[2].url, "https://example.com/climate-dashboard");
        assert_eq!(links[3].url, "https://example.com/carbon-calculator");
        assert_eq!(
            links[1].image_url,
            "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=https%3A%2F%2Fexample.com%2Fclimate-game"
        );
    }
}
