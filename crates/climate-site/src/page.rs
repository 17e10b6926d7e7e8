//! Page names and their paths

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    Home,
    ClimateDashboard,
    CarbonCalculator,
    ClimateGame,
    #[serde(rename = "SDG13Targets")]
    Sdg13Targets,
    #[serde(rename = "QRCodes")]
    QrCodes,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::ClimateDashboard,
        Page::CarbonCalculator,
        Page::ClimateGame,
        Page::Sdg13Targets,
        Page::QrCodes,
    ];

    /// Logical page name as used in links
    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::ClimateDashboard => "ClimateDashboard",
            Page::CarbonCalculator => "CarbonCalculator",
            Page::ClimateGame => "ClimateGame",
            Page::Sdg13Targets => "SDG13Targets",
            Page::QrCodes => "QRCodes",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::ClimateDashboard => "/climate-dashboard",
            Page::CarbonCalculator => "/carbon-calculator",
            Page::ClimateGame => "/climate-game",
            Page::Sdg13Targets => "/sdg13-targets",
            Page::QrCodes => "/qr-codes",
        }
    }

    pub fn from_name(name: &str) -> Option<Page> {
        Self::ALL.into_iter().find(|page| page.name() == name)
    }

    /// Path lookup; ignores a trailing slash, query and fragment
    pub fn from_path(path: &str) -> Option<Page> {
        let path = path.split(|c| c == '?' || c == '#').next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|page| page.path() == normalized)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Path for a page name; unknown names go home
pub fn page_url(name: &str) -> &'static str {
    Page::from_name(name).unwrap_or(Page::Home).path()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table() {
        assert_eq!(page_url("Home"), "/");
        assert_eq!(page_url("ClimateDashboard"), "/climate-dashboard");
        assert_eq!(page_url("CarbonCalculator"), "/carbon-calculator");
        assert_eq!(page_url("ClimateGame"), "/climate-game");
        assert_eq!(page_url("SDG13Targets"), "/sdg13-targets");
        assert_eq!(page_url("QRCodes"), "/qr-codes");
    }

    #[test]
    fn test_unknown_name_goes_home() {
        assert_eq!(page_url("Nowhere"), "/");
        assert_eq!(page_url("climategame"), "/");
    }

    #[test]
    fn test_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_name(page.name()), Some(page));
            assert_eq!(Page::from_path(page.path()), Some(page));
        }
    }

    #[test]
    fn test_path_normalization() {
        assert_eq!(Page::from_path("/climate-game/"), Some(Page::ClimateGame));
        assert_eq!(Page::from_path("/qr-codes?print=1"), Some(Page::QrCodes));
        assert_eq!(Page::from_path(""), Some(Page::Home));
        assert_eq!(Page::from_path("/missing"), None);
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(ron::to_string(&Page::Sdg13Targets).unwrap(), "SDG13Targets");
        assert_eq!(Page::QrCodes.to_string(), "QRCodes");
    }
}
