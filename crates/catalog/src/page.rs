//! The closed set of navigable sections and Attractions sub-tabs.

use serde::{Deserialize, Serialize};

/// One of the seven sections in the sidebar.
///
/// Serializes as its URL slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKey {
    Overview,
    GettingToThePark,
    Attractions,
    Dining,
    ToiletsAndBabyCare,
    HoursAndTickets,
    AiAssistant,
}

impl PageKey {
    /// Sidebar order.
    pub const ALL: [PageKey; 7] = [
        PageKey::Overview,
        PageKey::GettingToThePark,
        PageKey::Attractions,
        PageKey::Dining,
        PageKey::ToiletsAndBabyCare,
        PageKey::HoursAndTickets,
        PageKey::AiAssistant,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::GettingToThePark => "getting-to-the-park",
            Self::Attractions => "attractions",
            Self::Dining => "dining",
            Self::ToiletsAndBabyCare => "toilets-and-baby-care",
            Self::HoursAndTickets => "hours-and-tickets",
            Self::AiAssistant => "ai-assistant",
        }
    }

    /// Label shown in the sidebar.
    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::GettingToThePark => "Getting to the Park",
            Self::Attractions => "Attractions",
            Self::Dining => "Dining",
            Self::ToiletsAndBabyCare => "Toilets & Baby Care",
            Self::HoursAndTickets => "Hours & Tickets",
            Self::AiAssistant => "AI Assistant",
        }
    }

    /// Parse a URL slug. Unknown slugs are `None`.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.slug() == slug)
    }
}

impl std::fmt::Display for PageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// An Attractions sub-tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Land {
    MickeyAve,
    Gardens,
    Fantasyland,
    Tomorrowland,
    TreasureCove,
    Zootopia,
}

impl Land {
    /// Tab order.
    pub const ALL: [Land; 6] = [
        Land::MickeyAve,
        Land::Gardens,
        Land::Fantasyland,
        Land::Tomorrowland,
        Land::TreasureCove,
        Land::Zootopia,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::MickeyAve => "mickey-ave",
            Self::Gardens => "gardens",
            Self::Fantasyland => "fantasyland",
            Self::Tomorrowland => "tomorrowland",
            Self::TreasureCove => "treasure-cove",
            Self::Zootopia => "zootopia",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::MickeyAve => "Mickey Ave",
            Self::Gardens => "Gardens",
            Self::Fantasyland => "Fantasyland",
            Self::Tomorrowland => "Tomorrowland",
            Self::TreasureCove => "Treasure Cove",
            Self::Zootopia => "Zootopia",
        }
    }
}
