//! Today's park operating information.

use serde::{Deserialize, Serialize};

/// Hours shown when live data cannot be fetched.
pub const FALLBACK_HOURS: &str = "9:00 AM – 9:00 PM (typical)";
/// Fireworks line shown when live data cannot be fetched.
pub const FALLBACK_FIREWORKS: &str = "Check official app";
/// Notes line shown when live data cannot be fetched.
pub const FALLBACK_NOTES: &str = "Could not fetch live data";
/// Notes line for a live entry that carries no posted notice.
pub const NO_NOTICES: &str = "No special notices today";

/// Where a [`ParkInfo`] value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoOrigin {
    Live,
    Fallback,
}

/// Today's hours, fireworks notice and posted notes.
///
/// Immutable once built. A refresh replaces the whole value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkInfo {
    pub hours: String,
    pub fireworks: String,
    pub notes: String,
    pub origin: InfoOrigin,
}

impl ParkInfo {
    /// A freshly scraped value.
    pub fn live(
        hours: impl Into<String>,
        fireworks: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            hours: hours.into(),
            fireworks: fireworks.into(),
            notes: notes.into(),
            origin: InfoOrigin::Live,
        }
    }

    /// The fixed value used whenever live data is unavailable.
    pub fn fallback() -> Self {
        Self {
            hours: FALLBACK_HOURS.into(),
            fireworks: FALLBACK_FIREWORKS.into(),
            notes: FALLBACK_NOTES.into(),
            origin: InfoOrigin::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == InfoOrigin::Fallback
    }
}

// Equality is over the visible triple; `origin` is diagnostic only.
impl PartialEq for ParkInfo {
    fn eq(&self, other: &Self) -> bool {
        self.hours == other.hours && self.fireworks == other.fireworks && self.notes == other.notes
    }
}

impl Eq for ParkInfo {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_exact_triple() {
        let info = ParkInfo::fallback();
        assert_eq!(info.hours, "9:00 AM – 9:00 PM (typical)");
        assert_eq!(info.fireworks, "Check official app");
        assert_eq!(info.notes, "Could not fetch live data");
        assert!(info.is_fallback());
    }

    #[test]
    fn equality_ignores_origin() {
        let live = ParkInfo::live(FALLBACK_HOURS, FALLBACK_FIREWORKS, FALLBACK_NOTES);
        assert_eq!(live, ParkInfo::fallback());
        assert!(!live.is_fallback());
    }

    #[test]
    fn serializes_origin_lowercase() {
        let json = serde_json::to_value(ParkInfo::fallback()).unwrap();
        assert_eq!(json["origin"], "fallback");
        assert_eq!(json["hours"], FALLBACK_HOURS);
    }
}
