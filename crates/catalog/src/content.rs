//! Static page payloads.
//!
//! Text may mark emphasis with `**double asterisks**`; the renderer turns
//! those into bold after escaping.

use crate::page::{Land, PageKey};
use serde::Serialize;

/// One display block on a page.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { text: &'static str },
    Text { text: &'static str },
    Bullets { items: &'static [&'static str] },
    Columns { columns: &'static [Column] },
    Tabs { tabs: &'static [LandTab] },
    Callout { text: &'static str },
    /// Filled in by the renderer from today's park info.
    LiveHours { label: &'static str },
}

/// A titled column inside [`Block::Columns`].
#[derive(Debug, Serialize)]
pub struct Column {
    pub heading: &'static str,
    pub blocks: &'static [Block],
}

/// One Attractions sub-tab.
#[derive(Debug, Serialize)]
pub struct LandTab {
    pub land: Land,
    pub title: &'static str,
    pub text: &'static str,
}

/// A static page.
#[derive(Debug, Serialize)]
pub struct Page {
    pub key: PageKey,
    pub title: &'static str,
    pub blocks: &'static [Block],
}

pub const SITE_TITLE: &str = "Shanghai Disney Quick Guide";
pub const SITE_CAPTION: &str =
    "Fast, no-nonsense info for busy guests · Data updated live where possible";
pub const FOOTER: &str = "Data from official Shanghai Disney Resort · Always double-check the official app for live wait times & changes";

static OVERVIEW: Page = Page {
    key: PageKey::Overview,
    title: "Overview",
    blocks: &[Block::Text {
        text: "Unique castle, TRON, Pirates battle ride. 8 lands now with Zootopia (opened 2023). Download the official Shanghai Disney Resort app for real-time wait times & map.",
    }],
};

static GETTING_TO_THE_PARK: Page = Page {
    key: PageKey::GettingToThePark,
    title: "Best Ways to Shanghai Disneyland",
    blocks: &[
        Block::Columns {
            columns: &[
                Column {
                    heading: "Metro Line 11 (Cheapest & Most Reliable)",
                    blocks: &[Block::Bullets {
                        items: &[
                            "Direct to **Disney Resort Station** (terminal stop)",
                            "From People's Square / Nanjing Rd: ~50–70 min, ¥7",
                            "First train ~6:00 AM, last ~22:30",
                            "Exit 1 or 2 → 5–10 min walk to park gates",
                            "Pro tip: Buy a Shanghai Public Transportation Card or use WeChat/Alipay",
                        ],
                    }],
                },
                Column {
                    heading: "DiDi / Taxi (Fastest with luggage/kids)",
                    blocks: &[Block::Bullets {
                        items: &[
                            "DiDi English version works great",
                            "From downtown: 40–70 min, ¥80–150",
                            "From PVG airport: ~30–45 min, ¥150–200",
                            "Drop-off: Search “上海迪士尼乐园” or “Disney Car & Coach Parking Lot”",
                            "Early entry hotel guests: Ask for “Mickey Parking Lot” (closer)",
                        ],
                    }],
                },
            ],
        },
        Block::Callout {
            text: "Avoid random taxis outside the resort at closing. Use DiDi to avoid scams.",
        },
    ],
};

static ATTRACTIONS: Page = Page {
    key: PageKey::Attractions,
    title: "Must-Know Rides & Shows",
    blocks: &[Block::Tabs {
        tabs: &[
            LandTab {
                land: Land::MickeyAve,
                title: "Parades & Character Greetings",
                text: "Main street with Disney parades and meet-and-greets.",
            },
            LandTab {
                land: Land::Gardens,
                title: "Voyage to the Crystal Grotto",
                text: "Disney Princess dark ride. Best for kids. Dumbo ride nearby.",
            },
            LandTab {
                land: Land::Fantasyland,
                title: "Seven Dwarfs Mine Train",
                text: "Gentle coaster. Peter Pan's Flight. Enchanted Storybook Castle.",
            },
            LandTab {
                land: Land::Tomorrowland,
                title: "TRON Lightcycle Power Run",
                text: "Must-do! Space Mountain. Buzz Lightyear.",
            },
            LandTab {
                land: Land::TreasureCove,
                title: "Pirates of the Caribbean: Battle for the Sunken Treasure",
                text: "Boat ride with drops.",
            },
            LandTab {
                land: Land::Zootopia,
                title: "Zootopia",
                text: "New land (2023). Hot dog eating contest show. Gentle rides for families.",
            },
        ],
    }],
};

static DINING: Page = Page {
    key: PageKey::Dining,
    title: "Food Options",
    blocks: &[
        Block::Columns {
            columns: &[
                Column {
                    heading: "Quick Service",
                    blocks: &[Block::Bullets {
                        items: &[
                            "**Donald's Diner** (American burgers/hot dogs)",
                            "**Royal Banquet Hall** (Chinese dishes)",
                            "**Wandering Moon Teahouse** (Asian fusion)",
                        ],
                    }],
                },
                Column {
                    heading: "Table Service (Reservations Recommended)",
                    blocks: &[Block::Bullets {
                        items: &[
                            "**Crystal Palace Restaurant**",
                            "**Walt's Restaurant**",
                            "**Enchanted Tale Restaurant** (character dining)",
                        ],
                    }],
                },
            ],
        },
        Block::Callout {
            text: "Best bet: Quick service for speed. Make reservations for table service via official app.",
        },
    ],
};

static TOILETS_AND_BABY_CARE: Page = Page {
    key: PageKey::ToiletsAndBabyCare,
    title: "Toilet Locations (Every guest asks this!)",
    blocks: &[
        Block::Text {
            text: "There are **over 30 toilet facilities** inside the park, marked on the official app map (filter → Restrooms).",
        },
        Block::Text {
            text: "Quick list of the most useful ones (always clean, air-conditioned):",
        },
        Block::Bullets { items: RESTROOMS },
        Block::Text {
            text: "**Western sitting toilets** are always available (usually 20–30% of stalls, marked with ♿ or at the back).",
        },
        Block::Heading {
            text: "Baby Care Centers (diaper changing, nursing, microwave)",
        },
        Block::Bullets {
            items: &["Mickey Avenue (main one)", "Fantasyland (near Alice Wonderland Maze)"],
        },
        Block::Callout {
            text: "Use the official Shanghai Disney Resort app → Map → filter 'Restrooms' for GPS directions.",
        },
    ],
};

static HOURS_AND_TICKETS: Page = Page {
    key: PageKey::HoursAndTickets,
    title: "Hours & Tickets",
    blocks: &[
        Block::LiveHours { label: "Live today" },
        Block::Text {
            text: "Tickets: Buy only on official app/site. 1-day from ¥399–¥799 depending on date.",
        },
    ],
};

pub(crate) const RESTROOMS: &[&str] = &[
    "Entrance / Mickey Avenue, right after security",
    "Near TRON (Tomorrowland), biggest & least crowded",
    "Behind Enchanted Storybook Castle (Fantasyland)",
    "Treasure Cove, next to Pirates",
    "Zootopia, near the hot-dog stand",
    "Adventure Isle, near Roaring Rapids",
    "Gardens of Imagination, near Dumbo",
];

/// The static page for `key`. The assistant section has none.
pub fn page(key: PageKey) -> Option<&'static Page> {
    match key {
        PageKey::Overview => Some(&OVERVIEW),
        PageKey::GettingToThePark => Some(&GETTING_TO_THE_PARK),
        PageKey::Attractions => Some(&ATTRACTIONS),
        PageKey::Dining => Some(&DINING),
        PageKey::ToiletsAndBabyCare => Some(&TOILETS_AND_BABY_CARE),
        PageKey::HoursAndTickets => Some(&HOURS_AND_TICKETS),
        PageKey::AiAssistant => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_static_section_has_a_page() {
        for key in PageKey::ALL {
            match page(key) {
                Some(p) => {
                    assert_eq!(p.key, key);
                    assert!(!p.blocks.is_empty());
                }
                None => assert_eq!(key, PageKey::AiAssistant),
            }
        }
    }

    #[test]
    fn attractions_has_one_tab_per_land_in_order() {
        let Some(Page {
            blocks: [Block::Tabs { tabs }],
            ..
        }) = page(PageKey::Attractions)
        else {
            panic!("attractions page should be a single tab group");
        };
        let lands: Vec<Land> = tabs.iter().map(|t| t.land).collect();
        assert_eq!(lands, Land::ALL);
    }

    #[test]
    fn hours_page_carries_live_placeholder() {
        let hours = page(PageKey::HoursAndTickets).unwrap();
        assert!(
            hours
                .blocks
                .iter()
                .any(|b| matches!(b, Block::LiveHours { .. }))
        );
    }

    #[test]
    fn blocks_serialize_with_type_tag() {
        let json = serde_json::to_value(page(PageKey::Dining).unwrap()).unwrap();
        assert_eq!(json["key"], "dining");
        assert_eq!(json["blocks"][0]["type"], "columns");
        assert_eq!(json["blocks"][0]["columns"][0]["heading"], "Quick Service");
        assert_eq!(json["blocks"][1]["type"], "callout");
    }
}
