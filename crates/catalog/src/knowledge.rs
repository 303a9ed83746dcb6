//! Static domain knowledge fed to the assistant with every question.

use crate::content::RESTROOMS;
use std::sync::LazyLock;

static GROUNDING_KNOWLEDGE: LazyLock<String> = LazyLock::new(|| {
    let mut out = String::from("Park knowledge:\n");

    out.push_str("Transport:\n");
    out.push_str("- Metro Line 11 to Disney Resort Station (terminal stop): ~50–70 min from People's Square, ¥7; first train ~6:00 AM, last ~22:30; Exit 1 or 2, then a 5–10 min walk.\n");
    out.push_str("- DiDi / taxi: 40–70 min from downtown (¥80–150), ~30–45 min from PVG airport (¥150–200). Avoid unlicensed taxis at closing.\n");

    out.push_str("Restrooms (over 30 in the park, all on the official app map):\n");
    for location in RESTROOMS {
        out.push_str("- ");
        out.push_str(location);
        out.push('\n');
    }
    out.push_str("- Baby Care Centers: Mickey Avenue (main) and Fantasyland near Alice Wonderland Maze.\n");

    out.push_str("Must-do rides:\n");
    out.push_str("- TRON Lightcycle Power Run (Tomorrowland)\n");
    out.push_str("- Pirates of the Caribbean: Battle for the Sunken Treasure (Treasure Cove)\n");
    out.push_str("- Seven Dwarfs Mine Train and Peter Pan's Flight (Fantasyland)\n");
    out.push_str("- Voyage to the Crystal Grotto (Gardens of Imagination)\n");
    out.push_str("- Zootopia land (opened 2023), family rides\n");

    out.push_str("Dining: quick service at Donald's Diner, Royal Banquet Hall, Wandering Moon Teahouse; table service (reserve in the app) at Crystal Palace, Walt's Restaurant, Enchanted Tale (character dining).\n");
    out.push_str("Tickets: official app/site only, 1-day ¥399–¥799 depending on date.");
    out
});

/// The knowledge block appended to every grounding prompt.
pub fn grounding_knowledge() -> &'static str {
    &GROUNDING_KNOWLEDGE
}
