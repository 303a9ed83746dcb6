//! Grounding prompt composition.

use parkguide_catalog::grounding_knowledge;
use parkguide_core::ParkInfo;

/// Persona and ground rules sent at the top of every prompt.
pub const PERSONA: &str = "\
You are a helpful AI assistant for Shanghai Disneyland Resort. Provide accurate information about:
- Park attractions and entertainment
- Dining options and recommendations
- Operating hours and ticket information
- Guest services and accessibility
- Park navigation and tips
- Weather considerations and seasonal events

Always be friendly, accurate, and focused on enhancing the guest experience.
If you don't know specific details, direct guests to check the official Shanghai Disneyland website or app.";

/// Build the single prompt sent for `question`.
///
/// Only today's park info and the static knowledge ground the answer; the
/// visitor's earlier turns are not included.
pub fn compose_prompt(info: &ParkInfo, question: &str) -> String {
    format!(
        "{PERSONA}\n\n\
         Current park info: Hours: {hours}, Fireworks: {fireworks}, Notes: {notes}\n\n\
         {knowledge}\n\n\
         User question: {question}",
        hours = info.hours,
        fireworks = info.fireworks,
        notes = info.notes,
        knowledge = grounding_knowledge(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_appear_in_order() {
        let info = ParkInfo::live("9:00 AM – 9:00 PM", "Ignite the Dream 8:30 PM", "None");
        let prompt = compose_prompt(&info, "Where is the nearest toilet?");

        let persona = prompt.find("helpful AI assistant").unwrap();
        let hours = prompt.find("Hours: 9:00 AM – 9:00 PM").unwrap();
        let knowledge = prompt.find("Metro Line 11").unwrap();
        let question = prompt.find("User question: Where is the nearest toilet?").unwrap();

        assert!(persona < hours && hours < knowledge && knowledge < question);
        assert!(prompt.ends_with("User question: Where is the nearest toilet?"));
    }

    #[test]
    fn fallback_info_is_passed_through() {
        let prompt = compose_prompt(&ParkInfo::fallback(), "Fireworks?");
        assert!(prompt.contains("Fireworks: Check official app"));
        assert!(prompt.contains("Notes: Could not fetch live data"));
    }
}
