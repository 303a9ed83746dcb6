//! Page-key dispatch.

use crate::content::{Page, page};
use crate::page::PageKey;
use serde::Serialize;

/// What to render for a page key.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentDescriptor {
    /// A static page from the catalog.
    Static { page: &'static Page },
    /// The chat surface.
    Assistant { key: PageKey, title: &'static str },
}

impl ContentDescriptor {
    pub fn key(&self) -> PageKey {
        match self {
            Self::Static { page } => page.key,
            Self::Assistant { key, .. } => *key,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Static { page } => page.title,
            Self::Assistant { title, .. } => *title,
        }
    }
}

/// Map a page key to its content. Total over [`PageKey`].
pub fn resolve(key: PageKey) -> ContentDescriptor {
    match page(key) {
        Some(page) => ContentDescriptor::Static { page },
        None => ContentDescriptor::Assistant {
            key,
            title: "Smart Disney Assistant",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_key_to_itself() {
        for key in PageKey::ALL {
            assert_eq!(resolve(key).key(), key);
        }
    }

    #[test]
    fn descriptor_titles() {
        assert_eq!(resolve(PageKey::AiAssistant).title(), "Smart Disney Assistant");
        assert_eq!(
            resolve(PageKey::Dining).title(),
            crate::content::page(PageKey::Dining).unwrap().title
        );
    }

    #[test]
    fn assistant_key_resolves_to_chat_surface() {
        assert!(matches!(
            resolve(PageKey::AiAssistant),
            ContentDescriptor::Assistant { .. }
        ));
        assert!(matches!(
            resolve(PageKey::Dining),
            ContentDescriptor::Static { .. }
        ));
    }

    #[test]
    fn descriptor_json_is_tagged() {
        let json = serde_json::to_value(resolve(PageKey::AiAssistant)).unwrap();
        assert_eq!(json["kind"], "assistant");
        assert_eq!(json["key"], "ai-assistant");

        let json = serde_json::to_value(resolve(PageKey::Overview)).unwrap();
        assert_eq!(json["kind"], "static");
        assert_eq!(json["page"]["title"], "Overview");
    }
}
