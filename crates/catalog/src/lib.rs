//! Static visitor guidance for Park Guide.
//!
//! Everything here is `'static` data: the seven sidebar sections
//! ([`PageKey`]), the Attractions sub-tabs ([`Land`]), each section's
//! display blocks, and the knowledge block used to ground assistant answers.
//! [`resolve`] maps a section to what should be rendered.

pub mod content;
pub mod knowledge;
pub mod navigation;
pub mod page;

pub use content::{Block, Column, FOOTER, LandTab, Page, SITE_CAPTION, SITE_TITLE};
pub use knowledge::grounding_knowledge;
pub use navigation::{ContentDescriptor, resolve};
pub use page::{Land, PageKey};
