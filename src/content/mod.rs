//! Static and structured reference content.

pub mod reference;
pub mod texts;

pub use reference::ReferenceData;
