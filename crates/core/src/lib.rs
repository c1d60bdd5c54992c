//! Core domain types, mutation operations, validation, and persistence
//! for slide-deck documents.

pub mod editor;
pub mod error;
pub mod mutate;
pub mod store;
pub mod template;
pub mod types;
pub mod validate;

pub use editor::Editor;
pub use error::{Error, Result};
pub use mutate::{BrandUpdate, MetaUpdate, SlideUpdate};
pub use store::{DocumentStore, KeyValueStore, MemoryStore};
pub use template::{SlideTemplate, SLIDE_TEMPLATES};
pub use types::{BrandSettings, LogoPosition, Presentation, Slide, SlideContent, SlideKind};
pub use validate::validate_for_export;
