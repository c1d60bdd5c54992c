//! PPTX (Office Open XML) export backend for slide decks.
//!
//! Produces .pptx files, which are ZIP archives containing XML documents.

pub mod media;
pub mod shapes;
pub mod writer;

pub use media::{resolve_image, PictureFormat, ResolvedImage};
pub use writer::{export_file_name, PptxWriter, PPTX_MIME};
