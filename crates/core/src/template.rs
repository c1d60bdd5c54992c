//! Slide template catalog.
//!
//! One template per layout variant: a display name, a one-line
//! description, and the default content a freshly added slide starts with.

use crate::types::{SlideContent, SlideKind};

/// A catalog entry describing one slide layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideTemplate {
    pub kind: SlideKind,
    pub name: &'static str,
    pub description: &'static str,
}

/// All available templates, in catalog order.
pub const SLIDE_TEMPLATES: &[SlideTemplate] = &[
    SlideTemplate {
        kind: SlideKind::Title,
        name: "Title Slide",
        description: "Perfect for presentation opening with title and subtitle",
    },
    SlideTemplate {
        kind: SlideKind::Content,
        name: "Content Slide",
        description: "Standard slide with title and bullet points",
    },
    SlideTemplate {
        kind: SlideKind::TwoColumn,
        name: "Two Column",
        description: "Split content into two columns for comparison",
    },
    SlideTemplate {
        kind: SlideKind::ImageFocus,
        name: "Image Focus",
        description: "Highlight images with minimal text overlay",
    },
    SlideTemplate {
        kind: SlideKind::Blank,
        name: "Blank Slide",
        description: "Start with a completely blank canvas",
    },
];

/// Look up the catalog entry for a layout variant.
pub fn template_for(kind: SlideKind) -> &'static SlideTemplate {
    match kind {
        SlideKind::Title => &SLIDE_TEMPLATES[0],
        SlideKind::Content => &SLIDE_TEMPLATES[1],
        SlideKind::TwoColumn => &SLIDE_TEMPLATES[2],
        SlideKind::ImageFocus => &SLIDE_TEMPLATES[3],
        SlideKind::Blank => &SLIDE_TEMPLATES[4],
    }
}

/// Default content for a newly added slide of the given kind.
pub fn default_content(kind: SlideKind) -> SlideContent {
    match kind {
        SlideKind::Title => SlideContent::Title {
            title: "New Title".to_string(),
            subtitle: "Subtitle here".to_string(),
        },
        SlideKind::Content => SlideContent::Content {
            title: "New Slide".to_string(),
            body: "Add your content here...".to_string(),
        },
        SlideKind::TwoColumn => SlideContent::TwoColumn {
            title: "New Slide".to_string(),
            left_column: "Add your content here...".to_string(),
            right_column: "Add your content here...".to_string(),
        },
        SlideKind::ImageFocus => SlideContent::ImageFocus {
            title: "New Slide".to_string(),
            image_url: String::new(),
            image_alt: String::new(),
        },
        SlideKind::Blank => SlideContent::Blank,
    }
}
