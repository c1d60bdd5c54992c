//! Domain types for the slide-deck document model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A complete presentation document: slides, brand styling, and metadata.
///
/// This is the unit of persistence and export. Every mutation produces a
/// new snapshot with a refreshed `updated_at`; the `order` field of each
/// slide always equals its index in `slides`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// Stable document identity.
    pub id: String,

    /// Presentation title. Required (non-empty) for export.
    pub title: String,

    /// Optional free-form description, carried into export metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Slides in display order.
    pub slides: Vec<Slide>,

    /// Global styling defaults applied across all slides.
    pub brand_settings: BrandSettings,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutating operation.
    pub updated_at: DateTime<Utc>,
}

impl Presentation {
    /// Create the default document: one title slide with welcome content.
    pub fn new() -> Self {
        let now = Utc::now();
        let slide = Slide {
            id: new_slide_id(),
            title: "Slide 1".to_string(),
            content: SlideContent::Title {
                title: "Welcome to Your Presentation".to_string(),
                subtitle: "Click to edit this subtitle".to_string(),
            },
            background: None,
            order: 0,
        };
        Self {
            id: new_presentation_id(),
            title: "My Presentation".to_string(),
            description: None,
            slides: vec![slide],
            brand_settings: BrandSettings::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Look up a slide by id.
    pub fn slide(&self, id: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }

    /// Position of a slide in the sequence, by id.
    pub fn slide_index(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }

    /// Number of slides in the presentation.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

/// A single slide, typed by layout variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Unique id, stable for the slide's lifetime. Deleted ids are never reused.
    pub id: String,

    /// Display label shown in navigation, independent of in-canvas content.
    pub title: String,

    /// Layout-variant content payload.
    pub content: SlideContent,

    /// Optional background color override. Absent or `"white"` means the
    /// container default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Zero-based position; always equals the slide's index in the
    /// owning presentation.
    pub order: usize,
}

impl Slide {
    /// Create a slide with a freshly generated id.
    pub fn new(title: impl Into<String>, content: SlideContent, order: usize) -> Self {
        Self {
            id: new_slide_id(),
            title: title.into(),
            content,
            background: None,
            order,
        }
    }

    /// Layout variant of this slide, derived from its content payload.
    pub fn kind(&self) -> SlideKind {
        self.content.kind()
    }
}

/// The closed set of slide layout variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideKind {
    Title,
    Content,
    TwoColumn,
    ImageFocus,
    Blank,
}

impl SlideKind {
    /// All variants, in template-catalog order.
    pub const ALL: [SlideKind; 5] = [
        SlideKind::Title,
        SlideKind::Content,
        SlideKind::TwoColumn,
        SlideKind::ImageFocus,
        SlideKind::Blank,
    ];

    /// Parse a kind from its kebab-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Self::Title),
            "content" => Some(Self::Content),
            "two-column" => Some(Self::TwoColumn),
            "image-focus" => Some(Self::ImageFocus),
            "blank" => Some(Self::Blank),
            _ => None,
        }
    }

    /// Kebab-case name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::TwoColumn => "two-column",
            Self::ImageFocus => "image-focus",
            Self::Blank => "blank",
        }
    }
}

impl std::fmt::Display for SlideKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-variant content payload.
///
/// One shape per slide kind, so a content field can never appear on a
/// slide type it does not belong to. Empty strings stand for unset
/// fields. Serialized with a `kind` tag matching [`SlideKind`] names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum SlideContent {
    Title {
        title: String,
        subtitle: String,
    },
    Content {
        title: String,
        body: String,
    },
    TwoColumn {
        title: String,
        left_column: String,
        right_column: String,
    },
    ImageFocus {
        title: String,
        image_url: String,
        image_alt: String,
    },
    Blank,
}

impl SlideContent {
    /// The slide kind this payload belongs to.
    pub fn kind(&self) -> SlideKind {
        match self {
            Self::Title { .. } => SlideKind::Title,
            Self::Content { .. } => SlideKind::Content,
            Self::TwoColumn { .. } => SlideKind::TwoColumn,
            Self::ImageFocus { .. } => SlideKind::ImageFocus,
            Self::Blank => SlideKind::Blank,
        }
    }

    /// The in-canvas heading field, for variants that carry one.
    pub fn heading(&self) -> Option<&str> {
        match self {
            Self::Title { title, .. }
            | Self::Content { title, .. }
            | Self::TwoColumn { title, .. }
            | Self::ImageFocus { title, .. } => Some(title),
            Self::Blank => None,
        }
    }
}

/// Global styling defaults: colors, typeface, and logo placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSettings {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub font_family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub logo_position: LogoPosition,
}

impl Default for BrandSettings {
    fn default() -> Self {
        Self {
            primary_color: "#6366F1".to_string(),
            secondary_color: "#F59E0B".to_string(),
            accent_color: "#10B981".to_string(),
            font_family: "Inter".to_string(),
            logo_url: None,
            logo_position: LogoPosition::TopRight,
        }
    }
}

/// Where the brand logo sits on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl LogoPosition {
    /// Parse a position from its kebab-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top-left" => Some(Self::TopLeft),
            "top-right" => Some(Self::TopRight),
            "bottom-left" => Some(Self::BottomLeft),
            "bottom-right" => Some(Self::BottomRight),
            "center" => Some(Self::Center),
            _ => None,
        }
    }

    /// Kebab-case name of this position.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::Center => "center",
        }
    }
}

/// Generate a fresh slide id.
pub(crate) fn new_slide_id() -> String {
    format!("slide-{}", Uuid::new_v4())
}

/// Generate a fresh presentation id.
pub(crate) fn new_presentation_id() -> String {
    format!("presentation-{}", Uuid::new_v4())
}
