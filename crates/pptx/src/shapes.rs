//! Per-slide layout: maps slide content and brand settings to the
//! frames (text boxes and pictures) emitted into the export.
//!
//! Geometry is in inches on a fixed 16:9 canvas, origin top-left. Each
//! slide kind has its own layout routine; color and typeface fall back
//! to neutral defaults when the brand settings leave them empty.

use deck_core::{BrandSettings, Slide, SlideContent};

use crate::media::ResolvedImage;

/// Canvas width in inches.
pub const SLIDE_WIDTH_IN: f64 = 10.0;

/// Canvas height in inches (16:9).
pub const SLIDE_HEIGHT_IN: f64 = 5.625;

/// Background value treated as "no override".
pub const DEFAULT_BACKGROUND: &str = "white";

const DEFAULT_FONT: &str = "Arial";
const DEFAULT_PRIMARY: &str = "#000000";
const DEFAULT_SECONDARY: &str = "#333333";
const SUBTITLE_FALLBACK: &str = "#666666";
const PLACEHOLDER_TEXT_COLOR: &str = "#999999";
const PLACEHOLDER_BORDER_COLOR: &str = "#CCCCCC";

/// A rectangle on the canvas, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One paragraph of a text frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub bullet: bool,
}

impl Paragraph {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bullet: false,
        }
    }

    fn bulleted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bullet: true,
        }
    }
}

/// A positioned text block with uniform run styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    pub region: Region,
    pub paragraphs: Vec<Paragraph>,
    /// Font size in points.
    pub font_size: u32,
    pub bold: bool,
    pub align: Align,
    /// Anchor text to the vertical middle of the frame.
    pub middle_anchor: bool,
    /// Run color as `RRGGBB`.
    pub color: String,
    pub font: String,
    /// 1 pt outline color, for placeholder boxes.
    pub border_color: Option<String>,
}

/// A frame emitted onto a slide.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Text(TextFrame),
    Picture {
        region: Region,
        image: ResolvedImage,
        alt: String,
    },
}

/// Compute the frames for one slide.
///
/// `image` carries the already-resolved picture for image-focus slides;
/// `None` (source missing or resolution failed) selects the bordered
/// placeholder box instead.
pub fn slide_frames(
    slide: &Slide,
    brand: &BrandSettings,
    image: Option<ResolvedImage>,
) -> Vec<Frame> {
    match &slide.content {
        SlideContent::Title { title, subtitle } => title_frames(title, subtitle, brand),
        SlideContent::Content { title, body } => content_frames(title, body, brand),
        SlideContent::TwoColumn {
            title,
            left_column,
            right_column,
        } => two_column_frames(title, left_column, right_column, brand),
        SlideContent::ImageFocus {
            title,
            image_url,
            image_alt,
        } => image_focus_frames(title, image_url, image_alt, brand, image),
        SlideContent::Blank => blank_frames(&slide.title, brand),
    }
}

/// Whether a background value overrides the container default.
pub fn background_override(slide: &Slide) -> Option<&str> {
    slide
        .background
        .as_deref()
        .filter(|bg| !bg.is_empty() && *bg != DEFAULT_BACKGROUND)
}

/// Strip a leading `#` and uppercase, yielding the OOXML `RRGGBB` form.
pub fn ppt_color(color: &str) -> String {
    color.trim_start_matches('#').to_ascii_uppercase()
}

fn title_frames(title: &str, subtitle: &str, brand: &BrandSettings) -> Vec<Frame> {
    let mut frames = Vec::new();
    if !title.is_empty() {
        frames.push(Frame::Text(TextFrame {
            region: Region { x: 0.5, y: 2.5, w: 9.0, h: 1.5 },
            paragraphs: vec![Paragraph::plain(title)],
            font_size: 44,
            bold: true,
            align: Align::Center,
            middle_anchor: false,
            color: primary_color(brand),
            font: font_face(brand),
            border_color: None,
        }));
    }
    if !subtitle.is_empty() {
        frames.push(Frame::Text(TextFrame {
            region: Region { x: 0.5, y: 4.5, w: 9.0, h: 1.0 },
            paragraphs: vec![Paragraph::plain(subtitle)],
            font_size: 24,
            bold: false,
            align: Align::Center,
            middle_anchor: false,
            color: secondary_color(brand, SUBTITLE_FALLBACK),
            font: font_face(brand),
            border_color: None,
        }));
    }
    frames
}

fn content_frames(title: &str, body: &str, brand: &BrandSettings) -> Vec<Frame> {
    let mut frames = Vec::new();
    if !title.is_empty() {
        frames.push(heading_frame(title, brand));
    }
    if !body.is_empty() {
        frames.push(Frame::Text(TextFrame {
            region: Region { x: 0.5, y: 2.0, w: 9.0, h: 3.5 },
            paragraphs: body_paragraphs(body),
            font_size: 18,
            bold: false,
            align: Align::Left,
            middle_anchor: false,
            color: secondary_color(brand, DEFAULT_SECONDARY),
            font: font_face(brand),
            border_color: None,
        }));
    }
    frames
}

fn two_column_frames(
    title: &str,
    left_column: &str,
    right_column: &str,
    brand: &BrandSettings,
) -> Vec<Frame> {
    let mut frames = Vec::new();
    if !title.is_empty() {
        frames.push(heading_frame(title, brand));
    }
    for (text, x) in [(left_column, 0.5), (right_column, 5.25)] {
        if text.is_empty() {
            continue;
        }
        frames.push(Frame::Text(TextFrame {
            region: Region { x, y: 2.0, w: 4.25, h: 3.5 },
            paragraphs: vec![Paragraph::plain(text)],
            font_size: 18,
            bold: false,
            align: Align::Left,
            middle_anchor: false,
            color: secondary_color(brand, DEFAULT_SECONDARY),
            font: font_face(brand),
            border_color: None,
        }));
    }
    frames
}

fn image_focus_frames(
    title: &str,
    image_url: &str,
    image_alt: &str,
    brand: &BrandSettings,
    image: Option<ResolvedImage>,
) -> Vec<Frame> {
    let mut frames = Vec::new();
    if !title.is_empty() {
        frames.push(heading_frame(title, brand));
    }

    let region = Region { x: 2.0, y: 2.0, w: 6.0, h: 3.5 };
    match image {
        Some(image) => frames.push(Frame::Picture {
            region,
            image,
            alt: image_alt.to_string(),
        }),
        None => {
            let label = if image_url.is_empty() {
                "Image Placeholder".to_string()
            } else if image_alt.is_empty() {
                "Image: Image placeholder".to_string()
            } else {
                format!("Image: {image_alt}")
            };
            frames.push(Frame::Text(TextFrame {
                region,
                paragraphs: vec![Paragraph::plain(label)],
                font_size: 16,
                bold: false,
                align: Align::Center,
                middle_anchor: true,
                color: ppt_color(PLACEHOLDER_TEXT_COLOR),
                font: font_face(brand),
                border_color: Some(ppt_color(PLACEHOLDER_BORDER_COLOR)),
            }));
        }
    }
    frames
}

fn blank_frames(display_title: &str, brand: &BrandSettings) -> Vec<Frame> {
    if display_title.trim().is_empty() {
        return Vec::new();
    }
    vec![heading_frame(display_title, brand)]
}

/// Top-left heading shared by content, two-column, image-focus, and
/// titled blank slides.
fn heading_frame(text: &str, brand: &BrandSettings) -> Frame {
    Frame::Text(TextFrame {
        region: Region { x: 0.5, y: 0.5, w: 9.0, h: 1.0 },
        paragraphs: vec![Paragraph::plain(text)],
        font_size: 32,
        bold: true,
        align: Align::Left,
        middle_anchor: false,
        color: primary_color(brand),
        font: font_face(brand),
        border_color: None,
    })
}

/// Multi-line body text becomes one bulleted paragraph per non-blank
/// line; single-line text stays one plain paragraph.
fn body_paragraphs(body: &str) -> Vec<Paragraph> {
    let lines: Vec<&str> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() > 1 {
        lines.into_iter().map(Paragraph::bulleted).collect()
    } else {
        vec![Paragraph::plain(body)]
    }
}

fn primary_color(brand: &BrandSettings) -> String {
    ppt_color(non_empty_or(&brand.primary_color, DEFAULT_PRIMARY))
}

fn secondary_color(brand: &BrandSettings, fallback: &str) -> String {
    ppt_color(non_empty_or(&brand.secondary_color, fallback))
}

fn font_face(brand: &BrandSettings) -> String {
    non_empty_or(&brand.font_family, DEFAULT_FONT).to_string()
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
