//! Mutation layer: pure operations over presentation snapshots.
//!
//! Each operation takes the current snapshot plus its arguments and
//! returns a new snapshot; callers persist and re-render from the result.
//! Structural operations (add, delete, duplicate, reorder) renumber every
//! slide's `order` field so it stays contiguous from zero, and every
//! change stamps `updated_at`. Lookups by unknown id are silent no-ops.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::template;
use crate::types::{new_slide_id, LogoPosition, Presentation, Slide, SlideContent, SlideKind};

/// Partial update for a single slide; `None` fields are left untouched.
///
/// `content` replaces the whole payload variant. Callers that want a
/// field-level content merge build the merged payload themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlideUpdate {
    pub title: Option<String>,
    pub content: Option<SlideContent>,
    pub background: Option<String>,
}

/// Partial update for the brand settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandUpdate {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub font_family: Option<String>,
    pub logo_url: Option<String>,
    pub logo_position: Option<LogoPosition>,
}

/// Partial update for presentation-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetaUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Append a new slide of the given kind with template default content.
pub fn add_slide(presentation: &Presentation, kind: SlideKind) -> Presentation {
    let mut next = presentation.clone();
    let order = next.slides.len();
    next.slides.push(Slide::new(
        format!("Slide {}", order + 1),
        template::default_content(kind),
        order,
    ));
    touch(&mut next);
    next
}

/// Shallow-merge `update` into the slide with the given id.
///
/// Unknown ids leave the snapshot unchanged.
pub fn update_slide(presentation: &Presentation, id: &str, update: SlideUpdate) -> Presentation {
    let mut next = presentation.clone();
    let Some(slide) = next.slides.iter_mut().find(|s| s.id == id) else {
        return next;
    };
    if let Some(title) = update.title {
        slide.title = title;
    }
    if let Some(content) = update.content {
        slide.content = content;
    }
    if let Some(background) = update.background {
        slide.background = Some(background);
    }
    touch(&mut next);
    next
}

/// Remove the slide with the given id and renumber the remainder.
///
/// Unknown ids leave the snapshot unchanged. Deleting the last remaining
/// slide is permitted; guarding against an empty deck is the shell's job.
pub fn delete_slide(presentation: &Presentation, id: &str) -> Presentation {
    let mut next = presentation.clone();
    let before = next.slides.len();
    next.slides.retain(|s| s.id != id);
    if next.slides.len() == before {
        return next;
    }
    renumber(&mut next.slides);
    touch(&mut next);
    next
}

/// Insert a copy of the slide with the given id immediately after it.
///
/// The copy gets a fresh id and the title suffixed with `" (Copy)"`.
/// Unknown ids leave the snapshot unchanged.
pub fn duplicate_slide(presentation: &Presentation, id: &str) -> Presentation {
    let mut next = presentation.clone();
    let Some(index) = next.slides.iter().position(|s| s.id == id) else {
        return next;
    };
    let mut copy = next.slides[index].clone();
    copy.id = new_slide_id();
    copy.title = format!("{} (Copy)", copy.title);
    next.slides.insert(index + 1, copy);
    renumber(&mut next.slides);
    touch(&mut next);
    next
}

/// Move the slide at `from` to position `to` (remove-then-insert splice).
///
/// Out-of-range indices are clamped to the valid range, so the operation
/// is total like every other mutation.
pub fn reorder_slides(presentation: &Presentation, from: usize, to: usize) -> Presentation {
    let mut next = presentation.clone();
    if next.slides.is_empty() {
        return next;
    }
    let last = next.slides.len() - 1;
    let from = from.min(last);
    let to = to.min(last);
    let slide = next.slides.remove(from);
    next.slides.insert(to, slide);
    renumber(&mut next.slides);
    touch(&mut next);
    next
}

/// Shallow-merge `update` into the brand settings.
pub fn update_brand_settings(presentation: &Presentation, update: BrandUpdate) -> Presentation {
    let mut next = presentation.clone();
    let brand = &mut next.brand_settings;
    if let Some(primary) = update.primary_color {
        brand.primary_color = primary;
    }
    if let Some(secondary) = update.secondary_color {
        brand.secondary_color = secondary;
    }
    if let Some(accent) = update.accent_color {
        brand.accent_color = accent;
    }
    if let Some(font) = update.font_family {
        brand.font_family = font;
    }
    if let Some(logo) = update.logo_url {
        brand.logo_url = Some(logo);
    }
    if let Some(position) = update.logo_position {
        brand.logo_position = position;
    }
    touch(&mut next);
    next
}

/// Shallow-merge `update` into the presentation-level metadata.
pub fn update_meta(presentation: &Presentation, update: MetaUpdate) -> Presentation {
    let mut next = presentation.clone();
    if let Some(title) = update.title {
        next.title = title;
    }
    if let Some(description) = update.description {
        next.description = Some(description);
    }
    touch(&mut next);
    next
}

/// Clamp a cursor to a sequence of the given length (0 for an empty one).
pub fn clamp_cursor(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        cursor.min(len - 1)
    }
}

/// Cursor position after deleting the slide at `deleted_index`.
///
/// If the deleted slide was the one under the cursor, the cursor steps
/// left (floored at zero); otherwise it is clamped to the new length.
pub fn cursor_after_delete(cursor: usize, deleted_index: usize, new_len: usize) -> usize {
    if new_len == 0 {
        return 0;
    }
    if deleted_index == cursor {
        clamp_cursor(cursor.saturating_sub(1), new_len)
    } else {
        clamp_cursor(cursor, new_len)
    }
}

fn renumber(slides: &mut [Slide]) {
    for (index, slide) in slides.iter_mut().enumerate() {
        slide.order = index;
    }
}

fn touch(presentation: &mut Presentation) {
    presentation.updated_at = Utc::now();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders(p: &Presentation) -> Vec<usize> {
        p.slides.iter().map(|s| s.order).collect()
    }

    fn assert_orders_contiguous(p: &Presentation) {
        assert_eq!(orders(p), (0..p.slides.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_add_slide_appends_with_next_order() {
        let p = Presentation::new();
        let p = add_slide(&p, SlideKind::Content);
        let p = add_slide(&p, SlideKind::TwoColumn);

        assert_eq!(p.slide_count(), 3);
        let added = &p.slides[2];
        assert_eq!(added.order, 2);
        assert_eq!(added.kind(), SlideKind::TwoColumn);
        assert_eq!(added.title, "Slide 3");
        match &added.content {
            SlideContent::TwoColumn { title, left_column, .. } => {
                assert!(!title.is_empty());
                assert!(!left_column.is_empty());
            }
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[test]
    fn test_add_slide_stamps_updated_at() {
        let p = Presentation::new();
        let next = add_slide(&p, SlideKind::Blank);
        assert!(next.updated_at >= p.updated_at);
        assert_eq!(next.created_at, p.created_at);
    }

    #[test]
    fn test_update_slide_merges_fields() {
        let p = Presentation::new();
        let id = p.slides[0].id.clone();

        let p = update_slide(
            &p,
            &id,
            SlideUpdate {
                title: Some("Opening".to_string()),
                background: Some("#FF0000".to_string()),
                ..Default::default()
            },
        );

        let slide = p.slide(&id).unwrap();
        assert_eq!(slide.title, "Opening");
        assert_eq!(slide.background.as_deref(), Some("#FF0000"));
        // Untouched fields survive the merge.
        assert_eq!(slide.kind(), SlideKind::Title);
    }

    #[test]
    fn test_update_slide_replaces_whole_content() {
        let p = Presentation::new();
        let id = p.slides[0].id.clone();

        let p = update_slide(
            &p,
            &id,
            SlideUpdate {
                content: Some(SlideContent::Content {
                    title: "Agenda".to_string(),
                    body: "One\nTwo".to_string(),
                }),
                ..Default::default()
            },
        );

        assert_eq!(p.slide(&id).unwrap().kind(), SlideKind::Content);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let p = Presentation::new();
        let next = update_slide(
            &p,
            "slide-missing",
            SlideUpdate {
                title: Some("X".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(next, p);
    }

    #[test]
    fn test_delete_slide_renumbers() {
        let p = Presentation::new();
        let p = add_slide(&p, SlideKind::Content);
        let p = add_slide(&p, SlideKind::Blank);
        let middle = p.slides[1].id.clone();

        let p = delete_slide(&p, &middle);

        assert_eq!(p.slide_count(), 2);
        assert!(p.slide(&middle).is_none());
        assert_orders_contiguous(&p);
    }

    #[test]
    fn test_delete_last_slide_is_permitted() {
        let p = Presentation::new();
        let id = p.slides[0].id.clone();
        let p = delete_slide(&p, &id);
        assert_eq!(p.slide_count(), 0);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let p = Presentation::new();
        let next = delete_slide(&p, "slide-missing");
        assert_eq!(next, p);
    }

    #[test]
    fn test_delete_then_add_never_reuses_id() {
        let p = Presentation::new();
        let deleted = p.slides[0].id.clone();
        let p = delete_slide(&p, &deleted);
        let p = add_slide(&p, SlideKind::Title);
        assert_ne!(p.slides[0].id, deleted);
    }

    #[test]
    fn test_duplicate_inserts_copy_after_original() {
        let p = Presentation::new();
        let p = add_slide(&p, SlideKind::Content);
        let original = p.slides[0].clone();

        let p = duplicate_slide(&p, &original.id);

        assert_eq!(p.slide_count(), 3);
        let copy = &p.slides[1];
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.title, format!("{} (Copy)", original.title));
        assert_eq!(copy.content, original.content);
        assert_eq!(copy.kind(), original.kind());
        assert_orders_contiguous(&p);
    }

    #[test]
    fn test_duplicate_unknown_id_is_noop() {
        let p = Presentation::new();
        let next = duplicate_slide(&p, "slide-missing");
        assert_eq!(next, p);
    }

    #[test]
    fn test_reorder_moves_slide_with_splice_semantics() {
        let p = Presentation::new();
        let p = add_slide(&p, SlideKind::Content);
        let p = add_slide(&p, SlideKind::Blank);
        let ids: Vec<String> = p.slides.iter().map(|s| s.id.clone()).collect();

        let p = reorder_slides(&p, 0, 2);

        let moved: Vec<&str> = p.slides.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(moved, vec![ids[1].as_str(), ids[2].as_str(), ids[0].as_str()]);
        assert_orders_contiguous(&p);
    }

    #[test]
    fn test_reorder_clamps_out_of_range_indices() {
        let p = Presentation::new();
        let p = add_slide(&p, SlideKind::Content);
        let ids: Vec<String> = p.slides.iter().map(|s| s.id.clone()).collect();

        let p = reorder_slides(&p, 99, 0);

        let moved: Vec<&str> = p.slides.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(moved, vec![ids[1].as_str(), ids[0].as_str()]);
        assert_orders_contiguous(&p);
    }

    #[test]
    fn test_mixed_operation_sequence_keeps_orders_contiguous() {
        let mut p = Presentation::new();
        p = add_slide(&p, SlideKind::Content);
        p = add_slide(&p, SlideKind::TwoColumn);
        p = duplicate_slide(&p, &p.slides[1].id.clone());
        p = reorder_slides(&p, 3, 0);
        p = delete_slide(&p, &p.slides[2].id.clone());
        p = add_slide(&p, SlideKind::ImageFocus);

        assert_orders_contiguous(&p);

        let mut ids: Vec<&str> = p.slides.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), p.slide_count());
    }

    #[test]
    fn test_update_brand_settings_merges() {
        let p = Presentation::new();
        let p = update_brand_settings(
            &p,
            BrandUpdate {
                primary_color: Some("#123456".to_string()),
                logo_position: Some(LogoPosition::Center),
                ..Default::default()
            },
        );

        assert_eq!(p.brand_settings.primary_color, "#123456");
        assert_eq!(p.brand_settings.logo_position, LogoPosition::Center);
        // Untouched fields keep their defaults.
        assert_eq!(p.brand_settings.font_family, "Inter");
    }

    #[test]
    fn test_update_meta_merges() {
        let p = Presentation::new();
        let p = update_meta(
            &p,
            MetaUpdate {
                title: Some("Quarterly Review".to_string()),
                description: None,
            },
        );
        assert_eq!(p.title, "Quarterly Review");
        assert_eq!(p.description, None);

        let p = update_meta(
            &p,
            MetaUpdate {
                title: None,
                description: Some("Q3 numbers".to_string()),
            },
        );
        assert_eq!(p.title, "Quarterly Review");
        assert_eq!(p.description.as_deref(), Some("Q3 numbers"));
    }

    #[test]
    fn test_clamp_cursor() {
        assert_eq!(clamp_cursor(5, 3), 2);
        assert_eq!(clamp_cursor(1, 3), 1);
        assert_eq!(clamp_cursor(0, 0), 0);
    }

    #[test]
    fn test_cursor_after_delete_at_cursor_steps_left() {
        assert_eq!(cursor_after_delete(2, 2, 2), 1);
        assert_eq!(cursor_after_delete(0, 0, 2), 0);
        assert_eq!(cursor_after_delete(0, 0, 0), 0);
    }

    #[test]
    fn test_cursor_after_delete_elsewhere_clamps() {
        // 3 slides, cursor on the last; deleting the middle clamps to the
        // new last index.
        assert_eq!(cursor_after_delete(2, 1, 2), 1);
        assert_eq!(cursor_after_delete(0, 2, 2), 0);
    }
}
