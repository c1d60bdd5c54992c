//! Pre-export validation.
//!
//! Checks are collected rather than fail-fast so the shell can show the
//! user every problem at once.

use crate::types::{Presentation, SlideContent};

/// Validate a presentation for export, returning every violation.
///
/// An empty vector means the presentation is exportable. Slide numbers in
/// messages are 1-based.
pub fn validate_for_export(presentation: &Presentation) -> Vec<String> {
    let mut errors = Vec::new();

    if presentation.title.trim().is_empty() {
        errors.push("Presentation title is required".to_string());
    }

    if presentation.slides.is_empty() {
        errors.push("Presentation must have at least one slide".to_string());
    }

    for (index, slide) in presentation.slides.iter().enumerate() {
        if slide.title.trim().is_empty() {
            errors.push(format!("Slide {} is missing a title", index + 1));
        }

        if let SlideContent::Title { title, .. } = &slide.content {
            if title.is_empty() {
                errors.push(format!(
                    "Title slide {} is missing main title content",
                    index + 1
                ));
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutate::{add_slide, update_slide, SlideUpdate};
    use crate::types::SlideKind;

    #[test]
    fn test_valid_presentation_passes() {
        let p = Presentation::new();
        assert!(validate_for_export(&p).is_empty());
    }

    #[test]
    fn test_empty_title_and_no_slides_collects_both_errors() {
        let mut p = Presentation::new();
        p.title = "   ".to_string();
        p.slides.clear();

        let errors = validate_for_export(&p);
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&"Presentation title is required".to_string()));
        assert!(errors.contains(&"Presentation must have at least one slide".to_string()));
    }

    #[test]
    fn test_title_slide_missing_main_title_content() {
        let p = Presentation::new();
        let id = p.slides[0].id.clone();
        let p = update_slide(
            &p,
            &id,
            SlideUpdate {
                content: Some(SlideContent::Title {
                    title: String::new(),
                    subtitle: "still here".to_string(),
                }),
                ..Default::default()
            },
        );

        let errors = validate_for_export(&p);
        assert_eq!(
            errors,
            vec!["Title slide 1 is missing main title content".to_string()]
        );
    }

    #[test]
    fn test_slide_missing_display_title() {
        let p = Presentation::new();
        let p = add_slide(&p, SlideKind::Content);
        let id = p.slides[1].id.clone();
        let p = update_slide(
            &p,
            &id,
            SlideUpdate {
                title: Some(String::new()),
                ..Default::default()
            },
        );

        let errors = validate_for_export(&p);
        assert_eq!(errors, vec!["Slide 2 is missing a title".to_string()]);
    }

    #[test]
    fn test_multiple_slide_errors_all_reported() {
        let mut p = Presentation::new();
        p.title = String::new();
        let first = p.slides[0].id.clone();
        let p = update_slide(
            &p,
            &first,
            SlideUpdate {
                title: Some(" ".to_string()),
                content: Some(SlideContent::Title {
                    title: String::new(),
                    subtitle: String::new(),
                }),
                ..Default::default()
            },
        );

        let errors = validate_for_export(&p);
        assert_eq!(errors.len(), 3);
    }
}
