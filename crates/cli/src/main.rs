//! CLI driver for building and exporting slide decks.
//!
//! Stands in for the UI shell: every document change goes through the
//! mutation layer via the editor session, state persists under a store
//! directory, and exports are validated first and written atomically.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use deck_core::{
    validate_for_export, BrandUpdate, Editor, KeyValueStore, LogoPosition, MetaUpdate, SlideContent,
    SlideKind, SlideUpdate, SLIDE_TEMPLATES,
};
use deck_pptx::{export_file_name, PptxWriter};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Build and export slide decks from the command line.
#[derive(Parser, Debug)]
#[command(name = "deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the persisted deck state
    #[arg(short, long, global = true, default_value = ".deck")]
    store: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start fresh: replace the deck with a new default presentation
    New {
        /// Title for the new presentation
        #[arg(long)]
        title: Option<String>,
    },
    /// Print the deck outline
    Show,
    /// List the available slide templates
    Templates,
    /// Append a new slide of the given kind
    Add {
        /// Slide kind: title, content, two-column, image-focus, blank
        kind: String,
    },
    /// Delete a slide by id
    Remove { id: String },
    /// Duplicate a slide by id
    Duplicate { id: String },
    /// Move a slide from one position to another
    Move { from: usize, to: usize },
    /// Select the current slide by index
    Select { index: usize },
    /// Edit the currently selected slide
    Edit(EditArgs),
    /// Update presentation title or description
    Set {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update brand settings
    Brand {
        #[arg(long)]
        primary_color: Option<String>,
        #[arg(long)]
        secondary_color: Option<String>,
        #[arg(long)]
        accent_color: Option<String>,
        #[arg(long)]
        font_family: Option<String>,
        #[arg(long)]
        logo_url: Option<String>,
        /// top-left, top-right, bottom-left, bottom-right, center
        #[arg(long)]
        logo_position: Option<String>,
    },
    /// Export the deck to a PowerPoint file
    Export {
        /// Output file or directory (default: filename derived from the title)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug, Default)]
struct EditArgs {
    /// Display title shown in navigation
    #[arg(long)]
    title: Option<String>,

    /// Background color (hex), or "white" to clear the override
    #[arg(long)]
    background: Option<String>,

    /// In-canvas heading text
    #[arg(long)]
    heading: Option<String>,

    /// Subtitle (title slides)
    #[arg(long)]
    subtitle: Option<String>,

    /// Body text; use \n in quotes for multiple bullet lines (content slides)
    #[arg(long)]
    body: Option<String>,

    /// Left column text (two-column slides)
    #[arg(long)]
    left: Option<String>,

    /// Right column text (two-column slides)
    #[arg(long)]
    right: Option<String>,

    /// Image source: file path or data: URL (image-focus slides)
    #[arg(long)]
    image_url: Option<String>,

    /// Image alt text (image-focus slides)
    #[arg(long)]
    image_alt: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let store = DirStore::open(&args.store)
        .with_context(|| format!("Failed to open store directory {}", args.store.display()))?;
    let mut editor = Editor::open(store);

    match args.command {
        Command::New { title } => {
            editor.reset();
            if let Some(title) = title {
                editor.update_meta(MetaUpdate {
                    title: Some(title),
                    description: None,
                });
            }
            println!("Created \"{}\"", editor.presentation().title);
        }
        Command::Show => print_outline(&editor),
        Command::Templates => {
            for template in SLIDE_TEMPLATES {
                println!(
                    "{:<12} {} — {}",
                    template.kind.name(),
                    template.name,
                    template.description
                );
            }
        }
        Command::Add { kind } => {
            let Some(kind) = SlideKind::from_name(&kind) else {
                bail!(
                    "unknown slide kind \"{}\" (expected one of: {})",
                    kind,
                    SlideKind::ALL.map(|k| k.name()).join(", ")
                );
            };
            editor.add_slide(kind);
            if let Some(slide) = editor.presentation().slides.last() {
                println!("Added {} slide {} ({})", kind, slide.order + 1, slide.id);
            }
        }
        Command::Remove { id } => {
            if editor.presentation().slide(&id).is_none() {
                bail!("no slide with id {id}");
            }
            editor.delete_slide(&id);
            println!("Removed {id}");
        }
        Command::Duplicate { id } => {
            if editor.presentation().slide(&id).is_none() {
                bail!("no slide with id {id}");
            }
            editor.duplicate_slide(&id);
            println!("Duplicated {id}");
        }
        Command::Move { from, to } => {
            let count = editor.presentation().slide_count();
            if from >= count || to >= count {
                bail!("positions must be within 0..{count}");
            }
            editor.reorder_slides(from, to);
            println!("Moved slide {from} to {to}");
        }
        Command::Select { index } => {
            editor.select(index);
            println!("Selected slide {}", editor.cursor() + 1);
        }
        Command::Edit(edit) => {
            let Some(slide) = editor.current_slide() else {
                bail!("the deck has no slides");
            };
            let id = slide.id.clone();
            let content = apply_content_flags(&slide.content, &edit)?;
            let update = SlideUpdate {
                title: edit.title.clone(),
                content,
                background: edit.background.clone(),
            };
            if update == SlideUpdate::default() {
                bail!("nothing to edit; pass at least one field flag");
            }
            editor.update_slide(&id, update);
            println!("Updated {id}");
        }
        Command::Set { title, description } => {
            if title.is_none() && description.is_none() {
                bail!("pass --title and/or --description");
            }
            editor.update_meta(MetaUpdate { title, description });
            println!("Updated presentation metadata");
        }
        Command::Brand {
            primary_color,
            secondary_color,
            accent_color,
            font_family,
            logo_url,
            logo_position,
        } => {
            let logo_position = match logo_position {
                Some(name) => Some(LogoPosition::from_name(&name).with_context(|| {
                    format!("unknown logo position \"{name}\" (expected e.g. top-right)")
                })?),
                None => None,
            };
            editor.update_brand_settings(BrandUpdate {
                primary_color,
                secondary_color,
                accent_color,
                font_family,
                logo_url,
                logo_position,
            });
            println!("Updated brand settings");
        }
        Command::Export { output } => export(&editor, output.as_deref())?,
    }

    Ok(())
}

/// Validate, serialize, and atomically write the export file.
fn export<S: KeyValueStore>(editor: &Editor<S>, output: Option<&Path>) -> Result<()> {
    let presentation = editor.presentation();

    let errors = validate_for_export(presentation);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("error: {error}");
        }
        bail!("export blocked by {} validation error(s)", errors.len());
    }

    let bytes = PptxWriter::new()
        .write(presentation)
        .context("Failed to serialize presentation")?;

    let path = output_path(presentation, output);
    write_atomic(&path, &bytes)?;
    println!("Exported {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Determine the export path: an explicit file, a directory to drop the
/// derived filename into, or the derived filename in the working directory.
fn output_path(presentation: &deck_core::Presentation, output: Option<&Path>) -> PathBuf {
    let file_name = export_file_name(presentation);
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

/// Write via a temp file and rename, so a failed export never leaves a
/// partial file at the target path.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("export.pptx");
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    let mut file =
        fs::File::create(&tmp).with_context(|| format!("Failed to create {}", tmp.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("Failed to write to {}", tmp.display()))?;
    drop(file);

    fs::rename(&tmp, path).with_context(|| format!("Failed to move export to {}", path.display()))
}

fn print_outline<S: KeyValueStore>(editor: &Editor<S>) {
    let presentation = editor.presentation();
    println!(
        "{} — {} slide(s)",
        presentation.title,
        presentation.slide_count()
    );
    if let Some(description) = &presentation.description {
        println!("{description}");
    }
    for (index, slide) in presentation.slides.iter().enumerate() {
        let marker = if index == editor.cursor() { '>' } else { ' ' };
        println!(
            "{marker} {:>2}. [{}] {} ({})",
            index + 1,
            slide.kind().name(),
            slide.title,
            slide.id
        );
    }
}

/// Merge per-field content flags into the slide's current payload.
///
/// Returns `None` when no content flag was passed. Flags that do not
/// belong to the slide's layout variant are rejected.
fn apply_content_flags(content: &SlideContent, edit: &EditArgs) -> Result<Option<SlideContent>> {
    let any_flag = edit.heading.is_some()
        || edit.subtitle.is_some()
        || edit.body.is_some()
        || edit.left.is_some()
        || edit.right.is_some()
        || edit.image_url.is_some()
        || edit.image_alt.is_some();
    if !any_flag {
        return Ok(None);
    }

    let kind = content.kind();
    let reject = |flag: &str| bail!("--{flag} does not apply to a {kind} slide");

    let mut next = content.clone();
    match &mut next {
        SlideContent::Title { title, subtitle } => {
            if edit.body.is_some() {
                return reject("body");
            }
            if edit.left.is_some() || edit.right.is_some() {
                return reject("left/--right");
            }
            if edit.image_url.is_some() || edit.image_alt.is_some() {
                return reject("image-url/--image-alt");
            }
            if let Some(heading) = &edit.heading {
                *title = heading.clone();
            }
            if let Some(value) = &edit.subtitle {
                *subtitle = value.clone();
            }
        }
        SlideContent::Content { title, body } => {
            if edit.subtitle.is_some() {
                return reject("subtitle");
            }
            if edit.left.is_some() || edit.right.is_some() {
                return reject("left/--right");
            }
            if edit.image_url.is_some() || edit.image_alt.is_some() {
                return reject("image-url/--image-alt");
            }
            if let Some(heading) = &edit.heading {
                *title = heading.clone();
            }
            if let Some(value) = &edit.body {
                *body = value.replace("\\n", "\n");
            }
        }
        SlideContent::TwoColumn {
            title,
            left_column,
            right_column,
        } => {
            if edit.subtitle.is_some() {
                return reject("subtitle");
            }
            if edit.body.is_some() {
                return reject("body");
            }
            if edit.image_url.is_some() || edit.image_alt.is_some() {
                return reject("image-url/--image-alt");
            }
            if let Some(heading) = &edit.heading {
                *title = heading.clone();
            }
            if let Some(value) = &edit.left {
                *left_column = value.clone();
            }
            if let Some(value) = &edit.right {
                *right_column = value.clone();
            }
        }
        SlideContent::ImageFocus {
            title,
            image_url,
            image_alt,
        } => {
            if edit.subtitle.is_some() {
                return reject("subtitle");
            }
            if edit.body.is_some() {
                return reject("body");
            }
            if edit.left.is_some() || edit.right.is_some() {
                return reject("left/--right");
            }
            if let Some(heading) = &edit.heading {
                *title = heading.clone();
            }
            if let Some(value) = &edit.image_url {
                *image_url = value.clone();
            }
            if let Some(value) = &edit.image_alt {
                *image_alt = value.clone();
            }
        }
        SlideContent::Blank => {
            return reject("heading/--subtitle/--body/--left/--right/--image-url/--image-alt");
        }
    }

    Ok(Some(next))
}

/// File-per-key store under a directory: the document snapshot and the
/// cursor each live in their own file.
#[derive(Debug)]
struct DirStore {
    root: PathBuf,
}

impl DirStore {
    fn open(root: &Path) -> std::io::Result<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> deck_core::Result<Option<String>> {
        match fs::read_to_string(self.root.join(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> deck_core::Result<()> {
        fs::write(self.root.join(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> deck_core::Result<()> {
        match fs::remove_file(self.root.join(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::Presentation;

    #[test]
    fn test_dir_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::open(dir.path()).unwrap();

        assert_eq!(store.get("deck.document").unwrap(), None);
        store.set("deck.document", "{}").unwrap();
        assert_eq!(store.get("deck.document").unwrap().as_deref(), Some("{}"));

        store.remove("deck.document").unwrap();
        assert_eq!(store.get("deck.document").unwrap(), None);
        // Removing an absent key succeeds.
        store.remove("deck.document").unwrap();
    }

    #[test]
    fn test_editor_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let store = DirStore::open(dir.path()).unwrap();
        let mut editor = Editor::open(store);
        editor.add_slide(SlideKind::Content);
        editor.select(1);

        let store = DirStore::open(dir.path()).unwrap();
        let reopened = Editor::open(store);
        assert_eq!(reopened.presentation().slide_count(), 2);
        assert_eq!(reopened.cursor(), 1);
    }

    #[test]
    fn test_output_path_resolution() {
        let p = Presentation::new();
        assert_eq!(
            output_path(&p, None),
            PathBuf::from("my_presentation.pptx")
        );

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            output_path(&p, Some(dir.path())),
            dir.path().join("my_presentation.pptx")
        );

        let explicit = dir.path().join("deck.pptx");
        assert_eq!(output_path(&p, Some(&explicit)), explicit);
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.pptx");

        write_atomic(&target, b"bytes").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"bytes");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_export_blocked_by_validation() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        let mut editor = Editor::open(store);
        editor.update_meta(MetaUpdate {
            title: Some("  ".to_string()),
            description: None,
        });

        let out = dir.path().join("out.pptx");
        assert!(export(&editor, Some(&out)).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        let mut editor = Editor::open(store);
        editor.add_slide(SlideKind::Content);

        let out = dir.path().join("deck.pptx");
        export(&editor, Some(&out)).unwrap();

        let bytes = fs::read(&out).unwrap();
        // PPTX is a ZIP container (PK\x03\x04).
        assert!(bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]));
    }

    #[test]
    fn test_apply_content_flags_merges_matching_variant() {
        let content = SlideContent::TwoColumn {
            title: "T".to_string(),
            left_column: "L".to_string(),
            right_column: "R".to_string(),
        };
        let edit = EditArgs {
            left: Some("Pros".to_string()),
            ..Default::default()
        };

        let merged = apply_content_flags(&content, &edit).unwrap().unwrap();
        match merged {
            SlideContent::TwoColumn {
                left_column,
                right_column,
                ..
            } => {
                assert_eq!(left_column, "Pros");
                assert_eq!(right_column, "R");
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn test_apply_content_flags_rejects_wrong_variant() {
        let content = SlideContent::Title {
            title: "T".to_string(),
            subtitle: "S".to_string(),
        };
        let edit = EditArgs {
            body: Some("text".to_string()),
            ..Default::default()
        };
        assert!(apply_content_flags(&content, &edit).is_err());
    }

    #[test]
    fn test_apply_content_flags_none_without_flags() {
        let content = SlideContent::Blank;
        assert_eq!(
            apply_content_flags(&content, &EditArgs::default()).unwrap(),
            None
        );
    }
}
