// ABOUTME: Integration tests for presentation loading, slide creation and saving
// ABOUTME: Saved files are reopened to check they stay valid packages

mod common;

use common::{init_logging, zip_entries};
use std::io::Cursor;
use tempfile::tempdir;
use tlab_slides::{Presentation, ShapeKind, SlideError, TextBoxOptions, DEFAULT_TEMPLATE_PATH};

#[test]
fn test_default_template_layouts_and_slides() {
    init_logging();
    let presentation = Presentation::new().unwrap();

    let names: Vec<&str> = presentation.layouts().iter().map(|l| l.name()).collect();
    assert_eq!(names, vec!["Title Only", "Title and Content", "Blank"]);
    assert!(presentation.layouts()[0].has_title());
    assert!(!presentation.layouts()[2].has_title());

    assert_eq!(presentation.slides().len(), 1);
    let title = presentation.slide(0).unwrap().title().expect("Slide has no title");
    assert_eq!(title.kind, ShapeKind::Placeholder);

    // 4:3 slide
    assert_eq!(presentation.slide_size(), Some((9_144_000, 6_858_000)));
}

#[test]
fn test_open_template_from_path() {
    let presentation = Presentation::open(DEFAULT_TEMPLATE_PATH).unwrap();
    assert_eq!(presentation.layouts().len(), 3);
}

#[test]
fn test_open_missing_file() {
    let result = Presentation::open("/nonexistent/deck.pptx");
    assert!(matches!(result, Err(SlideError::IoError(_))));
}

#[test]
fn test_open_rejects_non_zip_input() {
    let result = Presentation::from_bytes(b"definitely not a pptx");
    assert!(matches!(result, Err(SlideError::PptxError(_))));
}

#[test]
fn test_add_slide_clones_layout_placeholders() {
    let mut presentation = Presentation::new().unwrap();

    let slide = presentation.add_slide(1).unwrap();
    assert_eq!(slide.partname(), "ppt/slides/slide2.xml");
    let types: Vec<String> = slide
        .shapes()
        .into_iter()
        .filter_map(|s| s.placeholder_type)
        .collect();
    // Date, footer and slide number placeholders stay on the layout.
    assert_eq!(types, vec!["title".to_string(), "obj".to_string()]);

    let blank = presentation.add_slide(2).unwrap();
    assert!(blank.shapes().is_empty());
    assert!(blank.title().is_none());
    assert_eq!(presentation.slides().len(), 3);
}

#[test]
fn test_add_slide_out_of_range() {
    let mut presentation = Presentation::new().unwrap();
    let result = presentation.add_slide(3);
    assert!(matches!(
        result,
        Err(SlideError::LayoutIndexOutOfRange { index: 3, len: 3 })
    ));
    assert_eq!(presentation.slides().len(), 1);
}

#[test]
fn test_save_and_reopen() {
    init_logging();
    let dir = tempdir().unwrap();
    let path = dir.path().join("deck.pptx");

    let mut presentation = Presentation::new().unwrap();
    presentation
        .add_slide(0)
        .unwrap()
        .add_text("second slide", 1.0, 1.0, &TextBoxOptions::default())
        .unwrap();
    presentation.save(&path).unwrap();
    assert!(path.exists());

    let reopened = Presentation::open(&path).unwrap();
    assert_eq!(reopened.slides().len(), 2);
    let texts: Vec<String> = reopened.slides()[1]
        .shapes()
        .iter()
        .filter(|s| s.kind == ShapeKind::TextBox)
        .map(|s| s.text())
        .collect();
    assert_eq!(texts, vec!["second slide".to_string()]);
}

#[test]
fn test_saved_package_layout() {
    let mut presentation = Presentation::new().unwrap();
    presentation.add_slide(2).unwrap();

    let mut bytes = Vec::new();
    presentation.write_to(&mut bytes).unwrap();
    let entries = zip_entries(&bytes);

    assert_eq!(entries[0], "[Content_Types].xml");
    assert!(entries.contains(&"ppt/presentation.xml".to_string()));
    assert!(entries.contains(&"ppt/slides/slide2.xml".to_string()));
    assert!(entries.contains(&"ppt/slides/_rels/slide2.xml.rels".to_string()));

    let reopened = Presentation::from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(reopened.slides().len(), 2);
    assert_eq!(reopened.slides()[1].partname(), "ppt/slides/slide2.xml");
}
