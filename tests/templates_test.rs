// ABOUTME: Tests for the bundled template listing

use tlab_slides::templates::{template_filepaths, DEFAULT_TEMPLATE};
use tlab_slides::{template_filenames, Presentation, DEFAULT_TEMPLATE_PATH};

#[test]
fn test_bundled_templates_are_listed() {
    let names = template_filenames().unwrap();
    assert!(names.contains(&"universal.pptx".to_string()));

    let paths = template_filepaths().unwrap();
    assert!(paths.iter().all(|p| p.is_absolute()));
    assert!(paths.iter().any(|p| p.ends_with("universal.pptx")));
}

#[test]
fn test_default_template_matches_file() {
    let on_disk = std::fs::read(DEFAULT_TEMPLATE_PATH).unwrap();
    assert_eq!(on_disk.as_slice(), DEFAULT_TEMPLATE);
}

#[test]
fn test_every_template_opens() {
    for path in template_filepaths().unwrap() {
        let presentation = Presentation::open(&path).unwrap();
        assert!(!presentation.layouts().is_empty(), "{:?} has no layouts", path);
    }
}
