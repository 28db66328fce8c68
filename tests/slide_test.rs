// ABOUTME: Integration tests for slide editing: titles, text boxes and figures
// ABOUTME: Figures come from a stub chart so no browser is required

mod common;

use common::{init_logging, zip_entries, StubChart};
use tlab_slides::{
    Emu, FigureOptions, Font, ImageFormat, Presentation, Result, ShapeKind, SlideError,
    TextBoxOptions, TitleUpdate, ToImage, FIGURE_SCALE,
};

/// A chart whose rendering backend is unavailable.
struct UnrenderableChart;

impl ToImage for UnrenderableChart {
    fn to_image(&self, _format: ImageFormat, _scale: f64) -> Result<Vec<u8>> {
        Err(SlideError::BrowserError {
            message: "no backend".to_string(),
            source: None,
        })
    }
}

#[test]
fn test_update_title_text_and_font() {
    let mut presentation = Presentation::new().unwrap();
    let slide = presentation.slide_mut(0).unwrap();

    slide
        .update_title(&TitleUpdate::new().text("Results").font_size(32.0).font_bold(true))
        .unwrap();
    let title = slide.title().unwrap();
    assert_eq!(title.text(), "Results");
    assert_eq!(title.paragraphs[0].font.size, Some(32.0));
    assert_eq!(title.paragraphs[0].font.bold, Some(true));
    assert_eq!(title.paragraphs[0].font.name, None);
}

#[test]
fn test_update_title_keeps_unset_fields() {
    let mut presentation = Presentation::new().unwrap();
    let slide = presentation.slide_mut(0).unwrap();

    slide
        .update_title(&TitleUpdate::new().text("Line one\nLine two").font_name("Georgia"))
        .unwrap()
        .update_title(&TitleUpdate::new().font_italic(true))
        .unwrap();

    let title = slide.title().unwrap();
    assert_eq!(title.text(), "Line one\nLine two");
    assert_eq!(title.paragraphs.len(), 2);
    for paragraph in &title.paragraphs {
        assert_eq!(paragraph.font.name.as_deref(), Some("Georgia"));
        assert_eq!(paragraph.font.italic, Some(true));
    }
}

#[test]
fn test_update_title_without_changes_is_noop() {
    let mut presentation = Presentation::new().unwrap();
    let slide = presentation.slide_mut(0).unwrap();
    slide.update_title(&TitleUpdate::new().text("Same")).unwrap();
    let before = slide.title().unwrap();

    slide.update_title(&TitleUpdate::new()).unwrap();
    let after = slide.title().unwrap();
    assert_eq!(after.text(), before.text());
    assert_eq!(after.paragraphs[0].font, Font::default());
}

#[test]
fn test_update_title_on_blank_slide() {
    let mut presentation = Presentation::new().unwrap();
    let slide = presentation.add_slide(2).unwrap();

    let result = slide.update_title(&TitleUpdate::new().text("nowhere"));
    assert!(matches!(result, Err(SlideError::MissingTitlePlaceholder)));
}

#[test]
fn test_add_text_defaults() {
    let mut presentation = Presentation::new().unwrap();
    let slide = presentation.slide_mut(0).unwrap();
    slide
        .add_text("a\nb", 0.0, 0.0, &TextBoxOptions::default())
        .unwrap();

    let text_box = slide
        .shapes()
        .into_iter()
        .find(|s| s.kind == ShapeKind::TextBox)
        .expect("No text box added");
    assert_eq!(text_box.left, Some(Emu(0)));
    assert_eq!(text_box.top, Some(Emu(0)));
    assert_eq!(text_box.width, Some(Emu::from_cm(6.0)));
    assert_eq!(text_box.height, Some(Emu::from_cm(4.0)));
    assert_eq!(text_box.paragraphs.len(), 2);
    for paragraph in &text_box.paragraphs {
        assert_eq!(
            paragraph.font,
            Font {
                name: Some("Arial".to_string()),
                size: Some(18.0),
                bold: Some(false),
                italic: Some(false),
            }
        );
    }
    assert_eq!(text_box.text(), "a\nb");
}

#[test]
fn test_add_text_custom_options_and_ids() {
    let mut presentation = Presentation::new().unwrap();
    let slide = presentation.slide_mut(0).unwrap();
    let options = TextBoxOptions::default()
        .size(10.0, 2.0)
        .font_name("Cambria Math")
        .font_size(24.0)
        .font_italic(true);

    slide
        .add_text("first", 1.5, 2.5, &options)
        .unwrap()
        .add_text("second", 3.0, 4.0, &options)
        .unwrap();

    let boxes: Vec<_> = slide
        .shapes()
        .into_iter()
        .filter(|s| s.kind == ShapeKind::TextBox)
        .collect();
    assert_eq!(boxes.len(), 2);
    assert_ne!(boxes[0].id, boxes[1].id);
    assert_eq!(boxes[0].left, Some(Emu::from_cm(1.5)));
    assert_eq!(boxes[0].top, Some(Emu::from_cm(2.5)));
    assert_eq!(boxes[0].width, Some(Emu::from_cm(10.0)));
    assert_eq!(boxes[0].paragraphs[0].font.name.as_deref(), Some("Cambria Math"));
    assert_eq!(boxes[0].paragraphs[0].font.size, Some(24.0));
    assert_eq!(boxes[0].paragraphs[0].font.italic, Some(true));
}

#[test]
fn test_add_empty_text() {
    let mut presentation = Presentation::new().unwrap();
    let slide = presentation.slide_mut(0).unwrap();
    slide.add_text("", 0.0, 0.0, &TextBoxOptions::default()).unwrap();

    let text_box = slide
        .shapes()
        .into_iter()
        .find(|s| s.kind == ShapeKind::TextBox)
        .unwrap();
    assert_eq!(text_box.paragraphs.len(), 1);
    assert_eq!(text_box.text(), "");
}

#[test]
fn test_add_figure_position_size_and_scale() {
    init_logging();
    let chart = StubChart::new();
    let mut presentation = Presentation::new().unwrap();
    let slide = presentation.slide_mut(0).unwrap();

    slide
        .add_figure(&chart, 1.0, 2.0, &FigureOptions::default())
        .unwrap();

    assert_eq!(chart.log.borrow().scales, vec![FIGURE_SCALE]);
    let picture = slide
        .shapes()
        .into_iter()
        .find(|s| s.kind == ShapeKind::Picture)
        .expect("No picture added");
    assert_eq!(picture.left, Some(Emu::from_cm(1.0)));
    assert_eq!(picture.top, Some(Emu::from_cm(2.0)));
    assert_eq!(picture.width, Some(Emu::from_cm(11.5)));
    assert_eq!(picture.height, Some(Emu::from_cm(11.5)));

    let rel_id = picture.image_rel_id.expect("Picture has no image");
    let data = slide.image_data(&rel_id).expect("Image bytes missing");
    let image = image::load_from_memory(data).unwrap();
    assert_eq!((image.width(), image.height()), (4, 3));
}

#[test]
fn test_add_figure_is_saved_as_media() {
    let chart = StubChart::new();
    let mut presentation = Presentation::new().unwrap();
    presentation
        .slide_mut(0)
        .unwrap()
        .add_figure(&chart, 0.0, 0.0, &FigureOptions { width: 5.0, height: 4.0 })
        .unwrap();

    let bytes = presentation.to_bytes().unwrap();
    let media: Vec<String> = zip_entries(&bytes)
        .into_iter()
        .filter(|name| name.starts_with("ppt/media/"))
        .collect();
    assert_eq!(media.len(), 1);
    assert!(media[0].ends_with(".png"));

    let reopened = Presentation::from_bytes(&bytes).unwrap();
    let picture = reopened.slides()[0]
        .shapes()
        .into_iter()
        .find(|s| s.kind == ShapeKind::Picture)
        .unwrap();
    assert_eq!(picture.width, Some(Emu::from_cm(5.0)));
    assert_eq!(picture.height, Some(Emu::from_cm(4.0)));
}

#[test]
fn test_add_picture_rejects_non_image_bytes() {
    let mut presentation = Presentation::new().unwrap();
    let slide = presentation.slide_mut(0).unwrap();
    let result = slide.add_picture(b"not an image".to_vec(), 0.0, 0.0, 1.0, 1.0);
    assert!(matches!(result, Err(SlideError::ImageError(_))));
    assert!(slide
        .shapes()
        .iter()
        .all(|s| s.kind != ShapeKind::Picture));
}

#[test]
fn test_add_figure_propagates_render_failure() {
    let mut presentation = Presentation::new().unwrap();
    let slide = presentation.slide_mut(0).unwrap();

    let result = slide.add_figure(&UnrenderableChart, 1.0, 2.0, &FigureOptions::default());
    match result {
        Err(SlideError::BrowserError { message, source }) => {
            assert_eq!(message, "no backend");
            assert!(source.is_none());
        }
        Err(other) => panic!("Unexpected error: {}", other),
        Ok(_) => panic!("Rendering failure was swallowed"),
    }
    assert!(slide
        .shapes()
        .iter()
        .all(|s| s.kind != ShapeKind::Picture));
}
