// ABOUTME: Integration tests for the photoluminescence summary slide
// ABOUTME: Checks layout, text blocks and figure styling using stub charts

mod common;

use chrono::NaiveDate;
use common::{init_logging, StubChart};
use tempfile::tempdir;
use tlab_slides::photo_luminescence::{self, MATH_FONT};
use tlab_slides::{Emu, PhotoLuminescence, Presentation, ShapeInfo, ShapeKind, SlideError};

fn report(a: f64, b: f64) -> PhotoLuminescence<StubChart> {
    PhotoLuminescence {
        title: "T".to_string(),
        excitation_wavelength: 405.0,
        excitation_power: 5.0,
        time_range: 10.0,
        center_wavelength: 800.0,
        fwhm: 30.0,
        frame: 1000.0,
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        h_fig: StubChart::new(),
        v_fig: StubChart::new(),
        a,
        b,
        tau1: 0.5,
        tau2: 1.5,
    }
}

fn text_boxes(presentation: &Presentation) -> Vec<ShapeInfo> {
    presentation.slides()[0]
        .shapes()
        .into_iter()
        .filter(|s| s.kind == ShapeKind::TextBox)
        .collect()
}

#[test]
fn test_build_lays_out_one_slide() {
    init_logging();
    let report = report(40.0, 60.0);
    let presentation = report.build().unwrap();

    assert_eq!(presentation.slides().len(), 1);
    let slide = &presentation.slides()[0];
    assert_eq!(slide.title().unwrap().text(), "T");

    let pictures: Vec<ShapeInfo> = slide
        .shapes()
        .into_iter()
        .filter(|s| s.kind == ShapeKind::Picture)
        .collect();
    assert_eq!(pictures.len(), 2);
    assert_eq!(pictures[0].left, Some(Emu::from_cm(0.33)));
    assert_eq!(pictures[1].left, Some(Emu::from_cm(12.33)));
    for picture in &pictures {
        assert_eq!(picture.top, Some(Emu::from_cm(5.0)));
        assert_eq!(picture.width, Some(Emu::from_cm(11.5)));
        assert_eq!(picture.height, Some(Emu::from_cm(11.5)));
    }

    assert_eq!(text_boxes(&presentation).len(), 4);
}

#[test]
fn test_build_text_blocks() {
    let presentation = report(40.0, 60.0).build().unwrap();
    let boxes = text_boxes(&presentation);

    assert_eq!(
        boxes[0].text(),
        "Excitation wavelength : 405 nm\nExcitation power : 5 mW\nTime range : 10 ns\n"
    );
    assert_eq!(boxes[0].left, Some(Emu::from_cm(2.33)));
    assert_eq!(boxes[0].top, Some(Emu::from_cm(2.5)));

    assert_eq!(
        boxes[1].text(),
        "Center wavelength : 800 nm\nFWHM : 30 nm\nFrame : 1000\n"
    );
    assert_eq!(boxes[1].left, Some(Emu::from_cm(14.33)));

    assert_eq!(boxes[2].text(), "a : b = 40 : 60");
    assert_eq!(boxes[2].top, Some(Emu::from_cm(17.0)));

    assert_eq!(boxes[3].text(), "τ₁ = 0.5 ns\nτ₂ = 1.5 ns\n");
    assert_eq!(boxes[3].left, Some(Emu::from_cm(19.33)));
}

#[test]
fn test_build_fonts() {
    let presentation = report(40.0, 60.0).build().unwrap();
    let boxes = text_boxes(&presentation);

    for text_box in &boxes[..2] {
        for paragraph in &text_box.paragraphs {
            assert_eq!(paragraph.font.name.as_deref(), Some("Arial"));
            assert_eq!(paragraph.font.size, Some(18.0));
        }
    }
    for text_box in &boxes[2..] {
        for paragraph in &text_box.paragraphs {
            assert_eq!(paragraph.font.name.as_deref(), Some(MATH_FONT));
        }
    }
}

#[test]
fn test_weight_ratio_ignores_normalization() {
    let raw = report(40.0, 60.0).build().unwrap();
    let normalized = report(0.4, 0.6).build().unwrap();
    assert_eq!(text_boxes(&raw)[2].text(), "a : b = 40 : 60");
    assert_eq!(text_boxes(&normalized)[2].text(), "a : b = 40 : 60");
}

#[test]
fn test_build_rejects_zero_weights() {
    let result = report(0.0, 0.0).build();
    assert!(matches!(result, Err(SlideError::ValidationError(_))));
}

#[test]
fn test_build_styles_figures_without_touching_inputs() {
    let report = report(40.0, 60.0);
    photo_luminescence::build(&report).unwrap();

    // Clones share the log, so the styling done on the copy is visible here.
    let log = report.h_fig.log.borrow();
    assert_eq!(log.scales, vec![10.0]);
    assert_eq!(log.annotations.len(), 1);
    assert_eq!(log.annotations[0].text, "2024.01.15");
    assert_eq!(log.layouts.len(), 1);
    assert_eq!(log.layouts[0].showlegend, Some(false));
    assert_eq!(log.layouts[0].width, Some(450.0));
    assert_eq!(log.xaxes[0].ticks.as_deref(), Some("inside"));
    assert_eq!(log.yaxes[0].mirror, Some(true));
    assert_eq!(log.lines[0].width, Some(1.0));
}

#[test]
fn test_build_then_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pl.pptx");
    report(63.0, 37.0).build().unwrap().save(&path).unwrap();

    let reopened = Presentation::open(&path).unwrap();
    let slide = &reopened.slides()[0];
    assert_eq!(slide.title().unwrap().text(), "T");
    let shapes = slide.shapes();
    assert_eq!(
        shapes.iter().filter(|s| s.kind == ShapeKind::Picture).count(),
        2
    );
    assert_eq!(text_boxes(&reopened)[2].text(), "a : b = 63 : 37");
}

#[test]
fn test_stream_round_trip_keeps_slides_and_shapes() {
    let built = report(40.0, 60.0).build().unwrap();
    let mut buffer = std::io::Cursor::new(Vec::new());
    built.write_to(&mut buffer).unwrap();
    buffer.set_position(0);

    let reopened = Presentation::from_reader(buffer).unwrap();
    assert_eq!(reopened.slides().len(), built.slides().len());
    assert_eq!(
        reopened.slides()[0].shapes().len(),
        built.slides()[0].shapes().len()
    );
}
