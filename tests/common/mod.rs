// ABOUTME: Shared helpers for integration tests
// ABOUTME: A chart stub that rasterizes without a browser and records how it was styled

#![allow(dead_code)]

use image::{ImageBuffer, ImageOutputFormat, Rgb};
use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;
use tlab_slides::{Annotation, Axis, Chart, ImageFormat, Layout, Line, Result, ToImage};

/// Everything a chart was asked to do, shared between its clones.
#[derive(Debug, Default)]
pub struct ChartLog {
    pub scales: Vec<f64>,
    pub annotations: Vec<Annotation>,
    pub layouts: Vec<Layout>,
    pub xaxes: Vec<Axis>,
    pub yaxes: Vec<Axis>,
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone)]
pub struct StubChart {
    pub log: Rc<RefCell<ChartLog>>,
    width: u32,
    height: u32,
}

impl StubChart {
    pub fn new() -> Self {
        Self::with_size(4, 3)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            log: Rc::new(RefCell::new(ChartLog::default())),
            width,
            height,
        }
    }
}

impl ToImage for StubChart {
    fn to_image(&self, format: ImageFormat, scale: f64) -> Result<Vec<u8>> {
        self.log.borrow_mut().scales.push(scale);
        let buffer = ImageBuffer::from_pixel(self.width, self.height, Rgb([255u8, 255, 255]));
        let output = match format {
            ImageFormat::Png => ImageOutputFormat::Png,
            ImageFormat::Jpeg => ImageOutputFormat::Jpeg(90),
        };
        let mut bytes = Cursor::new(Vec::new());
        buffer.write_to(&mut bytes, output)?;
        Ok(bytes.into_inner())
    }
}

impl Chart for StubChart {
    fn add_annotation(&mut self, annotation: Annotation) -> &mut Self {
        self.log.borrow_mut().annotations.push(annotation);
        self
    }

    fn update_layout(&mut self, layout: &Layout) -> &mut Self {
        self.log.borrow_mut().layouts.push(layout.clone());
        self
    }

    fn update_xaxes(&mut self, axis: &Axis) -> &mut Self {
        self.log.borrow_mut().xaxes.push(axis.clone());
        self
    }

    fn update_yaxes(&mut self, axis: &Axis) -> &mut Self {
        self.log.borrow_mut().yaxes.push(axis.clone());
        self
    }

    fn update_traces(&mut self, line: &Line) -> &mut Self {
        self.log.borrow_mut().lines.push(line.clone());
        self
    }
}

/// Enables log output for a test run; repeated calls are harmless.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Names of the entries of a zip archive held in memory, in archive order.
pub fn zip_entries(bytes: &[u8]) -> Vec<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).expect("Output is not a zip archive");
    (0..archive.len())
        .map(|i| archive.by_index(i).expect("Unreadable entry").name().to_string())
        .collect()
}
