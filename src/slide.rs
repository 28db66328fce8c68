// ABOUTME: Slide wrapper: title updates, text boxes and rendered figures
// ABOUTME: All positions and sizes are given in centimeters and stored in EMU

use crate::errors::{Result, SlideError};
use crate::figure::{ImageFormat, ToImage};
use crate::package::{relative_target, Relationships, RT_IMAGE};
use crate::shapes::{self, ShapeInfo};
use crate::text::{self, Font};
use crate::units::Emu;
use crate::xml::Element;
use log::{debug, info};

/// Device scale used when rasterizing figures for a slide.
pub const FIGURE_SCALE: f64 = 10.0;

/// Optional title changes; fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleUpdate {
    pub text: Option<String>,
    pub font: Font,
}

impl TitleUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn font_name(mut self, name: impl Into<String>) -> Self {
        self.font.name = Some(name.into());
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font.size = Some(size);
        self
    }

    pub fn font_bold(mut self, bold: bool) -> Self {
        self.font.bold = Some(bold);
        self
    }

    pub fn font_italic(mut self, italic: bool) -> Self {
        self.font.italic = Some(italic);
        self
    }
}

/// Size and font of a new text box. Every font field is always applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBoxOptions {
    /// Width in centimeters.
    pub width: f64,
    /// Height in centimeters.
    pub height: f64,
    pub font_name: String,
    /// Size in points.
    pub font_size: f64,
    pub font_bold: bool,
    pub font_italic: bool,
}

impl Default for TextBoxOptions {
    fn default() -> Self {
        Self {
            width: 6.0,
            height: 4.0,
            font_name: "Arial".to_string(),
            font_size: 18.0,
            font_bold: false,
            font_italic: false,
        }
    }
}

impl TextBoxOptions {
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn font_name(mut self, name: impl Into<String>) -> Self {
        self.font_name = name.into();
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn font_bold(mut self, bold: bool) -> Self {
        self.font_bold = bold;
        self
    }

    pub fn font_italic(mut self, italic: bool) -> Self {
        self.font_italic = italic;
        self
    }

    fn font(&self) -> Font {
        Font {
            name: Some(self.font_name.clone()),
            size: Some(self.font_size),
            bold: Some(self.font_bold),
            italic: Some(self.font_italic),
        }
    }
}

/// Size of an inserted figure, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureOptions {
    pub width: f64,
    pub height: f64,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            width: 11.5,
            height: 11.5,
        }
    }
}

/// An image added to a slide that is not yet part of the package.
#[derive(Debug, Clone)]
pub(crate) struct MediaPart {
    pub name: String,
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

/// One slide of a presentation.
#[derive(Debug, Clone)]
pub struct Slide {
    partname: String,
    xml: Element,
    rels: Relationships,
    media: Vec<MediaPart>,
}

impl Slide {
    pub(crate) fn new(partname: String, xml: Element, rels: Relationships) -> Self {
        Self {
            partname,
            xml,
            rels,
            media: Vec::new(),
        }
    }

    /// Package part name, e.g. `ppt/slides/slide1.xml`.
    pub fn partname(&self) -> &str {
        &self.partname
    }

    pub(crate) fn xml(&self) -> &Element {
        &self.xml
    }

    pub(crate) fn relationships(&self) -> &Relationships {
        &self.rels
    }

    pub(crate) fn media(&self) -> &[MediaPart] {
        &self.media
    }

    fn sp_tree(&self) -> Result<&Element> {
        self.xml.find(&["p:cSld", "p:spTree"]).ok_or_else(|| {
            SlideError::PackageError(format!("{} has no shape tree", self.partname))
        })
    }

    fn sp_tree_mut(&mut self) -> Result<&mut Element> {
        let partname = self.partname.clone();
        self.xml
            .find_mut(&["p:cSld", "p:spTree"])
            .ok_or_else(|| SlideError::PackageError(format!("{} has no shape tree", partname)))
    }

    /// All shapes in the slide's shape tree, in z-order.
    pub fn shapes(&self) -> Vec<ShapeInfo> {
        self.sp_tree()
            .map(|tree| {
                tree.child_elements()
                    .filter_map(ShapeInfo::from_element)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The title placeholder, if the slide has one.
    pub fn title(&self) -> Option<ShapeInfo> {
        self.shapes().into_iter().find(ShapeInfo::is_title)
    }

    /// Bytes of a picture added to this slide since it was loaded, by relationship id.
    pub fn image_data(&self, rel_id: &str) -> Option<&[u8]> {
        let rel = self.rels.get(rel_id)?;
        self.media
            .iter()
            .find(|m| relative_target(&self.partname, &m.name) == rel.target)
            .map(|m| m.data.as_slice())
    }

    fn next_shape_id(&self) -> Result<u32> {
        Ok(shapes::max_shape_id(self.sp_tree()?) + 1)
    }

    /// Updates the title text and font.
    ///
    /// Only the fields set in `update` change; the font overlay is applied to
    /// every paragraph of the title.
    pub fn update_title(&mut self, update: &TitleUpdate) -> Result<&mut Self> {
        let tree = self.sp_tree_mut()?;
        let title = tree
            .child_elements_mut()
            .find(|e| shapes::is_title_placeholder(e))
            .ok_or(SlideError::MissingTitlePlaceholder)?;

        if title.child("p:txBody").is_none() {
            title.push_child(text::empty_tx_body(Element::new("a:bodyPr")));
        }
        let body = text::tx_body_mut(title).ok_or(SlideError::MissingTitlePlaceholder)?;
        if let Some(new_text) = &update.text {
            text::set_body_text(body, new_text);
        }
        text::apply_font(body, &update.font);

        debug!("Updated title of {}", self.partname);
        Ok(self)
    }

    /// Adds a text box at `left`/`top` (centimeters).
    pub fn add_text(
        &mut self,
        content: &str,
        left: f64,
        top: f64,
        options: &TextBoxOptions,
    ) -> Result<&mut Self> {
        let id = self.next_shape_id()?;
        let mut text_box = shapes::new_text_box(
            id,
            Emu::from_cm(left),
            Emu::from_cm(top),
            Emu::from_cm(options.width),
            Emu::from_cm(options.height),
        );
        if let Some(body) = text::tx_body_mut(&mut text_box) {
            text::set_body_text(body, content);
            text::apply_font(body, &options.font());
        }
        self.sp_tree_mut()?.push_child(text_box);

        debug!("Added text box {} to {}", id, self.partname);
        Ok(self)
    }

    /// Rasterizes the figure and inserts it as a picture at `left`/`top` (centimeters).
    pub fn add_figure<F: ToImage + ?Sized>(
        &mut self,
        figure: &F,
        left: f64,
        top: f64,
        options: &FigureOptions,
    ) -> Result<&mut Self> {
        let data = figure.to_image(ImageFormat::Png, FIGURE_SCALE)?;
        self.add_picture(data, left, top, options.width, options.height)
    }

    /// Inserts already encoded image bytes as a picture.
    pub fn add_picture(
        &mut self,
        data: Vec<u8>,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> Result<&mut Self> {
        let format = image::guess_format(&data)?;
        let decoded = image::load_from_memory_with_format(&data, format)?;
        let (extension, content_type) = media_type(format)?;

        // Fails on a slide without a shape tree, before any relationship exists.
        let id = self.next_shape_id()?;

        let file_name = format!("image-{}.{}", uuid::Uuid::new_v4(), extension);
        let media_name = format!("ppt/media/{}", file_name);
        let rel_id = self
            .rels
            .add(RT_IMAGE, &relative_target(&self.partname, &media_name));
        let picture = shapes::new_picture(
            id,
            &rel_id,
            &file_name,
            Emu::from_cm(left),
            Emu::from_cm(top),
            Emu::from_cm(width),
            Emu::from_cm(height),
        );
        self.sp_tree_mut()?.push_child(picture);

        info!(
            "Added {}x{} picture {} to {}",
            decoded.width(),
            decoded.height(),
            media_name,
            self.partname
        );
        self.media.push(MediaPart {
            name: media_name,
            content_type,
            data,
        });
        Ok(self)
    }
}

fn media_type(format: image::ImageFormat) -> Result<(&'static str, &'static str)> {
    match format {
        image::ImageFormat::Png => Ok(("png", "image/png")),
        image::ImageFormat::Jpeg => Ok(("jpeg", "image/jpeg")),
        image::ImageFormat::Gif => Ok(("gif", "image/gif")),
        image::ImageFormat::Bmp => Ok(("bmp", "image/bmp")),
        image::ImageFormat::Tiff => Ok(("tiff", "image/tiff")),
        other => Err(SlideError::ValidationError(format!(
            "Unsupported picture format: {:?}",
            other
        ))),
    }
}
