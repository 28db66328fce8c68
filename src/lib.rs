// ABOUTME: Library module for tlab-slides.
// ABOUTME: Creates PowerPoint decks with text boxes and rendered figures, and assembles report slides.

// Reexport modules
pub mod config;
pub mod errors;
pub mod figure;
pub mod package;
pub mod photo_luminescence;
pub mod presentation;
pub mod render;
pub mod resources;
pub mod shapes;
pub mod slide;
pub mod templates;
pub mod text;
pub mod units;
pub mod xml;

// Reexport common types and functions
pub use config::Config;
pub use errors::{Result, SlideError};
pub use figure::style::{date_annotation, default_axis, default_layout, DateSpec};
pub use figure::{Annotation, Axis, Chart, Figure, ImageFormat, Layout, Line, ToImage, Trace};
pub use photo_luminescence::PhotoLuminescence;
pub use presentation::{Presentation, SlideLayout};
pub use render::{render_figure, RenderConfig};
pub use resources::ResourceFile;
pub use shapes::{ShapeInfo, ShapeKind};
pub use slide::{FigureOptions, Slide, TextBoxOptions, TitleUpdate, FIGURE_SCALE};
pub use templates::{template_filenames, template_filepaths, DEFAULT_TEMPLATE_PATH};
pub use text::{Font, Paragraph};
pub use units::Emu;
