// ABOUTME: Shape XML for slides: text boxes, pictures and cloned placeholders
// ABOUTME: Also provides the read-only view of the shapes on a slide

use crate::text::{self, Paragraph};
use crate::units::Emu;
use crate::xml::Element;

// Placeholders a new slide does not inherit from its layout.
const SKIPPED_PLACEHOLDERS: &[&str] = &["dt", "ftr", "sldNum"];

/// What kind of shape an element of the shape tree is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Placeholder,
    TextBox,
    AutoShape,
    Picture,
    Group,
    GraphicFrame,
    Connector,
}

/// Read-only snapshot of one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeInfo {
    pub id: u32,
    pub name: String,
    pub kind: ShapeKind,
    /// Placeholder type (`title`, `body`, ...); `obj` when the placeholder omits it.
    pub placeholder_type: Option<String>,
    pub left: Option<Emu>,
    pub top: Option<Emu>,
    pub width: Option<Emu>,
    pub height: Option<Emu>,
    pub paragraphs: Vec<Paragraph>,
    /// Relationship id of the embedded image, for pictures.
    pub image_rel_id: Option<String>,
}

impl ShapeInfo {
    pub(crate) fn from_element(element: &Element) -> Option<Self> {
        let kind = match element.name.as_str() {
            "p:sp" if placeholder(element).is_some() => ShapeKind::Placeholder,
            "p:sp" if is_text_box(element) => ShapeKind::TextBox,
            "p:sp" => ShapeKind::AutoShape,
            "p:pic" => ShapeKind::Picture,
            "p:grpSp" => ShapeKind::Group,
            "p:graphicFrame" => ShapeKind::GraphicFrame,
            "p:cxnSp" => ShapeKind::Connector,
            _ => return None,
        };
        let c_nv_pr = non_visual(element).and_then(|nv| nv.child("p:cNvPr"));
        let xfrm = element
            .child("p:spPr")
            .or_else(|| element.child("p:grpSpPr"))
            .and_then(|sp_pr| sp_pr.child("a:xfrm"))
            .or_else(|| element.child("p:xfrm"));
        let off = xfrm.and_then(|x| x.child("a:off"));
        let ext = xfrm.and_then(|x| x.child("a:ext"));

        Some(ShapeInfo {
            id: c_nv_pr
                .and_then(|c| c.attr("id"))
                .and_then(|id| id.parse().ok())
                .unwrap_or_default(),
            name: c_nv_pr
                .and_then(|c| c.attr("name"))
                .unwrap_or_default()
                .to_string(),
            kind,
            placeholder_type: placeholder(element)
                .map(|ph| ph.attr("type").unwrap_or("obj").to_string()),
            left: emu_attr(off, "x"),
            top: emu_attr(off, "y"),
            width: emu_attr(ext, "cx"),
            height: emu_attr(ext, "cy"),
            paragraphs: text::tx_body(element)
                .map(text::paragraphs)
                .unwrap_or_default(),
            image_rel_id: element
                .find(&["p:blipFill", "a:blip"])
                .and_then(|blip| blip.attr("r:embed"))
                .map(str::to_string),
        })
    }

    /// Text of all paragraphs joined with `\n`.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_title(&self) -> bool {
        is_title_type(self.placeholder_type.as_deref())
    }
}

fn emu_attr(element: Option<&Element>, key: &str) -> Option<Emu> {
    element
        .and_then(|e| e.attr(key))
        .and_then(|v| v.parse().ok())
        .map(Emu)
}

/// `p:nvSpPr`, `p:nvPicPr`, ... whichever non-visual group the shape has.
fn non_visual(element: &Element) -> Option<&Element> {
    element.child_elements().find(|c| c.name.starts_with("p:nv"))
}

/// The `p:ph` element of a placeholder shape.
pub(crate) fn placeholder(element: &Element) -> Option<&Element> {
    non_visual(element)
        .and_then(|nv| nv.child("p:nvPr"))
        .and_then(|nv_pr| nv_pr.child("p:ph"))
}

fn is_text_box(element: &Element) -> bool {
    element
        .find(&["p:nvSpPr", "p:cNvSpPr"])
        .and_then(|c| c.attr("txBox"))
        == Some("1")
}

pub(crate) fn is_title_type(placeholder_type: Option<&str>) -> bool {
    matches!(placeholder_type, Some("title") | Some("ctrTitle"))
}

/// True when the element is a placeholder of type `title` or `ctrTitle`.
pub(crate) fn is_title_placeholder(element: &Element) -> bool {
    element.name == "p:sp"
        && is_title_type(placeholder(element).map(|ph| ph.attr("type").unwrap_or("obj")))
}

/// Highest `cNvPr/@id` in a shape tree, including nested groups.
pub(crate) fn max_shape_id(sp_tree: &Element) -> u32 {
    sp_tree
        .descendants("p:cNvPr")
        .iter()
        .filter_map(|c| c.attr("id").and_then(|id| id.parse::<u32>().ok()))
        .max()
        .unwrap_or(0)
}

fn xfrm(left: Emu, top: Emu, width: Emu, height: Emu) -> Element {
    Element::new("a:xfrm")
        .with_child(
            Element::new("a:off")
                .with_attr("x", left.to_string())
                .with_attr("y", top.to_string()),
        )
        .with_child(
            Element::new("a:ext")
                .with_attr("cx", width.to_string())
                .with_attr("cy", height.to_string()),
        )
}

fn rect_geometry() -> Element {
    Element::new("a:prstGeom")
        .with_attr("prst", "rect")
        .with_child(Element::new("a:avLst"))
}

/// A new `p:sp` text box with one empty paragraph.
pub(crate) fn new_text_box(id: u32, left: Emu, top: Emu, width: Emu, height: Emu) -> Element {
    Element::new("p:sp")
        .with_child(
            Element::new("p:nvSpPr")
                .with_child(
                    Element::new("p:cNvPr")
                        .with_attr("id", id.to_string())
                        .with_attr("name", format!("TextBox {}", id - 1)),
                )
                .with_child(Element::new("p:cNvSpPr").with_attr("txBox", "1"))
                .with_child(Element::new("p:nvPr")),
        )
        .with_child(
            Element::new("p:spPr")
                .with_child(xfrm(left, top, width, height))
                .with_child(rect_geometry())
                .with_child(Element::new("a:noFill")),
        )
        .with_child(text::empty_tx_body(
            Element::new("a:bodyPr")
                .with_attr("wrap", "none")
                .with_child(Element::new("a:spAutoFit")),
        ))
}

/// A new `p:pic` referencing an image relationship.
pub(crate) fn new_picture(
    id: u32,
    rel_id: &str,
    description: &str,
    left: Emu,
    top: Emu,
    width: Emu,
    height: Emu,
) -> Element {
    Element::new("p:pic")
        .with_child(
            Element::new("p:nvPicPr")
                .with_child(
                    Element::new("p:cNvPr")
                        .with_attr("id", id.to_string())
                        .with_attr("name", format!("Picture {}", id - 1))
                        .with_attr("descr", description),
                )
                .with_child(
                    Element::new("p:cNvPicPr")
                        .with_child(Element::new("a:picLocks").with_attr("noChangeAspect", "1")),
                )
                .with_child(Element::new("p:nvPr")),
        )
        .with_child(
            Element::new("p:blipFill")
                .with_child(Element::new("a:blip").with_attr("r:embed", rel_id))
                .with_child(Element::new("a:stretch").with_child(Element::new("a:fillRect"))),
        )
        .with_child(
            Element::new("p:spPr")
                .with_child(xfrm(left, top, width, height))
                .with_child(rect_geometry()),
        )
}

/// Clones the placeholders of a layout shape tree for a new slide.
///
/// The clones keep the placeholder identity (`p:ph`) and inherit position and
/// formatting from the layout.
pub(crate) fn clone_layout_placeholders(layout_sp_tree: &Element) -> Vec<Element> {
    let mut next_id = 2;
    layout_sp_tree
        .children_named("p:sp")
        .filter_map(|sp| {
            let ph = placeholder(sp)?;
            if SKIPPED_PLACEHOLDERS.contains(&ph.attr("type").unwrap_or("obj")) {
                return None;
            }
            let name = sp
                .find(&["p:nvSpPr", "p:cNvPr"])
                .and_then(|c| c.attr("name"))
                .unwrap_or("Placeholder")
                .to_string();
            let id = next_id;
            next_id += 1;
            Some(
                Element::new("p:sp")
                    .with_child(
                        Element::new("p:nvSpPr")
                            .with_child(
                                Element::new("p:cNvPr")
                                    .with_attr("id", id.to_string())
                                    .with_attr("name", name),
                            )
                            .with_child(
                                Element::new("p:cNvSpPr").with_child(
                                    Element::new("a:spLocks").with_attr("noGrp", "1"),
                                ),
                            )
                            .with_child(Element::new("p:nvPr").with_child(ph.clone())),
                    )
                    .with_child(Element::new("p:spPr"))
                    .with_child(text::empty_tx_body(Element::new("a:bodyPr"))),
            )
        })
        .collect()
}
