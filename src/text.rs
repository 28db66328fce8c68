// ABOUTME: Text-frame editing for shapes on a slide
// ABOUTME: Builds paragraphs from plain text and overlays font properties per paragraph

use crate::units::{centipoints_to_pt, pt_to_centipoints};
use crate::xml::Element;

const VERTICAL_TAB: char = '\u{000B}';

// Children of a:rPr / a:defRPr that must follow a:latin.
const AFTER_LATIN: &[&str] = &[
    "a:ea",
    "a:cs",
    "a:sym",
    "a:hlinkClick",
    "a:hlinkMouseOver",
    "a:rtl",
    "a:extLst",
];

/// Character properties; `None` means "inherit / leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Font {
    pub name: Option<String>,
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

impl Font {
    /// Reads the properties stored on an `a:rPr`/`a:defRPr` element.
    pub(crate) fn from_run_properties(rpr: &Element) -> Self {
        Font {
            name: rpr
                .child("a:latin")
                .and_then(|latin| latin.attr("typeface"))
                .map(str::to_string),
            size: rpr
                .attr("sz")
                .and_then(|sz| sz.parse::<i64>().ok())
                .map(centipoints_to_pt),
            bold: rpr.attr("b").map(parse_bool),
            italic: rpr.attr("i").map(parse_bool),
        }
    }

    /// Writes every `Some` field onto the element, leaving the others untouched.
    pub(crate) fn overlay_onto(&self, rpr: &mut Element) {
        if let Some(size) = self.size {
            rpr.set_attr("sz", pt_to_centipoints(size).to_string());
        }
        if let Some(bold) = self.bold {
            rpr.set_attr("b", if bold { "1" } else { "0" });
        }
        if let Some(italic) = self.italic {
            rpr.set_attr("i", if italic { "1" } else { "0" });
        }
        if let Some(name) = &self.name {
            rpr.get_or_insert_child("a:latin", AFTER_LATIN)
                .set_attr("typeface", name.as_str());
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "on")
}

/// A paragraph as seen through the read-only shape view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub font: Font,
}

impl Paragraph {
    pub(crate) fn from_element(p: &Element) -> Self {
        let font = p
            .find(&["a:pPr", "a:defRPr"])
            .map(Font::from_run_properties)
            .unwrap_or_default();
        Paragraph {
            text: paragraph_text(p),
            font,
        }
    }
}

/// Runs and fields contribute their text; line breaks read back as a vertical tab.
fn paragraph_text(p: &Element) -> String {
    let mut text = String::new();
    for child in p.child_elements() {
        match child.name.as_str() {
            "a:r" | "a:fld" => {
                if let Some(t) = child.child("a:t") {
                    text.push_str(&t.text());
                }
            }
            "a:br" => text.push(VERTICAL_TAB),
            _ => {}
        }
    }
    text
}

/// Paragraphs of a `p:txBody`, in order.
pub fn paragraphs(tx_body: &Element) -> Vec<Paragraph> {
    tx_body
        .children_named("a:p")
        .map(Paragraph::from_element)
        .collect()
}

/// Full text of a text body; paragraphs are joined with `\n`.
pub fn body_text(tx_body: &Element) -> String {
    paragraphs(tx_body)
        .into_iter()
        .map(|p| p.text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replaces all paragraphs of a text body with the given text.
///
/// Each `\n` starts a new paragraph and each vertical tab becomes a line
/// break inside the current paragraph.
pub fn set_body_text(tx_body: &mut Element, text: &str) {
    tx_body.remove_children_named("a:p");
    for line in text.split('\n') {
        tx_body.push_child(build_paragraph(line));
    }
}

fn build_paragraph(line: &str) -> Element {
    let mut p = Element::new("a:p");
    for (i, segment) in line.split(VERTICAL_TAB).enumerate() {
        if i > 0 {
            p.push_child(Element::new("a:br"));
        }
        if !segment.is_empty() {
            p.push_child(
                Element::new("a:r").with_child(Element::new("a:t").with_text(segment)),
            );
        }
    }
    p
}

/// Applies the font to every paragraph of the text body.
///
/// The paragraph default run properties carry the font, and each existing run
/// receives the same overlay so mixed-format runs end up uniform for the fields
/// that were given.
pub fn apply_font(tx_body: &mut Element, font: &Font) {
    for p in tx_body.child_elements_mut().filter(|e| e.name == "a:p") {
        let ppr = p.get_or_insert_child("a:pPr", &["a:r", "a:br", "a:fld", "a:endParaRPr"]);
        let def_rpr = ppr.get_or_insert_child("a:defRPr", &["a:extLst"]);
        font.overlay_onto(def_rpr);

        for run in p.child_elements_mut().filter(|e| e.name == "a:r") {
            let rpr = run.get_or_insert_child("a:rPr", &["a:t"]);
            font.overlay_onto(rpr);
        }
    }
}

/// Text body of a `p:sp`, if it has one.
pub fn tx_body(shape: &Element) -> Option<&Element> {
    shape.child("p:txBody")
}

pub fn tx_body_mut(shape: &mut Element) -> Option<&mut Element> {
    shape.child_mut("p:txBody")
}

/// A text body holding a single empty paragraph.
pub fn empty_tx_body(body_pr: Element) -> Element {
    Element::new("p:txBody")
        .with_child(body_pr)
        .with_child(Element::new("a:lstStyle"))
        .with_child(Element::new("a:p"))
}
