//! `lopdf` implementation of [`DocumentBackend`]

use super::DocumentBackend;
use super::xobject::{SourceImporter, media_box, page_size};
use crate::layout::{Placement, Rect};
use crate::overlay::{Font, Stroke, TextOp};
use crate::types::{NotesError, Result, Rgb};
use crate::winansi;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use std::fmt::Write;

/// Builds the output document from a borrowed source document
pub struct LopdfBackend<'a> {
    source: &'a Document,
    source_page_ids: Vec<ObjectId>,
    output: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    importer: SourceImporter<'a>,
    /// Source page index -> XObject id
    xobject_cache: HashMap<usize, ObjectId>,
    fonts: HashMap<Font, ObjectId>,
    current: Option<PageBuilder>,
}

/// Output page under construction
struct PageBuilder {
    width: f32,
    height: f32,
    content: String,
    xobjects: Dictionary,
    fonts: Dictionary,
}

impl<'a> LopdfBackend<'a> {
    pub fn new(source: &'a Document) -> Self {
        let source_page_ids = source.get_pages().values().copied().collect();
        let mut output = Document::with_version("1.7");
        let pages_tree_id = output.new_object_id();

        Self {
            source,
            source_page_ids,
            output,
            pages_tree_id,
            page_refs: Vec::new(),
            importer: SourceImporter::new(source),
            xobject_cache: HashMap::new(),
            fonts: HashMap::new(),
            current: None,
        }
    }

    fn page(&mut self) -> Result<&mut PageBuilder> {
        self.current
            .as_mut()
            .ok_or_else(|| NotesError::Config("No output page in progress".to_string()))
    }

    fn source_page_id(&self, index: usize) -> Result<ObjectId> {
        self.source_page_ids
            .get(index)
            .copied()
            .ok_or_else(|| NotesError::Config(format!("Source page {} does not exist", index + 1)))
    }

    fn page_xobject(&mut self, index: usize) -> Result<ObjectId> {
        if let Some(&id) = self.xobject_cache.get(&index) {
            return Ok(id);
        }
        let page_id = self.source_page_id(index)?;
        let id = self.importer.import_page(&mut self.output, page_id)?;
        self.xobject_cache.insert(index, id);
        Ok(id)
    }

    fn font_id(&mut self, font: Font) -> ObjectId {
        if let Some(&id) = self.fonts.get(&font) {
            return id;
        }
        let mut font_dict = Dictionary::new();
        font_dict.set("Type", Object::Name(b"Font".to_vec()));
        font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        font_dict.set("BaseFont", Object::Name(base_font(font).to_vec()));
        font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        let id = self.output.add_object(font_dict);
        self.fonts.insert(font, id);
        id
    }
}

impl DocumentBackend for LopdfBackend<'_> {
    type Output = Document;

    fn page_count(&self) -> usize {
        self.source_page_ids.len()
    }

    fn page_dimensions(&self, index: usize) -> Result<(f32, f32)> {
        page_size(self.source, self.source_page_id(index)?)
    }

    fn begin_page(&mut self, width: f32, height: f32) -> Result<()> {
        if self.current.is_some() {
            return Err(NotesError::Config(
                "Previous output page was not finished".to_string(),
            ));
        }
        self.current = Some(PageBuilder {
            width,
            height,
            content: String::new(),
            xobjects: Dictionary::new(),
            fonts: Dictionary::new(),
        });
        Ok(())
    }

    fn render_page_into(&mut self, placement: &Placement) -> Result<()> {
        let index = placement.source_page;
        let xobject_id = self.page_xobject(index)?;
        let [llx, lly, _, _] = media_box(self.source, self.source_page_id(index)?)?;

        let name = format!("P{}", index);
        let scale = placement.scale;
        let rect = placement.content_rect;

        let page = self.page()?;
        page.xobjects
            .set(name.as_bytes(), Object::Reference(xobject_id));
        // The form's BBox keeps the source origin, so shift it back to (0, 0)
        let _ = writeln!(
            page.content,
            "q {} 0 0 {} {} {} cm /{} Do Q",
            num(scale),
            num(scale),
            num(rect.x - llx * scale),
            num(rect.y - lly * scale),
            name
        );
        Ok(())
    }

    fn draw_rect(&mut self, rect: &Rect, stroke: &Stroke) -> Result<()> {
        let page = self.page()?;
        let _ = writeln!(
            page.content,
            "q {} {} w {} {} {} {} re S Q",
            stroke_color(stroke.color),
            num(stroke.width),
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height)
        );
        Ok(())
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: &Stroke) -> Result<()> {
        let page = self.page()?;
        let _ = writeln!(
            page.content,
            "q {} {} w {} {} m {} {} l S Q",
            stroke_color(stroke.color),
            num(stroke.width),
            num(from.0),
            num(from.1),
            num(to.0),
            num(to.1)
        );
        Ok(())
    }

    fn draw_text(&mut self, text: &TextOp) -> Result<()> {
        let encoded = encode_text(&text.text);
        if encoded.is_empty() {
            log::debug!("Nothing left to draw of {:?}", text.text);
            return Ok(());
        }

        let font_id = self.font_id(text.font);
        let font_name = font_resource_name(text.font);

        let page = self.page()?;
        page.fonts.set(font_name, Object::Reference(font_id));
        let _ = writeln!(
            page.content,
            "q BT {} /{} {} Tf {} {} Td ({}) Tj ET Q",
            fill_color(text.color),
            font_name,
            num(text.size),
            num(text.x),
            num(text.y),
            encoded
        );
        Ok(())
    }

    fn finish_page(&mut self) -> Result<()> {
        let page = self
            .current
            .take()
            .ok_or_else(|| NotesError::Config("No output page in progress".to_string()))?;

        let content_id = self
            .output
            .add_object(Stream::new(Dictionary::new(), page.content.into_bytes()));

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(page.xobjects));
        if !page.fonts.is_empty() {
            resources.set("Font", Object::Dictionary(page.fonts));
        }

        let page_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(self.pages_tree_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(page.width),
                    Object::Real(page.height),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Dictionary(resources)),
        ]);

        let page_id = self.output.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
        Ok(())
    }

    fn finish(mut self) -> Result<Document> {
        if self.current.is_some() {
            self.finish_page()?;
        }

        // Create pages tree
        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        // Create catalog
        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));
        self.output.trailer.set("Root", catalog_id);

        Ok(self.output)
    }
}

// =============================================================================
// Content Stream Helpers
// =============================================================================

/// Numbers are only rounded here, when written into the content stream
fn num(value: f32) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-" | "-0" => "0".to_string(),
        _ => s.to_string(),
    }
}

fn stroke_color(color: Rgb) -> String {
    format!("{} {} {} RG", num(color.r), num(color.g), num(color.b))
}

fn fill_color(color: Rgb) -> String {
    format!("{} {} {} rg", num(color.r), num(color.g), num(color.b))
}

fn base_font(font: Font) -> &'static [u8] {
    match font {
        Font::Helvetica => b"Helvetica",
        Font::HelveticaBold => b"Helvetica-Bold",
    }
}

fn font_resource_name(font: Font) -> &'static str {
    match font {
        Font::Helvetica => "F1",
        Font::HelveticaBold => "F2",
    }
}

/// Encode text as a WinAnsi literal string body.
///
/// Characters the standard fonts cannot show (emoji, CJK, ...) are dropped.
fn encode_text(text: &str) -> String {
    let dropped = text
        .chars()
        .filter(|&ch| winansi::encode_char(ch).is_none())
        .count();
    if dropped > 0 {
        log::debug!(
            "Dropped {} character(s) without a WinAnsi glyph from {:?}",
            dropped,
            text
        );
    }

    let printable = winansi::printable(text);
    let mut out = String::with_capacity(printable.len());
    for byte in printable.chars().filter_map(winansi::encode_char) {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(byte as char);
            }
            0x20..=0x7E => out.push(byte as char),
            _ => {
                let _ = write!(out, "\\{:03o}", byte);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(612.0), "612");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(367.199_98), "367.2");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(1.0 / 3.0), "0.33");
    }

    #[test]
    fn test_encode_text_escapes_delimiters() {
        assert_eq!(encode_text("a(b)c\\"), "a\\(b\\)c\\\\");
    }

    #[test]
    fn test_encode_text_latin1_and_emoji() {
        assert_eq!(encode_text("Caf\u{e9}"), "Caf\\351");
        assert_eq!(encode_text("\u{1F680} Physics NOTES"), "Physics NOTES");
        assert_eq!(encode_text("\u{1F4DA}"), "");
    }

    #[test]
    fn test_encode_text_typographic_punctuation() {
        assert_eq!(
            encode_text("Sarah\u{2019}s \u{201C}Bio\u{201D} \u{2013} NOTES \u{20AC}"),
            "Sarah\\222s \\223Bio\\224 \\226 NOTES \\200"
        );
        assert_eq!(encode_text("Wait\u{2026}"), "Wait\\205");
    }
}
