//! Importing source pages as Form XObjects
//!
//! Each slide is wrapped into a Form XObject whose bounding box is the
//! page's MediaBox, so it can be scaled into a cell with a single `cm`.

use crate::constants::{PAGE_HEIGHT_PT, PAGE_WIDTH_PT};
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Page tree walks stop here; malformed files can loop through `Parent`
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// Copies objects from one source document into an output document.
///
/// Every source object is copied at most once. Shared resources such as
/// fonts and images used by several slides end up as a single object.
pub struct SourceImporter<'a> {
    source: &'a Document,
    /// Source object id -> output object id
    remap: HashMap<ObjectId, ObjectId>,
}

impl<'a> SourceImporter<'a> {
    pub fn new(source: &'a Document) -> Self {
        Self {
            source,
            remap: HashMap::new(),
        }
    }

    /// Wrap a source page into a Form XObject inside `output`
    pub fn import_page(&mut self, output: &mut Document, page_id: ObjectId) -> Result<ObjectId> {
        let [llx, lly, urx, ury] = media_box(self.source, page_id)?;
        let content = page_content(self.source, page_id)?;

        let mut form = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"XObject".to_vec())),
            ("Subtype", Object::Name(b"Form".to_vec())),
            ("FormType", Object::Integer(1)),
            (
                "BBox",
                Object::Array(vec![
                    Object::Real(llx),
                    Object::Real(lly),
                    Object::Real(urx),
                    Object::Real(ury),
                ]),
            ),
        ]);

        if let Some(resources) = page_attribute(self.source, page_id, b"Resources")? {
            form.set("Resources", self.import(output, &resources)?);
        }

        Ok(output.add_object(Stream::new(form, content)))
    }

    /// Copy `object` and everything it references into `output`
    pub fn import(&mut self, output: &mut Document, object: &Object) -> Result<Object> {
        let imported = match object {
            Object::Reference(id) => Object::Reference(self.import_reference(output, *id)?),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.import(output, item))
                    .collect::<Result<_>>()?,
            ),
            Object::Dictionary(dict) => Object::Dictionary(self.import_dictionary(output, dict)?),
            Object::Stream(stream) => {
                let dict = self.import_dictionary(output, &stream.dict)?;
                let mut copy = Stream::new(dict, stream.content.clone());
                copy.allows_compression = stream.allows_compression;
                Object::Stream(copy)
            }
            other => other.clone(),
        };
        Ok(imported)
    }

    fn import_reference(&mut self, output: &mut Document, id: ObjectId) -> Result<ObjectId> {
        if let Some(&mapped) = self.remap.get(&id) {
            return Ok(mapped);
        }

        // Registered before recursing so reference cycles resolve to this id
        let mapped = output.new_object_id();
        self.remap.insert(id, mapped);

        let source = self.source;
        let object = self.import(output, source.get_object(id)?)?;
        output.objects.insert(mapped, object);
        Ok(mapped)
    }

    fn import_dictionary(&mut self, output: &mut Document, dict: &Dictionary) -> Result<Dictionary> {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            // Resources never need the source page tree
            if key == b"Parent" {
                continue;
            }
            copy.set(key.clone(), self.import(output, value)?);
        }
        Ok(copy)
    }
}

/// Decoded content of a page, with multiple streams joined by newlines
fn page_content(doc: &Document, page_id: ObjectId) -> Result<Vec<u8>> {
    let page = doc.get_dictionary(page_id)?;
    let Ok(contents) = page.get(b"Contents") else {
        return Ok(Vec::new());
    };

    let contents = match contents {
        Object::Reference(id) => doc.get_object(*id)?,
        direct => direct,
    };

    match contents {
        Object::Array(parts) => {
            let mut joined = Vec::new();
            for part in parts {
                if let Object::Reference(id) = part {
                    joined.extend(stream_bytes(doc.get_object(*id)?));
                    joined.push(b'\n');
                }
            }
            Ok(joined)
        }
        single => Ok(stream_bytes(single)),
    }
}

fn stream_bytes(object: &Object) -> Vec<u8> {
    object
        .as_stream()
        .map(|stream| {
            stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone())
        })
        .unwrap_or_default()
}

/// Look up a page attribute, climbing `Parent` links for inherited keys
fn page_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Result<Option<Object>> {
    let mut node = doc.get_dictionary(page_id)?;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Ok(Some(value.clone()));
        }
        let Ok(parent) = node.get(b"Parent").and_then(Object::as_reference) else {
            break;
        };
        node = doc.get_dictionary(parent)?;
    }

    Ok(None)
}

/// A page's MediaBox as `[llx, lly, urx, ury]`.
///
/// Pages without a usable MediaBox are treated as US Letter.
pub fn media_box(doc: &Document, page_id: ObjectId) -> Result<[f32; 4]> {
    let letter = [0.0, 0.0, PAGE_WIDTH_PT, PAGE_HEIGHT_PT];

    let values = match page_attribute(doc, page_id, b"MediaBox")? {
        Some(Object::Reference(id)) => doc.get_object(id)?.clone(),
        Some(direct) => direct,
        None => return Ok(letter),
    };

    let Ok(values) = values.as_array() else {
        return Ok(letter);
    };
    let numbers: Option<Vec<f32>> = values.iter().map(|v| v.as_float().ok()).collect();

    match numbers.as_deref() {
        Some(&[llx, lly, urx, ury]) => Ok([llx, lly, urx, ury]),
        _ => Ok(letter),
    }
}

/// Page size (width, height) in points
pub fn page_size(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let [llx, lly, urx, ury] = media_box(doc, page_id)?;
    Ok((urx - llx, ury - lly))
}
