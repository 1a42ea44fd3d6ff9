//! Image XObjects embedded in PDF documents.
//!
//! A [`PdfImage`] is only a handle: the object is looked up in its document
//! each time the stream is opened, so a stale or wrong object id surfaces as
//! an [`ChecksumError::InvalidDocument`] at checksum time.

use super::ImageSource;
use crate::error::{ChecksumError, ChecksumResult};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::BTreeSet;
use std::io::{Cursor, Read};

/// Guards against cycles in malformed page trees.
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// An image XObject inside a loaded document.
#[derive(Debug, Clone, Copy)]
pub struct PdfImage<'a> {
    doc: &'a Document,
    id: ObjectId,
}

impl<'a> PdfImage<'a> {
    /// Creates a handle for object `id` in `doc`. No lookup happens yet.
    pub fn new(doc: &'a Document, id: ObjectId) -> Self {
        Self { doc, id }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The raw (still encoded) image stream bytes.
    pub fn raw_data(&self) -> ChecksumResult<&'a [u8]> {
        Ok(self.stream()?.content.as_slice())
    }

    pub fn width(&self) -> ChecksumResult<i64> {
        self.integer(b"Width")
    }

    pub fn height(&self) -> ChecksumResult<i64> {
        self.integer(b"Height")
    }

    /// Names of the stream filters, in decode order. Empty when unfiltered.
    pub fn filters(&self) -> ChecksumResult<Vec<String>> {
        let stream = self.stream()?;
        let filter = match stream.dict.get(b"Filter") {
            Ok(filter) => resolve(self.doc, filter)?,
            Err(_) => return Ok(Vec::new()),
        };

        match filter {
            Object::Name(name) => Ok(vec![String::from_utf8_lossy(name).into_owned()]),
            Object::Array(items) => items
                .iter()
                .map(|item| -> ChecksumResult<String> {
                    match resolve(self.doc, item)? {
                        Object::Name(name) => Ok(String::from_utf8_lossy(name).into_owned()),
                        _ => Err(ChecksumError::invalid(format!(
                            "image {} {} has a non-name filter entry",
                            self.id.0, self.id.1
                        ))),
                    }
                })
                .collect(),
            _ => Err(ChecksumError::invalid(format!(
                "image {} {} has a malformed /Filter",
                self.id.0, self.id.1
            ))),
        }
    }

    fn integer(&self, key: &[u8]) -> ChecksumResult<i64> {
        let stream = self.stream()?;
        let value = resolve(self.doc, stream.dict.get(key)?)?;
        Ok(value.as_i64()?)
    }

    fn stream(&self) -> ChecksumResult<&'a Stream> {
        ensure_readable(self.doc)?;

        let stream = match self.doc.get_object(self.id)? {
            Object::Stream(stream) => stream,
            _ => {
                return Err(ChecksumError::invalid(format!(
                    "object {} {} is not a stream",
                    self.id.0, self.id.1
                )))
            }
        };

        if !is_image(&stream.dict) {
            return Err(ChecksumError::invalid(format!(
                "object {} {} is not an image XObject",
                self.id.0, self.id.1
            )));
        }

        Ok(stream)
    }
}

impl ImageSource for PdfImage<'_> {
    fn open_stream(&self) -> ChecksumResult<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self.raw_data()?)))
    }
}

/// Finds every image XObject used by a page, in page order.
///
/// Resources inherited from ancestor page-tree nodes are honored, and images
/// drawn through Form XObjects are found by descending into the form's own
/// resources. An image shared by several pages is listed once, at its first
/// use.
pub fn images(doc: &Document) -> ChecksumResult<Vec<PdfImage<'_>>> {
    ensure_readable(doc)?;

    let mut seen = BTreeSet::new();
    let mut found = Vec::new();

    for (page_number, page_id) in doc.get_pages() {
        let Some(resources) = page_resources(doc, page_id)? else {
            continue;
        };
        if let Some(xobjects) = xobjects_in(doc, resources)? {
            collect_images(doc, xobjects, page_number, &mut seen, &mut found)?;
        }
    }

    Ok(found)
}

/// Walks one `/XObject` dictionary. `seen` holds every visited object, so
/// forms that draw themselves are entered once.
fn collect_images<'a>(
    doc: &'a Document,
    xobjects: &'a Dictionary,
    page_number: u32,
    seen: &mut BTreeSet<ObjectId>,
    found: &mut Vec<PdfImage<'a>>,
) -> ChecksumResult<()> {
    for (name, entry) in xobjects.iter() {
        let Object::Reference(id) = entry else {
            continue;
        };
        if !seen.insert(*id) {
            continue;
        }
        let Ok(Object::Stream(stream)) = doc.get_object(*id) else {
            continue;
        };

        if is_image(&stream.dict) {
            tracing::debug!(
                page = page_number,
                name = %String::from_utf8_lossy(name),
                object = ?id,
                "found image XObject"
            );
            found.push(PdfImage::new(doc, *id));
        } else if is_form(&stream.dict) {
            let Ok(resources) = stream.dict.get(b"Resources") else {
                continue;
            };
            let resources = resolve(doc, resources)?.as_dict()?;
            if let Some(nested) = xobjects_in(doc, resources)? {
                collect_images(doc, nested, page_number, seen, found)?;
            }
        }
    }

    Ok(())
}

fn xobjects_in<'a>(
    doc: &'a Document,
    resources: &'a Dictionary,
) -> ChecksumResult<Option<&'a Dictionary>> {
    match resources.get(b"XObject") {
        Ok(xobjects) => Ok(Some(resolve(doc, xobjects)?.as_dict()?)),
        Err(_) => Ok(None),
    }
}

fn ensure_readable(doc: &Document) -> ChecksumResult<()> {
    if doc.trailer.get(b"Encrypt").is_ok() {
        return Err(ChecksumError::Security {
            reason: "document is encrypted".to_string(),
        });
    }
    Ok(())
}

fn is_image(dict: &Dictionary) -> bool {
    has_subtype(dict, b"Image")
}

fn is_form(dict: &Dictionary) -> bool {
    has_subtype(dict, b"Form")
}

fn has_subtype(dict: &Dictionary, subtype: &[u8]) -> bool {
    matches!(dict.get(b"Subtype"), Ok(Object::Name(name)) if name.as_slice() == subtype)
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> ChecksumResult<&'a Object> {
    match object {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

fn page_resources(doc: &Document, page_id: ObjectId) -> ChecksumResult<Option<&Dictionary>> {
    let mut node = doc.get_dictionary(page_id)?;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(resources) = node.get(b"Resources") {
            return Ok(Some(resolve(doc, resources)?.as_dict()?));
        }
        match node.get(b"Parent") {
            Ok(Object::Reference(parent)) => node = doc.get_dictionary(*parent)?,
            _ => return Ok(None),
        }
    }

    Err(ChecksumError::invalid("page tree is too deep or cyclic"))
}
