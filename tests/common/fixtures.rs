//! Test fixtures and PDF builders.
//!
//! Builds small PDFs with lopdf so tests know the exact raw bytes of each
//! embedded image.

use anyhow::Result;
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::fs;
use std::path::{Path, PathBuf};

pub const EMPTY_SHA1: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";
pub const ZERO_SHA1: &str = "0000000000000000000000000000000000000000";

/// An image XObject to embed.
#[derive(Debug, Clone)]
pub struct ImageSpec {
    pub data: Vec<u8>,
    pub width: i64,
    pub height: i64,
    pub filter: Option<&'static str>,
}

impl ImageSpec {
    /// An unfiltered 8-bit grayscale image with one byte per pixel.
    pub fn gray(width: i64, height: i64, data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
            width,
            height,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: &'static str) -> Self {
        self.filter = Some(filter);
        self
    }

    fn to_stream(&self) -> Stream {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => self.width,
            "Height" => self.height,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        };
        if let Some(filter) = self.filter {
            dict.set("Filter", Object::Name(filter.as_bytes().to_vec()));
        }
        Stream::new(dict, self.data.clone())
    }
}

/// Builder for test PDFs with images on each page.
///
/// # Example
///
/// ```no_run
/// let doc = TestPdfBuilder::new()
///     .with_page(vec![ImageSpec::gray(1, 1, &[0x80])])
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TestPdfBuilder {
    pages: Vec<Vec<ImageSpec>>,
    inherited: Vec<ImageSpec>,
    shared: Option<ImageSpec>,
    encrypted: bool,
}

impl TestPdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page whose own resources hold `images`.
    pub fn with_page(mut self, images: Vec<ImageSpec>) -> Self {
        self.pages.push(images);
        self
    }

    /// Puts `images` in the page tree root's resources. Pages without
    /// images of their own inherit them.
    pub fn with_inherited(mut self, images: Vec<ImageSpec>) -> Self {
        self.inherited = images;
        self
    }

    /// Adds one image object referenced from every page that has its own
    /// resources.
    pub fn with_shared(mut self, image: ImageSpec) -> Self {
        self.shared = Some(image);
        self
    }

    /// Marks the trailer as encrypted.
    pub fn encrypted(mut self) -> Self {
        self.encrypted = true;
        self
    }

    pub fn build(&self) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let shared_id = self.shared.as_ref().map(|s| doc.add_object(s.to_stream()));

        let mut kids = Vec::new();
        for images in &self.pages {
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(100),
                    Object::Integer(100),
                ],
            };

            let mut xobjects = Dictionary::new();
            for (index, image) in images.iter().enumerate() {
                let id = doc.add_object(image.to_stream());
                xobjects.set(format!("Im{}", index), id);
            }
            if let Some(id) = shared_id {
                xobjects.set("Shared", id);
            }
            if !images.is_empty() || shared_id.is_some() {
                page.set("Resources", dictionary! { "XObject" => xobjects });
            }

            let content = doc.add_object(Stream::new(dictionary! {}, b"q Q".to_vec()));
            page.set("Contents", content);
            kids.push(Object::from(doc.add_object(page)));
        }

        let mut pages = dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
        };
        if !self.inherited.is_empty() {
            let mut xobjects = Dictionary::new();
            for (index, image) in self.inherited.iter().enumerate() {
                let id = doc.add_object(image.to_stream());
                xobjects.set(format!("Inherited{}", index), id);
            }
            pages.set("Resources", dictionary! { "XObject" => xobjects });
        }
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog);

        if self.encrypted {
            let encrypt = doc.add_object(dictionary! {
                "Filter" => "Standard",
                "V" => 1,
                "R" => 2,
            });
            doc.trailer.set("Encrypt", encrypt);
        }

        doc
    }

    /// Serializes and reloads the document, the way a test reads a PDF file.
    pub fn build_loaded(&self) -> Result<Document> {
        let mut doc = self.build();
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(Document::load_mem(&bytes)?)
    }

    /// Writes the document to `path`.
    pub fn build_file(&self, path: &Path) -> Result<PathBuf> {
        let mut doc = self.build();
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        fs::write(path, bytes)?;
        Ok(path.to_path_buf())
    }
}
