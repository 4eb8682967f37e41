//! PDF text acquisition using lopdf and pdf-extract.
//!
//! Per page, the embedded text layer is preferred; when it is shorter than
//! the configured threshold the page's dominant embedded image is handed to
//! the OCR transcriber, and the transcription replaces the layer only when
//! it is strictly longer.

use image::{DynamicImage, ImageBuffer, Rgba};
use lopdf::{Document, Object, ObjectId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use super::{PdfType, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;
use crate::ocr::Transcriber;

/// How a page's text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextOrigin {
    /// Embedded PDF text layer.
    Embedded,
    /// OCR transcription of the rendered page image.
    Ocr,
}

/// One page's text plus its provenance. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub text: String,
    pub origin: TextOrigin,
}

/// The best-available text for the relevant pages of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentText {
    pages: Vec<PageText>,
}

impl DocumentText {
    pub fn new(pages: Vec<PageText>) -> Self {
        Self { pages }
    }

    /// A single OCR-transcribed page, for direct image inputs.
    pub fn from_ocr(text: String) -> Self {
        Self {
            pages: vec![PageText {
                text,
                origin: TextOrigin::Ocr,
            }],
        }
    }

    pub fn page(&self, index: usize) -> Option<&PageText> {
        self.pages.get(index)
    }

    pub fn pages(&self) -> &[PageText] {
        &self.pages
    }

    /// All page texts concatenated in page order.
    pub fn combined(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any page fell back to OCR.
    pub fn used_ocr(&self) -> bool {
        self.pages.iter().any(|p| p.origin == TextOrigin::Ocr)
    }
}

/// A loaded PDF document.
pub struct PdfDocument {
    document: Document,
    raw_data: Vec<u8>,
}

impl PdfDocument {
    /// Load a PDF from bytes.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // PDFs encrypted with an empty password are still readable.
        if document.is_encrypted() {
            if document.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");
        }

        if document.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }

        Ok(Self {
            document,
            raw_data: data.to_vec(),
        })
    }

    /// Load a PDF from a file on disk.
    pub fn open(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::load(&data)
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Embedded text for one page (0-indexed). Pages beyond the document or
    /// with an unreadable text layer yield an empty string so acquisition
    /// can fall through to OCR.
    pub fn page_text(&self, index: usize) -> String {
        let page_number = index as u32 + 1;
        if index >= self.page_count() {
            return String::new();
        }
        match self.document.extract_text(&[page_number]) {
            Ok(text) => text,
            Err(e) => {
                debug!(page = page_number, error = %e, "page text layer unreadable");
                String::new()
            }
        }
    }

    /// Whole-document text via pdf-extract, used as a coarse fallback when
    /// lopdf yields nothing for any page.
    pub fn full_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    /// Classify the document by its text and image content.
    pub fn analyze(&self, min_text: usize) -> PdfType {
        let text_len: usize = (0..self.page_count())
            .map(|i| self.page_text(i).chars().count())
            .sum();
        let has_text = text_len >= min_text;
        let has_images = (0..self.page_count()).any(|i| self.page_image(i).is_some());

        match (has_text, has_images) {
            (true, false) => PdfType::Text,
            (false, true) => PdfType::Image,
            (true, true) => PdfType::Hybrid,
            (false, false) => PdfType::Empty,
        }
    }

    /// The dominant (largest) embedded image on a page, if any. Scanned
    /// invoices carry the whole page as a single image.
    pub fn page_image(&self, index: usize) -> Option<DynamicImage> {
        let page_number = index as u32 + 1;
        let pages = self.document.get_pages();
        let page_id = pages.get(&page_number)?;

        let resources = self.page_resources(*page_id)?;
        let xobjects = resources.get(b"XObject").ok()?;
        let (_, xobjects) = self.document.dereference(xobjects).ok()?;
        let Object::Dictionary(xobjects) = xobjects else {
            return None;
        };

        let mut best: Option<DynamicImage> = None;
        for (_name, obj_ref) in xobjects.iter() {
            let Ok((_, obj)) = self.document.dereference(obj_ref) else {
                continue;
            };
            if let Some(img) = self.decode_image_object(obj) {
                let replace = best
                    .as_ref()
                    .map(|b| img.width() * img.height() > b.width() * b.height())
                    .unwrap_or(true);
                if replace {
                    best = Some(img);
                }
            }
        }
        best
    }

    fn decode_image_object(&self, obj: &Object) -> Option<DynamicImage> {
        let Object::Stream(stream) = obj else {
            return None;
        };
        let dict = &stream.dict;

        let subtype = dict.get(b"Subtype").ok()?;
        if subtype.as_name().ok()? != b"Image" {
            return None;
        }

        let width = dict.get(b"Width").ok()?.as_i64().ok()? as u32;
        let height = dict.get(b"Height").ok()?.as_i64().ok()? as u32;

        if let Ok(filter) = dict.get(b"Filter") {
            let filter_name = match filter {
                Object::Name(name) => Some(name.as_slice()),
                Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
                _ => None,
            };

            match filter_name {
                Some(b"DCTDecode") => {
                    // JPEG: the stream content is the compressed image itself.
                    return image::load_from_memory_with_format(
                        &stream.content,
                        image::ImageFormat::Jpeg,
                    )
                    .ok();
                }
                Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
                    debug!("unsupported image filter on scanned page");
                    return None;
                }
                _ => {}
            }
        }

        let data = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());

        let color_space = dict
            .get(b"ColorSpace")
            .ok()
            .and_then(|o| match o {
                Object::Name(name) => Some(name.as_slice()),
                Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
                Object::Reference(r) => self
                    .document
                    .get_object(*r)
                    .ok()
                    .and_then(|o| o.as_name().ok()),
                _ => None,
            })
            .unwrap_or(b"DeviceRGB");

        let bits = dict
            .get(b"BitsPerComponent")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(8);
        if bits != 8 {
            return None;
        }

        raw_to_image(&data, width, height, color_space)
    }

    fn page_resources(&self, page_id: ObjectId) -> Option<lopdf::Dictionary> {
        let mut node_id = page_id;
        loop {
            let Object::Dictionary(dict) = self.document.get_object(node_id).ok()? else {
                return None;
            };
            if let Ok(resources) = dict.get(b"Resources") {
                if let Ok((_, Object::Dictionary(res))) = self.document.dereference(resources) {
                    return Some(res.clone());
                }
            }
            match dict.get(b"Parent") {
                Ok(Object::Reference(parent_id)) => node_id = *parent_id,
                _ => return None,
            }
        }
    }

    /// Acquire the best-available text for the relevant pages.
    ///
    /// Contract: when the embedded text of a page is shorter than
    /// `config.min_page_text` characters, OCR is attempted on the page
    /// image and substituted only if its yield is strictly longer. OCR
    /// failures are logged and the embedded text kept.
    pub fn acquire(
        &self,
        ocr: Option<&dyn Transcriber>,
        config: &PdfConfig,
    ) -> DocumentText {
        let mut pages = Vec::with_capacity(config.relevant_pages);

        for index in 0..config.relevant_pages {
            let embedded = self.page_text(index);
            let mut text = embedded;
            let mut origin = TextOrigin::Embedded;

            if text.chars().count() < config.min_page_text {
                if let Some(ocr) = ocr {
                    match self.transcribe_page(index, ocr) {
                        Some(transcription)
                            if transcription.chars().count() > text.chars().count() =>
                        {
                            text = transcription;
                            origin = TextOrigin::Ocr;
                        }
                        Some(_) => {
                            debug!(page = index, "OCR yield not longer than text layer");
                        }
                        None => {}
                    }
                }
            }

            pages.push(PageText { text, origin });
        }

        // Some generators defeat lopdf's per-page extraction entirely; a
        // whole-document pass through pdf-extract is the coarse fallback.
        if pages.iter().all(|p| p.text.trim().is_empty()) {
            match self.full_text() {
                Ok(text) if !text.trim().is_empty() => {
                    debug!("per-page text empty, using whole-document extraction");
                    if let Some(first) = pages.first_mut() {
                        first.text = text;
                        first.origin = TextOrigin::Embedded;
                    }
                }
                Ok(_) => {}
                Err(e) => debug!(error = %e, "whole-document extraction failed"),
            }
        }

        DocumentText::new(pages)
    }

    fn transcribe_page(&self, index: usize, ocr: &dyn Transcriber) -> Option<String> {
        let image = self.page_image(index)?;
        match ocr.transcribe(&image) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(page = index, error = %e, "OCR transcription failed");
                None
            }
        }
    }
}

fn raw_to_image(data: &[u8], width: u32, height: u32, color_space: &[u8]) -> Option<DynamicImage> {
    let expected_rgb = (width as usize) * (height as usize) * 3;
    let expected_gray = (width as usize) * (height as usize);

    if (color_space == b"DeviceRGB" || color_space == b"RGB") && data.len() >= expected_rgb {
        let mut rgba = Vec::with_capacity(expected_gray * 4);
        for chunk in data[..expected_rgb].chunks(3) {
            rgba.extend_from_slice(chunk);
            rgba.push(255);
        }
        return ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba)
            .map(DynamicImage::ImageRgba8);
    }

    if (color_space == b"DeviceGray" || color_space == b"G") && data.len() >= expected_gray {
        let mut rgba = Vec::with_capacity(expected_gray * 4);
        for &gray in &data[..expected_gray] {
            rgba.extend_from_slice(&[gray, gray, gray, 255]);
        }
        return ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba)
            .map(DynamicImage::ImageRgba8);
    }

    None
}
