use std::borrow::Cow;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::app::{Result, RssReaderError};
use crate::config::PdfConfig;
use crate::domain::{FeedMeta, News, Record};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const LAYER: &str = "Layer 1";

const HEADING_SIZE: f32 = 18.0;
const TITLE_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.0;
/// Characters per line of body text at `BODY_SIZE` within the margins.
const WRAP_WIDTH: usize = 95;

fn pdf_error(e: printpdf::Error) -> RssReaderError {
    RssReaderError::Pdf(format!("{:?}", e))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Embedded font: text is written as is instead of mapped to Latin-1.
    unicode: bool,
}

impl Fonts {
    /// Embed the configured fonts, or fall back to built-in Helvetica when
    /// none is configured or the file cannot be used.
    fn load(doc: &PdfDocumentReference, config: &PdfConfig) -> Result<Self> {
        if let Some(regular) = config.font.as_deref().and_then(|p| external_font(doc, p)) {
            let bold = config
                .bold_font
                .as_deref()
                .and_then(|p| external_font(doc, p))
                .unwrap_or_else(|| regular.clone());
            return Ok(Self {
                regular,
                bold,
                unicode: true,
            });
        }

        Ok(Self {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(pdf_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(pdf_error)?,
            unicode: false,
        })
    }
}

fn external_font(doc: &PdfDocumentReference, path: &Path) -> Option<IndirectFontRef> {
    let loaded = File::open(path).map_err(|e| e.to_string()).and_then(|file| {
        doc.add_external_font(BufReader::new(file))
            .map_err(|e| format!("{:?}", e))
    });

    match loaded {
        Ok(font) => {
            tracing::debug!(path = %path.display(), "PDF font embedded");
            Some(font)
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "Cannot embed PDF font, using Helvetica");
            None
        }
    }
}

/// A4 PDF laid out top to bottom, adding pages as text overflows.
pub struct PdfRenderer {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    cursor: f32,
    records: usize,
}

impl PdfRenderer {
    pub fn new(meta: &FeedMeta, config: &PdfConfig) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(&meta.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        let fonts = Fonts::load(&doc, config)?;
        let layer = doc.get_page(page).get_layer(layer);

        let mut renderer = Self {
            doc,
            layer,
            fonts,
            cursor: PAGE_HEIGHT - MARGIN,
            records: 0,
        };

        renderer.write_line(&meta.title, HEADING_SIZE, true);
        if let Some(subtitle) = &meta.subtitle {
            renderer.write_wrapped(subtitle, BODY_SIZE);
        }
        if let Some(image) = &meta.image_url {
            renderer.write_line(image, BODY_SIZE, false);
        }
        renderer.gap(BODY_SIZE);

        Ok(renderer)
    }

    pub fn from_news(news: &News, config: &PdfConfig) -> Result<Self> {
        let mut renderer = Self::new(&news.meta, config)?;
        for record in &news.records {
            renderer.add_record(record);
        }
        Ok(renderer)
    }

    pub fn add_record(&mut self, record: &Record) {
        self.write_wrapped_styled(&record.title, TITLE_SIZE, true);
        self.write_line(&record.date, BODY_SIZE, false);
        self.write_line(&record.link, BODY_SIZE, false);
        if let Some(image) = &record.image_link {
            self.write_line(image, BODY_SIZE, false);
        }
        self.gap(BODY_SIZE / 2.0);
        self.write_wrapped(&record.content, BODY_SIZE);
        self.gap(BODY_SIZE);
        self.records += 1;
    }

    pub fn to_bytes(self) -> Result<Vec<u8>> {
        self.doc.save_to_bytes().map_err(pdf_error)
    }

    pub fn write_to_file(self, path: &Path) -> Result<()> {
        let records = self.records;
        fs::write(path, self.to_bytes()?)?;
        tracing::info!(path = %path.display(), records, "PDF written");
        Ok(())
    }

    fn write_wrapped(&mut self, text: &str, size: f32) {
        self.write_wrapped_styled(text, size, false);
    }

    fn write_wrapped_styled(&mut self, text: &str, size: f32, bold: bool) {
        let width = wrap_width(size);
        for line in wrap(text, width) {
            self.write_line(&line, size, bold);
        }
    }

    fn write_line(&mut self, text: &str, size: f32, bold: bool) {
        let height = line_height(size);
        if self.cursor - height < MARGIN {
            self.new_page();
        }
        self.cursor -= height;

        let text = if self.fonts.unicode {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(latin1(text))
        };
        let font = if bold {
            &self.fonts.bold
        } else {
            &self.fonts.regular
        };
        self.layer
            .use_text(text, size, Mm(MARGIN), Mm(self.cursor), font);
    }

    fn gap(&mut self, size: f32) {
        self.cursor -= line_height(size) / 2.0;
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = PAGE_HEIGHT - MARGIN;
    }
}

/// Line height in millimetres for a point size.
fn line_height(size: f32) -> f32 {
    size * 0.3528 * 1.4
}

fn wrap_width(size: f32) -> usize {
    ((WRAP_WIDTH as f32) * BODY_SIZE / size) as usize
}

/// Built-in fonts only cover Latin-1.
fn latin1(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) < 0x100 && !c.is_control() { c } else { '?' })
        .collect()
}

/// Greedy word wrap. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            while word.chars().count() > width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let split = word
                    .char_indices()
                    .nth(width)
                    .map(|(i, _)| i)
                    .unwrap_or(word.len());
                let rest = word.split_off(split);
                lines.push(word);
                word = rest;
            }

            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines
}
