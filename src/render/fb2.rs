use std::fs;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::app::{Result, RssReaderError};
use crate::domain::{FeedMeta, News, Record};

const FB2_NS: &str = "http://www.gribuser.ru/xml/fictionbook/2.0";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

type XmlWriter = Writer<Vec<u8>>;

/// FictionBook 2 document: one `<section>` per record.
pub struct Fb2Document {
    meta: FeedMeta,
    records: Vec<Record>,
}

impl Fb2Document {
    pub fn new(meta: &FeedMeta) -> Self {
        Self {
            meta: meta.clone(),
            records: Vec::new(),
        }
    }

    pub fn from_news(news: &News) -> Self {
        let mut doc = Self::new(&news.meta);
        for record in &news.records {
            doc.add_section(record);
        }
        doc
    }

    pub fn add_section(&mut self, record: &Record) {
        self.records.push(record.clone());
    }

    pub fn render(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        write(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
        )?;

        let mut root = BytesStart::new("FictionBook");
        root.push_attribute(("xmlns", FB2_NS));
        root.push_attribute(("xmlns:l", XLINK_NS));
        write(&mut writer, Event::Start(root))?;

        self.write_description(&mut writer)?;

        start(&mut writer, "body")?;
        write_title(&mut writer, &self.meta.title)?;
        for record in &self.records {
            write_section(&mut writer, record)?;
        }
        end(&mut writer, "body")?;
        end(&mut writer, "FictionBook")?;

        let mut xml = String::from_utf8(writer.into_inner())
            .map_err(|e| RssReaderError::Xml(e.to_string()))?;
        xml.push('\n');
        Ok(xml)
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()?)?;
        tracing::info!(path = %path.display(), sections = self.records.len(), "FB2 written");
        Ok(())
    }

    fn write_description(&self, writer: &mut XmlWriter) -> Result<()> {
        start(writer, "description")?;
        start(writer, "title-info")?;
        write_text_element(writer, "genre", "nonfiction")?;
        write_text_element(writer, "book-title", &self.meta.title)?;
        if let Some(subtitle) = self.meta.subtitle.as_deref().filter(|s| !s.trim().is_empty()) {
            start(writer, "annotation")?;
            write_text_element(writer, "p", subtitle)?;
            end(writer, "annotation")?;
        }
        if let Some(image) = &self.meta.image_url {
            start(writer, "coverpage")?;
            write_image(writer, image)?;
            end(writer, "coverpage")?;
        }
        end(writer, "title-info")?;

        start(writer, "document-info")?;
        write_text_element(
            writer,
            "program-used",
            &format!("rss-reader {}", env!("CARGO_PKG_VERSION")),
        )?;
        end(writer, "document-info")?;
        end(writer, "description")
    }
}

fn write_section(writer: &mut XmlWriter, record: &Record) -> Result<()> {
    start(writer, "section")?;
    write_title(writer, &record.title)?;

    start(writer, "p")?;
    write_text_element(writer, "emphasis", &record.date)?;
    end(writer, "p")?;

    for paragraph in record.content.lines().filter(|l| !l.trim().is_empty()) {
        write_text_element(writer, "p", paragraph.trim())?;
    }

    start(writer, "p")?;
    let mut link = BytesStart::new("a");
    link.push_attribute(("l:href", record.link.as_str()));
    write(writer, Event::Start(link))?;
    write(writer, Event::Text(BytesText::new(&record.link)))?;
    end(writer, "a")?;
    end(writer, "p")?;

    if let Some(image) = &record.image_link {
        write_image(writer, image)?;
    }
    end(writer, "section")
}

fn write_title(writer: &mut XmlWriter, text: &str) -> Result<()> {
    start(writer, "title")?;
    write_text_element(writer, "p", text)?;
    end(writer, "title")
}

fn write_image(writer: &mut XmlWriter, href: &str) -> Result<()> {
    let mut image = BytesStart::new("image");
    image.push_attribute(("l:href", href));
    write(writer, Event::Empty(image))
}

fn write_text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    start(writer, name)?;
    write(writer, Event::Text(BytesText::new(text)))?;
    end(writer, name)
}

fn start(writer: &mut XmlWriter, name: &str) -> Result<()> {
    write(writer, Event::Start(BytesStart::new(name)))
}

fn end(writer: &mut XmlWriter, name: &str) -> Result<()> {
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write(writer: &mut XmlWriter, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| RssReaderError::Xml(e.to_string()))
}
