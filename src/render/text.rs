use crate::config::Labels;
use crate::domain::{News, Record};

pub struct TextRenderer {
    labels: Labels,
}

impl TextRenderer {
    pub fn new(labels: Labels) -> Self {
        Self { labels }
    }

    /// Feed title, a blank line, then every record behind a separator line.
    pub fn render(&self, news: &News) -> String {
        let mut out = String::new();
        out.push_str(&news.meta.title);
        out.push_str("\n\n");

        for record in &news.records {
            out.push('\n');
            out.push_str(&self.labels.separator);
            out.push_str("\n\n");
            out.push_str(&self.render_record(record));
        }

        out
    }

    fn render_record(&self, record: &Record) -> String {
        let labels = &self.labels;
        let mut out = String::new();
        out.push_str(&Labels::line(&labels.title, &record.title));
        out.push_str(&Labels::line(&labels.date, &record.date));
        out.push_str(&Labels::line(&labels.link, &record.link));
        if let Some(image) = &record.image_link {
            out.push_str(&Labels::line(&labels.image, image));
        }
        out.push('\n');
        out.push_str(&Labels::line(&labels.content, &record.content));
        out
    }
}
