use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;

use crate::app::Result;
use crate::domain::News;

const INDENT: &[u8] = b"    ";

/// `{"feed": ..., "news": [...]}` with a four space indent. Non-ASCII text
/// is written as-is.
pub fn to_json(news: &News) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    news.document().serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn write_json(news: &News, path: &Path) -> Result<()> {
    fs::write(path, to_json(news)?)?;
    tracing::info!(path = %path.display(), "JSON written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeedMeta, Record};
    use serde_json::Value;

    fn news() -> News {
        News::new(
            FeedMeta {
                title: "Новости".into(),
                ..Default::default()
            },
            vec![
                Record {
                    title: "One".into(),
                    date: "d1".into(),
                    link: "https://example.com/1".into(),
                    image_link: Some("https://example.com/1.png".into()),
                    content: "Café".into(),
                },
                Record {
                    title: "Two".into(),
                    date: "d2".into(),
                    link: "https://example.com/2".into(),
                    image_link: None,
                    content: "".into(),
                },
            ],
        )
    }

    #[test]
    fn test_json_shape() {
        let json: Value = serde_json::from_str(&to_json(&news()).unwrap()).unwrap();

        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(json["feed"], "Новости");

        let items = json["news"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        for item in items {
            let mut keys: Vec<_> = item.as_object().unwrap().keys().cloned().collect();
            keys.sort();
            assert_eq!(keys, vec!["content", "date", "image-link", "link", "title"]);
        }
        assert_eq!(items[0]["image-link"], "https://example.com/1.png");
        assert!(items[1]["image-link"].is_null());
    }

    #[test]
    fn test_json_is_four_space_indented_utf8() {
        let text = to_json(&news()).unwrap();
        assert!(text.starts_with("{\n    \"feed\": \"Новости\""));
        assert!(text.contains("Café"));
    }

    #[test]
    fn test_write_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        write_json(&news(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_json(&news()).unwrap());
    }
}
