use serde::Deserialize;

/// Field labels and delimiters shared by the text renderer and the cache
/// replay view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub title: String,
    pub date: String,
    pub link: String,
    pub image: String,
    pub content: String,
    /// Line printed between records.
    pub separator: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "Title: ".to_string(),
            date: "Date: ".to_string(),
            link: "Link: ".to_string(),
            image: "Image: ".to_string(),
            content: "Content: ".to_string(),
            separator: "-".repeat(50),
        }
    }
}

impl Labels {
    /// `label` immediately followed by `value` and a newline.
    pub fn line(label: &str, value: &str) -> String {
        format!("{}{}\n", label, value)
    }
}
