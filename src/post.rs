use crate::error::PublishError;

const HEADING_MARKER: char = '#';

pub struct ParsedPost {
    pub title: String,
    pub body: String,
}

impl ParsedPost {
    /// The body keeps the whole file, heading line included.
    pub fn from_string(file_name: &str, content: String) -> Result<ParsedPost, PublishError> {
        let title = match extract_title(&content) {
            Some(title) => title.to_string(),
            None => return Err(PublishError::MissingTitle(file_name.to_string())),
        };

        Ok(ParsedPost {
            title,
            body: content,
        })
    }
}

/// Title from the first line of `content`, which must be a heading.
/// Only one marker is dropped: `#  My Title ` gives `My Title`, while
/// `## My Title` gives `# My Title`.
pub fn extract_title(content: &str) -> Option<&str> {
    let first_line = content.split('\n').next().unwrap_or("").trim();
    if !first_line.starts_with(HEADING_MARKER) {
        return None;
    }

    let title = first_line[HEADING_MARKER.len_utf8()..].trim();
    if title.is_empty() {
        return None;
    }
    Some(title)
}

#[cfg(test)]
mod tests {
    use crate::test_data::POST_DATA;

    use super::*;

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title("# My Title"), Some("My Title"));
        assert_eq!(extract_title("# My Title\nbody"), Some("My Title"));
        assert_eq!(extract_title("  #   My Title   \r\nbody"), Some("My Title"));
        assert_eq!(extract_title("#My Title"), Some("My Title"));
        assert_eq!(extract_title("## Second level\nbody"), Some("# Second level"));
        assert_eq!(extract_title("#   ## Spaced\n"), Some("## Spaced"));
    }

    #[test]
    fn test_extract_title_missing() {
        assert_eq!(extract_title(""), None);
        assert_eq!(extract_title("My Title\n# Too late"), None);
        assert_eq!(extract_title("\n# Title on the second line"), None);
        assert_eq!(extract_title("#\nbody"), None);
        assert_eq!(extract_title("#   \nbody"), None);
    }

    #[test]
    fn test_from_string() {
        let post = ParsedPost::from_string("post.md", POST_DATA.to_string()).unwrap();
        assert_eq!(post.title, "What I learned after 20+ years of software development");
        assert_eq!(post.body, POST_DATA);
        assert!(post.body.starts_with("# What I learned"));
    }

    #[test]
    fn test_from_string_without_title() {
        let res = ParsedPost::from_string("post.md", "No heading here\n".to_string());
        match res {
            Err(PublishError::MissingTitle(file_name)) => assert_eq!(file_name, "post.md"),
            _ => panic!("expected a missing title error"),
        }
    }
}
