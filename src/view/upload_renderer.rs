use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::publish::PublishResult;

pub const DEFAULT_TEMPLATE: &str = include_str!("../../res/template/upload.tpl");

#[derive(ramhorns::Content)]
struct UploadPage<'a> {
    files: Vec<FileItem<'a>>,
    has_files: bool,
    has_message: bool,
    success: bool,
    message: &'a str,
    form_token: &'a str,
}

#[derive(ramhorns::Content)]
struct FileItem<'a> {
    name: &'a str,
    selected: bool,
}

pub struct UploadRenderer {
    pub template: Template<'static>,
}

impl UploadRenderer {
    pub fn new(upload_tpl_src: String) -> io::Result<UploadRenderer> {
        let template = match Template::new(upload_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing upload template: {}", e)));
            }
        };

        Ok(UploadRenderer {
            template,
        })
    }

    /// Renders the form with the files sorted by name. `selected` keeps the
    /// submitted file picked after a post.
    pub fn render(&self, files: &[String], selected: Option<&str>, result: Option<&PublishResult>, form_token: &str) -> String {
        let mut names: Vec<&str> = files.iter().map(|f| f.as_str()).collect();
        names.sort_unstable();

        let files: Vec<FileItem> = names.into_iter()
            .map(|name| FileItem { name, selected: Some(name) == selected })
            .collect();

        self.template.render(&UploadPage {
            has_files: !files.is_empty(),
            files,
            has_message: result.is_some(),
            success: result.map(|r| r.success).unwrap_or(false),
            message: result.map(|r| r.message.as_str()).unwrap_or(""),
            form_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "TOKEN=[{{form_token}}]\nFILES=[{{#files}}({{name}}{{#selected}}*{{/selected}}){{/files}}]\n{{#has_message}}MSG=[{{#success}}ok{{/success}}{{^success}}err{{/success}}:{{message}}]{{/has_message}}";

    fn files() -> Vec<String> {
        vec!["b.md".to_string(), "a.md".to_string(), "c.md".to_string()]
    }

    #[test]
    fn render_without_message() {
        let renderer = UploadRenderer::new(TEMPLATE.to_string()).unwrap();
        let res = renderer.render(&files(), None, None, "tok");
        assert!(res.contains("TOKEN=[tok]"));
        assert!(res.contains("FILES=[(a.md)(b.md)(c.md)]"));
        assert!(!res.contains("MSG="));
    }

    #[test]
    fn render_with_result() {
        let renderer = UploadRenderer::new(TEMPLATE.to_string()).unwrap();
        let result = PublishResult {
            success: false,
            message: "<b>server error</b>".to_string(),
        };
        let res = renderer.render(&files(), Some("b.md"), Some(&result), "tok");
        assert!(res.contains("FILES=[(a.md)(b.md*)(c.md)]"));
        assert!(res.contains("MSG=[err:&lt;b&gt;server error&lt;/b&gt;]"));
    }

    #[test]
    fn render_default_template() {
        let renderer = UploadRenderer::new(DEFAULT_TEMPLATE.to_string()).unwrap();
        let result = PublishResult {
            success: true,
            message: "posted".to_string(),
        };
        let res = renderer.render(&files(), Some("a.md"), Some(&result), "tok");
        assert!(res.contains(r#"<option value="a.md" selected>a.md</option>"#));
        assert!(res.contains(r#"<option value="c.md">c.md</option>"#));
        assert!(res.contains(r#"name="form_token" value="tok""#));
        assert!(res.contains("posted"));

        let res = renderer.render(&[], None, None, "tok");
        assert!(res.contains("No markdown files found."));
        assert!(!res.contains("<pre"));
    }
}
