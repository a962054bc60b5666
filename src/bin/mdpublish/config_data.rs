use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
markdown_dir = "medium"
# Optional. The built-in page is used when missing
# template_dir = "res/template"

# token and url can also be given with the TOKEN and URL environment variables
[publish]
url = "https://api.medium.com/v1/users/<user-id>/posts"
token = ""
tags = ["python", "data science"]
timeout_secs = 30

# secret_key can also be given with the SECRET_KEY environment variable
[server]
address = "127.0.0.1"
port = 5000
secret_key = "{{SECRET_KEY}}"

[log]
level = "Info"
log_to_console = true
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(get_sample_cfg().as_bytes())
}

fn get_sample_cfg() -> String {
    let secret_key = uuid::Uuid::new_v4().simple().to_string();
    CONFIG_SAMPLE.replace("{{SECRET_KEY}}", &secret_key)
}

#[cfg(test)]
mod tests {
    use mdpublish::config::parse_config;

    use super::*;

    #[test]
    fn test_sample_cfg_parses() {
        let sample = get_sample_cfg();
        assert!(!sample.contains("{{SECRET_KEY}}"));

        let cfg = parse_config(&sample).unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.server.secret_key.len(), 32);
        assert!(cfg.publish.token.is_empty());
        assert_eq!(cfg.publish.tags(), ["python", "data science"]);
        assert!(cfg.log.is_some());
    }
}
