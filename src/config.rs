use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_TAGS: [&str; 2] = ["python", "data science"];
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const TOKEN_VAR: &str = "TOKEN";
const URL_VAR: &str = "URL";
const SECRET_KEY_VAR: &str = "SECRET_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error opening configuration file {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("Error parsing configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Missing configuration value {0}")]
    Missing(&'static str),
    #[error("Markdown directory {0} does not exist or is not a directory")]
    MarkdownDir(String),
}

#[derive(Deserialize, Debug, Clone)]
pub struct Paths {
    pub markdown_dir: PathBuf,
    pub template_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Publish {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub token: String,
    pub tags: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}

impl Publish {
    pub fn tags(&self) -> Vec<String> {
        match self.tags {
            Some(ref tags) => tags.clone(),
            None => DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Server {
    pub address: String,
    pub port: u16,
    #[serde(default)]
    pub secret_key: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub paths: Paths,
    pub publish: Publish,
    pub server: Server,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if !path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = match env::current_exe() {
        Ok(exe) => exe.parent().map(Path::to_path_buf),
        Err(_) => None,
    };

    match exe_dir {
        Some(exe_dir) => {
            let rest = path.strip_prefix("${exe_dir}").unwrap_or(&path);
            exe_dir.join(rest)
        }
        None => path,
    }
}

/// Secrets can be kept out of the file: TOKEN, URL and SECRET_KEY take
/// precedence over what the file says.
pub fn apply_env_overrides<F>(cfg: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup(TOKEN_VAR) {
        cfg.publish.token = token;
    }
    if let Some(url) = lookup(URL_VAR) {
        cfg.publish.url = url;
    }
    if let Some(secret_key) = lookup(SECRET_KEY_VAR) {
        cfg.server.secret_key = secret_key;
    }
}

pub fn validate_config(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.publish.url.trim().is_empty() {
        return Err(ConfigError::Missing("publish.url (or URL)"));
    }
    if cfg.publish.token.trim().is_empty() {
        return Err(ConfigError::Missing("publish.token (or TOKEN)"));
    }
    if cfg.server.secret_key.trim().is_empty() {
        return Err(ConfigError::Missing("server.secret_key (or SECRET_KEY)"));
    }
    if !cfg.paths.markdown_dir.is_dir() {
        return Err(ConfigError::MarkdownDir(cfg.paths.markdown_dir.display().to_string()));
    }
    Ok(())
}

pub fn parse_config(cfg_content: &str) -> Result<Config, ConfigError> {
    let mut cfg: Config = toml::from_str(cfg_content)?;

    cfg.paths = Paths {
        markdown_dir: parse_path(cfg.paths.markdown_dir),
        template_dir: cfg.paths.template_dir.map(parse_path),
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> Result<Config, ConfigError> {
    let cfg_content = fs::read_to_string(cfg_path).map_err(|source| ConfigError::Open {
        path: cfg_path.display().to_string(),
        source,
    })?;

    let mut cfg = parse_config(&cfg_content)?;
    apply_env_overrides(&mut cfg, |name| env::var(name).ok().filter(|v| !v.is_empty()));
    validate_config(&cfg)?;

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const CFG: &str = r#"
[paths]
markdown_dir = "medium"

[publish]
url = "https://api.example.com/posts"
token = "file-token"

[server]
address = "127.0.0.1"
port = 5000
secret_key = "file-secret"
"#;

    #[test]
    fn test_parse_config() {
        let cfg = parse_config(CFG).unwrap();
        assert_eq!(cfg.paths.markdown_dir, PathBuf::from("medium"));
        assert!(cfg.paths.template_dir.is_none());
        assert_eq!(cfg.publish.url, "https://api.example.com/posts");
        assert_eq!(cfg.publish.tags(), ["python", "data science"]);
        assert_eq!(cfg.publish.timeout(), Duration::from_secs(30));
        assert_eq!(cfg.server.port, 5000);
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut cfg = parse_config(CFG).unwrap();
        let vars: HashMap<&str, &str> = vec![("TOKEN", "env-token"), ("SECRET_KEY", "env-secret")]
            .into_iter()
            .collect();
        apply_env_overrides(&mut cfg, |name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(cfg.publish.token, "env-token");
        assert_eq!(cfg.server.secret_key, "env-secret");
        assert_eq!(cfg.publish.url, "https://api.example.com/posts");
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let src = CFG.replace("token = \"file-token\"", "");
        let cfg = parse_config(&src).unwrap();
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
        assert!(err.to_string().contains("TOKEN"));
    }

    #[test]
    fn test_missing_markdown_dir_is_an_error() {
        let mut cfg = parse_config(CFG).unwrap();
        cfg.paths.markdown_dir = PathBuf::from("/this/dir/does/not/exist");
        assert!(matches!(validate_config(&cfg), Err(ConfigError::MarkdownDir(_))));
    }

    #[test]
    fn test_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = parse_config(CFG).unwrap();
        cfg.paths.markdown_dir = dir.path().to_path_buf();
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(parse_config("[paths"), Err(ConfigError::Parse(_))));
    }
}
