use std::path::Path;
use std::{fs, io};

pub const MARKDOWN_EXT: &str = ".md";

/// Lists the names of the markdown files directly inside `root_dir`.
///
/// Only regular files ending in `.md` are returned, in whatever order the
/// directory read yields them. Sub directories are not visited.
/// A missing or unreadable directory is an error.
pub fn list_markdown_files(root_dir: &Path) -> io::Result<Vec<String>> {
    let mut files = vec![];
    let entries = fs::read_dir(root_dir)?;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        // Names that are not valid UTF-8 cannot be selected from the form anyway
        if let Some(file_name) = entry.file_name().to_str() {
            if file_name.ends_with(MARKDOWN_EXT) {
                files.push(file_name.to_string());
            }
        }
    }
    Ok(files)
}
