//! Writing rendered documents.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Write `contents` to `path` (temp file + rename), or to stdout when no
/// path is given.
pub fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => write_atomic(path, contents),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .context("write stdout")?;
            stdout.flush().context("flush stdout")
        }
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp output {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace output {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_file_and_creates_parents() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("out").join("doc.xml");
        write_output(Some(&path), "<Instructions/>\n").expect("write");
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "<Instructions/>\n"
        );
        assert!(!temp.path().join("out").join("doc.xml.tmp").exists());
    }

    #[test]
    fn overwrites_existing_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("doc.json");
        fs::write(&path, "old").expect("seed");
        write_output(Some(&path), "new").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "new");
    }
}
