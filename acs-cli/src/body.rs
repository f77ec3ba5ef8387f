//! Loading the post body from a file or stdin

use crate::error::CliError;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read the post body; `-` reads all of stdin
pub fn read_body(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        return read_from(std::io::stdin().lock(), path);
    }

    let path = expand_tilde(path);
    std::fs::read_to_string(&path).map_err(|source| CliError::BodyRead {
        path: path.display().to_string(),
        source,
    })
}

/// Read a whole body from any reader
fn read_from(mut reader: impl Read, path: &Path) -> Result<String, CliError> {
    let mut body = String::new();
    reader
        .read_to_string(&mut body)
        .map_err(|source| CliError::BodyRead {
            path: path.display().to_string(),
            source,
        })?;
    Ok(body)
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_body_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("post.txt");
        let body = "本日の定例会は休みです。\n次回は来週です。\n";
        std::fs::write(&path, body).unwrap();

        assert_eq!(read_body(&path).unwrap(), body);
    }

    #[test]
    fn test_read_body_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.txt");

        match read_body(&path) {
            Err(CliError::BodyRead { path: reported, .. }) => {
                assert!(reported.ends_with("missing.txt"));
            }
            other => panic!("Expected CliError::BodyRead, got {:?}", other),
        }
    }

    #[test]
    fn test_read_from_reader() {
        let input: &[u8] = "掲示板\nbody".as_bytes();
        assert_eq!(read_from(input, Path::new("-")).unwrap(), "掲示板\nbody");
    }

    #[test]
    fn test_expand_tilde() {
        let plain = Path::new("/tmp/post.txt");
        assert_eq!(expand_tilde(plain), plain.to_path_buf());

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/post.txt")), home.join("post.txt"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
    }
}
