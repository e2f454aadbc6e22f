//! Properties and YAML files on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::value::PropertyMap;

/// Prefix accepted (and stripped) in front of file locations.
pub const FILE_PREFIX: &str = "file:";

/// Format of a file source, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `key=value` lines.
    Properties,
    /// A YAML document, flattened into dotted keys.
    Yaml,
}

impl FileFormat {
    /// `.yaml` and `.yml` (any case) are YAML; everything else is properties.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Properties,
        }
    }
}

/// Character encoding of a file source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Charset {
    /// UTF-8. Invalid sequences are a parse error.
    #[default]
    Utf8,
    /// ISO-8859-1. Every byte maps to the code point of the same value.
    Latin1,
}

impl Charset {
    /// Decodes the raw content of `source_name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] with the line of the first invalid UTF-8
    /// sequence.
    pub fn decode(self, bytes: Vec<u8>, source_name: &str) -> Result<String> {
        match self {
            Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
            Self::Utf8 => String::from_utf8(bytes).map_err(|e| {
                let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
                Error::Parse {
                    source_name: source_name.to_string(),
                    line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
                    message: "invalid UTF-8 sequence".to_string(),
                }
            }),
        }
    }
}

/// A file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    location: String,
    ignore_not_found: bool,
    charset: Charset,
}

impl FileSource {
    /// Creates a source for `location`, which may start with `file:` and `~`.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ignore_not_found: false,
            charset: Charset::Utf8,
        }
    }

    /// Sets the encoding used to decode the file.
    #[must_use]
    pub const fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// When set, a missing file reads as an empty set instead of failing.
    #[must_use]
    pub const fn ignore_not_found(mut self, ignore: bool) -> Self {
        self.ignore_not_found = ignore;
        self
    }

    /// The location as given.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns true if a missing file is tolerated.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.ignore_not_found
    }

    /// The filesystem path this source reads, after prefix stripping and
    /// home directory expansion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for `~user` paths or when the home
    /// directory cannot be determined.
    pub fn path(&self) -> Result<PathBuf> {
        let raw = self
            .location
            .strip_prefix(FILE_PREFIX)
            .unwrap_or(&self.location);
        expand_tilde(Path::new(raw))
    }

    /// Reads and parses the file.
    ///
    /// # Errors
    ///
    /// - [`Error::ResourceNotFound`] if the file is missing and not optional
    /// - [`Error::Io`] on any other read failure
    /// - [`Error::Parse`] if the content cannot be decoded or is malformed
    /// - [`Error::Yaml`] if a YAML document is malformed
    pub fn read(&self) -> Result<PropertyMap> {
        let path = self.path()?;

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if self.ignore_not_found {
                    log::debug!("optional file {} not found, skipping", path.display());
                    return Ok(PropertyMap::new());
                }
                return Err(Error::ResourceNotFound { path });
            }
            Err(e) => return Err(e.into()),
        };
        let source_name = path.to_string_lossy();
        let text = self.charset.decode(bytes, &source_name)?;

        match FileFormat::from_path(&path) {
            FileFormat::Yaml => super::yaml::parse(&text),
            FileFormat::Properties => super::properties::parse(&text, &source_name),
        }
    }
}

/// Expands a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        return Ok(path.to_path_buf());
    };

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if let Some(rest) = path_str
        .strip_prefix("~/")
        .or_else(|| path_str.strip_prefix("~\\"))
    {
        Ok(home.join(rest))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.yaml")), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("a.YML")), FileFormat::Yaml);
        assert_eq!(
            FileFormat::from_path(Path::new("a.properties")),
            FileFormat::Properties
        );
        assert_eq!(FileFormat::from_path(Path::new("noext")), FileFormat::Properties);
    }

    #[test]
    fn test_read_properties_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "app.properties", "a=1\nb=${a}\n");
        let map = FileSource::new(path.to_string_lossy()).read().unwrap();
        assert_eq!(map["a"].value(), "1");
        assert_eq!(map["b"].value(), "${a}");
        assert!(map["b"].is_resolvable());
    }

    #[test]
    fn test_read_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "app.yml", "db:\n  host: h\n");
        let map = FileSource::new(path.to_string_lossy()).read().unwrap();
        assert_eq!(map["db.host"].value(), "h");
    }

    #[test]
    fn test_file_prefix_stripped() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "p.properties", "k=v");
        let source = FileSource::new(format!("file:{}", path.display()));
        assert_eq!(source.path().unwrap(), path);
        assert_eq!(source.read().unwrap()["k"].value(), "v");
    }

    #[test]
    fn test_missing_required_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.properties");
        let err = FileSource::new(missing.to_string_lossy()).read().unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing.properties"));
    }

    #[test]
    fn test_missing_optional_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.properties");
        let map = FileSource::new(missing.to_string_lossy())
            .ignore_not_found(true)
            .read()
            .unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_malformed_file_is_not_masked_by_optional() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.yaml", "key: [unclosed");
        let result = FileSource::new(path.to_string_lossy())
            .ignore_not_found(true)
            .read();
        assert!(matches!(result, Err(Error::Yaml(_))));
    }

    #[test]
    fn test_latin1_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.properties");
        fs::write(&path, b"ok=1\nname=caf\xe9\n").unwrap();

        let err = FileSource::new(path.to_string_lossy()).read().unwrap_err();
        match err {
            Error::Parse {
                source_name, line, ..
            } => {
                assert!(source_name.contains("latin1.properties"));
                assert_eq!(line, 2);
            }
            other => panic!("expected a parse error, got {other:?}"),
        }

        let map = FileSource::new(path.to_string_lossy())
            .charset(Charset::Latin1)
            .read()
            .unwrap();
        assert_eq!(map["name"].value(), "caf\u{e9}");
    }

    #[test]
    fn test_tilde_expansion() {
        if let Some(home) = home::home_dir() {
            let source = FileSource::new("~/config/app.properties");
            assert_eq!(source.path().unwrap(), home.join("config/app.properties"));
            assert_eq!(FileSource::new("file:~").path().unwrap(), home);
        }
    }

    #[test]
    fn test_tilde_user_rejected() {
        let err = FileSource::new("~alice/app.properties").path().unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }
}
