//! CSV loader with permissive decoding.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{Dataset, SourceMetadata};
use crate::error::{DatalensError, Result};
use crate::inference::infer_column;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// How raw bytes are turned into text before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8 when the bytes are valid UTF-8, Latin-1 otherwise.
    #[default]
    Auto,
    /// Strict UTF-8; invalid bytes are an error.
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
    /// Windows-1252, the usual spreadsheet export encoding on Windows.
    Windows1252,
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "auto" => Ok(Encoding::Auto),
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Encoding::Latin1),
            "windows1252" | "windows-1252" | "cp1252" => Ok(Encoding::Windows1252),
            _ => Err(format!(
                "Unknown encoding: {}. Use auto, utf8, latin1, or windows1252.",
                s
            )),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Auto => write!(f, "auto"),
            Encoding::Utf8 => write!(f, "utf-8"),
            Encoding::Latin1 => write!(f, "latin-1"),
            Encoding::Windows1252 => write!(f, "windows-1252"),
        }
    }
}

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Byte decoding strategy.
    pub encoding: Encoding,
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Accepted file extensions, lowercase, without the dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            encoding: Encoding::Auto,
            delimiter: b',',
            quote: b'"',
            max_rows: None,
            allowed_extensions: vec!["csv".to_string()],
        }
    }
}

/// Turns uploaded bytes into a typed [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a new loader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Validate the declared file name without touching any bytes.
    pub fn check_filename(&self, filename: &str) -> Result<()> {
        if filename.is_empty() {
            return Err(DatalensError::EmptyFilename);
        }

        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        if extension.is_empty() || !self.config.allowed_extensions.contains(&extension) {
            return Err(DatalensError::UnsupportedFormat(filename.to_string()));
        }

        Ok(())
    }

    /// Load a file from disk.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.check_filename(&filename)?;

        let bytes = std::fs::read(path).map_err(|e| DatalensError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.load(&bytes, &filename)
    }

    /// Load uploaded bytes under their declared file name.
    pub fn load(&self, bytes: &[u8], filename: &str) -> Result<(Dataset, SourceMetadata)> {
        self.check_filename(filename)?;

        if bytes.is_empty() {
            return Err(DatalensError::EmptyData);
        }

        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (text, encoding) = self.decode(bytes)?;
        let dataset = self.parse_text(&text)?;

        debug!(
            file = filename,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            encoding,
            "loaded dataset"
        );

        let metadata = SourceMetadata::new(
            filename,
            hash,
            bytes.len() as u64,
            encoding,
            self.config.delimiter,
            dataset.row_count(),
            dataset.column_count(),
        );

        Ok((dataset, metadata))
    }

    /// Decode bytes according to the configured encoding.
    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<(Cow<'a, str>, &'static str)> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        match self.config.encoding {
            Encoding::Auto => match std::str::from_utf8(bytes) {
                Ok(text) => Ok((Cow::Borrowed(text), "utf-8")),
                Err(_) => Ok((encoding_rs::mem::decode_latin1(bytes), "latin-1")),
            },
            Encoding::Utf8 => std::str::from_utf8(bytes)
                .map(|text| (Cow::Borrowed(text), "utf-8"))
                .map_err(|e| DatalensError::Encoding(format!("invalid UTF-8: {}", e))),
            Encoding::Latin1 => Ok((encoding_rs::mem::decode_latin1(bytes), "latin-1")),
            Encoding::Windows1252 => {
                let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
                Ok((text, "windows-1252"))
            }
        }
    }

    /// Parse decoded text into a dataset.
    fn parse_text(&self, text: &str) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if headers.is_empty() {
            return Err(DatalensError::EmptyData);
        }

        let expected_cols = headers.len();
        let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); expected_cols];
        let mut row_count = 0;

        for result in reader.records() {
            if let Some(max) = self.config.max_rows {
                if row_count >= max {
                    break;
                }
            }

            let record = result?;

            if is_blank_line(text, &record) {
                continue;
            }

            if record.len() > expected_cols {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                return Err(DatalensError::Parse {
                    row: row_count + 1,
                    message: format!(
                        "Expected {} fields in line {}, saw {}",
                        expected_cols,
                        line,
                        record.len()
                    ),
                });
            }

            for (index, column) in raw_columns.iter_mut().enumerate() {
                column.push(record.get(index).unwrap_or("").to_string());
            }
            row_count += 1;
        }

        if row_count == 0 {
            return Err(DatalensError::EmptyData);
        }

        let columns = normalize_headers(&headers)
            .into_iter()
            .zip(raw_columns)
            .enumerate()
            .map(|(position, (name, raw))| infer_column(name, position, &raw))
            .collect();

        Ok(Dataset::new(columns))
    }
}

/// A record read from a line holding nothing but whitespace.
///
/// Decided on the source line rather than the parsed fields, so a quoted
/// empty field (`""`) still counts as a row with a missing value.
fn is_blank_line(text: &str, record: &csv::StringRecord) -> bool {
    if !record.iter().all(|field| field.trim().is_empty()) {
        return false;
    }

    let start = match record.position() {
        Some(pos) => pos.byte() as usize,
        None => return false,
    };
    let rest = text.get(start..).unwrap_or("");
    let line = rest.split('\n').next().unwrap_or("");
    line.trim().is_empty()
}

/// Fill in blank header names and make repeated ones unique.
fn normalize_headers(headers: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(headers.len());

    for (index, header) in headers.iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", index)
        } else {
            header.clone()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while names.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        names.push(name);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnType, Value};

    fn load(data: &[u8]) -> Result<Dataset> {
        Loader::new().load(data, "data.csv").map(|(dataset, _)| dataset)
    }

    #[test]
    fn test_check_filename() {
        let loader = Loader::new();
        assert!(loader.check_filename("data.csv").is_ok());
        assert!(loader.check_filename("DATA.CSV").is_ok());
        assert!(loader.check_filename("archive.tar.csv").is_ok());
        assert!(matches!(
            loader.check_filename(""),
            Err(DatalensError::EmptyFilename)
        ));
        assert!(matches!(
            loader.check_filename("notes.txt"),
            Err(DatalensError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            loader.check_filename("csv"),
            Err(DatalensError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            loader.check_filename("data.csv.gz"),
            Err(DatalensError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_csv() {
        let dataset = load(b"name,age,city\nAlice,30,NYC\nBob,25,LA").unwrap();

        assert_eq!(dataset.column_names(), vec!["name", "age", "city"]);
        assert_eq!(dataset.row_count(), 2);
        let age = dataset.column("age").unwrap();
        assert_eq!(age.column_type, ColumnType::Integer);
        assert_eq!(age.values, vec![Value::Integer(30), Value::Integer(25)]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let dataset = load(b"a,b,c\n1,2,3\n4,5\n").unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.column("c").unwrap().values[1], Value::Null);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let err = load(b"a,b\n1,2\n3,4,5\n").unwrap_err();
        assert!(matches!(err, DatalensError::Parse { row: 2, .. }));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_whitespace_lines_are_skipped() {
        let dataset = load(b"a,b\n1,2\n   \n3,4\n").unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.null_count(), 0);

        let dataset = load(b"a,b\r\n1,2\r\n \r\n").unwrap();
        assert_eq!(dataset.row_count(), 1);
        assert_eq!(dataset.null_count(), 0);
    }

    #[test]
    fn test_quoted_empty_field_is_a_row() {
        let dataset = load(b"x\n\"\"\n1\n").unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.null_count(), 1);
        assert_eq!(dataset.column("x").unwrap().values[0], Value::Null);
    }

    #[test]
    fn test_delimiter_only_line_is_a_row() {
        let dataset = load(b"a,b\n1,2\n,\n").unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.null_count(), 2);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(matches!(load(b""), Err(DatalensError::EmptyData)));
        assert!(matches!(load(b"a,b,c\n"), Err(DatalensError::EmptyData)));
        assert!(matches!(load(b"a,b,c"), Err(DatalensError::EmptyData)));
    }

    #[test]
    fn test_extension_checked_before_parsing() {
        let err = Loader::new().load(b"", "notes.txt").unwrap_err();
        assert!(matches!(err, DatalensError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_latin1_bytes_decode() {
        // "café" and "São" encoded as ISO-8859-1.
        let data = b"city,visits\ncaf\xe9,3\nS\xe3o Paulo,5\n";
        let (dataset, metadata) = Loader::new().load(data, "cities.csv").unwrap();

        assert_eq!(metadata.encoding, "latin-1");
        assert_eq!(
            dataset.column("city").unwrap().values[0],
            Value::Text("café".to_string())
        );
        assert_eq!(
            dataset.column("city").unwrap().values[1],
            Value::Text("São Paulo".to_string())
        );
    }

    #[test]
    fn test_strict_utf8_rejects_latin1() {
        let loader = Loader::with_config(LoaderConfig {
            encoding: Encoding::Utf8,
            ..Default::default()
        });
        let err = loader.load(b"a\ncaf\xe9\n", "x.csv").unwrap_err();
        assert!(matches!(err, DatalensError::Encoding(_)));
    }

    #[test]
    fn test_windows1252_smart_quotes() {
        let loader = Loader::with_config(LoaderConfig {
            encoding: Encoding::Windows1252,
            ..Default::default()
        });
        let (dataset, _) = loader.load(b"quote\n\x93hi\x94\n", "q.csv").unwrap();
        assert_eq!(
            dataset.column("quote").unwrap().values[0],
            Value::Text("\u{201c}hi\u{201d}".to_string())
        );
    }

    #[test]
    fn test_bom_is_stripped() {
        let dataset = load(b"\xEF\xBB\xBFid,value\n1,2\n").unwrap();
        assert_eq!(dataset.column_names(), vec!["id", "value"]);
    }

    #[test]
    fn test_headers_are_made_unique() {
        let dataset = load(b"a,a,,a\n1,2,3,4\n").unwrap();
        assert_eq!(dataset.column_names(), vec!["a", "a.1", "Unnamed: 2", "a.2"]);
    }

    #[test]
    fn test_max_rows() {
        let loader = Loader::with_config(LoaderConfig {
            max_rows: Some(2),
            ..Default::default()
        });
        let (dataset, _) = loader.load(b"x\n1\n2\n3\n4\n", "x.csv").unwrap();
        assert_eq!(dataset.row_count(), 2);
    }

    #[test]
    fn test_metadata() {
        let (_, metadata) = Loader::new().load(b"x,y\n1,2\n", "pairs.csv").unwrap();
        assert_eq!(metadata.file, "pairs.csv");
        assert_eq!(metadata.size_bytes, 8);
        assert_eq!(metadata.encoding, "utf-8");
        assert_eq!(metadata.delimiter, ',');
        assert_eq!(metadata.row_count, 1);
        assert_eq!(metadata.column_count, 2);
        assert!(metadata.hash.starts_with("sha256:"));
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("latin1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("cp1252".parse::<Encoding>().unwrap(), Encoding::Windows1252);
        assert!("ebcdic".parse::<Encoding>().is_err());
    }
}
