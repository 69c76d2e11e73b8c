use crate::error::{ParseError, ParseErrorKind};
use serde_json::Value;
use std::path::Path;

/// Structured format of a rule file, chosen by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// `.json` is JSON; everything else, including `.yml` and `.yaml`, is YAML.
    pub fn from_path(path: &Path) -> Format {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Decode file bytes as UTF-8.
pub fn decode(file: &Path, bytes: Vec<u8>) -> Result<String, ParseError> {
    String::from_utf8(bytes).map_err(|e| ParseError {
        file: file.to_path_buf(),
        kind: ParseErrorKind::Encoding,
        message: format!("file is not valid UTF-8: {}", e.utf8_error()),
        line: None,
        column: None,
    })
}

/// Parse the text of one file into its documents.
///
/// JSON always yields exactly one document. YAML yields one document per
/// `---` section; an empty or comment-only file yields none.
pub fn parse_source(file: &Path, text: &str) -> Result<Vec<Value>, ParseError> {
    match Format::from_path(file) {
        Format::Json => parse_json(file, text).map(|doc| vec![doc]),
        Format::Yaml => parse_yaml(file, text),
    }
}

fn parse_json(file: &Path, text: &str) -> Result<Value, ParseError> {
    serde_json::from_str(text).map_err(|e| {
        // serde_json reports line 0 when no position is known
        let (line, column) = if e.line() == 0 {
            (None, None)
        } else {
            (Some(e.line()), Some(e.column()))
        };
        ParseError {
            file: file.to_path_buf(),
            kind: ParseErrorKind::Syntax,
            message: format!("invalid JSON: {}", e),
            line,
            column,
        }
    })
}

fn parse_yaml(file: &Path, text: &str) -> Result<Vec<Value>, ParseError> {
    if is_blank_yaml(text) {
        return Ok(Vec::new());
    }

    // Only `true`/`false` are booleans; `y`, `n`, `on`, `off` stay strings.
    let options = serde_saphyr::Options {
        strict_booleans: true,
        ..Default::default()
    };
    serde_saphyr::from_multiple_with_options::<Value>(text, options).map_err(|e| {
        let location = e.location();
        ParseError {
            file: file.to_path_buf(),
            kind: ParseErrorKind::Syntax,
            message: format!("invalid YAML: {}", e),
            line: location.map(|l| l.line() as usize),
            column: location.map(|l| l.column() as usize),
        }
    })
}

/// True when the text holds nothing but whitespace and comments.
fn is_blank_yaml(text: &str) -> bool {
    text.lines().all(|line| {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#')
    })
}
