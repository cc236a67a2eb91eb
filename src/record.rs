//! @ai:module:intent Define the source record shared by both scanners
//! @ai:module:layer domain
//! @ai:module:public_api SourceRecord, RecordKind, Location, Content, LINE_SEPARATOR, split_lines_using_separator
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Joiner used when content has to travel as a single string.
///
/// The encoded form cannot tell "no lines" from "one blank line"; both are
/// `""`. Callers that need the exact line list use [`Content::lines`].
pub const LINE_SEPARATOR: &str = "<anki-md:line/>";

/// @ai:intent Which scanner produced a record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    CodeBlock,
    Callout,
}

impl RecordKind {
    /// @ai:effects pure
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::CodeBlock => "codeblock",
            RecordKind::Callout => "callout",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// @ai:intent Where a record's opening delimiter was found
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Location {
    pub file: Option<PathBuf>,
    pub line: usize,
}

impl Location {
    /// @ai:intent Create a new Location
    pub fn new(file: Option<&Path>, line: usize) -> Self {
        Self {
            file: file.map(Path::to_path_buf),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}", file.display(), self.line),
            None => write!(f, "<text>:{}", self.line),
        }
    }
}

/// @ai:intent Body lines of a record, kept as discrete lines
/// @ai:invariant lines never contain the delimiters of their region
///
/// `prefix` and `suffix` hold wrapping markup added by content transforms;
/// the scanners always leave them empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Content {
    pub lines: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suffix: String,
}

impl Content {
    /// @ai:intent Build content from captured body lines
    /// @ai:effects pure
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.prefix.is_empty() && self.suffix.is_empty()
    }

    /// @ai:intent Join the lines with an arbitrary line break, keeping any wrapping
    /// @ai:example (["a", "b"], "<br>") -> "a<br>b"
    /// @ai:effects pure
    pub fn render(&self, line_break: &str) -> String {
        format!("{}{}{}", self.prefix, self.lines.join(line_break), self.suffix)
    }

    /// @ai:intent Encode as one string using the reserved separator
    /// @ai:post split_lines_using_separator(encode()) == lines when unwrapped and non-empty
    /// @ai:effects pure
    pub fn encode(&self) -> String {
        self.render(LINE_SEPARATOR)
    }

    /// @ai:intent Return a copy wrapped in the given markup
    /// @ai:effects pure
    pub fn wrapped(&self, open: &str, close: &str) -> Self {
        Self {
            lines: self.lines.clone(),
            prefix: format!("{}{}", open, self.prefix),
            suffix: format!("{}{}", self.suffix, close),
        }
    }
}

/// @ai:intent Recover discrete lines from an encoded content string
/// @ai:example ("a<anki-md:line/>b") -> ["a", "b"]
/// @ai:example ("") -> []
/// @ai:edge_cases An encoded single blank line is indistinguishable from no lines
/// @ai:effects pure
pub fn split_lines_using_separator(encoded: &str) -> Vec<String> {
    if encoded.is_empty() {
        return Vec::new();
    }
    encoded.split(LINE_SEPARATOR).map(str::to_string).collect()
}

/// @ai:intent One recognized region extracted from a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRecord {
    pub kind: RecordKind,
    #[serde(rename = "type")]
    pub record_type: String,
    pub headers: Vec<String>,
    pub content: Content,
    pub location: Location,
}

impl SourceRecord {
    pub fn source_path(&self) -> Option<&Path> {
        self.location.file.as_deref()
    }
}
