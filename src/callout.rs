//! @ai:module:intent Recognize keyword-annotated blockquote callouts
//! @ai:module:layer application
//! @ai:module:public_api CalloutScanner
//! @ai:module:depends_on record, header, scanner
//! @ai:module:stateless true

use crate::header::{tokenize_headers, DEFAULT_KEYWORD};
use crate::record::{Content, Location, RecordKind, SourceRecord};
use crate::scanner::Scanner;
use regex::Regex;
use std::path::Path;

/// @ai:intent Scanner for `> [!Category] anki headers...` callouts
#[derive(Debug, Clone)]
pub struct CalloutScanner {
    keyword: String,
    open_re: Regex,
}

impl CalloutScanner {
    /// @ai:intent Create a scanner activated by the given keyword
    /// @ai:effects pure
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            // category, optional fold marker, rest of the line
            open_re: Regex::new(r"^[ \t]*>[ \t]*\[!([^\]\s]+)\]([+-]?)(.*)$")
                .expect("Invalid regex"),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// @ai:intent Split an opening line into category and header words
    /// @ai:effects pure
    fn match_open<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let captures = self.open_re.captures(line)?;
        let category = captures.get(1)?.as_str();
        let rest = captures.get(3).map_or("", |m| m.as_str());
        Some((category, rest))
    }
}

impl Default for CalloutScanner {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORD)
    }
}

impl Scanner for CalloutScanner {
    fn kind(&self) -> RecordKind {
        RecordKind::Callout
    }

    /// @ai:intent Extract every annotated callout in source order
    /// @ai:post each record covers the opening line plus its consecutive blockquote lines
    /// @ai:edge_cases A callout whose opening line lacks the keyword is skipped along with its continuation lines
    /// @ai:effects pure
    fn scan(&self, text: &str, source_path: Option<&Path>) -> Vec<SourceRecord> {
        let lines: Vec<&str> = text.lines().collect();
        let mut records = Vec::new();
        let mut idx = 0;

        while idx < lines.len() {
            let Some((category, rest)) = self.match_open(lines[idx]) else {
                idx += 1;
                continue;
            };

            let open_line = idx + 1;
            let end = (idx + 1..lines.len())
                .find(|&i| strip_blockquote(lines[i]).is_none())
                .unwrap_or(lines.len());

            match tokenize_headers(rest.split_whitespace(), &self.keyword) {
                Some(headers) => {
                    let body = lines[idx + 1..end]
                        .iter()
                        .filter_map(|line| strip_blockquote(line));

                    records.push(SourceRecord {
                        kind: RecordKind::Callout,
                        record_type: category.to_string(),
                        headers,
                        content: Content::from_lines(body),
                        location: Location::new(source_path, open_line),
                    });
                }
                None => {
                    tracing::debug!(
                        "Skipping callout [!{}] without `{}` at {}",
                        category,
                        self.keyword,
                        Location::new(source_path, open_line)
                    );
                }
            }

            idx = end;
        }

        records
    }
}

/// @ai:intent Strip one blockquote level from a line
/// @ai:post None when the line does not start with `>`
/// @ai:example ("> text") -> Some("text")
/// @ai:example (">") -> Some("")
/// @ai:example ("> > nested") -> Some("> nested")
/// @ai:effects pure
fn strip_blockquote(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}
