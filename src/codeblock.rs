//! @ai:module:intent Recognize keyword-annotated fenced code blocks
//! @ai:module:layer application
//! @ai:module:public_api CodeblockScanner
//! @ai:module:depends_on record, header, scanner
//! @ai:module:stateless true

use crate::header::{tokenize_headers, DEFAULT_KEYWORD};
use crate::record::{Content, Location, RecordKind, SourceRecord};
use crate::scanner::Scanner;
use regex::Regex;
use std::path::Path;

/// @ai:intent Scanner for ```` ```lang anki headers... ```` fenced regions
#[derive(Debug, Clone)]
pub struct CodeblockScanner {
    keyword: String,
    open_re: Regex,
    close_re: Regex,
}

/// An opening fence line, borrowed from the document.
#[derive(Debug)]
struct FenceOpen<'a> {
    indent: usize,
    fence_len: usize,
    info: &'a str,
}

impl CodeblockScanner {
    /// @ai:intent Create a scanner activated by the given keyword
    /// @ai:effects pure
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            open_re: Regex::new(r"^([ \t]*)(`{3,})(.*)$").expect("Invalid regex"),
            close_re: Regex::new(r"^[ \t]*(`{3,})[ \t]*$").expect("Invalid regex"),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// @ai:intent Match a fence-open line
    /// @ai:edge_cases An info string containing a backtick is inline code, not a fence
    /// @ai:effects pure
    fn match_open<'a>(&self, line: &'a str) -> Option<FenceOpen<'a>> {
        let captures = self.open_re.captures(line)?;
        let info = captures.get(3).map_or("", |m| m.as_str());
        if info.contains('`') {
            return None;
        }

        Some(FenceOpen {
            indent: captures.get(1).map_or(0, |m| m.as_str().chars().count()),
            fence_len: captures.get(2).map_or(0, |m| m.as_str().len()),
            info,
        })
    }

    /// @ai:intent Check whether a line closes a fence opened with `fence_len` backticks
    /// @ai:effects pure
    fn is_close(&self, line: &str, fence_len: usize) -> bool {
        self.close_re
            .captures(line)
            .and_then(|c| c.get(1))
            .is_some_and(|m| m.as_str().len() >= fence_len)
    }

    /// @ai:intent Derive type and headers from a fence's info string
    /// @ai:post None when the keyword is neither the language tag nor any word after it
    /// @ai:example ("anki deck:Rust") -> Some(("anki", ["anki", "deck:Rust"]))
    /// @ai:example ("markdown anki h2") -> Some(("markdown", ["anki", "h2"]))
    /// @ai:example ("markdown deck:Rust anki") -> Some(("markdown", ["deck:Rust", "anki"]))
    /// @ai:effects pure
    fn classify(&self, info: &str) -> Option<(String, Vec<String>)> {
        let mut words = info.split_whitespace();
        let language = words.next()?;

        if language == self.keyword {
            let headers = tokenize_headers(std::iter::once(language).chain(words), &self.keyword)?;
            Some((language.to_string(), headers))
        } else {
            let headers = tokenize_headers(words, &self.keyword)?;
            Some((language.to_string(), headers))
        }
    }
}

impl Default for CodeblockScanner {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORD)
    }
}

impl Scanner for CodeblockScanner {
    fn kind(&self) -> RecordKind {
        RecordKind::CodeBlock
    }

    /// @ai:intent Extract every annotated, terminated fenced region in source order
    /// @ai:post every record's content lines lie strictly between its fences
    /// @ai:edge_cases Unterminated fences and fences without the keyword produce nothing
    /// @ai:effects pure
    fn scan(&self, text: &str, source_path: Option<&Path>) -> Vec<SourceRecord> {
        let lines: Vec<&str> = text.lines().collect();
        let mut records = Vec::new();
        let mut idx = 0;

        while idx < lines.len() {
            let Some(open) = self.match_open(lines[idx]) else {
                idx += 1;
                continue;
            };

            let open_line = idx + 1;
            let Some(close_idx) =
                (idx + 1..lines.len()).find(|&i| self.is_close(lines[i], open.fence_len))
            else {
                tracing::debug!(
                    "Discarding unterminated fence at {}",
                    Location::new(source_path, open_line)
                );
                break;
            };

            match self.classify(open.info) {
                Some((record_type, headers)) => {
                    let body = lines[idx + 1..close_idx]
                        .iter()
                        .map(|line| strip_indent(line, open.indent));

                    records.push(SourceRecord {
                        kind: RecordKind::CodeBlock,
                        record_type,
                        headers,
                        content: Content::from_lines(body),
                        location: Location::new(source_path, open_line),
                    });
                }
                None => {
                    tracing::debug!(
                        "Skipping fence without `{}` at {}",
                        self.keyword,
                        Location::new(source_path, open_line)
                    );
                }
            }

            idx = close_idx + 1;
        }

        records
    }
}

/// @ai:intent Remove up to `width` leading whitespace characters from a line
/// @ai:example ("        code", 4) -> "    code"
/// @ai:example ("  code", 4) -> "code"
/// @ai:effects pure
fn strip_indent(line: &str, width: usize) -> &str {
    let cut = line
        .char_indices()
        .take(width)
        .take_while(|(_, c)| *c == ' ' || *c == '\t')
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    &line[cut..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::split_lines_using_separator;
    use pretty_assertions::assert_eq;

    fn scan(text: &str) -> Vec<SourceRecord> {
        CodeblockScanner::default().scan(text, None)
    }

    fn trimmed_lines(record: &SourceRecord) -> Vec<String> {
        split_lines_using_separator(&record.content.encode())
            .iter()
            .map(|l| l.trim().to_string())
            .collect()
    }

    #[test]
    fn test_parsing_of_one_codeblock() {
        let text = r#"
    ```anki
        some code
        some more code
    ```
    "#;

        let records = scan(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_type, "anki");
        assert_eq!(records[0].kind, RecordKind::CodeBlock);
        assert_eq!(records[0].headers, vec!["anki".to_string()]);
        assert_eq!(trimmed_lines(&records[0]), vec!["some code", "some more code"]);
    }

    #[test]
    fn test_parsing_of_one_markdown_codeblock() {
        let text = r#"
    ```markdown anki
        some code
        some more code
    ```
    "#;

        let records = scan(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_type, "markdown");
        assert_eq!(trimmed_lines(&records[0]), vec!["some code", "some more code"]);
    }

    #[test]
    fn test_ignoring_codeblock_without_keyword() {
        let text = r#"
    ```markdown
        some code
        some more code
    ```
    "#;

        assert!(scan(text).is_empty());
    }

    #[test]
    fn test_parsing_of_headers() {
        let text = "```markdown anki header1:value header2\nsome code\n```\n";

        let records = scan(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_type, "markdown");
        assert_eq!(
            records[0].headers,
            vec![
                "anki".to_string(),
                "header1:value".to_string(),
                "header2".to_string()
            ]
        );
    }

    #[test]
    fn test_bare_keyword_keeps_following_headers() {
        let records = scan("```anki deck:Rust\nq\n```");
        assert_eq!(records[0].record_type, "anki");
        assert_eq!(
            records[0].headers,
            vec!["anki".to_string(), "deck:Rust".to_string()]
        );
    }

    #[test]
    fn test_parsing_of_multiple_codeblocks() {
        let text = r#"
    ```anki
        some code
        some more code
    ```

    some irrelevant text
    some irrelevant text
    some irrelevant text

    ```markdown anki
        some code2
        some more code2
    ```

    some irrelevant text
    some irrelevant text

    ```anki
        some code3
        some more code3
        some more more code3
    ```
    "#;

        let records = scan(text);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].record_type, "anki");
        assert_eq!(records[1].record_type, "markdown");
        assert_eq!(records[2].record_type, "anki");

        assert_eq!(trimmed_lines(&records[0]), vec!["some code", "some more code"]);
        assert_eq!(trimmed_lines(&records[1]), vec!["some code2", "some more code2"]);
        assert_eq!(
            trimmed_lines(&records[2]),
            vec!["some code3", "some more code3", "some more more code3"]
        );
        assert!(records[0].location.line < records[1].location.line);
        assert!(records[1].location.line < records[2].location.line);
    }

    #[test]
    fn test_strips_fence_indentation_only() {
        let text = "  ```anki\n    indented\n  flush\nnone\n  ```";

        let records = scan(text);

        assert_eq!(
            records[0].content.lines(),
            ["  indented".to_string(), "flush".to_string(), "none".to_string()]
        );
    }

    #[test]
    fn test_preserves_blank_lines_and_trailing_whitespace() {
        let records = scan("```anki\nfirst  \n\nthird\n```");
        assert_eq!(
            records[0].content.lines(),
            ["first  ".to_string(), String::new(), "third".to_string()]
        );
    }

    #[test]
    fn test_unterminated_fence_yields_nothing() {
        let text = "```anki\nsome code\nno closing fence";
        assert!(scan(text).is_empty());
    }

    #[test]
    fn test_unterminated_after_complete_block() {
        let text = "```anki\none\n```\n\n```anki\ntwo\n";
        let records = scan(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content.lines(), ["one".to_string()]);
    }

    #[test]
    fn test_skipped_block_does_not_leak_into_next() {
        let text = "```python\n```anki\nnot a record\n```\n```anki\nreal\n```";

        let records = scan(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content.lines(), ["real".to_string()]);
    }

    #[test]
    fn test_longer_fence_contains_shorter_runs() {
        let text = "````anki\n```rust\nfn main() {}\n```\n````";

        let records = scan(text);

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].content.lines(),
            [
                "```rust".to_string(),
                "fn main() {}".to_string(),
                "```".to_string()
            ]
        );
    }

    #[test]
    fn test_keyword_later_in_headers() {
        let records = scan("```markdown deck:Rust anki\nq\n```");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_type, "markdown");
        assert_eq!(
            records[0].headers,
            vec!["deck:Rust".to_string(), "anki".to_string()]
        );
        assert_eq!(records[0].content.lines(), ["q".to_string()]);
    }

    #[test]
    fn test_keyword_only_in_body_is_not_enough() {
        assert!(scan("```markdown deck:Rust\nanki\n```").is_empty());
    }

    #[test]
    fn test_custom_keyword() {
        let scanner = CodeblockScanner::new("card");
        assert_eq!(scanner.scan("```card\nq\n```", None).len(), 1);
        assert!(scanner.scan("```anki\nq\n```", None).is_empty());
    }

    #[test]
    fn test_single_blank_body_line() {
        let records = scan("```anki\n\n```");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content.lines(), [String::new()]);
    }

    #[test]
    fn test_empty_body() {
        let records = scan("```anki\n```");
        assert_eq!(records.len(), 1);
        assert!(records[0].content.lines().is_empty());
    }

    #[test]
    fn test_rescan_is_identical() {
        let text = "```anki a:b\nx\n```\n```md anki\ny\n```";
        let scanner = CodeblockScanner::default();
        let path = Path::new("deck.md");
        assert_eq!(scanner.scan(text, Some(path)), scanner.scan(text, Some(path)));
        assert_eq!(
            scanner.scan(text, Some(path))[0].source_path(),
            Some(path)
        );
    }

    #[test]
    fn test_strip_indent() {
        assert_eq!(strip_indent("        code", 4), "    code");
        assert_eq!(strip_indent("  code", 4), "code");
        assert_eq!(strip_indent("code", 4), "code");
        assert_eq!(strip_indent("\tcode", 1), "code");
        assert_eq!(strip_indent("    ", 2), "  ");
    }
}
