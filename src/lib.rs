//! @ai:module:intent Extract keyword-annotated markdown regions into flashcard decks
//! @ai:module:layer infrastructure
//! @ai:module:public_api record, header, scanner, codeblock, callout, discovery, assembly, package, config, output, error
//! @ai:module:stateless true
//!
//! # anki-md
//!
//! Scans markdown documents for fenced code blocks and callouts annotated
//! with a marker keyword (`anki` by default), turns each into a
//! [`SourceRecord`], and groups the records into decks for export.
//!
//! ## Example
//!
//! ```rust
//! use anki_md::{CodeblockScanner, Scanner};
//!
//! let text = "```rust anki deck:Rust\nlet x = 5;\n```\n";
//! let records = CodeblockScanner::default().scan(text, None);
//!
//! assert_eq!(records[0].record_type, "rust");
//! assert_eq!(records[0].headers, vec!["anki", "deck:Rust"]);
//! assert_eq!(records[0].content.lines(), ["let x = 5;"]);
//! ```

pub mod assembly;
pub mod callout;
pub mod codeblock;
pub mod config;
pub mod discovery;
pub mod error;
pub mod header;
pub mod output;
pub mod package;
pub mod record;
pub mod scanner;

pub use assembly::{align_content_left, Deck, DeckAssembler, DeckCollection, Note};
pub use callout::CalloutScanner;
pub use codeblock::CodeblockScanner;
pub use config::ExportConfig;
pub use discovery::{find_markdown_files, scan_directory, scan_file, ScanResult};
pub use error::{Error, Result};
pub use header::{has_keyword, tokenize_headers, HeaderToken, DEFAULT_KEYWORD};
pub use output::{format_export_summary, format_scan_result, OutputFormat};
pub use package::write_package;
pub use record::{
    split_lines_using_separator, Content, Location, RecordKind, SourceRecord, LINE_SEPARATOR,
};
pub use scanner::{DocumentScanner, ScannedDocument, Scanner};
