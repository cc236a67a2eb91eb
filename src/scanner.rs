//! @ai:module:intent Common seam for the region scanners and a per-document driver
//! @ai:module:layer application
//! @ai:module:public_api Scanner, DocumentScanner, ScannedDocument
//! @ai:module:depends_on codeblock, callout, record
//! @ai:module:stateless true
//! @ai:module:thread_safe true

use crate::callout::CalloutScanner;
use crate::codeblock::CodeblockScanner;
use crate::header::DEFAULT_KEYWORD;
use crate::record::{RecordKind, SourceRecord};
use std::path::Path;

/// @ai:intent Trait for line-oriented region scanners
pub trait Scanner: Send + Sync {
    /// @ai:intent Kind of record this scanner emits
    fn kind(&self) -> RecordKind;

    /// @ai:intent Extract records from one document's full text
    /// @ai:post records are in source order; malformed regions are omitted
    fn scan(&self, text: &str, source_path: Option<&Path>) -> Vec<SourceRecord>;
}

/// @ai:intent Records found in one document, split by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedDocument {
    pub codeblocks: Vec<SourceRecord>,
    pub callouts: Vec<SourceRecord>,
}

impl ScannedDocument {
    pub fn len(&self) -> usize {
        self.codeblocks.len() + self.callouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// @ai:intent Append another document's records, keeping order within each kind
    pub fn extend(&mut self, other: ScannedDocument) {
        self.codeblocks.extend(other.codeblocks);
        self.callouts.extend(other.callouts);
    }
}

/// @ai:intent Runs both scanners over a document with a shared keyword
#[derive(Debug, Clone)]
pub struct DocumentScanner {
    codeblocks: CodeblockScanner,
    callouts: CalloutScanner,
}

impl DocumentScanner {
    /// @ai:effects pure
    pub fn new(keyword: &str) -> Self {
        Self {
            codeblocks: CodeblockScanner::new(keyword),
            callouts: CalloutScanner::new(keyword),
        }
    }

    /// @ai:intent Scan one document with both scanners independently
    /// @ai:effects pure
    pub fn scan(&self, text: &str, source_path: Option<&Path>) -> ScannedDocument {
        ScannedDocument {
            codeblocks: self.codeblocks.scan(text, source_path),
            callouts: self.callouts.scan(text, source_path),
        }
    }
}

impl Default for DocumentScanner {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORD)
    }
}
