//! @ai:module:intent Group scanned records into decks of notes
//! @ai:module:layer application
//! @ai:module:public_api DeckAssembler, DeckCollection, Deck, Note, align_content_left
//! @ai:module:depends_on record, header, config
//! @ai:module:stateless true

use crate::config::ExportConfig;
use crate::header::{has_keyword, HeaderToken};
use crate::record::{RecordKind, SourceRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const LEFT_ALIGN_OPEN: &str = r#"<div style="text-align: left;">"#;
pub const LEFT_ALIGN_CLOSE: &str = "</div>";

const DECK_HEADER: &str = "deck";
const TAG_HEADER: &str = "tag";
const TAGS_HEADER: &str = "tags";

/// @ai:intent Wrap a record's content so the card renders left-aligned
/// @ai:post kind, type, headers and location are unchanged
/// @ai:effects pure
pub fn align_content_left(mut record: SourceRecord) -> SourceRecord {
    record.content = record.content.wrapped(LEFT_ALIGN_OPEN, LEFT_ALIGN_CLOSE);
    record
}

/// @ai:intent A flashcard built from one source record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub kind: RecordKind,
    #[serde(rename = "type")]
    pub note_type: String,
    pub text: String,
    pub tags: Vec<String>,
    pub source: String,
}

/// @ai:intent A named collection of notes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub id: i64,
    pub name: String,
    pub notes: Vec<Note>,
}

impl Deck {
    /// @ai:intent Create an empty deck with an id derived from its name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: deck_id(&name),
            name,
            notes: Vec::new(),
        }
    }
}

/// @ai:intent Stable 63-bit id for a deck name (FNV-1a)
/// @ai:post result > 0
/// @ai:effects pure
fn deck_id(name: &str) -> i64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let hash = name
        .bytes()
        .fold(OFFSET, |acc, b| (acc ^ u64::from(b)).wrapping_mul(PRIME));

    match (hash & i64::MAX as u64) as i64 {
        0 => 1,
        id => id,
    }
}

/// @ai:intent Accumulator of decks, ordered by first use
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeckCollection {
    decks: Vec<Deck>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl DeckCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Get a deck by name, creating it on first use
    pub fn deck_mut(&mut self, name: &str) -> &mut Deck {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.decks.push(Deck::new(name));
                self.index.insert(name.to_string(), self.decks.len() - 1);
                self.decks.len() - 1
            }
        };
        &mut self.decks[idx]
    }

    pub fn get(&self, name: &str) -> Option<&Deck> {
        self.index.get(name).map(|&idx| &self.decks[idx])
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    pub fn note_count(&self) -> usize {
        self.decks.iter().map(|d| d.notes.len()).sum()
    }
}

/// @ai:intent Turns records into notes and files them under decks
#[derive(Debug, Clone)]
pub struct DeckAssembler {
    keyword: String,
    default_deck: String,
    line_break: String,
}

impl DeckAssembler {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            keyword: config.keyword.clone(),
            default_deck: config.default_deck.clone(),
            line_break: config.line_break.clone(),
        }
    }

    /// @ai:intent Add notes for fenced code block records
    /// @ai:post returns the number of notes added
    pub fn add_notes_from_codeblocks(
        &self,
        records: impl IntoIterator<Item = SourceRecord>,
        decks: &mut DeckCollection,
    ) -> usize {
        self.add_notes(records, RecordKind::CodeBlock, decks)
    }

    /// @ai:intent Add notes for callout records
    /// @ai:post returns the number of notes added
    pub fn add_notes_from_callouts(
        &self,
        records: impl IntoIterator<Item = SourceRecord>,
        decks: &mut DeckCollection,
    ) -> usize {
        self.add_notes(records, RecordKind::Callout, decks)
    }

    /// @ai:intent Build a fresh collection from both record lists
    pub fn assemble(
        &self,
        codeblocks: impl IntoIterator<Item = SourceRecord>,
        callouts: impl IntoIterator<Item = SourceRecord>,
    ) -> DeckCollection {
        let mut decks = DeckCollection::new();
        self.add_notes_from_codeblocks(codeblocks, &mut decks);
        self.add_notes_from_callouts(callouts, &mut decks);
        decks
    }

    fn add_notes(
        &self,
        records: impl IntoIterator<Item = SourceRecord>,
        expected: RecordKind,
        decks: &mut DeckCollection,
    ) -> usize {
        let mut added = 0;

        for record in records {
            if record.kind != expected {
                tracing::warn!(
                    "Skipping {} record at {} passed as {}",
                    record.kind,
                    record.location,
                    expected
                );
                continue;
            }

            if !has_keyword(&record.headers, &self.keyword) {
                tracing::warn!(
                    "Skipping record at {}: headers do not contain `{}`",
                    record.location,
                    self.keyword
                );
                continue;
            }

            let (deck_name, note) = self.build_note(&record);
            decks.deck_mut(deck_name).notes.push(note);
            added += 1;
        }

        added
    }

    /// @ai:intent Interpret headers and render content into a note
    /// @ai:edge_cases An empty `deck:` value falls back to the default deck
    fn build_note<'a>(&'a self, record: &'a SourceRecord) -> (&'a str, Note) {
        let mut deck_name = self.default_deck.as_str();
        let mut tags = Vec::new();

        for token in record.headers.iter().map(|h| HeaderToken::parse(h)) {
            match (token.key, token.value) {
                (DECK_HEADER, Some("")) => {
                    tracing::warn!("Ignoring empty deck header at {}", record.location);
                }
                (DECK_HEADER, Some(name)) => deck_name = name,
                (TAG_HEADER, Some(tag)) if !tag.is_empty() => tags.push(tag.to_string()),
                (TAGS_HEADER, Some(list)) => tags.extend(
                    list.split(',')
                        .filter(|t| !t.is_empty())
                        .map(str::to_string),
                ),
                _ => {}
            }
        }

        let note = Note {
            kind: record.kind,
            note_type: record.record_type.clone(),
            text: record.content.render(&self.line_break),
            tags,
            source: record.location.to_string(),
        };

        (deck_name, note)
    }
}

impl Default for DeckAssembler {
    fn default() -> Self {
        Self::new(&ExportConfig::default())
    }
}
