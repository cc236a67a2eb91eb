//! @ai:module:intent Serialize assembled decks into an exportable package file
//! @ai:module:layer infrastructure
//! @ai:module:public_api Package, write_package
//! @ai:module:depends_on assembly, error

use crate::assembly::{Deck, DeckCollection};
use crate::error::{Error, Result};
use serde::Serialize;
use std::path::Path;

/// @ai:intent On-disk shape of an exported package
#[derive(Debug, Serialize)]
pub struct Package<'a> {
    pub name: &'a str,
    pub note_count: usize,
    pub decks: &'a [Deck],
}

impl<'a> Package<'a> {
    pub fn new(name: &'a str, decks: &'a DeckCollection) -> Self {
        Self {
            name,
            note_count: decks.note_count(),
            decks: decks.decks(),
        }
    }
}

/// @ai:intent Write all decks as one pretty-printed JSON package
/// @ai:pre the parent directory of path exists
/// @ai:post the file is not touched when there are no notes
/// @ai:effects fs:write
pub fn write_package(decks: &DeckCollection, path: &Path) -> Result<()> {
    if decks.note_count() == 0 {
        return Err(Error::EmptyPackage);
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("deck_package");

    let json = serde_json::to_string_pretty(&Package::new(name, decks))?;
    std::fs::write(path, json)?;

    tracing::info!(
        "Wrote {} notes in {} decks to {}",
        decks.note_count(),
        decks.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::DeckAssembler;
    use crate::scanner::DocumentScanner;
    use tempfile::TempDir;

    #[test]
    fn test_write_package() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cards.json");
        let doc = DocumentScanner::default().scan(
            "```anki deck:Rust\nq\n```\n> [!tip] anki\n> t\n",
            None,
        );
        let decks = DeckAssembler::default().assemble(doc.codeblocks, doc.callouts);

        write_package(&decks, &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["name"], "cards");
        assert_eq!(written["note_count"], 2);
        assert_eq!(written["decks"][0]["name"], "Rust");
        assert_eq!(written["decks"][0]["notes"][0]["type"], "anki");
        assert_eq!(written["decks"][1]["notes"][0]["kind"], "callout");
    }

    #[test]
    fn test_refuses_empty_package() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.json");

        let result = write_package(&DeckCollection::new(), &path);

        assert!(matches!(result, Err(Error::EmptyPackage)));
        assert!(!path.exists());
    }
}
