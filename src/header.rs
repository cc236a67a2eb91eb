//! @ai:module:intent Tokenize opening-line header words and parse key:value headers
//! @ai:module:layer domain
//! @ai:module:public_api DEFAULT_KEYWORD, tokenize_headers, has_keyword, HeaderToken
//! @ai:module:stateless true

/// Marker word that activates recognition of a region.
pub const DEFAULT_KEYWORD: &str = "anki";

/// @ai:intent Turn the words after a region's primary marker into a header list
/// @ai:pre words are already split on whitespace
/// @ai:post result is Some only when some word equals the keyword; words keep their order
/// @ai:example (["anki", "deck:Rust"], "anki") -> Some(["anki", "deck:Rust"])
/// @ai:example (["deck:Rust", "anki"], "anki") -> Some(["deck:Rust", "anki"])
/// @ai:example (["deck:Rust"], "anki") -> None
/// @ai:effects pure
pub fn tokenize_headers<'a, I>(words: I, keyword: &str) -> Option<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let headers: Vec<String> = words.into_iter().map(str::to_string).collect();
    has_keyword(&headers, keyword).then_some(headers)
}

/// @ai:intent Check whether a header list carries the recognition keyword
/// @ai:effects pure
pub fn has_keyword(headers: &[String], keyword: &str) -> bool {
    headers.iter().any(|h| h == keyword)
}

/// @ai:intent A header viewed through the optional key:value grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderToken<'a> {
    pub raw: &'a str,
    pub key: &'a str,
    pub value: Option<&'a str>,
}

impl<'a> HeaderToken<'a> {
    /// @ai:intent Split a header token on its first colon
    /// @ai:example ("deck:Rust::Ownership") -> key "deck", value Some("Rust::Ownership")
    /// @ai:example ("header2") -> key "header2", value None
    /// @ai:example ("deck:") -> key "deck", value Some("")
    /// @ai:effects pure
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once(':') {
            Some((key, value)) => Self {
                raw,
                key,
                value: Some(value),
            },
            None => Self {
                raw,
                key: raw,
                value: None,
            },
        }
    }

    pub fn is_flag(&self) -> bool {
        self.value.is_none()
    }
}
