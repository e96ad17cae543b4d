//! Token-stream sentence assembly.
//!
//! Captions are built by pushing words, punctuation marks and markup tags.
//! Spacing and punctuation clashes are resolved at render time from one
//! token list, so the HTML and plain-text variants of a caption can never
//! drift apart.

use std::fmt::Write as _;

use crate::colors::Color;

/// A punctuation mark, ordered by the priority used to resolve clashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punct {
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// Rendered as a spaced en-dash.
    Hyphen,
    /// `:`
    Colon,
    /// `.`
    Period,
    /// `?`
    Question,
    /// `!`
    Exclamation,
}

impl Punct {
    fn priority(self) -> u8 {
        match self {
            Self::Comma => 0,
            Self::Semicolon => 1,
            Self::Hyphen => 2,
            Self::Colon => 3,
            Self::Period | Self::Question | Self::Exclamation => 4,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Hyphen => "\u{2013}",
            Self::Colon => ":",
            Self::Period => ".",
            Self::Question => "?",
            Self::Exclamation => "!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Punct(Punct),
    Open(String),
    Close(String),
}

/// Accumulates caption tokens and renders them as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuilder {
    tokens: Vec<Token>,
}

impl TextBuilder {
    /// Empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one word. Empty words are ignored.
    pub fn word(&mut self, word: impl Into<String>) {
        let word = word.into();
        if !word.is_empty() {
            self.tokens.push(Token::Word(word));
        }
    }

    /// Push every whitespace-separated word of `text`.
    pub fn words(&mut self, text: &str) {
        for word in text.split_whitespace() {
            self.word(word);
        }
    }

    /// Push a punctuation mark.
    ///
    /// When the previous content token is also a mark, only the one with
    /// the higher priority survives; on equal priority the earlier mark is
    /// kept. Tags in between do not separate the two.
    pub fn punct(&mut self, mark: Punct) {
        let previous = self
            .tokens
            .iter_mut()
            .rev()
            .find(|t| matches!(t, Token::Word(_) | Token::Punct(_)));
        if let Some(Token::Punct(existing)) = previous {
            if mark.priority() > existing.priority() {
                *existing = mark;
            }
            return;
        }
        self.tokens.push(Token::Punct(mark));
    }

    /// Open a markup element, e.g. `span` with `style="..."`.
    pub fn open(&mut self, name: &str, attributes: &str) {
        let tag = if attributes.is_empty() {
            format!("<{name}>")
        } else {
            format!("<{name} {attributes}>")
        };
        self.tokens.push(Token::Open(tag));
    }

    /// Close a markup element.
    pub fn close(&mut self, name: &str) {
        self.tokens.push(Token::Close(format!("</{name}>")));
    }

    /// Push `text` wrapped in a span colored `color`.
    pub fn colored(&mut self, text: &str, color: Color) {
        self.open("span", &format!("style=\"color:{color}\""));
        self.words(text);
        self.close("span");
    }

    /// Push `text` wrapped in `<b>`.
    pub fn bold(&mut self, text: &str) {
        self.open("b", "");
        self.words(text);
        self.close("b");
    }

    /// Whether nothing has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn render_with(&self, keep_tags: bool) -> String {
        let mut out = String::new();
        let mut pending_tags = String::new();
        let mut has_content = false;
        for token in &self.tokens {
            match token {
                Token::Open(tag) => {
                    if keep_tags {
                        pending_tags.push_str(tag);
                    }
                }
                Token::Close(tag) => {
                    if keep_tags {
                        out.push_str(&pending_tags);
                        pending_tags.clear();
                        out.push_str(tag);
                    }
                }
                Token::Word(word) => {
                    if has_content {
                        out.push(' ');
                    }
                    let _ = write!(out, "{pending_tags}{word}");
                    pending_tags.clear();
                    has_content = true;
                }
                Token::Punct(mark) => {
                    if has_content && *mark == Punct::Hyphen {
                        out.push(' ');
                    }
                    let _ = write!(out, "{pending_tags}{}", mark.as_str());
                    pending_tags.clear();
                    has_content = true;
                }
            }
        }
        out.push_str(&pending_tags);
        out
    }

    /// Render with markup tags.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_with(true)
    }

    /// Render with every tag stripped.
    #[must_use]
    pub fn render_plain(&self) -> String {
        self.render_with(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(tokens: &[&str]) -> TextBuilder {
        let mut text = TextBuilder::new();
        for token in tokens {
            match *token {
                "," => text.punct(Punct::Comma),
                "." => text.punct(Punct::Period),
                "-" => text.punct(Punct::Hyphen),
                ":" => text.punct(Punct::Colon),
                ";" => text.punct(Punct::Semicolon),
                word => text.word(word),
            }
        }
        text
    }

    #[test]
    fn lorem_ipsum() {
        let text = sentence(&["Lorem", "ipsum", "."]);
        assert_eq!(text.render(), "Lorem ipsum.");
        assert_eq!(text.render_plain(), "Lorem ipsum.");
    }

    #[test]
    fn comma_then_period_collapses_to_period() {
        assert_eq!(sentence(&["Lorem", "ipsum", ",", "."]).render(), "Lorem ipsum.");
        assert_eq!(sentence(&["Lorem", "ipsum", ".", ","]).render(), "Lorem ipsum.");
    }

    #[test]
    fn priority_table() {
        assert_eq!(sentence(&["a", ";", ","]).render(), "a;");
        assert_eq!(sentence(&["a", ",", ":"]).render(), "a:");
        assert_eq!(sentence(&["a", "-", ";"]).render(), "a \u{2013}");
        let mut text = sentence(&["a", "."]);
        text.punct(Punct::Question);
        assert_eq!(text.render(), "a.");
    }

    #[test]
    fn hyphen_is_spaced_en_dash() {
        assert_eq!(sentence(&["alpha", "-", "beta"]).render(), "alpha \u{2013} beta");
    }

    #[test]
    fn tags_hug_their_words() {
        let mut text = TextBuilder::new();
        text.word("Chain");
        text.colored("A", Color(0x1b9e77));
        text.punct(Punct::Comma);
        text.word("then");
        text.bold("B");
        text.punct(Punct::Period);
        assert_eq!(
            text.render(),
            "Chain <span style=\"color:#1b9e77\">A</span>, then <b>B</b>."
        );
        assert_eq!(text.render_plain(), "Chain A, then B.");
    }

    #[test]
    fn clash_across_tags() {
        let mut text = TextBuilder::new();
        text.word("end");
        text.punct(Punct::Comma);
        text.open("i", "");
        text.close("i");
        text.punct(Punct::Period);
        assert_eq!(text.render_plain(), "end.");
    }

    #[test]
    fn words_splits_on_whitespace() {
        let mut text = TextBuilder::new();
        text.words("  Hemoglobin   alpha chain ");
        assert_eq!(text.render(), "Hemoglobin alpha chain");
        assert!(!text.is_empty());
    }
}
