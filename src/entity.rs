use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl SpanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanKind::Plain => "text",
            SpanKind::Bold => "bold",
            SpanKind::Italic => "italic",
            SpanKind::Code => "code",
            SpanKind::Link => "link",
            SpanKind::Image => "image",
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpanKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(SpanKind::Plain),
            "bold" => Ok(SpanKind::Bold),
            "italic" => Ok(SpanKind::Italic),
            "code" => Ok(SpanKind::Code),
            "link" => Ok(SpanKind::Link),
            "image" => Ok(SpanKind::Image),
            _ => Err(Error::InvalidSpanKind(s.to_string())),
        }
    }
}

/// A typed run of inline text. `url` is set only for links and images.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
    pub url: Option<String>,
}

impl Span {
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Span {
            kind,
            text: text.into(),
            url: None,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Span::new(SpanKind::Plain, text)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Span {
            kind: SpanKind::Link,
            text: text.into(),
            url: Some(url.into()),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Span {
            kind: SpanKind::Image,
            text: alt.into(),
            url: Some(url.into()),
        }
    }

    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }
}

impl fmt::Display for Span {
    /// Renders the span back as markdown-ish source, `[text](url)` when a url is present.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.url {
            Some(url) => write!(f, "[{}]({})", self.text, url),
            None => f.write_str(&self.text),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockType {
    Heading(u8),
    Paragraph,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::Heading(level) => write!(f, "heading{}", level),
            BlockType::Paragraph => f.write_str("paragraph"),
            BlockType::Code => f.write_str("code"),
            BlockType::Quote => f.write_str("quote"),
            BlockType::UnorderedList => f.write_str("unordered_list"),
            BlockType::OrderedList => f.write_str("ordered_list"),
        }
    }
}

impl FromStr for BlockType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paragraph" => Ok(BlockType::Paragraph),
            "code" => Ok(BlockType::Code),
            "quote" => Ok(BlockType::Quote),
            "unordered_list" => Ok(BlockType::UnorderedList),
            "ordered_list" => Ok(BlockType::OrderedList),
            _ => match s.strip_prefix("heading").map(str::parse::<u8>) {
                Some(Ok(level)) if (1..=6).contains(&level) => Ok(BlockType::Heading(level)),
                _ => Err(Error::InvalidBlockType(s.to_string())),
            },
        }
    }
}

/// One top-level structural unit of a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub text: String,
    pub kind: BlockType,
}

impl Block {
    pub fn new(text: impl Into<String>, kind: BlockType) -> Self {
        Block {
            text: text.into(),
            kind,
        }
    }
}
