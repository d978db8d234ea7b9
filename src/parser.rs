use log::trace;
use nom::{
    bytes::complete::{tag, take_until},
    combinator::verify,
    sequence::{delimited, pair, preceded},
    IResult,
};

use crate::entity::{Span, SpanKind};
use crate::error::{Error, Result};

/// Tokenizes one run of inline text.
///
/// Passes run in a fixed order (code, bold, italic, image, link) and each
/// one only rescans spans that are still plain text.
pub fn parse_spans(text: &str) -> Result<Vec<Span>> {
    let spans = vec![Span::plain(text)];
    let spans = split_delimiter(spans, "`", SpanKind::Code)?;
    let spans = split_delimiter(spans, "**", SpanKind::Bold)?;
    let spans = split_delimiter(spans, "*", SpanKind::Italic)?;
    let spans = split_pattern(spans, &IMAGE);
    let spans = split_pattern(spans, &LINK);

    // image alt text may legitimately be empty
    let mut spans: Vec<Span> = spans
        .into_iter()
        .filter(|span| span.kind == SpanKind::Image || !span.text.is_empty())
        .collect();
    if spans.is_empty() {
        spans.push(Span::plain(""));
    }
    trace!("tokenized {:?} into {} spans", text, spans.len());
    Ok(spans)
}

/// Splits every plain span on `delimiter`, odd parts becoming `kind`.
pub fn split_delimiter(spans: Vec<Span>, delimiter: &str, kind: SpanKind) -> Result<Vec<Span>> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() || !span.text.contains(delimiter) {
            out.push(span);
            continue;
        }
        let parts: Vec<&str> = span.text.split(delimiter).collect();
        if parts.len() % 2 == 0 {
            return Err(Error::UnbalancedDelimiter {
                delimiter: delimiter.to_string(),
            });
        }
        for (i, part) in parts.into_iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            let part_kind = if i % 2 == 0 { SpanKind::Plain } else { kind };
            out.push(Span::new(part_kind, part));
        }
    }
    if out.is_empty() {
        out.push(Span::plain(""));
    }
    trace!("{} pass produced {} spans", kind, out.len());
    Ok(out)
}

type PairParser = fn(&str) -> IResult<&str, (&str, &str)>;

struct Pattern {
    kind: SpanKind,
    opener: &'static str,
    parser: PairParser,
    // a match starting right after this char is rejected
    not_after: Option<char>,
}

const IMAGE: Pattern = Pattern {
    kind: SpanKind::Image,
    opener: "![",
    parser: parse_image,
    not_after: None,
};

const LINK: Pattern = Pattern {
    kind: SpanKind::Link,
    opener: "[",
    parser: parse_link,
    not_after: Some('!'),
};

fn single_line(s: &str) -> bool {
    !s.contains('\n')
}

fn parse_label(i: &str) -> IResult<&str, &str> {
    verify(delimited(tag("["), take_until("]("), tag("]")), single_line)(i)
}

fn parse_url(i: &str) -> IResult<&str, &str> {
    verify(delimited(tag("("), take_until(")"), tag(")")), single_line)(i)
}

fn parse_link(i: &str) -> IResult<&str, (&str, &str)> {
    pair(parse_label, parse_url)(i)
}

fn parse_image(i: &str) -> IResult<&str, (&str, &str)> {
    preceded(tag("!"), parse_link)(i)
}

fn split_pattern(spans: Vec<Span>, pattern: &Pattern) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.is_plain() && span.text.contains(pattern.opener) {
            out.extend(scan_pattern(&span.text, pattern));
        } else {
            out.push(span);
        }
    }
    trace!("{} pass produced {} spans", pattern.kind, out.len());
    out
}

/// Leftmost-first, non-overlapping scan. Gaps are kept even when empty so
/// offsets stay aligned; empties are dropped once all passes are done.
fn scan_pattern(text: &str, pattern: &Pattern) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    let mut search = 0;
    while let Some(offset) = text[search..].find(pattern.opener) {
        let start = search + offset;
        search = start + pattern.opener.len();
        if let Some(c) = pattern.not_after {
            if text[..start].ends_with(c) {
                continue;
            }
        }
        if let Ok((rest, (label, url))) = (pattern.parser)(&text[start..]) {
            spans.push(Span::plain(&text[cursor..start]));
            spans.push(Span {
                kind: pattern.kind,
                text: label.to_string(),
                url: Some(url.to_string()),
            });
            cursor = text.len() - rest.len();
            search = cursor;
        }
    }
    spans.push(Span::plain(&text[cursor..]));
    spans
}
