use log::debug;
use nom::{
    character::complete::{alphanumeric1, line_ending},
    sequence::terminated,
    IResult,
};

use crate::blocks::{blocks, parse_header_tag, parse_ordered_list_tag, parse_unordered_list_tag};
use crate::entity::{Block, BlockType, Span, SpanKind};
use crate::error::{Error, Result};
use crate::node::{Node, Props, ToHtml};
use crate::parser::parse_spans;

/// Converts a whole markdown document into HTML text.
pub fn translate(markdown: &str) -> Result<String> {
    document(markdown)?.to_html()
}

/// Compiles every block of `markdown` and wraps them in a single `div`.
///
/// A document with no blocks at all compiles to an empty text node, since
/// a parent node cannot be childless.
pub fn document(markdown: &str) -> Result<Node> {
    let children = blocks(markdown)
        .iter()
        .map(compile)
        .collect::<Result<Vec<Node>>>()?;
    if children.is_empty() {
        debug!("document has no blocks");
        return Ok(Node::text(""));
    }
    Node::parent("div", children)
}

pub fn compile(block: &Block) -> Result<Node> {
    match block.kind {
        BlockType::Paragraph => Node::parent("p", translate_text(&block.text)?),
        BlockType::Heading(_) => translate_heading(&block.text),
        BlockType::Code => translate_codeblock(&block.text),
        BlockType::Quote => translate_quote(&block.text),
        BlockType::UnorderedList => translate_list(&block.text, false),
        BlockType::OrderedList => translate_list(&block.text, true),
    }
}

fn translate_text(text: &str) -> Result<Vec<Node>> {
    Ok(parse_spans(text)?.iter().map(translate_span).collect())
}

pub fn translate_span(span: &Span) -> Node {
    let url = span.url.clone().unwrap_or_default();
    match span.kind {
        SpanKind::Plain => Node::text(span.text.as_str()),
        SpanKind::Bold => Node::leaf("b", span.text.as_str()),
        SpanKind::Italic => Node::leaf("i", span.text.as_str()),
        SpanKind::Code => Node::leaf("code", span.text.as_str()),
        SpanKind::Link => Node::leaf_with("a", span.text.as_str(), Props::new().with("href", url)),
        SpanKind::Image => Node::leaf_with(
            "img",
            "",
            Props::new().with("src", url).with("alt", span.text.as_str()),
        ),
    }
}

fn translate_heading(text: &str) -> Result<Node> {
    let level = match parse_header_tag(text) {
        Ok((_, level)) if level <= 6 => level,
        _ => return Err(Error::InvalidBlockType(format!("heading: {:?}", text))),
    };
    let content = text.trim_start_matches('#').trim();
    Node::parent(format!("h{}", level), translate_text(content)?)
}

// ```rust\n...  the info string must sit alone on the fence line
fn parse_code_language(i: &str) -> IResult<&str, &str> {
    terminated(alphanumeric1, line_ending)(i)
}

fn translate_codeblock(text: &str) -> Result<Node> {
    let inner = text.trim_start_matches('`').trim_end_matches('`');
    let (language, body) = match parse_code_language(inner) {
        Ok((body, language)) => (Some(language), body),
        Err(_) => (None, inner),
    };
    let props = match language {
        Some(language) => Props::new().with("class", format!("language-{}", language)),
        None => Props::new(),
    };
    let code = Node::parent_with("code", vec![Node::text(body.trim())], props)?;
    Node::parent("pre", vec![code])
}

/// Strips the `>` marker (and one following space) from every line.
fn translate_quote(text: &str) -> Result<Node> {
    let content = text
        .lines()
        .map(|line| {
            let line = line.strip_prefix('>').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n");
    Node::parent("blockquote", translate_text(content.trim())?)
}

fn strip_list_marker(line: &str, ordered: bool) -> Result<&str> {
    let line = line.trim_start();
    let rest = if ordered {
        parse_ordered_list_tag(line).map(|(rest, _)| rest)
    } else {
        parse_unordered_list_tag(line).map(|(rest, _)| rest)
    };
    rest.map_err(|_| Error::MalformedListItem {
        line: line.to_string(),
    })
}

fn translate_list(text: &str, ordered: bool) -> Result<Node> {
    let items = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let content = strip_list_marker(line, ordered)?;
            Node::parent("li", translate_text(content)?)
        })
        .collect::<Result<Vec<Node>>>()?;
    Node::parent(if ordered { "ol" } else { "ul" }, items)
}

#[cfg(test)]
mod tests {
    use crate::entity::{Block, BlockType};
    use crate::error::Error;
    use crate::node::ToHtml;
    use crate::translator::*;
    use pretty_assertions::assert_eq;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    macro_rules! assert_convert {
        ($markdown:expr, $html:expr) => {
            init_logger();
            assert_eq!(translate($markdown).unwrap(), String::from($html));
        };
    }

    macro_rules! assert_block {
        ($text:expr, $kind:expr, $html:expr) => {
            assert_eq!(
                compile(&Block::new($text, $kind))
                    .unwrap()
                    .to_html()
                    .unwrap(),
                String::from($html)
            );
        };
    }

    #[test]
    fn test_convert() {
        assert_convert!("# h1\n", "<div><h1>h1</h1></div>");
        assert_convert!("## h2\n", "<div><h2>h2</h2></div>");
        assert_convert!(
            "- a\n- b\n- c\n",
            "<div><ul><li>a</li><li>b</li><li>c</li></ul></div>"
        );
        assert_convert!(
            "# Title\n\nBody **bold** text",
            "<div><h1>Title</h1><p>Body <b>bold</b> text</p></div>"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_convert!("", "");
        assert_convert!("  \n\n ", "");
    }

    #[test]
    fn test_paragraph() {
        assert_block!(
            "This is *italic* and `code` with a [link](https://boot.dev)",
            BlockType::Paragraph,
            "<p>This is <i>italic</i> and <code>code</code> with a <a href='https://boot.dev'>link</a></p>"
        );
        assert_block!(
            "![alt](u.png)",
            BlockType::Paragraph,
            "<p><img src='u.png' alt='alt' /></p>"
        );
    }

    #[test]
    fn test_heading() {
        assert_block!("###   Spaced  ", BlockType::Heading(3), "<h3>Spaced</h3>");
        assert_block!(
            "## With **bold**",
            BlockType::Heading(2),
            "<h2>With <b>bold</b></h2>"
        );
        assert!(matches!(
            compile(&Block::new("no hashes", BlockType::Heading(1))),
            Err(Error::InvalidBlockType(_))
        ));
    }

    #[test]
    fn test_codeblock() {
        assert_block!(
            "```\nlet x = *y*;\n```",
            BlockType::Code,
            "<pre><code>let x = *y*;</code></pre>"
        );
        assert_block!(
            "```rust\nfn main() {}\n```",
            BlockType::Code,
            "<pre><code class='language-rust'>fn main() {}</code></pre>"
        );
        assert_block!("```", BlockType::Code, "<pre><code></code></pre>");
    }

    #[test]
    fn test_quote() {
        assert_block!(
            "> quoted **text**",
            BlockType::Quote,
            "<blockquote>quoted <b>text</b></blockquote>"
        );
        assert_block!(
            "> first\n>second",
            BlockType::Quote,
            "<blockquote>first\nsecond</blockquote>"
        );
    }

    #[test]
    fn test_lists() {
        assert_block!(
            "* a\n* b",
            BlockType::UnorderedList,
            "<ul><li>a</li><li>b</li></ul>"
        );
        assert_block!(
            "1. first\n2. *second*",
            BlockType::OrderedList,
            "<ol><li>first</li><li><i>second</i></li></ol>"
        );
    }

    #[test]
    fn test_malformed_ordered_item() {
        assert!(matches!(
            compile(&Block::new("1. ok\nnot numbered", BlockType::OrderedList)),
            Err(Error::MalformedListItem { line }) if line == "not numbered"
        ));
    }

    #[test]
    fn test_error_aborts_document() {
        assert!(matches!(
            translate("# Fine\n\nbroken `code"),
            Err(Error::UnbalancedDelimiter { .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let markdown = "# A\n\n> q\n\n1. x\n2. y\n\n```\nz\n```";
        assert_eq!(translate(markdown).unwrap(), translate(markdown).unwrap());
    }
}
