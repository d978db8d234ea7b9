use log::debug;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::digit1,
    combinator::{map, map_res},
    sequence::terminated,
    IResult,
};

use crate::entity::{Block, BlockType};

const FENCE: &str = "```";

// this guy matches the leading #s of a heading and reports the level
pub(crate) fn parse_header_tag(i: &str) -> IResult<&str, usize> {
    map(
        terminated(take_while1(|c| c == '#'), tag(" ")),
        |s: &str| s.len(),
    )(i)
}

pub(crate) fn parse_unordered_list_tag(i: &str) -> IResult<&str, &str> {
    alt((tag("* "), tag("- "), tag("+ ")))(i)
}

pub(crate) fn parse_ordered_list_tag(i: &str) -> IResult<&str, usize> {
    map_res(terminated(digit1, tag(". ")), |s: &str| s.parse::<usize>())(i)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}

fn list_kind(line: &str) -> Option<ListKind> {
    let line = line.trim_start();
    if parse_unordered_list_tag(line).is_ok() {
        Some(ListKind::Unordered)
    } else if parse_ordered_list_tag(line).is_ok() {
        Some(ListKind::Ordered)
    } else {
        None
    }
}

fn opens_fence(line: &str) -> bool {
    let line = line.trim();
    line.starts_with(FENCE) && !(line.len() >= 2 * FENCE.len() && line.ends_with(FENCE))
}

/// Splits a document into classified top-level blocks.
pub fn blocks(document: &str) -> Vec<Block> {
    let blocks: Vec<Block> = merge_lists(split_segments(document))
        .into_iter()
        .map(|text| {
            let kind = classify(&text);
            Block::new(text, kind)
        })
        .collect();
    debug!("split document into {} blocks", blocks.len());
    for block in &blocks {
        debug!("  {}: {:?}", block.kind, block.text);
    }
    blocks
}

/// Cuts on blank lines and right before any line starting with `#`.
/// Lines inside a fenced code block are never cut.
fn split_segments(document: &str) -> Vec<String> {
    fn flush(current: &mut Vec<&str>, segments: &mut Vec<String>) {
        let segment = current.join("\n");
        current.clear();
        let segment = segment.trim();
        if !segment.is_empty() {
            segments.push(segment.to_string());
        }
    }

    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_fence = false;
    for line in document.lines() {
        if in_fence {
            current.push(line);
            in_fence = !line.trim_end().ends_with(FENCE);
            continue;
        }
        if line.trim().is_empty() {
            flush(&mut current, &mut segments);
            continue;
        }
        if line.starts_with('#') {
            flush(&mut current, &mut segments);
        }
        current.push(line);
        in_fence = opens_fence(line);
    }
    flush(&mut current, &mut segments);
    segments
}

struct ListRun {
    kind: ListKind,
    lines: Vec<String>,
}

/// Joins neighbouring list segments into one block per run of same-kind items.
fn merge_lists(segments: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(segments.len());
    let mut run: Option<ListRun> = None;
    for segment in segments {
        if !segment.lines().all(|line| list_kind(line).is_some()) {
            if let Some(done) = run.take() {
                out.push(done.lines.join("\n"));
            }
            out.push(segment);
            continue;
        }
        for line in segment.lines() {
            let Some(kind) = list_kind(line) else {
                continue;
            };
            run = match run.take() {
                Some(mut open) if open.kind == kind => {
                    open.lines.push(line.trim().to_string());
                    Some(open)
                }
                other => {
                    if let Some(done) = other {
                        out.push(done.lines.join("\n"));
                    }
                    Some(ListRun {
                        kind,
                        lines: vec![line.trim().to_string()],
                    })
                }
            };
        }
    }
    if let Some(done) = run {
        out.push(done.lines.join("\n"));
    }
    out
}

pub fn classify(block: &str) -> BlockType {
    if let Ok((_, level)) = parse_header_tag(block) {
        if level <= 6 {
            return BlockType::Heading(level as u8);
        }
    }
    if block.starts_with(FENCE) && block.ends_with(FENCE) {
        return BlockType::Code;
    }
    let lines: Vec<&str> = block.lines().collect();
    if lines.iter().all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }
    if lines
        .iter()
        .all(|line| parse_unordered_list_tag(line.trim_start()).is_ok())
    {
        return BlockType::UnorderedList;
    }
    let numbered = lines.iter().enumerate().all(|(i, line)| {
        matches!(parse_ordered_list_tag(line.trim_start()), Ok((_, n)) if n == i + 1)
    });
    if numbered {
        return BlockType::OrderedList;
    }
    BlockType::Paragraph
}
