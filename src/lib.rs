pub mod blocks;
pub mod entity;
pub mod error;
pub mod node;
pub mod page;
pub mod parser;
pub mod site;
pub mod translator;

pub use entity::{Block, BlockType, Span, SpanKind};
pub use error::{Error, Result};
pub use node::{Node, ToHtml};
pub use translator::{document, translate};
