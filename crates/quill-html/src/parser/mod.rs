//! HTML tree construction.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)

mod core;
mod foreign_content;
mod formatting;
mod insertion;
mod modes;
mod print;
mod quirks;
mod stack;

pub use self::core::{HTMLParser, InsertionMode};
pub use self::print::{format_tree, print_tree};
