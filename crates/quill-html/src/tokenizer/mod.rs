//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

mod attributes;
mod character_reference;
mod comment;
/// HTML tokenizer state machine implementation.
pub mod core;
mod doctype;
mod entities;
mod helpers;
/// Named character reference trie per § 13.5.
pub mod named_character_references;
mod script_data;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, TokenizerState};
pub use named_character_references::{ReferenceMatch, ReferenceTrie, reference_trie};
pub use token::{Attribute, Token};
