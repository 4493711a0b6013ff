//! Arena-based DOM for the quill HTML parser.
//!
//! This crate provides the document tree the tree constructor builds, following
//! the [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! Every node of every document lives in one [`DomTree`] arena and is
//! addressed by a [`NodeId`]. Parent, child and sibling relationships are
//! stored as indices, so the parser's open-elements stack can hold ids into
//! the tree while the tree is being mutated.
//!
//! Mutations are recorded in a bounded log; a live [`HtmlCollection`] replays
//! it on access instead of rescanning the tree.

mod attributes;
mod character_data;
mod collection;
mod error;
mod mutation;
mod node;
mod tree;

pub use collection::HtmlCollection;
pub use error::{DomError, HierarchyError};
pub use node::{
    AttrData, DocumentData, DocumentTypeData, ElementData, Namespace, Node, NodeId, NodeType,
    ProcessingInstructionData, QuirksMode,
};
pub use tree::{AncestorIterator, DescendantIterator, DomTree, PrecedingSiblingIterator};
