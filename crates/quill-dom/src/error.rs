//! Errors raised by DOM mutation methods.
//!
//! [§ 2.4 DOMException](https://webidl.spec.whatwg.org/#idl-DOMException-error-names)

use thiserror::Error;

use crate::NodeId;

/// A DOM method was called in a way its contract forbids. The tree is left
/// unchanged whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomError {
    /// "HierarchyRequestError: The operation would yield an incorrect node tree."
    #[error("hierarchy request error: {0}")]
    Hierarchy(#[from] HierarchyError),

    /// "IndexSizeError: The index is not in the allowed range."
    #[error("index size error: offset {offset} is past the end of data of length {length}")]
    IndexSize {
        /// The offset that was requested.
        offset: usize,
        /// The length of the node's data.
        length: usize,
    },

    /// The node passed where an element was expected is some other kind of node.
    #[error("{0} is not an element")]
    NotAnElement(NodeId),

    /// The node passed where a document was expected is some other kind of node.
    #[error("{0} is not a document")]
    NotADocument(NodeId),

    /// The node does not hold character data (Text, Comment, ProcessingInstruction).
    #[error("{0} does not hold character data")]
    NotCharacterData(NodeId),

    /// "NotSupportedError: The operation is not supported."
    #[error("not supported: {0}")]
    NotSupported(&'static str),
}

/// [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
///
/// The specific pre-insertion (or removal) rule that was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// "If parent is not a Document, DocumentFragment, or Element node"
    #[error("parent cannot have children")]
    InvalidParent,
    /// "If node is a host-including inclusive ancestor of parent"
    #[error("node is an inclusive ancestor of the parent")]
    InclusiveAncestor,
    /// "If child is non-null and its parent is not parent"
    #[error("reference node is not a child of the parent")]
    NotAChild,
    /// "If node is not a DocumentFragment, DocumentType, Element, or
    /// CharacterData node"
    #[error("node cannot be inserted into a tree")]
    InvalidNodeType,
    /// "If either node is a Text node and parent is a document"
    #[error("text cannot be a child of a document")]
    TextUnderDocument,
    /// "...or node is a doctype and parent is not a document"
    #[error("doctype can only be a child of a document")]
    DoctypeOutsideDocument,
    /// "If node has more than one element child or has a Text node child."
    #[error("fragment has more than one element child or a text child")]
    InvalidFragment,
    /// "parent has an element child"
    #[error("document already has a document element")]
    MultipleDocumentElements,
    /// "parent has a doctype child"
    #[error("document already has a doctype")]
    MultipleDoctypes,
    /// "an element is preceding child, or child is null and parent has an
    /// element child"
    #[error("doctype would follow the document element")]
    DoctypeAfterElement,
    /// "child is a doctype, or child is non-null and a doctype is following child"
    #[error("element would precede the doctype")]
    ElementBeforeDoctype,
}
