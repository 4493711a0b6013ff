//! Node types stored in the arena.
//!
//! [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)

use core::fmt;

/// A type-safe index into the DOM arena.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// `NodeId` is stable for the lifetime of the arena: nodes are never moved or
/// freed, only detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The Document created by [`DomTree::new`](crate::DomTree::new) is always at index 0.
    pub const ROOT: Self = Self(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// [§ 1.1 Namespaces](https://infra.spec.whatwg.org/#namespaces)
///
/// The namespaces an HTML parser can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// "The HTML namespace is "http://www.w3.org/1999/xhtml"."
    Html,
    /// "The MathML namespace is "http://www.w3.org/1998/Math/MathML"."
    MathMl,
    /// "The SVG namespace is "http://www.w3.org/2000/svg"."
    Svg,
    /// "The XLink namespace is "http://www.w3.org/1999/xlink"."
    XLink,
    /// "The XML namespace is "http://www.w3.org/XML/1998/namespace"."
    Xml,
    /// "The XMLNS namespace is "http://www.w3.org/2000/xmlns/"."
    Xmlns,
}

impl Namespace {
    /// The namespace URL.
    #[must_use]
    pub const fn url(self) -> &'static str {
        match self {
            Self::Html => "http://www.w3.org/1999/xhtml",
            Self::MathMl => "http://www.w3.org/1998/Math/MathML",
            Self::Svg => "http://www.w3.org/2000/svg",
            Self::XLink => "http://www.w3.org/1999/xlink",
            Self::Xml => "http://www.w3.org/XML/1998/namespace",
            Self::Xmlns => "http://www.w3.org/2000/xmlns/",
        }
    }

    /// Look a namespace up by its URL.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        [
            Self::Html,
            Self::MathMl,
            Self::Svg,
            Self::XLink,
            Self::Xml,
            Self::Xmlns,
        ]
        .into_iter()
        .find(|ns| ns.url() == url)
    }
}

/// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#concept-document-mode)
///
/// "Each document has an associated mode ... "no-quirks", "quirks", or
/// "limited-quirks"."
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuirksMode {
    /// "no-quirks"
    #[default]
    NoQuirks,
    /// "limited-quirks"
    LimitedQuirks,
    /// "quirks"
    Quirks,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
///
/// Relationships are stored as indices so any direction of traversal is O(1).
/// Attr nodes live in the arena too but never appear in a child list.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "...and has children, which is an ordered set of objects."
    pub children: Vec<NodeId>,

    /// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    /// "The next sibling of an object is its first following sibling or null
    /// if it has no following sibling."
    pub next_sibling: Option<NodeId>,

    /// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    /// "The previous sibling of an object is its first preceding sibling or
    /// null if it has no preceding sibling."
    pub prev_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-node-document)
    /// "Each node has an associated node document, set upon creation, that is
    /// a document." A Document's node document is itself.
    pub owner_document: NodeId,
}

impl Node {
    pub(crate) const fn new(node_type: NodeType, owner_document: NodeId) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
            owner_document,
        }
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document(DocumentData),
    /// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
    DocumentType(DocumentTypeData),
    /// [§ 4.7 Interface DocumentFragment](https://dom.spec.whatwg.org/#interface-documentfragment)
    DocumentFragment,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(ElementData),
    /// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
    /// "Attr nodes are simply known as attributes."
    Attr(AttrData),
    /// [§ 4.11 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.14 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
    /// [§ 4.13 Interface ProcessingInstruction](https://dom.spec.whatwg.org/#interface-processinginstruction)
    ProcessingInstruction(ProcessingInstructionData),
}

impl NodeType {
    /// [§ 4.4](https://dom.spec.whatwg.org/#dom-node-nodename) `nodeName`-style
    /// label for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Document(_) => "#document",
            Self::DocumentType(_) => "#doctype",
            Self::DocumentFragment => "#document-fragment",
            Self::Element(_) => "#element",
            Self::Attr(_) => "#attr",
            Self::Text(_) => "#text",
            Self::Comment(_) => "#comment",
            Self::ProcessingInstruction(_) => "#processing-instruction",
        }
    }

    /// True for Text, Comment and ProcessingInstruction, the nodes with
    /// [character data](https://dom.spec.whatwg.org/#concept-cd-data).
    #[must_use]
    pub const fn is_character_data(&self) -> bool {
        matches!(
            self,
            Self::Text(_) | Self::Comment(_) | Self::ProcessingInstruction(_)
        )
    }
}

/// Document-specific data.
#[derive(Debug, Clone, Default)]
pub struct DocumentData {
    /// [§ 4.5](https://dom.spec.whatwg.org/#html-document)
    /// "A document is said to be an HTML document if its type is "html"."
    /// Attribute and element names are lowercased on creation in HTML documents.
    pub is_html: bool,
    /// "Each document has an associated mode"
    pub quirks_mode: QuirksMode,
    /// [§ 3.1.4 The head element](https://html.spec.whatwg.org/multipage/dom.html#the-head-element-2)
    /// "The head element of a document is the first head element that is a
    /// child of the html element, if there is one, or null otherwise."
    pub head: Option<NodeId>,
    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    /// "The body element of a document is the first of the html element's
    /// children that is either a body element or a frameset element, or null
    /// if there is no such element."
    pub body: Option<NodeId>,
}

/// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
///
/// "Doctypes have an associated name, public ID, and system ID."
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTypeData {
    /// "name"
    pub name: String,
    /// "public ID"
    pub public_id: String,
    /// "system ID"
    pub system_id: String,
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// "Elements have an associated namespace, namespace prefix, local name ..."
/// "Elements also have an attribute list, which is a list exposed through a
/// NamedNodeMap."
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub local_name: String,
    /// "An element's namespace"
    pub namespace: Option<Namespace>,
    /// "An element's namespace prefix"
    pub prefix: Option<String>,
    /// Attr nodes, in insertion order.
    pub attributes: Vec<NodeId>,
    /// [§ 4.12.3 The template element](https://html.spec.whatwg.org/multipage/scripting.html#template-contents)
    /// "Each template element has an associated DocumentFragment object that
    /// is its template contents."
    pub template_contents: Option<NodeId>,
}

impl ElementData {
    /// Element data with no attributes.
    #[must_use]
    pub const fn new(local_name: String, namespace: Option<Namespace>) -> Self {
        Self {
            local_name,
            namespace,
            prefix: None,
            attributes: Vec::new(),
            template_contents: None,
        }
    }

    /// True if this is an HTML-namespace element with the given local name.
    #[must_use]
    pub fn is_html(&self, local_name: &str) -> bool {
        self.namespace == Some(Namespace::Html) && self.local_name == local_name
    }

    /// True if this is an HTML-namespace element whose local name is in `names`.
    #[must_use]
    pub fn is_html_one_of(&self, names: &[&str]) -> bool {
        self.namespace == Some(Namespace::Html) && names.contains(&self.local_name.as_str())
    }

    /// [§ 4.9](https://dom.spec.whatwg.org/#concept-element-qualified-name)
    /// "An element's qualified name is its local name if its namespace prefix
    /// is null; otherwise its namespace prefix, followed by ":", followed by its
    /// local name."
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local_name),
            None => self.local_name.clone(),
        }
    }
}

/// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
///
/// "Attr nodes have a namespace (null or a non-empty string), namespace prefix
/// (null or a non-empty string), local name (a non-empty string), value (a
/// string), and element (null or an Element)."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrData {
    /// "namespace"
    pub namespace: Option<Namespace>,
    /// "namespace prefix"
    pub prefix: Option<String>,
    /// "local name"
    pub local_name: String,
    /// "value"
    pub value: String,
    /// "element": the single element that owns this attribute.
    pub owner_element: Option<NodeId>,
}

impl AttrData {
    /// The attribute's qualified name (`prefix:local` or `local`).
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local_name),
            None => self.local_name.clone(),
        }
    }

    /// Compare against a qualified name without allocating.
    #[must_use]
    pub fn has_qualified_name(&self, name: &str) -> bool {
        match &self.prefix {
            Some(prefix) => name
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix(':'))
                .is_some_and(|local| local == self.local_name),
            None => name == self.local_name,
        }
    }
}

/// [§ 4.13 Interface ProcessingInstruction](https://dom.spec.whatwg.org/#interface-processinginstruction)
///
/// "ProcessingInstruction nodes have an associated target."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingInstructionData {
    /// "target"
    pub target: String,
    /// The character data.
    pub data: String,
}
