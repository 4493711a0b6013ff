//! The node arena: creation, lookup and traversal.

use core::cmp::Ordering;

use crate::mutation::MutationLog;
use crate::node::{
    AttrData, DocumentData, DocumentTypeData, ElementData, Namespace, Node, NodeId, NodeType,
    ProcessingInstructionData, QuirksMode,
};

/// Arena-based DOM with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree."
///
/// All nodes of every document created through this arena live in one
/// contiguous vector and refer to each other by [`NodeId`]. Nodes are never
/// freed; removing a node only detaches it.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes, indexed by `NodeId`. The first Document is `NodeId::ROOT`.
    pub(crate) nodes: Vec<Node>,
    /// Bounded record of mutations consumed by live collections.
    pub(crate) log: MutationLog,
}

impl DomTree {
    /// Create an arena holding a single, empty HTML document at [`NodeId::ROOT`].
    #[must_use]
    pub fn new() -> Self {
        let document = Node::new(
            NodeType::Document(DocumentData {
                is_html: true,
                ..DocumentData::default()
            }),
            NodeId::ROOT,
        );
        Self {
            nodes: vec![document],
            log: MutationLog::default(),
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Number of nodes ever allocated in the arena, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the arena holds at least its first Document.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of mutations applied to this arena. Live collections compare
    /// this with the version they last observed.
    #[must_use]
    pub const fn version(&self) -> usize {
        self.log.version()
    }

    fn alloc(&mut self, node_type: NodeType, owner_document: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(node_type, owner_document));
        id
    }

    // ===== Factories =====

    /// [§ 4.5 `new Document()`](https://dom.spec.whatwg.org/#dom-document-document)
    ///
    /// Create another, independent HTML document in the same arena. Nodes can
    /// be moved between documents with [`adopt_node`](Self::adopt_node).
    pub fn create_document(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.alloc(
            NodeType::Document(DocumentData {
                is_html: true,
                ..DocumentData::default()
            }),
            id,
        )
    }

    /// [§ 4.5 `createElement(localName)`](https://dom.spec.whatwg.org/#dom-document-createelement)
    ///
    /// "If this is an HTML document, then set localName to localName in ASCII
    /// lowercase." The element is in the HTML namespace.
    pub fn create_element(&mut self, document: NodeId, local_name: &str) -> NodeId {
        let local_name = if self.is_html_document(document) {
            local_name.to_ascii_lowercase()
        } else {
            local_name.to_string()
        };
        self.create_element_ns(document, Some(Namespace::Html), None, &local_name)
    }

    /// [§ 4.9 Create an element](https://dom.spec.whatwg.org/#concept-create-element)
    ///
    /// Create an element with an explicit namespace and prefix. No case
    /// folding is applied. A `template` element in the HTML namespace gets its
    /// template contents fragment here.
    pub fn create_element_ns(
        &mut self,
        document: NodeId,
        namespace: Option<Namespace>,
        prefix: Option<&str>,
        local_name: &str,
    ) -> NodeId {
        let mut data = ElementData::new(local_name.to_string(), namespace);
        data.prefix = prefix.map(str::to_string);
        let is_template = data.is_html("template");
        let element = self.alloc(NodeType::Element(data), document);

        if is_template {
            // [§ 4.12.3](https://html.spec.whatwg.org/multipage/scripting.html#template-contents)
            // "When a template element is created, the user agent must ... set
            // the template element's template contents to a new
            // DocumentFragment object whose node document is the template
            // element's node document"
            let contents = self.create_document_fragment(document);
            if let Some(data) = self.element_data_mut(element) {
                data.template_contents = Some(contents);
            }
        }
        element
    }

    /// [§ 4.5 `createTextNode(data)`](https://dom.spec.whatwg.org/#dom-document-createtextnode)
    pub fn create_text_node(&mut self, document: NodeId, data: &str) -> NodeId {
        self.alloc(NodeType::Text(data.to_string()), document)
    }

    /// [§ 4.5 `createComment(data)`](https://dom.spec.whatwg.org/#dom-document-createcomment)
    pub fn create_comment(&mut self, document: NodeId, data: &str) -> NodeId {
        self.alloc(NodeType::Comment(data.to_string()), document)
    }

    /// [§ 4.5 `createProcessingInstruction(target, data)`](https://dom.spec.whatwg.org/#dom-document-createprocessinginstruction)
    pub fn create_processing_instruction(
        &mut self,
        document: NodeId,
        target: &str,
        data: &str,
    ) -> NodeId {
        self.alloc(
            NodeType::ProcessingInstruction(ProcessingInstructionData {
                target: target.to_string(),
                data: data.to_string(),
            }),
            document,
        )
    }

    /// [§ 4.5.1 `createDocumentType(qualifiedName, publicId, systemId)`](https://dom.spec.whatwg.org/#dom-domimplementation-createdocumenttype)
    pub fn create_document_type(
        &mut self,
        document: NodeId,
        name: &str,
        public_id: &str,
        system_id: &str,
    ) -> NodeId {
        self.alloc(
            NodeType::DocumentType(DocumentTypeData {
                name: name.to_string(),
                public_id: public_id.to_string(),
                system_id: system_id.to_string(),
            }),
            document,
        )
    }

    /// [§ 4.5 `createDocumentFragment()`](https://dom.spec.whatwg.org/#dom-document-createdocumentfragment)
    pub fn create_document_fragment(&mut self, document: NodeId) -> NodeId {
        self.alloc(NodeType::DocumentFragment, document)
    }

    /// Allocate a detached Attr node. Attaching it to an element is the job of
    /// the attribute methods.
    pub(crate) fn create_attr(&mut self, document: NodeId, data: AttrData) -> NodeId {
        self.alloc(NodeType::Attr(data), document)
    }

    // ===== Node accessors =====

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    pub(crate) fn element_data_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(id.0)?.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Get the text if this node is a Text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get attribute data if this node is an Attr.
    #[must_use]
    pub fn as_attr(&self, id: NodeId) -> Option<&AttrData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Attr(data) => Some(data),
            _ => None,
        })
    }

    /// Get doctype data if this node is a DocumentType.
    #[must_use]
    pub fn as_document_type(&self, id: NodeId) -> Option<&DocumentTypeData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::DocumentType(data) => Some(data),
            _ => None,
        })
    }

    /// Get document data if this node is a Document.
    #[must_use]
    pub fn as_document(&self, id: NodeId) -> Option<&DocumentData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Document(data) => Some(data),
            _ => None,
        })
    }

    pub(crate) fn document_data_mut(&mut self, id: NodeId) -> Option<&mut DocumentData> {
        match &mut self.nodes.get_mut(id.0)?.node_type {
            NodeType::Document(data) => Some(data),
            _ => None,
        }
    }

    /// True if the node is an element.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.as_element(id).is_some()
    }

    /// True if the node is a Document.
    #[must_use]
    pub fn is_document(&self, id: NodeId) -> bool {
        self.as_document(id).is_some()
    }

    /// The element's local name. HTML tag names are lowercase, so this is
    /// what a rendering adapter matches on.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|e| e.local_name.as_str())
    }

    /// True if `id` is an HTML element with the given local name.
    #[must_use]
    pub fn is_html_element(&self, id: NodeId, local_name: &str) -> bool {
        self.as_element(id).is_some_and(|e| e.is_html(local_name))
    }

    /// [§ 4.12.3](https://html.spec.whatwg.org/multipage/scripting.html#template-contents)
    /// The template contents fragment of a `template` element.
    #[must_use]
    pub fn template_contents(&self, id: NodeId) -> Option<NodeId> {
        self.as_element(id).and_then(|e| e.template_contents)
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-node-document)
    /// "Each node has an associated node document"
    #[must_use]
    pub fn owner_document(&self, id: NodeId) -> NodeId {
        self.node(id).owner_document
    }

    fn is_html_document(&self, document: NodeId) -> bool {
        self.as_document(document).is_some_and(|d| d.is_html)
    }

    // ===== Document accessors =====

    /// [§ 4.5](https://dom.spec.whatwg.org/#document-element)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element_of(&self, document: NodeId) -> Option<NodeId> {
        self.children(document)
            .iter()
            .copied()
            .find(|&id| self.is_element(id))
    }

    /// Document element of the root document.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.document_element_of(NodeId::ROOT)
    }

    /// The head element of the root document.
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        self.as_document(NodeId::ROOT).and_then(|d| d.head)
    }

    /// The body element of the root document.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.as_document(NodeId::ROOT).and_then(|d| d.body)
    }

    /// The doctype child of a document, if any.
    #[must_use]
    pub fn doctype_of(&self, document: NodeId) -> Option<NodeId> {
        self.children(document)
            .iter()
            .copied()
            .find(|&id| self.as_document_type(id).is_some())
    }

    /// [§ 4.5](https://dom.spec.whatwg.org/#concept-document-mode)
    #[must_use]
    pub fn quirks_mode(&self, document: NodeId) -> QuirksMode {
        self.as_document(document)
            .map_or(QuirksMode::NoQuirks, |d| d.quirks_mode)
    }

    /// Set the document's mode. The tree constructor does this while handling
    /// the DOCTYPE in the "initial" insertion mode.
    pub fn set_quirks_mode(&mut self, document: NodeId, mode: QuirksMode) {
        if let Some(data) = self.document_data_mut(document) {
            data.quirks_mode = mode;
        }
    }

    /// Recompute the head and body pointers of `document` from the children of
    /// its document element.
    pub(crate) fn refresh_document_pointers(&mut self, document: NodeId) {
        let html = self
            .document_element_of(document)
            .filter(|&id| self.is_html_element(id, "html"));
        let (head, body) = html.map_or((None, None), |html| {
            let children = self.children(html);
            let head = children
                .iter()
                .copied()
                .find(|&id| self.is_html_element(id, "head"));
            let body = children.iter().copied().find(|&id| {
                self.as_element(id)
                    .is_some_and(|e| e.is_html_one_of(&["body", "frameset"]))
            });
            (head, body)
        });
        if let Some(data) = self.document_data_mut(document) {
            data.head = head;
            data.body = body;
        }
    }

    // ===== Navigation =====

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// [§ 4.4 `childNodes`](https://dom.spec.whatwg.org/#dom-node-childnodes)
    ///
    /// All children of a node, in tree order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-index)
    ///
    /// "The index of an object is its number of preceding siblings, or 0 if it
    /// has none."
    #[must_use]
    pub fn index_of(&self, id: NodeId) -> usize {
        self.parent(id).map_or(0, |parent| {
            self.children(parent)
                .iter()
                .position(|&c| c == id)
                .unwrap_or(0)
        })
    }

    /// [§ 4.2.1 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// [§ 4.2.1](https://dom.spec.whatwg.org/#concept-tree-inclusive-ancestor)
    /// "An inclusive ancestor is an object or one of its ancestors."
    ///
    /// A childless `ancestor` is answered without walking up from `node`, so
    /// appending a freshly created node costs the same at any depth.
    #[must_use]
    pub fn is_inclusive_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        if ancestor == node {
            return true;
        }
        !self.children(ancestor).is_empty() && self.is_descendant_of(node, ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings (from immediately before to first child).
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblingIterator<'_> {
        PrecedingSiblingIterator {
            tree: self,
            current: self.prev_sibling(id),
        }
    }

    /// Iterate over the descendants of `root` in tree order (preorder,
    /// depth-first), excluding `root` itself.
    #[must_use]
    pub fn descendants(&self, root: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            root,
            next: self.first_child(root),
        }
    }

    /// The node following `id` in tree order, staying within `root`'s subtree.
    #[must_use]
    pub fn next_in_tree_order(&self, root: NodeId, id: NodeId) -> Option<NodeId> {
        if let Some(child) = self.first_child(id) {
            return Some(child);
        }
        let mut current = id;
        while current != root {
            if let Some(sibling) = self.next_sibling(current) {
                return Some(sibling);
            }
            current = self.parent(current)?;
        }
        None
    }

    /// [§ 4.2.1 Tree order](https://dom.spec.whatwg.org/#concept-tree-order)
    ///
    /// "An object A is preceding an object B if A and B are in the same tree
    /// and A comes before B in tree order."
    ///
    /// Returns `None` when the nodes are in different trees.
    #[must_use]
    pub fn compare_tree_order(&self, a: NodeId, b: NodeId) -> Option<Ordering> {
        if a == b {
            return Some(Ordering::Equal);
        }
        let path_a = self.path_from_root(a);
        let path_b = self.path_from_root(b);
        if path_a.first() != path_b.first() {
            return None;
        }

        // Walk down both paths until they diverge; the divergent nodes are
        // siblings whose order decides.
        for (&x, &y) in path_a.iter().zip(path_b.iter()) {
            if x != y {
                return Some(self.index_of(x).cmp(&self.index_of(y)));
            }
        }
        // One path is a prefix of the other: the ancestor comes first.
        Some(path_a.len().cmp(&path_b.len()))
    }

    fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = self.ancestors(id).collect();
        path.reverse();
        path.push(id);
        path
    }

    /// [§ 4.4 `textContent`](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// The data of a character data node, or the concatenated data of all Text
    /// descendants of any other node.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        match self.get(id).map(|n| &n.node_type) {
            Some(NodeType::Text(data) | NodeType::Comment(data)) => data.clone(),
            Some(NodeType::ProcessingInstruction(pi)) => pi.data.clone(),
            Some(NodeType::Attr(attr)) => attr.value.clone(),
            Some(_) => self
                .descendants(id)
                .filter_map(|d| self.as_text(d))
                .collect(),
            None => String::new(),
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over preceding siblings of a node.
pub struct PrecedingSiblingIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for PrecedingSiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.prev_sibling(id);
        Some(id)
    }
}

/// Preorder iterator over a subtree, excluding its root.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.next_in_tree_order(self.root, id);
        Some(id)
    }
}
