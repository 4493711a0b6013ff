//! [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#mutation-algorithms)
//!
//! Insertion, removal and adoption, plus the mutation log that live
//! collections replay to stay in sync.

use std::collections::VecDeque;

use crate::error::{DomError, HierarchyError};
use crate::node::{NodeId, NodeType};
use crate::tree::DomTree;

/// How many records the log keeps before a collection that fell behind has to
/// rescan from scratch.
const MUTATION_LOG_CAPACITY: usize = 4096;

/// One change to the tree, as seen by live collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MutationRecord {
    /// `node` was inserted into `parent` at child position `index`.
    Inserted {
        parent: NodeId,
        node: NodeId,
        index: usize,
    },
    /// A child was removed from `parent` at child position `index`.
    Removed { parent: NodeId, index: usize },
    /// An attribute of `element` was added, changed or removed.
    Attribute { element: NodeId },
}

/// Bounded, versioned list of [`MutationRecord`]s.
///
/// `version` counts every mutation ever recorded; the retained records are
/// the last `records.len()` of them.
#[derive(Debug, Clone, Default)]
pub(crate) struct MutationLog {
    records: VecDeque<MutationRecord>,
    version: usize,
}

impl MutationLog {
    pub(crate) const fn version(&self) -> usize {
        self.version
    }

    fn push(&mut self, record: MutationRecord) {
        if self.records.len() == MUTATION_LOG_CAPACITY {
            let _ = self.records.pop_front();
        }
        self.records.push_back(record);
        self.version += 1;
    }

    /// Records newer than `version`, or `None` if some of them were trimmed.
    pub(crate) fn since(&self, version: usize) -> Option<impl Iterator<Item = &MutationRecord>> {
        let first_retained = self.version - self.records.len();
        if version < first_retained || version > self.version {
            return None;
        }
        Some(self.records.iter().skip(version - first_retained))
    }
}

impl DomTree {
    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Insert `node` into `parent` before `child` (or at the end when `child`
    /// is `None`). A DocumentFragment inserts its children instead of itself.
    /// The node is removed from its old parent and adopted into `parent`'s
    /// node document first.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Hierarchy`] if the insertion would produce an
    /// invalid tree; nothing is mutated in that case.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        node: NodeId,
        child: Option<NodeId>,
    ) -> Result<NodeId, DomError> {
        // STEP 1: "Ensure pre-insertion validity of node into parent before child."
        self.ensure_pre_insertion_validity(parent, node, child)?;

        // STEP 2: "Let referenceChild be child."
        // STEP 3: "If referenceChild is node, then set referenceChild to node's
        //          next sibling."
        let reference = if child == Some(node) {
            self.next_sibling(node)
        } else {
            child
        };

        // STEP 4: "Insert node into parent before referenceChild."
        let document = self.document_of_parent(parent);
        if matches!(self.node(node).node_type, NodeType::DocumentFragment) {
            // "If node is a DocumentFragment node, then ... let nodes be node's
            //  children" and remove them from node.
            let moved: Vec<NodeId> = self.children(node).to_vec();
            for &moved_child in &moved {
                self.remove_unchecked(moved_child);
            }
            for moved_child in moved {
                self.adopt_subtree(document, moved_child);
                self.insert_unchecked(parent, moved_child, reference);
            }
        } else {
            if self.parent(node).is_some() {
                self.remove_unchecked(node);
            }
            self.adopt_subtree(document, node);
            self.insert_unchecked(parent, node, reference);
        }
        Ok(node)
    }

    /// [§ 4.2.3 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// # Errors
    ///
    /// Same as [`insert_before`](Self::insert_before).
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> Result<NodeId, DomError> {
        self.insert_before(parent, node, None)
    }

    /// [§ 4.2.3 Pre-remove](https://dom.spec.whatwg.org/#concept-node-pre-remove)
    ///
    /// # Errors
    ///
    /// "If child's parent is not parent, then throw a "NotFoundError"
    /// DOMException." This is reported as [`HierarchyError::NotAChild`].
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
        if self.parent(child) != Some(parent) {
            return Err(HierarchyError::NotAChild.into());
        }
        self.remove_unchecked(child);
        Ok(child)
    }

    /// [§ 4.5 Adopt](https://dom.spec.whatwg.org/#concept-node-adopt)
    ///
    /// Detach `node` from its parent and make `document` the node document of
    /// `node` and all of its shadow-including inclusive descendants,
    /// attributes included.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotADocument`] if `document` is not a Document, and
    /// [`DomError::NotSupported`] when asked to adopt a Document.
    pub fn adopt_node(&mut self, document: NodeId, node: NodeId) -> Result<(), DomError> {
        if !self.is_document(document) {
            return Err(DomError::NotADocument(document));
        }
        // "If node is a document, then throw a "NotSupportedError" DOMException."
        if self.is_document(node) {
            return Err(DomError::NotSupported("a document cannot be adopted"));
        }
        // STEP 2: "If node's parent is non-null, then remove node."
        if self.parent(node).is_some() {
            self.remove_unchecked(node);
        }
        self.adopt_subtree(document, node);
        Ok(())
    }

    /// Move every child of `from` to the end of `to`, keeping their order.
    ///
    /// Used by the adoption agency algorithm: "Take all of the child nodes of
    /// furthest block and append them to the element created".
    ///
    /// # Errors
    ///
    /// Fails like [`insert_before`](Self::insert_before) when `to` cannot hold
    /// the children; children moved before the failure stay moved.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) -> Result<(), DomError> {
        let moved: Vec<NodeId> = self.children(from).to_vec();
        for child in moved {
            let _ = self.append_child(to, child)?;
        }
        Ok(())
    }

    /// [§ 4.2.3](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
    /// "To ensure pre-insertion validity of a node into a parent before a child"
    fn ensure_pre_insertion_validity(
        &self,
        parent: NodeId,
        node: NodeId,
        child: Option<NodeId>,
    ) -> Result<(), HierarchyError> {
        let parent_type = &self.node(parent).node_type;
        let node_type = &self.node(node).node_type;

        // STEP 1: "If parent is not a Document, DocumentFragment, or Element
        //          node, then throw a "HierarchyRequestError" DOMException."
        if !matches!(
            parent_type,
            NodeType::Document(_) | NodeType::DocumentFragment | NodeType::Element(_)
        ) {
            return Err(HierarchyError::InvalidParent);
        }

        // STEP 2: "If node is a host-including inclusive ancestor of parent"
        if self.is_inclusive_ancestor_of(node, parent) {
            return Err(HierarchyError::InclusiveAncestor);
        }

        // STEP 3: "If child is non-null and its parent is not parent"
        if let Some(child) = child
            && self.parent(child) != Some(parent)
        {
            return Err(HierarchyError::NotAChild);
        }

        // STEP 4: "If node is not a DocumentFragment, DocumentType, Element, or
        //          CharacterData node"
        match node_type {
            NodeType::Document(_) | NodeType::Attr(_) => {
                return Err(HierarchyError::InvalidNodeType);
            }
            // STEP 5: "If either node is a Text node and parent is a document,
            //          or node is a doctype and parent is not a document"
            NodeType::Text(_) if matches!(parent_type, NodeType::Document(_)) => {
                return Err(HierarchyError::TextUnderDocument);
            }
            NodeType::DocumentType(_) if !matches!(parent_type, NodeType::Document(_)) => {
                return Err(HierarchyError::DoctypeOutsideDocument);
            }
            _ => {}
        }

        // STEP 6: "If parent is a document, and any of the statements below,
        //          switched on the interface node implements, are true"
        if !matches!(parent_type, NodeType::Document(_)) {
            return Ok(());
        }
        match node_type {
            NodeType::DocumentFragment => {
                // "If node has more than one element child or has a Text node child."
                let children = self.children(node);
                let elements = children.iter().filter(|&&c| self.is_element(c)).count();
                let has_text = children.iter().any(|&c| self.as_text(c).is_some());
                if elements > 1 || has_text {
                    return Err(HierarchyError::InvalidFragment);
                }
                // "Otherwise, if node has one element child and either parent
                //  has an element child, child is a doctype, or child is
                //  non-null and a doctype is following child."
                if elements == 1 {
                    self.check_element_placement(parent, child)?;
                }
            }
            NodeType::Element(_) => self.check_element_placement(parent, child)?,
            NodeType::DocumentType(_) => {
                // "parent has a doctype child"
                if self.doctype_of(parent).is_some() {
                    return Err(HierarchyError::MultipleDoctypes);
                }
                match child {
                    // "child is non-null and an element is preceding child"
                    Some(child) => {
                        if self.preceding_siblings(child).any(|s| self.is_element(s)) {
                            return Err(HierarchyError::DoctypeAfterElement);
                        }
                    }
                    // "child is null and parent has an element child"
                    None => {
                        if self.document_element_of(parent).is_some() {
                            return Err(HierarchyError::DoctypeAfterElement);
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// The element branch of step 6: "parent has an element child, child is a
    /// doctype, or child is non-null and a doctype is following child."
    fn check_element_placement(
        &self,
        parent: NodeId,
        child: Option<NodeId>,
    ) -> Result<(), HierarchyError> {
        if self.document_element_of(parent).is_some() {
            return Err(HierarchyError::MultipleDocumentElements);
        }
        if let Some(child) = child {
            let doctype_at_or_after = std::iter::successors(Some(child), |&c| self.next_sibling(c))
                .any(|c| self.as_document_type(c).is_some());
            if doctype_at_or_after {
                return Err(HierarchyError::ElementBeforeDoctype);
            }
        }
        Ok(())
    }

    /// The document a node inserted under `parent` will belong to.
    fn document_of_parent(&self, parent: NodeId) -> NodeId {
        if self.is_document(parent) {
            parent
        } else {
            self.owner_document(parent)
        }
    }

    /// Set the node document of `node`'s inclusive descendants and their
    /// attributes.
    fn adopt_subtree(&mut self, document: NodeId, node: NodeId) {
        if self.owner_document(node) == document {
            return;
        }
        let subtree: Vec<NodeId> = std::iter::once(node)
            .chain(self.descendants(node))
            .collect();
        for id in subtree {
            let attributes = self
                .as_element(id)
                .map(|e| e.attributes.clone())
                .unwrap_or_default();
            self.node_mut(id).owner_document = document;
            for attr in attributes {
                self.node_mut(attr).owner_document = document;
            }
        }
    }

    /// [§ 4.2.3 Insert](https://dom.spec.whatwg.org/#concept-node-insert)
    ///
    /// Link `node` (which must be detached) into `parent` before `reference`,
    /// without validity checks.
    fn insert_unchecked(&mut self, parent: NodeId, node: NodeId, reference: Option<NodeId>) {
        let index = reference
            .and_then(|r| self.children(parent).iter().position(|&c| c == r))
            .unwrap_or_else(|| self.children(parent).len());

        let prev = index.checked_sub(1).map(|i| self.children(parent)[i]);
        let next = self.children(parent).get(index).copied();

        self.node_mut(parent).children.insert(index, node);
        let inserted = self.node_mut(node);
        inserted.parent = Some(parent);
        inserted.prev_sibling = prev;
        inserted.next_sibling = next;
        if let Some(prev) = prev {
            self.node_mut(prev).next_sibling = Some(node);
        }
        if let Some(next) = next {
            self.node_mut(next).prev_sibling = Some(node);
        }

        self.log.push(MutationRecord::Inserted {
            parent,
            node,
            index,
        });
        self.after_child_list_change(parent);
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Unlink `node` from its parent. Does nothing for a detached node.
    pub(crate) fn remove_unchecked(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        let index = self.index_of(node);
        let _ = self.node_mut(parent).children.remove(index);

        let removed = self.node_mut(node);
        let prev = removed.prev_sibling.take();
        let next = removed.next_sibling.take();
        removed.parent = None;
        if let Some(prev) = prev {
            self.node_mut(prev).next_sibling = next;
        }
        if let Some(next) = next {
            self.node_mut(next).prev_sibling = prev;
        }

        self.log.push(MutationRecord::Removed { parent, index });
        self.after_child_list_change(parent);
    }

    /// Keep the document's head/body pointers in step with changes to the
    /// document or to its document element.
    fn after_child_list_change(&mut self, parent: NodeId) {
        let document = self.document_of_parent(parent);
        let touches_pointers =
            parent == document || self.document_element_of(document) == Some(parent);
        if touches_pointers {
            self.refresh_document_pointers(document);
        }
    }

    pub(crate) fn record_attribute_change(&mut self, element: NodeId) {
        self.log.push(MutationRecord::Attribute { element });
    }
}
