//! [§ 4.2.10.2 Interface HTMLCollection](https://dom.spec.whatwg.org/#interface-htmlcollection)
//!
//! "A collection is an object that represents a list of nodes. A collection
//! can be either live or static. Unless otherwise stated, a collection must be
//! live."
//!
//! A collection is filled lazily: it only scans as far into the tree as the
//! last access needed, and keeps the matches it found. Before each access it
//! replays the tree's mutation log so the cached prefix stays valid without a
//! full rescan.

use core::cmp::Ordering;

use crate::mutation::MutationRecord;
use crate::node::{Namespace, NodeId, QuirksMode};
use crate::tree::DomTree;

/// Which elements a collection contains.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Filter {
    /// Every element.
    AllElements,
    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-getelementsbytagname)
    /// Elements whose qualified name is `name`; HTML elements in HTML
    /// documents are compared against `lowercase` instead.
    QualifiedName { name: String, lowercase: String },
    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-getelementsbyclassname)
    /// Elements carrying every one of the classes. An empty set matches
    /// nothing.
    ClassNames(Vec<String>),
}

/// Scan state plus the cached matches.
#[derive(Debug, Clone)]
enum Cache {
    /// Element children of the root. `cursor` is how many children have
    /// been scanned; each match remembers its child index.
    Children {
        cursor: usize,
        matches: Vec<(usize, NodeId)>,
    },
    /// Element descendants of the root in tree order. Scanning resumes after
    /// the last cached match.
    Descendants { matches: Vec<NodeId>, complete: bool },
}

/// A live, tree-ordered view of elements under a root node.
///
/// The collection does not borrow the tree; every accessor takes the
/// [`DomTree`] it was created for.
#[derive(Debug, Clone)]
pub struct HtmlCollection {
    root: NodeId,
    filter: Filter,
    cache: Cache,
    seen_version: usize,
}

impl HtmlCollection {
    /// [§ 4.2.6 `children`](https://dom.spec.whatwg.org/#dom-parentnode-children)
    ///
    /// "The children getter steps are to return an HTMLCollection collection
    /// rooted at this matching only element children."
    #[must_use]
    pub fn children(tree: &DomTree, parent: NodeId) -> Self {
        Self::new(
            tree,
            parent,
            Filter::AllElements,
            Cache::Children {
                cursor: 0,
                matches: Vec::new(),
            },
        )
    }

    /// [§ 4.4 list of elements with qualified name](https://dom.spec.whatwg.org/#concept-getelementsbytagname)
    ///
    /// "If qualifiedName is U+002A (*), return a HTMLCollection rooted at root,
    /// whose filter matches only descendant elements."
    #[must_use]
    pub fn by_tag_name(tree: &DomTree, root: NodeId, qualified_name: &str) -> Self {
        let filter = if qualified_name == "*" {
            Filter::AllElements
        } else {
            Filter::QualifiedName {
                name: qualified_name.to_string(),
                lowercase: qualified_name.to_ascii_lowercase(),
            }
        };
        Self::new(tree, root, filter, Self::descendants_cache())
    }

    /// [§ 4.4 list of elements with class names](https://dom.spec.whatwg.org/#concept-getelementsbyclassname)
    ///
    /// `class_names` is split on ASCII whitespace.
    #[must_use]
    pub fn by_class_name(tree: &DomTree, root: NodeId, class_names: &str) -> Self {
        let mut classes: Vec<String> = Vec::new();
        for class in class_names.split_ascii_whitespace() {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        }
        Self::new(
            tree,
            root,
            Filter::ClassNames(classes),
            Self::descendants_cache(),
        )
    }

    const fn descendants_cache() -> Cache {
        Cache::Descendants {
            matches: Vec::new(),
            complete: false,
        }
    }

    fn new(tree: &DomTree, root: NodeId, filter: Filter, cache: Cache) -> Self {
        Self {
            root,
            filter,
            cache,
            seen_version: tree.version(),
        }
    }

    /// The node the collection is rooted at.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// [§ 4.2.10.2 `length`](https://dom.spec.whatwg.org/#dom-htmlcollection-length)
    pub fn len(&mut self, tree: &DomTree) -> usize {
        self.sync(tree);
        self.fill(tree, usize::MAX);
        self.match_count()
    }

    /// True if the collection has no elements. Scans only up to the first match.
    pub fn is_empty(&mut self, tree: &DomTree) -> bool {
        self.item(tree, 0).is_none()
    }

    /// [§ 4.2.10.2 `item(index)`](https://dom.spec.whatwg.org/#dom-htmlcollection-item)
    ///
    /// "The item(index) method steps are to return the indexth element in the
    /// collection. If there is no indexth element in the collection, then the
    /// method must return null."
    pub fn item(&mut self, tree: &DomTree, index: usize) -> Option<NodeId> {
        self.sync(tree);
        self.fill(tree, index.saturating_add(1));
        match &self.cache {
            Cache::Children { matches, .. } => matches.get(index).map(|&(_, id)| id),
            Cache::Descendants { matches, .. } => matches.get(index).copied(),
        }
    }

    /// [§ 4.2.10.2 `namedItem(key)`](https://dom.spec.whatwg.org/#dom-htmlcollection-nameditem)
    ///
    /// STEP 1: "If key is the empty string, return null."
    /// STEP 2: "Return the first element in the collection for which at least
    ///          one of the following is true: it has an ID which is key; it is
    ///          in the HTML namespace and has a name attribute whose value is
    ///          key"
    pub fn named_item(&mut self, tree: &DomTree, key: &str) -> Option<NodeId> {
        if key.is_empty() {
            return None;
        }
        self.to_vec(tree).into_iter().find(|&id| {
            tree.element_id(id) == Some(key)
                || (tree
                    .as_element(id)
                    .is_some_and(|e| e.namespace == Some(Namespace::Html))
                    && tree.get_attribute(id, "name") == Some(key))
        })
    }

    /// Snapshot of every element currently in the collection.
    pub fn to_vec(&mut self, tree: &DomTree) -> Vec<NodeId> {
        let len = self.len(tree);
        (0..len).filter_map(|i| self.item(tree, i)).collect()
    }

    fn match_count(&self) -> usize {
        match &self.cache {
            Cache::Children { matches, .. } => matches.len(),
            Cache::Descendants { matches, .. } => matches.len(),
        }
    }

    // ===== Keeping the cache valid =====

    /// Replay every mutation since the last access.
    fn sync(&mut self, tree: &DomTree) {
        if self.seen_version == tree.version() {
            return;
        }
        match tree.log.since(self.seen_version) {
            Some(records) => {
                for &record in records {
                    self.apply(tree, record);
                }
            }
            None => self.reset(),
        }
        self.seen_version = tree.version();
    }

    fn reset(&mut self) {
        self.cache = match self.cache {
            Cache::Children { .. } => Cache::Children {
                cursor: 0,
                matches: Vec::new(),
            },
            Cache::Descendants { .. } => Self::descendants_cache(),
        };
    }

    fn apply(&mut self, tree: &DomTree, record: MutationRecord) {
        let class_filter = matches!(self.filter, Filter::ClassNames(_));
        let mut needs_reset = false;
        match (&mut self.cache, record) {
            (
                Cache::Children { cursor, matches },
                MutationRecord::Inserted {
                    parent,
                    node,
                    index,
                },
            ) if parent == self.root => {
                // Insertions at or past the cursor land in the unscanned part.
                if index >= *cursor {
                    return;
                }
                *cursor += 1;
                for entry in matches.iter_mut().filter(|(i, _)| *i >= index) {
                    entry.0 += 1;
                }
                if matches_filter(tree, &self.filter, node) {
                    let at = matches.partition_point(|&(i, _)| i < index);
                    matches.insert(at, (index, node));
                }
            }
            (Cache::Children { cursor, matches }, MutationRecord::Removed { parent, index })
                if parent == self.root =>
            {
                if index >= *cursor {
                    return;
                }
                *cursor -= 1;
                matches.retain(|&(i, _)| i != index);
                for entry in matches.iter_mut().filter(|(i, _)| *i > index) {
                    entry.0 -= 1;
                }
            }
            (Cache::Children { .. }, MutationRecord::Attribute { element }) => {
                needs_reset = class_filter && tree.parent(element) == Some(self.root);
            }
            (Cache::Children { .. }, _) => {}
            (
                Cache::Descendants { matches, complete },
                MutationRecord::Inserted { parent, .. } | MutationRecord::Removed { parent, .. },
            ) => {
                if tree.is_inclusive_ancestor_of(self.root, parent) {
                    // Everything after `parent` in tree order may have moved;
                    // `parent` itself and what precedes it has not.
                    matches.retain(|&id| {
                        tree.compare_tree_order(id, parent)
                            .is_some_and(|order| order != Ordering::Greater)
                    });
                    *complete = false;
                }
            }
            (Cache::Descendants { matches, complete }, MutationRecord::Attribute { element }) => {
                if class_filter && tree.is_descendant_of(element, self.root) {
                    matches.retain(|&id| {
                        tree.compare_tree_order(id, element) == Some(Ordering::Less)
                    });
                    *complete = false;
                }
            }
        }
        if needs_reset {
            self.reset();
        }
    }

    /// Scan until `want` matches are cached or the source is exhausted.
    fn fill(&mut self, tree: &DomTree, want: usize) {
        match &mut self.cache {
            Cache::Children { cursor, matches } => {
                let children = tree.children(self.root);
                while matches.len() < want && *cursor < children.len() {
                    let child = children[*cursor];
                    if matches_filter(tree, &self.filter, child) {
                        matches.push((*cursor, child));
                    }
                    *cursor += 1;
                }
            }
            Cache::Descendants { matches, complete } => {
                if *complete {
                    return;
                }
                let mut next = match matches.last() {
                    Some(&last) => tree.next_in_tree_order(self.root, last),
                    None => tree.first_child(self.root),
                };
                while matches.len() < want {
                    let Some(id) = next else {
                        *complete = true;
                        return;
                    };
                    if matches_filter(tree, &self.filter, id) {
                        matches.push(id);
                    }
                    next = tree.next_in_tree_order(self.root, id);
                }
            }
        }
    }
}

fn matches_filter(tree: &DomTree, filter: &Filter, id: NodeId) -> bool {
    let Some(element) = tree.as_element(id) else {
        return false;
    };
    match filter {
        Filter::AllElements => true,
        Filter::QualifiedName { name, lowercase } => {
            let document = tree.owner_document(id);
            let html = element.namespace == Some(Namespace::Html)
                && tree.as_document(document).is_some_and(|d| d.is_html);
            let qualified = element.qualified_name();
            if html {
                qualified == *lowercase
            } else {
                qualified == *name
            }
        }
        Filter::ClassNames(classes) => {
            if classes.is_empty() {
                return false;
            }
            // "If root's node document's mode is "quirks", then the comparison
            //  for the classes must be done in an ASCII case-insensitive manner"
            let quirks = tree.quirks_mode(tree.owner_document(id)) == QuirksMode::Quirks;
            let own = tree.class_list(id);
            classes.iter().all(|wanted| {
                own.iter().any(|have| {
                    if quirks {
                        have.eq_ignore_ascii_case(wanted)
                    } else {
                        have == wanted
                    }
                })
            })
        }
    }
}

impl DomTree {
    /// [§ 4.5 `getElementsByTagName(qualifiedName)`](https://dom.spec.whatwg.org/#dom-document-getelementsbytagname)
    #[must_use]
    pub fn get_elements_by_tag_name(&self, root: NodeId, qualified_name: &str) -> HtmlCollection {
        HtmlCollection::by_tag_name(self, root, qualified_name)
    }

    /// [§ 4.5 `getElementsByClassName(classNames)`](https://dom.spec.whatwg.org/#dom-document-getelementsbyclassname)
    #[must_use]
    pub fn get_elements_by_class_name(&self, root: NodeId, class_names: &str) -> HtmlCollection {
        HtmlCollection::by_class_name(self, root, class_names)
    }

    /// [§ 4.2.6 `children`](https://dom.spec.whatwg.org/#dom-parentnode-children)
    #[must_use]
    pub fn children_collection(&self, parent: NodeId) -> HtmlCollection {
        HtmlCollection::children(self, parent)
    }
}
