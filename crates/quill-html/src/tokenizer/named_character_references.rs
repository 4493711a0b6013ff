//! Named character reference trie.
//!
//! [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
//!
//! "Consume the maximum number of characters possible, where the consumed
//! characters are one of the identifiers in the named character references
//! table."
//!
//! The table holds both `amp;` and the legacy `amp`, so a walk down the trie
//! passes several terminal nodes; the longest one reached wins.

use std::sync::LazyLock;

use super::entities::NAMED_CHARACTER_REFERENCES;

/// Index of a node in the [`ReferenceTrie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieNodeId(usize);

#[derive(Debug, Default)]
struct TrieNode {
    /// Outgoing edges, sorted by character.
    children: Vec<(char, TrieNodeId)>,
    /// Replacement text if the path to this node is a complete name.
    value: Option<&'static str>,
}

/// A successful longest-match walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceMatch {
    /// Characters of the name consumed, excluding the `&`.
    pub length: usize,
    /// The replacement text (one or two characters).
    pub value: &'static str,
    /// True if the matched name ends in `;`.
    pub has_semicolon: bool,
}

/// Immutable prefix tree over every named character reference.
#[derive(Debug)]
pub struct ReferenceTrie {
    nodes: Vec<TrieNode>,
}

static REFERENCE_TRIE: LazyLock<ReferenceTrie> =
    LazyLock::new(|| ReferenceTrie::build(NAMED_CHARACTER_REFERENCES));

/// The process-wide trie, built on first use.
#[must_use]
pub fn reference_trie() -> &'static ReferenceTrie {
    &REFERENCE_TRIE
}

impl ReferenceTrie {
    fn build(table: &[(&str, &'static str)]) -> Self {
        let mut trie = Self {
            nodes: vec![TrieNode::default()],
        };
        for &(name, value) in table {
            let mut node = trie.root();
            for c in name.chars() {
                node = trie.child_or_insert(node, c);
            }
            trie.nodes[node.0].value = Some(value);
        }
        trie
    }

    fn child_or_insert(&mut self, node: TrieNodeId, c: char) -> TrieNodeId {
        match self.nodes[node.0]
            .children
            .binary_search_by_key(&c, |&(edge, _)| edge)
        {
            Ok(found) => self.nodes[node.0].children[found].1,
            Err(at) => {
                let child = TrieNodeId(self.nodes.len());
                self.nodes.push(TrieNode::default());
                self.nodes[node.0].children.insert(at, (c, child));
                child
            }
        }
    }

    /// The empty-name node.
    #[must_use]
    pub const fn root(&self) -> TrieNodeId {
        TrieNodeId(0)
    }

    /// Follow the edge labelled `c`, if any.
    #[must_use]
    pub fn step(&self, node: TrieNodeId, c: char) -> Option<TrieNodeId> {
        let children = &self.nodes[node.0].children;
        children
            .binary_search_by_key(&c, |&(edge, _)| edge)
            .ok()
            .map(|i| children[i].1)
    }

    /// The replacement text if `node` completes a name.
    #[must_use]
    pub fn value(&self, node: TrieNodeId) -> Option<&'static str> {
        self.nodes[node.0].value
    }

    /// True if some name continues past `node`.
    #[must_use]
    pub fn has_children(&self, node: TrieNodeId) -> bool {
        !self.nodes[node.0].children.is_empty()
    }

    /// Exact lookup of a name (without the `&`).
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'static str> {
        let mut node = self.root();
        for c in name.chars() {
            node = self.step(node, c)?;
        }
        self.value(node)
    }

    /// True if any name starts with `prefix`.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        let mut node = self.root();
        for c in prefix.chars() {
            match self.step(node, c) {
                Some(next) => node = next,
                None => return false,
            }
        }
        true
    }

    /// Walk `chars` one at a time, remembering the last complete name seen,
    /// and stop at the first dead end.
    pub fn longest_match(&self, chars: impl IntoIterator<Item = char>) -> Option<ReferenceMatch> {
        let mut node = self.root();
        let mut best = None;
        for (i, c) in chars.into_iter().enumerate() {
            let Some(next) = self.step(node, c) else {
                break;
            };
            node = next;
            if let Some(value) = self.value(node) {
                best = Some(ReferenceMatch {
                    length: i + 1,
                    value,
                    has_semicolon: c == ';',
                });
            }
            if !self.has_children(node) {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trie_holds_every_entry() {
        let trie = reference_trie();
        for &(name, value) in NAMED_CHARACTER_REFERENCES {
            assert_eq!(trie.lookup(name), Some(value), "entry {name}");
        }
    }

    #[test]
    fn test_longest_match_prefers_semicolon_form() {
        let found = reference_trie().longest_match("notin;x".chars());
        assert_eq!(
            found,
            Some(ReferenceMatch {
                length: 6,
                value: "\u{2209}",
                has_semicolon: true,
            })
        );
    }

    #[test]
    fn test_longest_match_falls_back_to_legacy_prefix() {
        // "notit;" is not a name, but the legacy "not" is.
        let found = reference_trie().longest_match("notit;".chars());
        assert_eq!(found.map(|m| (m.length, m.value)), Some((3, "\u{AC}")));
    }
}
