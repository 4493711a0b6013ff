//! [§ 4.10 Interface CharacterData](https://dom.spec.whatwg.org/#interface-characterdata)
//!
//! Offsets and counts are in Unicode scalar values, not UTF-16 code units.

use crate::error::DomError;
use crate::node::{NodeId, NodeType};
use crate::tree::DomTree;

impl DomTree {
    /// [§ 4.10 `data`](https://dom.spec.whatwg.org/#dom-characterdata-data)
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotCharacterData`] for any node that is not Text,
    /// Comment or `ProcessingInstruction`.
    pub fn data(&self, node: NodeId) -> Result<&str, DomError> {
        match self.get(node).map(|n| &n.node_type) {
            Some(NodeType::Text(data) | NodeType::Comment(data)) => Ok(data),
            Some(NodeType::ProcessingInstruction(pi)) => Ok(&pi.data),
            _ => Err(DomError::NotCharacterData(node)),
        }
    }

    /// [§ 4.10 `length`](https://dom.spec.whatwg.org/#dom-node-length)
    ///
    /// # Errors
    ///
    /// Same as [`data`](Self::data).
    pub fn length(&self, node: NodeId) -> Result<usize, DomError> {
        Ok(self.data(node)?.chars().count())
    }

    /// [§ 4.10 Substring data](https://dom.spec.whatwg.org/#concept-cd-substring)
    ///
    /// "If offset is greater than length, then throw an "IndexSizeError"
    /// DOMException." A count reaching past the end is clamped.
    ///
    /// # Errors
    ///
    /// [`DomError::IndexSize`] for an out-of-range offset, or
    /// [`DomError::NotCharacterData`].
    pub fn substring_data(
        &self,
        node: NodeId,
        offset: usize,
        count: usize,
    ) -> Result<String, DomError> {
        let data = self.data(node)?;
        let (start, end) = char_range(data, offset, count)?;
        Ok(data[start..end].to_string())
    }

    /// [§ 4.10 `appendData(data)`](https://dom.spec.whatwg.org/#dom-characterdata-appenddata)
    ///
    /// # Errors
    ///
    /// [`DomError::NotCharacterData`].
    pub fn append_data(&mut self, node: NodeId, data: &str) -> Result<(), DomError> {
        // Same as replacing zero units at `length`, without counting the units.
        self.data_mut(node)
            .ok_or(DomError::NotCharacterData(node))?
            .push_str(data);
        Ok(())
    }

    /// [§ 4.10 `insertData(offset, data)`](https://dom.spec.whatwg.org/#dom-characterdata-insertdata)
    ///
    /// # Errors
    ///
    /// Same as [`replace_data`](Self::replace_data).
    pub fn insert_data(&mut self, node: NodeId, offset: usize, data: &str) -> Result<(), DomError> {
        self.replace_data(node, offset, 0, data)
    }

    /// [§ 4.10 `deleteData(offset, count)`](https://dom.spec.whatwg.org/#dom-characterdata-deletedata)
    ///
    /// # Errors
    ///
    /// Same as [`replace_data`](Self::replace_data).
    pub fn delete_data(&mut self, node: NodeId, offset: usize, count: usize) -> Result<(), DomError> {
        self.replace_data(node, offset, count, "")
    }

    /// [§ 4.10 Replace data](https://dom.spec.whatwg.org/#concept-cd-replace)
    ///
    /// # Errors
    ///
    /// [`DomError::IndexSize`] when `offset` is past the end of the data, or
    /// [`DomError::NotCharacterData`]. The node is unchanged on error.
    pub fn replace_data(
        &mut self,
        node: NodeId,
        offset: usize,
        count: usize,
        data: &str,
    ) -> Result<(), DomError> {
        let (start, end) = char_range(self.data(node)?, offset, count)?;
        if let Some(target) = self.data_mut(node) {
            target.replace_range(start..end, data);
        }
        Ok(())
    }

    /// Replace the whole data of a character data node.
    ///
    /// # Errors
    ///
    /// [`DomError::NotCharacterData`].
    pub fn set_data(&mut self, node: NodeId, data: &str) -> Result<(), DomError> {
        let target = self
            .data_mut(node)
            .ok_or(DomError::NotCharacterData(node))?;
        data.clone_into(target);
        Ok(())
    }

    fn data_mut(&mut self, node: NodeId) -> Option<&mut String> {
        match &mut self.nodes.get_mut(node.0)?.node_type {
            NodeType::Text(data) | NodeType::Comment(data) => Some(data),
            NodeType::ProcessingInstruction(pi) => Some(&mut pi.data),
            _ => None,
        }
    }
}

/// Map a scalar-value `(offset, count)` pair to a byte range of `data`,
/// clamping `count` to the end.
fn char_range(data: &str, offset: usize, count: usize) -> Result<(usize, usize), DomError> {
    let length = data.chars().count();
    if offset > length {
        return Err(DomError::IndexSize { offset, length });
    }
    let byte_at = |chars: usize| {
        data.char_indices()
            .nth(chars)
            .map_or(data.len(), |(byte, _)| byte)
    };
    let start = byte_at(offset);
    let end = byte_at(offset.saturating_add(count).min(length));
    Ok((start, end))
}
