//! [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
//! attribute methods.
//!
//! Attributes are Attr nodes in the arena, listed in insertion order on their
//! element and owned by exactly that element.

use crate::error::DomError;
use crate::node::{AttrData, Namespace, NodeId, NodeType};
use crate::tree::DomTree;

impl DomTree {
    /// The element's Attr nodes in insertion order (empty for non-elements).
    #[must_use]
    pub fn attributes(&self, element: NodeId) -> &[NodeId] {
        self.as_element(element)
            .map_or(&[], |e| e.attributes.as_slice())
    }

    /// Iterate over `(qualified name, value)` pairs of an element's attributes.
    pub fn attribute_pairs(&self, element: NodeId) -> impl Iterator<Item = (String, &str)> + '_ {
        self.attributes(element)
            .iter()
            .filter_map(|&id| self.as_attr(id))
            .map(|attr| (attr.qualified_name(), attr.value.as_str()))
    }

    /// [§ 4.9](https://dom.spec.whatwg.org/#concept-element-attributes-get-by-name)
    /// "To get an attribute by name given a qualifiedName and element"
    ///
    /// "If element is in the HTML namespace and its node document is an HTML
    /// document, then set qualifiedName to qualifiedName in ASCII lowercase."
    /// "Return the first attribute in element's attribute list whose qualified
    /// name is qualifiedName; otherwise null."
    #[must_use]
    pub fn attribute_node(&self, element: NodeId, qualified_name: &str) -> Option<NodeId> {
        let name = self.normalize_attribute_name(element, qualified_name);
        self.attributes(element).iter().copied().find(|&id| {
            self.as_attr(id)
                .is_some_and(|attr| attr.has_qualified_name(&name))
        })
    }

    /// [§ 4.9](https://dom.spec.whatwg.org/#concept-element-attributes-get-by-namespace)
    /// "To get an attribute by namespace and local name"
    #[must_use]
    pub fn attribute_node_ns(
        &self,
        element: NodeId,
        namespace: Option<Namespace>,
        local_name: &str,
    ) -> Option<NodeId> {
        self.attributes(element).iter().copied().find(|&id| {
            self.as_attr(id)
                .is_some_and(|attr| attr.namespace == namespace && attr.local_name == local_name)
        })
    }

    /// [§ 4.9 `getAttribute(qualifiedName)`](https://dom.spec.whatwg.org/#dom-element-getattribute)
    #[must_use]
    pub fn get_attribute(&self, element: NodeId, qualified_name: &str) -> Option<&str> {
        self.attribute_node(element, qualified_name)
            .and_then(|id| self.as_attr(id))
            .map(|attr| attr.value.as_str())
    }

    /// [§ 4.9 `getAttributeNS(namespace, localName)`](https://dom.spec.whatwg.org/#dom-element-getattributens)
    #[must_use]
    pub fn get_attribute_ns(
        &self,
        element: NodeId,
        namespace: Option<Namespace>,
        local_name: &str,
    ) -> Option<&str> {
        self.attribute_node_ns(element, namespace, local_name)
            .and_then(|id| self.as_attr(id))
            .map(|attr| attr.value.as_str())
    }

    /// [§ 4.9 `hasAttribute(qualifiedName)`](https://dom.spec.whatwg.org/#dom-element-hasattribute)
    #[must_use]
    pub fn has_attribute(&self, element: NodeId, qualified_name: &str) -> bool {
        self.attribute_node(element, qualified_name).is_some()
    }

    /// [§ 4.9 `setAttribute(qualifiedName, value)`](https://dom.spec.whatwg.org/#dom-element-setattribute)
    ///
    /// Changes the value of an existing attribute in place, or appends a new
    /// attribute with a null namespace.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAnElement`] if `element` is not an element.
    pub fn set_attribute(
        &mut self,
        element: NodeId,
        qualified_name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        if !self.is_element(element) {
            return Err(DomError::NotAnElement(element));
        }
        // STEP 3: "Let attribute be the first attribute in this's attribute
        //          list whose qualified name is qualifiedName, and null otherwise."
        if let Some(existing) = self.attribute_node(element, qualified_name) {
            // STEP 5: "Change attribute to value."
            self.change_attribute_value(element, existing, value);
            return Ok(());
        }
        // STEP 4: "If attribute is null, create an attribute whose local name is
        //          qualifiedName, value is value, and node document is this's
        //          node document, then append this attribute to this"
        let local_name = self.normalize_attribute_name(element, qualified_name);
        self.append_attribute(
            element,
            AttrData {
                namespace: None,
                prefix: None,
                local_name,
                value: value.to_string(),
                owner_element: None,
            },
        );
        Ok(())
    }

    /// [§ 4.9 `setAttributeNS(namespace, qualifiedName, value)`](https://dom.spec.whatwg.org/#dom-element-setattributens)
    ///
    /// Attributes are unique by (namespace, local name); an existing match has
    /// its value changed and keeps its position.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAnElement`] if `element` is not an element.
    pub fn set_attribute_ns(
        &mut self,
        element: NodeId,
        namespace: Option<Namespace>,
        prefix: Option<&str>,
        local_name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        if !self.is_element(element) {
            return Err(DomError::NotAnElement(element));
        }
        if let Some(existing) = self.attribute_node_ns(element, namespace, local_name) {
            self.change_attribute_value(element, existing, value);
            return Ok(());
        }
        self.append_attribute(
            element,
            AttrData {
                namespace,
                prefix: prefix.map(str::to_string),
                local_name: local_name.to_string(),
                value: value.to_string(),
                owner_element: None,
            },
        );
        Ok(())
    }

    /// [§ 4.9 `removeAttribute(qualifiedName)`](https://dom.spec.whatwg.org/#dom-element-removeattribute)
    ///
    /// Returns the detached Attr node, if one was removed. Its
    /// `owner_element` is cleared.
    pub fn remove_attribute(&mut self, element: NodeId, qualified_name: &str) -> Option<NodeId> {
        let attr = self.attribute_node(element, qualified_name)?;
        if let Some(data) = self.element_data_mut(element) {
            data.attributes.retain(|&id| id != attr);
        }
        if let NodeType::Attr(data) = &mut self.node_mut(attr).node_type {
            data.owner_element = None;
        }
        self.record_attribute_change(element);
        Some(attr)
    }

    /// [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#the-id-attribute)
    ///
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn element_id(&self, element: NodeId) -> Option<&str> {
        self.get_attribute(element, "id")
    }

    /// [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#classes)
    ///
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens representing the various classes that the
    /// element belongs to."
    #[must_use]
    pub fn class_list(&self, element: NodeId) -> Vec<&str> {
        self.get_attribute(element, "class")
            .map(|classes| classes.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    fn append_attribute(&mut self, element: NodeId, mut data: AttrData) {
        data.owner_element = Some(element);
        let document = self.owner_document(element);
        let attr = self.create_attr(document, data);
        if let Some(element_data) = self.element_data_mut(element) {
            element_data.attributes.push(attr);
        }
        self.record_attribute_change(element);
    }

    fn change_attribute_value(&mut self, element: NodeId, attr: NodeId, value: &str) {
        if let NodeType::Attr(data) = &mut self.node_mut(attr).node_type {
            value.clone_into(&mut data.value);
        }
        self.record_attribute_change(element);
    }

    fn normalize_attribute_name(&self, element: NodeId, qualified_name: &str) -> String {
        let html_element = self
            .as_element(element)
            .is_some_and(|e| e.namespace == Some(Namespace::Html));
        let html_document = self
            .as_document(self.owner_document(element))
            .is_some_and(|d| d.is_html);
        if html_element && html_document {
            qualified_name.to_ascii_lowercase()
        } else {
            qualified_name.to_string()
        }
    }
}
