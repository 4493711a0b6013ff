//! [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
//!
//! The appropriate place for inserting a node (with foster parenting and
//! template contents), element creation for tokens, and character and
//! comment insertion.

use quill_dom::{Namespace, NodeId};

use super::core::HTMLParser;
use super::foreign_content::{
    adjust_foreign_attributes, adjust_mathml_attributes, adjust_svg_attributes,
};
use crate::tokenizer::Token;

/// Where a new node goes: inside `parent`, before `before` (or at the end).
pub(super) type InsertionLocation = (NodeId, Option<NodeId>);

impl HTMLParser<'_> {
    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    ///
    /// "The appropriate place for inserting a node, optionally using a
    /// particular override target, is the position in an element returned by
    /// running the following steps:"
    pub(super) fn appropriate_place_for_inserting(
        &self,
        override_target: Option<NodeId>,
    ) -> InsertionLocation {
        // STEP 1: "If there was an override target specified, then let target
        //          be the override target. Otherwise, let target be the
        //          current node."
        let target = override_target
            .or_else(|| self.current_node())
            .unwrap_or(NodeId::ROOT);

        // STEP 2: "Determine the adjusted insertion location using the first
        //          matching steps from the following list:"
        //   "If foster parenting is enabled and target is a table, tbody,
        //    tfoot, thead, or tr element"
        let (parent, before) = if self.foster_parenting
            && self.is_html_one_of(target, &["table", "tbody", "tfoot", "thead", "tr"])
        {
            self.foster_parent_location()
        } else {
            //   "Otherwise: Let adjusted insertion location be inside target,
            //    after its last child (if any)."
            (target, None)
        };

        // STEP 3: "If the adjusted insertion location is inside a template
        //          element, let it instead be inside the template element's
        //          template contents, after its last child (if any)."
        if let Some(contents) = self.tree.template_contents(parent) {
            return (contents, None);
        }

        // STEP 4: "Return the adjusted insertion location."
        (parent, before)
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    ///
    /// The foster parenting branch of the appropriate place for inserting a
    /// node.
    fn foster_parent_location(&self) -> InsertionLocation {
        let last_index_of = |name: &str| {
            self.stack_of_open_elements
                .iter()
                .rposition(|&id| self.is_html(id, name))
        };

        // STEP 2.1: "Let last template be the last template element in the
        //            stack of open elements, if any."
        // STEP 2.2: "Let last table be the last table element in the stack of
        //            open elements, if any."
        let last_template = last_index_of("template");
        let last_table = last_index_of("table");

        match (last_template, last_table) {
            // STEP 2.3: "If there is a last template and either there is no
            //            last table, or there is one, but last template is
            //            lower (more recently added) than last table in the
            //            stack of open elements, then: let adjusted insertion
            //            location be inside last template's template contents,
            //            after its last child (if any), and abort these steps."
            (Some(template), table) if table.is_none_or(|table| template > table) => {
                let template_id = self.stack_of_open_elements[template];
                let contents = self.tree.template_contents(template_id).unwrap_or(template_id);
                (contents, None)
            }
            // STEP 2.4: "If there is no last table, then let adjusted insertion
            //            location be inside the first element in the stack of
            //            open elements (the html element), after its last child
            //            (if any), and abort these steps. (fragment case)"
            (_, None) => (
                self.stack_of_open_elements
                    .first()
                    .copied()
                    .unwrap_or(NodeId::ROOT),
                None,
            ),
            (_, Some(table)) => {
                let table_id = self.stack_of_open_elements[table];
                // STEP 2.5: "If last table has a parent node, then let adjusted
                //            insertion location be inside last table's parent
                //            node, immediately before last table, and abort
                //            these steps."
                if let Some(parent) = self.tree.parent(table_id) {
                    return (parent, Some(table_id));
                }
                // STEP 2.6: "Let previous element be the element immediately
                //            above last table in the stack of open elements."
                // STEP 2.7: "Let adjusted insertion location be inside previous
                //            element, after its last child (if any)."
                let previous = table
                    .checked_sub(1)
                    .map_or(NodeId::ROOT, |index| self.stack_of_open_elements[index]);
                (previous, None)
            }
        }
    }

    /// Insert `node` at `location`.
    pub(super) fn insert_at(&mut self, (parent, before): InsertionLocation, node: NodeId) {
        let _ = Self::dom_result(self.tree.insert_before(parent, node, before));
    }

    /// Append `node` as the last child of `parent`.
    pub(super) fn append_to(&mut self, parent: NodeId, node: NodeId) {
        let _ = Self::dom_result(self.tree.append_child(parent, node));
    }

    /// [§ 13.2.6.1 Create an element for the token](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// Creates the element in the Document and copies the token's attributes
    /// onto it, without inserting it anywhere. Foreign elements get their
    /// attribute names and namespaces adjusted first.
    pub(super) fn create_element_for_token(&mut self, token: &Token, namespace: Namespace) -> NodeId {
        let name = token.tag_name().unwrap_or_default();
        let element = self
            .tree
            .create_element_ns(NodeId::ROOT, Some(namespace), None, name);

        match namespace {
            Namespace::Html => {
                for attribute in token.attributes() {
                    let _ = Self::dom_result(self.tree.set_attribute(
                        element,
                        &attribute.name,
                        &attribute.value,
                    ));
                }
            }
            Namespace::Svg | Namespace::MathMl => {
                let mut attributes = token.attributes().to_vec();
                // "If namespace is the MathML namespace, adjust MathML attributes
                //  for the token. If namespace is the SVG namespace, adjust SVG
                //  attributes for the token."
                if namespace == Namespace::Svg {
                    adjust_svg_attributes(&mut attributes);
                } else {
                    adjust_mathml_attributes(&mut attributes);
                }
                // "Adjust foreign attributes for the token."
                for adjusted in adjust_foreign_attributes(&attributes) {
                    let _ = Self::dom_result(self.tree.set_attribute_ns(
                        element,
                        adjusted.namespace,
                        adjusted.prefix,
                        adjusted.local_name,
                        adjusted.value,
                    ));
                }
            }
            Namespace::XLink | Namespace::Xml | Namespace::Xmlns => {}
        }
        element
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// "When the steps below require the user agent to insert an HTML element
    /// for a token, the user agent must insert a foreign element for the token,
    /// with the HTML namespace and false."
    pub(super) fn insert_html_element(&mut self, token: &Token) -> NodeId {
        self.insert_foreign_element(token, Namespace::Html)
    }

    /// [§ 13.2.6.1 Insert a foreign element](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    pub(super) fn insert_foreign_element(&mut self, token: &Token, namespace: Namespace) -> NodeId {
        // STEP 1: "Let the adjusted insertion location be the appropriate
        //          place for inserting a node."
        let location = self.appropriate_place_for_inserting(None);

        // STEP 2: "Let element be the result of creating an element for the
        //          token given namespace and the element in which the adjusted
        //          insertion location finds itself."
        let element = self.create_element_for_token(token, namespace);

        // STEP 3: "If onlyAddToElementStack is false, then run insert an
        //          element at the adjusted insertion location with element."
        self.insert_at(location, element);

        // STEP 4: "Push element onto the stack of open elements so that it is
        //          the new current node."
        self.stack_of_open_elements.push(element);

        // STEP 5: "Return element."
        element
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "When the steps below require the user agent to insert a character
    /// while processing a token, the user agent must run the following steps:"
    pub(super) fn insert_character(&mut self, c: char) {
        let mut buffer = [0; 4];
        self.insert_text(c.encode_utf8(&mut buffer));
    }

    /// Insert a run of characters at once, with the same merging rules as
    /// [`insert_character`](Self::insert_character).
    pub(super) fn insert_text(&mut self, data: &str) {
        // STEP 2: "Let the adjusted insertion location be the appropriate
        //          place for inserting a node."
        let (parent, before) = self.appropriate_place_for_inserting(None);

        // STEP 3: "If the adjusted insertion location is inside a Document
        //          node, then ignore the token."
        if self.tree.is_document(parent) {
            return;
        }

        // STEP 4: "If there is a Text node immediately before the adjusted
        //          insertion location, then append data to that Text node's
        //          data."
        let adjacent = match before {
            Some(reference) => self.tree.prev_sibling(reference),
            None => self.tree.last_child(parent),
        };
        if let Some(text_node) = adjacent
            && self.tree.as_text(text_node).is_some()
        {
            let _ = Self::dom_result(self.tree.append_data(text_node, data));
            return;
        }

        // "Otherwise, create a new Text node whose data is data and whose node
        //  document is the same as that of the element in which the adjusted
        //  insertion location finds itself, and insert the newly created node
        //  at the adjusted insertion location."
        let text_node = self.tree.create_text_node(NodeId::ROOT, data);
        self.insert_at((parent, before), text_node);
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    ///
    /// "When the steps below require the user agent to insert a comment while
    /// processing a comment token, optionally with an explicitly insertion
    /// position position, the user agent must run the following steps:"
    pub(super) fn insert_comment(&mut self, data: &str, position: Option<NodeId>) {
        // STEP 2: "If position was specified, then let the adjusted insertion
        //          location be position. Otherwise, let adjusted insertion
        //          location be the appropriate place for inserting a node."
        let location = position.map_or_else(
            || self.appropriate_place_for_inserting(None),
            |parent| (parent, None),
        );

        // STEP 3: "Create a Comment node whose data attribute is set to data
        //          and whose node document is the same as that of the node in
        //          which the adjusted insertion location finds itself."
        let comment = self.tree.create_comment(NodeId::ROOT, data);

        // STEP 4: "Insert the newly created node at the adjusted insertion
        //          location."
        self.insert_at(location, comment);
    }

    /// "Insert a comment as the last child of the Document object."
    pub(super) fn insert_comment_to_document(&mut self, data: &str) {
        self.insert_comment(data, Some(NodeId::ROOT));
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// "for each attribute on the token, check to see if the attribute is
    /// already present on the top element of the stack of open elements. If
    /// it is not, add the attribute and its corresponding value to that
    /// element." Used for stray `html` and `body` start tags.
    pub(super) fn merge_attributes_into(&mut self, element: NodeId, token: &Token) {
        for attribute in token.attributes() {
            if !self.tree.has_attribute(element, &attribute.name) {
                let _ = Self::dom_result(self.tree.set_attribute(
                    element,
                    &attribute.name,
                    &attribute.value,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use quill_dom::NodeId;

    use crate::error::DiscardParseErrors;
    use crate::parser::HTMLParser;

    #[test]
    fn test_insert_text_merges_with_previous_text_node() {
        let mut sink = DiscardParseErrors;
        let mut parser = HTMLParser::new("", &mut sink);
        let div = parser.tree.create_element(NodeId::ROOT, "div");
        parser.append_to(NodeId::ROOT, div);
        parser.stack_of_open_elements.push(div);

        parser.insert_text("ab");
        parser.insert_character('c');

        let children = parser.tree.children(div).to_vec();
        assert_eq!(children.len(), 1);
        assert_eq!(parser.tree.as_text(children[0]), Some("abc"));
    }

    #[test]
    fn test_text_directly_under_document_is_dropped() {
        let mut sink = DiscardParseErrors;
        let mut parser = HTMLParser::new("", &mut sink);
        parser.insert_character('x');
        assert!(parser.tree.children(NodeId::ROOT).is_empty());
    }
}
