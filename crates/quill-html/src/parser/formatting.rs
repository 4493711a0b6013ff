//! [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
//!
//! Pushing with the Noah's Ark clause, reconstruction, clearing to the last
//! marker, and the adoption agency algorithm that closes misnested formatting
//! elements.

use quill_dom::{Namespace, NodeId};

use super::core::{ActiveFormattingElement, HTMLParser};
use super::stack::ScopeKind;
use crate::error::ParseErrorKind;
use crate::tokenizer::{Attribute, Token};

/// "The elements in the formatting category are: a, b, big, code, em, font,
/// i, nobr, s, small, strike, strong, tt, u."
pub(super) const FORMATTING_ELEMENTS: &[&str] = &[
    "a", "b", "big", "code", "em", "font", "i", "nobr", "s", "small", "strike", "strong", "tt",
    "u",
];

impl HTMLParser<'_> {
    /// Index of `node` in the list of active formatting elements.
    pub(super) fn formatting_index_of(&self, node: NodeId) -> Option<usize> {
        self.active_formatting_elements.iter().rposition(
            |entry| matches!(entry, ActiveFormattingElement::Element { node_id, .. } if *node_id == node),
        )
    }

    /// The last element named `tag_name` in the list, searching back only as
    /// far as the last marker.
    pub(super) fn formatting_element_after_last_marker(&self, tag_name: &str) -> Option<NodeId> {
        self.active_formatting_elements
            .iter()
            .rev()
            .take_while(|entry| !matches!(entry, ActiveFormattingElement::Marker))
            .find_map(|entry| match entry {
                ActiveFormattingElement::Element { node_id, .. }
                    if self.is_html(*node_id, tag_name) =>
                {
                    Some(*node_id)
                }
                _ => None,
            })
    }

    fn is_on_stack(&self, node: NodeId) -> bool {
        self.stack_of_open_elements.contains(&node)
    }

    /// "Insert a marker at the end of the list of active formatting elements."
    pub(super) fn insert_marker(&mut self) {
        self.active_formatting_elements
            .push(ActiveFormattingElement::Marker);
    }

    /// [§ 13.2.4.3 Push onto the list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    pub(super) fn push_active_formatting_element(&mut self, node_id: NodeId, token: &Token) {
        // STEP 1: "If there are already three elements in the list of active
        //          formatting elements after the last marker, if any, or
        //          anywhere in the list if there are no markers, that have the
        //          same tag name, namespace, and attributes as element, then
        //          remove the earliest such element from the list of active
        //          formatting elements."
        let mut matching = Vec::new();
        for (index, entry) in self.active_formatting_elements.iter().enumerate().rev() {
            match entry {
                ActiveFormattingElement::Marker => break,
                ActiveFormattingElement::Element { node_id: other, token: other_token } => {
                    if self.same_element_kind(*other, node_id)
                        && same_attributes(other_token.attributes(), token.attributes())
                    {
                        matching.push(index);
                    }
                }
            }
        }
        if matching.len() >= 3
            && let Some(&earliest) = matching.last()
        {
            let _ = self.active_formatting_elements.remove(earliest);
        }

        // STEP 2: "Add element to the list of active formatting elements."
        self.active_formatting_elements
            .push(ActiveFormattingElement::Element {
                node_id,
                token: token.clone(),
            });
    }

    /// Same local name and namespace.
    fn same_element_kind(&self, a: NodeId, b: NodeId) -> bool {
        match (self.tree.as_element(a), self.tree.as_element(b)) {
            (Some(a), Some(b)) => a.local_name == b.local_name && a.namespace == b.namespace,
            _ => false,
        }
    }

    /// [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    pub(super) fn reconstruct_active_formatting_elements(&mut self) {
        // STEP 1: "If there are no entries in the list of active formatting
        //          elements, then there is nothing to reconstruct; stop this
        //          algorithm."
        let Some(last) = self.active_formatting_elements.last() else {
            return;
        };

        // STEP 2: "If the last (most recently added) entry in the list of
        //          active formatting elements is a marker, or if it is an
        //          element that is in the stack of open elements, then there is
        //          nothing to reconstruct; stop this algorithm."
        let needs_reopening = |entry: &ActiveFormattingElement| match entry {
            ActiveFormattingElement::Marker => false,
            ActiveFormattingElement::Element { node_id, .. } => !self.is_on_stack(*node_id),
        };
        if !needs_reopening(last) {
            return;
        }

        // STEP 3-6: Rewind. "If there are no entries before entry in the list
        //           of active formatting elements, then jump to the step
        //           labeled create." "If entry is neither a marker nor an
        //           element that is also in the stack of open elements, go to
        //           the step labeled rewind."
        let mut index = self.active_formatting_elements.len() - 1;
        while index > 0 && needs_reopening(&self.active_formatting_elements[index - 1]) {
            index -= 1;
        }

        // STEP 7-10: Advance and create. "Insert an HTML element for the token
        //            for which the element entry was created, to obtain new
        //            element." "Replace the entry for entry in the list with an
        //            entry for new element." "If the entry for new element in
        //            the list of active formatting elements is not the last
        //            entry in the list, return to the step labeled advance."
        for position in index..self.active_formatting_elements.len() {
            let ActiveFormattingElement::Element { token, .. } =
                &self.active_formatting_elements[position]
            else {
                continue;
            };
            let token = token.clone();
            let new_element = self.insert_html_element(&token);
            self.active_formatting_elements[position] = ActiveFormattingElement::Element {
                node_id: new_element,
                token,
            };
        }
    }

    /// [§ 13.2.4.3 Clear the list of active formatting elements up to the last marker](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    ///
    /// "1. Let entry be the last (most recently added) entry in the list of
    /// active formatting elements. 2. Remove entry from the list of active
    /// formatting elements. 3. If entry was a marker, then stop the algorithm
    /// at this point. 4. Go to step 1."
    pub(super) fn clear_active_formatting_elements_to_last_marker(&mut self) {
        while let Some(entry) = self.active_formatting_elements.pop() {
            if matches!(entry, ActiveFormattingElement::Marker) {
                break;
            }
        }
    }

    /// [§ 13.2.6.4.7 "in body" - Any other end tag](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// 1. "Initialize node to be the current node (the bottommost node of the
    ///    stack)."
    /// 2. "Loop: If node is an HTML element with the same tag name as the
    ///    token, then:" generate implied end tags except for that name, report
    ///    an error if node is not the current node, pop up to and including
    ///    node.
    /// 3. "Otherwise, if node is in the special category, then this is a parse
    ///    error; ignore the token, and return."
    /// 4. "Set node to the previous entry in the stack of open elements and
    ///    return to the step labeled loop."
    ///
    /// End tags inside `svg` and `math` arrive here too, so an element matches
    /// on its local name in any namespace.
    pub(super) fn any_other_end_tag(&mut self, tag_name: &str) {
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.stack_of_open_elements[index];
            if self.get_tag_name(node) == Some(tag_name) {
                self.generate_implied_end_tags_excluding(Some(tag_name));
                if self.current_node() != Some(node) {
                    self.tag_error(ParseErrorKind::MisnestedTag, tag_name);
                }
                self.pop_until_node(node);
                return;
            }
            if self.is_special_element(node) {
                self.tag_error(ParseErrorKind::UnexpectedEndTag, tag_name);
                return;
            }
        }
    }

    /// [§ 13.2.6.4.7 The adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
    ///
    /// "When the steps below require the UA to run the adoption agency
    /// algorithm for a token, the UA must perform the following steps:"
    pub(super) fn run_adoption_agency(&mut self, subject: &str) {
        // STEP 2: "If the current node is an HTML element whose tag name is
        //          subject, and the current node is not in the list of active
        //          formatting elements, then pop the current node off the stack
        //          of open elements and return."
        if let Some(current) = self.current_node()
            && self.is_html(current, subject)
            && self.formatting_index_of(current).is_none()
        {
            let _ = self.stack_of_open_elements.pop();
            return;
        }

        // STEP 3-4: "Let outerLoopCounter be 0." "While true:" with the
        //           counter capped at 8.
        for _ in 0..8 {
            // STEP 4.3: "Let formattingElement be the last element in the list
            //            of active formatting elements that: is between the end
            //            of the list and the last marker in the list, if any, or
            //            the start of the list otherwise, and has the tag name
            //            subject. If there is no such element, then return and
            //            instead act as described in the "any other end tag"
            //            entry above."
            let Some(formatting_element) = self.formatting_element_after_last_marker(subject)
            else {
                self.any_other_end_tag(subject);
                return;
            };

            // STEP 4.4: "If formattingElement is not in the stack of open
            //            elements, then this is a parse error; remove the
            //            element from the list, and return."
            let Some(formatting_stack_index) = self
                .stack_of_open_elements
                .iter()
                .rposition(|&id| id == formatting_element)
            else {
                self.tag_error(ParseErrorKind::MisnestedTag, subject);
                if let Some(index) = self.formatting_index_of(formatting_element) {
                    let _ = self.active_formatting_elements.remove(index);
                }
                return;
            };

            // STEP 4.5: "If formattingElement is in the stack of open elements,
            //            but the element is not in scope, then this is a parse
            //            error; return."
            if !self.has_node_in_scope(formatting_element, ScopeKind::Default) {
                self.tag_error(ParseErrorKind::MisnestedTag, subject);
                return;
            }

            // STEP 4.6: "If formattingElement is not the current node, this is
            //            a parse error. (But do not return.)"
            if self.current_node() != Some(formatting_element) {
                self.tag_error(ParseErrorKind::MisnestedTag, subject);
            }

            // STEP 4.7: "Let furthestBlock be the topmost node in the stack of
            //            open elements that is lower in the stack than
            //            formattingElement, and is an element in the special
            //            category. There might not be one."
            let furthest_block = self.stack_of_open_elements[formatting_stack_index + 1..]
                .iter()
                .copied()
                .find(|&id| self.is_special_element(id));

            // STEP 4.8: "If there is no furthestBlock, then the UA must first
            //            pop all the nodes from the bottom of the stack of open
            //            elements, from the current node up to and including
            //            formattingElement, then remove formattingElement from
            //            the list of active formatting elements, and finally
            //            return."
            let Some(furthest_block) = furthest_block else {
                self.stack_of_open_elements.truncate(formatting_stack_index);
                if let Some(index) = self.formatting_index_of(formatting_element) {
                    let _ = self.active_formatting_elements.remove(index);
                }
                return;
            };

            // STEP 4.9: "Let commonAncestor be the element immediately above
            //            formattingElement in the stack of open elements."
            let common_ancestor = formatting_stack_index
                .checked_sub(1)
                .map_or(NodeId::ROOT, |index| self.stack_of_open_elements[index]);

            // STEP 4.10: "Let a bookmark note the position of formattingElement
            //             in the list of active formatting elements relative to
            //             the elements on either side of it in the list."
            // The bookmark is the index the replacement is inserted at once
            // formattingElement has been taken out of the list.
            let mut bookmark = self.formatting_index_of(formatting_element).unwrap_or(0);

            // STEP 4.11: "Let node and lastNode be furthestBlock."
            let mut node_index = self
                .stack_of_open_elements
                .iter()
                .rposition(|&id| id == furthest_block)
                .unwrap_or(formatting_stack_index + 1);
            let mut last_node = furthest_block;

            // STEP 4.12-13: Inner loop.
            let mut inner_loop_counter = 0;
            loop {
                // STEP 4.13.1: "Increment innerLoopCounter by 1."
                inner_loop_counter += 1;

                // STEP 4.13.2: "Let node be the element immediately above node
                //               in the stack of open elements, or if node is no
                //               longer in the stack of open elements (e.g.
                //               because it got removed by this algorithm), the
                //               element that was immediately above node in the
                //               stack of open elements before node was removed."
                node_index -= 1;
                let node = self.stack_of_open_elements[node_index];

                // STEP 4.13.3: "If node is formattingElement, then break."
                if node == formatting_element {
                    break;
                }

                // STEP 4.13.4: "If innerLoopCounter is greater than 3 and node
                //               is in the list of active formatting elements,
                //               then remove node from the list of active
                //               formatting elements."
                let mut afe_index = self.formatting_index_of(node);
                if inner_loop_counter > 3
                    && let Some(index) = afe_index
                {
                    let _ = self.active_formatting_elements.remove(index);
                    if index < bookmark {
                        bookmark -= 1;
                    }
                    afe_index = None;
                }

                // STEP 4.13.5: "If node is not in the list of active formatting
                //               elements, then remove node from the stack of
                //               open elements and continue."
                let Some(afe_index) = afe_index else {
                    let _ = self.stack_of_open_elements.remove(node_index);
                    continue;
                };

                // STEP 4.13.6: "Create an element for the token for which the
                //               element node was created, in the HTML
                //               namespace, with commonAncestor as the intended
                //               parent; replace the entry for node in the list
                //               of active formatting elements with an entry for
                //               the new element, replace the entry for node in
                //               the stack of open elements with an entry for the
                //               new element, and let node be the new element."
                let ActiveFormattingElement::Element { token, .. } =
                    &self.active_formatting_elements[afe_index]
                else {
                    break;
                };
                let token = token.clone();
                let new_element = self.create_element_for_token(&token, Namespace::Html);
                self.active_formatting_elements[afe_index] = ActiveFormattingElement::Element {
                    node_id: new_element,
                    token,
                };
                self.stack_of_open_elements[node_index] = new_element;

                // STEP 4.13.7: "If lastNode is furthestBlock, then move the
                //               aforementioned bookmark to be immediately after
                //               the new node in the list of active formatting
                //               elements."
                if last_node == furthest_block {
                    bookmark = afe_index + 1;
                }

                // STEP 4.13.8: "Append lastNode to node."
                self.append_to(new_element, last_node);

                // STEP 4.13.9: "Set lastNode to node."
                last_node = new_element;
            }

            // STEP 4.14: "Insert whatever lastNode ended up being in the
            //             appropriate place for inserting a node, but using
            //             commonAncestor as the override target."
            let location = self.appropriate_place_for_inserting(Some(common_ancestor));
            self.insert_at(location, last_node);

            // STEP 4.15: "Create an element for the token for which
            //             formattingElement was created, in the HTML namespace,
            //             with furthestBlock as the intended parent."
            let Some(formatting_afe_index) = self.formatting_index_of(formatting_element) else {
                return;
            };
            let ActiveFormattingElement::Element { token, .. } =
                &self.active_formatting_elements[formatting_afe_index]
            else {
                return;
            };
            let token = token.clone();
            let new_element = self.create_element_for_token(&token, Namespace::Html);

            // STEP 4.16: "Take all of the child nodes of furthestBlock and
            //             append them to the element created in the last step."
            let _ = Self::dom_result(self.tree.move_children(furthest_block, new_element));

            // STEP 4.17: "Append that new element to furthestBlock."
            self.append_to(furthest_block, new_element);

            // STEP 4.18: "Remove formattingElement from the list of active
            //             formatting elements, and insert the new element into
            //             the list of active formatting elements at the position
            //             of the aforementioned bookmark."
            let _ = self.active_formatting_elements.remove(formatting_afe_index);
            if formatting_afe_index < bookmark {
                bookmark -= 1;
            }
            let bookmark = bookmark.min(self.active_formatting_elements.len());
            self.active_formatting_elements.insert(
                bookmark,
                ActiveFormattingElement::Element {
                    node_id: new_element,
                    token,
                },
            );

            // STEP 4.19: "Remove formattingElement from the stack of open
            //             elements, and insert the new element into the stack
            //             of open elements immediately below the position of
            //             furthestBlock in that stack."
            self.remove_from_stack(formatting_element);
            let below_furthest_block = self
                .stack_of_open_elements
                .iter()
                .rposition(|&id| id == furthest_block)
                .map_or(self.stack_of_open_elements.len(), |index| index + 1);
            self.stack_of_open_elements
                .insert(below_furthest_block, new_element);
        }
    }
}

/// Attribute lists compared as sets of (name, value) pairs.
fn same_attributes(a: &[Attribute], b: &[Attribute]) -> bool {
    a.len() == b.len() && a.iter().all(|attribute| b.contains(attribute))
}
