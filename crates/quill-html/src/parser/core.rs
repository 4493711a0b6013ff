//! Tree construction driver.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The parser pulls one token at a time from the tokenizer, dispatches it on
//! the current insertion mode and mutates the [`DomTree`]. The per-mode rules
//! live in [`super::modes`]; the shared algorithms (insertion locations, the
//! stack of open elements, active formatting elements) live in the sibling
//! modules.

use strum_macros::Display;

use quill_common::warning::warn_once;
use quill_dom::{DomError, DomTree, Namespace, NodeId};

use crate::error::{ParseError, ParseErrorKind, ParseErrorSink};
use crate::tokenizer::{HTMLTokenizer, Token, TokenizerState};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    InTemplate,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
///
/// "The list contains elements in the formatting category, and markers."
#[derive(Debug, Clone)]
pub(super) enum ActiveFormattingElement {
    /// A formatting element together with the token it was created for, so
    /// it can be recreated by reconstruction or the adoption agency.
    Element {
        /// The element in the tree.
        node_id: NodeId,
        /// "the token for which the element was created"
        token: Token,
    },
    /// "Markers are inserted when entering applet, object, marquee, template,
    /// td, th, and caption elements, and are used to prevent formatting from
    /// 'leaking' into applet, object, marquee, template, td, th, and caption
    /// elements."
    Marker,
}

/// Outcome of running one insertion mode's rules for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    /// The token has been consumed.
    Done,
    /// "Reprocess the token": the mode was switched and the same token must
    /// be dispatched again.
    Reprocess,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// The HTML tree constructor. Owns the tokenizer that feeds it and the tree it
/// builds; parse errors go to the sink it was created with.
pub struct HTMLParser<'a> {
    /// Token source. The parser switches its state for RCDATA, RAWTEXT,
    /// script data and PLAINTEXT elements.
    pub(super) tokenizer: HTMLTokenizer,

    /// Where tokenizer and tree construction errors are reported.
    pub(super) sink: &'a mut dyn ParseErrorSink,

    /// The tree under construction. The Document is [`NodeId::ROOT`].
    pub(super) tree: DomTree,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(super) insertion_mode: InsertionMode,

    /// "When the insertion mode is switched to "text" or "in table text", the
    /// original insertion mode is also set. This is the insertion mode to
    /// which the tree construction stage will return."
    pub(super) original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes)
    /// "The stack of template insertion modes"
    pub(super) template_insertion_modes: Vec<InsertionMode>,

    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// "Initially, the stack of open elements is empty. The stack grows
    /// downwards; the topmost node on the stack is the first one added to the
    /// stack, and the bottommost node of the stack is the most recently added
    /// node in the stack."
    pub(super) stack_of_open_elements: Vec<NodeId>,

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(super) active_formatting_elements: Vec<ActiveFormattingElement>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#head-element-pointer)
    ///
    /// "Once a head element has been parsed (whether implicitly or explicitly)
    /// the head element pointer gets set to point to this node."
    pub(super) head_element_pointer: Option<NodeId>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#form-element-pointer)
    ///
    /// "The form element pointer points to the last form element that was
    /// opened and whose end tag has not yet been seen."
    pub(super) form_element_pointer: Option<NodeId>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    ///
    /// "The scripting flag is set to "enabled" if scripting was enabled for
    /// the Document with which the parser is associated when the parser was
    /// created, and "disabled" otherwise."
    pub(super) scripting: bool,

    /// [§ 13.2.4.5](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    ///
    /// "The frameset-ok flag is set to "ok" when the parser is created. It is
    /// set to "not ok" after certain tokens are seen."
    pub(super) frameset_ok: bool,

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    ///
    /// Set while the "in table" anything-else rules process a token using
    /// the "in body" rules.
    pub(super) foster_parenting: bool,

    /// "If the next token is a U+000A LINE FEED (LF) character token, then
    /// ignore that token and move on to the next one." Set after `pre`,
    /// `listing` and `textarea` start tags.
    pub(super) skip_next_newline: bool,

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#concept-pending-table-char-tokens)
    ///
    /// "The pending table character tokens list"
    pub(super) pending_table_character_tokens: String,

    /// Whether the start tag being processed had its self-closing flag
    /// acknowledged.
    pub(super) self_closing_acknowledged: bool,

    /// Set by "stop parsing".
    pub(super) stopped: bool,
}

impl<'a> HTMLParser<'a> {
    /// Create a parser for `input` that reports parse errors to `sink`.
    ///
    /// The tokenizer's own content model switching is turned off: the parser
    /// decides when to enter RCDATA, RAWTEXT, script data or PLAINTEXT.
    #[must_use]
    pub fn new(input: &str, sink: &'a mut dyn ParseErrorSink) -> Self {
        Self {
            tokenizer: HTMLTokenizer::new(input).with_content_model_switching(false),
            sink,
            tree: DomTree::new(),
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            template_insertion_modes: Vec::new(),
            stack_of_open_elements: Vec::new(),
            active_formatting_elements: Vec::new(),
            head_element_pointer: None,
            form_element_pointer: None,
            scripting: false,
            frameset_ok: true,
            foster_parenting: false,
            skip_next_newline: false,
            pending_table_character_tokens: String::new(),
            self_closing_acknowledged: false,
            stopped: false,
        }
    }

    /// Set the scripting flag. With scripting enabled, `noscript` content is
    /// raw text instead of markup.
    #[must_use]
    pub const fn with_scripting(mut self, enabled: bool) -> Self {
        self.scripting = enabled;
        self
    }

    /// The insertion mode the next token will be dispatched on.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// Run the parser to the end of the input and return the tree.
    ///
    /// Parsing never fails: malformed markup is recovered from and reported
    /// to the sink.
    #[must_use]
    pub fn run(mut self) -> DomTree {
        while !self.stopped {
            let Some(token) = self.tokenizer.next() else {
                break;
            };
            self.forward_tokenizer_errors();
            self.process_token(&token);
        }
        self.forward_tokenizer_errors();

        // [§ 13.2.7 The end](https://html.spec.whatwg.org/multipage/parsing.html#the-end)
        // "Pop all the nodes off the stack of open elements."
        self.stack_of_open_elements.clear();
        self.active_formatting_elements.clear();
        self.tree
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// "As each token is emitted from the tokenizer, the user agent must
    /// follow the appropriate steps from the following list, known as the tree
    /// construction dispatcher". Reprocessing is a loop, never recursion.
    fn process_token(&mut self, token: &Token) {
        if self.skip_next_newline {
            self.skip_next_newline = false;
            if matches!(token, Token::Character { data: '\n' }) {
                return;
            }
        }

        self.self_closing_acknowledged = false;

        loop {
            match self.process_using_rules_for(self.insertion_mode, token) {
                Step::Done => break,
                Step::Reprocess => {}
            }
        }

        // [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#acknowledge-self-closing-flag)
        // "When a start tag token is emitted with its self-closing flag set, if
        //  the flag is not acknowledged when it is processed by the tree
        //  construction stage, that is a
        //  non-void-html-element-start-tag-with-trailing-solidus parse error."
        if let Token::StartTag {
            name,
            self_closing: true,
            ..
        } = token
            && !self.self_closing_acknowledged
        {
            self.tag_error(
                ParseErrorKind::NonVoidHtmlElementStartTagWithTrailingSolidus,
                name,
            );
        }

        // [§ 13.2.5.42](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
        // "If there is an adjusted current node and it is not an element in
        //  the HTML namespace, then ... [CDATA[ ..."
        let cdata_allowed = self
            .adjusted_current_node()
            .and_then(|node| self.tree.as_element(node))
            .is_some_and(|data| data.namespace != Some(Namespace::Html));
        self.tokenizer.set_cdata_allowed(cdata_allowed);
    }

    /// "Process the token using the rules for the X insertion mode."
    ///
    /// Running another mode's rules does not switch the insertion mode.
    pub(super) fn process_using_rules_for(&mut self, mode: InsertionMode, token: &Token) -> Step {
        match mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),

            // ===== TABLE PARSING MODES =====
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),

            // ===== FORM ELEMENT MODES =====
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),

            InsertionMode::InTemplate => self.handle_in_template_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),

            // ===== FRAMESET MODES =====
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
        }
    }

    /// Switch the insertion mode and ask for the token to be reprocessed.
    pub(super) const fn reprocess_in(&mut self, mode: InsertionMode) -> Step {
        self.insertion_mode = mode;
        Step::Reprocess
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text)
    ///
    /// The generic raw text and RCDATA element parsing algorithms:
    /// 1. "Insert an HTML element for the token."
    /// 2. "If the algorithm that was invoked is the generic raw text element
    ///    parsing algorithm, switch the tokenizer to the RAWTEXT state;
    ///    otherwise the algorithm invoked was the generic RCDATA element
    ///    parsing algorithm, switch the tokenizer to the RCDATA state."
    /// 3. "Let the original insertion mode be the current insertion mode."
    /// 4. "Then, switch the insertion mode to "text"."
    pub(super) fn parse_text_element(&mut self, token: &Token, state: TokenizerState) {
        let _ = self.insert_html_element(token);
        self.switch_tokenizer_for(token, state);
        self.original_insertion_mode = Some(self.insertion_mode);
        self.insertion_mode = InsertionMode::Text;
    }

    /// Move the tokenizer into `state` for the element `token` opened, so the
    /// appropriate end tag is that element's end tag.
    pub(super) fn switch_tokenizer_for(&mut self, token: &Token, state: TokenizerState) {
        self.tokenizer.switch_to(state);
        self.tokenizer.set_last_start_tag(token.tag_name());
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#acknowledge-self-closing-flag)
    ///
    /// "When a start tag token is emitted with its self-closing flag set, if
    /// the flag is not acknowledged when it is processed by the tree
    /// construction stage, that is a parse error."
    pub(super) const fn acknowledge_self_closing_flag(&mut self) {
        self.self_closing_acknowledged = true;
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
    /// or U+0020 SPACE."
    pub(super) const fn is_whitespace(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
    }

    // ===== Parse errors =====

    /// Hand the tokenizer's errors to the sink, in the order they were found.
    fn forward_tokenizer_errors(&mut self) {
        for error in self.tokenizer.take_errors() {
            self.sink.report(error);
        }
    }

    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Report a tree construction error at the tokenizer's current position.
    pub(super) fn parse_error(&mut self, kind: ParseErrorKind) {
        let error = ParseError::new(self.tokenizer.position(), kind);
        self.sink.report(error);
    }

    /// Report a tree construction error about the tag `name`.
    pub(super) fn tag_error(&mut self, kind: ParseErrorKind, name: &str) {
        let error = ParseError::new(self.tokenizer.position(), kind).with_detail(name);
        self.sink.report(error);
    }

    /// Report an unexpected start or end tag token, or an unexpected token of
    /// any other kind.
    pub(super) fn unexpected(&mut self, token: &Token) {
        match token {
            Token::StartTag { name, .. } => self.tag_error(ParseErrorKind::UnexpectedStartTag, name),
            Token::EndTag { name, .. } => self.tag_error(ParseErrorKind::UnexpectedEndTag, name),
            Token::Doctype { .. } => self.parse_error(ParseErrorKind::UnexpectedDoctype),
            Token::Character { .. } => self.parse_error(ParseErrorKind::UnexpectedCharacter),
            Token::EndOfFile => self.parse_error(ParseErrorKind::UnexpectedEof),
            Token::Comment { .. } => {}
        }
    }

    /// A DOM call the tree constructor makes should never be rejected. If one
    /// is, the tree is left as it was and the failure is logged.
    pub(super) fn dom_result<T>(result: Result<T, DomError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                warn_once("HTML Parser", &format!("tree mutation rejected: {err}"));
                None
            }
        }
    }
}
