//! [§ 13.2.6.4 The rules for parsing tokens in HTML content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhtml)
//!
//! One `handle_*_mode` method per insertion mode. Each returns
//! [`Step::Reprocess`](super::core::Step) when it switched the insertion mode
//! and wants the same token dispatched again.

mod after;
mod body;
mod head;
mod initial;
mod select;
mod table;
mod template;
