//! # chatmark
//!
//! Splitter for chat message markup.
//!
//! A message goes through two independent stages:
//!
//! chatmark
//!   ├── fences     Splits on ``` into preformatted and normal segments
//!   ├── tokens     Splits normal text into plain runs and `<...>` special items
//!   └── special    Reads kind, value and label out of a special item
//!
//! [message](chatmark::message) wires the two stages together for callers that
//! want the whole message at once. Everything here borrows from the input and
//! keeps no state between calls.
//!
//! Messages come from the network and are untrusted: the splitters return
//! [ParseError](chatmark::error::ParseError) values instead of panicking.

pub mod chatmark;
