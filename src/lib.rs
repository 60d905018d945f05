//! Chainable collections of HTML elements.
//!
//! A [`Document`] hands out [`Elements`]: an ordered set of nodes that is read
//! and changed as a whole and narrowed with a small CSS-like selector language.
//!
//! ```
//! use hquery::Document;
//!
//! let doc = Document::from(r#"<div><p id="x">hi</p><p class="y">bye</p></div>"#);
//! assert_eq!(&*doc.select("p#x").text().single().unwrap(), "hi");
//!
//! let mut items = doc.select("p");
//! items.add_class("item").unwrap();
//! assert_eq!(doc.select("p.item").length(), 2);
//! ```

mod document;
mod dom_tree;
mod elements;
mod error;
mod format;
mod manipulation;
mod matcher;
mod node;
mod options;
mod property;
mod query;
mod selector;
mod serializing;
mod traversal;
mod values;

pub use document::Document;
pub use dom_tree::{Element, InnerNode, Node, NodeData, NodeId, NodeRef, Tree};
pub use elements::{Elements, Iter};
pub use error::{Error, Result};
pub use format::{FormatError, Formatter};
pub use manipulation::Content;
pub use options::Options;
pub use selector::{tokenize, AttrMatch, AttrPredicate, Selector, Step, Token};
pub use serializing::SerializableNodeRef;
pub use values::{Collapsed, Values};
