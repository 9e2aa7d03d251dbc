//! Document Model - Core document structure and the selection algebra
//!
//! This crate provides the document model for the editor: nodes with text
//! properties, ordered containers, and the coordinate, range and selection
//! types used to address text inside them.
//!
//! # Example
//!
//! ```
//! use doc_model::{Direction, Path, PropertySelection, Selection};
//!
//! let sel = PropertySelection::new(Path::property("p1", "content"), 3, 6).unwrap();
//! assert!(!sel.is_collapsed());
//!
//! let caret = sel.collapse(Direction::Left);
//! assert_eq!(caret.get_fragments()[0].as_cursor().unwrap().offset, 3);
//!
//! let other: Selection = PropertySelection::new(Path::property("p1", "content"), 5, 9)
//!     .unwrap()
//!     .into();
//! assert!(Selection::from(sel).overlaps(&other, true));
//! ```

mod coordinate;
mod document;
mod error;
mod node;
mod path;
mod range;
mod selection;

pub use coordinate::*;
pub use document::*;
pub use error::*;
pub use node::*;
pub use path::*;
pub use range::*;
pub use selection::*;
