//! Collaboration support for selections.
//!
//! Remote edits arrive as [`DocOperation`]s. Before a local selection can be
//! used against the edited document it has to be rebased across them, so it
//! keeps addressing the same text.
//!
//! # Modules
//!
//! - `operation`: Text and node operations, and applying them to a document
//! - `rebase`: Pure selection transforms across operations
//! - `settings`: Boundary behaviour for rebasing, stored as JSON
//! - `error`: Error types for the collaboration crate
//!
//! # Example
//!
//! ```
//! use collab::{rebase, DocOperation, RebaseSettings};
//! use doc_model::{Path, PropertySelection, Selection};
//!
//! let path = Path::property("p1", "content");
//! let selection: Selection = PropertySelection::new(path.clone(), 4, 6).unwrap().into();
//!
//! // A collaborator typed three characters in front of the selection
//! let op = DocOperation::insert_text(path, 0, "abc");
//! let rebased = rebase(&selection, &op, &RebaseSettings::default());
//!
//! let rebased = rebased.as_property().unwrap();
//! assert_eq!((rebased.start_offset(), rebased.end_offset()), (7, 9));
//! ```

pub mod error;
pub mod operation;
pub mod rebase;
pub mod settings;

// Re-export commonly used types
pub use error::{CollabError, CollabResult};
pub use operation::DocOperation;
pub use rebase::{rebase, rebase_all, transform_coordinate, transform_range};
pub use settings::{InsertBias, RebaseSettings};
