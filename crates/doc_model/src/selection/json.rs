//! Serialized selection format
//!
//! This is the shape stored in undo history and sent in collaboration
//! messages:
//!
//! ```json
//! {"type": "property", "path": ["p1", "content"], "startOffset": 3,
//!  "endOffset": 6, "reverse": false, "containerId": null, "surfaceId": null}
//! ```
//!
//! `endOffset` may be omitted for a collapsed selection.

use super::{ContainerSelection, PropertySelection, Selection};
use crate::{Coordinate, DocModelError, Document, Path, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SelectionData {
    Null,
    #[serde(rename_all = "camelCase")]
    Property {
        path: Path,
        start_offset: usize,
        #[serde(default)]
        end_offset: Option<usize>,
        #[serde(default)]
        reverse: bool,
        #[serde(default)]
        container_id: Option<String>,
        #[serde(default)]
        surface_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Container {
        container_id: String,
        start_path: Path,
        start_offset: usize,
        end_path: Path,
        end_offset: usize,
        #[serde(default)]
        reverse: bool,
        #[serde(default)]
        surface_id: Option<String>,
    },
}

impl From<&Selection> for SelectionData {
    fn from(selection: &Selection) -> Self {
        match selection {
            Selection::Null => SelectionData::Null,
            Selection::Property(sel) => SelectionData::Property {
                path: sel.path.clone(),
                start_offset: sel.start_offset,
                end_offset: Some(sel.end_offset),
                reverse: sel.reverse,
                container_id: sel.container_id.clone(),
                surface_id: sel.surface_id.clone(),
            },
            Selection::Container(sel) => SelectionData::Container {
                container_id: sel.container_id().to_string(),
                start_path: sel.start_path().clone(),
                start_offset: sel.start_offset(),
                end_path: sel.end_path().clone(),
                end_offset: sel.end_offset(),
                reverse: sel.is_reverse(),
                surface_id: sel.surface_id().map(str::to_string),
            },
        }
    }
}

impl SelectionData {
    /// Rebuild a selection. Container selections need `doc` to recover the
    /// container's node order.
    pub fn into_selection(self, doc: Option<&Document>) -> Result<Selection> {
        match self {
            SelectionData::Null => Ok(Selection::Null),
            SelectionData::Property {
                path,
                start_offset,
                end_offset,
                reverse,
                container_id,
                surface_id,
            } => {
                let mut sel =
                    PropertySelection::new(path, start_offset, end_offset.unwrap_or(start_offset))?
                        .with_reverse(reverse);
                sel.container_id = container_id;
                sel.surface_id = surface_id;
                Ok(Selection::Property(sel))
            }
            SelectionData::Container {
                container_id,
                start_path,
                start_offset,
                end_path,
                end_offset,
                reverse,
                surface_id,
            } => {
                let doc = doc.ok_or_else(|| {
                    DocModelError::InvalidSelection(format!(
                        "container selection in {} needs a document",
                        container_id
                    ))
                })?;
                let container = doc
                    .container(&container_id)
                    .ok_or(DocModelError::ContainerNotFound(container_id))?;
                let mut sel = ContainerSelection::new(
                    container,
                    Coordinate::new(start_path, start_offset),
                    Coordinate::new(end_path, end_offset),
                )?
                .with_reverse(reverse);
                if let Some(surface_id) = surface_id {
                    sel = sel.with_surface_id(surface_id);
                }
                Ok(Selection::Container(sel))
            }
        }
    }
}

fn parse(json: &serde_json::Value) -> Result<SelectionData> {
    serde_json::from_value(json.clone()).map_err(|e| DocModelError::InvalidSelection(e.to_string()))
}

impl Selection {
    pub fn to_data(&self) -> SelectionData {
        SelectionData::from(self)
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self.to_data())
            .map_err(|e| DocModelError::SerializationError(e.to_string()))
    }

    /// Parse a null or property selection
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        parse(json)?.into_selection(None)
    }

    /// Parse any selection, resolving containers in `doc`
    pub fn from_json_in(json: &serde_json::Value, doc: &Document) -> Result<Self> {
        parse(json)?.into_selection(Some(doc))
    }
}

impl PropertySelection {
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Selection::Property(self.clone()).to_json()
    }

    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        match Selection::from_json(json)? {
            Selection::Property(sel) => Ok(sel),
            other => Err(DocModelError::InvalidSelection(format!(
                "expected a property selection, got {}",
                other
            ))),
        }
    }
}

impl Serialize for Selection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_data().serialize(serializer)
    }
}
