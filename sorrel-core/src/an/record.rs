// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constant;
use crate::error::SorrelError;
use crate::im::{Color, object_id, to_hex};

/// Derive a category name from its id
pub fn category_name(id: u32) -> String {
    format!("class{}", id)
}

/// One category in a task label schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: String,
    pub idx: u32,
    pub instance: bool,
    pub properties: Vec<Value>,
}

impl Category {
    /// Initialize a semantic segmentation category for a registered color
    pub fn new(idx: u32, color: &Color) -> Category {
        Category {
            name: category_name(idx),
            color: to_hex(color),
            idx,
            instance: false,
            properties: vec![],
        }
    }
}

/// One entry in an annotation record
///
/// Entries are either object labels or embedded mask blobs. The review
/// tool distinguishes the cases by shape alone, so the variants serialize
/// untagged: object entries carry a category, frame entries a timestamp,
/// and the batch-level mask entry the sentinel id 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Annotation {
    Object {
        category: String,
        options: Map<String, Value>,
        id: String,
    },
    Frame {
        id: i64,
        timestamp: i64,
        mask: String,
    },
    Mask {
        id: u32,
        mask: String,
    },
}

impl Annotation {
    /// An object label entry for a registered category id
    pub fn object(id: u32) -> Annotation {
        Annotation::Object {
            category: category_name(id),
            options: Map::new(),
            id: object_id(id),
        }
    }

    /// The per-image mask entry carrying the encoded id mask
    pub fn mask(data_url: String) -> Annotation {
        Annotation::Mask {
            id: 0,
            mask: data_url,
        }
    }

    /// A per-timestamp mask entry keyed by its frame
    pub fn frame(timestamp: i64, data_url: String) -> Annotation {
        Annotation::Frame {
            id: timestamp,
            timestamp,
            mask: data_url,
        }
    }
}

/// Reference to the source image an annotation record belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    #[serde(rename = "type")]
    pub data_type: String,
    pub path: String,
    pub children: String,
}

impl DataRecord {
    pub fn image(path: String) -> DataRecord {
        DataRecord {
            data_type: constant::DATA_TYPE_IMAGE.to_string(),
            path,
            children: String::new(),
        }
    }
}

/// One per-image annotation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationFile {
    pub task_name: String,
    pub annotations: Vec<Annotation>,
    pub data: DataRecord,
}

impl AnnotationFile {
    /// Write the record as pretty-printed json
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SorrelError> {
        let file = File::create(path)
            .map_err(|err| SorrelError::AnnotationWriteError(err.to_string()))?;

        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|err| SorrelError::AnnotationWriteError(err.to_string()))?;

        Ok(())
    }
}

/// The label schema enumerating all categories discovered in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSchema {
    pub category: Vec<Category>,
    pub default: String,
}

/// Plugin specification section of a task descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub plugin_name: String,
    pub data_type: String,
    pub label_schema: LabelSchema,
}

/// Dataset linkage section of a task descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDataset {
    pub path: String,
    pub data_type: String,
}

/// The batch-level task descriptor consumed by the review tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub name: String,
    pub version: String,
    pub dataset: TaskDataset,
    pub spec: TaskSpec,
}

impl TaskDescriptor {
    /// Assemble a segmentation task descriptor from a finished batch
    ///
    /// The default category is the first one created; an empty batch
    /// still records the name the first category would have received.
    pub fn new(name: String, dataset_path: String, categories: Vec<Category>) -> TaskDescriptor {
        let default = categories
            .first()
            .map(|category| category.name.clone())
            .unwrap_or_else(|| category_name(1));

        TaskDescriptor {
            name,
            version: constant::TASK_VERSION.to_string(),
            dataset: TaskDataset {
                path: dataset_path,
                data_type: constant::DATA_TYPE_IMAGE.to_string(),
            },
            spec: TaskSpec {
                plugin_name: constant::PLUGIN_SEGMENTATION.to_string(),
                data_type: constant::DATA_TYPE_IMAGE.to_string(),
                label_schema: LabelSchema {
                    category: categories,
                    default,
                },
            },
        }
    }

    /// Write the descriptor as pretty-printed json
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SorrelError> {
        let file =
            File::create(path).map_err(|err| SorrelError::TaskWriteError(err.to_string()))?;

        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|err| SorrelError::TaskWriteError(err.to_string()))?;

        Ok(())
    }
}

/// A timestamped polygon object from a vector annotation file
///
/// Read-only input: geometry is consumed to rasterize mask buffers
/// grouped by timestamp and never written back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PolygonObject {
    pub timestamp: i64,
    pub geometry: Geometry,
}

/// Polygon geometry in normalized [0, 1] coordinate space
///
/// Geometry is either a single flat vertex list or a multi-polygon
/// envelope where every member list forms part of one compound shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub vertices: Vec<f32>,
    #[serde(default)]
    pub mvertices: Vec<Vec<f32>>,
}

impl Geometry {
    /// Return every vertex list to fill for this geometry
    pub fn outlines(&self) -> Vec<&[f32]> {
        if !self.mvertices.is_empty() {
            self.mvertices.iter().map(Vec::as_slice).collect()
        } else {
            vec![self.vertices.as_slice()]
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_object_entry_shape() {
        let entry = Annotation::object(2);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"category": "class2", "options": {}, "id": "[0,0,2]"})
        );
    }

    #[test]
    fn test_mask_entry_shape() {
        let entry = Annotation::mask("data:image/png;base64,xyz".to_string());
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["id"], 0);
        assert_eq!(json["mask"], "data:image/png;base64,xyz");
    }

    #[test]
    fn test_frame_entry_shape() {
        let entry = Annotation::frame(12, "data:image/png;base64,xyz".to_string());
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["id"], 12);
        assert_eq!(json["timestamp"], 12);
    }

    #[test]
    fn test_annotation_round_trip() {
        let entries = vec![
            Annotation::object(1),
            Annotation::frame(3, "data:image/png;base64,a".to_string()),
            Annotation::mask("data:image/png;base64,b".to_string()),
        ];

        let json = serde_json::to_string(&entries).unwrap();
        let parsed: Vec<Annotation> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, entries);
    }

    #[test]
    fn test_task_descriptor_shape() {
        let categories = vec![Category::new(1, &[1, 2, 3])];
        let task = TaskDescriptor::new("frames-seg".to_string(), "Data/rgb".to_string(), categories);

        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["name"], "frames-seg");
        assert_eq!(json["version"], "0.9");
        assert_eq!(json["dataset"]["path"], "Data/rgb");
        assert_eq!(json["spec"]["plugin_name"], "segmentation");
        assert_eq!(json["spec"]["label_schema"]["default"], "class1");
        assert_eq!(json["spec"]["label_schema"]["category"][0]["color"], "#030201");
        assert_eq!(json["spec"]["label_schema"]["category"][0]["instance"], false);
    }

    #[test]
    fn test_geometry_outlines() {
        let single = Geometry {
            vertices: vec![0.0, 0.0, 0.5, 0.0, 0.5, 0.5],
            mvertices: vec![],
        };
        assert_eq!(single.outlines().len(), 1);

        let envelope = Geometry {
            vertices: vec![],
            mvertices: vec![vec![0.0; 6], vec![0.1; 8]],
        };
        assert_eq!(envelope.outlines().len(), 2);
    }

    #[test]
    fn test_polygon_object_parse() {
        let object: PolygonObject = serde_json::from_str(
            r#"{"timestamp": 4, "geometry": {"vertices": [0.1, 0.2], "mvertices": []}}"#,
        )
        .unwrap();

        assert_eq!(object.timestamp, 4);
        assert_eq!(object.geometry.vertices, vec![0.1, 0.2]);
    }
}
