// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Args;
use kdam::TqdmIterator;
use serde_json::Value;

use sorrel_core::an::{Annotation, PolygonObject};
use sorrel_core::constant;
use sorrel_core::cv::{fill_polygon, scale_vertices};
use sorrel_core::error::SorrelError;
use sorrel_core::im::IdMask;
use sorrel_core::ut;

#[derive(Debug, Args)]
pub struct ConvertPolygonsArgs {
    #[arg(
        short = 'i',
        long,
        help = "Input folder of json annotation files. The task descriptor is expected one level up as <folder>.json.",
        required = true
    )]
    pub input: Option<String>,

    #[arg(long, help = "Canonical frame width in pixels.", default_value = "1280")]
    pub width: Option<u32>,

    #[arg(long, help = "Canonical frame height in pixels.", default_value = "800")]
    pub height: Option<u32>,

    #[arg(
        long,
        help = "Force every category index to 1 instead of renumbering sequentially. Collapses multi-category schemas to a single class."
    )]
    pub collapse_categories: bool,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn convert_polygons(args: &ConvertPolygonsArgs) {
    let input_folder = PathBuf::from(args.input.to_owned().unwrap());

    if !input_folder.is_dir() {
        eprintln!(
            "[sorrel::convert::polygons] ERROR: Input folder {} does not exist.",
            input_folder.display()
        );
        std::process::exit(1);
    }

    let width = args.width.unwrap_or(constant::FRAME_WIDTH);
    let height = args.height.unwrap_or(constant::FRAME_HEIGHT);

    if width == 0 || height == 0 {
        eprintln!("[sorrel::convert::polygons] ERROR: Frame width and height must be positive.");
        std::process::exit(1);
    }

    let batch_name = input_folder
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| {
            eprintln!("[sorrel::convert::polygons] ERROR: Could not derive a batch name from the input folder.");
            std::process::exit(1);
        });

    let parent = input_folder
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let task_name = format!("{}{}", batch_name, constant::TASK_SUFFIX);

    // The pipeline cannot proceed without the pre-existing category schema.
    let task_path = parent.join(format!("{}.json", batch_name));

    let mut task = read_task(&task_path).unwrap_or_else(|err| {
        eprintln!("{}", err);
        eprintln!(
            "[sorrel::convert::polygons] ERROR: A task descriptor is required at {}.",
            task_path.display()
        );
        std::process::exit(1);
    });

    patch_task(&mut task, args.collapse_categories).unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    write_json(&task, parent.join(format!("{}.json", task_name))).unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    let annotation_files = ut::path::collect_file_paths(
        input_folder.to_string_lossy().to_string(),
        constant::ANNOTATION_FORMATS.as_slice(),
    )
    .unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    if annotation_files.is_empty() {
        eprintln!(
            "[sorrel::convert::polygons] ERROR: No annotation files were detected. Please check your input path."
        );
        std::process::exit(1);
    }

    ut::track::progress_log(
        &format!(
            "Detected {} annotation files.",
            ut::track::thousands_format(annotation_files.len())
        ),
        args.verbose,
    );

    let output_folder = ut::path::ensure_directory(parent.join(&task_name)).unwrap_or_else(|_| {
        eprintln!("[sorrel::convert::polygons] ERROR: Could not create output directory.");
        std::process::exit(1);
    });

    let pb = ut::track::progress_bar(
        annotation_files.len(),
        "Rasterizing polygons",
        args.verbose,
    );

    let mut failure: Vec<String> = Vec::new();

    for annotation_path in annotation_files.iter().tqdm_with_bar(pb) {
        convert_file(annotation_path, &task_name, width, height, &output_folder)
            .unwrap_or_else(|err| {
                failure.push(format!("{}\t{}", annotation_path.display(), err));
            });
    }

    if args.verbose {
        println!();
    }

    let message = if !failure.is_empty() {
        &format!(
            "Complete. {} annotation files rasterized, {} failed.",
            ut::track::thousands_format(annotation_files.len() - failure.len()),
            ut::track::thousands_format(failure.len())
        )
    } else {
        &format!(
            "Complete. {} annotation files rasterized.",
            ut::track::thousands_format(annotation_files.len())
        )
    };

    ut::track::progress_log(message, args.verbose);

    for line in &failure {
        eprintln!("[sorrel::convert::polygons] WARNING: {}", line);
    }
}

/// Read the pre-existing task descriptor
fn read_task(path: &Path) -> Result<Value, SorrelError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|err| SorrelError::TaskReadError(err.to_string()))?;

    serde_json::from_str(&contents).map_err(|err| SorrelError::TaskReadError(err.to_string()))
}

/// Normalize category indices and clear instance flags in a task descriptor
///
/// The rasterized output is a single-class semantic mask, so every
/// category drops its instance flag. Indices renumber sequentially
/// unless the caller asks for the single-class collapse where every
/// index becomes 1.
fn patch_task(task: &mut Value, collapse: bool) -> Result<(), SorrelError> {
    let categories = task
        .pointer_mut("/spec/label_schema/category")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| {
            SorrelError::TaskReadError("Task descriptor has no category list".to_string())
        })?;

    for (idx, category) in categories.iter_mut().enumerate() {
        let category = category.as_object_mut().ok_or_else(|| {
            SorrelError::TaskReadError("Task descriptor category is not an object".to_string())
        })?;

        let index = if collapse { 1 } else { idx as u64 + 1 };

        category.insert("idx".to_string(), Value::from(index));
        category.insert("instance".to_string(), Value::from(false));
    }

    Ok(())
}

/// Rasterize one annotation file into per-timestamp presence masks
///
/// Only the annotations and task_name fields are replaced; everything
/// else in the file is preserved as read. Malformed geometry is a hard
/// failure for the file and leaves no partial output behind.
fn convert_file(
    annotation_path: &Path,
    task_name: &str,
    width: u32,
    height: u32,
    output_folder: &Path,
) -> Result<(), SorrelError> {
    let contents = std::fs::read_to_string(annotation_path)
        .map_err(|err| SorrelError::AnnotationReadError(err.to_string()))?;

    let mut record: Value = serde_json::from_str(&contents)
        .map_err(|err| SorrelError::AnnotationReadError(err.to_string()))?;

    if !record.is_object() {
        return Err(SorrelError::AnnotationReadError(
            "Annotation file is not a json object".to_string(),
        ));
    }

    let objects: Vec<PolygonObject> = serde_json::from_value(
        record
            .get("annotations")
            .cloned()
            .unwrap_or(Value::Array(vec![])),
    )
    .map_err(|err| SorrelError::AnnotationReadError(err.to_string()))?;

    let timestamps: BTreeSet<i64> = objects.iter().map(|object| object.timestamp).collect();

    let mut annotations: Vec<Annotation> = Vec::with_capacity(timestamps.len());

    for timestamp in timestamps {
        let mut mask = IdMask::new(width, height);

        for object in objects.iter().filter(|o| o.timestamp == timestamp) {
            for outline in object.geometry.outlines() {
                let polygon = scale_vertices(outline, width, height)?;
                fill_polygon(&mut mask, &polygon, constant::FOREGROUND_ID);
            }
        }

        annotations.push(Annotation::frame(timestamp, mask.to_data_url()?));
    }

    record["annotations"] = serde_json::to_value(&annotations)
        .map_err(|err| SorrelError::AnnotationWriteError(err.to_string()))?;
    record["task_name"] = Value::from(task_name);

    let filename = annotation_path
        .file_name()
        .ok_or_else(|| SorrelError::OtherError("Invalid annotation filename".to_string()))?;

    write_json(&record, output_folder.join(filename))
}

/// Write a json value as a pretty-printed file
fn write_json<P: AsRef<Path>>(value: &Value, path: P) -> Result<(), SorrelError> {
    let file = File::create(path)
        .map_err(|err| SorrelError::AnnotationWriteError(err.to_string()))?;

    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .map_err(|err| SorrelError::AnnotationWriteError(err.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod test {

    use super::*;

    fn descriptor() -> Value {
        serde_json::json!({
            "name": "frames",
            "version": "0.9",
            "dataset": {"path": "frames/", "data_type": "image"},
            "spec": {
                "plugin_name": "polygon",
                "data_type": "image",
                "label_schema": {
                    "category": [
                        {"name": "car", "color": "#00ff00", "idx": 7, "instance": true, "properties": []},
                        {"name": "person", "color": "#eca0a0", "idx": 9, "instance": true, "properties": []}
                    ],
                    "default": "car"
                }
            }
        })
    }

    #[test]
    fn test_patch_task_renumbers() {
        let mut task = descriptor();
        patch_task(&mut task, false).unwrap();

        let categories = task["spec"]["label_schema"]["category"].as_array().unwrap();

        assert_eq!(categories[0]["idx"], 1);
        assert_eq!(categories[1]["idx"], 2);
        assert_eq!(categories[0]["instance"], false);
        assert_eq!(categories[1]["instance"], false);

        // Untouched fields survive the patch
        assert_eq!(categories[0]["name"], "car");
        assert_eq!(task["spec"]["plugin_name"], "polygon");
    }

    #[test]
    fn test_patch_task_collapse() {
        let mut task = descriptor();
        patch_task(&mut task, true).unwrap();

        let categories = task["spec"]["label_schema"]["category"].as_array().unwrap();

        assert_eq!(categories[0]["idx"], 1);
        assert_eq!(categories[1]["idx"], 1);
    }

    #[test]
    fn test_patch_task_missing_schema() {
        let mut task = serde_json::json!({"name": "frames"});
        assert!(patch_task(&mut task, false).is_err());
    }
}
