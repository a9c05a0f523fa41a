// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Args;
use kdam::TqdmIterator;

use sorrel_core::an::{Annotation, AnnotationFile, ColorRegistry, DataRecord, TaskDescriptor};
use sorrel_core::constant;
use sorrel_core::error::SorrelError;
use sorrel_core::im;
use sorrel_core::ut;

#[derive(Debug, Args)]
pub struct ConvertMasksArgs {
    #[arg(
        short = 'w',
        long,
        help = "Workspace containing all data. Paths are relative to it so the review tool can be started on the same workspace.",
        required = true
    )]
    pub workspace: Option<String>,

    #[arg(
        short = 'i',
        long,
        help = "Input folder of png masks, relative to the workspace.",
        required = true
    )]
    pub input: Option<String>,

    #[arg(
        short = 'd',
        long,
        help = "Folder of original images the masks annotate, relative to the workspace.",
        required = true
    )]
    pub datapath: Option<String>,

    #[arg(
        short = 'o',
        long,
        help = "Output folder, relative to the workspace. Defaults to the input folder's parent."
    )]
    pub output: Option<String>,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn convert_masks(args: &ConvertMasksArgs) {
    let workspace = PathBuf::from(args.workspace.to_owned().unwrap());

    let input_folder = workspace.join(args.input.to_owned().unwrap());

    if !input_folder.is_dir() {
        eprintln!(
            "[sorrel::convert::masks] ERROR: Input folder {} does not exist.",
            input_folder.display()
        );
        std::process::exit(1);
    }

    let output_path = match args.output.to_owned() {
        Some(output) => workspace.join(output),
        None => input_folder
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| workspace.clone()),
    };

    let task_name = input_folder
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .map(|name| format!("{}{}", name, constant::TASK_SUFFIX))
        .unwrap_or_else(|| {
            eprintln!(
                "[sorrel::convert::masks] ERROR: Could not derive a task name from the input folder's parent directory."
            );
            std::process::exit(1);
        });

    let mask_files = ut::path::collect_file_paths(
        input_folder.to_string_lossy().to_string(),
        constant::MASK_IMAGE_FORMATS.as_slice(),
    )
    .unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    if mask_files.is_empty() {
        eprintln!(
            "[sorrel::convert::masks] ERROR: No mask files were detected. Please check your input path."
        );
        std::process::exit(1);
    }

    ut::track::progress_log(
        &format!(
            "Detected {} masks.",
            ut::track::thousands_format(mask_files.len())
        ),
        args.verbose,
    );

    let output_folder = ut::path::ensure_directory(output_path.join(&task_name)).unwrap_or_else(|_| {
        eprintln!("[sorrel::convert::masks] ERROR: Could not create output directory.");
        std::process::exit(1);
    });

    let datapath = args.datapath.to_owned().unwrap();

    // Category ids must be stable across the whole batch, so one registry
    // is threaded through a strictly sequential scan of the sorted inputs.
    let mut registry = ColorRegistry::new();

    let pb = ut::track::progress_bar(mask_files.len(), "Converting masks", args.verbose);

    let mut failure: Vec<String> = Vec::new();

    for mask_path in mask_files.iter().tqdm_with_bar(pb) {
        convert_mask(mask_path, &mut registry, &task_name, &datapath, &output_folder)
            .unwrap_or_else(|err| {
                failure.push(format!("{}\t{}", mask_path.display(), err));
            });
    }

    // The descriptor depends on the final registry state and is only
    // written once every image has been scanned.
    let task = TaskDescriptor::new(
        task_name.clone(),
        datapath.clone(),
        registry.categories(),
    );

    task.save(output_path.join(format!("{}.json", task_name)))
        .unwrap_or_else(|err| {
            eprintln!("{}", err);
            std::process::exit(1);
        });

    if args.verbose {
        println!();
    }

    let message = if !failure.is_empty() {
        &format!(
            "Complete. {} masks converted, {} failed, {} categories discovered.",
            ut::track::thousands_format(mask_files.len() - failure.len()),
            ut::track::thousands_format(failure.len()),
            ut::track::thousands_format(registry.len())
        )
    } else {
        &format!(
            "Complete. {} masks converted, {} categories discovered.",
            ut::track::thousands_format(mask_files.len()),
            ut::track::thousands_format(registry.len())
        )
    };

    ut::track::progress_log(message, args.verbose);

    for line in &failure {
        eprintln!("[sorrel::convert::masks] WARNING: {}", line);
    }
}

/// Convert one source mask into an annotation record with an embedded id mask
///
/// An unreadable or empty source image is treated as having no
/// annotations: the record is still written with an empty object list
/// and no mask entry so one bad file never aborts the batch.
fn convert_mask(
    mask_path: &Path,
    registry: &mut ColorRegistry,
    task_name: &str,
    datapath: &str,
    output_folder: &Path,
) -> Result<(), SorrelError> {
    let filename = mask_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| SorrelError::OtherError("Invalid mask filename".to_string()))?;

    let mut annotations: Vec<Annotation> = Vec::new();

    if let Ok(image) = image::open(mask_path) {
        let image = image.into_rgb8();

        // One registry query per distinct color; the pixel pass below
        // reuses the per-image table.
        let mut ids: HashMap<im::Color, u32> = HashMap::new();

        for color in im::distinct_colors(&image) {
            let id = registry.lookup_or_create(color)?;
            ids.insert(color, id);
            annotations.push(Annotation::object(id));
        }

        let mask = im::IdMask::from_color_mask(&image, &ids);
        annotations.push(Annotation::mask(mask.to_data_url()?));
    }

    let record = AnnotationFile {
        task_name: task_name.to_string(),
        annotations,
        data: DataRecord::image(format!("{}/{}", datapath, filename)),
    };

    record.save(
        output_folder
            .join(mask_path.file_stem().unwrap())
            .with_extension("json"),
    )
}
