// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use clap::{Args, Subcommand};

mod masks;
mod polygons;

use masks::{ConvertMasksArgs, convert_masks};
use polygons::{ConvertPolygonsArgs, convert_polygons};

#[derive(Debug, Args)]
#[command(about = "Convert raster or polygon segmentation annotations into review-ready id masks.")]
#[command(args_conflicts_with_subcommands = true)]
#[command(arg_required_else_help = true)]
#[command(flatten_help = true)]
pub struct ConvertArgs {
    #[command(subcommand)]
    command: Option<ConvertCommands>,
}

#[derive(Debug, Subcommand)]
enum ConvertCommands {
    Masks(ConvertMasksArgs),
    Polygons(ConvertPolygonsArgs),
}

pub fn convert(args: &ConvertArgs) {
    match args.command.as_ref().unwrap() {
        ConvertCommands::Masks(masks_args) => convert_masks(masks_args),
        ConvertCommands::Polygons(polygons_args) => convert_polygons(polygons_args),
    }
}
