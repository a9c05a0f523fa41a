// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use clap::{Parser, Subcommand};
use sorrel_cli::{convert, remote};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    name: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Convert(convert::ConvertArgs),
    Remote(remote::RemoteArgs),
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Convert(convert_args)) => convert::convert(convert_args),
        Some(Commands::Remote(remote_args)) => remote::remote(remote_args),
        None => {}
    }
}
