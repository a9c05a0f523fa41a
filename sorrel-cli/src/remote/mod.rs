// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use clap::{Args, Subcommand};

mod stats;
mod task;
mod users;

use stats::{StatsArgs, remote_stats};
use task::{TaskArgs, remote_task};
use users::{UsersArgs, remote_users};

#[derive(Debug, Args)]
#[command(about = "Push users and converted tasks to a running annotation server or pull statistics back.")]
#[command(args_conflicts_with_subcommands = true)]
#[command(arg_required_else_help = true)]
#[command(flatten_help = true)]
pub struct RemoteArgs {
    #[command(subcommand)]
    command: Option<RemoteCommands>,
}

#[derive(Debug, Subcommand)]
enum RemoteCommands {
    Stats(StatsArgs),
    Task(TaskArgs),
    Users(UsersArgs),
}

pub fn remote(args: &RemoteArgs) {
    match args.command.as_ref().unwrap() {
        RemoteCommands::Stats(stats_args) => remote_stats(stats_args),
        RemoteCommands::Task(task_args) => remote_task(task_args),
        RemoteCommands::Users(users_args) => remote_users(users_args),
    }
}
