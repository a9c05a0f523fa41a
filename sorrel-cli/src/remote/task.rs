// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use clap::Args;
use serde_json::Value;

use sorrel_client::{AnnotationClient, CreateOutcome};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[arg(
        short = 'u',
        long,
        help = "Annotation server URL.",
        default_value = "http://localhost:3000"
    )]
    pub url: Option<String>,

    #[arg(
        short = 'f',
        long,
        help = "Task descriptor json file, e.g. one emitted by convert masks.",
        required = true
    )]
    pub file: Option<String>,

    #[arg(long, help = "Admin username.", default_value = "admin")]
    pub username: Option<String>,

    #[arg(long, help = "Admin password.", default_value = "admin")]
    pub password: Option<String>,
}

#[tokio::main]
pub async fn remote_task(args: &TaskArgs) {
    let contents = std::fs::read_to_string(args.file.to_owned().unwrap()).unwrap_or_else(|err| {
        eprintln!("[sorrel::remote::task] ERROR: Could not read task file. {}.", err);
        std::process::exit(1);
    });

    let task: Value = serde_json::from_str(&contents).unwrap_or_else(|err| {
        eprintln!("[sorrel::remote::task] ERROR: Could not parse task file. {}.", err);
        std::process::exit(1);
    });

    let name = task
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("unnamed")
        .to_string();

    let client = AnnotationClient::new(&args.url.to_owned().unwrap()).unwrap_or_else(|err| {
        eprintln!("[sorrel::remote::task] ERROR: {}.", err);
        std::process::exit(1);
    });

    client
        .login(
            &args.username.to_owned().unwrap(),
            &args.password.to_owned().unwrap(),
        )
        .await
        .unwrap_or_else(|err| {
            eprintln!("[sorrel::remote::task] ERROR: {}.", err);
            std::process::exit(1);
        });

    match client.create_task(&task).await {
        Ok(CreateOutcome::Created) => println!("+ Task {} created.", name),
        Ok(CreateOutcome::AlreadyExists) => println!("- Task {} already exists.", name),
        Err(err) => {
            eprintln!("[sorrel::remote::task] ERROR: {}.", err);
            std::process::exit(1);
        }
    }
}
