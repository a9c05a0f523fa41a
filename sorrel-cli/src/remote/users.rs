// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use clap::Args;

use sorrel_client::{AnnotationClient, CreateOutcome, User};

#[derive(Debug, Args)]
pub struct UsersArgs {
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
        help = "Json file containing the list of users to create.",
        required = true
    )]
    pub file: Option<String>,

    #[arg(long, help = "Admin username.", default_value = "admin")]
    pub username: Option<String>,

    #[arg(long, help = "Admin password.", default_value = "admin")]
    pub password: Option<String>,
}

#[tokio::main]
pub async fn remote_users(args: &UsersArgs) {
    let contents = std::fs::read_to_string(args.file.to_owned().unwrap()).unwrap_or_else(|err| {
        eprintln!("[sorrel::remote::users] ERROR: Could not read users file. {}.", err);
        std::process::exit(1);
    });

    let users: Vec<User> = serde_json::from_str(&contents).unwrap_or_else(|err| {
        eprintln!("[sorrel::remote::users] ERROR: Could not parse users file. {}.", err);
        std::process::exit(1);
    });

    let client = AnnotationClient::new(&args.url.to_owned().unwrap()).unwrap_or_else(|err| {
        eprintln!("[sorrel::remote::users] ERROR: {}.", err);
        std::process::exit(1);
    });

    client
        .login(
            &args.username.to_owned().unwrap(),
            &args.password.to_owned().unwrap(),
        )
        .await
        .unwrap_or_else(|err| {
            eprintln!("[sorrel::remote::users] ERROR: {}.", err);
            std::process::exit(1);
        });

    for user in &users {
        match client.create_user(user).await {
            Ok(CreateOutcome::Created) => println!("+ User {} created.", user.username),
            Ok(CreateOutcome::AlreadyExists) => println!("+ User {} updated.", user.username),
            Err(err) => {
                eprintln!("[sorrel::remote::users] ERROR: {}.", err);
                std::process::exit(1);
            }
        }
    }
}
