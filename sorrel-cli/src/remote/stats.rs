// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use clap::Args;
use serde_json::Value;

use sorrel_client::AnnotationClient;

// Plugin kinds whose labels are stored as plain annotation lists
const COUNTED_PLUGINS: [&str; 3] = ["rectangle", "polygon", "keypoints"];

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[arg(
        short = 'u',
        long,
        help = "Annotation server URL.",
        default_value = "http://localhost:3000"
    )]
    pub url: Option<String>,

    #[arg(long, help = "Admin username.", default_value = "admin")]
    pub username: Option<String>,

    #[arg(long, help = "Admin password.", default_value = "admin")]
    pub password: Option<String>,
}

#[tokio::main]
pub async fn remote_stats(args: &StatsArgs) {
    let client = AnnotationClient::new(&args.url.to_owned().unwrap()).unwrap_or_else(|err| {
        eprintln!("[sorrel::remote::stats] ERROR: {}.", err);
        std::process::exit(1);
    });

    client
        .login(
            &args.username.to_owned().unwrap(),
            &args.password.to_owned().unwrap(),
        )
        .await
        .unwrap_or_else(|err| {
            eprintln!("[sorrel::remote::stats] ERROR: {}.", err);
            std::process::exit(1);
        });

    let tasks = client.tasks().await.unwrap_or_else(|err| {
        eprintln!("[sorrel::remote::stats] ERROR: {}.", err);
        std::process::exit(1);
    });

    for task in &tasks {
        let name = task.get("name").and_then(Value::as_str).unwrap_or("unnamed");

        let plugin = task
            .pointer("/spec/plugin_name")
            .and_then(Value::as_str)
            .unwrap_or("");

        let data_type = task
            .pointer("/dataset/data_type")
            .and_then(Value::as_str)
            .unwrap_or("");

        let dataset_id = match task.pointer("/dataset/id") {
            Some(Value::String(id)) => id.clone(),
            Some(other) => other.to_string(),
            None => continue,
        };

        let datas = client.dataset_data(&dataset_id).await.unwrap_or_else(|err| {
            eprintln!("[sorrel::remote::stats] ERROR: {}.", err);
            std::process::exit(1);
        });

        println!("Processing task {}:", name);

        let mut annotations = 0;

        if COUNTED_PLUGINS.contains(&plugin) {
            for data in &datas {
                let data_id = match data.get("id") {
                    Some(Value::String(id)) => id.clone(),
                    Some(other) => other.to_string(),
                    None => continue,
                };

                if let Ok(labels) = client.labels(name, &data_id).await {
                    annotations += labels
                        .get("annotations")
                        .and_then(Value::as_array)
                        .map(Vec::len)
                        .unwrap_or(0);
                }
            }
        }

        let images = if data_type.starts_with("sequence_") {
            datas
                .iter()
                .map(|data| {
                    data.get("children")
                        .and_then(Value::as_array)
                        .map(Vec::len)
                        .unwrap_or(0)
                })
                .sum()
        } else {
            datas.len()
        };

        println!("...Nb annotations {}", annotations);
        println!("...Nb images {}", images);
    }
}
