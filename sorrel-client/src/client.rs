// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user account on the annotation server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: String,
    #[serde(default)]
    pub preferences: Value,
}

/// Outcome of creating a resource that may already exist server-side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// A thin session-authenticated client for the annotation server API
///
/// The server uses cookie sessions: `login` must succeed before any
/// other call. All endpoints live under `/api/v1`.
///
/// # Examples
///
/// ```no_run
/// use sorrel_client::AnnotationClient;
///
/// # async fn run() -> anyhow::Result<()> {
/// let client = AnnotationClient::new("http://localhost:3000")?;
/// client.login("admin", "admin").await?;
/// let tasks = client.tasks().await?;
/// # Ok(())
/// # }
/// ```
pub struct AnnotationClient {
    client: Client,
    base: String,
}

impl AnnotationClient {
    /// Initialize a client for the annotation server at the given URL
    pub fn new(url: &str) -> Result<AnnotationClient> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(AnnotationClient {
            client,
            base: format!("{}/api/v1", url.trim_end_matches('/')),
        })
    }

    /// Open an authenticated session
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/login/", self.base))
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await
            .context("Failed to reach annotation server")?;

        if response.status() != StatusCode::OK {
            return Err(anyhow!("Login failed with status {}", response.status()));
        }

        Ok(())
    }

    /// Create a user, resetting the account if it already exists
    pub async fn create_user(&self, user: &User) -> Result<CreateOutcome> {
        let response = self
            .client
            .post(format!("{}/users/", self.base))
            .json(user)
            .send()
            .await
            .context("Failed to send user creation request")?;

        match response.status() {
            StatusCode::CREATED => Ok(CreateOutcome::Created),
            StatusCode::BAD_REQUEST => {
                self.update_user(user).await?;
                Ok(CreateOutcome::AlreadyExists)
            }
            status => Err(anyhow!("User creation failed with status {}", status)),
        }
    }

    /// Update an existing user account
    pub async fn update_user(&self, user: &User) -> Result<()> {
        let response = self
            .client
            .put(format!("{}/users/{}", self.base, user.username))
            .json(user)
            .send()
            .await
            .context("Failed to send user update request")?;

        if !response.status().is_success() {
            return Err(anyhow!("User update failed with status {}", response.status()));
        }

        Ok(())
    }

    /// Create a task from a descriptor body
    pub async fn create_task(&self, task: &Value) -> Result<CreateOutcome> {
        let response = self
            .client
            .post(format!("{}/tasks/", self.base))
            .json(task)
            .send()
            .await
            .context("Failed to send task creation request")?;

        match response.status() {
            StatusCode::CREATED => Ok(CreateOutcome::Created),
            StatusCode::BAD_REQUEST => Ok(CreateOutcome::AlreadyExists),
            status => Err(anyhow!("Task creation failed with status {}", status)),
        }
    }

    /// List all tasks on the server
    pub async fn tasks(&self) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(format!("{}/tasks/", self.base))
            .send()
            .await
            .context("Failed to list tasks")?;

        response.json().await.context("Failed to parse task list")
    }

    /// List the data entries attached to a dataset
    pub async fn dataset_data(&self, dataset_id: &str) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(format!("{}/datasets/{}/data/", self.base, dataset_id))
            .send()
            .await
            .context("Failed to list dataset data")?;

        response.json().await.context("Failed to parse dataset data")
    }

    /// Retrieve the labels for one data entry of a task
    pub async fn labels(&self, task_name: &str, data_id: &str) -> Result<Value> {
        let response = self
            .client
            .get(format!("{}/tasks/{}/labels/{}", self.base, task_name, data_id))
            .send()
            .await
            .context("Failed to retrieve labels")?;

        response.json().await.context("Failed to parse labels")
    }
}
