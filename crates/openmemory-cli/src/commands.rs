//! Command execution against any [`MemoryService`].

use crate::Command;
use openmemory_client::{ClientError, ListQuery, MemoryService, NewMemory, SearchQuery};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Write;

/// Characters of content shown per search hit.
const PREVIEW_CHARS: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One-line stderr report for a failed call: status and server message for
/// `RequestFailed`, the error text otherwise.
pub fn failure_message(err: &ClientError) -> String {
    match err.status() {
        Some(status) => format!(
            "Error: HTTP {status}: {}",
            err.server_message().unwrap_or_default()
        ),
        None => format!("Error: {err}"),
    }
}

/// Runs one command, writing human-readable output to `out`.
pub async fn run(
    command: Command,
    service: &dyn MemoryService,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Health => {
            let health = service.health_check().await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&health)?)?;
        }
        Command::Add {
            content,
            tags,
            metadata,
        } => {
            let memory = NewMemory::new(content)
                .with_metadata(metadata.into_iter().collect())
                .with_tags(tags);
            let id = service.add_memory(&memory).await?;
            tracing::info!(id = %id, "memory created");
            writeln!(out, "{id}")?;
        }
        Command::Search { query, limit, tags } => {
            let mut q = SearchQuery::new(query).with_limit(limit);
            if !tags.is_empty() {
                q = q.with_tags(tags);
            }
            let results = service.search_memories(&q).await?;
            for r in &results {
                writeln!(
                    out,
                    "{}\t{:.2}\t{}",
                    r.memory().id().unwrap_or("-"),
                    r.similarity_score().unwrap_or_default(),
                    r.memory().preview(PREVIEW_CHARS)
                )?;
            }
        }
        Command::Get { id } => {
            let memory = service.get_memory(&id).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&memory)?)?;
        }
        Command::Delete { id } => {
            let deleted = service.delete_memory(&id).await?;
            writeln!(out, "{}", if deleted { "deleted" } else { "not deleted" })?;
        }
        Command::List { offset, limit } => {
            let memories = service.list_memories(&ListQuery::new(offset, limit)).await?;
            for m in &memories {
                writeln!(
                    out,
                    "{}\t{}",
                    m.id().unwrap_or("-"),
                    m.preview(PREVIEW_CHARS)
                )?;
            }
        }
        Command::Stats => {
            let stats = service.get_stats().await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
        }
        Command::Demo => demo(service, out).await?,
    }
    Ok(())
}

async fn demo(service: &dyn MemoryService, out: &mut dyn Write) -> Result<(), CliError> {
    let health = service.health_check().await?;
    let status = health
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    writeln!(out, "Service status: {status}")?;

    let metadata: HashMap<String, Value> = [
        ("source".to_string(), json!("documentation")),
        ("language".to_string(), json!("ja")),
    ]
    .into_iter()
    .collect();
    let id = service
        .add_memory(
            &NewMemory::new("ICPは分散型クラウドコンピュータプラットフォームです")
                .with_metadata(metadata)
                .with_tags(["ICP", "blockchain", "tech"]),
        )
        .await?;
    writeln!(out, "Created memory: {id}")?;

    let results = service
        .search_memories(&SearchQuery::new("ICPの特徴").with_limit(5))
        .await?;
    writeln!(out, "Found {} relevant memories:", results.len())?;
    for r in &results {
        writeln!(
            out,
            "  - {} (score: {:.2})",
            r.memory().preview(PREVIEW_CHARS),
            r.similarity_score().unwrap_or_default()
        )?;
    }

    let memories = service.list_memories(&ListQuery::new(0, 10)).await?;
    writeln!(out, "Total memories: {}", memories.len())?;

    let stats = service.get_stats().await?;
    writeln!(out, "Service stats: {}", Value::Object(stats))?;
    Ok(())
}
