use crate::errors::AppError;
use crate::models::{AppData, CompletionLog, QuestTemplate};
use serde::de::DeserializeOwned;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

// Two snapshots, overwritten whole on every mutation.
const TEMPLATES_FILE: &str = "quests.json";
const LOG_FILE: &str = "log.json";

pub fn resolve_data_dir() -> PathBuf {
    match env::var("QUESTS_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => PathBuf::from("data"),
    }
}

/// Loads both snapshots. A missing, unreadable or corrupt file falls back
/// to its empty default so the service always starts usable.
pub async fn load_data(dir: &Path) -> AppData {
    let templates: Vec<QuestTemplate> = load_snapshot(&dir.join(TEMPLATES_FILE)).await;
    let log: CompletionLog = load_snapshot(&dir.join(LOG_FILE)).await;
    AppData { templates, log }
}

async fn load_snapshot<T: DeserializeOwned + Default>(path: &Path) -> T {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => {
                error!("failed to parse {}: {err}", path.display());
                T::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => T::default(),
        Err(err) => {
            error!("failed to read {}: {err}", path.display());
            T::default()
        }
    }
}

pub async fn persist_data(dir: &Path, data: &AppData) -> Result<(), AppError> {
    let templates = serde_json::to_vec_pretty(&data.templates).map_err(AppError::internal)?;
    let log = serde_json::to_vec_pretty(&data.log).map_err(AppError::internal)?;
    fs::write(dir.join(TEMPLATES_FILE), templates)
        .await
        .map_err(AppError::internal)?;
    fs::write(dir.join(LOG_FILE), log)
        .await
        .map_err(AppError::internal)?;
    Ok(())
}
