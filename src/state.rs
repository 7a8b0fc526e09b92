use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared handle to the loaded store. Handlers hold the lock across
/// mutate + persist, so delete-plus-purge stays atomic under concurrent
/// requests.
#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_dir: PathBuf, data: AppData) -> Self {
        Self {
            data_dir,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
