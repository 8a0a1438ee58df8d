use crate::common::context::Context;
use sqlx::{MySql, Pool};
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<MySql>,
    pub upload_dir: Arc<Path>,
}

impl Context for AppState {
    fn db(&self) -> &Pool<MySql> {
        &self.db
    }

    fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }
}
