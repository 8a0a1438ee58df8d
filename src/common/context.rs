use sqlx::{MySql, Pool};
use std::path::Path;

pub trait Context: Sync + Send {
    fn db(&self) -> &Pool<MySql>;
    /// Directory team logos are written to and served from.
    fn upload_dir(&self) -> &Path;
}
