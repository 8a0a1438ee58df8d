use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::models::logos::{Logo, LogoFilename, LogoUpload};
use std::io::ErrorKind;
use tracing::{info, warn};

pub async fn save<C: Context>(ctx: &C, upload: LogoUpload) -> ServiceResult<LogoFilename> {
    if upload.bytes.is_empty() {
        return Err(AppError::LogosMissing);
    }
    let filename = LogoFilename::generate(upload.original_filename.as_deref())?;
    let path = ctx.upload_dir().join(filename.as_str());
    tokio::fs::create_dir_all(ctx.upload_dir()).await?;
    match tokio::fs::write(&path, &upload.bytes).await {
        Ok(()) => {
            info!(filename = filename.as_str(), size = upload.bytes.len(), "Stored team logo");
            Ok(filename)
        }
        Err(e) => unexpected(e),
    }
}

pub async fn fetch<C: Context>(ctx: &C, filename: &str) -> ServiceResult<Logo> {
    let filename = LogoFilename::parse(filename)?;
    let path = ctx.upload_dir().join(filename.as_str());
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(Logo {
            content_type: filename.content_type(),
            bytes,
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::LogosNotFound),
        Err(e) => unexpected(e),
    }
}

/// Removes the file behind a stored `logo_path`. Failures are logged, never returned.
pub async fn remove<C: Context>(ctx: &C, logo_path: &str) {
    let Some(filename) = LogoFilename::from_logo_path(logo_path) else {
        warn!(logo_path, "Refusing to delete logo with unexpected path");
        return;
    };
    let path = ctx.upload_dir().join(filename.as_str());
    match tokio::fs::remove_file(&path).await {
        Ok(()) => info!(filename = filename.as_str(), "Deleted team logo"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(filename = filename.as_str(), "Could not delete team logo: {e}"),
    }
}
