use crate::common::error::{AppError, ServiceResult};
use axum::body::Bytes;
use std::path::Path;
use uuid::Uuid;

pub const LOGO_URL_PREFIX: &str = "/api/teams/team-images/";

const SUPPORTED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// A plain file name inside the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoFilename(String);

impl LogoFilename {
    /// A fresh unique name keeping the uploaded file's extension.
    pub fn generate(original_filename: Option<&str>) -> ServiceResult<Self> {
        let extension = original_filename
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or(AppError::LogosUnsupportedType)?;
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::LogosUnsupportedType);
        }
        Ok(Self(format!("{}.{extension}", Uuid::new_v4())))
    }

    /// Validates a name coming from a request path.
    pub fn parse(filename: &str) -> ServiceResult<Self> {
        let is_plain_name = !filename.is_empty()
            && !filename.contains(['/', '\\'])
            && !filename.contains("..");
        if !is_plain_name {
            return Err(AppError::LogosInvalidFilename);
        }
        Ok(Self(filename.to_owned()))
    }

    /// Recovers the file name from a stored `logo_path`.
    pub fn from_logo_path(logo_path: &str) -> Option<Self> {
        let filename = logo_path.rsplit('/').next()?;
        Self::parse(filename).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn logo_path(&self) -> String {
        format!("{LOGO_URL_PREFIX}{}", self.0)
    }

    pub fn content_type(&self) -> &'static str {
        let extension = Path::new(&self.0)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        }
    }
}

/// An uploaded logo as received from a multipart form.
#[derive(Debug)]
pub struct LogoUpload {
    pub original_filename: Option<String>,
    pub bytes: Bytes,
}

/// A stored logo read back for serving.
pub struct Logo {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}
