use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::media::{Media, MediaMetadata};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MediaDto {
    pub id: String,
    pub file_url: String,
    pub file_name: String,
    pub file_type: String,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Media> for MediaDto {
    fn from(m: Media) -> Self {
        Self {
            id: m.id,
            file_url: m.file_url,
            file_name: m.file_name,
            file_type: m.file_type,
            alt_text: m.alt_text,
            caption: m.caption,
            description: m.description,
            title: m.title,
            uploaded_by: m.uploaded_by,
            created_at: m.audit.created_at,
            updated_at: m.audit.updated_at,
        }
    }
}

/// Omitted fields keep their current value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct MediaMetadataRequest {
    #[validate(length(max = 255))]
    pub alt_text: Option<String>,
    #[validate(length(max = 500))]
    pub caption: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub title: Option<String>,
}

impl From<MediaMetadataRequest> for MediaMetadata {
    fn from(r: MediaMetadataRequest) -> Self {
        MediaMetadata {
            alt_text: r.alt_text,
            caption: r.caption,
            description: r.description,
            title: r.title,
        }
    }
}

/// `multipart/form-data` body of `POST /media`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
