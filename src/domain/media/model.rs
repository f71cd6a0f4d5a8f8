use chrono::{DateTime, Utc};

use crate::domain::audit::Audit;

/// An uploaded file and its editable metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    pub id: String,
    pub file_url: String,
    pub file_name: String,
    pub file_type: String,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub uploaded_by: String,
    pub audit: Audit,
}

/// Partial metadata update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct MediaMetadata {
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
}

impl MediaMetadata {
    pub fn is_empty(&self) -> bool {
        self.alt_text.is_none()
            && self.caption.is_none()
            && self.description.is_none()
            && self.title.is_none()
    }
}

impl Media {
    pub fn new(
        file_url: String,
        file_name: String,
        file_type: String,
        by: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_url,
            file_name,
            file_type,
            alt_text: None,
            caption: None,
            description: None,
            title: None,
            uploaded_by: by.to_string(),
            audit: Audit::created(by, now),
        }
    }

    pub fn apply(&mut self, metadata: MediaMetadata, by: &str, now: DateTime<Utc>) {
        if let Some(v) = metadata.alt_text {
            self.alt_text = Some(v);
        }
        if let Some(v) = metadata.caption {
            self.caption = Some(v);
        }
        if let Some(v) = metadata.description {
            self.description = Some(v);
        }
        if let Some(v) = metadata.title {
            self.title = Some(v);
        }
        self.audit.touch(by, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_metadata_update() {
        let mut m = Media::new(
            "/uploads/x-pool.jpg".into(),
            "x-pool.jpg".into(),
            "image/jpeg".into(),
            "a@b.c",
            Utc::now(),
        );
        m.apply(
            MediaMetadata {
                alt_text: Some("Pool".into()),
                ..Default::default()
            },
            "a@b.c",
            Utc::now(),
        );
        m.apply(
            MediaMetadata {
                title: Some("Rooftop pool".into()),
                ..Default::default()
            },
            "a@b.c",
            Utc::now(),
        );
        assert_eq!(m.alt_text.as_deref(), Some("Pool"));
        assert_eq!(m.title.as_deref(), Some("Rooftop pool"));
        assert!(m.caption.is_none());
    }
}
