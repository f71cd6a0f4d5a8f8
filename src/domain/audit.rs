use chrono::{DateTime, Utc};

/// Creation / modification stamps carried by every record.
#[derive(Debug, Clone, PartialEq)]
pub struct Audit {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// E-mail of the principal that created the record.
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl Audit {
    pub fn created(by: &str, now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
            created_by: Some(by.to_string()),
            updated_by: None,
        }
    }

    pub fn touch(&mut self, by: &str, now: DateTime<Utc>) {
        self.updated_at = now;
        self.updated_by = Some(by.to_string());
    }
}
