use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bookkeeping carried by every stored entity.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Audit {
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    pub modified_by: String,
    pub active_status: bool,
}

impl Audit {
    pub fn new(modified_by: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            date_created: now,
            date_modified: now,
            modified_by: modified_by.unwrap_or_default(),
            active_status: true,
        }
    }

    pub fn touch(&mut self, modified_by: Option<String>) {
        self.date_modified = Utc::now();
        if let Some(modified_by) = modified_by {
            self.modified_by = modified_by;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_audit_is_active() {
        let audit = Audit::new(Some("admin@example.com".to_string()));
        assert!(audit.active_status);
        assert_eq!(audit.modified_by, "admin@example.com");
        assert_eq!(audit.date_created, audit.date_modified);
    }

    #[test]
    fn test_touch_keeps_modifier_when_not_supplied() {
        let mut audit = Audit::new(Some("first".to_string()));
        audit.touch(None);
        assert_eq!(audit.modified_by, "first");
        assert!(audit.date_modified >= audit.date_created);

        audit.touch(Some("second".to_string()));
        assert_eq!(audit.modified_by, "second");
    }
}
