use serde::{Deserialize, Serialize};

use crate::models::domain::{new_public_id, Audit};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Folder {
    pub id: i64,
    pub public_id: String,
    pub user_id: i64,
    pub name: String,
    pub desc: String,
    pub audit: Audit,
}

impl Folder {
    pub fn new(id: i64, user_id: i64, name: &str, desc: &str, modified_by: Option<String>) -> Self {
        Folder {
            id,
            public_id: new_public_id(),
            user_id,
            name: name.to_string(),
            desc: desc.to_string(),
            audit: Audit::new(modified_by),
        }
    }
}

/// Named optional fields; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default)]
pub struct FolderPatch {
    pub user_id: Option<i64>,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub modified_by: Option<String>,
}

impl FolderPatch {
    pub fn apply(self, folder: &mut Folder) {
        if let Some(user_id) = self.user_id {
            folder.user_id = user_id;
        }
        if let Some(name) = self.name {
            folder.name = name;
        }
        if let Some(desc) = self.desc {
            folder.desc = desc;
        }
        folder.audit.touch(self.modified_by);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_only_overwrites_supplied_fields() {
        let mut folder = Folder::new(1, 7, "Math", "numbers", None);
        FolderPatch {
            name: Some("Mathematics".to_string()),
            ..Default::default()
        }
        .apply(&mut folder);

        assert_eq!(folder.name, "Mathematics");
        assert_eq!(folder.desc, "numbers");
        assert_eq!(folder.user_id, 7);
    }
}
