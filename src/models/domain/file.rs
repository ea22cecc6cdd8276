use serde::{Deserialize, Serialize};

use crate::models::domain::{new_public_id, Audit};

/// Uploaded document attached to a module. The payload itself lives in the
/// blob store under `blob_key`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct File {
    pub id: i64,
    pub public_id: String,
    pub module_id: i64,
    pub name: String,
    pub desc: String,
    pub file_name: String,
    pub blob_key: String,
    pub size: u64,
    pub audit: Audit,
}

impl File {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        module_id: i64,
        name: &str,
        desc: &str,
        file_name: &str,
        blob_key: String,
        size: u64,
        modified_by: Option<String>,
    ) -> Self {
        File {
            id,
            public_id: new_public_id(),
            module_id,
            name: name.to_string(),
            desc: desc.to_string(),
            file_name: file_name.to_string(),
            blob_key,
            size,
            audit: Audit::new(modified_by),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FilePatch {
    pub module_id: Option<i64>,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub modified_by: Option<String>,
}

impl FilePatch {
    pub fn apply(self, file: &mut File) {
        if let Some(module_id) = self.module_id {
            file.module_id = module_id;
        }
        if let Some(name) = self.name {
            file.name = name;
        }
        if let Some(desc) = self.desc {
            file.desc = desc;
        }
        file.audit.touch(self.modified_by);
    }
}
