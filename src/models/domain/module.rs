use serde::{Deserialize, Serialize};

use crate::models::domain::{new_public_id, Audit};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Module {
    pub id: i64,
    pub public_id: String,
    pub folder_id: i64,
    pub name: String,
    pub desc: String,
    pub audit: Audit,
}

impl Module {
    pub fn new(id: i64, folder_id: i64, name: &str, desc: &str, modified_by: Option<String>) -> Self {
        Module {
            id,
            public_id: new_public_id(),
            folder_id,
            name: name.to_string(),
            desc: desc.to_string(),
            audit: Audit::new(modified_by),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ModulePatch {
    pub folder_id: Option<i64>,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub modified_by: Option<String>,
}

impl ModulePatch {
    pub fn apply(self, module: &mut Module) {
        if let Some(folder_id) = self.folder_id {
            module.folder_id = folder_id;
        }
        if let Some(name) = self.name {
            module.name = name;
        }
        if let Some(desc) = self.desc {
            module.desc = desc;
        }
        module.audit.touch(self.modified_by);
    }
}
