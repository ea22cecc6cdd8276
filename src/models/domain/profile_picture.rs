use serde::{Deserialize, Serialize};

use crate::models::domain::{new_public_id, Audit};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProfilePicture {
    pub id: i64,
    pub public_id: String,
    pub user_id: i64,
    pub desc: String,
    pub file_name: String,
    pub blob_key: String,
    pub audit: Audit,
}

impl ProfilePicture {
    pub fn new(
        id: i64,
        user_id: i64,
        desc: &str,
        file_name: &str,
        blob_key: String,
        modified_by: Option<String>,
    ) -> Self {
        ProfilePicture {
            id,
            public_id: new_public_id(),
            user_id,
            desc: desc.to_string(),
            file_name: file_name.to_string(),
            blob_key,
            audit: Audit::new(modified_by),
        }
    }
}
