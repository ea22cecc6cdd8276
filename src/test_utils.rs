#[cfg(test)]
pub mod fixtures {
    use crate::{
        auth::Claims,
        models::domain::{Folder, Module, User, UserRole},
        repositories::Repositories,
    };

    /// Seeded rows use ids from 100 upwards so they never meet counter-issued ids.
    pub async fn seed_user(repos: &Repositories, id: i64, email: &str, role: UserRole) -> (User, Claims) {
        let user = repos
            .users
            .create(User::new(id, email, "not-a-real-hash".to_string(), role))
            .await
            .unwrap();
        let claims = Claims::new(&user, 1);
        (user, claims)
    }

    pub async fn seed_folder(repos: &Repositories, id: i64, owner_id: i64) -> Folder {
        repos
            .folders
            .create(Folder::new(id, owner_id, "Math", "", None))
            .await
            .unwrap()
    }

    pub async fn seed_module(repos: &Repositories, id: i64, folder_id: i64) -> Module {
        repos
            .modules
            .create(Module::new(id, folder_id, "Algebra", "", None))
            .await
            .unwrap()
    }
}
