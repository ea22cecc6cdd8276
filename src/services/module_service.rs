use validator::Validate;

use crate::{
    auth::Claims,
    errors::AppResult,
    models::{
        domain::{Module, ModulePatch},
        dto::{CreateModuleRequest, UpdateModuleRequest},
    },
    repositories::Repositories,
    services::{
        cascade::{Cascade, CascadeReport},
        next_id,
        ownership::{module_not_found, owned_folder, visible_folder_ids},
    },
};

pub struct ModuleService {
    repos: Repositories,
    cascade: Cascade,
}

impl ModuleService {
    pub fn new(repos: Repositories, cascade: Cascade) -> Self {
        Self { repos, cascade }
    }

    pub async fn create_module(&self, actor: &Claims, request: CreateModuleRequest) -> AppResult<Module> {
        request.validate()?;
        let folder = owned_folder(&self.repos, actor, request.folder_id).await?;

        let id = next_id::<Module>(&self.repos).await?;
        let modified_by = request.modified_by.or_else(|| actor.actor_name());
        let module = Module::new(id, folder.id, &request.name, &request.desc, modified_by);

        let module = self.repos.modules.create(module).await?;
        log::info!("Created module {} in folder {}", module.public_id, folder.public_id);
        Ok(module)
    }

    pub async fn list_modules(&self, actor: &Claims) -> AppResult<Vec<Module>> {
        match visible_folder_ids(&self.repos, actor).await? {
            None => self.repos.modules.find_all().await,
            Some(folder_ids) => self.repos.modules.find_by_folders(&folder_ids).await,
        }
    }

    pub async fn list_by_folder(&self, actor: &Claims, folder_id: i64) -> AppResult<Vec<Module>> {
        owned_folder(&self.repos, actor, folder_id).await?;
        self.repos.modules.find_by_folders(&[folder_id]).await
    }

    pub async fn get_module(&self, actor: &Claims, public_id: &str) -> AppResult<Module> {
        let module = self
            .repos
            .modules
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(module_not_found)?;
        owned_folder(&self.repos, actor, module.folder_id).await?;
        Ok(module)
    }

    pub async fn update_module(
        &self,
        actor: &Claims,
        public_id: &str,
        request: UpdateModuleRequest,
    ) -> AppResult<Module> {
        request.validate()?;
        let mut module = self.get_module(actor, public_id).await?;

        let mut patch = ModulePatch::from(request);
        if let Some(folder_id) = patch.folder_id {
            owned_folder(&self.repos, actor, folder_id).await?;
        }
        if patch.modified_by.is_none() {
            patch.modified_by = actor.actor_name();
        }
        patch.apply(&mut module);

        let module = self.repos.modules.update(module).await?;
        log::info!("Updated module {}", module.public_id);
        Ok(module)
    }

    pub async fn delete_module(&self, actor: &Claims, public_id: &str) -> AppResult<CascadeReport> {
        let module = self.get_module(actor, public_id).await?;
        let report = self.cascade.delete_modules(&[module.id]).await?;
        log::info!("Deleted module {} with {:?}", module.public_id, report);
        Ok(report)
    }
}
