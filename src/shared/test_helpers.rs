#[cfg(test)]
use fake::{faker::name::en::Name, Fake};

#[cfg(test)]
use crate::core::app::{build_app, AppServices};
#[cfg(test)]
use crate::core::config::{AppConfig, AuthConfig, SwaggerConfig, UploadConfig};
#[cfg(test)]
use crate::features::auth::{services::TokenService, JwtValidator};
#[cfg(test)]
use crate::features::prompts::dtos::CreatePromptDto;
#[cfg(test)]
use crate::features::prompts::models::Category;
#[cfg(test)]
use crate::features::prompts::PromptService;
#[cfg(test)]
use crate::features::uploads::UploadService;
#[cfg(test)]
use crate::modules::prompt_store::MemoryPromptStore;
#[cfg(test)]
use crate::modules::storage::LocalStorage;
#[cfg(test)]
use axum_test::TestServer;
#[cfg(test)]
use std::{path::PathBuf, sync::Arc, time::Duration};

/// Admin credentials `admin` / `admin` with a 30 minute token lifetime
#[cfg(test)]
pub fn auth_config() -> AuthConfig {
    AuthConfig {
        admin_username: "admin".to_string(),
        admin_password: "admin".to_string(),
        jwt_secret: "test-secret".to_string(),
        token_ttl: Duration::from_secs(30 * 60),
        jwt_leeway: Duration::from_secs(0),
    }
}

/// A valid public submission body with a generated author
#[cfg(test)]
pub fn create_prompt_dto() -> CreatePromptDto {
    CreatePromptDto {
        title: "Neon city skyline".to_string(),
        prompt_text: "A neon city skyline at night, cinematic lighting".to_string(),
        image_url: None,
        category: Category::Post,
        tags: vec!["city".to_string()],
        author: Some(Name().fake()),
    }
}

/// Full router over an in-memory store and a throwaway upload directory
#[cfg(test)]
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryPromptStore>,
    pub tokens: Arc<TokenService>,
    pub upload_dir: PathBuf,
}

#[cfg(test)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_max_upload(10 * 1024 * 1024).await
    }

    pub async fn with_max_upload(max_file_size: usize) -> Self {
        let auth = auth_config();
        let upload = UploadConfig {
            dir: std::env::temp_dir().join(format!("prompt-center-app-{}", uuid::Uuid::new_v4())),
            public_base_url: "http://testserver".to_string(),
            max_file_size,
        };

        let store = Arc::new(MemoryPromptStore::new());
        let tokens = Arc::new(TokenService::new(&auth));
        let storage = LocalStorage::new(&upload).await.unwrap();

        let services = AppServices {
            prompts: Arc::new(PromptService::new(store.clone())),
            tokens: Arc::clone(&tokens),
            validator: Arc::new(JwtValidator::new(&auth)),
            uploads: Arc::new(UploadService::new(storage, upload.max_file_size)),
            upload_dir: upload.dir.clone(),
        };

        let app_config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["*".to_string()],
        };
        let swagger = SwaggerConfig {
            username: None,
            password: None,
            title: "Prompt Center API".to_string(),
            version: "0.1.0".to_string(),
            description: "test".to_string(),
        };

        let server = TestServer::new(build_app(services, &app_config, &swagger)).unwrap();

        Self {
            server,
            store,
            tokens,
            upload_dir: upload.dir,
        }
    }

    /// A valid bearer token for the configured admin
    pub fn admin_token(&self) -> String {
        self.tokens.issue_token("admin").unwrap()
    }
}

#[cfg(test)]
impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}
