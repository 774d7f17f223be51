use crate::blob::{BlobStore, create_blob_store};
use crate::config::AppConfig;
use crate::models::admins::requests::CreateAdminRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_code;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub blobs: Arc<dyn BlobStore>,
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何管理员，则创建一个带 staff 标志的管理员
pub async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_admins().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} admin(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No admins found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count admins: {}, skipping admin seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_code(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin_request = CreateAdminRequest {
        username: AppConfig::get().identity.seed_admin_username.clone(),
        password: password_hash,
        full_name: Some("Administrator".to_string()),
        is_staff: true,
    };

    match storage.create_admin(admin_request).await {
        Ok(admin) => {
            info!(
                "Default admin account created successfully (ID: {}, username: {})",
                admin.id, admin.username
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、文件后端与默认管理员
pub async fn prepare_server_startup() -> StartupContext {
    let config = AppConfig::get();

    if cfg!(debug_assertions) {
        crate::blob::register::debug_blob_store_registry();
        debug!("Debug mode: Blob store registry is enabled");
    }

    if config.uses_development_secret() {
        warn!("Session secret is the built-in development value, set SESSION_SECRET in production");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let blobs = create_blob_store()
        .await
        .expect("Failed to create blob store");
    warn!("Blob store '{}' initialized", config.upload.backend);

    StartupContext { storage, blobs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn test_seed_admin_only_when_empty() {
        let storage = test_support::storage().await;

        seed_admin(&storage).await;
        assert_eq!(storage.count_admins().await.unwrap(), 1);
        let admin = storage
            .get_admin_by_username(&AppConfig::get().identity.seed_admin_username)
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_staff);

        seed_admin(&storage).await;
        assert_eq!(storage.count_admins().await.unwrap(), 1);
    }
}
