use crate::config::AppConfig;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// 没有任何管理员时创建默认管理员
pub async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_admins().await {
        Ok(count) if count > 0 => {
            debug!("Found {} admin account(s), skipping admin seed", count);
            return;
        }
        Ok(_) => info!("No admin account found, creating default admin..."),
        Err(e) => {
            warn!("Failed to count admins: {}, skipping admin seed", e);
            return;
        }
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN_PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
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

    let email = AppConfig::get().admin.email.trim().to_lowercase();
    match storage.create_admin(&email, &password_hash).await {
        Ok(admin) => info!("Default admin created (ID: {}, email: {})", admin.id, admin.email),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    StartupContext { storage }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_length_and_charset() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
        assert!(pwd.chars().all(|c| c.is_ascii_graphic()));
    }
}
