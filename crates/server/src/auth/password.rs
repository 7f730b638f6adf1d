use anyhow::{Context, Result, anyhow};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::config::Argon2Config;

/// Argon2id hashing. Hashing is CPU bound, so the async entry points run on
/// the blocking pool.
#[derive(Clone)]
pub struct PasswordManager {
    argon2: Argon2<'static>,
}

impl PasswordManager {
    pub fn new(config: Argon2Config) -> Result<Self> {
        let params = Params::new(
            config.memory_cost_kib,
            config.time_cost,
            config.parallelism,
            None,
        )
        .map_err(|e| anyhow!("invalid argon2 parameters: {e}"))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn hash_sync(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow!("failed to hash password: {e}"))?;

        Ok(hash.to_string())
    }

    pub fn verify_sync(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| anyhow!("invalid password hash format: {e}"))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(anyhow!("password verification failed: {e}")),
        }
    }

    pub async fn hash(&self, password: String) -> Result<String> {
        let manager = self.clone();
        tokio::task::spawn_blocking(move || manager.hash_sync(&password))
            .await
            .context("password hashing task panicked")?
    }

    pub async fn verify(&self, password: String, hash: String) -> Result<bool> {
        let manager = self.clone();
        tokio::task::spawn_blocking(move || manager.verify_sync(&password, &hash))
            .await
            .context("password verification task panicked")?
    }
}

#[cfg(test)]
mod tests {
    use super::PasswordManager;
    use crate::config::Argon2Config;

    fn cheap_manager() -> PasswordManager {
        PasswordManager::new(Argon2Config {
            memory_cost_kib: 1024,
            time_cost: 1,
            parallelism: 1,
        })
        .expect("params should be valid")
    }

    #[test]
    fn hash_then_verify() {
        let manager = cheap_manager();
        let hash = manager.hash_sync("s3cret-pass").expect("hash");

        assert!(hash.starts_with("$argon2id$"));
        assert!(manager.verify_sync("s3cret-pass", &hash).expect("verify"));
        assert!(!manager.verify_sync("wrong-pass", &hash).expect("verify"));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let manager = cheap_manager();

        assert!(manager.verify_sync("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn zero_memory_cost_is_rejected() {
        let result = PasswordManager::new(Argon2Config {
            memory_cost_kib: 0,
            time_cost: 1,
            parallelism: 1,
        });

        assert!(result.is_err());
    }
}
