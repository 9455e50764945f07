//! Service configuration from environment variables

use anyhow::Result;

/// Shop service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listener port
    pub port: u16,
    /// Secret used to sign session tokens
    pub session_secret: String,
    /// Session token lifetime in seconds
    pub session_ttl: u64,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SESSION_SECRET`: secret for signing session tokens (required)
    /// - `PORT`: HTTP listener port (default: 5000)
    /// - `SESSION_TTL_SECONDS`: session lifetime in seconds (default: 86400)
    pub fn from_env() -> Result<Self> {
        let session_secret = std::env::var("SESSION_SECRET")
            .map_err(|_| anyhow::anyhow!("SESSION_SECRET environment variable not set"))?;

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .unwrap_or(5000);

        let session_ttl = std::env::var("SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86400);

        Ok(AppConfig {
            port,
            session_secret,
            session_ttl,
        })
    }
}

/// Credentials for seeding the admin account, read only by the bootstrap path
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub admin_email: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl BootstrapConfig {
    /// Create a new BootstrapConfig from environment variables
    ///
    /// # Environment Variables
    /// - `ADMIN_EMAIL`: email of the seeded admin user (required)
    /// - `ADMIN_USERNAME`: username of the seeded admin user (required)
    /// - `ADMIN_PASSWORD`: password of the seeded admin user (required)
    pub fn from_env() -> Result<Self> {
        let admin_email = std::env::var("ADMIN_EMAIL")
            .map_err(|_| anyhow::anyhow!("ADMIN_EMAIL environment variable not set"))?;

        let admin_username = std::env::var("ADMIN_USERNAME")
            .map_err(|_| anyhow::anyhow!("ADMIN_USERNAME environment variable not set"))?;

        let admin_password = std::env::var("ADMIN_PASSWORD")
            .map_err(|_| anyhow::anyhow!("ADMIN_PASSWORD environment variable not set"))?;

        Ok(BootstrapConfig {
            admin_email,
            admin_username,
            admin_password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_app_config_defaults() {
        unsafe {
            std::env::set_var("SESSION_SECRET", "test-secret");
            std::env::remove_var("PORT");
            std::env::remove_var("SESSION_TTL_SECONDS");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.session_ttl, 86400);
        assert_eq!(config.session_secret, "test-secret");

        unsafe {
            std::env::remove_var("SESSION_SECRET");
        }
    }

    #[test]
    #[serial]
    fn test_app_config_requires_session_secret() {
        unsafe {
            std::env::remove_var("SESSION_SECRET");
        }

        assert!(AppConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_app_config_custom_port() {
        unsafe {
            std::env::set_var("SESSION_SECRET", "test-secret");
            std::env::set_var("PORT", "8080");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 8080);

        unsafe {
            std::env::remove_var("SESSION_SECRET");
            std::env::remove_var("PORT");
        }
    }

    #[test]
    #[serial]
    fn test_bootstrap_config_requires_all_credentials() {
        unsafe {
            std::env::set_var("ADMIN_EMAIL", "admin@example.com");
            std::env::set_var("ADMIN_USERNAME", "admin");
            std::env::remove_var("ADMIN_PASSWORD");
        }

        assert!(BootstrapConfig::from_env().is_err());

        unsafe {
            std::env::set_var("ADMIN_PASSWORD", "change-me");
        }

        let config = BootstrapConfig::from_env().unwrap();
        assert_eq!(config.admin_email, "admin@example.com");
        assert_eq!(config.admin_username, "admin");

        unsafe {
            std::env::remove_var("ADMIN_EMAIL");
            std::env::remove_var("ADMIN_USERNAME");
            std::env::remove_var("ADMIN_PASSWORD");
        }
    }
}
