use std::env;
use secrecy::SecretString;

const DEV_SECRET_KEY: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    /// Signing key material for session tokens. Set once at boot, never rotated while serving.
    pub secret_key: SecretString,
    pub token_expiration_hours: i64,
    pub app_env: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "course-platform-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            secret_key: SecretString::from(
                env::var("SECRET_KEY").unwrap_or_else(|_| DEV_SECRET_KEY.to_string()),
            ),
            token_expiration_hours: env::var("TOKEN_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Validate that production-critical configuration is set.
    /// Returns a description of the first problem found.
    pub fn validate_for_production(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        let secret_key = self.secret_key.expose_secret();

        if secret_key == DEV_SECRET_KEY {
            return Err(
                "SECRET_KEY is using the default value. Set SECRET_KEY to a secure random string."
                    .to_string(),
            );
        }

        if secret_key.len() < 32 {
            return Err(format!(
                "SECRET_KEY is too short ({}). Must be at least 32 characters.",
                secret_key.len()
            ));
        }

        Ok(())
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "course-platform-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            secret_key: SecretString::from("test_secret_key".to_string()),
            token_expiration_hours: 24,
            app_env: "test".to_string(),
        }
    }
}
