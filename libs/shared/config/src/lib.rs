use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("DATABASE_URL not set, using local hospital.db");
                    "sqlite://hospital.db?mode=rwc".to_string()
                }),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or_else(|| {
                    warn!("PORT not set or invalid, using 3000");
                    3000
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.database_url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    #[test]
    fn default_config_is_usable() {
        let config = AppConfig {
            database_url: "sqlite://hospital.db?mode=rwc".to_string(),
            port: 3000,
        };
        assert!(config.is_configured());
    }

    #[test]
    fn empty_database_url_is_not_configured() {
        let config = AppConfig {
            database_url: String::new(),
            port: 3000,
        };
        assert!(!config.is_configured());
    }
}
