//! Configuration module
//!
//! Environment-driven configuration for the helpdesk service: server,
//! database, storage, attachment policy and AI extraction settings.

use std::env;

// Defaults
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const SERVER_PORT: u16 = 4000;
const MAX_ATTACHMENT_SIZE_MB: usize = 10;
const EXTRACTION_TIMEOUT_SECS: u64 = 30;

/// Service configuration, loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Attachment storage
    pub local_storage_path: String,
    // Attachment policy
    pub max_attachment_size_bytes: usize,
    pub attachment_allowed_extensions: Vec<String>,
    // Intake policy. The schema deliberately has no unique constraint on
    // k_number; this switch controls the application-level duplicate check.
    pub reject_duplicate_k_number: bool,
    // AI extraction providers (each optional; tried in order, regex fallback last)
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub extraction_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production = environment.to_lowercase() == "production"
            || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_attachment_size_mb = env::var("MAX_ATTACHMENT_SIZE_MB")
            .unwrap_or_else(|_| MAX_ATTACHMENT_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_ATTACHMENT_SIZE_MB);

        let attachment_allowed_extensions = env::var("ATTACHMENT_ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| "jpg,jpeg,png,gif,pdf,doc,docx,txt".to_string())
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .collect();

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|_| "./media".to_string()),
            max_attachment_size_bytes: max_attachment_size_mb * 1024 * 1024,
            attachment_allowed_extensions,
            reject_duplicate_k_number: env::var("REJECT_DUPLICATE_K_NUMBER")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            extraction_timeout_seconds: env::var("EXTRACTION_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| EXTRACTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(EXTRACTION_TIMEOUT_SECS),
        })
    }

    /// Fail-fast sanity checks, run once at startup.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.database_url.is_empty() {
            return Err(anyhow::anyhow!("DATABASE_URL must not be empty"));
        }
        if self.max_attachment_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_ATTACHMENT_SIZE_MB must be at least 1"));
        }
        if self.attachment_allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "ATTACHMENT_ALLOWED_EXTENSIONS must not be empty"
            ));
        }
        if self.extraction_timeout_seconds == 0 {
            return Err(anyhow::anyhow!(
                "EXTRACTION_TIMEOUT_SECONDS must be at least 1"
            ));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
