//! Service settings.
//!
//! Built-in defaults, then an optional TOML/JSON/YAML file, then environment
//! variables such as `QBANK_SERVER__ADDRESS` or `QBANK_AUTH__ADMIN_PASSWORD`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ::config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::StaticAccessControl;
use crate::ingest::IngestPolicy;
use crate::protocol::DEFAULT_PORT;
use crate::store::{InMemoryQuestionStore, QuestionStore, SqliteQuestionStore, StoreError};

pub const ENV_PREFIX: &str = "QBANK";

/// Users accepted when no registry is configured.
const LEGACY_USERS: [(&str, &str); 3] = [
    ("alice", "wonderland"),
    ("bob", "builder"),
    ("clementine", "mandarine"),
];
const LEGACY_ADMIN_PASSWORD: &str = "4dm1N";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub ingest: IngestSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: format!("0.0.0.0:{DEFAULT_PORT}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file.
    pub path: PathBuf,
    /// Keep questions in memory only; nothing survives a restart.
    pub in_memory: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("questionnaire.db"),
            in_memory: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Username to password. Unset means the built-in demo users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<HashMap<String, String>>,
    pub admin_password: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            users: None,
            admin_password: LEGACY_ADMIN_PASSWORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    pub require_correct_option: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
    pub ansi: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            ansi: true,
        }
    }
}

impl Settings {
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(file) = file {
            builder = builder.add_source(File::from(file));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn access_control(&self) -> StaticAccessControl {
        let users = match &self.auth.users {
            Some(users) => users.clone(),
            None => {
                warn!("no users configured, falling back to the built-in demo accounts");
                LEGACY_USERS
                    .iter()
                    .map(|(user, password)| (user.to_string(), password.to_string()))
                    .collect()
            }
        };
        if self.auth.admin_password == LEGACY_ADMIN_PASSWORD {
            warn!("admin password is the built-in default");
        }
        StaticAccessControl::new(users, self.auth.admin_password.clone())
    }

    pub fn ingest_policy(&self) -> IngestPolicy {
        IngestPolicy {
            require_correct_option: self.ingest.require_correct_option,
        }
    }

    /// Open the configured store, creating the schema if needed.
    pub fn open_store(&self) -> Result<Arc<dyn QuestionStore>, StoreError> {
        if self.database.in_memory {
            return Ok(Arc::new(InMemoryQuestionStore::new()));
        }
        let store = SqliteQuestionStore::open(&self.database.path)?;
        store.ensure_schema()?;
        Ok(Arc::new(store))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::auth::{AccessControl, Credentials};

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.address, "0.0.0.0:8000");
        assert_eq!(settings.database.path, PathBuf::from("questionnaire.db"));
        assert!(!settings.ingest.require_correct_option);

        let access = settings.access_control();
        assert!(access.authenticate_user(&Credentials::new("bob", "builder")).is_ok());
        assert!(access.authenticate_admin(&Credentials::new("", "4dm1N")).is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[server]
address = "127.0.0.1:9000"

[auth]
admin_password = "s3cret"

[auth.users]
dora = "explorer"

[ingest]
require_correct_option = true
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.server.address, "127.0.0.1:9000");
        assert!(settings.ingest.require_correct_option);
        assert_eq!(settings.database.path, PathBuf::from("questionnaire.db"));

        let access = settings.access_control();
        assert!(access.authenticate_user(&Credentials::new("dora", "explorer")).is_ok());
        assert!(access.authenticate_user(&Credentials::new("alice", "wonderland")).is_err());
        assert!(access.authenticate_admin(&Credentials::new("", "4dm1N")).is_err());
        assert!(access.authenticate_admin(&Credentials::new("", "s3cret")).is_ok());
    }

    #[test]
    fn test_in_memory_store() {
        let mut settings = Settings::default();
        settings.database.in_memory = true;
        let store = settings.open_store().unwrap();
        assert_eq!(store.stats().unwrap().total, 0);
    }
}
