//! Layered configuration loading
//!
//! Sources, lowest priority first:
//! 1. `default.toml` (required)
//! 2. `{environment}.toml` (optional)
//! 3. `local.toml` (optional)
//! 4. `HRMS_*` environment variables

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
pub const CONFIG_DIR_ENV: &str = "HRMS_CONFIG_DIR";

/// Environment variable for a single configuration file
pub const CONFIG_FILE_ENV: &str = "HRMS_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "HRMS";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Loads [`Settings`] from files and environment variables
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// When set, layered loading is skipped and only this file is read
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `HRMS_CONFIG_DIR`, `HRMS_CONFIG_FILE` and `HRMS_APP_ENV`
    ///
    /// # Errors
    ///
    /// Returns an error if both `HRMS_CONFIG_DIR` and `HRMS_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "HRMS_CONFIG_DIR and HRMS_CONFIG_FILE cannot both be set. \
                 Use HRMS_CONFIG_DIR for layered configuration or \
                 HRMS_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Read a single configuration file instead of the layered directory
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Use a specific environment for the `{environment}.toml` layer
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load and validate configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, parsing fails or
    /// the merged settings do not validate.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration without validating it, for callers that apply
    /// further overrides first.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        // HRMS_SERVER__PORT -> server.port
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(&path.to_string_lossy(), FileFormat::Toml).required(required),
        ))
    }

    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests touching process environment run one at a time
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const BASE_CONFIG: &str = r#"
[application]
name = "hrms-test"
version = "1.0.0"

[server]
host = "127.0.0.1"
port = 5000

[database]
url = "postgres://localhost/hrms_test"
max_connections = 10
min_connections = 1

[logger]
level = "info"

[logger.console]
enabled = true
colored = false

[employees]
default_role_id = 4
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Restores touched environment variables on drop
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            let mut guard = Self {
                vars_to_restore: Vec::new(),
            };
            for key in [CONFIG_DIR_ENV, CONFIG_FILE_ENV, AppEnvironment::ENV_VAR] {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_config_loader_new_default() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::new();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_config_loader_mutual_exclusivity_error() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("HRMS_CONFIG_DIR"));
                assert!(msg.contains("HRMS_CONFIG_FILE"));
            }
            other => panic!("Expected MutualExclusivityError, got {:?}", other),
        }
    }

    #[test]
    fn test_config_loader_environment_from_env() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set(AppEnvironment::ENV_VAR, "prod");

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.environment(), AppEnvironment::Production);
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let result = ConfigLoader::new().unwrap().load();
        match result {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_full_precedence_chain() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();

        let staging = r#"
[application]
name = "hrms-staging"

[server]
port = 5001

[database]
url = "postgres://staging/hrms"
"#;
        let local = r#"
[server]
port = 5002

[database]
url = "postgres://local/hrms"
"#;
        let temp_dir = setup_config_dir(&[
            ("default.toml", BASE_CONFIG),
            ("staging.toml", staging),
            ("local.toml", local),
        ]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set("HRMS_SERVER__PORT", "5003");
        env.set("HRMS_EMPLOYEES__DEFAULT_ROLE_ID", "3");

        let settings = ConfigLoader::new()
            .unwrap()
            .with_environment(AppEnvironment::Staging)
            .load()
            .expect("Should load settings");

        assert_eq!(settings.server.port, 5003);
        assert_eq!(settings.employees.default_role_id, 3);
        assert_eq!(settings.database.url, "postgres://local/hrms");
        assert_eq!(settings.application.name, "hrms-staging");
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.application.version, "1.0.0");
    }

    #[test]
    fn test_missing_environment_file_is_optional() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set(AppEnvironment::ENV_VAR, "production");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");
        assert_eq!(settings.application.name, "hrms-test");
    }

    #[test]
    fn test_with_config_file_skips_layers() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::new();

        let single = r#"
[server]
host = "0.0.0.0"
port = 8080

[database]
url = "postgres://single/hrms"

[cors]
allowed_origins = ["http://localhost:5173"]
"#;
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG), ("single.toml", single)]);

        let settings = ConfigLoader::new()
            .unwrap()
            .with_config_file(temp_dir.path().join("single.toml"))
            .load()
            .expect("Should load settings");

        assert_eq!(settings.server.address(), "0.0.0.0:8080");
        assert_eq!(settings.database.url, "postgres://single/hrms");
        assert_eq!(settings.cors.allowed_origins, vec!["http://localhost:5173"]);
        // Nothing from the directory layers leaks in
        assert_eq!(settings.application.name, "hrms-rs");
    }

    #[test]
    fn test_load_rejects_invalid_settings() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::new();

        let invalid = r#"
[database]
url = "mysql://localhost/hrms"
"#;
        let temp_dir = setup_config_dir(&[("invalid.toml", invalid)]);

        let result = ConfigLoader::new()
            .unwrap()
            .with_config_file(temp_dir.path().join("invalid.toml"))
            .load();
        match result {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "database.url"),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }
}
