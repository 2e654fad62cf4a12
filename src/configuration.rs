use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    pub yunikorn: YunikornSettings,
    #[serde(default)]
    pub health: HealthSettings,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct YunikornSettings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub secure: bool,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct HealthSettings {
    /// Upper bound for one readiness evaluation, enforced by the HTTP layer.
    #[serde(default = "default_readiness_timeout_secs")]
    pub readiness_timeout_secs: u64,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            readiness_timeout_secs: default_readiness_timeout_secs(),
        }
    }
}

impl HealthSettings {
    pub fn readiness_timeout(&self) -> Duration {
        Duration::from_secs(self.readiness_timeout_secs)
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_readiness_timeout_secs() -> u64 {
    5
}

impl DatabaseSettings {
    // Connection string: postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name,
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port,
        )
    }
}

impl YunikornSettings {
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // configuration.yaml first, then APP_* variables, e.g. APP_YUNIKORN__HOST
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
