use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_node1_path")]
    pub node1_path: String,
    #[serde(default = "default_node2_path")]
    pub node2_path: String,
    #[serde(default = "default_overscan")]
    pub overscan: i64,
    #[serde(default = "default_sample_blocks")]
    pub sample_blocks: i64,
}

fn default_db_path() -> String {
    "./chain-data".to_string()
}

fn default_node1_path() -> String {
    "./node1-data".to_string()
}

fn default_node2_path() -> String {
    "./node2-data".to_string()
}

fn default_overscan() -> i64 {
    10
}

fn default_sample_blocks() -> i64 {
    10
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
