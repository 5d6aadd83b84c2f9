// src/config/mod.rs

//! Configuration for the storefront core
//!
//! Settings are assembled from layers:
//! - the built-in defaults
//! - configuration files (YAML, JSON or TOML, chosen by extension)
//! - in-memory JSON values supplied by the UI shell
//!
//! Layers are deep-merged in priority order (lowest first) and the result is
//! deserialized into [`StoreConfig`].

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub storage: StorageConfig,
    pub reviews: ReviewConfig,
    pub search: SearchConfig,
    /// ISO 4217 code used for prices and structured data
    pub currency: String,
    pub logging: LoggingConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            reviews: ReviewConfig::default(),
            search: SearchConfig::default(),
            currency: "INR".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Check values that serde alone cannot reject
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.storage.review_key.trim().is_empty() {
            errors.push(ValidationError::new("storage.review_key", "must not be empty"));
        }
        if self.reviews.max_name_len == 0 {
            errors.push(ValidationError::new("reviews.max_name_len", "must be at least 1"));
        }
        if self.reviews.max_text_len == 0 {
            errors.push(ValidationError::new("reviews.max_text_len", "must be at least 1"));
        }
        if self.reviews.default_author.trim().is_empty() {
            errors.push(ValidationError::new("reviews.default_author", "must not be empty"));
        }
        if self.currency.trim().is_empty() {
            errors.push(ValidationError::new("currency", "must not be empty"));
        }

        errors
    }

    /// [`validate`](Self::validate) folded into a single configuration error
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }

        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        let mut error = Error::config(format!("{} invalid configuration value(s)", errors.len()));
        error.kind = crate::error::ErrorKind::Configuration {
            key: errors.first().map(|e| e.key.clone()),
            validation_errors: messages,
        };
        Err(error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
    Browser,
}

impl Default for StorageBackend {
    fn default() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Browser
        } else {
            Self::File
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Single key holding the whole review mapping
    pub review_key: String,
    /// Directory for the file backend; platform data dir when unset
    pub data_dir: Option<PathBuf>,
    /// Byte limit for the memory backend
    pub quota_bytes: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            review_key: "sc_reviews_v1".to_string(),
            data_dir: None,
            quota_bytes: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub max_name_len: usize,
    pub max_text_len: usize,
    /// Stored name when the reviewer leaves it blank
    pub default_author: String,
    /// Author shown in structured data for reviews without a name
    pub anonymous_author: String,
    /// How many recent reviews go into structured data
    pub recent_limit: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            max_name_len: 50,
            max_text_len: 800,
            default_author: "Guest".to_string(),
            anonymous_author: "Anonymous".to_string(),
            recent_limit: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a burst of search keystrokes is applied
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 200 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub console: ConsoleLogConfig,
    pub file: Option<FileLogConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            console: ConsoleLogConfig::default(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleLogConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl Default for ConsoleLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLogConfig {
    pub path: PathBuf,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./logs/sc-store.log"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error for '{}': {}", self.key, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    pub fn parse(self, content: &str) -> Result<Value> {
        match self {
            Self::Json => serde_json::from_str(content)
                .map_err(|e| Error::config(format!("Failed to parse JSON config: {}", e))),
            Self::Yaml => serde_yaml::from_str(content)
                .map_err(|e| Error::config(format!("Failed to parse YAML config: {}", e))),
            Self::Toml => toml::from_str(content)
                .map_err(|e| Error::config(format!("Failed to parse TOML config: {}", e))),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ConfigSource {
    File { path: PathBuf, format: ConfigFormat },
    Memory { data: Value },
}

#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub name: String,
    pub source: ConfigSource,
    pub priority: u32,
}

pub struct ConfigManager {
    layers: Vec<ConfigLayer>,
    merged_config: Value,
}

impl fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigManager")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            merged_config: defaults_value(),
        }
    }

    pub fn with_config_file<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let mut manager = Self::new();
        manager.add_file_layer("default", config_path, 0)?;
        manager.load()?;
        Ok(manager)
    }

    pub fn add_file_layer<P: AsRef<Path>>(
        &mut self,
        name: impl Into<String>,
        path: P,
        priority: u32,
    ) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        let format = ConfigFormat::from_extension(&path)
            .ok_or_else(|| Error::config("Unsupported configuration file format"))?;

        self.push_layer(ConfigLayer {
            name: name.into(),
            source: ConfigSource::File { path, format },
            priority,
        });

        Ok(())
    }

    pub fn add_memory_layer(&mut self, name: impl Into<String>, data: Value, priority: u32) {
        self.push_layer(ConfigLayer {
            name: name.into(),
            source: ConfigSource::Memory { data },
            priority,
        });
    }

    fn push_layer(&mut self, layer: ConfigLayer) {
        self.layers.push(layer);
        self.layers.sort_by_key(|l| l.priority);
    }

    /// Re-read every layer and rebuild the merged configuration
    pub fn load(&mut self) -> Result<()> {
        let mut merged = defaults_value();

        for layer in &self.layers {
            let layer_config = load_layer_config(layer)?;
            merge_values(&mut merged, layer_config);
            tracing::debug!(layer = %layer.name, priority = layer.priority, "Merged config layer");
        }

        self.merged_config = merged;
        Ok(())
    }

    pub fn set<T>(&mut self, key: &str, value: T) -> Result<()>
    where
        T: Serialize,
    {
        let serialized_value = serde_json::to_value(value).map_err(|e| {
            Error::config_key(key, format!("Failed to serialize config value: {}", e))
        })?;

        set_nested_value(&mut self.merged_config, key, serialized_value);
        Ok(())
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let value = get_nested_value(&self.merged_config, key).ok_or_else(|| {
            Error::config_key(key, format!("Configuration key '{}' not found", key))
        })?;

        serde_json::from_value(value).map_err(|e| {
            Error::config_key(key, format!("Failed to deserialize config value: {}", e))
        })
    }

    pub fn get_config(&self) -> Result<StoreConfig> {
        serde_json::from_value(self.merged_config.clone())
            .map_err(|e| Error::config(format!("Failed to deserialize config: {}", e)))
    }

    /// Deserialize and validate in one step
    pub fn validated_config(&self) -> Result<StoreConfig> {
        let config = self.get_config()?;
        config.ensure_valid()?;
        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn defaults_value() -> Value {
    serde_json::to_value(StoreConfig::default()).unwrap_or_else(|_| Value::Object(Map::new()))
}

fn load_layer_config(layer: &ConfigLayer) -> Result<Value> {
    match &layer.source {
        #[cfg(not(target_arch = "wasm32"))]
        ConfigSource::File { path, format } => {
            let content = std::fs::read_to_string(path).map_err(|e| {
                Error::config(format!(
                    "Failed to read config file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            format.parse(&content)
        }

        #[cfg(target_arch = "wasm32")]
        ConfigSource::File { .. } => Err(Error::config(
            "File loading not supported in web platform",
        )),

        ConfigSource::Memory { data } => Ok(data.clone()),
    }
}

fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match target_map.get_mut(&key) {
                    Some(target_value) => merge_values(target_value, source_value),
                    None => {
                        target_map.insert(key, source_value);
                    }
                }
            }
        }
        (target, source) => {
            *target = source;
        }
    }
}

fn get_nested_value(config: &Value, key: &str) -> Option<Value> {
    let mut current = config;
    for k in key.split('.') {
        current = current.get(k)?;
    }
    Some(current.clone())
}

fn set_nested_value(config: &mut Value, key: &str, value: Value) {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        return;
    };

    let mut current = config;
    for part in parents {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        current = match current {
            Value::Object(map) => map
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new())),
            _ => return,
        };
    }

    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    if let Value::Object(map) = current {
        map.insert(last.to_string(), value);
    }
}
