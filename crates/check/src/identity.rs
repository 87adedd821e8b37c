use std::fmt;

use serde_json::{Map, Value};

pub type Instance = Map<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct CheckConfig {
    pub name: String,
    pub init_config: Map<String, Value>,
    pub instances: Vec<Instance>,
}

#[derive(Debug, Clone)]
pub struct CheckIdentity {
    name: String,
    init_config: Map<String, Value>,
    instances: Vec<Instance>,
}

#[derive(Debug)]
pub enum ConfigError {
    NoInstances { check: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInstances { check } => {
                write!(f, "check '{check}' configured without instances")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl CheckIdentity {
    pub fn from_config(config: CheckConfig) -> Result<Self, ConfigError> {
        if config.instances.is_empty() {
            return Err(ConfigError::NoInstances { check: config.name });
        }
        Ok(Self {
            name: config.name,
            init_config: config.init_config,
            instances: config.instances,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn init_config(&self) -> &Map<String, Value> {
        &self.init_config
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }
}
