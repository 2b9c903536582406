pub mod expand;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::buffer::{RingStore, DEFAULT_CAPACITY};
use crate::errors::{CoreError, StoreError};

/// Ring store layout.
///
/// - `capacity`: size of the backing block (default 1 MiB).
/// - `bottom`/`top`: initial borders; `None` keeps the full block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            bottom: None,
            top: None,
        }
    }
}

impl StoreConfig {
    /// Allocate a store and move its borders as configured.
    ///
    /// `top` is applied before `bottom` so that any valid window can be
    /// reached from the full-block default.
    pub fn build(&self) -> Result<RingStore, StoreError> {
        let mut store = RingStore::new(self.capacity)?;
        if let Some(top) = self.top {
            store.set_top_index(top)?;
        }
        if let Some(bottom) = self.bottom {
            store.set_bottom_index(bottom)?;
        }
        Ok(store)
    }
}

/// Serial port settings for the capture side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerialConfig {
    pub port: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    #[serde(default = "default_data_bits")]
    pub data_bits: u8,
    #[serde(default = "default_stop_bits")]
    pub stop_bits: u8,
    #[serde(default = "default_parity")]
    pub parity: String,
    #[serde(default = "default_flow_control")]
    pub flow_control: String,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: default_baud_rate(),
            data_bits: default_data_bits(),
            stop_bits: default_stop_bits(),
            parity: default_parity(),
            flow_control: default_flow_control(),
        }
    }
}

impl SerialConfig {
    /// Return a copy with all `${env:...}` placeholders expanded.
    pub fn expand(mut self) -> Self {
        self.port = expand::expand_env_placeholders(&self.port);
        self
    }
}

/// Full capture configuration: where bytes come from, where they are
/// buffered, and how often the consumer drains them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureConfig {
    pub serial: SerialConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl CaptureConfig {
    /// Read a JSON capture configuration from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Return a copy with all `${env:...}` placeholders expanded.
    pub fn expand(mut self) -> Self {
        self.serial = self.serial.expand();
        self
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_baud_rate() -> u32 {
    115200
}

fn default_data_bits() -> u8 {
    8
}

fn default_stop_bits() -> u8 {
    1
}

fn default_parity() -> String {
    "none".to_string()
}

fn default_flow_control() -> String {
    "none".to_string()
}

fn default_poll_interval_ms() -> u64 {
    50
}
