//! Serial port capture into a shared [`RingStore`].
//!
//! Provides config parsing (string → `serialport` enums), port opening,
//! port listing, and a reconnect-capable reader loop that feeds the store
//! through [`feed_store`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::buffer::RingStore;
use crate::capture::feed_store;
use crate::config::SerialConfig;
use crate::errors::CaptureError;

/// Pre-parsed serial port configuration cached for reconnection.
///
/// Holds `serialport` enum values so they don't need to be re-parsed
/// on every reconnect attempt. Constructed via [`parse_serial_config`].
#[derive(Debug, Clone)]
pub struct ParsedSerialConfig {
    pub port: String,
    pub baud_rate: u32,
    pub data_bits: serialport::DataBits,
    pub stop_bits: serialport::StopBits,
    pub parity: serialport::Parity,
    pub flow_control: serialport::FlowControl,
}

/// Parse a [`SerialConfig`] into a [`ParsedSerialConfig`].
///
/// # Mapping rules
///
/// | Field          | Input (default first)        | Output                    |
/// |----------------|------------------------------|---------------------------|
/// | `data_bits`    | 8, 5, 6, 7                   | `DataBits::{Eight..Five}` |
/// | `stop_bits`    | 1, 2                         | `StopBits::{One,Two}`     |
/// | `parity`       | "none", "odd", "even"        | `Parity::*`               |
/// | `flow_control` | "none", "hardware", "software" | `FlowControl::*`        |
///
/// Returns [`CaptureError::InvalidConfig`] if the port name is empty.
pub fn parse_serial_config(config: &SerialConfig) -> Result<ParsedSerialConfig, CaptureError> {
    if config.port.is_empty() {
        return Err(CaptureError::InvalidConfig(
            "serial port name must not be empty".into(),
        ));
    }

    let data_bits = match config.data_bits {
        5 => serialport::DataBits::Five,
        6 => serialport::DataBits::Six,
        7 => serialport::DataBits::Seven,
        _ => serialport::DataBits::Eight,
    };

    let stop_bits = match config.stop_bits {
        2 => serialport::StopBits::Two,
        _ => serialport::StopBits::One,
    };

    let parity = match config.parity.as_str() {
        "odd" => serialport::Parity::Odd,
        "even" => serialport::Parity::Even,
        _ => serialport::Parity::None,
    };

    let flow_control = match config.flow_control.as_str() {
        "hardware" => serialport::FlowControl::Hardware,
        "software" => serialport::FlowControl::Software,
        _ => serialport::FlowControl::None,
    };

    Ok(ParsedSerialConfig {
        port: config.port.clone(),
        baud_rate: config.baud_rate,
        data_bits,
        stop_bits,
        parity,
        flow_control,
    })
}

/// Open a serial port with a 100 ms read timeout.
pub fn open_serial_port(
    config: &ParsedSerialConfig,
) -> Result<Box<dyn serialport::SerialPort>, CaptureError> {
    serialport::new(&config.port, config.baud_rate)
        .data_bits(config.data_bits)
        .stop_bits(config.stop_bits)
        .parity(config.parity)
        .flow_control(config.flow_control)
        .timeout(Duration::from_millis(100))
        .open()
        .map_err(|e| CaptureError::OpenFailed(format!("{}: {}", config.port, e)))
}

/// List available serial port names on the system.
///
/// Returns an empty vector if enumeration fails.
pub fn list_serial_ports() -> Vec<String> {
    serialport::available_ports()
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.port_name)
        .collect()
}

/// Status of a serial port connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialStatus {
    Connected,
    Disconnected,
    Reconnecting,
    Error(String),
}

/// Reconnect interval used by [`serial_reader_loop`].
const RECONNECT_INTERVAL: Duration = Duration::from_secs(3);

/// Background serial port reader loop with automatic reconnection.
///
/// Opens the port, pushes everything received into `store`, and on a read
/// error retries every 3 seconds until the port reappears or `closed` is
/// set. Returns when `closed` is set or the port reports EOF.
///
/// * `closed`: set by the caller to request shutdown.
/// * `status_fn`: called on connection state changes.
pub fn serial_reader_loop(
    config: &ParsedSerialConfig,
    store: Arc<Mutex<RingStore>>,
    closed: Arc<AtomicBool>,
    status_fn: impl Fn(SerialStatus) + Send,
) {
    let mut first_attempt = true;

    loop {
        if closed.load(Ordering::SeqCst) {
            break;
        }

        if !first_attempt {
            std::thread::sleep(RECONNECT_INTERVAL);
            if closed.load(Ordering::SeqCst) {
                break;
            }
            debug!(port = %config.port, "Attempting to reconnect serial port");
            status_fn(SerialStatus::Reconnecting);
        }
        first_attempt = false;

        let mut reader = match open_serial_port(config) {
            Ok(port) => port,
            Err(e) => {
                status_fn(SerialStatus::Error(e.to_string()));
                continue;
            }
        };

        info!(port = %config.port, baud_rate = config.baud_rate, "Serial port connected");
        status_fn(SerialStatus::Connected);

        match feed_store(&mut reader, &store, &closed) {
            Ok(total) => {
                info!(port = %config.port, total, "Serial capture finished");
                break;
            }
            Err(e) => {
                warn!(port = %config.port, "Serial port read error: {}", e);
                status_fn(SerialStatus::Disconnected);
                status_fn(SerialStatus::Error(e.to_string()));
            }
        }
    }

    debug!(port = %config.port, "Serial reader loop exiting");
}
