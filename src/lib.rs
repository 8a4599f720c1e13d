//! Bulk synchronization of device identifiers against a remote
//! device-identity registry.
//!
//! The sync service takes a caller-supplied batch of device ids and drives
//! the registry's bulk primitives: it creates missing records, flips
//! enabled/disabled state, and removes records, reconciling the benign
//! partial failures that bulk operations report (already-exists while
//! registering, not-found while unregistering). The registry itself is a
//! consumed capability behind the [`RegistryGateway`] trait; this crate
//! never manages the connection.
//!
//! # Usage
//!
//! ```rust,ignore
//! use device_registry_sync::{DeviceRegistrySyncService, DeviceStatus};
//!
//! let service = DeviceRegistrySyncService::new(gateway);
//! let errors = service
//!     .register_devices(&["sensor-1".to_string(), "sensor-2".to_string()], true)
//!     .await?;
//! assert!(errors.is_empty());
//! ```

mod error;
mod gateway;
mod sync_service;
mod types;
mod validation;


pub use error::{GatewayError, RegistrySyncError, Result};
pub use gateway::RegistryGateway;
pub use sync_service::{extract_errors, DeviceRegistrySyncService};
pub use types::{
    BatchOutcome, BulkResult, DeviceRecord, DeviceStatus, ErrorKind, OperationError,
    RegisterDevicesRequest, SetDeviceStatusRequest, UnregisterDevicesRequest,
};
pub use validation::{is_valid_device_id, validate_device_ids};
