//! Types for device registry synchronization requests and results.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Device Types
// ─────────────────────────────────────────────────────────────────────────────

/// Enabled/disabled state of a device record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceStatus {
    Enabled,
    Disabled,
}

/// A device identity record as held by the remote registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    /// Unique device identifier
    pub device_id: String,
    /// Current enabled/disabled state
    pub status: DeviceStatus,
    /// Opaque concurrency tag assigned by the registry. Round-tripped on
    /// updates so the registry accepts the record as a modification of an
    /// existing device; never interpreted locally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl DeviceRecord {
    /// Create a record for a device the registry does not know yet.
    pub fn new(device_id: impl Into<String>, status: DeviceStatus) -> Self {
        Self {
            device_id: device_id.into(),
            status,
            etag: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operation Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Classification of a per-device failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// The identifier fails the registry grammar; detected locally
    ArgumentInvalid,
    /// The device is already registered
    AlreadyExists,
    /// The device is not registered
    NotFound,
    /// Any other registry-reported failure (throttling, authorization, ...)
    Other,
}

/// A per-device failure reported for one operation in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationError {
    /// The device the failure applies to
    pub device_id: String,
    /// Failure classification
    pub kind: ErrorKind,
    /// Human-readable detail
    pub detail: String,
}

impl OperationError {
    pub fn new(device_id: impl Into<String>, kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            kind,
            detail: detail.into(),
        }
    }

    /// Create the error reported for an identifier that fails the grammar.
    pub fn argument_invalid(device_id: impl Into<String>) -> Self {
        let device_id = device_id.into();
        let detail = format!(
            "device id '{}' is not a valid registry identifier",
            device_id
        );
        Self {
            device_id,
            kind: ErrorKind::ArgumentInvalid,
            detail,
        }
    }
}

/// Outcome of one bulk registry call.
///
/// A bulk operation can partially fail: `successful` is the registry's
/// overall verdict and `errors` lists the affected devices in the
/// registry's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResult {
    pub successful: bool,
    pub errors: Vec<OperationError>,
}

impl BulkResult {
    /// A fully successful bulk result.
    pub fn ok() -> Self {
        Self {
            successful: true,
            errors: Vec::new(),
        }
    }

    /// A bulk result carrying per-device failures.
    pub fn failed(errors: Vec<OperationError>) -> Self {
        Self {
            successful: false,
            errors,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Caller Requests
// ─────────────────────────────────────────────────────────────────────────────

/// Caller request to register devices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDevicesRequest {
    /// Comma-separated list of device ids
    pub device_ids: String,
}

/// Caller request to enable or disable previously registered devices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDeviceStatusRequest {
    /// Comma-separated list of device ids
    pub device_ids: String,
    /// Desired state for every listed device
    pub status: DeviceStatus,
}

/// Caller request to unregister devices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnregisterDevicesRequest {
    /// Comma-separated list of device ids
    pub device_ids: String,
}

/// Outcome of a request-level operation.
///
/// Distinguishes a request that never reached the registry from one that
/// ran and reported per-device errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum BatchOutcome {
    /// The identifier list was absent or blank; nothing was processed.
    MalformedInput { detail: String },
    /// No identifier passed the grammar check; the registry was not
    /// contacted.
    ValidationFailure { errors: Vec<OperationError> },
    /// The operation ran; `errors` lists per-device failures, if any.
    Success { errors: Vec<OperationError> },
}

impl BatchOutcome {
    /// Create a malformed-input outcome
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedInput {
            detail: detail.into(),
        }
    }

    /// The per-device errors carried by this outcome, if any.
    pub fn errors(&self) -> &[OperationError] {
        match self {
            BatchOutcome::MalformedInput { .. } => &[],
            BatchOutcome::ValidationFailure { errors } => errors,
            BatchOutcome::Success { errors } => errors,
        }
    }

    /// Whether the operation ran against the registry.
    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Success { .. })
    }
}
