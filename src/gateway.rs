//! The consumed registry capability the sync service is built on.

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::types::{BulkResult, DeviceRecord};

/// Remote device-identity registry operations.
///
/// All four operations are remote and network-fallible. Implementations
/// wrap whatever transport and session the caller constructed from its
/// credentials; the sync service never opens or closes connections itself.
///
/// Bulk calls operate on the whole batch in one round trip and report
/// per-device problems inside the returned [`BulkResult`]; an `Err` means
/// the registry rejected or never received the batch.
#[async_trait]
pub trait RegistryGateway: Send + Sync {
    /// Fetch the current record for one device.
    async fn get_device(&self, device_id: &str) -> Result<DeviceRecord, GatewayError>;

    /// Create all records in a single call.
    async fn bulk_add(&self, records: &[DeviceRecord]) -> Result<BulkResult, GatewayError>;

    /// Update all records in a single call.
    async fn bulk_update(&self, records: &[DeviceRecord]) -> Result<BulkResult, GatewayError>;

    /// Remove all records in a single call.
    async fn bulk_remove(&self, records: &[DeviceRecord]) -> Result<BulkResult, GatewayError>;
}
