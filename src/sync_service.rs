//! Orchestration of bulk device registration, status changes and removal.
//!
//! Every operation follows the same shape: validate locally, assemble the
//! batch, issue at most one bulk call, and reconcile the result through
//! [`extract_errors`] so benign registry noise (already-exists on register,
//! not-found on unregister) never reaches the caller.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{debug, warn};

use crate::error::Result;
use crate::gateway::RegistryGateway;
use crate::types::{
    BatchOutcome, BulkResult, DeviceRecord, DeviceStatus, ErrorKind, OperationError,
    RegisterDevicesRequest, SetDeviceStatusRequest, UnregisterDevicesRequest,
};
use crate::validation::validate_device_ids;

/// Pull the reportable errors out of a bulk result.
///
/// `suppress` names one benign error kind to drop from the report. Order is
/// preserved from the gateway's result, and a fully successful result yields
/// no errors. Every bulk path in this crate reports through here.
pub fn extract_errors(result: &BulkResult, suppress: Option<ErrorKind>) -> Vec<OperationError> {
    if result.successful && result.errors.is_empty() {
        return Vec::new();
    }

    result
        .errors
        .iter()
        .filter(|error| suppress.map_or(true, |kind| error.kind != kind))
        .cloned()
        .collect()
}

/// Split a comma-separated identifier list the way the caller-facing API
/// formats it. Returns `None` when the list is absent in spirit (blank),
/// which the entry points report as malformed input.
fn parse_id_list(raw: &str) -> Option<Vec<String>> {
    if raw.trim().is_empty() {
        return None;
    }
    Some(raw.split(',').map(|id| id.trim().to_string()).collect())
}

const MALFORMED_ID_LIST: &str =
    "the device id list is absent or blank; check the request body for escape characters";

/// Synchronizes caller-supplied device id batches against the registry.
///
/// Holds no state beyond the gateway handle and the fan-out bound; all
/// records and results are scoped to a single call.
pub struct DeviceRegistrySyncService {
    gateway: Arc<dyn RegistryGateway>,
    fetch_concurrency: Option<usize>,
}

impl DeviceRegistrySyncService {
    pub fn new(gateway: Arc<dyn RegistryGateway>) -> Self {
        Self {
            gateway,
            fetch_concurrency: None,
        }
    }

    /// Cap the per-device fetch fan-out at `limit` in-flight lookups.
    ///
    /// Unbounded by default. The bound changes scheduling only; results and
    /// their ordering are identical either way.
    pub fn with_fetch_concurrency(mut self, limit: usize) -> Self {
        self.fetch_concurrency = Some(limit.max(1));
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Core Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Register `device_ids` with the registry.
    ///
    /// Ids failing the identifier grammar are reported as `ArgumentInvalid`
    /// without contacting the registry. The remaining ids are created in a
    /// single bulk call, enabled on creation when `enable_on_create` is
    /// set. An id the registry already knows is not a failure: it is
    /// silently skipped, or explicitly enabled when `enable_on_create` is
    /// set (idempotent upsert).
    ///
    /// The returned list orders validation errors first, then add errors,
    /// then status-sync errors.
    pub async fn register_devices(
        &self,
        device_ids: &[String],
        enable_on_create: bool,
    ) -> Result<Vec<OperationError>> {
        let (valid_ids, mut errors) = validate_device_ids(device_ids);
        debug!(
            "registering {} devices ({} rejected locally), enable_on_create={}",
            valid_ids.len(),
            errors.len(),
            enable_on_create
        );

        if valid_ids.is_empty() {
            return Ok(errors);
        }

        let status = if enable_on_create {
            DeviceStatus::Enabled
        } else {
            DeviceStatus::Disabled
        };
        let records: Vec<DeviceRecord> = valid_ids
            .iter()
            .map(|id| DeviceRecord::new(id.clone(), status))
            .collect();

        let add_result = self.gateway.bulk_add(&records).await?;

        let mut update_errors = Vec::new();
        if enable_on_create && !add_result.successful {
            // Ids the registry already knows are enabled in place instead.
            let existing: Vec<String> = add_result
                .errors
                .iter()
                .filter(|error| error.kind == ErrorKind::AlreadyExists)
                .map(|error| error.device_id.clone())
                .collect();

            if !existing.is_empty() {
                debug!("enabling {} already-registered devices", existing.len());
                update_errors = self
                    .set_device_status(&existing, DeviceStatus::Enabled)
                    .await?;
            }
        }

        errors.extend(extract_errors(&add_result, Some(ErrorKind::AlreadyExists)));
        errors.extend(update_errors);
        Ok(errors)
    }

    /// Enable or disable `device_ids`.
    ///
    /// Current records are fetched concurrently and joined before anything
    /// else happens; only records whose status actually differs from
    /// `desired` are written back, in one bulk update. Ids already in the
    /// desired state generate no registry write, so repeated calls are
    /// idempotent. A fetch that fails is reported for that id alone and the
    /// rest of the batch proceeds.
    pub async fn set_device_status(
        &self,
        device_ids: &[String],
        desired: DeviceStatus,
    ) -> Result<Vec<OperationError>> {
        let (records, mut errors) = self.fetch_devices(device_ids).await;

        let to_update: Vec<DeviceRecord> = records
            .into_iter()
            .filter(|record| record.status != desired)
            .map(|mut record| {
                record.status = desired;
                record
            })
            .collect();

        if to_update.is_empty() {
            debug!("no device out of desired state; skipping bulk update");
            return Ok(errors);
        }

        let update_result = self.gateway.bulk_update(&to_update).await?;
        errors.extend(extract_errors(&update_result, None));
        Ok(errors)
    }

    /// Unregister `device_ids`.
    ///
    /// Current records are fetched concurrently and removed in one bulk
    /// call. An id the registry does not know is already in the desired
    /// state and is not reported, whether the not-found surfaces during the
    /// fetch or inside the bulk remove result.
    pub async fn unregister_devices(&self, device_ids: &[String]) -> Result<Vec<OperationError>> {
        let (records, fetch_errors) = self.fetch_devices(device_ids).await;

        let mut errors: Vec<OperationError> = fetch_errors
            .into_iter()
            .filter(|error| error.kind != ErrorKind::NotFound)
            .collect();

        if records.is_empty() {
            return Ok(errors);
        }

        let remove_result = self.gateway.bulk_remove(&records).await?;
        errors.extend(extract_errors(&remove_result, Some(ErrorKind::NotFound)));
        Ok(errors)
    }

    /// Fan out one `get_device` per id and join on all of them.
    ///
    /// Fetch failures do not abort the batch: each failing id becomes an
    /// [`OperationError`] (not-found stays classified as such, anything
    /// else is `Other`) and is excluded from the fetched set. Result order
    /// follows input order.
    async fn fetch_devices(
        &self,
        device_ids: &[String],
    ) -> (Vec<DeviceRecord>, Vec<OperationError>) {
        let fetches = device_ids.iter().map(|id| {
            let id = id.clone();
            async move {
                match self.gateway.get_device(&id).await {
                    Ok(record) => Ok(record),
                    Err(e) => Err(OperationError::new(id, e.error_kind(), e.to_string())),
                }
            }
        });

        let results: Vec<std::result::Result<DeviceRecord, OperationError>> =
            match self.fetch_concurrency {
                Some(limit) => stream::iter(fetches).buffered(limit).collect().await,
                None => futures::future::join_all(fetches).await,
            };

        let mut records = Vec::with_capacity(results.len());
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(record) => records.push(record),
                Err(error) => errors.push(error),
            }
        }

        if !errors.is_empty() {
            warn!(
                "failed to fetch {} of {} devices",
                errors.len(),
                device_ids.len()
            );
        }

        (records, errors)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Request Entry Points
    // ─────────────────────────────────────────────────────────────────────

    /// Register the devices named by a caller request.
    pub async fn register_from_request(
        &self,
        request: &RegisterDevicesRequest,
        enable_on_create: bool,
    ) -> Result<BatchOutcome> {
        let Some(ids) = parse_id_list(&request.device_ids) else {
            return Ok(BatchOutcome::malformed(MALFORMED_ID_LIST));
        };

        let (valid, validation_errors) = validate_device_ids(&ids);
        if valid.is_empty() {
            return Ok(BatchOutcome::ValidationFailure {
                errors: validation_errors,
            });
        }

        let errors = self.register_devices(&ids, enable_on_create).await?;
        Ok(BatchOutcome::Success { errors })
    }

    /// Register and enable the devices named by a caller request.
    pub async fn register_and_enable_from_request(
        &self,
        request: &RegisterDevicesRequest,
    ) -> Result<BatchOutcome> {
        self.register_from_request(request, true).await
    }

    /// Enable or disable the devices named by a caller request.
    pub async fn set_status_from_request(
        &self,
        request: &SetDeviceStatusRequest,
    ) -> Result<BatchOutcome> {
        let Some(ids) = parse_id_list(&request.device_ids) else {
            return Ok(BatchOutcome::malformed(MALFORMED_ID_LIST));
        };

        let (valid, mut errors) = validate_device_ids(&ids);
        if valid.is_empty() {
            return Ok(BatchOutcome::ValidationFailure { errors });
        }

        errors.extend(self.set_device_status(&valid, request.status).await?);
        Ok(BatchOutcome::Success { errors })
    }

    /// Unregister the devices named by a caller request.
    pub async fn unregister_from_request(
        &self,
        request: &UnregisterDevicesRequest,
    ) -> Result<BatchOutcome> {
        let Some(ids) = parse_id_list(&request.device_ids) else {
            return Ok(BatchOutcome::malformed(MALFORMED_ID_LIST));
        };

        let (valid, mut errors) = validate_device_ids(&ids);
        if valid.is_empty() {
            return Ok(BatchOutcome::ValidationFailure { errors });
        }

        errors.extend(self.unregister_devices(&valid).await?);
        Ok(BatchOutcome::Success { errors })
    }
}
