//! Preview registry — owns compiled artifacts and the handles that display them.
//!
//! Each consumer (one editor view, one browser tab) has a slot. Every
//! generation request takes a `Ticket` carrying a sequence number drawn from
//! one registry-wide counter, so numbers only ever grow. A slot records the
//! latest ticket issued to it. Only that ticket may install its artifact, so a
//! slow response that lands after a newer one is dropped instead of
//! overwriting it. Installing a new artifact releases the handle it replaces.
//!
//! Slots exist only while a consumer has a displayed handle or a request in
//! flight: `release` removes the slot, and `abandon` removes it when the
//! latest request failed and nothing is displayed. A removed slot invalidates
//! every outstanding ticket for it, and a later `begin` starts from a higher
//! number, so old tickets can never match again.
//!
//! The lock is only held for map updates, never across an `.await`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::compiler::CompiledArtifact;

#[derive(Debug, Error, PartialEq)]
pub enum PreviewError {
    #[error("request #{sequence} for '{consumer}' was superseded by request #{latest}")]
    Superseded {
        consumer: String,
        sequence: u64,
        latest: u64,
    },
}

/// Proof of a started generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub consumer: String,
    pub sequence: u64,
}

/// Public description of a displayable artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewHandle {
    pub handle: Uuid,
    pub consumer: String,
    pub sequence: u64,
    pub media_type: &'static str,
    pub size_bytes: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Slot {
    issued: u64,
    current: Option<Uuid>,
}

struct StoredArtifact {
    handle: PreviewHandle,
    artifact: CompiledArtifact,
}

#[derive(Default)]
struct Inner {
    next_sequence: u64,
    slots: HashMap<String, Slot>,
    artifacts: HashMap<Uuid, StoredArtifact>,
}

#[derive(Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<Mutex<Inner>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a generation request for `consumer`.
    pub fn begin(&self, consumer: &str) -> Ticket {
        let mut inner = self.lock();
        inner.next_sequence += 1;
        let sequence = inner.next_sequence;
        inner.slots.entry(consumer.to_string()).or_default().issued = sequence;

        debug!("Preview request #{sequence} issued for '{consumer}'");
        Ticket {
            consumer: consumer.to_string(),
            sequence,
        }
    }

    /// Whether `ticket` is still the latest request issued for its consumer.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.lock()
            .slots
            .get(&ticket.consumer)
            .is_some_and(|slot| slot.issued == ticket.sequence)
    }

    /// Installs `artifact` as the consumer's displayed preview.
    ///
    /// Fails with `Superseded` when a newer request was issued (or the slot was
    /// released) after `ticket`; the artifact is dropped in that case.
    pub fn complete(
        &self,
        ticket: &Ticket,
        artifact: CompiledArtifact,
    ) -> Result<PreviewHandle, PreviewError> {
        let mut inner = self.lock();
        let latest = inner
            .slots
            .get(&ticket.consumer)
            .map(|slot| slot.issued)
            .unwrap_or_default();

        if latest != ticket.sequence {
            info!(
                "Discarding stale preview #{} for '{}' (latest is #{})",
                ticket.sequence, ticket.consumer, latest
            );
            return Err(PreviewError::Superseded {
                consumer: ticket.consumer.clone(),
                sequence: ticket.sequence,
                latest,
            });
        }

        let handle = PreviewHandle {
            handle: Uuid::new_v4(),
            consumer: ticket.consumer.clone(),
            sequence: ticket.sequence,
            media_type: artifact.media_type,
            size_bytes: artifact.bytes.len(),
            created_at: Utc::now(),
        };

        let previous = inner
            .slots
            .get_mut(&ticket.consumer)
            .and_then(|slot| slot.current.replace(handle.handle));
        if let Some(previous) = previous {
            inner.artifacts.remove(&previous);
            debug!("Released superseded preview {previous}");
        }

        inner.artifacts.insert(
            handle.handle,
            StoredArtifact {
                handle: handle.clone(),
                artifact,
            },
        );

        Ok(handle)
    }

    /// Drops the slot of a failed request when it is still the latest one and
    /// nothing is displayed. An existing preview stays in place.
    pub fn abandon(&self, ticket: &Ticket) {
        let mut inner = self.lock();
        let idle = inner
            .slots
            .get(&ticket.consumer)
            .is_some_and(|slot| slot.issued == ticket.sequence && slot.current.is_none());
        if idle {
            inner.slots.remove(&ticket.consumer);
            debug!("Dropped idle preview slot for '{}'", ticket.consumer);
        }
    }

    /// Tears down `consumer`'s slot: releases its handle and invalidates in-flight tickets.
    pub fn release(&self, consumer: &str) -> Option<PreviewHandle> {
        let mut inner = self.lock();
        let slot = inner.slots.remove(consumer)?;
        let current = slot.current?;

        let released = inner.artifacts.remove(&current).map(|stored| stored.handle);
        if released.is_some() {
            info!("Released preview {current} for '{consumer}'");
        }
        released
    }

    /// The handle currently displayed for `consumer`.
    pub fn current(&self, consumer: &str) -> Option<PreviewHandle> {
        let inner = self.lock();
        let id = inner.slots.get(consumer)?.current?;
        inner.artifacts.get(&id).map(|stored| stored.handle.clone())
    }

    /// Resolves a live handle to its artifact. Released handles resolve to `None`.
    pub fn artifact(&self, handle: Uuid) -> Option<(PreviewHandle, CompiledArtifact)> {
        self.lock()
            .artifacts
            .get(&handle)
            .map(|stored| (stored.handle.clone(), stored.artifact.clone()))
    }

    /// Number of artifacts currently held.
    pub fn live_handles(&self) -> usize {
        self.lock().artifacts.len()
    }
}
