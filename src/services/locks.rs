// ABOUTME: Per-user single-writer locks for landmark and mesocycle mutations
// ABOUTME: Sharded map of async mutexes keyed by user id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::UserId;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Keyed write locks, one async mutex per user
///
/// Holding the guard serializes every read-modify-write of that user's
/// landmarks and mesocycle state. Users never contend with each other.
#[derive(Debug, Clone, Default)]
pub struct UserWriteLocks {
    locks: Arc<DashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserWriteLocks {
    /// Empty lock table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and take the write lock of a user
    pub async fn acquire(&self, user_id: UserId) -> OwnedMutexGuard<()> {
        let entry = self.locks.entry(user_id).or_default();
        let lock = Arc::clone(entry.value());
        drop(entry); // release the shard before awaiting
        lock.lock_owned().await
    }

    /// Number of users that have taken a lock
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no user has taken a lock yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
