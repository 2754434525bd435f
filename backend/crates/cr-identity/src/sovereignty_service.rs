//! Irreversible, cascading identity deletion.
//!
//! The identity, its linked accounts and its sessions go in one transaction.
//! There is no soft-delete flag, retention window or undo path.

use crate::IdentityMetrics;

use cr_core::{ErrorCategory, SovereigntyResult};
use cr_db::{DeletionCounts, IdentityRepository};

use log::{error, info, warn};
use sqlx::SqlitePool;
use uuid::Uuid;

const DELETE_FAILED: &str = "Delete failed";

pub struct SovereigntyService {
    pool: SqlitePool,
    metrics: IdentityMetrics,
}

impl SovereigntyService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            metrics: IdentityMetrics::new(),
        }
    }

    /// Delete `target` and everything it owns. Only the identity itself may do this.
    ///
    /// On success the caller's session must be terminated by the hosting layer.
    pub async fn hard_delete(&self, caller: Option<Uuid>, target: Uuid) -> SovereigntyResult {
        let Some(caller) = caller else {
            return SovereigntyResult::failure(
                ErrorCategory::NotAuthenticated,
                "Not authenticated - please sign in",
            );
        };
        if caller != target {
            warn!("Identity {} attempted to delete identity {}", caller, target);
            return SovereigntyResult::failure(
                ErrorCategory::Forbidden,
                "You can only delete your own account",
            );
        }

        match self.delete_in_transaction(target).await {
            Ok(counts) if counts.identity_existed() => {
                self.metrics.identity_deleted();
                info!(
                    "Hard deleted identity {} ({} linked accounts, {} sessions)",
                    target, counts.linked_accounts, counts.sessions
                );
                SovereigntyResult::Success
            }
            Ok(_) => SovereigntyResult::failure(ErrorCategory::NotFound, "Identity not found"),
            Err(e) => {
                error!("Hard delete of identity {} failed, rolled back: {}", target, e);
                SovereigntyResult::failure(ErrorCategory::Internal, DELETE_FAILED)
            }
        }
    }

    async fn delete_in_transaction(&self, target: Uuid) -> cr_db::Result<DeletionCounts> {
        let mut tx = cr_db::begin_immediate(&self.pool).await?;
        let counts = IdentityRepository::hard_delete_cascade(&mut tx, target).await?;

        if !counts.identity_existed() {
            tx.rollback().await?;
            return Ok(counts);
        }

        tx.commit().await?;
        Ok(counts)
    }
}
