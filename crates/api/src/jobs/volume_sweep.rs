//! Periodic platform-volume sweep.
//!
//! Re-checks the hourly and daily volume limits against the ledger and
//! flips the global withdrawal switch off when one is exceeded. The sweep
//! only writes the global flag; in-flight admission checks pick it up on
//! their next config read, so no coordination is needed.

use sqlx::PgPool;

use persistence::repositories::{
    SystemConfigRepository, WithdrawalLedgerRepository, WithdrawalPauseRepository,
};

use crate::jobs::{Job, JobFrequency};
use crate::services::WithdrawalProcessor;

pub struct VolumeSweepJob {
    processor: WithdrawalProcessor<
        SystemConfigRepository,
        WithdrawalPauseRepository,
        WithdrawalLedgerRepository,
    >,
    interval_minutes: u64,
}

impl VolumeSweepJob {
    pub fn new(pool: PgPool, interval_minutes: u64) -> Self {
        Self {
            processor: WithdrawalProcessor::new(
                SystemConfigRepository::new(pool.clone()),
                WithdrawalPauseRepository::new(pool.clone()),
                WithdrawalLedgerRepository::new(pool),
            ),
            interval_minutes,
        }
    }
}

#[async_trait::async_trait]
impl Job for VolumeSweepJob {
    fn name(&self) -> &'static str {
        "volume_sweep"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Minutes(self.interval_minutes)
    }

    async fn execute(&self) -> Result<(), String> {
        self.processor
            .check_volume_thresholds()
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
