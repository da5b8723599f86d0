use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::collector::Collector;
use crate::es::EsTransport;
use crate::publisher::{BulkBatch, Publisher};
use crate::scheduler::Scheduler;
use crate::utils::daily_index_name;

/// Shrnutí jednoho cyklu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub index: String,
    pub documents: usize,
    pub failed: usize,
}

/// Jeden cyklus = sběr ze zdroje, tvarování a bulk zápis do cíle
pub struct Agent<S, D> {
    collector: Collector<S>,
    publisher: Publisher<D>,
    index_prefix: String,
}

impl<S: EsTransport, D: EsTransport> Agent<S, D> {
    pub fn new(collector: Collector<S>, publisher: Publisher<D>, index_prefix: String) -> Self {
        Self {
            collector,
            publisher,
            index_prefix,
        }
    }

    /// Hlavní smyčka, vrací počet proběhlých cyklů
    ///
    /// S `once` proběhne právě jeden cyklus a scheduler se nespouští.
    pub async fn run(
        &self,
        scheduler: &mut Scheduler,
        cancel: &CancellationToken,
        once: bool,
    ) -> Result<u64> {
        if once {
            self.run_cycle().await?;
            return Ok(1);
        }

        scheduler
            .run(cancel, || async move { self.run_cycle().await.map(|_| ()) })
            .await?;
        Ok(scheduler.cycles())
    }

    pub async fn run_cycle(&self) -> Result<CycleReport> {
        self.run_cycle_at(Utc::now()).await
    }

    /// Cyklus s daným časem - určuje timestamp dokumentů i denní index
    pub async fn run_cycle_at(&self, now: DateTime<Utc>) -> Result<CycleReport> {
        let documents = self.collector.collect(now).await?;

        let batch = BulkBatch::new(daily_index_name(&self.index_prefix, now), documents);
        let report = self.publisher.publish(&batch).await?;

        tracing::info!(
            "Published {} documents to {} ({} failed)",
            report.submitted,
            batch.index(),
            report.failed
        );

        Ok(CycleReport {
            index: batch.index().to_string(),
            documents: report.submitted,
            failed: report.failed,
        })
    }
}
