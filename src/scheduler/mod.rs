use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Sleeping,
    Stopped,
}

/// Spouští cyklus v pevném intervalu
///
/// Další běh se počítá od začátku předchozího (absolutní `next_run`), takže
/// doba cyklu se do intervalu nepřičítá. Cyklus delší než interval vede
/// k okamžitému dalšímu běhu bez spánku.
pub struct Scheduler {
    interval: Duration,
    state: SchedulerState,
    cycles: u64,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: SchedulerState::Idle,
            cycles: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Běží, dokud není zrušen `cancel` nebo cyklus nevrátí chybu
    ///
    /// Zrušení přeruší i rozběhnutý cyklus a spánek a vrací `Ok(())`.
    pub async fn run<F, Fut>(&mut self, cancel: &CancellationToken, mut cycle: F) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let mut next_run = Instant::now();

        loop {
            if cancel.is_cancelled() {
                self.state = SchedulerState::Stopped;
                return Ok(());
            }

            let now = Instant::now();
            if now >= next_run {
                next_run = now + self.interval;
                self.state = SchedulerState::Running;

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        self.state = SchedulerState::Stopped;
                        return Ok(());
                    }
                    result = cycle() => {
                        if let Err(e) = result {
                            self.state = SchedulerState::Stopped;
                            return Err(e);
                        }
                    }
                }

                self.cycles += 1;
                tracing::debug!("Total elapsed time: {:?}", now.elapsed());
            }

            let remaining = next_run.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::debug!("Cycle overran the interval, running next immediately");
                continue;
            }

            self.state = SchedulerState::Sleeping;
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    self.state = SchedulerState::Stopped;
                    return Ok(());
                }
                _ = tokio::time::sleep_until(next_run) => {}
            }
        }
    }
}
