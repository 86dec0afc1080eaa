// src/schedule/mod.rs
//
// The refresh loop. One cycle = fetch → snapshot → publish; the scheduler
// owns the sink and the ok/degraded status of the last cycle. Cycles are
// awaited inline before the next tick is taken, so at most one is ever in
// flight and a slow response can never overwrite a newer render.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

use crate::pipeline::{self, RankedPlayer};
use crate::render::Publish;

/// Where a cycle's CSV text comes from. Production is `fetch::HttpSheet`;
/// tests hand in canned text.
pub trait Sheet {
    fn fetch(&self) -> impl Future<Output = Result<String>> + Send;
}

/// Outcome of the most recent cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    Ok,
    Degraded,
}

pub struct Scheduler<S, P> {
    sheet: S,
    sink: P,
    period: Duration,
    status: Option<CycleStatus>,
}

impl<S: Sheet, P: Publish> Scheduler<S, P> {
    pub fn new(sheet: S, sink: P, period: Duration) -> Self {
        Self {
            sheet,
            sink,
            period,
            status: None,
        }
    }

    /// Status of the last completed cycle; `None` before the first one.
    pub fn status(&self) -> Option<CycleStatus> {
        self.status
    }

    /// Run one complete fetch-parse-aggregate-rank-publish attempt.
    ///
    /// Failures of any kind degrade the cycle: the sink gets a failure
    /// notice in place of a ranking, and nothing carries over to the next
    /// tick. No partial ranking is ever published.
    pub async fn cycle(&mut self) {
        match self.ranking().await {
            Ok(players) => {
                info!(players = players.len(), "cycle ok");
                self.sink.publish_ranking(&players, Local::now());
                self.status = Some(CycleStatus::Ok);
            }
            Err(err) => {
                warn!("cycle failed: {:#}", err);
                self.sink.publish_failure(&err, Local::now());
                self.status = Some(CycleStatus::Degraded);
            }
        }
    }

    async fn ranking(&self) -> Result<Vec<RankedPlayer>> {
        let text = self.sheet.fetch().await.context("fetching sheet")?;
        let players = pipeline::snapshot(&text)?;
        Ok(players)
    }

    /// Tick immediately, then every period until `shutdown` signals or its
    /// sender goes away. Ticks that would land mid-cycle are collapsed.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(period_secs = self.period.as_secs(), "refresh loop started");

        loop {
            tokio::select! {
                _ = ticker.tick() => self.cycle().await,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("refresh loop stopped");
                        return;
                    }
                }
            }
        }
    }
}
