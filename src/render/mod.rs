// src/render/mod.rs
//
// Output sinks. The scheduler hands every cycle's outcome to exactly one
// `Publish` implementation; a failure notice replaces the previous render
// rather than leaving it silently stale.

use std::io::{self, Write};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::warn;

use crate::pipeline::RankedPlayer;

/// Fixed human-readable stamp: day, abbreviated month, time.
pub const STAMP_FORMAT: &str = "%d %b, %H:%M:%S";

pub trait Publish {
    fn publish_ranking(&mut self, players: &[RankedPlayer], at: DateTime<Local>);
    fn publish_failure(&mut self, error: &anyhow::Error, at: DateTime<Local>);
}

/// Totals come out of the fold as `f64`, but most sheets hold integers;
/// print those without the trailing `.0`.
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.abs() < 1e15 {
        format!("{}", score as i64)
    } else {
        format!("{}", score)
    }
}

fn medal(rank: usize) -> &'static str {
    match rank {
        1 => "🥇",
        2 => "🥈",
        3 => "🥉",
        _ => "  ",
    }
}

/// Plain-text leaderboard written to any writer, stdout in production.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn render_ranking(&mut self, players: &[RankedPlayer], at: DateTime<Local>) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "=== Leaderboard — {} ===", at.format("%B %Y"))?;
        for p in players {
            writeln!(
                self.out,
                "{:>3}. {} {:<20} {:>10}   {}",
                p.rank,
                medal(p.rank),
                p.name,
                format_score(p.total_score),
                p.last_seen.format(STAMP_FORMAT),
            )?;
        }
        if players.is_empty() {
            writeln!(self.out, "  (no entrants yet)")?;
        }
        writeln!(self.out, "Last updated: {}", at.format(STAMP_FORMAT))?;
        self.out.flush()
    }

    fn render_failure(&mut self, error: &anyhow::Error, at: DateTime<Local>) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "⚠ Failed to load leaderboard: {:#}", error)?;
        writeln!(self.out, "⚠ Failed to update at {}", at.format(STAMP_FORMAT))?;
        self.out.flush()
    }
}

impl<W: Write> Publish for ConsoleSink<W> {
    fn publish_ranking(&mut self, players: &[RankedPlayer], at: DateTime<Local>) {
        if let Err(err) = self.render_ranking(players, at) {
            warn!("writing leaderboard failed: {}", err);
        }
    }

    fn publish_failure(&mut self, error: &anyhow::Error, at: DateTime<Local>) {
        if let Err(err) = self.render_failure(error, at) {
            warn!("writing failure notice failed: {}", err);
        }
    }
}

#[derive(Serialize)]
struct OkPayload<'a> {
    status: &'static str,
    updated_at: DateTime<Local>,
    players: &'a [RankedPlayer],
}

#[derive(Serialize)]
struct FailPayload {
    status: &'static str,
    failed_at: DateTime<Local>,
    error: String,
}

/// One JSON object per cycle, one per line, for piping into other tools.
pub struct JsonSink<W: Write> {
    out: W,
}

impl JsonSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_line<T: Serialize>(&mut self, payload: &T) -> io::Result<()> {
        let line = serde_json::to_string(payload)?;
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }
}

impl<W: Write> Publish for JsonSink<W> {
    fn publish_ranking(&mut self, players: &[RankedPlayer], at: DateTime<Local>) {
        let payload = OkPayload {
            status: "ok",
            updated_at: at,
            players,
        };
        if let Err(err) = self.write_line(&payload) {
            warn!("writing json ranking failed: {}", err);
        }
    }

    fn publish_failure(&mut self, error: &anyhow::Error, at: DateTime<Local>) {
        let payload = FailPayload {
            status: "degraded",
            failed_at: at,
            error: format!("{:#}", error),
        };
        if let Err(err) = self.write_line(&payload) {
            warn!("writing json failure failed: {}", err);
        }
    }
}
