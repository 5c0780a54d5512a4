use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::stats::{ElapsedRecorder, Metric, ProducerStats, StatsReader};

/// Width the label and value of a row are padded to
const ROW_WIDTH: usize = 42;

const RENDER_INTERVAL: Duration = Duration::from_secs(1);

const CONSUMER_BANNER: &str = "txwatch :: suspicious transaction monitor";

const PRODUCER_BANNER: &str = "txwatch :: transaction producer";

/// Something that can redraw itself from live state
pub trait Screen: Send {
    /// Draw one frame; `final_update` marks the last frame before exit
    fn update(&mut self, final_update: bool) -> io::Result<()>;
}

/// Shared drawing primitives: clear, banner, rows
pub struct ScreenFrame {
    out: Box<dyn Write + Send>,
    redraw: bool,
}

impl ScreenFrame {
    pub fn new(out: Box<dyn Write + Send>, redraw: bool) -> Self {
        Self { out, redraw }
    }

    /// Standard output, redrawn in place when it is a terminal
    pub fn stdout() -> Self {
        let redraw = io::stdout().is_terminal();
        Self::new(Box::new(io::stdout()), redraw)
    }

    pub fn draw(&mut self, banner: &str, rows: &[String]) -> io::Result<()> {
        if self.redraw {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        writeln!(self.out, "{banner}")?;
        writeln!(self.out)?;
        for row in rows {
            writeln!(self.out, "{row}")?;
        }
        self.out.flush()
    }

    pub fn finish(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// `[ label <pad> value ]`, value right-aligned so all rows line up
pub fn row(label: &str, value: &str) -> String {
    let pad = ROW_WIDTH.saturating_sub(label.len());
    format!("[ {label} {value:>pad$} ]")
}

/// `HHhMMmSSs`, rounded to the nearest second
pub fn format_duration(elapsed: Duration) -> String {
    let secs = (elapsed.as_millis() + 500) / 1000;
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{hours:02}h{minutes:02}m{seconds:02}s")
}

/// Consumer statistics screen: one row per counter plus elapsed time
pub struct ConsumerScreen {
    frame: ScreenFrame,
    stats: Arc<dyn StatsReader>,
}

impl ConsumerScreen {
    pub fn new(frame: ScreenFrame, stats: Arc<dyn StatsReader>) -> Self {
        Self { frame, stats }
    }

    fn rows(&self) -> Vec<String> {
        Metric::ALL
            .iter()
            .map(|metric| row(metric.label(), &self.stats.read(*metric).to_string()))
            .chain(std::iter::once(row(
                "Elapsed Time",
                &format_duration(self.stats.elapsed()),
            )))
            .collect()
    }
}

impl Screen for ConsumerScreen {
    fn update(&mut self, final_update: bool) -> io::Result<()> {
        let rows = self.rows();
        self.frame.draw(CONSUMER_BANNER, &rows)?;
        if final_update {
            self.frame.finish()?;
        }
        Ok(())
    }
}

/// Producer statistics screen: published records, failed deliveries, elapsed time
pub struct ProducerScreen {
    frame: ScreenFrame,
    stats: Arc<ProducerStats>,
}

impl ProducerScreen {
    pub fn new(frame: ScreenFrame, stats: Arc<ProducerStats>) -> Self {
        Self { frame, stats }
    }

    fn rows(&self) -> Vec<String> {
        vec![
            row("Total published messages", &self.stats.published().to_string()),
            row(
                "Total message delivery errors",
                &self.stats.failed_deliveries().to_string(),
            ),
            row("Elapsed Time", &format_duration(self.stats.elapsed())),
        ]
    }
}

impl Screen for ProducerScreen {
    fn update(&mut self, final_update: bool) -> io::Result<()> {
        let rows = self.rows();
        self.frame.draw(PRODUCER_BANNER, &rows)?;
        if final_update {
            self.frame.finish()?;
        }
        Ok(())
    }
}

/// Redraw `screen` every second until `shutdown` fires, then draw a final frame
pub fn spawn_renderer<S, T>(
    mut screen: S,
    stats: Arc<T>,
    start: Instant,
    shutdown: CancellationToken,
) -> JoinHandle<()>
where
    S: Screen + 'static,
    T: ElapsedRecorder + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(RENDER_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    stats.set_elapsed(start.elapsed());
                    if let Err(e) = screen.update(true) {
                        warn!(error = %e, "Drawing final frame");
                    }
                    break;
                }
                _ = ticker.tick() => {
                    stats.set_elapsed(start.elapsed());
                    if let Err(e) = screen.update(false) {
                        warn!(error = %e, "Drawing frame");
                    }
                }
            }
        }
    })
}
