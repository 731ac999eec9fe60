//! Mock pixel-cell data source.
//!
//! Stands in for a real backend: delivers one batch of random cells after a
//! simulated latency. The fetch runs on its own thread and hands the result
//! to the event loop through a channel, so the render path never blocks on
//! it; the viewer draws an empty cell set until delivery.

use pixelgrid_core::{Color, PixelCell};
use rand::Rng;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const CELL_COUNT: usize = 1000;
const COORD_RANGE: i64 = 100;
const SIMULATED_LATENCY: Duration = Duration::from_millis(1000);

/// Start the single-shot background fetch.
pub fn spawn_fetch() -> mpsc::Receiver<Vec<PixelCell>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        thread::sleep(SIMULATED_LATENCY);
        let cells = random_cells(CELL_COUNT);
        tracing::info!(count = cells.len(), "cell fetch resolved");
        // The receiver may already be gone if the viewer shut down.
        let _ = tx.send(cells);
    });
    rx
}

/// Generate `count` random cells with coordinates in `[0, COORD_RANGE)`.
pub fn random_cells(count: usize) -> Vec<PixelCell> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            PixelCell::new(
                rng.random_range(0..COORD_RANGE),
                rng.random_range(0..COORD_RANGE),
                Color::rgba(rng.random(), rng.random(), rng.random(), 1.0),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_cells_stay_in_range() {
        for cell in random_cells(500) {
            assert!((0..COORD_RANGE).contains(&cell.x));
            assert!((0..COORD_RANGE).contains(&cell.y));
            assert!(cell.color.a == 1.0);
        }
    }

    #[test]
    fn fetch_delivers_one_batch() {
        let rx = spawn_fetch();
        let cells = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("fetch did not resolve");
        assert_eq!(cells.len(), CELL_COUNT);
        // Single-shot: the sender hangs up after the first batch.
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }
}
