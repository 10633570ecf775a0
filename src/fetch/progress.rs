use tracing::{info, trace};

/// Percentage of `total` that `received` represents, rounded to two decimals.
pub fn percent_of(received: u64, total: u64) -> f64 {
    let pct = received as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Tracks bytes received against the response's declared length.
///
/// A missing or zero `Content-Length` leaves the percentage undefined, so only
/// the byte count is reported in that case.
#[derive(Debug, Clone)]
pub struct DownloadProgress {
    total: Option<u64>,
    received: u64,
    last_whole_pct: Option<u64>,
}

impl DownloadProgress {
    pub fn new(total: Option<u64>) -> Self {
        Self {
            total: total.filter(|&t| t > 0),
            received: 0,
            last_whole_pct: None,
        }
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn percent(&self) -> Option<f64> {
        self.total.map(|t| percent_of(self.received, t))
    }

    /// Account for one received chunk and log when the whole percentage moves.
    pub fn advance(&mut self, chunk_len: usize) -> Option<f64> {
        self.received = self.received.saturating_add(chunk_len as u64);
        let pct = self.percent();
        match pct {
            Some(p) => {
                trace!(received = self.received, pct = p, "chunk");
                let whole = p as u64;
                if self.last_whole_pct != Some(whole) {
                    self.last_whole_pct = Some(whole);
                    info!("Downloading... {:.2}%", p);
                }
            }
            None => trace!(received = self.received, "chunk (unknown length)"),
        }
        pct
    }
}
