//! Per-pass layout counters.
//!
//! Every layout pass starts from zeroed counters, fills them while walking and
//! leaves them on the runtime for inspection. A one-line summary is logged at
//! `trace` level when the pass did any work.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LayoutStats {
    /// Dirty roots that were walked.
    pub roots_walked: u32,
    /// Clean roots left alone this frame.
    pub roots_skipped: u32,
    /// Rects whose computed size and position were written.
    pub rects_laid_out: u32,
    /// Children skipped together with their subtree (no rect, nested root or
    /// too deep).
    pub entities_skipped: u32,
}

impl LayoutStats {
    #[inline]
    pub fn record_root_walked(&mut self) {
        self.roots_walked += 1;
    }

    #[inline]
    pub fn record_root_skipped(&mut self) {
        self.roots_skipped += 1;
    }

    #[inline]
    pub fn record_rect(&mut self) {
        self.rects_laid_out += 1;
    }

    #[inline]
    pub fn record_entity_skipped(&mut self) {
        self.entities_skipped += 1;
    }

    /// Share of roots that could reuse last frame's layout.
    pub fn skip_rate(&self) -> f64 {
        let total = self.roots_walked + self.roots_skipped;
        if total == 0 {
            return 0.0;
        }
        self.roots_skipped as f64 / total as f64 * 100.0
    }

    pub fn log_summary(&self) {
        if self.roots_walked == 0 {
            return;
        }
        log::trace!(
            "[layout] roots walked={} skipped={} rects={} entities skipped={} skip_rate={:.1}%",
            self.roots_walked,
            self.roots_skipped,
            self.rects_laid_out,
            self.entities_skipped,
            self.skip_rate()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_rate() {
        let mut stats = LayoutStats::default();
        assert_eq!(stats.skip_rate(), 0.0);

        stats.record_root_walked();
        stats.record_root_skipped();
        stats.record_root_skipped();
        stats.record_root_skipped();
        assert_eq!(stats.skip_rate(), 75.0);
    }
}
