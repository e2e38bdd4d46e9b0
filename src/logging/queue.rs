//! Deferred emission queues
//!
//! Three unbounded multi-producer queues, one per severity. Any thread may
//! enqueue; only the owner of the `Sink` drains them, once per host frame.
//! There is no capacity limit and no backpressure: message volume is driven by
//! operator-selected levels, not by load.

use super::{Severity, Sink};
use crossbeam_queue::SegQueue;

/// Number of lines forwarded by one flush, per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl FlushStats {
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.infos
    }

    fn bump(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Info => self.infos += 1,
        }
    }
}

impl std::ops::AddAssign for FlushStats {
    fn add_assign(&mut self, other: Self) {
        self.errors += other.errors;
        self.warnings += other.warnings;
        self.infos += other.infos;
    }
}

/// The error, warning and info queues
#[derive(Default)]
pub struct DeferredQueues {
    errors: SegQueue<String>,
    warnings: SegQueue<String>,
    infos: SegQueue<String>,
}

impl DeferredQueues {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self, severity: Severity) -> &SegQueue<String> {
        match severity {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
            Severity::Info => &self.infos,
        }
    }

    /// Queue a formatted line. Never blocks, callable from any thread.
    #[inline]
    pub fn enqueue(&self, severity: Severity, line: String) {
        self.queue(severity).push(line);
    }

    /// Drain every queue into `sink`: all errors, then warnings, then infos.
    ///
    /// Must only be called by the single consumer (the host's main thread).
    /// Lines enqueued by other threads while a queue is being drained may be
    /// picked up by this flush or the next one.
    pub fn flush(&self, sink: &mut dyn Sink) -> FlushStats {
        let mut stats = FlushStats::default();
        for severity in Severity::ALL {
            let queue = self.queue(severity);
            while let Some(line) = queue.pop() {
                sink.write(severity, &line);
                stats.bump(severity);
            }
        }
        stats
    }

    /// Lines waiting in one queue
    pub fn pending(&self, severity: Severity) -> usize {
        self.queue(severity).len()
    }

    pub fn is_empty(&self) -> bool {
        Severity::ALL.iter().all(|s| self.queue(*s).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemorySink;

    #[test]
    fn test_flush_preserves_order_per_severity() {
        let queues = DeferredQueues::new();
        for i in 0..5 {
            queues.enqueue(Severity::Error, format!("e{}", i));
        }
        assert_eq!(queues.pending(Severity::Error), 5);

        let mut sink = MemorySink::new();
        let stats = queues.flush(&mut sink);

        assert_eq!(stats.errors, 5);
        assert_eq!(stats.total(), 5);
        assert_eq!(sink.errors, vec!["e0", "e1", "e2", "e3", "e4"]);
        assert!(sink.infos.is_empty());
        assert!(queues.is_empty());
    }

    #[test]
    fn test_flush_routes_each_queue_to_its_channel() {
        let queues = DeferredQueues::new();
        queues.enqueue(Severity::Info, "i".to_string());
        queues.enqueue(Severity::Warning, "w".to_string());
        queues.enqueue(Severity::Error, "e".to_string());

        let mut sink = MemorySink::new();
        let stats = queues.flush(&mut sink);

        assert_eq!(
            stats,
            FlushStats {
                errors: 1,
                warnings: 1,
                infos: 1
            }
        );
        assert_eq!(sink.infos, vec!["i"]);
        assert_eq!(sink.warnings, vec!["w"]);
        assert_eq!(sink.errors, vec!["e"]);
    }

    #[test]
    fn test_flush_on_empty_queues_writes_nothing() {
        let queues = DeferredQueues::new();
        let mut sink = MemorySink::new();
        assert_eq!(queues.flush(&mut sink).total(), 0);
        assert_eq!(sink.total(), 0);
    }

    #[test]
    fn test_second_flush_only_sees_new_lines() {
        let queues = DeferredQueues::new();
        let mut sink = MemorySink::new();

        queues.enqueue(Severity::Info, "a".to_string());
        queues.flush(&mut sink);
        queues.enqueue(Severity::Info, "b".to_string());
        queues.flush(&mut sink);

        assert_eq!(sink.infos, vec!["a", "b"]);
    }
}
