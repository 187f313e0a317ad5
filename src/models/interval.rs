use std::fmt;

use super::{ProcessId, TimeStep};

/// One contiguous slice of CPU time given to one process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionInterval {
    process_id: ProcessId,
    start: TimeStep,
    duration: TimeStep,
    color: &'static str, // Presentation hint only.
}

impl ExecutionInterval {
    pub fn new(
        process_id: impl Into<ProcessId>,
        start: TimeStep,
        duration: TimeStep,
        color: &'static str,
    ) -> Self {
        Self {
            process_id: process_id.into(),
            start,
            duration,
            color,
        }
    }

    pub fn process_id(&self) -> &str {
        &self.process_id
    }

    pub fn start(&self) -> TimeStep {
        self.start
    }

    pub fn duration(&self) -> TimeStep {
        self.duration
    }

    /// First time unit after the slice.
    pub fn end(&self) -> TimeStep {
        self.start + self.duration
    }

    pub fn color(&self) -> &'static str {
        self.color
    }

    pub(crate) fn extend(&mut self, by: TimeStep) {
        self.duration += by;
    }
}

impl fmt::Display for ExecutionInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}..{})", self.process_id, self.start, self.end())
    }
}

/// Ordered intervals produced by one simulation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeline {
    intervals: Vec<ExecutionInterval>,
}

impl Timeline {
    pub fn new(intervals: Vec<ExecutionInterval>) -> Self {
        Self { intervals }
    }

    pub fn intervals(&self) -> &[ExecutionInterval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExecutionInterval> {
        self.intervals.iter()
    }

    /// End of the last slice, 0 for an empty timeline.
    pub fn makespan(&self) -> TimeStep {
        self.intervals.iter().map(|i| i.end()).max().unwrap_or(0)
    }

    /// CPU time the timeline grants to `process_id`.
    pub fn executed(&self, process_id: &str) -> TimeStep {
        self.intervals
            .iter()
            .filter(|i| i.process_id() == process_id)
            .map(|i| i.duration())
            .sum()
    }

    /// Time at which `process_id` receives its last unit of CPU.
    pub fn completion(&self, process_id: &str) -> Option<TimeStep> {
        self.intervals
            .iter()
            .filter(|i| i.process_id() == process_id)
            .map(|i| i.end())
            .max()
    }

    /// True when slices, ordered by start, start at 0 and follow each other
    /// with no gap and no overlap.
    pub fn is_contiguous(&self) -> bool {
        let mut sorted: Vec<&ExecutionInterval> = self.intervals.iter().collect();
        sorted.sort_by_key(|i| i.start());

        let mut cursor = 0;
        for interval in sorted {
            if interval.start() != cursor || interval.duration() == 0 {
                return false;
            }
            cursor = interval.end();
        }
        true
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bars: Vec<String> = self.intervals.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", bars.join(" "))
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a ExecutionInterval;
    type IntoIter = std::slice::Iter<'a, ExecutionInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(id: &str, start: TimeStep, duration: TimeStep) -> ExecutionInterval {
        ExecutionInterval::new(id, start, duration, "#000000")
    }

    #[test]
    fn test_queries() {
        let timeline = Timeline::new(vec![bar("P1", 0, 4), bar("P2", 4, 2), bar("P1", 6, 1)]);

        assert_eq!(timeline.makespan(), 7);
        assert_eq!(timeline.executed("P1"), 5);
        assert_eq!(timeline.executed("P3"), 0);
        assert_eq!(timeline.completion("P1"), Some(7));
        assert_eq!(timeline.completion("P3"), None);
        assert_eq!(timeline.to_string(), "P1(0..4) P2(4..6) P1(6..7)");
    }

    #[test]
    fn test_contiguity() {
        assert!(Timeline::default().is_contiguous());
        assert!(Timeline::new(vec![bar("P2", 3, 1), bar("P1", 0, 3)]).is_contiguous());
        assert!(!Timeline::new(vec![bar("P1", 0, 3), bar("P2", 4, 1)]).is_contiguous());
        assert!(!Timeline::new(vec![bar("P1", 0, 3), bar("P2", 2, 1)]).is_contiguous());
        assert!(!Timeline::new(vec![bar("P1", 1, 3)]).is_contiguous());
    }
}
