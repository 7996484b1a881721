//! Report types produced by an evolution run.

use serde::{Deserialize, Serialize};

/// Aggregate statistics for one generation.
///
/// Every array is indexed by objective: `[weight, value]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generation index (0 is the initial population).
    pub generation: usize,
    /// Number of evaluations performed in this generation.
    pub evaluations: usize,
    pub avg: [f64; 2],
    pub std: [f64; 2],
    pub min: [f64; 2],
    pub max: [f64; 2],
}

/// Ordered collection of generation records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Logbook {
    records: Vec<GenerationRecord>,
}

impl Logbook {
    /// Column names in stream order.
    pub const HEADER: [&'static str; 6] = ["gen", "nevals", "avg", "std", "min", "max"];

    /// Create an empty logbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn record(&mut self, record: GenerationRecord) {
        self.records.push(record);
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&GenerationRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of evaluations over all records.
    pub fn total_evaluations(&self) -> u64 {
        self.records.iter().map(|r| r.evaluations as u64).sum()
    }

    /// Tab separated header line.
    pub fn header_line() -> String {
        Self::HEADER.join("\t")
    }

    /// Render a record as a tab separated line matching `header_line`.
    pub fn stream_line(record: &GenerationRecord) -> String {
        let pair = |v: &[f64; 2]| format!("[{:.3} {:.3}]", v[0], v[1]);
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            record.generation,
            record.evaluations,
            pair(&record.avg),
            pair(&record.std),
            pair(&record.min),
            pair(&record.max)
        )
    }
}

/// Current phase of the generational loop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EvolutionPhase {
    /// Building the initial population.
    #[default]
    Initializing,
    /// Evaluating individuals without fitness.
    Evaluating,
    /// Running tournaments.
    Selecting,
    /// Applying crossover and mutation.
    Varying,
    /// All generations done, genealogy persisted.
    Terminated,
}

/// Statistics from a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Generations run after the initial evaluation.
    pub generations: usize,
    /// Evaluations performed, including generation 0.
    pub total_evaluations: u64,
    /// Individuals deployed into the genealogy.
    pub individuals_deployed: u64,
    /// Wall clock time in seconds.
    pub elapsed_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(generation: usize, evaluations: usize) -> GenerationRecord {
        GenerationRecord {
            generation,
            evaluations,
            avg: [10.0, 20.5],
            std: [1.0, 2.0],
            min: [5.0, 0.0],
            max: [15.0, 40.25],
        }
    }

    #[test]
    fn test_logbook_totals() {
        let mut logbook = Logbook::new();
        logbook.record(record(0, 50));
        logbook.record(record(1, 31));
        assert_eq!(logbook.len(), 2);
        assert_eq!(logbook.total_evaluations(), 81);
        assert_eq!(logbook.last().unwrap().generation, 1);
    }

    #[test]
    fn test_stream_line() {
        let line = Logbook::stream_line(&record(3, 12));
        assert_eq!(
            line,
            "3\t12\t[10.000 20.500]\t[1.000 2.000]\t[5.000 0.000]\t[15.000 40.250]"
        );
        assert_eq!(Logbook::header_line(), "gen\tnevals\tavg\tstd\tmin\tmax");
    }
}
