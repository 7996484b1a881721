//! Per-generation fitness statistics.

use super::individual::Individual;
use crate::schema::GenerationRecord;

/// Compile mean, population standard deviation, min and max per objective.
///
/// Unevaluated individuals are ignored; with none evaluated every field is 0.
pub fn compile(
    generation: usize,
    evaluations: usize,
    population: &[Individual],
) -> GenerationRecord {
    let values: Vec<[f64; 2]> = population
        .iter()
        .filter_map(|ind| ind.fitness.map(|f| f.values()))
        .collect();

    let mut record = GenerationRecord {
        generation,
        evaluations,
        avg: [0.0; 2],
        std: [0.0; 2],
        min: [0.0; 2],
        max: [0.0; 2],
    };
    if values.is_empty() {
        return record;
    }

    let n = values.len() as f64;
    for objective in 0..2 {
        let column = values.iter().map(|v| v[objective]);
        let mean = column.clone().sum::<f64>() / n;
        let variance = column.clone().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        record.avg[objective] = mean;
        record.std[objective] = variance.sqrt();
        record.min[objective] = column.clone().fold(f64::INFINITY, f64::min);
        record.max[objective] = column.fold(f64::NEG_INFINITY, f64::max);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::individual::Fitness;
    use crate::genealogy::ConcreteId;

    fn individual(weight: f64, value: f64) -> Individual {
        Individual {
            contents: Default::default(),
            fitness: Some(Fitness::new(weight, value)),
            concrete_id: ConcreteId(0),
        }
    }

    #[test]
    fn test_compile_per_objective() {
        let population = vec![individual(2.0, 10.0), individual(4.0, 30.0)];
        let record = compile(3, 2, &population);
        assert_eq!(record.generation, 3);
        assert_eq!(record.evaluations, 2);
        assert_eq!(record.avg, [3.0, 20.0]);
        assert_eq!(record.std, [1.0, 10.0]);
        assert_eq!(record.min, [2.0, 10.0]);
        assert_eq!(record.max, [4.0, 30.0]);
    }

    #[test]
    fn test_compile_empty() {
        let record = compile(0, 0, &[]);
        assert_eq!(record.avg, [0.0; 2]);
        assert_eq!(record.max, [0.0; 2]);
    }
}
