use super::record::Record;
use nalgebra::DMatrix;
use serde::Serialize;

/// Aggregate statistics of a single entity's trajectory across all accepted steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntitySummary {
    /// 1-based entity (ion) index.
    pub entity: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    #[serde(rename = "final")]
    pub final_value: f64,
}

/// A dense, row-major time series of shape `(steps, entities)`.
///
/// Rows are appended in scan order and always have exactly `entities` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    entities: usize,
    data: Vec<f64>,
}

impl Series {
    pub fn new(entities: usize) -> Self {
        Self {
            entities,
            data: Vec::new(),
        }
    }

    /// Appends a record as the next row. Returns `false` and leaves the series untouched if
    /// the record's width differs from the series width.
    pub(crate) fn push(&mut self, record: Record) -> bool {
        if record.len() != self.entities || self.entities == 0 {
            return false;
        }
        self.data.extend(record.into_values());
        true
    }

    pub fn entities(&self) -> usize {
        self.entities
    }

    pub fn steps(&self) -> usize {
        if self.entities == 0 {
            0
        } else {
            self.data.len() / self.entities
        }
    }

    /// Returns `(steps, entities)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.steps(), self.entities)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The flat row-major backing storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn row(&self, step: usize) -> Option<&[f64]> {
        if step >= self.steps() {
            return None;
        }
        let start = step * self.entities;
        Some(&self.data[start..start + self.entities])
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> {
        self.data.chunks_exact(self.entities.max(1))
    }

    /// Values of the final accepted step.
    pub fn last(&self) -> Option<&[f64]> {
        self.steps().checked_sub(1).and_then(|step| self.row(step))
    }

    /// The trajectory of one entity (0-based) across all steps.
    pub fn column(&self, entity: usize) -> Option<Vec<f64>> {
        if entity >= self.entities {
            return None;
        }
        Some(self.rows().map(|row| row[entity]).collect())
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.steps(), self.entities, &self.data)
    }

    /// Per-entity mean, extrema, and final value. Empty when no step was accepted.
    pub fn summarize(&self) -> Vec<EntitySummary> {
        let steps = self.steps();
        let Some(last) = self.last() else {
            return Vec::new();
        };

        let mut summaries: Vec<EntitySummary> = last
            .iter()
            .enumerate()
            .map(|(i, &value)| EntitySummary {
                entity: i + 1,
                mean: 0.0,
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
                final_value: value,
            })
            .collect();

        for row in self.rows() {
            for (summary, &value) in summaries.iter_mut().zip(row) {
                summary.mean += value;
                summary.min = summary.min.min(value);
                summary.max = summary.max.max(value);
            }
        }
        for summary in &mut summaries {
            summary.mean /= steps as f64;
        }
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(rows: &[&[f64]]) -> Series {
        let mut s = Series::new(rows[0].len());
        for row in rows {
            assert!(s.push(Record::new(row.to_vec())));
        }
        s
    }

    #[test]
    fn push_rejects_mismatched_width() {
        let mut s = Series::new(2);
        assert!(!s.push(Record::new(vec![1.0])));
        assert!(!s.push(Record::new(vec![1.0, 2.0, 3.0])));
        assert!(s.push(Record::new(vec![1.0, 2.0])));
        assert_eq!(s.shape(), (1, 2));
    }

    #[test]
    fn zero_width_series_accepts_nothing() {
        let mut s = Series::new(0);
        assert!(!s.push(Record::new(Vec::new())));
        assert_eq!(s.shape(), (0, 0));
        assert_eq!(s.rows().count(), 0);
    }

    #[test]
    fn rows_and_columns_follow_append_order() {
        let s = series(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        assert_eq!(s.row(1), Some(&[3.0, 4.0][..]));
        assert_eq!(s.row(3), None);
        assert_eq!(s.column(1), Some(vec![2.0, 4.0, 6.0]));
        assert_eq!(s.column(2), None);
        assert_eq!(s.last(), Some(&[5.0, 6.0][..]));
        assert_eq!(
            s.to_rows(),
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]
        );
    }

    #[test]
    fn to_matrix_keeps_row_major_layout() {
        let s = series(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let m = s.to_matrix();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(1, 0)], 4.0);
    }

    #[test]
    fn empty_series_has_zero_rows() {
        let s = Series::new(4);
        assert!(s.is_empty());
        assert_eq!(s.shape(), (0, 4));
        assert_eq!(s.to_matrix().shape(), (0, 4));
        assert!(s.last().is_none());
        assert!(s.summarize().is_empty());
        assert_eq!(s.column(0), Some(Vec::new()));
    }

    #[test]
    fn summarize_reports_per_entity_statistics() {
        let s = series(&[&[1.0, -2.0], &[3.0, 0.0], &[2.0, 5.0]]);
        let summary = s.summarize();
        assert_eq!(summary.len(), 2);
        assert_eq!(
            summary[0],
            EntitySummary {
                entity: 1,
                mean: 2.0,
                min: 1.0,
                max: 3.0,
                final_value: 2.0,
            }
        );
        assert_eq!(summary[1].min, -2.0);
        assert_eq!(summary[1].max, 5.0);
        assert_eq!(summary[1].final_value, 5.0);
    }
}
