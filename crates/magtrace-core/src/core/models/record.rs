/// The per-entity scalar values decoded from one accepted block, in entity-index order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<f64>,
}

impl Record {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl From<Vec<f64>> for Record {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}
