use crate::core::models::record::Record;

/// The outcome of decoding one block window.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// Exactly `entity_count` values were collected.
    Accepted {
        record: Record,
        malformed_lines: usize,
    },
    /// The window produced a different number of values and was dropped.
    Discarded {
        collected: usize,
        malformed_lines: usize,
    },
}

impl DecodeOutcome {
    pub fn malformed_lines(&self) -> usize {
        match self {
            Self::Accepted {
                malformed_lines, ..
            }
            | Self::Discarded {
                malformed_lines, ..
            } => *malformed_lines,
        }
    }

    pub fn into_record(self) -> Option<Record> {
        match self {
            Self::Accepted { record, .. } => Some(record),
            Self::Discarded { .. } => None,
        }
    }
}

/// Turns the raw lines of one block into at most one [`Record`].
///
/// Each line is split on whitespace. A line contributes a value only if it has at least
/// `min_fields` fields and field `value_field_index` parses as `f64`. Any other line is
/// skipped without consuming an entity slot, so later values move up by one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordDecoder {
    entity_count: usize,
    min_fields: usize,
    value_field_index: usize,
}

impl RecordDecoder {
    pub fn new(entity_count: usize, min_fields: usize, value_field_index: usize) -> Self {
        Self {
            entity_count,
            min_fields,
            value_field_index,
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entity_count
    }

    /// Extracts the designated scalar from a single data line, or `None` if the line does
    /// not qualify.
    pub fn parse_line(&self, line: &str) -> Option<f64> {
        let mut field_count = 0;
        let mut value = None;
        for (i, field) in line.split_whitespace().enumerate() {
            if i == self.value_field_index {
                value = Some(field);
            }
            field_count = i + 1;
        }
        if field_count < self.min_fields {
            return None;
        }
        value?.parse().ok()
    }

    pub fn decode<S: AsRef<str>>(&self, lines: &[S]) -> DecodeOutcome {
        let mut values = Vec::with_capacity(self.entity_count.min(lines.len()));
        let mut malformed_lines = 0;
        for line in lines {
            match self.parse_line(line.as_ref()) {
                Some(value) => values.push(value),
                None => malformed_lines += 1,
            }
        }

        if values.len() == self.entity_count {
            DecodeOutcome::Accepted {
                record: Record::new(values),
                malformed_lines,
            }
        } else {
            DecodeOutcome::Discarded {
                collected: values.len(),
                malformed_lines,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder(n: usize) -> RecordDecoder {
        RecordDecoder::new(n, 5, 4)
    }

    #[test]
    fn parse_line_reads_fifth_field() {
        let d = decoder(1);
        assert_eq!(d.parse_line("    1   -0.001  -0.003   0.012   0.008"), Some(0.008));
        assert_eq!(d.parse_line("A B C D -2.5e-3"), Some(-0.0025));
    }

    #[test]
    fn parse_line_rejects_short_and_non_numeric_lines() {
        let d = decoder(1);
        assert_eq!(d.parse_line(""), None);
        assert_eq!(d.parse_line("# of ion s p d"), None);
        assert_eq!(d.parse_line("# of ion       s       p       d       tot"), None);
        assert_eq!(d.parse_line("1 2 3 4 *******"), None);
        assert_eq!(d.parse_line("------------------------------------------"), None);
    }

    #[test]
    fn parse_line_accepts_extra_fields() {
        let d = decoder(1);
        assert_eq!(d.parse_line("1 0.1 0.2 0.3 0.6 trailing junk"), Some(0.6));
    }

    #[test]
    fn parse_line_honours_custom_layout() {
        let d = RecordDecoder::new(1, 6, 5);
        assert_eq!(d.parse_line("1 0.1 0.2 0.3 0.4 1.0"), Some(1.0));
        assert_eq!(d.parse_line("1 0.1 0.2 0.3 0.4"), None);
    }

    #[test]
    fn decode_accepts_full_window() {
        let outcome = decoder(3).decode(&["A B C D 1.5", "A B C D -0.25", "A B C D 3.0"]);
        assert_eq!(
            outcome,
            DecodeOutcome::Accepted {
                record: Record::new(vec![1.5, -0.25, 3.0]),
                malformed_lines: 0,
            }
        );
    }

    #[test]
    fn decode_discards_short_window() {
        let outcome = decoder(3).decode(&["A B C D 1.5", "A B C D -0.25"]);
        assert_eq!(
            outcome,
            DecodeOutcome::Discarded {
                collected: 2,
                malformed_lines: 0,
            }
        );
        assert!(outcome.into_record().is_none());
    }

    #[test]
    fn malformed_line_inside_window_makes_block_short() {
        let outcome = decoder(3).decode(&["A B C D 1.5", "A B C D oops", "A B C D 3.0"]);
        assert_eq!(outcome.malformed_lines(), 1);
        assert!(matches!(outcome, DecodeOutcome::Discarded { collected: 2, .. }));
    }

    #[test]
    fn malformed_line_shifts_later_values_into_earlier_slots() {
        let lines = [
            "garbage",
            "A B C D 1.0",
            "A B C D 2.0",
            "A B C D 3.0",
        ];
        let record = decoder(3).decode(&lines).into_record().unwrap();
        assert_eq!(record.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn surplus_values_are_not_truncated() {
        let lines = ["A B C D 1.0", "A B C D 2.0", "A B C D 3.0"];
        let outcome = decoder(2).decode(&lines);
        assert!(matches!(outcome, DecodeOutcome::Discarded { collected: 3, .. }));
    }

    #[test]
    fn decode_accepts_owned_lines() {
        let lines = vec!["1 0 0 0 0.5".to_string()];
        let record = decoder(1).decode(&lines).into_record().unwrap();
        assert_eq!(record.values(), &[0.5]);
    }
}
