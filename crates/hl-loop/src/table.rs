//! Labelled step metric rows.

use std::fmt;

use serde::Serialize;

use crate::metrics::StepMetricsRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepInfoEntry {
    pub label: String,
    #[serde(flatten)]
    pub metrics: StepMetricsRow,
}

/// Step info table, one row per evaluated configuration, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StepInfoTable {
    rows: Vec<StepInfoEntry>,
}

impl StepInfoTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, metrics: StepMetricsRow) {
        self.rows.push(StepInfoEntry {
            label: label.into(),
            metrics,
        });
    }

    pub fn rows(&self) -> &[StepInfoEntry] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepInfoEntry> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a StepInfoTable {
    type Item = &'a StepInfoEntry;
    type IntoIter = std::slice::Iter<'a, StepInfoEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

const VALUE_WIDTH: usize = 17;

impl fmt::Display for StepInfoTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self
            .rows
            .iter()
            .map(|r| r.label.len())
            .chain(std::iter::once("Scenario".len()))
            .max()
            .unwrap_or(0);

        write!(f, "{:<label_width$}", "Scenario")?;
        for name in StepMetricsRow::FIELD_NAMES {
            write!(f, "  {:>VALUE_WIDTH$}", name)?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{:<label_width$}", row.label)?;
            for v in row.metrics.as_array() {
                write!(f, "  {:>VALUE_WIDTH$.4}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
