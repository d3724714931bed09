use log::debug;

use crate::core::PalistError;

/// Ordered column names of one table. Position `n` (1-based) names the
/// `n`-th entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnCatalog {
    names: Vec<String>,
}

impl ColumnCatalog {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of the first column whose name equals `name`, ignoring
    /// ASCII case.
    pub fn resolve(&self, name: &str) -> Result<usize, PalistError> {
        let position = self
            .names
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(name))
            .map(|idx| idx + 1)
            .ok_or_else(|| PalistError::ColumnNotFound(name.to_string()))?;
        debug!("resolved column '{name}' to position {position}");
        Ok(position)
    }

    pub fn name(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|idx| self.names.get(idx))
            .map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| (idx + 1, name.as_str()))
    }
}
