//! Compatibility tables
//!
//! A table is a square 0/1 matrix with one row and column per kind of a
//! domain, where 1 marks a pair of kinds that may share a configuration.
//! Tables are `static` data written next to the kind enum they describe.

use crate::error::DomainDefinitionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatibilityTable {
    rows: &'static [&'static [u8]],
}

impl CompatibilityTable {
    pub const fn new(rows: &'static [&'static [u8]]) -> Self {
        Self { rows }
    }

    /// Number of rows
    pub const fn dimension(&self) -> usize {
        self.rows.len()
    }

    /// Cell lookup; the diagonal and out-of-range coordinates read as incompatible
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row == col {
            return false;
        }
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map_or(false, |&cell| cell == 1)
    }

    pub fn rows(&self) -> impl Iterator<Item = &'static [u8]> {
        self.rows.iter().copied()
    }

    /// Index pairs `(i, j)` with `i < j` that are marked incompatible
    pub fn incompatible_pairs(&self) -> Vec<(usize, usize)> {
        let n = self.dimension();
        let mut pairs = Vec::new();
        for row in 0..n {
            for col in (row + 1)..n {
                if !self.get(row, col) {
                    pairs.push((row, col));
                }
            }
        }
        pairs
    }

    /// Check shape, cell values, diagonal and symmetry against a registry of `expected` kinds
    pub fn validate(
        &self,
        domain: &'static str,
        expected: usize,
    ) -> Result<(), DomainDefinitionError> {
        if self.rows.len() != expected {
            return Err(DomainDefinitionError::TableDimension {
                domain,
                rows: self.rows.len(),
                expected,
            });
        }

        for (row, cells) in self.rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(DomainDefinitionError::RowLength {
                    domain,
                    row,
                    len: cells.len(),
                    expected,
                });
            }
            for (col, &value) in cells.iter().enumerate() {
                if value > 1 {
                    return Err(DomainDefinitionError::InvalidCell {
                        domain,
                        row,
                        col,
                        value,
                    });
                }
            }
            if cells[row] != 0 {
                return Err(DomainDefinitionError::SelfCompatible { domain, index: row });
            }
        }

        for row in 0..expected {
            for col in (row + 1)..expected {
                if self.rows[row][col] != self.rows[col][row] {
                    return Err(DomainDefinitionError::Asymmetric { domain, row, col });
                }
            }
        }

        Ok(())
    }
}
