//! Row-to-variables mapping strategies
//!
//! The default mapper reproduces the id/tagList convention of the reference
//! mutation template. [`ColumnMapper`] binds arbitrary variables to columns.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::tabular::{CellValue, Row, find_header};

/// Variables sent with one mutation
pub type Variables = Map<String, Value>;

/// Per-row derivation failure; the row fails without a remote call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DerivationError {
    #[error("ID field not found in row data")]
    MissingId,

    #[error("{variable} field not found in row data")]
    MissingField { variable: String },
}

/// Derives the variables for one row
pub trait VariableMapper: Send + Sync {
    fn derive(&self, headers: &[String], row: &Row) -> Result<Variables, DerivationError>;
}

impl<F> VariableMapper for F
where
    F: Fn(&[String], &Row) -> Result<Variables, DerivationError> + Send + Sync,
{
    fn derive(&self, headers: &[String], row: &Row) -> Result<Variables, DerivationError> {
        self(headers, row)
    }
}

/// Default mapper: `id` and `tagList`, matched case-insensitively
///
/// - `id`: column whose lowercase name is `id`, else row field `id`, then `ID`, else null
/// - `tagList`: column whose lowercase name is `taglist`, else `tagList`, then `taglist`, else `""`
///
/// A null or empty `id` fails the row with [`DerivationError::MissingId`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IdTagListMapper;

impl VariableMapper for IdTagListMapper {
    fn derive(&self, headers: &[String], row: &Row) -> Result<Variables, DerivationError> {
        let id = match find_header(headers, "id") {
            Some(header) => row.get(header).cloned().unwrap_or_default(),
            None => first_present(row, &["id", "ID"]).unwrap_or_default(),
        };

        let tag_list = match find_header(headers, "taglist") {
            Some(header) => row.get(header).cloned().unwrap_or_default(),
            None => first_present(row, &["tagList", "taglist"])
                .unwrap_or_else(|| CellValue::from("")),
        };

        if id.is_blank() {
            return Err(DerivationError::MissingId);
        }

        let mut variables = Variables::new();
        variables.insert("id".to_string(), id.to_json());
        variables.insert("tagList".to_string(), tag_list.to_json());
        Ok(variables)
    }
}

/// First exact-name field that holds a non-blank value
fn first_present(row: &Row, names: &[&str]) -> Option<CellValue> {
    names
        .iter()
        .filter_map(|name| row.get(name))
        .find(|value| !value.is_blank())
        .cloned()
}

/// Binding of one variable to one column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBinding {
    /// Variable name in the operation document (without `$`)
    pub variable: String,
    /// Column header, matched case-insensitively
    pub column: String,
    /// Blank values fail the row when set
    pub required: bool,
}

impl ColumnBinding {
    pub fn new(variable: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            column: column.into(),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Configuration-table mapper: each binding copies one column into one variable
#[derive(Debug, Clone, Default)]
pub struct ColumnMapper {
    bindings: Vec<ColumnBinding>,
}

impl ColumnMapper {
    pub fn new(bindings: Vec<ColumnBinding>) -> Self {
        Self { bindings }
    }

    pub fn bind(mut self, binding: ColumnBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn bindings(&self) -> &[ColumnBinding] {
        &self.bindings
    }

    /// Parse `variable=column` specs, as given on the command line
    pub fn from_specs<S: AsRef<str>>(specs: &[S], required: &[S]) -> anyhow::Result<Self> {
        let mut bindings = Vec::new();
        for spec in specs {
            let spec = spec.as_ref();
            let (variable, column) = spec
                .split_once('=')
                .filter(|(v, c)| !v.trim().is_empty() && !c.is_empty())
                .ok_or_else(|| {
                    anyhow::anyhow!("Invalid mapping '{}': expected VARIABLE=COLUMN", spec)
                })?;
            let variable = variable.trim();
            let mut binding = ColumnBinding::new(variable, column);
            if required.iter().any(|r| r.as_ref() == variable) {
                binding = binding.required();
            }
            bindings.push(binding);
        }

        for name in required {
            if !bindings.iter().any(|b| b.variable == name.as_ref()) {
                anyhow::bail!("Required variable '{}' has no column mapping", name.as_ref());
            }
        }

        Ok(Self { bindings })
    }
}

impl VariableMapper for ColumnMapper {
    fn derive(&self, headers: &[String], row: &Row) -> Result<Variables, DerivationError> {
        let mut variables = Variables::new();
        for binding in &self.bindings {
            let name = find_header(headers, &binding.column).unwrap_or(binding.column.as_str());
            let value = row.get(name).cloned().unwrap_or_default();

            if binding.required && value.is_blank() {
                return Err(DerivationError::MissingField {
                    variable: binding.variable.clone(),
                });
            }
            variables.insert(binding.variable.clone(), value.to_json());
        }
        Ok(variables)
    }
}
