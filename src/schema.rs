//! Logical column types and result-set schemas.
//!
//! The engine reports column metadata in its own type vocabulary; this
//! module translates it into the logical types the rest of the system
//! reasons about. Unknown engine types fail closed rather than degrade to
//! a default.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::driver::ColumnDesc;
use crate::error::{ClientError, ClientResult};

/// Scalar types understood by the execution layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    String,
    Timestamp,
    Decimal { precision: u8, scale: u8 },
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::Boolean => write!(f, "boolean"),
            LogicalType::Int8 => write!(f, "int8"),
            LogicalType::Int16 => write!(f, "int16"),
            LogicalType::Int32 => write!(f, "int32"),
            LogicalType::Int64 => write!(f, "int64"),
            LogicalType::Float => write!(f, "float"),
            LogicalType::Double => write!(f, "double"),
            LogicalType::String => write!(f, "string"),
            LogicalType::Timestamp => write!(f, "timestamp"),
            LogicalType::Decimal { precision, scale } => {
                write!(f, "decimal({},{})", precision, scale)
            }
        }
    }
}

/// Ordered, uniquely-named columns of a table or result set.
///
/// Order is significant and matches the result-set column order exactly.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<(String, LogicalType)>,
}

impl Schema {
    pub fn new(columns: Vec<(String, LogicalType)>) -> ClientResult<Self> {
        let mut seen = HashSet::new();
        for (name, _) in &columns {
            if !seen.insert(name.as_str()) {
                return Err(ClientError::SchemaProbe(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Translate driver column metadata into a logical schema, preserving
    /// column order exactly.
    pub fn from_descriptors(descriptors: &[ColumnDesc]) -> ClientResult<Self> {
        let mut columns = Vec::with_capacity(descriptors.len());
        for desc in descriptors {
            columns.push((desc.name.clone(), logical_type_of(desc)?));
        }
        Self::new(columns)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn types(&self) -> impl Iterator<Item = &LogicalType> {
        self.columns.iter().map(|(_, ty)| ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LogicalType)> {
        self.columns.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    /// The type of the named column, if present.
    pub fn get(&self, name: &str) -> Option<&LogicalType> {
        self.columns
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, ty)| ty)
    }
}

/// The static engine-type table. Names are matched case-insensitively;
/// anything outside the table is a configuration error, never coerced.
fn logical_type_of(desc: &ColumnDesc) -> ClientResult<LogicalType> {
    let mapped = match desc.type_name.to_ascii_lowercase().as_str() {
        "boolean" => LogicalType::Boolean,
        "tinyint" => LogicalType::Int8,
        "smallint" => LogicalType::Int16,
        "int" => LogicalType::Int32,
        "bigint" => LogicalType::Int64,
        "float" => LogicalType::Float,
        "double" => LogicalType::Double,
        "string" => LogicalType::String,
        "timestamp" => LogicalType::Timestamp,
        "decimal" => match (desc.precision, desc.scale) {
            (Some(precision), Some(scale)) => LogicalType::Decimal { precision, scale },
            _ => {
                return Err(ClientError::SchemaProbe(format!(
                    "decimal column '{}' reported without precision/scale",
                    desc.name
                )))
            }
        },
        _ => {
            return Err(ClientError::UnsupportedType {
                column: desc.name.clone(),
                type_name: desc.type_name.clone(),
            })
        }
    };
    Ok(mapped)
}
