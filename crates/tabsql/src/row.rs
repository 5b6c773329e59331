//! Dynamically typed row values shared by file collaborators and the database.

use crate::error::{TabError, TabResult};
use crate::table::{Column, ColumnType};
use chrono::{NaiveDate, NaiveDateTime};
use tokio_postgres::types::Type;
use uuid::Uuid;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Uuid(Uuid),
}

impl Value {
    /// Column type this value belongs to; `None` for `Null`.
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(ColumnType::Boolean),
            Value::Int(_) => Some(ColumnType::Integer),
            Value::Float(_) => Some(ColumnType::Float),
            Value::Text(_) => Some(ColumnType::Text),
            Value::Date(_) => Some(ColumnType::Date),
            Value::Timestamp(_) => Some(ColumnType::Timestamp),
            Value::Uuid(_) => Some(ColumnType::Uuid),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// One row of cells, positionally aligned with a column list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row(pub Vec<Value>);

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

/// Build a [`Row`] from heterogeneous values.
///
/// ```
/// use tabsql::{row, Value};
///
/// let r = row![1, "alice", None::<bool>];
/// assert_eq!(r.get(2), Some(&Value::Null));
/// ```
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        $crate::Row::new(vec![$($crate::Value::from($value)),*])
    };
}

/// Map a Postgres column type onto the tabular column type.
pub fn column_type_for(ty: &Type) -> Option<ColumnType> {
    match *ty {
        Type::BOOL => Some(ColumnType::Boolean),
        Type::INT2 | Type::INT4 | Type::INT8 => Some(ColumnType::Integer),
        Type::FLOAT4 | Type::FLOAT8 => Some(ColumnType::Float),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => Some(ColumnType::Text),
        Type::DATE => Some(ColumnType::Date),
        Type::TIMESTAMP => Some(ColumnType::Timestamp),
        Type::UUID => Some(ColumnType::Uuid),
        _ => None,
    }
}

/// Describe the columns of a Postgres result row.
pub fn pg_columns(row: &tokio_postgres::Row) -> TabResult<Vec<Column>> {
    row.columns()
        .iter()
        .map(|c| {
            let ty = column_type_for(c.type_()).ok_or_else(|| {
                TabError::decode(c.name(), format!("unsupported column type {}", c.type_()))
            })?;
            Ok(Column::new(c.name(), ty))
        })
        .collect()
}

/// Decode a Postgres result row into a [`Row`].
pub fn decode_pg_row(row: &tokio_postgres::Row) -> TabResult<Row> {
    let mut values: Vec<Value> = Vec::with_capacity(row.len());
    for (idx, column) in row.columns().iter().enumerate() {
        let name = column.name();
        let decode_err = |e: tokio_postgres::Error| TabError::decode(name, e.to_string());
        let value: Value = match *column.type_() {
            Type::BOOL => row.try_get::<_, Option<bool>>(idx).map_err(decode_err)?.into(),
            Type::INT2 => row
                .try_get::<_, Option<i16>>(idx)
                .map_err(decode_err)?
                .map(i64::from)
                .into(),
            Type::INT4 => row
                .try_get::<_, Option<i32>>(idx)
                .map_err(decode_err)?
                .map(i64::from)
                .into(),
            Type::INT8 => row.try_get::<_, Option<i64>>(idx).map_err(decode_err)?.into(),
            Type::FLOAT4 => row
                .try_get::<_, Option<f32>>(idx)
                .map_err(decode_err)?
                .map(f64::from)
                .into(),
            Type::FLOAT8 => row.try_get::<_, Option<f64>>(idx).map_err(decode_err)?.into(),
            Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => row
                .try_get::<_, Option<String>>(idx)
                .map_err(decode_err)?
                .into(),
            Type::DATE => row
                .try_get::<_, Option<NaiveDate>>(idx)
                .map_err(decode_err)?
                .into(),
            Type::TIMESTAMP => row
                .try_get::<_, Option<NaiveDateTime>>(idx)
                .map_err(decode_err)?
                .into(),
            Type::UUID => row.try_get::<_, Option<Uuid>>(idx).map_err(decode_err)?.into(),
            ref other => {
                return Err(TabError::decode(
                    name,
                    format!("unsupported column type {other}"),
                ));
            }
        };
        values.push(value);
    }
    Ok(Row(values))
}
