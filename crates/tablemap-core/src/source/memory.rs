//! Scripted in-memory row source.
//!
//! Responses are matched against the whitespace-normalized SQL text in the
//! order they were registered. Every executed statement is recorded so
//! tests can assert on the exact text and parameters a query produced.

use crate::{
    source::{RowSet, RowSource, SourceError},
    value::Value,
};
use std::sync::{Mutex, PoisonError};

type Responder =
    Box<dyn Fn(&str, &[Value]) -> Option<Result<ResultTable, SourceError>> + Send + Sync>;

///
/// ResultTable
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append one row; values are given in column order.
    #[must_use]
    pub fn with_row(mut self, row: Vec<Value>) -> Self {
        self.rows.push(row);
        self
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

///
/// ExecutedQuery
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutedQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

///
/// MemorySource
///

#[derive(Default)]
pub struct MemorySource {
    responders: Vec<Responder>,
    executed: Mutex<Vec<ExecutedQuery>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every statement containing `needle` with the full table.
    #[must_use]
    pub fn respond(self, needle: &str, table: ResultTable) -> Self {
        let needle = normalize_sql(needle);

        self.respond_with(move |sql, _| sql.contains(&needle).then(|| Ok(table.clone())))
    }

    /// Answer statements containing `needle` with the rows whose `column`
    /// equals the first bound parameter, compared by rendered text.
    #[must_use]
    pub fn respond_where_eq(self, needle: &str, column: &str, table: ResultTable) -> Self {
        let needle = normalize_sql(needle);
        let column = column.to_string();

        self.respond_with(move |sql, params| {
            if !sql.contains(&needle) {
                return None;
            }
            let Some(index) = table.column_index(&column) else {
                return Some(Err(SourceError::new(format!("unknown column '{column}'"))));
            };
            let wanted = params.first().map(ToString::to_string);

            let rows = table
                .rows
                .iter()
                .filter(|row| row.get(index).map(ToString::to_string) == wanted)
                .cloned()
                .collect();

            Some(Ok(ResultTable {
                columns: table.columns.clone(),
                rows,
            }))
        })
    }

    /// Fail every statement containing `needle`.
    #[must_use]
    pub fn fail(self, needle: &str, message: &str) -> Self {
        let needle = normalize_sql(needle);
        let message = message.to_string();

        self.respond_with(move |sql, _| {
            sql.contains(&needle)
                .then(|| Err(SourceError::new(message.clone())))
        })
    }

    /// Register a custom responder. It receives normalized SQL.
    #[must_use]
    pub fn respond_with<F>(mut self, responder: F) -> Self
    where
        F: Fn(&str, &[Value]) -> Option<Result<ResultTable, SourceError>> + Send + Sync + 'static,
    {
        self.responders.push(Box::new(responder));
        self
    }

    /// Statements executed so far, in order.
    #[must_use]
    pub fn executed(&self) -> Vec<ExecutedQuery> {
        self.executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RowSource for MemorySource {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Box<dyn RowSet + '_>, SourceError> {
        let sql = normalize_sql(sql);

        self.executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ExecutedQuery {
                sql: sql.clone(),
                params: params.to_vec(),
            });

        let table = self
            .responders
            .iter()
            .find_map(|responder| responder(&sql, params))
            .ok_or_else(|| SourceError::new(format!("no scripted response for: {sql}")))??;

        Ok(Box::new(MemoryRows {
            columns: table.columns,
            rows: table.rows.into_iter(),
        }))
    }
}

///
/// MemoryRows
///

struct MemoryRows {
    columns: Vec<String>,
    rows: std::vec::IntoIter<Vec<Value>>,
}

impl RowSet for MemoryRows {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Vec<Value>>, SourceError> {
        Ok(self.rows.next())
    }
}

/// Collapse whitespace runs so multi-line statements match single-line needles.
#[must_use]
pub fn normalize_sql(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}
