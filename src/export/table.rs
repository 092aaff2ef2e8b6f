//! Flattened rows and the table handed to tabular writers

use serde::Serialize;

use super::columns::ColumnValue;

/// One flattened field, tagged with its owning collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRow {
    pub database: String,
    pub collection: String,
    /// Requested column values, in request order
    pub values: Vec<ColumnValue>,
}

/// Rows grouped by collection, in order of first appearance
pub type CollectionGroup<'a> = (&'a str, Vec<&'a [ColumnValue]>);

/// Header plus rows. The first two columns are always database and collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<ColumnValue>>,
}

impl Table {
    /// Build a table from flattened rows, prepending database and collection
    pub fn from_flat_rows(labels: &[String], flat_rows: Vec<FlatRow>) -> Self {
        let mut header = vec!["Database".to_string(), "Collection".to_string()];
        header.extend(labels.iter().cloned());

        let rows = flat_rows
            .into_iter()
            .map(|row| {
                let mut cells = Vec::with_capacity(row.values.len() + 2);
                cells.push(ColumnValue::Text(row.database));
                cells.push(ColumnValue::Text(row.collection));
                cells.extend(row.values);
                cells
            })
            .collect();

        Self { header, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header without the database and collection columns
    pub fn field_header(&self) -> &[String] {
        self.header.get(2..).unwrap_or_default()
    }

    /// Rows grouped by database then collection, each row without its first two cells
    pub fn grouped(&self) -> Vec<(&str, Vec<CollectionGroup<'_>>)> {
        let mut databases: Vec<(&str, Vec<CollectionGroup<'_>>)> = Vec::new();

        for row in &self.rows {
            let database = cell_text(row, 0);
            let collection = cell_text(row, 1);
            let fields = row.get(2..).unwrap_or_default();

            let db_index = match databases.iter().position(|(db, _)| *db == database) {
                Some(i) => i,
                None => {
                    databases.push((database, Vec::new()));
                    databases.len() - 1
                }
            };
            let collections = &mut databases[db_index].1;
            match collections.iter().position(|(coll, _)| *coll == collection) {
                Some(i) => collections[i].1.push(fields),
                None => collections.push((collection, vec![fields])),
            }
        }

        databases
    }
}

fn cell_text(row: &[ColumnValue], index: usize) -> &str {
    match row.get(index) {
        Some(ColumnValue::Text(s)) => s.as_str(),
        _ => "",
    }
}
