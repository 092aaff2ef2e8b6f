//! Type name to PostgreSQL column type

use super::TypeError;

/// PostgreSQL column type for a type name
pub fn psql_type(type_name: &str) -> Result<&'static str, TypeError> {
    let sql = match type_name {
        "boolean" => "BOOLEAN",
        "integer" => "INT",
        "biginteger" => "BIGINT",
        "float" => "REAL",
        "number" => "DOUBLE PRECISION",
        "date" => "TIMESTAMP",
        "string" | "oid" => "TEXT",
        other => return Err(TypeError::NoSqlMapping(other.to_string())),
    };
    Ok(sql)
}
