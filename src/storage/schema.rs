//! Database schema definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query building.

use sea_query::Iden;

/// Users table schema.
#[derive(Iden)]
pub enum Users {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "name"]
    Name,
    #[iden = "gender"]
    Gender,
}

/// Column holding the store-generated identifier.
pub const ID_COLUMN: &str = "id";

/// SQL for creating the users table on SQLite.
pub const CREATE_USERS_TABLE_SQLITE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) > 0),
    gender TEXT NOT NULL DEFAULT ''
);
"#;

/// SQL for creating the users table on PostgreSQL.
pub const CREATE_USERS_TABLE_POSTGRES: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL CHECK (name <> ''),
    gender TEXT NOT NULL DEFAULT ''
);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iden_names() {
        assert_eq!(Users::Table.to_string(), "users");
        assert_eq!(Users::Id.to_string(), ID_COLUMN);
        assert_eq!(Users::Name.to_string(), "name");
        assert_eq!(Users::Gender.to_string(), "gender");
    }
}
