pub mod cursor;
pub mod limits;
pub mod page;
pub mod sqlite;
pub mod types;
