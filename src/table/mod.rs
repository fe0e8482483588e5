mod name;
mod table;

pub use name::{Scope, TableName};
pub use table::{AssembledTable, InputTables};
