pub mod table;

pub use table::{TableClient, TableSource};
