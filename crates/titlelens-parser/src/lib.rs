pub mod errors;
pub mod model;
mod table;

pub use errors::ParserError;
pub use model::{TitleColumn, TitleTable};
pub use table::{load_title_table, parse_title_table};

#[cfg(test)]
mod tests;
