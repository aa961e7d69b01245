//! Upload ingestion: CSV parsing and validation.

mod csv;
mod validate;

pub use csv::{read_sales_csv, read_series_csv};
pub use validate::{product_series, products, validate};
