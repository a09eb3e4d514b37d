// Adapters layer: bring books in from outside sources.

pub mod csv_catalog;
