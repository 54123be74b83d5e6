//! Domain layer for gdb-schema-export
//!
//! Architecture: Domain Model - Read-only schema entities extracted from a workspace export
//! - Field, domain and geometry definitions mirror the geodatabase schema vocabulary
//! - ExtractedSchema is the aggregate handed to every writer
//! - Independent of XML parsing and output formats

pub mod errors;
pub mod schema;

// Re-export main domain types for convenience
pub use errors::*;
pub use schema::*;
