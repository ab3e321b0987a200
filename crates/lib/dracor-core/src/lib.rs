//! Core client and data reshaping for dracor-mcp.
//!
//! This crate owns the HTTP client for the DraCor API, the CSV-to-JSON
//! reshaping used by the network and Wikidata endpoints, pagination of large
//! result lists, and the ODD/RelaxNG document tools.

pub mod admin;
pub mod client;
pub mod links;
pub mod odd;
pub mod paginate;
pub mod schema;
pub mod tabular;
