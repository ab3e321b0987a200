//! MCP tool modules.
//!
//! Tools are grouped by domain: API/corpus info, single plays, character
//! networks, spoken text, Wikidata lookups, paged browsing helpers, DTS
//! navigation, documentation, and admin writes against a local instance.

pub mod admin;
pub mod browsing;
pub mod docs;
pub mod dts;
pub mod info;
pub mod network;
pub mod plays;
pub mod text;
pub mod wikidata;
