//! The twelve MCP tool implementations (spec §4.6), each a thin
//! `run(...)`-style function over an `Index` snapshot so it can be unit
//! tested without a live server.

pub mod shared;

pub mod enterprise;
pub mod examples;
pub mod foundation;
pub mod guide;
pub mod list_all_docs;
pub mod list_by_category;
pub mod pattern;
pub mod props;
pub mod query_component;
pub mod reindex;
pub mod search_docs;
pub mod suggest;
