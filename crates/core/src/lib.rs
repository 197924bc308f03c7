//! Core library for forumhub
//!
//! This crate implements the **Functional Core** of the forumhub client,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The forumhub project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`forumhub_core`** (this crate): Pure transformation functions with zero I/O
//! - **`forumhub`**: Configuration, HTTP transport, CLI and presentation (the Imperative Shell)
//!
//! All functions in this crate are deterministic and can be tested with plain
//! fixture data. The shell owns the network; this crate only describes the
//! requests it wants sent and interprets the responses it gets back.
//!
//! # Module Organization
//!
//! - [`render`]: Markdown subset to sanitized HTML and code segments
//! - [`api`]: Request construction, validation and response normalization
//! - [`models`]: Users, forums, topics, posts, likes and messages
//! - [`submission`]: The idle / submitting state machine for mutating actions
//! - [`pagination`]: Client-side paging over fetched lists
//! - [`search`]: Topic search over fetched data
//! - [`stats`]: Aggregate statistics for the admin view
//!
//! # Example Usage
//!
//! ```rust
//! use forumhub_core::api::{create_topic_request, ErrorKind};
//!
//! // Validation happens before anything reaches the network.
//! let err = create_topic_request(1, Some(2), "", "body").unwrap_err();
//! assert_eq!(err.kind, ErrorKind::Validation);
//! assert_eq!(err.message, "Title is required");
//! ```

pub mod api;
pub mod models;
pub mod pagination;
pub mod render;
pub mod search;
pub mod stats;
pub mod submission;
