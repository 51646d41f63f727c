//! # Pagestore Architecture
//!
//! Pagestore is an **in-memory page store** with interchangeable front-ends. The store
//! is the only piece with real design content; the front-ends are thin adapters that
//! translate framed requests into store calls.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Binary (main.rs, args.rs, serve.rs)                        │
//! │  - Reads newline-delimited JSON requests, writes replies    │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Surfaces (rest.rs, ops.rs)                                 │
//! │  - REST-style routes, or GraphQL-style named operations     │
//! │  - Strict body decoding, status codes, error replies        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Validates due-date triples for every surface alike       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, returns `CmdResult`            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - `DataStore` trait, `InMemoryStore` (one mutex)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! `InMemoryStore` keeps the page map and the id counter behind a single mutex. Every
//! operation is one critical section, so callers on different threads see the
//! operations in a single total order and never a half-applied one.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and the in-memory table
//! - [`model`]: Core data types (`Page`, `NewPage`, `Attachment`, `DueDate`)
//! - [`rest`]: REST-style surface
//! - [`ops`]: Named-operation surface
//! - [`serve`]: Line-delimited request loop used by the binary
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod ops;
pub mod rest;
pub mod serve;
pub mod store;
