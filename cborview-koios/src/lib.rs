//! Query the Koios chain indexer for transaction context
//!
//! The hex/tree views only need the transaction bytes, but resolving inputs,
//! inline datums and reference scripts requires on-chain state. Koios exposes
//! that state over HTTP per network; this crate wraps the handful of
//! endpoints the viewer consumes and adapts indexer-reported reference
//! scripts into the ScriptRef envelope via `cborview-scriptref`.

pub mod client;
pub mod models;
pub mod network;

pub use client::KoiosClient;
pub use network::NetworkType;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("error reaching indexer: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("indexer returned no rows for {0}")]
    EmptyResponse(&'static str),

    #[error("error adapting reference script: {0}")]
    ScriptRef(#[from] cborview_scriptref::Error),
}
