//! Building blocks for inspecting Cardano transactions encoded in CBOR
//!
//! This crate doesn't provide any particular application; it bundles the
//! pieces a transaction viewer needs: position-annotated CBOR trees for
//! hex-view cross-highlighting, pasted-input normalization, a client for
//! the Koios chain indexer, and the ScriptRef envelope codec that adapts
//! indexer-reported reference scripts for downstream decoding libraries.

#![warn(missing_docs)]

#[doc(inline)]
pub use cborview_inspect as inspect;

#[doc(inline)]
pub use cborview_koios as koios;

#[doc(inline)]
pub use cborview_scriptref as scriptref;
