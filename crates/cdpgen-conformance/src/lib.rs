//! Protocol client generated at build time from `protocol/conformance.json`.
//!
//! Nothing in `cdp` is written by hand. The build script runs the generator
//! and the output is compiled here, so emitted code that does not build, or
//! that leaves dead code behind, fails this crate.

include!(concat!(env!("OUT_DIR"), "/cdp.rs"));
