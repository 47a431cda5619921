//! Engine-level flow tests.

mod engine_flow;
