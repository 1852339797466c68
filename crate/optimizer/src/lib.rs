//! The optimizer (`§4.8`): a fixed set of deterministic passes over
//! already-lowered IR. Each pass is total — it never rejects input, only
//! leaves untouched what it doesn't recognize — so the pipeline can run even
//! over IR that carries `Unknown`-typed or `Nop` placeholders left behind by
//! an earlier stage's error recovery (`§7`).

pub mod code_size;
pub mod constant_folding;
pub mod dead_code_elimination;
pub mod loop_invariant_motion;
pub mod pass;
pub mod redundant_load_elimination;

pub use pass::{Pass, PassManager, standard_pipeline};
