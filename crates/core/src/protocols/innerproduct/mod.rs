// Copyright 2025 Irreducible Inc.

//! The inner-product collapsing compiler pass.
//!
//! An inner-product query claims that two committed columns $a$ and $b$ of
//! equal size satisfy $\sum_i a_i b_i = v$ for a prover-alleged scalar $v$;
//! a query may pair one $a$ against several $b$'s. This pass rewrites all
//! declared queries of one column size into a single running-sum column plus
//! low-level constraints the rest of the system can check directly.
//!
//! For pairs $(a_k, b_k)$, $k = 0..n$, flattened in declaration order, the
//! pass samples a batching challenge $r$ and forms the per-row collapsed
//! contribution
//!
//! $$\text{Collapsed}_i = \sum_k a_{k,i} \cdot b_{k,i} \cdot r^k$$
//!
//! A committed column Summation accumulates Collapsed as a prefix sum, pinned
//! by a recurrence constraint on rows $i > 0$ and a boundary constraint at
//! row 0. The last entry of Summation is opened, and a deferred verifier
//! check recomputes $\sum_k v_k r^k$ from the alleged values and compares it
//! to the opened value. By the Schwartz-Zippel batching argument, equality
//! holds with overwhelming probability over $r$ iff every per-pair claim is
//! true. When exactly one pair is declared no challenge is sampled; the
//! linear combination degenerates to the single product.
//!
//! Term order is load-bearing: the compile-time polynomial construction and
//! the verify-time recomputation both consume the pair list in declaration
//! order (query order, then B order within a query). The verifier check
//! captures the exact ordered query list used at compile time, so the two
//! sides cannot drift apart.

mod compile;
mod error;
#[allow(clippy::module_inception)]
mod innerproduct;
mod prove;
mod verify;

pub use compile::*;
pub use error::*;
pub use innerproduct::*;
pub use prove::*;
pub use verify::*;
