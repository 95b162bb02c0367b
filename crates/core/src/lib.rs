// Copyright 2025 Irreducible Inc.

//! Core of the trellis proof-system toolkit.
//!
//! The toolkit models a trace-based interactive oracle protocol: committed
//! columns of field elements, verifier challenges, algebraic constraints over
//! rows, opening queries, and deferred verifier checks, all registered round
//! by round in a [`builder::ConstraintSystemBuilder`].
//!
//! The centerpiece is [`protocols::innerproduct`], a compiler pass that
//! collapses a batch of declared inner-product queries into a single
//! running-sum column per column size, using a random batching challenge.

pub mod builder;
pub mod constraint_system;
pub mod protocols;
pub mod symbolic;
pub mod witness;
