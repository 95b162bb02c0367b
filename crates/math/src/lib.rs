// Copyright 2025 Irreducible Inc.

//! Symbolic arithmetic primitives used across the trellis workspace.
//!
//! This crate provides:
//!
//! * Arithmetic expression trees over a generic field ([`ArithExpr`])
//! * Flattened evaluation plans for repeated fast execution ([`ExpressionBoard`])
//! * Univariate polynomial evaluation in ascending-power order
//!   ([`evaluate_univariate`])
//!
//! Field arithmetic itself is provided by the `ff` crate; nothing here
//! depends on a concrete field.

mod arith_expr;
mod error;
mod expr_board;
mod univariate;

pub use arith_expr::*;
pub use error::*;
pub use expr_board::*;
pub use univariate::*;
