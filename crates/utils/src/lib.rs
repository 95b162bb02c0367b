// Copyright 2025 Irreducible Inc.

//! Shared utilities for the trellis workspace.

pub mod sorting;

/// Returns an error from the enclosing function after converting it into the
/// declared error type.
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		return Err($err.into());
	};
}

/// Returns an error from the enclosing function unless the condition holds.
#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}
