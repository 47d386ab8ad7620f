//! Internal utilities shared by the mpin-zkp crates.
//!
//! Nothing here is part of the public protocol surface; the helpers exist so
//! that limb arithmetic and window lookups share one set of branch-free
//! primitives.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod constant_time;
