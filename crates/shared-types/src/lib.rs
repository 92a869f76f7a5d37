// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the name resolver
//!
//! This crate provides the chain table, network selection, domain classification and
//! resolution result types shared by the provider crates and the HTTP service. Nothing
//! in here performs I/O.

pub mod chains;
pub mod domain;
pub mod network;
pub mod resolution;

pub use chains::{ChainDescriptor, ChainRegistry, RecordKind};
pub use domain::{ClassifyError, DomainQuery, classify};
pub use network::{Network, NetworkParseError};
pub use resolution::ResolutionResult;
