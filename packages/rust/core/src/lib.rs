//! Core build operations for docsplice.
//!
//! This crate ties together sample extraction, Markdown splicing, and the
//! external-tool steps into the three commands the CLI exposes:
//! [`pipeline::build_samples`], [`pipeline::build_papers`] and
//! [`pipeline::build_api`].

pub mod api;
pub mod assembler;
mod fsutil;
pub mod papers;
pub mod pipeline;
pub mod process;
