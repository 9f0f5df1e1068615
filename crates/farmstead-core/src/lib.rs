//! Account ingestion, snapshot assembly, and polling for the Farmstead client.
//!
//! This crate sits between the wallet client and the pure computation in
//! `farmstead-world`. It turns account JSON into typed tiles, evaluates them
//! into a per-frame snapshot, and keeps that snapshot fresh on a timer.
//!
//! # Modules
//!
//! - [`clock`] -- [`Clock`] trait with wall-clock and fixed implementations.
//! - [`config`] -- Configuration loading from `farmstead.yaml` into
//!   strongly-typed structs.
//! - [`ingest`] -- Account JSON decoding and the [`AccountSource`] trait.
//! - [`poller`] -- The interval-driven poll loop publishing snapshots.
//! - [`snapshot`] -- [`FarmSnapshot`] and per-plot reports.
//!
//! [`Clock`]: clock::Clock
//! [`AccountSource`]: ingest::AccountSource
//! [`FarmSnapshot`]: snapshot::FarmSnapshot

pub mod clock;
pub mod config;
pub mod ingest;
pub mod poller;
pub mod snapshot;
