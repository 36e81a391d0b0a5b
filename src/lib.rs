//! # Confluence
//!
//! A batch pipeline that gathers IPTV channel lists from local files and
//! remote subscriptions, normalizes and deduplicates them, and turns them
//! into a personal channel list.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Parser → Normalizer → Merge → Store
//! ```
//!
//! - [`fetcher`]: HTTP client and sequential subscription harvesting
//! - [`parser`]: Decoding fallback and M3U / plain-text parsing
//! - [`normalizer`]: Channel name and address cleanup
//! - [`merge`]: Priority-ordered, first-seen-wins deduplication
//! - [`store`]: Text file input and chunked, fallback-safe output
//!
//! ## Quick Start
//!
//! ```bash
//! # Run every stage
//! confluence
//!
//! # Only fetch and merge
//! confluence combine
//!
//! # Use a specific configuration
//! confluence --config ./confluence.toml run
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// config, fetcher, normalizer, writer.
pub mod app;

/// Command-line interface using clap.
///
/// With no subcommand every stage runs in order; `capture`, `combine`,
/// `clean`, `split`, `pick` and `result` run a single stage.
pub mod cli;

/// Configuration loading.
///
/// Loads `~/.config/confluence/config.toml` (or `--config`), supporting:
/// - Input and output paths for every stage
/// - Fetch timeout
/// - Output chunk size and encodings
/// - Cosmetic name tokens
pub mod config;

/// Core domain models.
///
/// - [`Entry`](domain::Entry): A channel name with its playback address
/// - [`Origin`](domain::Origin): Which list an entry came from
/// - [`SourceList`](domain::SourceList): Entries from a single origin
pub mod domain;

/// Subscription fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for body fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

pub mod merge;

/// Name and address normalization.
pub mod normalizer;

/// Channel list parsing.
///
/// Handles extended M3U playlists, `name,address` text lists and
/// playlists that mix the two.
pub mod parser;

pub mod stages;

/// Text file persistence.
///
/// - [`ChunkedWriter`](store::ChunkedWriter): Bounded-memory writer with a
///   lossy fallback dump
pub mod store;
