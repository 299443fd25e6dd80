//! ytm-api - Fetch YouTube Music metadata from the command line
//!
//! This library backs the `ytm-api` binary: a thin client for a
//! ytmusicapi-compatible metadata endpoint plus the query operations
//! (search, artist, albums, songs, singles) the CLI dispatches to. All
//! results are loose JSON, ready to be piped into jq, yt-dlp and other
//! pipeline tools.

/// Client module for the external metadata service
pub mod clients;
/// Query operations backing the CLI subcommands
pub mod queries;
