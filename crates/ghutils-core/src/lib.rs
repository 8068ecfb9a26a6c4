//! # ghutils-core
//!
//! Local, offline pieces of ghutils: the configuration file, the git
//! identity used when committing as a bot, and markdown footers for
//! GitHub App comments.

pub mod config;
pub mod error;
pub mod footer;
pub mod identity;

pub use config::{Config, GitHubConfig};
pub use error::{Error, Result};
pub use footer::{FooterKind, make_footer_links};
pub use identity::CommitIdentity;
