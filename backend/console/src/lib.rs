//! # Admin Console
//!
//! Terminal counterpart of the admin pages. Sessions come from the admin
//! service, everything else goes straight to the catalog API with the stored
//! bearer token.
//!
//! ```sh
//! corpora-console login --email admin@budaya.com --password admin123
//! corpora-console list lexicon --search batik
//! corpora-console links subculture-assets
//! corpora-console search
//! ```
pub mod cli;
pub mod commands;
pub mod progress;
pub mod render;
pub mod session;
pub mod token_store;
