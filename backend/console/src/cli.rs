use std::path::PathBuf;

use catalog::search::SearchKind;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Admin service issuing and verifying sessions.
    #[arg(long, global = true, env = "CONSOLE_URL", default_value = "http://localhost:3000")]
    pub server_url: String,

    /// Catalog API base, defaults to `CATALOG_API_URL`.
    #[arg(long, global = true)]
    pub catalog_url: Option<String>,

    #[arg(long, global = true, env = "CONSOLE_TOKEN_FILE", default_value = ".corpora-admin-token")]
    pub token_file: PathBuf,

    /// Seconds before an HTTP call gives up.
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Login {
        #[arg(long, env = "ADMIN_EMAIL")]
        email: String,

        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    Logout,

    Whoami,

    List {
        entity: Entity,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = catalog::pagination::DEFAULT_LIMIT)]
        limit: u32,

        /// Filters the fetched page.
        #[arg(long, default_value = "")]
        search: String,
    },

    Show {
        entity: Entity,
        id: u64,
    },

    /// Creates a record from a JSON document.
    Create {
        entity: Entity,

        #[command(flatten)]
        body: Body,
    },

    /// Applies a partial JSON document.
    Update {
        entity: Entity,
        id: u64,

        #[command(flatten)]
        body: Body,
    },

    Delete {
        entity: Entity,
        id: u64,
    },

    /// Aggregates a link kind across every parent.
    Links {
        kind: LinkKind,

        #[arg(long, default_value = "")]
        search: String,
    },

    Unlink {
        kind: LinkKind,
        parent_id: u64,
        child_id: u64,
    },

    /// One-shot search, or interactive when no query is given.
    Search {
        query: Option<String>,

        #[arg(long = "type", value_enum)]
        kind: Option<KindArg>,
    },
}

#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
pub struct Body {
    #[arg(long)]
    pub json: Option<String>,

    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    #[value(alias = "leksikon")]
    Lexicon,
    Subculture,
    #[value(alias = "cultures")]
    Culture,
    #[value(alias = "contributors")]
    Contributor,
    #[value(alias = "references", alias = "referensi")]
    Reference,
    #[value(alias = "assets")]
    Asset,
    #[value(alias = "domain")]
    Codification,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    LexiconAssets,
    LexiconReferences,
    SubcultureAssets,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Lexicon,
    Reference,
    Asset,
    Contributor,
    Codification,
}

impl From<KindArg> for SearchKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Lexicon => SearchKind::Lexicon,
            KindArg::Reference => SearchKind::Reference,
            KindArg::Asset => SearchKind::Asset,
            KindArg::Contributor => SearchKind::Contributor,
            KindArg::Codification => SearchKind::Codification,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::parse_from(["corpora-console", "list", "references", "--page", "3"]);

        match cli.command {
            Command::List { entity, page, limit, .. } => {
                assert_eq!(entity, Entity::Reference);
                assert_eq!(page, 3);
                assert_eq!(limit, 10);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_body_requires_one_source() {
        assert!(Cli::try_parse_from(["corpora-console", "create", "asset"]).is_err());
        let inline = ["corpora-console", "create", "asset", "--json", "{}"];
        assert!(Cli::try_parse_from(inline).is_ok());
    }

    #[test]
    fn test_search_type_flag() {
        let cli = Cli::parse_from(["corpora-console", "search", "batik", "--type", "asset"]);

        match cli.command {
            Command::Search { query, kind } => {
                assert_eq!(query.as_deref(), Some("batik"));
                assert_eq!(kind.map(SearchKind::from), Some(SearchKind::Asset));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
