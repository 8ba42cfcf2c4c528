//! CLI for linkhead: manage stored link rules and preview head rewrites.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use linkhead_core::config::{self, LinkheadConfig};
use linkhead_core::rules::{DynamicContextKind, EntityId};
use linkhead_core::RequestContext;
use std::path::PathBuf;

use commands::{
    run_normalize, run_og_locale, run_resolve, run_rewrite, run_set_alternates, run_set_dynamic,
    run_set_entity, run_set_origin, run_show, EntityUpdate,
};

/// Top-level CLI for linkhead.
#[derive(Debug, Parser)]
#[command(name = "linkhead")]
#[command(about = "linkhead: canonical and hreflang link rules for rendered pages", long_about = None)]
pub struct Cli {
    /// Rule snapshot file; overrides `rules_path` from config.
    #[arg(long, global = true, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// The request a preview command simulates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct RequestArgs {
    /// Raw request URI, query allowed (e.g. `/blog/post-1/?utm=x`).
    #[arg(long, value_name = "URI")]
    pub request_uri: Option<String>,
    /// Path resolved by the host router; wins over --request-uri.
    #[arg(long, value_name = "PATH")]
    pub path: Option<String>,
    /// Entity (post/page) being rendered.
    #[arg(long, value_name = "ID")]
    pub entity: Option<EntityId>,
    /// Dynamic context: search, author, date or 404.
    #[arg(long, value_name = "KIND", value_parser = parse_dynamic_kind)]
    pub dynamic: Option<DynamicContextKind>,
    /// Site home URL; defaults to `home_url` from config.
    #[arg(long, value_name = "URL")]
    pub home: Option<String>,
}

impl RequestArgs {
    pub fn to_context(&self, cfg: &LinkheadConfig) -> RequestContext {
        let home = self.home.clone().unwrap_or_else(|| cfg.home_url.clone());
        let mut ctx = RequestContext::new(home);
        if let Some(uri) = &self.request_uri {
            ctx = ctx.with_request_uri(uri.clone());
        }
        if let Some(path) = &self.path {
            ctx = ctx.with_routed_path(path.clone());
        }
        if let Some(id) = self.entity {
            ctx = ctx.with_entity(id);
        }
        if let Some(kind) = self.dynamic {
            ctx = ctx.with_dynamic(kind);
        }
        ctx
    }
}

fn parse_dynamic_kind(s: &str) -> Result<DynamicContextKind, String> {
    DynamicContextKind::from_key(s.trim())
        .ok_or_else(|| format!("unknown context {s:?} (expected search, author, date or 404)"))
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Normalize a base URL or bare domain the way stored rules are.
    Normalize {
        /// URL or domain, e.g. `Example.com/blog`.
        url: String,
    },

    /// Rewrite captured head markup for a simulated request and print it.
    Rewrite {
        /// File holding the head markup ("-" reads stdin).
        input: PathBuf,

        #[command(flatten)]
        request: RequestArgs,
    },

    /// Show which rules apply to a simulated request.
    Resolve {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Set the global canonical origin ("" clears it). Page paths are
    /// always kept under it.
    SetOrigin {
        /// Base URL or domain.
        url: String,
    },

    /// Replace the global alternate links with the JSON list in a file.
    SetAlternates {
        /// JSON file: `[{"hreflang": "en", "hrefBaseUrl": "...", ...}]`.
        path: PathBuf,
    },

    /// Register an entity and update its overrides.
    SetEntity {
        /// Entity identifier.
        id: EntityId,

        /// Content type of the entity (`attachment` never gets overrides).
        #[arg(long, default_value = "post")]
        post_type: String,

        /// Entity is not publicly queryable.
        #[arg(long)]
        private: bool,

        /// Canonical base URL for this entity ("" clears it).
        #[arg(long, value_name = "URL")]
        canonical: Option<String>,

        /// Use the canonical URL verbatim instead of appending the page path.
        #[arg(long, requires = "canonical")]
        no_preserve_path: bool,

        /// JSON file with the entity's alternate links.
        #[arg(long, value_name = "FILE")]
        alternates: Option<PathBuf>,

        /// Drop the entity and all its overrides.
        #[arg(long, conflicts_with_all = ["canonical", "alternates", "private"])]
        remove: bool,
    },

    /// Set or clear the canonical override of a dynamic context.
    SetDynamic {
        /// search, author, date or 404.
        #[arg(value_parser = parse_dynamic_kind)]
        kind: DynamicContextKind,

        /// Base URL; omit to clear the override.
        url: Option<String>,

        /// Use the URL verbatim instead of appending the page path.
        #[arg(long)]
        no_preserve_path: bool,
    },

    /// Print the stored rules.
    Show,

    /// Normalize a locale for `og:locale` (e.g. `en-us` → `en_US`).
    OgLocale {
        /// Locale as reported by the language layer.
        locale: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let rules_path = match cli.rules {
            Some(path) => path,
            None => cfg.rules_path()?,
        };

        match cli.command {
            CliCommand::Normalize { url } => run_normalize(&url)?,
            CliCommand::Rewrite { input, request } => {
                run_rewrite(&cfg, &rules_path, &input, &request.to_context(&cfg))?
            }
            CliCommand::Resolve { request } => {
                run_resolve(&cfg, &rules_path, &request.to_context(&cfg))?
            }
            CliCommand::SetOrigin { url } => run_set_origin(&rules_path, &url)?,
            CliCommand::SetAlternates { path } => run_set_alternates(&rules_path, &path)?,
            CliCommand::SetEntity {
                id,
                post_type,
                private,
                canonical,
                no_preserve_path,
                alternates,
                remove,
            } => {
                let update = EntityUpdate {
                    post_type,
                    publicly_queryable: !private,
                    canonical,
                    preserve_default_path: !no_preserve_path,
                    alternates,
                    remove,
                };
                run_set_entity(&rules_path, id, &update)?
            }
            CliCommand::SetDynamic {
                kind,
                url,
                no_preserve_path,
            } => run_set_dynamic(&rules_path, kind, url.as_deref(), !no_preserve_path)?,
            CliCommand::Show => run_show(&rules_path)?,
            CliCommand::OgLocale { locale } => run_og_locale(&locale),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
