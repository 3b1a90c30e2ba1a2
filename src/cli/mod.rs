//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the listmonk binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::ImportMode;

/// listmonk API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "listmonk", about = "listmonk API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// Numeric ID of the entity.
        id: u64,
    },

    /// List entities with optional search and pagination.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Page number (1-indexed). Subscribers, lists, campaigns and bounces only.
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page. Same entities as `--page`.
        #[arg(long)]
        per_page: Option<u32>,

        /// Search expression (subscribers: SQL, lists and campaigns: text).
        /// Rejected for bounces, templates and media.
        #[arg(long)]
        query: Option<String>,
    },

    /// Delete an entity by ID.
    Delete {
        /// The type of entity to delete.
        entity: Entity,

        /// Numeric ID of the entity.
        id: u64,
    },

    /// Print the rendered HTML of a campaign or template.
    Preview {
        /// What to preview.
        kind: PreviewKind,

        /// Numeric ID of the campaign or template.
        id: u64,
    },

    /// Upload a file to the media library.
    UploadMedia {
        /// File to upload.
        path: PathBuf,
    },

    /// Import subscribers from a CSV or ZIP file.
    Import {
        /// File to import.
        path: PathBuf,

        /// Subscribe or blocklist the imported addresses.
        #[arg(long, value_enum, default_value = "subscribe")]
        mode: CliImportMode,

        /// CSV delimiter.
        #[arg(long, default_value = ",")]
        delim: String,

        /// List ID to subscribe to; repeat for several lists.
        #[arg(long = "list")]
        lists: Vec<u64>,

        /// Overwrite existing subscribers.
        #[arg(long)]
        overwrite: bool,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A subscriber.
    #[value(alias = "subscribers")]
    Subscriber,
    /// A mailing list.
    #[value(alias = "lists")]
    List,
    /// A campaign.
    #[value(alias = "campaigns")]
    Campaign,
    /// A campaign or transactional template.
    #[value(alias = "templates")]
    Template,
    /// A media library file.
    Media,
    /// A bounce record.
    #[value(alias = "bounces")]
    Bounce,
}

impl Entity {
    /// Whether listing accepts a `--query` search expression.
    pub fn supports_query(self) -> bool {
        matches!(self, Entity::Subscriber | Entity::List | Entity::Campaign)
    }

    /// Whether listing returns pages rather than everything at once.
    pub fn is_paginated(self) -> bool {
        !matches!(self, Entity::Template | Entity::Media)
    }

    pub fn plural(self) -> &'static str {
        match self {
            Entity::Subscriber => "subscribers",
            Entity::List => "lists",
            Entity::Campaign => "campaigns",
            Entity::Template => "templates",
            Entity::Media => "media",
            Entity::Bounce => "bounces",
        }
    }
}

/// Entities with an HTML preview.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewKind {
    Campaign,
    Template,
}

/// Import mode as a CLI value.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliImportMode {
    Subscribe,
    Blocklist,
}

impl From<CliImportMode> for ImportMode {
    fn from(mode: CliImportMode) -> Self {
        match mode {
            CliImportMode::Subscribe => ImportMode::Subscribe,
            CliImportMode::Blocklist => ImportMode::Blocklist,
        }
    }
}
