//! listmonk API CLI binary.
//!
//! A command-line interface for interacting with the listmonk API.

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use listmonk_api::cli::{Cli, Command, Entity, PreviewKind};
use listmonk_api::output::{wire_name, PrettyPrint};
use listmonk_api::{
    get_campaign_preview, get_media_list, get_template_preview, get_templates,
    import_subscribers_file, upload_media_file, Bounce, BounceListQuery, Campaign,
    CampaignListQuery, Delete, Get, ImportConfig, List, ListmonkClient, MailingList,
    MailingListQuery, Media, Page, PerPage, Subscriber, SubscriberListQuery, Template,
};
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

type CliResult<T = ()> = std::result::Result<T, Box<dyn Error>>;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match ListmonkClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set LISTMONK_URL, LISTMONK_API_USER and LISTMONK_API_TOKEN");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &ListmonkClient, cli: Cli) -> CliResult {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, id, cli.json).await,
        Command::List {
            entity,
            page,
            per_page,
            query,
        } => handle_list(client, entity, page, per_page, query, cli.json).await,
        Command::Delete { entity, id } => handle_delete(client, entity, id).await,
        Command::Preview { kind, id } => {
            let html = match kind {
                PreviewKind::Campaign => get_campaign_preview(client, id).await?,
                PreviewKind::Template => get_template_preview(client, id).await?,
            };
            println!("{html}");
            Ok(())
        }
        Command::UploadMedia { path } => {
            let media = upload_media_file(client, &path).await?;
            output_single(&media, cli.json)
        }
        Command::Import {
            path,
            mode,
            delim,
            lists,
            overwrite,
        } => {
            let config = ImportConfig {
                mode: mode.into(),
                delimiter: delim,
                lists,
                overwrite,
            };
            let accepted = import_subscribers_file(client, &config, &path).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&accepted)?);
            } else {
                println!("Import of {} started", path.display());
            }
            Ok(())
        }
    }
}

async fn handle_get(client: &ListmonkClient, entity: Entity, id: u64, json: bool) -> CliResult {
    match entity {
        Entity::Subscriber => output_single(&Subscriber::get(client, id).await?, json),
        Entity::List => output_single(&MailingList::get(client, id).await?, json),
        Entity::Campaign => output_single(&Campaign::get(client, id).await?, json),
        Entity::Template => output_single(&Template::get(client, id).await?, json),
        Entity::Media => output_single(&Media::get(client, id).await?, json),
        Entity::Bounce => {
            eprintln!("Hint: Use 'listmonk list bounces' to see bounce records");
            Err("bounces can only be listed, not retrieved individually".into())
        }
    }
}

async fn handle_list(
    client: &ListmonkClient,
    entity: Entity,
    page: Option<u32>,
    per_page: Option<u32>,
    query: Option<String>,
    json: bool,
) -> CliResult {
    if query.is_some() && !entity.supports_query() {
        return Err(format!("--query is not supported when listing {}", entity.plural()).into());
    }
    if (page.is_some() || per_page.is_some()) && !entity.is_paginated() {
        return Err(format!("{} are not paginated; drop --page/--per-page", entity.plural()).into());
    }

    let per_page = per_page.map(PerPage::from);

    match entity {
        Entity::Subscriber => {
            let q = SubscriberListQuery {
                query,
                page,
                per_page,
                ..Default::default()
            };
            let subscribers = Subscriber::list(client, &q).await?;
            output_page(&subscribers, json, |s| SubscriberRow::from(s))
        }
        Entity::List => {
            let q = MailingListQuery {
                query,
                page,
                per_page,
                ..Default::default()
            };
            let lists = MailingList::list(client, &q).await?;
            output_page(&lists, json, |l| ListRow::from(l))
        }
        Entity::Campaign => {
            let q = CampaignListQuery {
                query,
                page,
                per_page,
                no_body: true,
                ..Default::default()
            };
            let campaigns = Campaign::list(client, &q).await?;
            output_page(&campaigns, json, |c| CampaignRow::from(c))
        }
        Entity::Bounce => {
            let q = BounceListQuery {
                page,
                per_page,
                ..Default::default()
            };
            let bounces = Bounce::list(client, &q).await?;
            output_page(&bounces, json, |b| BounceRow::from(b))
        }
        Entity::Template => {
            let templates = get_templates(client).await?;
            output_all(&templates, json, |t| TemplateRow::from(t))
        }
        Entity::Media => {
            let media = get_media_list(client).await?;
            output_all(&media, json, |m| MediaRow::from(m))
        }
    }
}

async fn handle_delete(client: &ListmonkClient, entity: Entity, id: u64) -> CliResult {
    let deleted = match entity {
        Entity::Subscriber => Subscriber::delete(client, id).await?,
        Entity::List => MailingList::delete(client, id).await?,
        Entity::Campaign => Campaign::delete(client, id).await?,
        Entity::Template => Template::delete(client, id).await?,
        Entity::Media => Media::delete(client, id).await?,
        Entity::Bounce => Bounce::delete(client, id).await?,
    };
    if deleted {
        println!("Deleted {entity:?} {id}");
    } else {
        println!("{entity:?} {id} was not deleted");
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> CliResult {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> CliResult
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.results)?);
    } else {
        let rows: Vec<R> = page.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!(
            "\nPage {}/{} ({} total items)",
            page.page.max(1),
            page.total_pages(),
            page.total
        );
    }
    Ok(())
}

fn output_all<T, R, F>(items: &[T], json: bool, to_row: F) -> CliResult
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct SubscriberRow {
    id: u64,
    email: String,
    name: String,
    status: String,
    lists: usize,
}

impl From<&Subscriber> for SubscriberRow {
    fn from(s: &Subscriber) -> Self {
        Self {
            id: s.id,
            email: s.email.clone(),
            name: s.name.clone(),
            status: wire_name(&s.status),
            lists: s.lists.len(),
        }
    }
}

#[derive(Tabled)]
struct ListRow {
    id: u64,
    name: String,
    #[tabled(rename = "type")]
    list_type: String,
    subscribers: u64,
}

impl From<&MailingList> for ListRow {
    fn from(l: &MailingList) -> Self {
        Self {
            id: l.id,
            name: l.name.clone(),
            list_type: wire_name(&l.list_type),
            subscribers: l.subscriber_count,
        }
    }
}

#[derive(Tabled)]
struct CampaignRow {
    id: u64,
    name: String,
    status: String,
    sent: String,
}

impl From<&Campaign> for CampaignRow {
    fn from(c: &Campaign) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            status: c.status.to_string(),
            sent: format!("{}/{}", c.sent, c.to_send),
        }
    }
}

#[derive(Tabled)]
struct TemplateRow {
    id: u64,
    name: String,
    #[tabled(rename = "type")]
    template_type: String,
    default: String,
}

impl From<&Template> for TemplateRow {
    fn from(t: &Template) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            template_type: wire_name(&t.template_type),
            default: if t.is_default { "yes" } else { "" }.to_string(),
        }
    }
}

#[derive(Tabled)]
struct MediaRow {
    id: u64,
    filename: String,
    content_type: String,
    url: String,
}

impl From<&Media> for MediaRow {
    fn from(m: &Media) -> Self {
        Self {
            id: m.id,
            filename: m.filename.clone(),
            content_type: m.content_type.clone(),
            url: m.url.clone(),
        }
    }
}

#[derive(Tabled)]
struct BounceRow {
    id: u64,
    email: String,
    #[tabled(rename = "type")]
    bounce_type: String,
    campaign: String,
}

impl From<&Bounce> for BounceRow {
    fn from(b: &Bounce) -> Self {
        Self {
            id: b.id,
            email: b.email.clone(),
            bounce_type: b.bounce_type.clone(),
            campaign: b
                .campaign
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        }
    }
}
