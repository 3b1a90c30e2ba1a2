//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Bounce, Campaign, MailingList, Media, Subscriber, Template};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// The serde name of an enum value, e.g. `blocklisted`.
///
/// Values that do not serialize to a plain string render as "".
pub fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

impl PrettyPrint for Subscriber {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Subscriber #{}: {}", self.id, self.email));
        lines.push(format!("Name:           {}", self.name));
        lines.push(format!("Status:         {}", wire_name(&self.status)));

        if !self.lists.is_empty() {
            let lists: Vec<String> = self
                .lists
                .iter()
                .map(|l| match l.subscription_status {
                    Some(status) => format!("{} ({})", l.name, wire_name(&status)),
                    None => l.name.clone(),
                })
                .collect();
            lines.push(format!("Lists:          {}", lists.join(", ")));
        }

        if !self.attribs.is_empty() {
            lines.push(format!(
                "Attributes:     {}",
                serde_json::Value::Object(self.attribs.clone())
            ));
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", timestamp(created)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for MailingList {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("List #{}: {}", self.id, self.name));
        lines.push(format!(
            "Type:           {}, {} opt-in",
            wire_name(&self.list_type),
            wire_name(&self.optin)
        ));
        lines.push(format!("Subscribers:    {}", self.subscriber_count));

        if !self.tags.is_empty() {
            lines.push(format!("Tags:           {}", self.tags.join(", ")));
        }

        if !self.description.is_empty() {
            lines.push(format!("Description:    {}", self.description));
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", timestamp(created)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Campaign {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Campaign #{}: {}", self.id, self.name));
        lines.push(format!("Subject:        {}", self.subject));
        lines.push(format!("Status:         {}", self.status));

        if !self.lists.is_empty() {
            let lists: Vec<&str> = self.lists.iter().map(|l| l.name.as_str()).collect();
            lines.push(format!("Lists:          {}", lists.join(", ")));
        }

        lines.push(format!(
            "Sent:           {} of {} ({} views, {} clicks, {} bounces)",
            self.sent, self.to_send, self.views, self.clicks, self.bounces
        ));

        if let Some(ref send_at) = self.send_at {
            lines.push(format!("Send At:        {}", timestamp(send_at)));
        }

        if let Some(ref started) = self.started_at {
            lines.push(format!("Started:        {}", timestamp(started)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Template {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Template #{}: {}", self.id, self.name));
        lines.push(format!("Type:           {}", wire_name(&self.template_type)));

        if !self.subject.is_empty() {
            lines.push(format!("Subject:        {}", self.subject));
        }

        if self.is_default {
            lines.push("Default:        yes".to_string());
        }

        if let Some(ref updated) = self.updated_at {
            lines.push(format!("Updated:        {}", timestamp(updated)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Media {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Media #{}: {}", self.id, self.filename));
        lines.push(format!("Content Type:   {}", self.content_type));
        lines.push(format!("URL:            {}", self.url));
        lines.push(format!("Provider:       {}", self.provider));
        lines.join("\n")
    }
}

impl PrettyPrint for Bounce {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Bounce #{}: {}", self.id, self.email));
        lines.push(format!("Type:           {}", self.bounce_type));
        lines.push(format!("Source:         {}", self.source));

        if let Some(ref campaign) = self.campaign {
            lines.push(format!("Campaign:       {} (#{})", campaign.name, campaign.id));
        }

        lines.join("\n")
    }
}
