//! Basic example demonstrating the listmonk API client.
//!
//! Run with:
//! ```
//! LISTMONK_URL=http://localhost:9000 LISTMONK_API_USER=api LISTMONK_API_TOKEN=secret \
//!     cargo run --example basic
//! ```

use listmonk_api::{
    get_templates, Campaign, CampaignListQuery, Get, List, ListmonkClient, MailingList,
    MailingListQuery, PerPage, Subscriber, SubscriberListQuery,
};

#[tokio::main]
async fn main() -> listmonk_api::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating listmonk client...");
    let client = ListmonkClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List first page of mailing lists
    println!("\n--- Listing Lists (first page) ---");
    let lists = MailingList::list(
        &client,
        &MailingListQuery {
            per_page: Some(PerPage::Count(10)),
            ..Default::default()
        },
    )
    .await?;
    println!("Found {} lists (total: {})", lists.len(), lists.total);

    for list in &lists {
        println!("  - {} (#{}, {} subscribers)", list.name, list.id, list.subscriber_count);
    }

    // Subscribers of the first list
    if let Some(first_list) = lists.results.first() {
        println!("\n--- Subscribers of '{}' ---", first_list.name);
        let subscribers = Subscriber::list(
            &client,
            &SubscriberListQuery {
                list_ids: vec![first_list.id],
                per_page: Some(PerPage::Count(5)),
                ..Default::default()
            },
        )
        .await?;
        println!("Showing {} of {}", subscribers.len(), subscribers.total);

        for subscriber in &subscribers {
            println!("  - {} <{}>", subscriber.name, subscriber.email);
        }

        // Full record of the first subscriber
        if let Some(first) = subscribers.results.first() {
            println!("\n--- Subscriber Details ---");
            let subscriber = Subscriber::get(&client, first.id).await?;
            println!("  Email: {}", subscriber.email);
            println!("  Status: {:?}", subscriber.status);
            println!("  Lists: {:?}", subscriber.list_ids());

            let bounces = subscriber.bounces(&client).await?;
            println!("  Bounces: {}", bounces.len());
        }
    }

    // Recent campaigns, without bodies
    println!("\n--- Recent Campaigns ---");
    let campaigns = Campaign::list(
        &client,
        &CampaignListQuery {
            per_page: Some(PerPage::Count(5)),
            no_body: true,
            ..Default::default()
        },
    )
    .await?;

    for campaign in &campaigns {
        println!(
            "  - {} [{}] sent {}/{}",
            campaign.name, campaign.status, campaign.sent, campaign.to_send
        );
    }

    // Templates are not paginated
    println!("\n--- Templates ---");
    for template in get_templates(&client).await? {
        let default = if template.is_default { " (default)" } else { "" };
        println!("  - {}{}", template.name, default);
    }

    println!("\nDone!");
    Ok(())
}
