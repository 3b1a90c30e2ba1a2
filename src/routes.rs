//! The listmonk endpoint table.
//!
//! One constant per operation. The response shape is part of each
//! constant's type; a handful of endpoints answer without the `data`
//! envelope and are declared as [`Bare`], the preview endpoints as [`Text`].

use reqwest::Method;
use serde_json::{Map, Value};

use crate::endpoint::{Endpoint, RequestMode};
use crate::envelope::{Bare, Data, Text};
use crate::models::{
    ArchiveParams, Bounce, Campaign, ImportConfig, ImportStatus, MailingList, Media, PublicList,
    Subscriber, SubscriberExport, Template,
};
use crate::pagination::Page;

use RequestMode::{Empty, Json, Multipart, Query};

const GET: Method = Method::GET;
const POST: Method = Method::POST;
const PUT: Method = Method::PUT;
const DELETE: Method = Method::DELETE;

// Subscribers

pub const GET_SUBSCRIBERS: Endpoint<Data<Page<Subscriber>>> =
    Endpoint::new(GET, "/api/subscribers", Query);
pub const GET_SUBSCRIBER: Endpoint<Data<Subscriber>> =
    Endpoint::new(GET, "/api/subscribers/{id}", Empty);
pub const EXPORT_SUBSCRIBER: Endpoint<Bare<SubscriberExport>> =
    Endpoint::new(GET, "/api/subscribers/{id}/export", Empty);
pub const GET_SUBSCRIBER_BOUNCES: Endpoint<Data<Vec<Bounce>>> =
    Endpoint::new(GET, "/api/subscribers/{id}/bounces", Empty);
pub const CREATE_SUBSCRIBER: Endpoint<Data<Subscriber>> =
    Endpoint::new(POST, "/api/subscribers", Json);
pub const SEND_OPTIN_CONFIRMATION: Endpoint<Data<bool>> =
    Endpoint::new(POST, "/api/subscribers/{id}/optin", Empty);
pub const CREATE_PUBLIC_SUBSCRIPTION: Endpoint<Data<Value>> =
    Endpoint::new(POST, "/api/public/subscription", Json);
pub const UPDATE_LIST_MEMBERSHIPS: Endpoint<Data<bool>> =
    Endpoint::new(PUT, "/api/subscribers/lists", Json);
pub const UPDATE_SUBSCRIBER: Endpoint<Data<Subscriber>> =
    Endpoint::new(PUT, "/api/subscribers/{id}", Json);
pub const BLOCKLIST_SUBSCRIBER: Endpoint<Data<bool>> =
    Endpoint::new(PUT, "/api/subscribers/{id}/blocklist", Empty);
pub const BLOCKLIST_SUBSCRIBERS: Endpoint<Data<bool>> =
    Endpoint::new(PUT, "/api/subscribers/blocklist", Json);
pub const BLOCKLIST_SUBSCRIBERS_BY_QUERY: Endpoint<Data<bool>> =
    Endpoint::new(PUT, "/api/subscribers/query/blocklist", Json);
pub const DELETE_SUBSCRIBER: Endpoint<Data<bool>> =
    Endpoint::new(DELETE, "/api/subscribers/{id}", Empty);
pub const DELETE_SUBSCRIBER_BOUNCES: Endpoint<Data<bool>> =
    Endpoint::new(DELETE, "/api/subscribers/{id}/bounces", Empty);
pub const DELETE_SUBSCRIBERS: Endpoint<Data<bool>> =
    Endpoint::new(DELETE, "/api/subscribers", Query);
pub const DELETE_SUBSCRIBERS_BY_QUERY: Endpoint<Data<bool>> =
    Endpoint::new(POST, "/api/subscribers/query/delete", Json);

// Lists

pub const GET_LISTS: Endpoint<Data<Page<MailingList>>> = Endpoint::new(GET, "/api/lists", Query);
pub const GET_PUBLIC_LISTS: Endpoint<Bare<Vec<PublicList>>> =
    Endpoint::new(GET, "/api/public/lists", Empty);
pub const GET_LIST: Endpoint<Data<MailingList>> = Endpoint::new(GET, "/api/lists/{id}", Empty);
pub const CREATE_LIST: Endpoint<Data<MailingList>> = Endpoint::new(POST, "/api/lists", Json);
pub const UPDATE_LIST: Endpoint<Data<MailingList>> =
    Endpoint::new(PUT, "/api/lists/{id}", Json);
pub const DELETE_LIST: Endpoint<Data<bool>> = Endpoint::new(DELETE, "/api/lists/{id}", Empty);

// Import

pub const GET_IMPORT_STATUS: Endpoint<Data<ImportStatus>> =
    Endpoint::new(GET, "/api/import/subscribers", Empty);
pub const GET_IMPORT_LOGS: Endpoint<Data<String>> =
    Endpoint::new(GET, "/api/import/subscribers/logs", Empty);
pub const IMPORT_SUBSCRIBERS: Endpoint<Data<ImportConfig>> =
    Endpoint::new(POST, "/api/import/subscribers", Multipart);
pub const ABORT_IMPORT: Endpoint<Data<ImportStatus>> =
    Endpoint::new(DELETE, "/api/import/subscribers", Empty);

// Campaigns

pub const GET_CAMPAIGNS: Endpoint<Data<Page<Campaign>>> =
    Endpoint::new(GET, "/api/campaigns", Query);
pub const GET_CAMPAIGN: Endpoint<Data<Campaign>> =
    Endpoint::new(GET, "/api/campaigns/{id}", Query);
pub const GET_CAMPAIGN_PREVIEW: Endpoint<Text> =
    Endpoint::new(GET, "/api/campaigns/{id}/preview", Empty);
pub const GET_RUNNING_CAMPAIGN_STATS: Endpoint<Data<Vec<Value>>> =
    Endpoint::new(GET, "/api/campaigns/running/stats", Query);
pub const GET_CAMPAIGN_ANALYTICS: Endpoint<Data<Vec<Map<String, Value>>>> =
    Endpoint::new(GET, "/api/campaigns/analytics/{type}", Query);
pub const CREATE_CAMPAIGN: Endpoint<Data<Campaign>> = Endpoint::new(POST, "/api/campaigns", Json);
pub const TEST_CAMPAIGN: Endpoint<Data<bool>> =
    Endpoint::new(POST, "/api/campaigns/{id}/test", Json);
pub const UPDATE_CAMPAIGN: Endpoint<Data<Campaign>> =
    Endpoint::new(PUT, "/api/campaigns/{id}", Json);
pub const CHANGE_CAMPAIGN_STATUS: Endpoint<Data<Campaign>> =
    Endpoint::new(PUT, "/api/campaigns/{id}/status", Json);
pub const ARCHIVE_CAMPAIGN: Endpoint<Data<ArchiveParams>> =
    Endpoint::new(PUT, "/api/campaigns/{id}/archive", Json);
pub const DELETE_CAMPAIGN: Endpoint<Data<bool>> =
    Endpoint::new(DELETE, "/api/campaigns/{id}", Empty);

// Media

pub const GET_MEDIA_LIST: Endpoint<Data<Vec<Media>>> = Endpoint::new(GET, "/api/media", Empty);
pub const GET_MEDIA: Endpoint<Data<Media>> = Endpoint::new(GET, "/api/media/{id}", Empty);
pub const UPLOAD_MEDIA: Endpoint<Data<Media>> = Endpoint::new(POST, "/api/media", Multipart);
pub const DELETE_MEDIA: Endpoint<Data<bool>> = Endpoint::new(DELETE, "/api/media/{id}", Empty);

// Templates

pub const GET_TEMPLATES: Endpoint<Data<Vec<Template>>> =
    Endpoint::new(GET, "/api/templates", Empty);
pub const GET_TEMPLATE: Endpoint<Data<Template>> =
    Endpoint::new(GET, "/api/templates/{id}", Empty);
pub const GET_TEMPLATE_PREVIEW: Endpoint<Text> =
    Endpoint::new(GET, "/api/templates/{id}/preview", Empty);
// listmonk answers template writes with the template wrapped in a one-element list.
pub const CREATE_TEMPLATE: Endpoint<Data<Vec<Template>>> =
    Endpoint::new(POST, "/api/templates", Json);
pub const UPDATE_TEMPLATE: Endpoint<Data<Vec<Template>>> =
    Endpoint::new(PUT, "/api/templates/{id}", Json);
pub const SET_DEFAULT_TEMPLATE: Endpoint<Data<Template>> =
    Endpoint::new(PUT, "/api/templates/{id}/default", Empty);
pub const DELETE_TEMPLATE: Endpoint<Data<bool>> =
    Endpoint::new(DELETE, "/api/templates/{id}", Empty);

// Transactional

pub const SEND_TRANSACTIONAL: Endpoint<Data<bool>> = Endpoint::new(POST, "/api/tx", Json);

// Bounces

pub const GET_BOUNCES: Endpoint<Data<Page<Bounce>>> = Endpoint::new(GET, "/api/bounces", Query);
pub const DELETE_BOUNCES: Endpoint<Data<bool>> = Endpoint::new(DELETE, "/api/bounces", Query);
pub const DELETE_BOUNCE: Endpoint<Data<bool>> = Endpoint::new(DELETE, "/api/bounces/{id}", Empty);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_endpoints_are_text() {
        assert_eq!(GET_CAMPAIGN_PREVIEW.render(&[&3u64]), "/api/campaigns/3/preview");
        assert_eq!(GET_TEMPLATE_PREVIEW.render(&[&5u64]), "/api/templates/5/preview");
    }

    #[test]
    fn uploads_are_multipart_posts() {
        assert_eq!(UPLOAD_MEDIA.method(), &Method::POST);
        assert_eq!(UPLOAD_MEDIA.mode(), Multipart);
        assert_eq!(IMPORT_SUBSCRIBERS.method(), &Method::POST);
        assert_eq!(IMPORT_SUBSCRIBERS.mode(), Multipart);
    }

    #[test]
    fn reads_and_deletes_never_send_json() {
        let modes = [
            (GET_SUBSCRIBERS.method().clone(), GET_SUBSCRIBERS.mode()),
            (DELETE_SUBSCRIBERS.method().clone(), DELETE_SUBSCRIBERS.mode()),
            (GET_CAMPAIGN.method().clone(), GET_CAMPAIGN.mode()),
            (DELETE_BOUNCES.method().clone(), DELETE_BOUNCES.mode()),
            (GET_LISTS.method().clone(), GET_LISTS.mode()),
            (DELETE_LIST.method().clone(), DELETE_LIST.mode()),
        ];
        for (method, mode) in modes {
            assert!(method == Method::GET || method == Method::DELETE);
            assert_ne!(mode, Json);
        }
    }

    #[test]
    fn delete_by_query_is_a_post() {
        assert_eq!(DELETE_SUBSCRIBERS_BY_QUERY.method(), &Method::POST);
        assert_eq!(
            DELETE_SUBSCRIBERS_BY_QUERY.template(),
            "/api/subscribers/query/delete"
        );
    }
}
