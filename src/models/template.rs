//! Template model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ListmonkClient;
use crate::error::{ListmonkError, Result};
use crate::routes;
use crate::traits::{Create, Delete, Get, Update};

/// A campaign or transactional template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: u64,

    pub name: String,

    #[serde(rename = "type", default)]
    pub template_type: TemplateType,

    /// Only used by transactional templates.
    #[serde(default)]
    pub subject: String,

    /// Empty in list responses.
    #[serde(default)]
    pub body: String,

    /// Email-builder source for `campaign_visual` templates.
    #[serde(default)]
    pub body_source: Option<String>,

    #[serde(default)]
    pub is_default: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    #[default]
    Campaign,
    CampaignVisual,
    Tx,
}

/// Parameters for creating or updating a template.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateParams {
    pub name: String,

    #[serde(rename = "type")]
    pub template_type: TemplateType,

    /// Required for `tx` templates.
    pub subject: Option<String>,

    pub body: String,

    pub body_source: Option<String>,
}

impl Template {
    /// Rendered HTML preview of this template.
    pub async fn preview(&self, client: &ListmonkClient) -> Result<String> {
        get_template_preview(client, self.id).await
    }
}

/// Template writes answer with a list holding the written template.
fn first(mut templates: Vec<Template>) -> Result<Template> {
    if templates.is_empty() {
        return Err(ListmonkError::Decode(serde::de::Error::custom(
            "expected the written template in the response, got an empty list",
        )));
    }
    Ok(templates.swap_remove(0))
}

#[async_trait]
impl Get for Template {
    #[tracing::instrument(skip(client))]
    async fn get(client: &ListmonkClient, id: u64) -> Result<Self> {
        routes::GET_TEMPLATE.call(client, &[&id]).await
    }
}

#[async_trait]
impl Create for Template {
    type Params = TemplateParams;

    #[tracing::instrument(skip(client, params))]
    async fn create(client: &ListmonkClient, params: Self::Params) -> Result<Self> {
        first(routes::CREATE_TEMPLATE.call_with(client, &[], &params).await?)
    }
}

#[async_trait]
impl Update for Template {
    type Params = TemplateParams;

    #[tracing::instrument(skip(client, params))]
    async fn update(client: &ListmonkClient, id: u64, params: Self::Params) -> Result<Self> {
        first(routes::UPDATE_TEMPLATE.call_with(client, &[&id], &params).await?)
    }
}

#[async_trait]
impl Delete for Template {
    #[tracing::instrument(skip(client))]
    async fn delete(client: &ListmonkClient, id: u64) -> Result<bool> {
        routes::DELETE_TEMPLATE.call(client, &[&id]).await
    }
}

/// Every template. listmonk does not paginate this call.
#[tracing::instrument(skip(client))]
pub async fn get_templates(client: &ListmonkClient) -> Result<Vec<Template>> {
    routes::GET_TEMPLATES.call(client, &[]).await
}

/// Rendered HTML preview of a template.
#[tracing::instrument(skip(client))]
pub async fn get_template_preview(client: &ListmonkClient, id: u64) -> Result<String> {
    routes::GET_TEMPLATE_PREVIEW.call(client, &[&id]).await
}

/// Make a template the default for new campaigns.
#[tracing::instrument(skip(client))]
pub async fn set_default_template(client: &ListmonkClient, id: u64) -> Result<Template> {
    routes::SET_DEFAULT_TEMPLATE.call(client, &[&id]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_deserialize() {
        let json = r#"{
            "id": 1,
            "created_at": "2020-03-14T17:36:41.288578+01:00",
            "updated_at": "2020-03-14T17:36:41.288578+01:00",
            "name": "Default template",
            "body": "{{ template \"content\" . }}",
            "type": "campaign",
            "is_default": true
        }"#;
        let template: Template = serde_json::from_str(json).unwrap();
        assert_eq!(template.name, "Default template");
        assert_eq!(template.template_type, TemplateType::Campaign);
        assert!(template.is_default);
        assert!(template.body_source.is_none());
    }

    #[test]
    fn test_template_type_wire_names() {
        assert_eq!(
            serde_json::to_value(TemplateType::CampaignVisual).unwrap(),
            "campaign_visual"
        );
        assert_eq!(serde_json::to_value(TemplateType::Tx).unwrap(), "tx");
    }

    #[test]
    fn test_params_serialization() {
        let params = TemplateParams {
            name: "Receipt".to_string(),
            template_type: TemplateType::Tx,
            subject: Some("Your order".to_string()),
            body: "<p>{{ .Tx.Data.order_id }}</p>".to_string(),
            body_source: None,
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["type"], "tx");
        assert_eq!(json["subject"], "Your order");
        assert!(json.get("body_source").is_none());
    }

    #[test]
    fn test_first_of_write_response() {
        let body = br#"{"data": [{"id": 9, "name": "New"}]}"#;
        let templates = crate::envelope::decode_body::<crate::envelope::Data<Vec<Template>>>(
            reqwest::StatusCode::OK,
            body,
        )
        .unwrap();
        assert_eq!(first(templates).unwrap().id, 9);

        let err = first(Vec::new()).unwrap_err();
        assert!(matches!(err, ListmonkError::Decode(_)));
    }
}
