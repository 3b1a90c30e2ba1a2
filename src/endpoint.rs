//! Declarative endpoint descriptions and the one generic call path.
//!
//! An [`Endpoint`] pins down everything that varies between listmonk
//! operations: HTTP method, path template, how parameters are encoded and,
//! through its type parameter, how the response body is decoded. The table
//! of all endpoints lives in [`crate::routes`].

use std::fmt::{self, Display};
use std::marker::PhantomData;

use reqwest::Method;
use serde::Serialize;

use crate::client::{ListmonkClient, Request};
use crate::envelope::{self, ResponseShape};
use crate::error::Result;
use crate::multipart::MultipartForm;

/// Path arguments substituted into `{placeholder}` segments, in order.
pub type PathArgs<'a> = &'a [&'a (dyn Display + Sync)];

/// How an endpoint's parameter object is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// No parameters.
    Empty,
    /// Parameters become the query string.
    Query,
    /// Parameters are the JSON body.
    Json,
    /// A multipart form body.
    Multipart,
}

/// One listmonk endpoint. `S` is the [`ResponseShape`] of its success body.
pub struct Endpoint<S> {
    method: Method,
    path: &'static str,
    mode: RequestMode,
    shape: PhantomData<fn() -> S>,
}

impl<S> fmt::Debug for Endpoint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("mode", &self.mode)
            .finish()
    }
}

impl<S> Endpoint<S> {
    pub const fn new(method: Method, path: &'static str, mode: RequestMode) -> Self {
        Self {
            method,
            path,
            mode,
            shape: PhantomData,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The unrendered path template, e.g. `/api/lists/{id}`.
    pub fn template(&self) -> &'static str {
        self.path
    }

    pub fn mode(&self) -> RequestMode {
        self.mode
    }

    /// Fill the template's placeholders with percent-encoded `args`.
    ///
    /// Placeholders without a matching argument are left untouched.
    pub fn render(&self, args: PathArgs<'_>) -> String {
        debug_assert_eq!(
            self.path.matches('{').count(),
            args.len(),
            "wrong number of path arguments for {}",
            self.path
        );

        let mut out = String::with_capacity(self.path.len() + 8);
        let mut args = args.iter();
        let mut rest = self.path;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|i| open + i) else {
                break;
            };
            out.push_str(&rest[..open]);
            match args.next() {
                Some(arg) => out.push_str(&urlencoding::encode(&arg.to_string())),
                None => out.push_str(&rest[open..=close]),
            }
            rest = &rest[close + 1..];
        }
        out.push_str(rest);
        out
    }

    /// Build the request descriptor for this endpoint.
    ///
    /// Encoding failures surface here, before anything touches the network.
    pub fn request<P: Serialize + ?Sized>(
        &self,
        args: PathArgs<'_>,
        params: Option<&P>,
    ) -> Result<Request> {
        debug_assert!(
            params.is_none() || matches!(self.mode, RequestMode::Query | RequestMode::Json),
            "{} {} takes no parameter object",
            self.method,
            self.path
        );

        let request = Request::new(self.method.clone(), self.render(args));
        match (self.mode, params) {
            (RequestMode::Query, Some(params)) => request.query(params),
            (RequestMode::Json, Some(params)) => request.json(params),
            _ => Ok(request),
        }
    }
}

impl<S: ResponseShape> Endpoint<S> {
    /// Call an endpoint that takes no parameters.
    pub async fn call(&self, client: &ListmonkClient, args: PathArgs<'_>) -> Result<S::Output> {
        let request = self.request(args, None::<&()>)?;
        Self::dispatch(client, request).await
    }

    /// Call an endpoint with a query or JSON parameter object.
    pub async fn call_with<P: Serialize + Sync + ?Sized>(
        &self,
        client: &ListmonkClient,
        args: PathArgs<'_>,
        params: &P,
    ) -> Result<S::Output> {
        let request = self.request(args, Some(params))?;
        Self::dispatch(client, request).await
    }

    /// Call a multipart endpoint.
    pub async fn upload(
        &self,
        client: &ListmonkClient,
        args: PathArgs<'_>,
        form: MultipartForm,
    ) -> Result<S::Output> {
        debug_assert_eq!(self.mode, RequestMode::Multipart);
        let request = Request::new(self.method.clone(), self.render(args)).multipart(form);
        Self::dispatch(client, request).await
    }

    async fn dispatch(client: &ListmonkClient, request: Request) -> Result<S::Output> {
        client
            .cancellable(async {
                let response = client.execute(request).await?;
                envelope::decode::<S>(response).await
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{Data, Text};

    const GET_ONE: Endpoint<Data<bool>> =
        Endpoint::new(Method::GET, "/api/lists/{id}", RequestMode::Empty);
    const ANALYTICS: Endpoint<Data<bool>> =
        Endpoint::new(Method::GET, "/api/campaigns/analytics/{type}", RequestMode::Query);
    const CREATE: Endpoint<Data<bool>> =
        Endpoint::new(Method::POST, "/api/lists", RequestMode::Json);
    const PREVIEW: Endpoint<Text> =
        Endpoint::new(Method::GET, "/api/templates/{id}/preview", RequestMode::Empty);

    #[derive(Serialize)]
    struct Params {
        name: String,
        tags: Vec<String>,
    }

    #[test]
    fn renders_numeric_placeholders() {
        assert_eq!(GET_ONE.render(&[&42u64]), "/api/lists/42");
        assert_eq!(PREVIEW.render(&[&7u64]), "/api/templates/7/preview");
    }

    #[test]
    fn percent_encodes_path_arguments() {
        assert_eq!(
            ANALYTICS.render(&[&"views/../x"]),
            "/api/campaigns/analytics/views%2F..%2Fx"
        );
    }

    #[test]
    fn paths_without_placeholders_are_unchanged() {
        assert_eq!(CREATE.render(&[]), "/api/lists");
    }

    #[test]
    fn query_mode_fills_query_not_body() {
        let params = Params {
            name: "x".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
        };
        let request = ANALYTICS.request(&[&"views"], Some(&params)).unwrap();
        assert!(request.json_body().is_none());
        assert_eq!(
            request.query_pairs(),
            &[
                ("name".to_string(), "x".to_string()),
                ("tags".to_string(), "a".to_string()),
                ("tags".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn json_mode_fills_body_not_query() {
        let params = Params {
            name: "Weekly".to_string(),
            tags: vec!["news".to_string()],
        };
        let request = CREATE.request(&[], Some(&params)).unwrap();
        assert!(request.query_pairs().is_empty());

        let body: serde_json::Value = serde_json::from_slice(request.json_body().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Weekly", "tags": ["news"]}));
    }

    #[test]
    fn empty_mode_sends_nothing() {
        let request = GET_ONE.request(&[&1u64], None::<&()>).unwrap();
        assert!(request.query_pairs().is_empty());
        assert!(request.json_body().is_none());
        assert_eq!(request.method(), &Method::GET);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "takes no parameter object")]
    fn params_on_empty_endpoint_panic_in_debug() {
        let _ = GET_ONE.request(&[&1u64], Some(&serde_json::json!({"a": 1})));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "takes no parameter object")]
    fn params_on_multipart_endpoint_panic_in_debug() {
        const UPLOAD: Endpoint<Data<bool>> =
            Endpoint::new(Method::POST, "/api/media", RequestMode::Multipart);
        let _ = UPLOAD.request(&[], Some(&serde_json::json!({"a": 1})));
    }
}
