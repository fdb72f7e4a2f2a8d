//! HTTP client for the PlantNet v2 identification API.

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use crate::types::{
    Error, IdentificationRequest, IdentificationResult, PlantNetResult, ProjectDirectory,
};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://my-api.plantnet.org";

/// Client for the species-identification service.
///
/// Immutable after construction; safe to share behind an `Arc` across
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct PlantNetClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl PlantNetClient {
    /// Create a client. Fails immediately on an empty credential, before
    /// any call is attempted.
    pub fn new(api_key: impl Into<String>) -> PlantNetResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different host. Used by tests against a
    /// local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Identify the plant shown in the request's images.
    ///
    /// Images are fetched sequentially and the whole call aborts on the
    /// first failure — the upstream pairs image N with organ N purely by
    /// position in the multipart body, so partial submission would
    /// misalign the remaining pairs.
    pub async fn identify(
        &self,
        request: &IdentificationRequest,
    ) -> PlantNetResult<IdentificationResult> {
        request.validate()?;

        let mut form = Form::new();
        for (index, (url, organ)) in request.images.iter().zip(&request.organs).enumerate() {
            let (bytes, mime, ext) = self.fetch_image(url).await?;
            tracing::debug!(url = %url, mime, organ = organ.as_str(), "attaching image part");

            let part = Part::bytes(bytes)
                .file_name(format!("image_{index}.{ext}"))
                .mime_str(mime)
                .map_err(Error::Http)?;
            form = form.part("images", part);
            form = form.text("organs", organ.as_str());
        }

        let endpoint = format!("{}/v2/identify/{}", self.base_url, request.project);
        tracing::debug!(
            endpoint = %endpoint,
            images = request.images.len(),
            lang = %request.lang,
            nb_results = request.nb_results,
            "sending identification request"
        );

        let response = self
            .http
            .post(&endpoint)
            .query(&[
                ("api-key", self.api_key.as_str()),
                ("lang", request.lang.as_str()),
                ("nb-results", &request.nb_results.to_string()),
                ("include-related-images", "false"),
            ])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        check_status(status, &body)?;

        let result: IdentificationResult = serde_json::from_str(&body)?;
        tracing::debug!(
            best_match = result.best_match.as_deref().unwrap_or("none"),
            candidates = result.results.len(),
            "identification succeeded"
        );
        Ok(result)
    }

    /// List the flora databases the service can match against.
    pub async fn list_projects(&self, lang: &str) -> PlantNetResult<ProjectDirectory> {
        let endpoint = format!("{}/v2/projects", self.base_url);
        let response = self
            .http
            .get(&endpoint)
            .query(&[("api-key", self.api_key.as_str()), ("lang", lang)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        check_status(status, &body)?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Retrieve one image and infer its content type from the response.
    async fn fetch_image(&self, url: &str) -> PlantNetResult<(Vec<u8>, &'static str, &'static str)> {
        let response = self.http.get(url).send().await.map_err(|e| Error::ImageFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ImageFetch {
                url: url.to_string(),
                reason: format!(
                    "HTTP {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("unknown")
                ),
            });
        }

        let declared = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let (mime, ext) = image_mime(declared.as_deref());

        let bytes = response.bytes().await.map_err(|e| Error::ImageFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok((bytes.to_vec(), mime, ext))
    }
}

/// Map a declared content type onto the part MIME and filename extension.
/// Undeclared or unrecognized types default to JPEG.
fn image_mime(declared: Option<&str>) -> (&'static str, &'static str) {
    let subtype = declared
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .unwrap_or("");

    match subtype {
        "image/png" => ("image/png", "png"),
        "image/webp" => ("image/webp", "webp"),
        "image/gif" => ("image/gif", "gif"),
        "image/jpeg" | "image/jpg" => ("image/jpeg", "jpg"),
        _ => ("image/jpeg", "jpg"),
    }
}

/// Normalize a non-success status into an API error carrying the body.
/// The body is stringified JSON when it parses, raw text otherwise.
fn check_status(status: StatusCode, body: &str) -> PlantNetResult<()> {
    if status.is_success() {
        return Ok(());
    }

    let diagnostic = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(parsed) => parsed.to_string(),
        Err(_) => body.to_string(),
    };

    Err(Error::Api {
        status: status.as_u16(),
        body: diagnostic,
    })
}
