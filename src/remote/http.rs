use std::time::Duration;

use log::{
    debug,
    warn,
};
use reqwest::{
    blocking::{
        multipart::{
            Form,
            Part,
        },
        Client,
        RequestBuilder,
        Response,
    },
    header::USER_AGENT,
};
use serde::de::DeserializeOwned;

use super::{
    wire::{
        error_detail,
        AnalyzeResponse,
        ImportResponse,
        KnownWordsResponse,
        UpdateKnownRequest,
    },
    RemoteSync,
    SyncError,
    SyncResult,
};
use crate::core::{
    AnalysisResult,
    DeckScope,
    ImportSummary,
    KnownAction,
    ReviewError,
};

const CLIENT_AGENT: &str = "tangocho/0.1 (+reqwest)";

pub fn http_client(timeout: Duration) -> Result<Client, ReviewError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// How a non-success status is turned into a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Detail {
    /// Use the server's `detail` field when there is one.
    Prefer,
    /// Always use the generic message.
    Ignore,
}

/// Backend client speaking the vocabulary server's JSON/multipart API.
pub struct HttpRemote {
    client: Client,
    base_url: String,
}

impl HttpRemote {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ReviewError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client: http_client(timeout)?, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn send(
        &self,
        request: RequestBuilder,
        generic: &str,
        detail: Detail,
    ) -> SyncResult<Response> {
        let resp = request.header(USER_AGENT, CLIENT_AGENT).send().map_err(|e| {
            warn!("{generic}: {e}");
            SyncError::new(format!("{generic}: {e}"))
        })?;

        if resp.status().is_success() {
            debug!("{} {}", resp.status(), resp.url());
            return Ok(resp);
        }

        let status = resp.status();
        let url = resp.url().to_string();
        let body = resp.text().unwrap_or_default();
        warn!("HTTP error {status} from {url}: {body}");

        let message = match detail {
            Detail::Prefer => error_detail(&body).unwrap_or_else(|| generic.to_string()),
            Detail::Ignore => generic.to_string(),
        };
        Err(SyncError::new(message))
    }

    fn json<T: DeserializeOwned>(resp: Response, generic: &str) -> SyncResult<T> {
        resp.json::<T>().map_err(|e| SyncError::new(format!("{generic}: {e}")))
    }
}

fn file_form(file_name: &str, bytes: Vec<u8>) -> Form {
    Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()))
}

impl RemoteSync for HttpRemote {
    fn analyze_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        limit: Option<usize>,
    ) -> SyncResult<AnalysisResult> {
        const GENERIC: &str = "Failed to analyze document";

        let mut request = self.client.post(self.url("upload-epub"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let resp = self.send(request.multipart(file_form(file_name, bytes)), GENERIC, Detail::Prefer)?;
        let parsed: AnalyzeResponse = Self::json(resp, GENERIC)?;
        Ok(parsed.into())
    }

    fn update_known(&self, words: &[String], action: KnownAction) -> SyncResult<()> {
        let request = self
            .client
            .post(self.url("update-known"))
            .json(&UpdateKnownRequest { words, action });
        self.send(request, "Failed to update known words", Detail::Ignore)?;
        Ok(())
    }

    fn fetch_known(&self) -> SyncResult<Vec<String>> {
        const GENERIC: &str = "Failed to fetch known words";

        let resp = self.send(self.client.get(self.url("known-words")), GENERIC, Detail::Ignore)?;
        let parsed: KnownWordsResponse = Self::json(resp, GENERIC)?;
        Ok(parsed.known_words)
    }

    fn import_known(&self, file_name: &str, bytes: Vec<u8>) -> SyncResult<ImportSummary> {
        const GENERIC: &str = "Failed to import known words";

        let request = self.client.post(self.url("upload-anki")).multipart(file_form(file_name, bytes));
        let resp = self.send(request, GENERIC, Detail::Prefer)?;
        let parsed: ImportResponse = Self::json(resp, GENERIC)?;
        Ok(parsed.into())
    }

    fn reset_known(&self) -> SyncResult<()> {
        self.send(
            self.client.post(self.url("reset-known-words")),
            "Failed to reset known words",
            Detail::Ignore,
        )?;
        Ok(())
    }

    fn generate_deck(&self, scope: DeckScope) -> SyncResult<Vec<u8>> {
        let (path, generic, detail) = match scope {
            DeckScope::Reviewing => ("generate-anki", "Failed to generate Anki deck", Detail::Ignore),
            DeckScope::Known => {
                ("generate-anki-known", "Failed to generate known-words deck", Detail::Prefer)
            }
        };

        let resp = self.send(self.client.get(self.url(path)), generic, detail)?;
        let bytes = resp.bytes().map_err(|e| SyncError::new(format!("{generic}: {e}")))?;
        Ok(bytes.to_vec())
    }

    fn health(&self) -> SyncResult<()> {
        self.send(self.client.get(self.url("health")), "Backend unreachable", Detail::Ignore)?;
        Ok(())
    }
}
