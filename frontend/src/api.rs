use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode, Url};

use crate::error::ApiError;
use crate::session::SessionStore;
use crate::structs::{Ack, LoginInput, LoginResponse, Note, NoteInput, NoteList, RegistrationInput};

const JSON: &str = "application/json";

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    session: SessionStore,
}

/// Result of a login exchange that reached the server. A reply without a
/// token is a refusal, not a transport error.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Authenticated(String),
    Rejected,
}

impl ApiClient {
    pub fn new(base_url: &str, session: SessionStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// POST /user/register
    pub async fn register(&self, input: &RegistrationInput) -> Result<Ack, ApiError> {
        let url = self.url("/user/register");
        let request = self.request(Method::POST, &url).json(input);
        let body = expect_success(&url, self.exchange(request, &url).await?)?;
        Ok(Ack::from_body(&body))
    }

    /// POST /user/login
    pub async fn login(&self, input: &LoginInput) -> Result<LoginOutcome, ApiError> {
        let url = self.url("/user/login");
        let request = self.request(Method::POST, &url).json(input);
        let (status, body) = self.exchange(request, &url).await?;

        let parsed: LoginResponse =
            serde_json::from_str(&body).map_err(|source| ApiError::Parse {
                url: url.clone(),
                source,
            })?;

        match parsed.token.filter(|t| !t.is_empty()) {
            Some(token) if status.is_success() => Ok(LoginOutcome::Authenticated(token)),
            _ => {
                debug!("Login answered HTTP {} without a token", status.as_u16());
                Ok(LoginOutcome::Rejected)
            }
        }
    }

    /// GET /note
    pub async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let url = self.url("/note");
        let request = self.authorized(self.request(Method::GET, &url));
        let body = expect_success(&url, self.exchange(request, &url).await?)?;

        let list: NoteList = serde_json::from_str(&body).map_err(|source| ApiError::Parse {
            url: url.clone(),
            source,
        })?;
        Ok(list.notes)
    }

    /// POST /note/create
    pub async fn create_note(&self, input: &NoteInput) -> Result<Ack, ApiError> {
        let url = self.url("/note/create");
        let request = self.authorized(self.request(Method::POST, &url)).json(input);
        let body = expect_success(&url, self.exchange(request, &url).await?)?;
        Ok(Ack::from_body(&body))
    }

    /// DELETE /note/delete-note/{id}
    pub async fn delete_note(&self, id: &str) -> Result<Ack, ApiError> {
        let url = self.note_url(id)?;
        let request = self.authorized(self.request(Method::DELETE, &url));
        let body = expect_success(&url, self.exchange(request, &url).await?)?;
        Ok(Ack::from_body(&body))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The id goes in as one escaped path segment, whatever it contains.
    fn note_url(&self, id: &str) -> Result<String, ApiError> {
        let mut url = Url::parse(&self.url("/note/delete-note"))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?
            .push(id);
        Ok(url.to_string())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.client.request(method, url).header(CONTENT_TYPE, JSON)
    }

    /// Attaches the session token when there is one. Without a token the
    /// request still goes out; the server decides.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.get_token() {
            Some(token) => request.bearer_auth(token),
            None => {
                debug!("No session token; sending request unauthenticated");
                request
            }
        }
    }

    async fn exchange(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<(StatusCode, String), ApiError> {
        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        Ok((status, body))
    }
}

fn expect_success(url: &str, (status, body): (StatusCode, String)) -> Result<String, ApiError> {
    if status.is_success() {
        Ok(body)
    } else {
        Err(ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}
