use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::Username,
    protocol::{new_tweet_path, NewTweetForm, NEW_TWEET_SUCCESS_BODY},
};
use tracing::{debug, info};
use url::Url;

use crate::{error::TransportError, PageReloader, TweetTransport};

pub struct HttpTransport {
    http: Client,
    server_url: Url,
}

impl HttpTransport {
    pub fn new(server_url: Url) -> Self {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: Url) -> Self {
        Self { http, server_url }
    }

    pub fn endpoint(&self, user: &Username) -> Result<Url, TransportError> {
        Ok(self.server_url.join(&new_tweet_path(user))?)
    }
}

#[async_trait]
impl TweetTransport for HttpTransport {
    async fn post_tweet(&self, user: &Username, form: &NewTweetForm) -> Result<(), TransportError> {
        let endpoint = self.endpoint(user)?;
        let res = self.http.post(endpoint).form(form).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = res.text().await?;
        if body.trim() != NEW_TWEET_SUCCESS_BODY {
            debug!(%user, %status, body_len = body.len(), "unexpected new tweet response body");
        }
        Ok(())
    }
}

pub struct HttpPageReloader {
    http: Client,
    page_url: Url,
}

impl HttpPageReloader {
    pub fn new(page_url: Url) -> Self {
        Self::with_client(Client::new(), page_url)
    }

    pub fn with_client(http: Client, page_url: Url) -> Self {
        Self { http, page_url }
    }
}

#[async_trait]
impl PageReloader for HttpPageReloader {
    async fn reload(&self) -> Result<()> {
        let res = self
            .http
            .get(self.page_url.clone())
            .send()
            .await
            .with_context(|| format!("failed to reload {}", self.page_url))?
            .error_for_status()?;
        let status = res.status();
        let bytes = res.bytes().await?;
        info!(page = %self.page_url, %status, bytes = bytes.len(), "page reloaded");
        Ok(())
    }
}
