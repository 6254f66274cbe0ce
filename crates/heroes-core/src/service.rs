//! Record client for the heroes REST API.
//!
//! Maps six operations onto requests against one collection endpoint. No
//! operation ever fails: a transport failure is logged (tracing and the
//! user-facing [`MessageLog`]) and replaced by a fallback value.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

use crate::hero::{Ack, Hero, NewHero};
use crate::messages::MessageLog;
use crate::transport::{Transport, TransportError};

const LOG_PREFIX: &str = "HeroService: ";

pub struct HeroService {
    transport: Arc<dyn Transport>,
    base_url: String,
    messages: MessageLog,
}

impl HeroService {
    /// `base_url` is the collection endpoint, e.g. `http://localhost:3000/heros`.
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: &str,
        messages: MessageLog,
    ) -> Result<Self> {
        let parsed =
            Url::parse(base_url).with_context(|| format!("invalid base URL: {}", base_url))?;
        if parsed.cannot_be_a_base() {
            anyhow::bail!("base URL cannot hold record paths: {}", base_url);
        }
        Ok(Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            messages,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    /// `GET <base>`.
    pub async fn fetch_all(&self) -> Vec<Hero> {
        match self.get_json::<Vec<Hero>>(&self.base_url).await {
            Ok(heroes) => {
                self.log(format!("fetched heroes ({})", heroes.len()));
                heroes
            }
            Err(e) => self.recover("fetch_all", e, Vec::new()),
        }
    }

    /// `GET <base>?name=<query>`. A blank query returns no heroes without a request.
    pub async fn search(&self, query: &str) -> Vec<Hero> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        let url = format!("{}?name={}", self.base_url, encoded);
        match self.get_json::<Vec<Hero>>(&url).await {
            Ok(heroes) => {
                self.log(format!("found heroes matching {}", query));
                heroes
            }
            Err(e) => self.recover("search", e, Vec::new()),
        }
    }

    /// `GET <base>/<id>`. `None` when the hero cannot be fetched.
    pub async fn fetch_by_id(&self, id: i64) -> Option<Hero> {
        match self.get_json::<Hero>(&self.record_url(id)).await {
            Ok(hero) => {
                self.log(format!("fetched hero id={}", id));
                Some(hero)
            }
            Err(e) => self.recover(&format!("fetch_by_id id={}", id), e, None),
        }
    }

    /// `POST <base>`; returns the stored record with its server-assigned id.
    pub async fn create(&self, hero: &NewHero) -> Option<Hero> {
        let outcome = async {
            let payload = serde_json::to_vec(hero)?;
            let body = self.transport.post(&self.base_url, payload).await?;
            Ok::<Hero, TransportError>(serde_json::from_slice(&body)?)
        }
        .await;

        match outcome {
            Ok(created) => {
                self.log(format!(
                    "created hero id={} name={}",
                    created.id, created.name
                ));
                Some(created)
            }
            Err(e) => self.recover("create", e, None),
        }
    }

    /// `PUT <base>/<hero.id>` with the full record.
    pub async fn update(&self, hero: &Hero) -> Option<Ack> {
        let outcome = async {
            let payload = serde_json::to_vec(hero)?;
            self.transport.put(&self.record_url(hero.id), payload).await?;
            Ok::<Ack, TransportError>(Ack)
        }
        .await;

        match outcome {
            Ok(ack) => {
                self.log(format!("updated hero id={}", hero.id));
                Some(ack)
            }
            Err(e) => self.recover(&format!("update id={}", hero.id), e, None),
        }
    }

    /// `DELETE <base>/<id>`.
    pub async fn remove(&self, id: i64) -> Option<Ack> {
        match self.transport.delete(&self.record_url(id)).await {
            Ok(_) => {
                self.log(format!("removed hero id={}", id));
                Some(Ack)
            }
            Err(e) => self.recover(&format!("remove id={}", id), e, None),
        }
    }

    fn record_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, TransportError> {
        let body = self.transport.get(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn log(&self, message: String) {
        tracing::info!("{}", message);
        self.messages.add(format!("{}{}", LOG_PREFIX, message));
    }

    /// Shared failure policy: report, record, and hand back `fallback`.
    fn recover<T>(&self, operation: &str, error: TransportError, fallback: T) -> T {
        tracing::error!(
            operation,
            status = ?error.status(),
            error = %error,
            "hero request failed"
        );
        self.messages
            .add(format!("{}{} failed: {}", LOG_PREFIX, operation, error));
        fallback
    }
}
