use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::{
    error::AppError,
    tally::{GadgetTally, ResultsResponse},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoteRequest<'a> {
    gadget_id: &'a str,
}

/// REST client for the voting API.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn get_results(&self) -> Result<Vec<GadgetTally>, AppError> {
        let response = self
            .http
            .get(format!("{}/results", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Server(response.status()));
        }

        let body: ResultsResponse = response.json().await?;
        Ok(body.results)
    }

    pub async fn emit_vote(&self, gadget_id: &str, id_token: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(format!("{}/vote", self.base_url))
            .bearer_auth(id_token)
            .json(&VoteRequest { gadget_id })
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::CONFLICT => Err(AppError::Conflict),
            status => Err(AppError::Server(status)),
        }
    }
}
