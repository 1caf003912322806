//! # Identity
//!
//! Thin client for the hosted identity service (Cognito-style AWS JSON 1.1
//! endpoint). The rest of the crate treats it as opaque: sign in, sign out,
//! and hand over the id token as a bearer credential. Token issuance and
//! session refresh are the provider's problem, not ours.
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;

const AMZ_JSON: &str = "application/x-amz-json-1.1";
const TARGET_SIGN_IN: &str = "AWSCognitoIdentityProviderService.InitiateAuth";
const TARGET_SIGN_UP: &str = "AWSCognitoIdentityProviderService.SignUp";
const TARGET_SIGN_OUT: &str = "AWSCognitoIdentityProviderService.GlobalSignOut";

#[derive(Debug, Clone)]
pub struct Session {
    pub email: String,
    pub id_token: String,
    pub access_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SignInResponse {
    authentication_result: AuthenticationResult,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    id_token: String,
    access_token: String,
}

pub struct Identity {
    http: Client,
    endpoint: String,
    client_id: String,
    current: Option<Session>,
}

impl Identity {
    pub fn new(endpoint: &str, client_id: &str) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.to_string(),
            client_id: client_id.to_string(),
            current: None,
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), AppError> {
        self.call(
            TARGET_SIGN_UP,
            json!({
                "ClientId": self.client_id,
                "Username": email,
                "Password": password,
                "UserAttributes": [{ "Name": "email", "Value": email }],
            }),
        )
        .await?;

        Ok(())
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, AppError> {
        let body = self
            .call(
                TARGET_SIGN_IN,
                json!({
                    "AuthFlow": "USER_PASSWORD_AUTH",
                    "ClientId": self.client_id,
                    "AuthParameters": { "USERNAME": email, "PASSWORD": password },
                }),
            )
            .await?;

        let parsed: SignInResponse =
            serde_json::from_str(&body).map_err(|e| AppError::Auth(e.to_string()))?;

        let session = Session {
            email: email.to_string(),
            id_token: parsed.authentication_result.id_token,
            access_token: parsed.authentication_result.access_token,
        };
        self.current = Some(session.clone());

        Ok(session)
    }

    /// Drops the local session unconditionally; the global sign-out call may
    /// still fail, in which case the error is returned but the session stays
    /// cleared (the tokens are gone either way from this client's view).
    pub async fn sign_out(&mut self) -> Result<(), AppError> {
        if let Some(session) = self.current.take() {
            self.call(
                TARGET_SIGN_OUT,
                json!({ "AccessToken": session.access_token }),
            )
            .await?;
        }

        Ok(())
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    async fn call(&self, target: &str, payload: Value) -> Result<String, AppError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", AMZ_JSON)
            .header("X-Amz-Target", target)
            .body(payload.to_string())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::Auth(format!("{status}: {body}")));
        }

        Ok(body)
    }
}
