//! Live voting dashboard client for the gadget-of-the-year API.
//!
//!
//!
//! # General Flow
//! - Sign in against the hosted identity endpoint (optional; view-only without it)
//! - Poll `GET /results` on a fixed period and replace the tally wholesale
//! - Submit at most one `POST /vote` per session, bearer-authenticated
//! - A 409 from the vote sink means this identity already voted; the session
//!   locks exactly as if the vote had been accepted, only the message differs
//!
//!
//!
//! # Notes
//!
//! ## Why replace instead of merge
//! The results endpoint returns the full tally on every call and the table is
//! tiny. Merging partial updates would only buy us drift when a response is
//! dropped mid-cycle. Wholesale replacement keeps the local copy a pure
//! function of the last server response.
//!
//! ## Poll failures
//! A single failed poll is invisible: logged, swallowed, retried on the next
//! tick. Staleness is bounded by the poll period, which is acceptable for a
//! readout that is advisory anyway. Submission errors are different and are
//! surfaced to the user for manual retry.
//!
//!
//!
//! # Configuration
//!
//! Environment variables, all optional:
//! ```sh
//! VOTE_API_URL=https://abc123.execute-api.us-east-1.amazonaws.com/prod
//! VOTE_POLL_SECONDS=3
//! VOTE_IDENTITY_URL=https://cognito-idp.us-east-1.amazonaws.com
//! VOTE_IDENTITY_CLIENT_ID=...
//! VOTE_EMAIL=voter@example.com
//! VOTE_PASSWORD=...
//! ```
use std::time::Duration;

use tokio::io::{stdin, AsyncBufReadExt, BufReader};

use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

pub mod api;
pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod poller;
pub mod tally;

use api::ApiClient;
use auth::{Identity, Session};
use config::Config;
use controller::{Controller, SubmitOutcome};
use error::AppError;

pub async fn run_dashboard() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();

    let mut identity = Identity::new(&config.identity_url, &config.identity_client_id);
    let session = match (&config.email, &config.password) {
        (Some(email), Some(password)) => match identity.sign_in(email, password).await {
            Ok(session) => {
                info!("Signed in as {}", session.email);
                Some(session)
            }
            Err(error) => {
                warn!("Sign-in failed, running view-only: {error}");
                None
            }
        },
        _ => {
            info!("No credentials configured, running view-only");
            None
        }
    };

    let controller = Controller::new(ApiClient::new(&config.api_base_url));

    info!("Starting tally poller...");
    let poller = poller::start(
        controller.clone(),
        Duration::from_secs(config.poll_seconds),
    );

    println!("Type a gadget id to vote, Ctrl+C to quit.");

    let mut render = tokio::time::interval(Duration::from_secs(config.poll_seconds));
    let mut lines = BufReader::new(stdin()).lines();

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = render.tick() => render_tally(&controller),
            line = lines.next_line() => match line {
                Ok(Some(line)) => handle_vote(&controller, session.as_ref(), line.trim()).await,
                _ => break,
            },
            _ = &mut shutdown => break,
        }
    }

    poller.stop().await;

    if let Err(error) = identity.sign_out().await {
        warn!("Sign-out failed: {error}");
    }

    println!("Dashboard closed.");
}

async fn handle_vote(controller: &Controller, session: Option<&Session>, gadget_id: &str) {
    if gadget_id.is_empty() {
        return;
    }

    let Some(session) = session else {
        println!("{}", AppError::MissingCredentials);
        return;
    };

    match controller.submit_vote(gadget_id, session).await {
        Ok(SubmitOutcome::Accepted) => println!("Thank you for voting!"),
        Ok(SubmitOutcome::AlreadyVoted) => println!("You have already voted."),
        Ok(SubmitOutcome::NotAccepting) => println!("Voting is closed for this session."),
        Err(error) => println!("Vote failed, try again: {error}"),
    }
}

fn render_tally(controller: &Controller) {
    let tally = controller.tally();

    if tally.gadgets.is_empty() {
        println!("No results yet...");
        return;
    }

    println!("\nTotal votes: {}", tally.total_votes);
    for gadget in &tally.gadgets {
        println!(
            "  [{}] {:<24} {:>5} votes  {:>5.1}%",
            gadget.gadget_id, gadget.gadget_name, gadget.total_votes, gadget.percentage
        );
    }

    println!("Top 3:");
    for (rank, gadget) in tally.top(3).iter().enumerate() {
        println!(
            "  #{} {} ({} votes)",
            rank + 1,
            gadget.gadget_name,
            gadget.total_votes
        );
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
