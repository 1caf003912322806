use std::time::Duration;

use clap::Parser;

use vote::api::ApiClient;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    base_url: String,

    /// Gadget id to vote for (requires --token).
    #[arg(long)]
    vote: Option<String>,

    /// Bearer id token for the vote.
    #[arg(long)]
    token: Option<String>,

    #[arg(long, default_value_t = 1)]
    rounds: u32,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let api = ApiClient::new(&args.base_url);

    if let (Some(gadget_id), Some(token)) = (&args.vote, &args.token) {
        match api.emit_vote(gadget_id, token).await {
            Ok(()) => println!("Vote recorded for {gadget_id}"),
            Err(error) => println!("Vote failed: {error}"),
        }
    }

    for round in 0..args.rounds {
        if round > 0 {
            tokio::time::sleep(Duration::from_secs(3)).await;
        }

        match api.get_results().await {
            Ok(gadgets) => {
                println!("--- round {} ---", round + 1);
                for gadget in gadgets {
                    println!("{}: {} votes", gadget.gadget_name, gadget.total_votes);
                }
            }
            Err(error) => println!("Fetch failed: {error}"),
        }
    }
}
