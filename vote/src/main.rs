#[tokio::main]
async fn main() {
    vote::run_dashboard().await;
}
