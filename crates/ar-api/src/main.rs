#[tokio::main]
async fn main() {
    if let Err(err) = ar_api::run().await {
        tracing::error!(error = %err, "ar-api failed");
        std::process::exit(1);
    }
}
