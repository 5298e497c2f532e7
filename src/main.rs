#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = sahayak::run().await {
        eprintln!("sahayak fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
