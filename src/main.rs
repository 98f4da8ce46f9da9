use crossing::{ConsoleSink, IntersectionBuilder};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout carries only the signal display.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut intersection = IntersectionBuilder::new()
        .green_time_a(15)
        .green_time_b(10)
        .round_limit(3)
        .sink(ConsoleSink)
        .build()?;

    intersection.start()?;
    let status = intersection.run().await;

    let snapshot = intersection.snapshot().to_json()?;
    info!(?status, %snapshot, "controller stopped");
    Ok(())
}
