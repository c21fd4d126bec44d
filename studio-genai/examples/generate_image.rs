//! Usage: `cargo run --example generate_image -- "a lighthouse in a storm" [style] [aspect-ratio]`

use studio_genai::types::images::GenerationRequest;
use studio_genai::{Client, ErrorKind};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> studio_genai::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("studio_genai=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let prompt = args
        .next()
        .unwrap_or_else(|| "a lighthouse in a storm".to_string());
    let mut request = GenerationRequest::new(prompt);
    if let Some(style) = args.next() {
        request = request.with_style(style);
    }
    if let Some(aspect_ratio) = args.next() {
        request = request.with_aspect_ratio(aspect_ratio);
    }

    let client = Client::from_env()?;
    match client.images().generate_image(request).await {
        Ok(image) => {
            let path = format!("generated.{}", image.extension());
            std::fs::write(&path, &image.data)?;
            println!("saved {} bytes to {path}", image.data.len());
            if let Some(text) = image.text {
                println!("model said: {text}");
            }
        }
        Err(err) if err.kind() == ErrorKind::QuotaExceeded => {
            eprintln!("rate limited, try again later: {err}");
        }
        Err(err) => eprintln!("generation failed: {err}"),
    }

    Ok(())
}
