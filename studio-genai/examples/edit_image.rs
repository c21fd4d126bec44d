//! Usage: `cargo run --example edit_image -- photo.jpg "turn me into a toy" [style]`

use std::time::Duration;

use studio_genai::types::images::GenerationRequest;
use studio_genai::{read_source_image, CancellationToken, Client, Error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> studio_genai::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("studio_genai=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: edit_image <image> [prompt] [style]");
        return Ok(());
    };
    let prompt = args
        .next()
        .unwrap_or_else(|| "turn this person into a collectible".to_string());

    let source = read_source_image(&path).await?;
    let mut request = GenerationRequest::edit(prompt, source);
    if let Some(style) = args.next() {
        request = request.with_style(style);
    }

    let client = Client::builder()
        .api_key(
            std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("GOOGLE_API_KEY"))
                .unwrap_or_default(),
        )
        .timeout(90)
        .build()?;

    // Give up on the whole call, retries included, after two minutes.
    let cancel = CancellationToken::new();
    let deadline = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(120)).await;
        deadline.cancel();
    });

    match client
        .images()
        .edit_image_with_cancellation(request, &cancel)
        .await
    {
        Ok(image) => {
            let out = format!("edited.{}", image.extension());
            std::fs::write(&out, &image.data)?;
            println!("saved {} bytes to {out}", image.data.len());
        }
        Err(Error::Cancelled) => eprintln!("gave up after two minutes"),
        Err(err) => eprintln!("edit failed ({:?}): {err}", err.kind()),
    }

    Ok(())
}
