//! One-shot generation driver.
//!
//! Submits a prompt, waits for the prediction to finish and saves the
//! resulting video next to the working directory.
//!
//! Usage: reelgen [--model <id>] [--guidance <scale>] [--enhance]
//!                [--out <path>] <prompt>...

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reelgen_client::{ClientConfig, Generator};
use reelgen_models::{TuningOptions, VideoModel};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let env_filter = EnvFilter::from_default_env()
        .add_directive("reelgen=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(true).with_target(false))
        .with(env_filter)
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let config = ClientConfig::from_env();
    info!(base_url = %config.base_url, model = %args.model, "Starting generation");

    let generator = Generator::new(config)?;
    let outcome = generator
        .generate(&args.prompt, args.model, args.options)
        .await?;

    info!(id = %outcome.prediction_id, url = %outcome.media_url, "Media ready");

    let written = generator
        .download_to(&outcome.media_url, &args.output)
        .await?;
    info!(path = %args.output.display(), bytes = written, "Done");

    Ok(())
}

struct Args {
    prompt: String,
    model: VideoModel,
    options: TuningOptions,
    output: PathBuf,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut prompt_parts: Vec<String> = Vec::new();
    let mut model = VideoModel::LtxVideo;
    let mut options = TuningOptions::new();
    let mut output = PathBuf::from("output.mp4");

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--model" => {
                let id = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--model requires a value"))?;
                model = VideoModel::resolve(&id)?;
            }
            "--guidance" => {
                let scale: f64 = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--guidance requires a value"))?
                    .parse()?;
                options = options.with_guidance(scale);
            }
            "--enhance" => {
                options = options.with_prompt_enhancement(true);
            }
            "--out" => {
                output = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--out requires a value"))?
                    .into();
            }
            _ => prompt_parts.push(arg),
        }
    }

    let prompt = prompt_parts.join(" ");
    if prompt.trim().is_empty() {
        anyhow::bail!(
            "usage: reelgen [--model <id>] [--guidance <scale>] [--enhance] [--out <path>] <prompt>..."
        );
    }

    Ok(Args {
        prompt,
        model,
        options,
        output,
    })
}
