use anyhow::Result;
use clap::Parser;
use eframe::CreationContext;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use video_uploader::{Cli, VideoUploaderApp};

fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "video_uploader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    let config = Cli::parse().into_config();
    info!(
        "Upload endpoint {}, result page {}",
        config.upload_url, config.result_url
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([640.0, 760.0])
            .with_min_inner_size([460.0, 560.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "YouTube Video Uploader",
        options,
        Box::new(move |cc: &CreationContext| Box::new(VideoUploaderApp::new(cc, config))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run the uploader window: {e}"))
}
