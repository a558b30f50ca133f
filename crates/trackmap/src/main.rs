//! Fetch a circuit survey, optionally overlay a telemetry frame, and
//! write the composed scene as an SVG document.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use trackmap_io::{SurveyClient, TrackSession};
use trackmap_pipeline::project_frame;
use trackmap_pipeline::types::LiveFrame;
use trackmap_scene::{Scene, to_svg};

/// Fetch a circuit survey and render it as an SVG track map.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Circuit identifier as used by the survey endpoint.
    circuit: u32,

    /// Season year for the survey lookup.
    year: u16,

    /// Output SVG path.
    #[arg(short, long)]
    output: PathBuf,

    /// Telemetry frame JSON to overlay as car markers.
    #[arg(long, value_name = "FILE")]
    frame: Option<PathBuf>,

    /// Survey endpoint base URL.
    #[arg(long, default_value = trackmap_io::DEFAULT_BASE_URL)]
    base_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let client = SurveyClient::with_base_url(&args.base_url);
    let mut session = TrackSession::new();

    let ticket = session.select(args.circuit, args.year);
    let outcome = client
        .fetch_survey(ticket.circuit_id(), ticket.year())
        .await?;
    session.resolve(&ticket, outcome)?;

    let Some(track) = session.track() else {
        tracing::info!(
            circuit = args.circuit,
            year = args.year,
            "no survey data available; nothing to render",
        );
        return Ok(());
    };

    let cars = match &args.frame {
        Some(path) => {
            let frame: LiveFrame = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            project_frame(&frame, track.rotation, track.stroke)?
        }
        None => Vec::new(),
    };

    let scene = Scene::compose(track, cars);
    std::fs::write(&args.output, to_svg(&scene))?;
    tracing::info!(
        path = %args.output.display(),
        cars = scene.cars.len(),
        corners = scene.corners.len(),
        "scene written",
    );

    Ok(())
}
