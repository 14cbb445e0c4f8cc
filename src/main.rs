mod app;
mod data;
mod util;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph dataset file ({"nodes": [...], "links": [...]} JSON). When
    /// absent, datasets come from the built-in mock investigation generator.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Run an investigation query immediately instead of showing the query
    /// screen.
    #[arg(long)]
    query: Option<String>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "riskviz",
        options,
        Box::new(move |cc| Ok(Box::new(app::RiskVizApp::new(cc, args.data, args.query)))),
    )
}
