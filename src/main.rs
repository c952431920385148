use anyhow::{Result, anyhow};
use auto_sales_dashboard::app::DashboardApp;
use auto_sales_dashboard::config::DashboardConfig;
use auto_sales_dashboard::data::loader;
use auto_sales_dashboard::ui::panels::DASHBOARD_TITLE;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_args(std::env::args().skip(1))?;

    // The dataset must be in memory before the first frame; there is no retry.
    let dataset = loader::load(&config.source).inspect_err(|e| log::error!("{e}"))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        DASHBOARD_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(dataset)))),
    )
    .map_err(|e| anyhow!("running dashboard window: {e}"))
}
