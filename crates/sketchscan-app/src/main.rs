//! Main application entry point.

fn main() {
    env_logger::init();
    log::info!("Starting SketchScan");

    pollster::block_on(sketchscan_app::App::run());
}
