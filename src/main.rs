mod audio;
mod engine;
mod model;
mod ui;

use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([820.0, 560.0])
            .with_title("Jejak Amal Legends"),
        ..Default::default()
    };

    eframe::run_native(
        "Jejak Amal Legends",
        options,
        Box::new(|cc| Ok(Box::new(ui::app::App::new(cc)))),
    )
}
