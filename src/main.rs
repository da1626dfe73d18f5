#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = splash::SplashConfig::load_or_default(&splash::config::default_config_path());
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([320.0, 240.0])
            .with_title("Splash"),
        ..Default::default()
    };
    eframe::run_native(
        "Splash",
        native_options,
        Box::new(|cc| Ok(Box::new(splash::SplashApp::new(cc, config)))),
    )
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let config = splash::SplashConfig::default();
    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async move {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id(&config.mount_id)
            .unwrap_or_else(|| panic!("Failed to find mount element #{}", config.mount_id))
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("Mount element was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(splash::SplashApp::new(cc, config)))),
            )
            .await;

        if let Err(err) = start_result {
            log::error!("Failed to start splash: {:?}", err);
        }
    });
}
