// Prevent console window in addition to Slint window in Windows release builds when, e.g., starting the app via file manager. Ignored on other platforms.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

slint::include_modules!();

mod timer;
mod view;

use std::rc::Rc;

use digital_twin_model::{DigitalTwin, RandomReadingSource, TwinConfig};

use timer::SlintScheduler;

/// Our App struct that holds the UI and the digital twin.
///
/// The twin owns the refresh timer while it is monitoring. The App forwards clicks on the card's
/// button to the twin, and every change of the twin back into the view model.
struct App {
    ui: AppWindow,
    twin: Rc<DigitalTwin<SlintScheduler>>,
}

impl App {
    /// Create a new App struct.
    fn new(config: &TwinConfig) -> anyhow::Result<Self> {
        let ui = AppWindow::new()?;

        let model = ui.global::<ViewModel>();
        model.set_title(config.title.as_str().into());
        model.set_subtitle(config.subtitle.as_str().into());
        model.set_machine_id(config.machine_id.as_str().into());

        let twin = Rc::new(DigitalTwin::new(
            SlintScheduler,
            Box::new(RandomReadingSource::new()),
        ));
        model.set_twin(view::twin_view(&twin.snapshot(), Default::default()));

        // The twin only gets a weak handle to the UI, and the UI only a weak reference to the twin.
        let ui_handle = ui.as_weak();
        twin.set_observer(move |snapshot| {
            let Some(ui) = ui_handle.upgrade() else {
                return;
            };
            let model = ViewModel::get(&ui);

            // Stopping keeps the last reading, and so its time.
            let updated_at = if snapshot.monitoring {
                view::timestamp()
            } else {
                model.get_twin().updated_at
            };

            model.set_twin(view::twin_view(snapshot, updated_at));
        });

        let twin_handle = Rc::downgrade(&twin);
        model.on_toggle_monitoring(move || {
            if let Some(twin) = twin_handle.upgrade() {
                twin.toggle();
            }
        });

        Ok(Self { ui, twin })
    }

    /// Run the UI until the window is closed.
    fn run(&self) -> anyhow::Result<()> {
        self.ui.run()?;

        self.twin.stop();
        Ok(())
    }
}

/// A minimal main function that initializes the App and runs it.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = TwinConfig::load()?;
    log::info!("Starting digital twin {}", config.machine_id);

    let app = App::new(&config)?;

    app.run()
}
