//! Sigil Studio — interactive showcase for the widget toolkit.
//!
//! Opens a window with a control panel; every interaction reports
//! through the callback queue and is logged to the terminal.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use log::info;

use sigil_engine::core::{App, AppControl};
use sigil_engine::device::GpuInit;
use sigil_engine::logging::{init_logging, LoggingConfig};
use sigil_engine::surface::NativeSurface;
use sigil_engine::window::{Runtime, SurfaceConfig};
use sigil_ui::prelude::*;

// Callback ids for the demo controls.
const CB_GREET: u32 = 1;
const CB_COUNT: u32 = 2;
const CB_QUIT: u32 = 3;

struct Studio {
    gui: Option<Gui>,
    clicks: u32,
}

impl Studio {
    fn new() -> Self {
        Self { gui: None, clicks: 0 }
    }

    fn build_ui(&mut self, gui: &mut Gui) {
        let mut panel = Panel::new(Rect::new(20.0, 20.0, 360.0, 220.0));

        panel.add(
            Label::new("SIGIL STUDIO")
                .with_position(Vec2::new(12.0, 10.0))
                .with_text_size(18.0),
        );
        panel.add(
            Label::new("Click around; watch the terminal.")
                .with_position(Vec2::new(12.0, 40.0)),
        );

        panel.add(
            Button::new("Greet")
                .with_position(Vec2::new(12.0, 80.0))
                .with_size(Vec2::new(100.0, 28.0))
                .with_callback_id(CB_GREET),
        );
        panel.add(
            Button::new("Count")
                .with_position(Vec2::new(124.0, 80.0))
                .with_size(Vec2::new(100.0, 28.0))
                .with_callback_id(CB_COUNT),
        );
        panel.add(
            Button::new("Quit")
                .with_position(Vec2::new(236.0, 80.0))
                .with_size(Vec2::new(100.0, 28.0))
                .with_callback_id(CB_QUIT),
        );

        gui.add(panel);

        gui.add(
            Label::new("Click counts are reported in the log.")
                .with_position(Vec2::new(32.0, 260.0)),
        );
    }
}

impl App for Studio {
    fn on_surface_ready(&mut self, surface: Rc<RefCell<NativeSurface>>) -> Result<()> {
        let mut gui = Gui::shared(surface);
        self.build_ui(&mut gui);

        // Set SIGIL_SYNC_HANDLERS=1 to see synchronous delivery instead of
        // the polled queue. Registered handlers receive every callback the
        // moment it is emitted; poll_callback then stays empty.
        if std::env::var_os("SIGIL_SYNC_HANDLERS").is_some() {
            gui.register_handler(|cb| {
                info!("handler: {:?} from widget id {}", cb.signal, cb.id);
            });
        }

        self.gui = Some(gui);
        Ok(())
    }

    fn on_frame(&mut self) -> AppControl {
        let Some(gui) = self.gui.as_mut() else {
            return AppControl::Continue;
        };

        while let Some(raw) = gui.poll_event() {
            if matches!(raw, sigil_engine::input::RawEvent::CloseRequested) {
                gui.close();
            }
            gui.handle_event(raw);
        }

        gui.clear(Color::from_straight(0.10, 0.10, 0.12, 1.0));
        gui.draw_gui();
        if let Err(err) = gui.display() {
            log::error!("present failed: {err:#}");
            return AppControl::Exit;
        }

        let mut exit = false;
        while let Some(cb) = gui.poll_callback() {
            match (cb.id, cb.signal) {
                (CB_GREET, Signal::Clicked) => {
                    info!("greetings from sigil studio");
                }
                (CB_COUNT, Signal::Clicked) => {
                    self.clicks += 1;
                    info!("counted {} clicks", self.clicks);
                }
                (CB_COUNT, Signal::DoubleClicked) => {
                    info!("double click counts double");
                    self.clicks += 1;
                }
                (CB_QUIT, Signal::Clicked) => {
                    exit = true;
                }
                _ => {}
            }
        }

        if exit || !gui.is_open() {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    println!();
    println!("  ┌──────────────────────────────────────┐");
    println!("  │           SIGIL STUDIO v0.1          │");
    println!("  │   wgpu renderer  ·  sigil-ui tree    │");
    println!("  └──────────────────────────────────────┘");
    println!();

    Runtime::run(
        SurfaceConfig {
            title: "Sigil Studio".into(),
            initial_size: (820, 560),
            resizable: true,
        },
        GpuInit::default(),
        Studio::new(),
    )
}
