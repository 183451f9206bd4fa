use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

use eframe::egui;
use grabber_core::{log_queue, update, AppState, AppViewModel, Console, LogRelay, Msg};
use grabber_logging::{grab_error, grab_info, grab_warn};

use super::config::{self, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::{logging, ui};

pub fn run_app() -> eframe::Result {
    let (config, config_error) = match config::load_config(Path::new(CONFIG_FILENAME)) {
        Ok(config) => (config, None),
        Err(err) => (config::AppConfig::default(), Some(err)),
    };

    logging::initialize(config.log_destination, config.level_filter());
    if let Some(err) = config_error {
        grab_warn!("Using default configuration: {}", err);
    }
    grab_info!("Starting with {:?}", config);

    // The queue belongs to the app: the runner gets the sender, the UI loop the relay.
    let (log_tx, relay) = log_queue();
    let relay = relay.with_poll_interval(config.poll_interval());
    let effects = match EffectRunner::new(&config, log_tx) {
        Ok(effects) => effects,
        Err(err) => {
            grab_error!("Failed to start job runner: {}", err);
            return Err(eframe::Error::AppCreation(Box::new(err)));
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(ui::constants::WINDOW_TITLE)
            .with_inner_size([ui::constants::WINDOW_WIDTH, ui::constants::WINDOW_HEIGHT])
            .with_min_inner_size([520.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        ui::constants::WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            ui::layout::apply_theme(&cc.egui_ctx);
            Ok(Box::new(GrabberApp::new(effects, relay)))
        }),
    )
}

struct GrabberApp {
    state: AppState,
    view: AppViewModel,
    url_input: String,
    destination_input: String,
    effects: EffectRunner,
    relay: LogRelay,
    last_poll: Instant,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
}

impl GrabberApp {
    fn new(effects: EffectRunner, relay: LogRelay) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            url_input: String::new(),
            destination_input: String::new(),
            effects,
            relay,
            last_poll: Instant::now(),
            msg_tx,
            msg_rx,
        }
    }

    /// One relay tick: moves everything queued so far into the console.
    fn poll_relay(&mut self) {
        if self.last_poll.elapsed() < self.relay.poll_interval() {
            return;
        }
        self.last_poll = Instant::now();
        let drained = self.relay.drain();
        let msg = if drained.is_empty() {
            Msg::Tick
        } else {
            Msg::LogsDrained(drained)
        };
        let _ = self.msg_tx.send(msg);
    }

    fn process_pending_messages(&mut self) {
        let inbox: Vec<Msg> = self.msg_rx.try_iter().collect();
        for msg in inbox {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        if matches!(&msg, Msg::LogsDrained(batch) if !batch.is_empty()) {
            // The view is rebuilt below; dropping its snapshot lets the console grow in place.
            self.view.console = Console::default();
        }
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
            self.url_input.clone_from(&self.view.url);
            self.destination_input.clone_from(&self.view.destination);
        }
        self.state = state;
        self.effects.enqueue(effects, &self.msg_tx);
    }
}

impl eframe::App for GrabberApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_relay();
        self.process_pending_messages();

        let ui_msgs = ui::layout::show(
            ctx,
            &self.view,
            &mut self.url_input,
            &mut self.destination_input,
        );
        for msg in ui_msgs {
            let _ = self.msg_tx.send(msg);
        }
        self.process_pending_messages();

        // Reschedules the relay tick even when the user is idle.
        ctx.request_repaint_after(self.relay.poll_interval());
    }
}
