use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlEdited(url) => {
            state.set_url(url);
            Vec::new()
        }
        Msg::DestinationEdited(destination) => {
            state.set_destination(destination);
            Vec::new()
        }
        Msg::BrowseClicked => vec![Effect::PickFolder],
        Msg::FolderPicked(path) => {
            state.pick_folder(path);
            Vec::new()
        }
        Msg::DownloadClicked => {
            // Inputs go out untouched; the runner owns validation and reports it.
            vec![Effect::StartJob {
                url: state.url().to_string(),
                destination: state.destination_path(),
            }]
        }
        Msg::LogsDrained(messages) => {
            state.append_logs(messages);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
