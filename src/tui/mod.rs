//! Interactive terminal client.
//!
//! Hosts the three pages, the search panel and the settings overlay in a
//! ratatui front end. See [`App`] for the key bindings.

mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use std::sync::Arc;

use anyhow::Result;
pub use app::{App, AppOptions};
pub use rendering::Palette;
pub use terminal::TerminalManager;

use crate::api::SearchBackend;
use crate::storage::KeyValueStore;

/// Run the interactive client until the user quits.
///
/// The draw/poll loop blocks, so it runs on a blocking thread while backend
/// calls are spawned on the current runtime.
pub async fn run_interactive(
    backend: Arc<dyn SearchBackend>,
    store: Box<dyn KeyValueStore + Send>,
    options: AppOptions,
) -> Result<()> {
    let runtime = tokio::runtime::Handle::current();
    let mut app = App::new(backend, store, runtime, options);

    tokio::task::spawn_blocking(move || {
        let mut manager = TerminalManager::new()?;
        let res = app.run(manager.terminal_mut());
        manager.restore()?;
        res
    })
    .await?
}
