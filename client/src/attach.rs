//! Mounting cell widgets into the server-rendered grid.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every `.slot-grid-item.editable` element gets one [`Cell`] held in an
//! `RwSignal` and one [`SlotGridItem`] mounted in place of its server
//! markup. The functions here are the only writers of that signal: clicks
//! open the editor, menu events choose or dismiss, and the spawned save task
//! reports back through [`finish_save`].
//!
//! ERROR HANDLING
//! ==============
//! All cells are parsed before any is mounted, so a malformed template fails
//! the page as a whole instead of leaving half a grid interactive. Save
//! failures are per-cell and end in an alert.

#[cfg(test)]
#[path = "attach_test.rs"]
mod attach_test;

use std::sync::Arc;

use leptos::prelude::*;
use slots::{AssignRequest, Cell, CellDataset, CellError, SaveOutcome, SaveResolution};

use crate::page::config::PageConfig;
use crate::util::dialog;

pub const EDITABLE_CELL_SELECTOR: &str = ".slot-grid-item.editable";
pub const SAVING_CLASS: &str = "saving";

/// Full attribute name for a dataset key, e.g. `slot-id` -> `data-slot-id`.
pub fn data_attribute(name: &str) -> String {
    format!("data-{name}")
}

/// Collect a cell's dataset through `attr`, which maps full attribute names
/// to their values.
pub fn read_dataset(attr: impl Fn(&str) -> Option<String>) -> CellDataset {
    CellDataset::read(|name| attr(&data_attribute(name)))
}

/// Click on the cell: enter the editor unless a save is in flight.
pub fn open_editor(cell: RwSignal<Cell>) {
    cell.maybe_update(|c| c.begin_edit().is_some());
}

/// Menu closed without a choice.
pub fn dismiss_editor(cell: RwSignal<Cell>) {
    cell.maybe_update(Cell::dismiss);
}

/// Menu choice: move the cell to saving and start the request.
pub fn choose(cell: RwSignal<Cell>, config: Arc<PageConfig>, value: String) {
    let Some(result) = cell.try_update(|c| c.choose(&value)) else {
        return;
    };
    match result {
        Ok(request) => spawn_save(cell, config, request),
        Err(CellError::NotEditing) => log::debug!("choice '{value}' ignored: cell is not editing"),
        Err(e) => log::error!("discarded menu choice: {e}"),
    }
}

/// Apply a finished save to the cell and alert on failure.
pub fn finish_save(cell: RwSignal<Cell>, outcome: SaveOutcome) -> SaveResolution {
    let resolution = cell
        .try_update(|c| c.finish_save(outcome))
        .unwrap_or(SaveResolution::Ignored);
    if let Some(message) = alert_for(&resolution) {
        dialog::alert(&message);
    }
    resolution
}

/// The alert text a resolution calls for, if any.
pub fn alert_for(resolution: &SaveResolution) -> Option<String> {
    match resolution {
        SaveResolution::Reverted(failure) => Some(failure.alert_message()),
        SaveResolution::Committed(_) | SaveResolution::Ignored => None,
    }
}

fn spawn_save(cell: RwSignal<Cell>, config: Arc<PageConfig>, request: AssignRequest) {
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            let outcome = crate::net::api::save_assignment(&config, &request).await;
            finish_save(cell, outcome);
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (cell, config, request);
    }
}

/// Parse and mount every editable cell on the page. Returns the cell count.
///
/// Config blocks are only required when the page has at least one cell.
///
/// # Errors
///
/// [`PageError`](crate::page::config::PageError) for a missing or malformed
/// config block or cell attribute; nothing is mounted in that case.
#[cfg(feature = "csr")]
pub fn attach_cells(document: &web_sys::Document) -> Result<usize, crate::page::config::PageError> {
    use crate::page::config::{PageError, script_blocks};
    use crate::util::dom;

    let hosts = dom::elements::<web_sys::HtmlElement>(document, EDITABLE_CELL_SELECTOR)?;
    if hosts.is_empty() {
        return Ok(0);
    }
    let config = Arc::new(PageConfig::from_blocks(script_blocks(document))?);

    let cells = hosts
        .iter()
        .zip(0u32..)
        .map(|(host, index)| {
            let data = read_dataset(|name| host.get_attribute(name));
            Cell::from_dataset(&data, Arc::clone(&config.options)).map_err(|source| PageError::Cell { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let count = cells.len();
    for (host, cell) in hosts.into_iter().zip(cells) {
        mount_cell(host, cell, Arc::clone(&config));
    }
    Ok(count)
}

#[cfg(feature = "csr")]
fn mount_cell(host: web_sys::HtmlElement, cell: Cell, config: Arc<PageConfig>) {
    use crate::components::slot_grid_item::SlotGridItem;

    let cell = RwSignal::new(cell);
    let on_choose = Callback::new(move |value: String| choose(cell, Arc::clone(&config), value));
    let on_dismiss = Callback::new(move |()| dismiss_editor(cell));

    crate::util::dom::listen(&host, "click", move |_| open_editor(cell));

    host.set_inner_html("");
    let class_host = host.clone();
    leptos::mount::mount_to(host, move || {
        Effect::new(move || {
            let saving = cell.with(Cell::is_saving);
            let _ = class_host.class_list().toggle_with_force(SAVING_CLASS, saving);
        });
        view! { <SlotGridItem cell=cell on_choose=on_choose on_dismiss=on_dismiss/> }
    })
    .forget();
}
