//! Rendering of one assignment cell.
//!
//! The component only renders [`Cell::view`] and reports menu events; the
//! owner in [`crate::attach`] applies them to the cell and performs the save.

#[cfg(test)]
#[path = "slot_grid_item_test.rs"]
mod slot_grid_item_test;

use leptos::prelude::*;
use slots::render::{LABEL_CLASS, SPINNER_ICON_CLASS};
use slots::{Cell, CellView, EditMenu, Glyph, MenuEntry};

pub const SELECT_CLASS: &str = "slot-grid-item__select";

/// Cell content: at-rest glyphs, the edit menu, or the saving spinner.
#[component]
pub fn SlotGridItem(cell: RwSignal<Cell>, on_choose: Callback<String>, on_dismiss: Callback<()>) -> impl IntoView {
    let select_ref = NodeRef::<leptos::html::Select>::new();

    // Focus the menu as soon as it mounts so a blur means "closed".
    #[cfg(feature = "csr")]
    Effect::new(move || {
        if let Some(select) = select_ref.get() {
            let _ = select.focus();
        }
    });

    move || match cell.with(Cell::view) {
        CellView::AtRest(glyphs) => glyphs.into_iter().map(glyph_view).collect_view().into_any(),
        CellView::Editing(menu) => view! {
            <EditSelect menu=menu select_ref=select_ref on_choose=on_choose on_dismiss=on_dismiss/>
        }
        .into_any(),
        CellView::Saving => view! { <i class=SPINNER_ICON_CLASS></i> }.into_any(),
    }
}

/// Native `<select>` with one `<optgroup>` per menu group.
///
/// A focused, closed select fires `change` on arrow keys, so a value reached
/// by keyboard stepping is only committed on Enter. Pointer picks and
/// picks from the opened dropdown commit on `change`.
#[component]
fn EditSelect(
    menu: EditMenu,
    select_ref: NodeRef<leptos::html::Select>,
    on_choose: Callback<String>,
    on_dismiss: Callback<()>,
) -> impl IntoView {
    let EditMenu { unassigned, groups } = menu;
    let stepping = StoredValue::new(false);

    view! {
        <select
            class=SELECT_CLASS
            node_ref=select_ref
            on:pointerdown=move |_| stepping.set_value(false)
            on:change=move |ev| {
                if !stepping.get_value() {
                    on_choose.run(event_target_value(&ev));
                }
            }
            on:blur=move |_| on_dismiss.run(())
            on:keydown=move |ev: leptos::ev::KeyboardEvent| match key_action(&ev.key(), ev.alt_key()) {
                KeyAction::Dismiss => {
                    ev.prevent_default();
                    on_dismiss.run(());
                }
                KeyAction::Commit => {
                    ev.prevent_default();
                    stepping.set_value(false);
                    on_choose.run(event_target_value(&ev));
                }
                KeyAction::Step => stepping.set_value(true),
                KeyAction::Open => stepping.set_value(false),
                KeyAction::Ignore => {}
            }
        >
            {entry_view(unassigned)}
            {groups
                .into_iter()
                .map(|group| {
                    view! {
                        <optgroup label=group.label>
                            {group.entries.into_iter().map(entry_view).collect_view()}
                        </optgroup>
                    }
                })
                .collect_view()}
        </select>
    }
}

/// What a key press on the focused menu does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyAction {
    Dismiss,
    /// Save the currently shown entry.
    Commit,
    /// Move the shown entry without opening the dropdown.
    Step,
    /// Open the dropdown; the pick inside it commits on `change`.
    Open,
    Ignore,
}

fn key_action(key: &str, alt: bool) -> KeyAction {
    match key {
        "Escape" => KeyAction::Dismiss,
        "Enter" => KeyAction::Commit,
        "ArrowDown" | "ArrowUp" if alt => KeyAction::Open,
        " " | "F4" => KeyAction::Open,
        "ArrowDown" | "ArrowUp" | "ArrowLeft" | "ArrowRight" | "Home" | "End" | "PageUp" | "PageDown" => {
            KeyAction::Step
        }
        _ => KeyAction::Ignore,
    }
}

fn entry_view(entry: MenuEntry) -> impl IntoView {
    view! {
        <option value=entry.value selected=entry.selected>
            {entry.text}
        </option>
    }
}

fn glyph_view(glyph: Glyph) -> AnyView {
    match glyph {
        Glyph::Label(text) => view! { <span class=LABEL_CLASS>{text}</span> }.into_any(),
        Glyph::Separator => view! { <span>" "</span> }.into_any(),
        icon => view! { <i class=icon.icon_class().unwrap_or_default()></i> }.into_any(),
    }
}
