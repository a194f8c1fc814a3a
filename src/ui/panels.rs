use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::catalog::Catalog;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selectors and sample table
// ---------------------------------------------------------------------------

/// Render the left panel: dataset and sample-set dropdowns, then the rows
/// behind the current charts.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    // ---- Dataset selector ----
    ui.strong("Dataset");
    let current = state.selection.dataset.clone();
    if let Some(picked) = dropdown(ui, "dataset_select", current.as_deref(), &state.datasets) {
        state.select_dataset(Some(picked));
    }
    ui.add_space(6.0);

    // ---- Sample-set selector ----
    ui.strong("Sample set");
    let current = state.selection.sample_set.clone();
    if let Some(picked) = dropdown(
        ui,
        "sample_set_select",
        current.as_deref(),
        &state.sample_set_choices,
    ) {
        state.select_sample_set(Some(picked));
    }
    if state.selection.dataset.is_some() && state.sample_set_choices.is_empty() {
        ui.label(RichText::new("No sample sets found.").italics());
    }
    ui.separator();

    sample_table(ui, state);
}

/// A combo box over `choices`; returns the entry clicked this frame.
fn dropdown(ui: &mut Ui, id: &str, current: Option<&str>, choices: &[String]) -> Option<String> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .width(ui.available_width())
        .selected_text(current.unwrap_or("Select…"))
        .show_ui(ui, |ui: &mut Ui| {
            for choice in choices {
                if ui
                    .selectable_label(current == Some(choice.as_str()), choice)
                    .clicked()
                {
                    picked = Some(choice.clone());
                }
            }
        });
    picked
}

/// Rows of the loaded table, in file order.
fn sample_table(ui: &mut Ui, state: &AppState) {
    let Some(views) = &state.views else {
        ui.label("No sample set loaded.");
        return;
    };
    let table = &views.table;
    if table.is_empty() {
        ui.label("The read-count table is empty.");
        return;
    }

    let [sample_col, reads_col, bp_col] = table.columns() else {
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(80.0))
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in [sample_col, reads_col, bp_col] {
                header.col(|ui| {
                    ui.strong(*name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.len(), |mut row| {
                let rc = &table.rows[row.index()];
                row.col(|ui| {
                    let color = state.sample_colors.color_for(&rc.sample);
                    ui.label(RichText::new(&rc.sample).color(color));
                });
                row.col(|ui| {
                    ui.label(rc.reads.to_string());
                });
                row.col(|ui| {
                    ui.label(rc.base_pairs.to_string());
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open catalog…").clicked() {
                open_catalog_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(views) = &state.views {
            ui.label(format!(
                "{} samples loaded for {} / {}",
                views.table.len(),
                views.dataset,
                views.sample_set
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_catalog_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dataset catalog")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match Catalog::from_json_file(&path) {
            Ok(catalog) => state.set_catalog(Box::new(catalog)),
            Err(e) => {
                log::error!("Failed to load catalog: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
