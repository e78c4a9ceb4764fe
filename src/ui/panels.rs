use eframe::egui::{self, Color32, RichText, Ui};

use crate::chart::PlotKind;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – plot selection controls
// ---------------------------------------------------------------------------

/// Render the selection panel: two field dropdowns, the plot-type dropdown
/// and the generate button.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Plot Setup");
    ui.separator();

    // Clone the schema snapshot so we can mutate state inside the combos.
    let columns: Vec<String> = match &state.dataset {
        Some(ds) => ds.column_names().to_vec(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ui.strong("Field 1");
    field_combo(ui, "field_one", &columns, &mut state.selection.field_one, false);
    ui.add_space(6.0);

    ui.strong("Field 2 (optional)");
    field_combo(ui, "field_two", &columns, &mut state.selection.field_two, true);
    ui.add_space(6.0);

    ui.strong("Plot Type");
    egui::ComboBox::from_id_salt("plot_kind")
        .selected_text(state.selection.kind.label())
        .show_ui(ui, |ui: &mut Ui| {
            for kind in PlotKind::ALL {
                if ui
                    .selectable_label(state.selection.kind == kind, kind.label())
                    .clicked()
                {
                    state.selection.kind = kind;
                }
            }
        });

    ui.separator();
    if ui.button("Generate Plot").clicked() {
        state.generate();
    }
}

fn field_combo(
    ui: &mut Ui,
    id: &str,
    columns: &[String],
    field: &mut Option<String>,
    allow_none: bool,
) {
    let current = field.clone().unwrap_or_else(|| "(none)".to_string());
    egui::ComboBox::from_id_salt(id)
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            if allow_none && ui.selectable_label(field.is_none(), "(none)").clicked() {
                *field = None;
            }
            for col in columns {
                if ui
                    .selectable_label(field.as_deref() == Some(col.as_str()), col)
                    .clicked()
                {
                    *field = Some(col.clone());
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!("{} rows × {} columns", ds.rows(), ds.width()));
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

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dataset")
        .add_filter("Supported files", &["csv", "xlsx", "xlsm", "xls"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx", "xlsm", "xls"])
        .pick_file();

    if let Some(path) = file {
        state.load_from_path(&path);
    }
}
