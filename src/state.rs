use std::path::Path;

use crate::chart::{build_chart, ChartSpec, Selection};
use crate::data::loader;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until the user loads a file).
    pub dataset: Option<Dataset>,

    /// Current field / plot-kind picks from the side panel.
    pub selection: Selection,

    /// Last generated chart (None until the user hits Generate).
    pub chart: Option<ChartSpec>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load a file and, on success, swap in the new dataset. A failed load
    /// leaves the previous dataset and selection untouched.
    pub fn load_from_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows x {} columns from {}",
                    dataset.rows(),
                    dataset.width(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and repoint the field selections at
    /// its schema. The plot-type pick survives a reload.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        // Both field dropdowns default to the first column.
        let first = dataset.column_names().first().cloned();
        self.selection = Selection {
            field_one: first.clone(),
            field_two: first,
            kind: self.selection.kind,
        };
        self.dataset = Some(dataset);
        self.chart = None;
        self.status_message = None;
    }

    /// Build a chart from the current dataset and selection. Reads state
    /// immutably apart from storing the result.
    pub fn generate(&mut self) {
        self.chart = Some(build_chart(self.dataset.as_ref(), &self.selection));
    }
}
