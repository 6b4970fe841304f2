use crate::config::AppConfig;
use crate::data::analysis::Analysis;
use crate::data::loader::LoadError;
use crate::data::model::{Dataset, Record};
use crate::ui::export::PendingExport;

// ---------------------------------------------------------------------------
// Session: at most one dataset, with its derived analysis
// ---------------------------------------------------------------------------

/// A loaded upload and everything derived from it.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// File name shown in the top bar.
    pub name: String,
    pub dataset: Dataset,
    pub analysis: Analysis,
}

impl LoadedDataset {
    /// Rows handed to the trend and comparison charts.
    pub fn window(&self) -> &[Record] {
        self.analysis.window(&self.dataset)
    }
}

#[derive(Debug, Clone, Default)]
pub enum Session {
    #[default]
    Empty,
    Loaded(Box<LoadedDataset>),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    pub session: Session,

    /// Upload error shown in the upload panel.
    pub status_message: Option<String>,

    /// Whether files are being dragged over the window.
    pub dragging: bool,

    /// Chart snapshot waiting for the next screenshot event.
    pub pending_export: Option<PendingExport>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            session: Session::Empty,
            status_message: None,
            dragging: false,
            pending_export: None,
        }
    }

    pub fn loaded(&self) -> Option<&LoadedDataset> {
        match &self.session {
            Session::Loaded(loaded) => Some(&**loaded),
            Session::Empty => None,
        }
    }

    /// Replace the current dataset. The analysis is computed before the
    /// swap, so the UI never sees a dataset without its derived values.
    pub fn set_dataset(&mut self, name: &str, dataset: Dataset) {
        let analysis = Analysis::compute(&dataset, &self.config);
        self.session = Session::Loaded(Box::new(LoadedDataset {
            name: name.to_string(),
            dataset,
            analysis,
        }));
        self.status_message = None;
    }

    /// Apply the outcome of an upload. Failures keep the current session.
    pub fn finish_load(&mut self, name: &str, result: Result<Dataset, LoadError>) {
        match result {
            Ok(dataset) => {
                log::info!(
                    "Loaded {name}: {} rows, columns {:?}",
                    dataset.len(),
                    dataset.columns()
                );
                self.set_dataset(name, dataset);
            }
            Err(e) => {
                match &e {
                    LoadError::InvalidFormat { .. } => log::warn!("Rejected upload: {e}"),
                    _ => log::error!("Failed to load {name}: {e}"),
                }
                self.status_message = Some(e.user_message().to_string());
            }
        }
    }

    /// Drop the dataset and return to the upload screen.
    pub fn reset(&mut self) {
        self.session = Session::Empty;
        self.status_message = None;
        self.pending_export = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;

    fn csv(text: &str) -> Dataset {
        parse_csv(text.as_bytes()).unwrap()
    }

    #[test]
    fn load_then_reset() {
        let mut state = AppState::default();
        assert!(state.loaded().is_none());

        state.finish_load("a.csv", Ok(csv("city,sales\nNY,10\n")));
        let loaded = state.loaded().unwrap();
        assert_eq!(loaded.name, "a.csv");
        assert_eq!(loaded.analysis.stats.row_count, 1);

        state.reset();
        assert!(matches!(state.session, Session::Empty));
    }

    #[test]
    fn new_upload_replaces_previous_dataset() {
        let mut state = AppState::default();
        state.finish_load("a.csv", Ok(csv("city,sales\nNY,10\nLA,5\n")));
        state.finish_load("b.csv", Ok(csv("kind,weight\nx,1.5\n")));

        let loaded = state.loaded().unwrap();
        assert_eq!(loaded.name, "b.csv");
        assert_eq!(loaded.dataset.len(), 1);
        assert_eq!(loaded.analysis.columns.numeric, vec!["weight"]);
    }

    #[test]
    fn failed_upload_sets_message_and_keeps_session() {
        let mut state = AppState::default();
        state.finish_load("a.csv", Ok(csv("v\n1\n")));

        let err = crate::data::loader::load_bytes("notes.txt", None, b"v\n2\n").unwrap_err();
        state.finish_load("notes.txt", Err(err));

        assert_eq!(state.status_message.as_deref(), Some("Please upload a valid CSV file."));
        assert_eq!(state.loaded().unwrap().name, "a.csv");
    }

    #[test]
    fn empty_upload_loads_with_empty_analysis() {
        let mut state = AppState::default();
        state.finish_load("empty.csv", Ok(csv("a,b\n")));

        let loaded = state.loaded().unwrap();
        assert_eq!(loaded.analysis.stats.row_count, 0);
        assert!(loaded.analysis.distribution.is_empty());
        assert!(loaded.window().is_empty());
    }
}
