//! Scripted screening sessions.
//!
//! A script replays what a patient does in the portal: filling in steps,
//! moving between them, and drawing on the body chart. The `screen` and
//! `classify` commands feed one through a [`ScriptRunner`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use physio_bodymap::editor::PainMapEditor;
use physio_bodymap::transform::{PointerEvent, ScreenTransform};
use physio_core::models::body_map::{BodyView, SensationType};
use physio_core::models::classification::ClassificationResult;
use physio_core::models::geometry::{CanvasSize, Point};
use physio_core::models::screening::StepData;
use physio_screening::classifier;
use physio_screening::session::ScreeningSession;
use physio_screening::submission::SubmissionReceipt;
use physio_storage::entities::EntityStore;

use crate::config::PhysioConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    pub actions: Vec<ScriptAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    /// Replace one step's data.
    Update { data: StepData },
    Next,
    Previous,
    /// Mount the body chart at `(left, top)`, `width` viewport pixels wide.
    Mount { width: f64, left: f64, top: f64 },
    Unmount,
    View { view: BodyView },
    Sensation { sensation_type: SensationType },
    Intensity { value: u8 },
    Pointer { event: PointerEvent },
    /// A vertex given directly in canvas units.
    Vertex { x: f64, y: f64 },
    Finish,
    Cancel,
    ClickAt { x: f64, y: f64 },
    Undo,
    ResetAll,
    /// Store the drawn areas as the pain-mapping step.
    SavePainMap {
        #[serde(default)]
        narrative: String,
    },
}

pub fn load_script(path: &Path) -> eyre::Result<Script> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read script at {}: {e}", path.display()))?;
    let script = serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("invalid script {}: {e}", path.display()))?;
    Ok(script)
}

/// A screening session plus the body-chart editor driving its pain step.
#[derive(Debug)]
pub struct ScriptRunner {
    session: ScreeningSession,
    editor: PainMapEditor,
    canvas: CanvasSize,
    surface: Option<ScreenTransform>,
}

impl ScriptRunner {
    pub fn new(config: &PhysioConfig) -> Self {
        let mut session = ScreeningSession::new();
        if let Some(timeout) = config.submit_timeout() {
            session = session.with_timeout(timeout);
        }
        let mut editor = PainMapEditor::with_history_limit(config.history_limit);
        editor.set_intensity(config.default_intensity);
        Self {
            session,
            editor,
            canvas: config.canvas,
            surface: None,
        }
    }

    pub fn session(&self) -> &ScreeningSession {
        &self.session
    }

    pub fn editor(&self) -> &PainMapEditor {
        &self.editor
    }

    pub fn run(&mut self, script: &Script) -> eyre::Result<()> {
        for (index, action) in script.actions.iter().enumerate() {
            self.apply(action)
                .map_err(|e| eyre::eyre!("action {} ({action:?}) failed: {e}", index + 1))?;
        }
        Ok(())
    }

    pub fn apply(&mut self, action: &ScriptAction) -> eyre::Result<()> {
        match action {
            ScriptAction::Update { data } => self.session.update_step_data(data.clone())?,
            ScriptAction::Next => {
                self.session.next()?;
            }
            ScriptAction::Previous => {
                self.session.previous()?;
            }
            ScriptAction::Mount { width, left, top } => {
                self.surface = Some(ScreenTransform::scaled(
                    width / self.canvas.width,
                    *left,
                    *top,
                ));
            }
            ScriptAction::Unmount => self.surface = None,
            ScriptAction::View { view } => self.editor.set_view(*view),
            ScriptAction::Sensation { sensation_type } => {
                self.editor.select_sensation_type(*sensation_type)
            }
            ScriptAction::Intensity { value } => self.editor.set_intensity(*value),
            ScriptAction::Pointer { event } => {
                self.editor.pointer_down(event, self.surface.as_ref());
            }
            ScriptAction::Vertex { x, y } => {
                let point = Point::new(*x, *y);
                if !self.canvas.contains(point) {
                    tracing::warn!(x, y, "vertex outside the body chart");
                }
                self.editor.push_point(point);
            }
            ScriptAction::Finish => {
                if self.editor.finish_shape().is_none() {
                    tracing::debug!("shape discarded");
                }
            }
            ScriptAction::Cancel => self.editor.cancel_shape(),
            ScriptAction::ClickAt { x, y } => {
                self.editor.click_at(Point::new(*x, *y));
            }
            ScriptAction::Undo => {
                self.editor.undo();
            }
            ScriptAction::ResetAll => self.editor.reset_all(),
            ScriptAction::SavePainMap { narrative } => {
                let mapping = self.editor.to_pain_mapping(narrative.clone());
                self.session.update_step_data(StepData::PainAreas(mapping))?;
            }
        }
        Ok(())
    }

    /// Classify the data collected so far without writing anything.
    pub fn classify(&self) -> ClassificationResult {
        classifier::classify(self.session.data())
    }

    pub async fn submit(&mut self, store: &dyn EntityStore) -> eyre::Result<SubmissionReceipt> {
        let receipt = self.session.submit(store).await?;
        Ok(receipt)
    }
}
