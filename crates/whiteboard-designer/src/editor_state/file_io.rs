//! Loading, saving and switching diagrams for editor state.

use whiteboard_core::constants::DEFAULT_DIAGRAM_NAME;
use whiteboard_core::{EditorEvent, Result, StorageEvent};

use super::EditorState;
use crate::canvas_state::EditMode;
use crate::model::{Diagram, DiagramId};
use crate::store::DiagramStore;

impl EditorState {
    /// Start editing a new empty diagram using the configured grid.
    pub fn new_diagram(&mut self, name: impl Into<String>) {
        let mut diagram = Diagram::new(name);
        diagram.grid_size = self.config.grid.size;
        diagram.snap_to_grid = self.config.grid.snap_enabled;
        self.load_diagram(diagram);
    }

    /// Replace the edited diagram.
    ///
    /// History, selection, any pending connector and the view are reset.
    pub fn load_diagram(&mut self, diagram: Diagram) {
        self.controller.abort(&mut self.document, &mut self.canvas);
        self.document.replace_diagram(diagram);
        self.canvas.apply_diagram_grid(self.document.diagram());
        self.canvas.viewport.reset();
        self.set_mode(EditMode::Select);
        self.clear_selection();
        self.is_modified = false;
        self.publish_transform();
        self.publish_grid();
    }

    /// Save the edited diagram to `store`.
    ///
    /// # Returns
    /// The copy that was stored, with its update time stamped.
    pub async fn save_to(&mut self, store: &dyn DiagramStore) -> Result<Diagram> {
        match store.save(self.document.diagram()).await {
            Ok(stored) => {
                self.is_modified = false;
                self.publish(EditorEvent::Storage(StorageEvent::Saved {
                    diagram_id: stored.id.as_uuid(),
                }));
                Ok(stored)
            }
            Err(e) => {
                tracing::error!("Failed to save diagram: {}", e);
                self.publish_storage_failure(e.to_string());
                Err(e)
            }
        }
    }

    /// Load diagram `id` from `store` into the editor.
    ///
    /// # Returns
    /// `false` if the store has no such diagram; the editor is left unchanged.
    pub async fn open_from(&mut self, store: &dyn DiagramStore, id: DiagramId) -> Result<bool> {
        let loaded = match store.load(id).await {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::error!("Failed to load diagram {}: {}", id, e);
                self.publish_storage_failure(e.to_string());
                return Err(e);
            }
        };
        let Some(diagram) = loaded else {
            tracing::warn!("Diagram {} not found", id);
            return Ok(false);
        };
        self.load_diagram(diagram);
        self.publish(EditorEvent::Storage(StorageEvent::Loaded {
            diagram_id: id.as_uuid(),
        }));
        Ok(true)
    }

    /// Delete diagram `id` from `store`. Deleting the diagram being edited
    /// starts a new untitled one.
    pub async fn delete_from(&mut self, store: &dyn DiagramStore, id: DiagramId) -> Result<()> {
        if let Err(e) = store.delete(id).await {
            self.publish_storage_failure(e.to_string());
            return Err(e);
        }
        self.publish(EditorEvent::Storage(StorageEvent::Deleted {
            diagram_id: id.as_uuid(),
        }));
        if self.document.diagram().id == id {
            self.new_diagram(DEFAULT_DIAGRAM_NAME);
        }
        Ok(())
    }

    fn publish_storage_failure(&self, reason: String) {
        self.publish(EditorEvent::Storage(StorageEvent::Failed { reason }));
    }
}
