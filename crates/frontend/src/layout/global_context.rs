use std::sync::Arc;

use leptos::prelude::*;
use ldraw::document::MultipartDocument;

use crate::layout::panel::{Panel, PanelSelection};

/// A successfully loaded model together with its derived step count.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedModel {
    pub document: MultipartDocument,
    pub name: String,
    pub step_count: usize,
}

/// Process-wide viewer state, provided once via context at startup.
#[derive(Clone, Copy)]
pub struct ViewerContext {
    pub panels: RwSignal<PanelSelection>,
    pub model: RwSignal<Option<Arc<LoadedModel>>>,
    /// 1-based current build step; stays within 1..=step_count.
    pub current_step: RwSignal<usize>,
}

impl ViewerContext {
    pub fn new() -> Self {
        Self {
            panels: RwSignal::new(PanelSelection::default()),
            model: RwSignal::new(None),
            current_step: RwSignal::new(1),
        }
    }

    pub fn toggle_panel(&self, panel: Panel) {
        self.panels.update(|selection| selection.toggle(panel));
        leptos::logging::log!(
            "panel toggled: {:?}",
            self.panels.get_untracked().selected()
        );
    }

    pub fn is_panel_selected(&self, panel: Panel) -> bool {
        self.panels.get().is_selected(panel)
    }

    /// Replace the current model and show its finished state.
    pub fn set_model(&self, document: MultipartDocument, name: String) {
        let step_count = document.body.step_count();
        self.model.set(Some(Arc::new(LoadedModel {
            document,
            name,
            step_count,
        })));
        self.current_step.set(step_count);
    }

    pub fn step_count(&self) -> usize {
        self.model
            .get()
            .map(|model| model.step_count)
            .unwrap_or(1)
    }

    pub fn set_step(&self, step: usize) {
        let count = self
            .model
            .get_untracked()
            .map(|model| model.step_count)
            .unwrap_or(1);
        self.current_step.set(step.clamp(1, count));
    }

    /// Advance one step, wrapping back to the first past the end.
    pub fn next_step(&self) {
        let count = self
            .model
            .get_untracked()
            .map(|model| model.step_count)
            .unwrap_or(1);
        let current = self.current_step.get_untracked();
        self.current_step.set(next_step(current, count));
    }
}

impl Default for ViewerContext {
    fn default() -> Self {
        Self::new()
    }
}

fn next_step(current: usize, count: usize) -> usize {
    if current >= count {
        1
    } else {
        current + 1
    }
}
