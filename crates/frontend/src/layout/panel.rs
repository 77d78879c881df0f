//! Side panel registry and selection logic.
//!
//! The selection is a plain value owned by `ViewerContext` rather than a
//! free global, so the transition rules stay testable without a DOM.

/// The two registered side panels, in sidebar order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Model,
    Console,
}

impl Panel {
    pub const ALL: [Panel; 2] = [Panel::Model, Panel::Console];

    pub fn label(self) -> &'static str {
        match self {
            Panel::Model => "Model",
            Panel::Console => "Console",
        }
    }

    pub fn menu_id(self) -> &'static str {
        match self {
            Panel::Model => "menu-model",
            Panel::Console => "menu-console",
        }
    }
}

/// Which panel, if any, is open. At most one pane is ever visible; the
/// visible pane's label carries the selected marker and no other does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelSelection(Option<Panel>);

impl PanelSelection {
    /// Toggling the selected panel closes it; toggling any other panel
    /// closes the current one (if any) and opens the new one.
    pub fn toggle(&mut self, panel: Panel) {
        self.0 = if self.0 == Some(panel) {
            None
        } else {
            Some(panel)
        };
    }

    pub fn selected(&self) -> Option<Panel> {
        self.0
    }

    pub fn is_selected(&self, panel: Panel) -> bool {
        self.0 == Some(panel)
    }
}
