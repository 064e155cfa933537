//! Base widget trait and the widget tree

use countup_core::events::Event;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct WidgetId;
}

/// Base trait for all widgets
pub trait Widget: Send {
    /// Handle an event
    fn handle_event(&mut self, event: &Event);

    /// Poll widget state after the animation scheduler has ticked
    fn update(&mut self);

    /// The widget's current rendered text content
    fn text(&self) -> String;
}

/// Owns widgets and fans events out to them
pub struct WidgetTree {
    widgets: SlotMap<WidgetId, Box<dyn Widget>>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self {
            widgets: SlotMap::with_key(),
        }
    }

    /// Add a widget to the tree
    pub fn add(&mut self, widget: impl Widget + 'static) -> WidgetId {
        self.widgets.insert(Box::new(widget))
    }

    pub fn get(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets.get(id).map(|w| w.as_ref())
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut (dyn Widget + 'static)> {
        self.widgets.get_mut(id).map(|w| w.as_mut())
    }

    /// Remove a widget from the tree, releasing its subscriptions
    pub fn remove(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        self.widgets.remove(id)
    }

    /// Deliver an event to every widget
    pub fn broadcast(&mut self, event: &Event) {
        for (_, widget) in self.widgets.iter_mut() {
            widget.handle_event(event);
        }
    }

    /// Poll every widget after a scheduler tick
    pub fn update_all(&mut self) {
        for (_, widget) in self.widgets.iter_mut() {
            widget.update();
        }
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}
