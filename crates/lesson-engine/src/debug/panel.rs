use std::collections::HashMap;
use std::fmt;

use crate::input::Key;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlValue {
    Bool(bool),
    Number { value: f32, min: f32, max: f32, step: f32 },
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlValue::Bool(v) => write!(f, "{v}"),
            ControlValue::Number { value, .. } => write!(f, "{value:.2}"),
        }
    }
}

#[derive(Debug, Clone)]
enum Binding {
    Toggle(String),
    Nudge(String, i32),
}

/// One labelled entry on a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub label: String,
    pub value: ControlValue,
}

#[derive(Debug, Clone)]
pub struct DebugPanel {
    name: String,
    controls: Vec<Control>,
    bindings: HashMap<Key, Binding>,
}

impl DebugPanel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controls: Vec::new(),
            bindings: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Adds a checkbox-style control. Re-adding a label replaces it.
    pub fn add_bool(&mut self, label: impl Into<String>, initial: bool) -> &mut Self {
        self.insert(label.into(), ControlValue::Bool(initial))
    }

    /// Adds a slider-style control; `initial` is clamped into `min..=max`.
    pub fn add_number(
        &mut self,
        label: impl Into<String>,
        initial: f32,
        min: f32,
        max: f32,
        step: f32,
    ) -> &mut Self {
        let value = initial.clamp(min, max);
        self.insert(label.into(), ControlValue::Number { value, min, max, step })
    }

    fn insert(&mut self, label: String, value: ControlValue) -> &mut Self {
        match self.controls.iter_mut().find(|c| c.label == label) {
            Some(existing) => existing.value = value,
            None => self.controls.push(Control { label, value }),
        }
        self
    }

    fn value_mut(&mut self, label: &str) -> Option<&mut ControlValue> {
        self.controls
            .iter_mut()
            .find(|c| c.label == label)
            .map(|c| &mut c.value)
    }

    pub fn bool(&self, label: &str) -> Option<bool> {
        match self.controls.iter().find(|c| c.label == label)?.value {
            ControlValue::Bool(v) => Some(v),
            ControlValue::Number { .. } => None,
        }
    }

    pub fn number(&self, label: &str) -> Option<f32> {
        match self.controls.iter().find(|c| c.label == label)?.value {
            ControlValue::Number { value, .. } => Some(value),
            ControlValue::Bool(_) => None,
        }
    }

    /// Returns `false` if no boolean control has that label.
    pub fn set_bool(&mut self, label: &str, value: bool) -> bool {
        match self.value_mut(label) {
            Some(ControlValue::Bool(v)) => {
                *v = value;
                true
            }
            _ => false,
        }
    }

    /// Flips a boolean control and returns its new value.
    pub fn toggle(&mut self, label: &str) -> Option<bool> {
        match self.value_mut(label) {
            Some(ControlValue::Bool(v)) => {
                *v = !*v;
                Some(*v)
            }
            _ => None,
        }
    }

    /// Sets a numeric control, clamped to its range. Returns the stored value.
    pub fn set_number(&mut self, label: &str, value: f32) -> Option<f32> {
        match self.value_mut(label) {
            Some(ControlValue::Number { value: v, min, max, .. }) => {
                *v = value.clamp(*min, *max);
                Some(*v)
            }
            _ => None,
        }
    }

    /// Moves a numeric control by `steps` increments of its step size.
    pub fn nudge(&mut self, label: &str, steps: i32) -> Option<f32> {
        let current = match self.value_mut(label)? {
            ControlValue::Number { value, step, .. } => *value + *step * steps as f32,
            ControlValue::Bool(_) => return None,
        };
        self.set_number(label, current)
    }

    /// Binds `key` to toggle the boolean control `label`.
    pub fn bind_key(&mut self, key: Key, label: impl Into<String>) -> &mut Self {
        self.bindings.insert(key, Binding::Toggle(label.into()));
        self
    }

    /// Binds `key` to move the numeric control `label` by `steps` increments.
    pub fn bind_nudge(&mut self, key: Key, label: impl Into<String>, steps: i32) -> &mut Self {
        self.bindings.insert(key, Binding::Nudge(label.into(), steps));
        self
    }

    /// Applies a key press. Returns the changed control and its new value.
    pub fn handle_key(&mut self, key: Key) -> Option<(&str, ControlValue)> {
        let label = match self.bindings.get(&key)?.clone() {
            Binding::Toggle(label) => {
                self.toggle(&label)?;
                label
            }
            Binding::Nudge(label, steps) => {
                self.nudge(&label, steps)?;
                label
            }
        };
        let control = self.controls.iter().find(|c| c.label == label)?;
        log::debug!("{}: {} = {}", self.name, control.label, control.value);
        Some((control.label.as_str(), control.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_stay_in_range() {
        let mut panel = DebugPanel::new("cube");
        panel.add_number("speed", 5.0, 0.0, 2.0, 0.5);

        assert_eq!(panel.number("speed"), Some(2.0));
        assert_eq!(panel.nudge("speed", -1), Some(1.5));
        assert_eq!(panel.set_number("speed", -3.0), Some(0.0));
        assert_eq!(panel.bool("speed"), None);
    }

    #[test]
    fn bound_key_toggles_its_control() {
        let mut panel = DebugPanel::new("cube");
        panel.add_bool("wireframe", false).bind_key(Key::W, "wireframe");

        assert_eq!(panel.handle_key(Key::W), Some(("wireframe", ControlValue::Bool(true))));
        assert_eq!(panel.bool("wireframe"), Some(true));
        assert_eq!(panel.handle_key(Key::Q), None);
    }

    #[test]
    fn key_bound_to_missing_control_is_ignored() {
        let mut panel = DebugPanel::new("cube");
        panel.add_number("speed", 1.0, 0.0, 2.0, 0.1).bind_key(Key::S, "speed");

        assert_eq!(panel.handle_key(Key::S), None);
        assert_eq!(panel.number("speed"), Some(1.0));
    }

    #[test]
    fn nudge_keys_step_a_number_within_range() {
        let mut panel = DebugPanel::new("cube");
        panel
            .add_number("speed", 1.0, 0.0, 1.5, 0.25)
            .bind_nudge(Key::ArrowUp, "speed", 1)
            .bind_nudge(Key::ArrowDown, "speed", -1);

        let (label, value) = panel.handle_key(Key::ArrowUp).expect("bound");
        assert_eq!(label, "speed");
        assert!(matches!(value, ControlValue::Number { value, .. } if value == 1.25));

        panel.handle_key(Key::ArrowUp);
        panel.handle_key(Key::ArrowUp);
        assert_eq!(panel.number("speed"), Some(1.5));

        panel.handle_key(Key::ArrowDown);
        assert_eq!(panel.number("speed"), Some(1.25));
    }

    #[test]
    fn nudge_key_on_a_bool_is_ignored() {
        let mut panel = DebugPanel::new("cube");
        panel.add_bool("axes", false).bind_nudge(Key::ArrowUp, "axes", 1);

        assert_eq!(panel.handle_key(Key::ArrowUp), None);
        assert_eq!(panel.bool("axes"), Some(false));
    }

    #[test]
    fn re_adding_a_label_replaces_it() {
        let mut panel = DebugPanel::new("cube");
        panel.add_bool("axes", false).add_bool("axes", true);
        assert_eq!(panel.controls().len(), 1);
        assert_eq!(panel.bool("axes"), Some(true));
    }
}
