#![forbid(unsafe_code)]

//! In-memory widget models.
//!
//! Each widget holds its displayed state behind interior mutability and
//! exposes two write paths: a notifying one that behaves like user input,
//! and a `*_without_notify` one used by bindings to push model state into
//! the view without re-raising the widget's own change event.
//!
//! Widgets are shared as `Rc<W>` between the host and any bindings.

use std::cell::{Cell, RefCell};

use varbind_core::remap::saturate;

use crate::event::EventSource;

/// A press-to-act button.
#[derive(Debug)]
pub struct Button {
    /// Raised on every click.
    pub on_click: EventSource<()>,
    interactable: Cell<bool>,
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl Button {
    #[must_use]
    pub fn new() -> Self {
        Self {
            on_click: EventSource::new(),
            interactable: Cell::new(true),
        }
    }

    /// Simulate a user click. Ignored while not interactable.
    pub fn click(&self) {
        if self.interactable.get() {
            self.on_click.emit(&());
        }
    }

    #[must_use]
    pub fn is_interactable(&self) -> bool {
        self.interactable.get()
    }

    pub fn set_interactable(&self, interactable: bool) {
        self.interactable.set(interactable);
    }
}

/// A continuous slider over `[min, max]`.
#[derive(Debug)]
pub struct Slider {
    /// Raised with the new value whenever it changes through [`Slider::set_value`].
    pub on_value_changed: EventSource<f32>,
    min: Cell<f32>,
    max: Cell<f32>,
    value: Cell<f32>,
    whole_numbers: Cell<bool>,
}

impl Default for Slider {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl Slider {
    /// Create a slider over `[min, max]` positioned at `min`.
    /// Swapped bounds are reordered.
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            on_value_changed: EventSource::new(),
            min: Cell::new(min),
            max: Cell::new(max),
            value: Cell::new(min),
            whole_numbers: Cell::new(false),
        }
    }

    /// Round every value to the nearest integer.
    #[must_use]
    pub fn with_whole_numbers(self, whole_numbers: bool) -> Self {
        self.whole_numbers.set(whole_numbers);
        self
    }

    #[must_use]
    pub fn value(&self) -> f32 {
        self.value.get()
    }

    #[must_use]
    pub fn min(&self) -> f32 {
        self.min.get()
    }

    #[must_use]
    pub fn max(&self) -> f32 {
        self.max.get()
    }

    /// Normalized position in `[0, 1]`.
    #[must_use]
    pub fn normalized_value(&self) -> f32 {
        let span = self.max.get() - self.min.get();
        if span == 0.0 {
            return 0.0;
        }
        (self.value.get() - self.min.get()) / span
    }

    /// Set the value as user input would. Notifies iff the constrained
    /// value differs from the current one.
    pub fn set_value(&self, value: f32) {
        let constrained = self.constrain(value);
        if constrained == self.value.get() {
            return;
        }
        self.value.set(constrained);
        self.on_value_changed.emit(&constrained);
    }

    /// Set the value without raising `on_value_changed`.
    pub fn set_value_without_notify(&self, value: f32) {
        self.value.set(self.constrain(value));
    }

    fn constrain(&self, value: f32) -> f32 {
        let value = value.max(self.min.get()).min(self.max.get());
        if self.whole_numbers.get() {
            value.round()
        } else {
            value
        }
    }
}

/// An on/off toggle.
#[derive(Debug, Default)]
pub struct Toggle {
    /// Raised with the new state whenever it changes through [`Toggle::set_is_on`].
    pub on_value_changed: EventSource<bool>,
    is_on: Cell<bool>,
}

impl Toggle {
    #[must_use]
    pub fn new(is_on: bool) -> Self {
        Self {
            on_value_changed: EventSource::new(),
            is_on: Cell::new(is_on),
        }
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.is_on.get()
    }

    /// Set the state as user input would. Notifies iff the state changes.
    pub fn set_is_on(&self, is_on: bool) {
        if self.is_on.replace(is_on) != is_on {
            self.on_value_changed.emit(&is_on);
        }
    }

    /// Flip the state, notifying.
    pub fn toggle(&self) {
        self.set_is_on(!self.is_on.get());
    }

    /// Set the state without raising `on_value_changed`.
    pub fn set_is_on_without_notify(&self, is_on: bool) {
        self.is_on.set(is_on);
    }
}

/// A single-line text entry field.
#[derive(Debug, Default)]
pub struct InputField {
    /// Raised with the committed text when editing ends.
    pub on_end_edit: EventSource<String>,
    text: RefCell<String>,
}

impl InputField {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Replace the text and commit it, as a user finishing an edit would.
    /// Always raises `on_end_edit`, even when the text is unchanged.
    pub fn submit(&self, text: impl Into<String>) {
        let text = text.into();
        self.text.replace(text.clone());
        self.on_end_edit.emit(&text);
    }

    /// Replace the text without raising `on_end_edit`.
    pub fn set_text_without_notify(&self, text: impl Into<String>) {
        self.text.replace(text.into());
    }
}

/// Read-only text.
#[derive(Debug, Default)]
pub struct TextLabel {
    text: RefCell<String>,
}

impl TextLabel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.text.replace(text.into());
    }
}

/// A fill-bar image showing a fraction in `[0, 1]`.
#[derive(Debug, Default)]
pub struct FillImage {
    fill_amount: Cell<f32>,
}

impl FillImage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fill_amount(&self) -> f32 {
        self.fill_amount.get()
    }

    /// Set the fill, saturated to `[0, 1]`. NaN reads as empty.
    pub fn set_fill_amount(&self, amount: f32) {
        let amount = if amount.is_nan() {
            0.0
        } else {
            saturate(f64::from(amount)) as f32
        };
        self.fill_amount.set(amount);
    }
}
