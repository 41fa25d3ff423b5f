#![forbid(unsafe_code)]

//! Concrete widget adapters and binding aliases.
//!
//! | Adapter | Model | View | Widget | Direction |
//! |---------|-------|------|--------|-----------|
//! | [`ButtonAdapter`] | `i32`, `i64` | `()` | [`Button`] | view → model (increment) |
//! | [`SliderAdapter`] | `f32` | `f32` | [`Slider`] | both |
//! | [`ToggleAdapter`] | `bool` | `bool` | [`Toggle`] | both, optional negation |
//! | [`InputFieldAdapter`] | `i32`, `i64`, `f32` | `String` | [`InputField`] | both, parse falls back to zero |
//! | [`TextLabelAdapter`] | `i32`, `i64`, `f32` | `String` | [`TextLabel`] | model → view |
//! | [`FillAdapter`] | `f32`, `i32`, `i64` | `f32` in `[0, 1]` | [`FillImage`] | model → view |

use std::marker::PhantomData;
use std::rc::Rc;
use std::str::FromStr;

use varbind_core::{RemapScalar, RemapSettings, VariableValue};

use crate::binding::{ComponentBinding, WidgetAdapter};
use crate::event::ListenerId;
use crate::widgets::{Button, FillImage, InputField, Slider, TextLabel, Toggle};

// ── Model capabilities ────────────────────────────────────────────────

/// Integer kinds a button can step.
pub trait StepModel: VariableValue {
    const ONE: Self;

    fn saturating_step(self, by: Self) -> Self;
}

impl StepModel for i32 {
    const ONE: Self = 1;

    fn saturating_step(self, by: Self) -> Self {
        self.saturating_add(by)
    }
}

impl StepModel for i64 {
    const ONE: Self = 1;

    fn saturating_step(self, by: Self) -> Self {
        self.saturating_add(by)
    }
}

/// Numeric kinds that can be shown as text or as a fill fraction.
pub trait NumericModel: VariableValue + RemapScalar + FromStr {
    /// Parse trimmed `text`, falling back to zero.
    fn parse_or_zero(text: &str) -> Self {
        text.trim().parse().unwrap_or_default()
    }

    /// Format for display. Integers ignore `precision`.
    fn format(self, _precision: Option<usize>) -> String {
        self.to_string()
    }
}

impl NumericModel for i32 {}

impl NumericModel for i64 {}

impl NumericModel for f32 {
    fn parse_or_zero(text: &str) -> Self {
        text.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or_default()
    }

    fn format(self, precision: Option<usize>) -> String {
        match precision {
            Some(digits) => format!("{self:.digits$}"),
            None => self.to_string(),
        }
    }
}

// ── Button ────────────────────────────────────────────────────────────

/// Adds `increment` to the variable on every click.
#[derive(Debug, Clone, Copy)]
pub struct ButtonAdapter<T> {
    pub increment: T,
}

impl<T: StepModel> ButtonAdapter<T> {
    #[must_use]
    pub fn new(increment: T) -> Self {
        Self { increment }
    }
}

impl<T: StepModel> Default for ButtonAdapter<T> {
    fn default() -> Self {
        Self::new(T::ONE)
    }
}

impl<T: StepModel> WidgetAdapter for ButtonAdapter<T> {
    type Model = T;
    type View = ();
    type Widget = Button;

    fn model_to_view(&self, _model: T) {}

    fn view_to_model(&self, (): (), current: T) -> T {
        current.saturating_step(self.increment)
    }

    fn subscribe_widget(&self, widget: &Button, on_change: Rc<dyn Fn(())>) -> Option<ListenerId> {
        Some(widget.on_click.add_listener(move |()| on_change(())))
    }

    fn unsubscribe_widget(&self, widget: &Button, listener: ListenerId) {
        widget.on_click.remove_listener(listener);
    }

    fn push_to_widget_without_notify(&self, _widget: &Button, (): ()) {}
}

// ── Slider ────────────────────────────────────────────────────────────

/// Mirrors a float variable onto a slider position.
#[derive(Debug, Clone, Copy, Default)]
pub struct SliderAdapter;

impl WidgetAdapter for SliderAdapter {
    type Model = f32;
    type View = f32;
    type Widget = Slider;

    fn model_to_view(&self, model: f32) -> f32 {
        model
    }

    fn view_to_model(&self, view: f32, _current: f32) -> f32 {
        view
    }

    fn subscribe_widget(&self, widget: &Slider, on_change: Rc<dyn Fn(f32)>) -> Option<ListenerId> {
        Some(widget.on_value_changed.add_listener(move |v| on_change(*v)))
    }

    fn unsubscribe_widget(&self, widget: &Slider, listener: ListenerId) {
        widget.on_value_changed.remove_listener(listener);
    }

    fn push_to_widget_without_notify(&self, widget: &Slider, view: f32) {
        widget.set_value_without_notify(view);
    }
}

// ── Toggle ────────────────────────────────────────────────────────────

/// Mirrors a bool variable onto a toggle, optionally inverted both ways.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToggleAdapter {
    pub negate: bool,
}

impl ToggleAdapter {
    #[must_use]
    pub fn new(negate: bool) -> Self {
        Self { negate }
    }
}

impl WidgetAdapter for ToggleAdapter {
    type Model = bool;
    type View = bool;
    type Widget = Toggle;

    fn model_to_view(&self, model: bool) -> bool {
        model != self.negate
    }

    fn view_to_model(&self, view: bool, _current: bool) -> bool {
        view != self.negate
    }

    fn subscribe_widget(&self, widget: &Toggle, on_change: Rc<dyn Fn(bool)>) -> Option<ListenerId> {
        Some(widget.on_value_changed.add_listener(move |v| on_change(*v)))
    }

    fn unsubscribe_widget(&self, widget: &Toggle, listener: ListenerId) {
        widget.on_value_changed.remove_listener(listener);
    }

    fn push_to_widget_without_notify(&self, widget: &Toggle, view: bool) {
        widget.set_is_on_without_notify(view);
    }
}

// ── Input field ───────────────────────────────────────────────────────

/// Numeric text entry. Unparsable input commits zero.
pub struct InputFieldAdapter<T> {
    _model: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for InputFieldAdapter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputFieldAdapter").finish()
    }
}

impl<T> Default for InputFieldAdapter<T> {
    fn default() -> Self {
        Self {
            _model: PhantomData,
        }
    }
}

impl<T: NumericModel> InputFieldAdapter<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: NumericModel> WidgetAdapter for InputFieldAdapter<T> {
    type Model = T;
    type View = String;
    type Widget = InputField;

    fn model_to_view(&self, model: T) -> String {
        model.to_string()
    }

    fn view_to_model(&self, view: String, _current: T) -> T {
        T::parse_or_zero(&view)
    }

    fn subscribe_widget(
        &self,
        widget: &InputField,
        on_change: Rc<dyn Fn(String)>,
    ) -> Option<ListenerId> {
        Some(widget.on_end_edit.add_listener(move |text: &String| on_change(text.clone())))
    }

    fn unsubscribe_widget(&self, widget: &InputField, listener: ListenerId) {
        widget.on_end_edit.remove_listener(listener);
    }

    fn push_to_widget_without_notify(&self, widget: &InputField, view: String) {
        widget.set_text_without_notify(view);
    }
}

// ── Text label ────────────────────────────────────────────────────────

/// Placeholder replaced by the formatted value in [`TextLabelAdapter`] templates.
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// Formats a numeric variable into a label through a template.
pub struct TextLabelAdapter<T> {
    template: String,
    precision: Option<usize>,
    _model: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for TextLabelAdapter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLabelAdapter")
            .field("template", &self.template)
            .field("precision", &self.precision)
            .finish()
    }
}

impl<T: NumericModel> Default for TextLabelAdapter<T> {
    fn default() -> Self {
        Self::new(VALUE_PLACEHOLDER)
    }
}

impl<T: NumericModel> TextLabelAdapter<T> {
    /// Every `{value}` in `template` is replaced by the formatted value.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            precision: None,
            _model: PhantomData,
        }
    }

    /// Fixed number of decimals for float models.
    #[must_use]
    pub fn with_precision(mut self, digits: usize) -> Self {
        self.precision = Some(digits);
        self
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl<T: NumericModel> WidgetAdapter for TextLabelAdapter<T> {
    type Model = T;
    type View = String;
    type Widget = TextLabel;

    fn model_to_view(&self, model: T) -> String {
        self.template
            .replace(VALUE_PLACEHOLDER, &model.format(self.precision))
    }

    fn view_to_model(&self, _view: String, current: T) -> T {
        current
    }

    fn subscribe_widget(&self, _widget: &TextLabel, _on_change: Rc<dyn Fn(String)>) -> Option<ListenerId> {
        None
    }

    fn unsubscribe_widget(&self, _widget: &TextLabel, _listener: ListenerId) {}

    fn push_to_widget_without_notify(&self, widget: &TextLabel, view: String) {
        widget.set_text(view);
    }
}

// ── Fill image ────────────────────────────────────────────────────────

/// Shows a numeric variable as a fill fraction of `[min, max]`.
pub struct FillAdapter<T> {
    range: RemapSettings<f64>,
    _model: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for FillAdapter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FillAdapter")
            .field("min", &self.range.from_min)
            .field("max", &self.range.from_max)
            .finish()
    }
}

impl<T: NumericModel> Default for FillAdapter<T> {
    fn default() -> Self {
        Self::new(T::from_f64(0.0), T::from_f64(1.0))
    }
}

impl<T: NumericModel> FillAdapter<T> {
    /// Map `[min, max]` onto an empty-to-full fill.
    #[must_use]
    pub fn new(min: T, max: T) -> Self {
        Self {
            range: RemapSettings::new(min.to_f64(), max.to_f64(), 0.0, 1.0),
            _model: PhantomData,
        }
    }

    /// Fill fraction for `value`.
    #[must_use]
    pub fn fraction(&self, value: T) -> f32 {
        self.range.remap(value.to_f64()) as f32
    }
}

impl<T: NumericModel> WidgetAdapter for FillAdapter<T> {
    type Model = T;
    type View = f32;
    type Widget = FillImage;

    fn model_to_view(&self, model: T) -> f32 {
        self.fraction(model)
    }

    fn view_to_model(&self, _view: f32, current: T) -> T {
        current
    }

    fn subscribe_widget(&self, _widget: &FillImage, _on_change: Rc<dyn Fn(f32)>) -> Option<ListenerId> {
        None
    }

    fn unsubscribe_widget(&self, _widget: &FillImage, _listener: ListenerId) {}

    fn push_to_widget_without_notify(&self, widget: &FillImage, view: f32) {
        widget.set_fill_amount(view);
    }
}

// ── Aliases ───────────────────────────────────────────────────────────

pub type ButtonIntBinding = ComponentBinding<ButtonAdapter<i32>>;
pub type ButtonLongBinding = ComponentBinding<ButtonAdapter<i64>>;
pub type SliderFloatBinding = ComponentBinding<SliderAdapter>;
pub type ToggleBinding = ComponentBinding<ToggleAdapter>;
pub type InputIntBinding = ComponentBinding<InputFieldAdapter<i32>>;
pub type InputLongBinding = ComponentBinding<InputFieldAdapter<i64>>;
pub type InputFloatBinding = ComponentBinding<InputFieldAdapter<f32>>;
pub type TextIntBinding = ComponentBinding<TextLabelAdapter<i32>>;
pub type TextLongBinding = ComponentBinding<TextLabelAdapter<i64>>;
pub type TextFloatBinding = ComponentBinding<TextLabelAdapter<f32>>;
pub type FillFloatBinding = ComponentBinding<FillAdapter<f32>>;
pub type FillIntBinding = ComponentBinding<FillAdapter<i32>>;
pub type FillLongBinding = ComponentBinding<FillAdapter<i64>>;
