#![forbid(unsafe_code)]

//! Widgets: in-memory widget models and variable bindings.
//!
//! # Role in varbind
//! `varbind-widgets` is the view layer. It connects the typed variables of
//! `varbind-core` to widgets through [`ComponentBinding`], which keeps both
//! sides in sync without feedback loops.
//!
//! # Primary responsibilities
//! - **EventSource**: ordered widget change events.
//! - **Widget models**: button, slider, toggle, input field, text label and
//!   fill image, each with a silent write path for bindings.
//! - **ComponentBinding**: lifecycle-managed bidirectional sync.
//! - **Adapters**: per-widget converters and event wiring.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use varbind_core::TypedVariable;
//! use varbind_widgets::{ButtonAdapter, ButtonIntBinding, Button};
//!
//! let score = TypedVariable::new(0i32);
//! let button = Rc::new(Button::new());
//! let binding = ButtonIntBinding::new(ButtonAdapter::new(3))
//!     .with_widget(Rc::clone(&button))
//!     .with_variable(&score);
//! binding.activate();
//!
//! button.click();
//! button.click();
//! assert_eq!(score.get(), 6);
//! ```

pub mod adapters;
pub mod binding;
pub mod event;
pub mod widgets;

pub use adapters::{
    ButtonAdapter, ButtonIntBinding, ButtonLongBinding, FillAdapter, FillFloatBinding,
    FillIntBinding, FillLongBinding, InputFieldAdapter, InputFloatBinding, InputIntBinding,
    InputLongBinding, NumericModel, SliderAdapter, SliderFloatBinding, StepModel,
    TextFloatBinding, TextIntBinding, TextLabelAdapter, TextLongBinding, ToggleAdapter,
    ToggleBinding, VALUE_PLACEHOLDER,
};
pub use binding::{BindingState, BindingStats, ComponentBinding, WidgetAdapter};
pub use event::{EventSource, ListenerId};
pub use widgets::{Button, FillImage, InputField, Slider, TextLabel, Toggle};
