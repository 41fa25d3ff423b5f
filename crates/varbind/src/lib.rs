#![forbid(unsafe_code)]

//! varbind public facade crate.
//!
//! Re-exports the model layer (`varbind-core`) and, with the default
//! `widgets` feature, the binding layer (`varbind-widgets`).

pub use varbind_core as core;
#[cfg(feature = "widgets")]
pub use varbind_widgets as widgets;

pub mod prelude {
    pub use varbind_core::{
        BoolVariable, ConfigError, FloatVariable, Instrumentation, IntVariable, LongVariable,
        TypedVariable, Vec2, Vec2Variable, Vec3, Vec3Variable, VariableConfig, VariableReference,
        VariableRegistry, VariableValue, WriteOutcome,
    };

    #[cfg(feature = "widgets")]
    pub use varbind_widgets::{
        BindingState, Button, ButtonAdapter, ComponentBinding, FillAdapter, FillImage,
        InputField, InputFieldAdapter, Slider, SliderAdapter, TextLabel, TextLabelAdapter,
        Toggle, ToggleAdapter, WidgetAdapter,
    };
}
