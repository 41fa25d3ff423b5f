//! End-to-end binding scenarios: widgets, variables and lifecycle together.

use std::cell::Cell;
use std::rc::Rc;

use varbind_core::{TypedVariable, VariableConfig, VariableRegistry};
use varbind_widgets::{
    Button, ButtonAdapter, ButtonIntBinding, FillAdapter, FillFloatBinding, FillImage,
    InputField, InputFieldAdapter, InputIntBinding, Slider, SliderAdapter, SliderFloatBinding,
    TextFloatBinding, TextIntBinding, TextLabel, TextLabelAdapter, Toggle, ToggleAdapter, ToggleBinding,
};

#[test]
fn slider_storm_has_no_feedback() {
    let volume = TypedVariable::new(0.0f32);
    let slider = Rc::new(Slider::new(0.0, 1000.0));
    let binding = SliderFloatBinding::new(SliderAdapter)
        .with_widget(Rc::clone(&slider))
        .with_variable(&volume);
    binding.activate();
    let pushes_after_activate = binding.stats().view_pushes;

    let emitted = Rc::new(Cell::new(0u32));
    let emitted_clone = Rc::clone(&emitted);
    slider
        .on_value_changed
        .add_listener(move |_| emitted_clone.set(emitted_clone.get() + 1));

    let model_notifications = Rc::new(Cell::new(0u32));
    let notifications_clone = Rc::clone(&model_notifications);
    volume.subscribe(move |_| notifications_clone.set(notifications_clone.get() + 1));

    for step in 1..=1000 {
        slider.set_value(step as f32);
    }

    assert_eq!(volume.get(), 1000.0);
    assert_eq!(slider.value(), 1000.0);
    assert_eq!(emitted.get(), 1000);
    assert_eq!(model_notifications.get(), 1000);
    let stats = binding.stats();
    assert_eq!(stats.model_writes, 1000);
    assert_eq!(stats.view_pushes - pushes_after_activate, 1000);
}

#[test]
fn numeric_input_falls_back_to_zero() {
    let amount = TypedVariable::new(5i32);
    let field = Rc::new(InputField::new());
    let binding = InputIntBinding::new(InputFieldAdapter::new())
        .with_widget(Rc::clone(&field))
        .with_variable(&amount);
    binding.activate();
    assert_eq!(field.text(), "5");

    field.submit("abc");
    assert_eq!(amount.get(), 0);
    assert_eq!(field.text(), amount.get().to_string());

    field.submit("42");
    assert_eq!(amount.get(), 42);
    assert_eq!(field.text(), amount.get().to_string());

    field.submit(" 42 ");
    assert_eq!(field.text(), "42");

    field.submit("abc");
    field.submit("xyz");
    assert_eq!(amount.get(), 0);
    assert_eq!(field.text(), "0");
}

#[test]
fn button_increments_by_step() {
    let score = TypedVariable::new(0i32);
    let button = Rc::new(Button::new());
    let binding = ButtonIntBinding::new(ButtonAdapter::new(3))
        .with_widget(Rc::clone(&button))
        .with_variable(&score);
    binding.activate();

    for _ in 0..3 {
        button.click();
    }
    assert_eq!(score.get(), 9);
}

#[test]
fn clamped_button_stops_at_max() {
    let ammo = TypedVariable::from_config(
        VariableConfig::new(0i32)
            .with_mutable(true)
            .with_clamp(0, 5),
    )
    .unwrap();
    let button = Rc::new(Button::new());
    let binding = ButtonIntBinding::new(ButtonAdapter::new(2))
        .with_widget(Rc::clone(&button))
        .with_variable(&ammo);
    binding.activate();

    for _ in 0..10 {
        button.click();
    }
    assert_eq!(ammo.get(), 5);
    assert_eq!(binding.stats().model_writes, 10);
}

#[test]
fn negated_toggle_inverts_both_ways() {
    let muted = TypedVariable::new(false);
    let toggle = Rc::new(Toggle::new(false));
    let binding = ToggleBinding::new(ToggleAdapter::new(true))
        .with_widget(Rc::clone(&toggle))
        .with_variable(&muted);
    binding.activate();
    assert!(toggle.is_on());

    toggle.set_is_on(false);
    assert!(muted.get());

    muted.set(false);
    assert!(toggle.is_on());
}

#[test]
fn fill_tracks_clamped_variable() {
    let health = TypedVariable::from_config(
        VariableConfig::new(100.0f32)
            .with_mutable(true)
            .with_clamp(0.0, 100.0),
    )
    .unwrap();
    let fill = Rc::new(FillImage::new());
    let binding = FillFloatBinding::new(FillAdapter::new(0.0, 100.0))
        .with_widget(Rc::clone(&fill))
        .with_variable(&health);
    binding.activate();
    assert_eq!(fill.fill_amount(), 1.0);

    health.set(25.0);
    assert_eq!(fill.fill_amount(), 0.25);

    health.set(-50.0);
    assert_eq!(fill.fill_amount(), 0.0);
}

#[test]
fn one_variable_drives_many_widgets() {
    let speed = TypedVariable::new(1.5f32);
    let slider = Rc::new(Slider::new(0.0, 10.0));
    let label = Rc::new(TextLabel::new());

    let slider_binding = SliderFloatBinding::new(SliderAdapter)
        .with_widget(Rc::clone(&slider))
        .with_variable(&speed);
    let label_binding = TextFloatBinding::new(TextLabelAdapter::new("Speed {value}").with_precision(2))
        .with_widget(Rc::clone(&label))
        .with_variable(&speed);
    slider_binding.activate();
    label_binding.activate();
    assert_eq!(label.text(), "Speed 1.50");

    slider.set_value(4.25);
    assert_eq!(speed.get(), 4.25);
    assert_eq!(label.text(), "Speed 4.25");
}

#[test]
fn deactivated_binding_stops_syncing() {
    let level = TypedVariable::new(0.5f32);
    let slider = Rc::new(Slider::new(0.0, 1.0));
    let binding = SliderFloatBinding::new(SliderAdapter)
        .with_widget(Rc::clone(&slider))
        .with_variable(&level);
    binding.activate();
    binding.deactivate();

    level.set(0.75);
    assert_eq!(slider.value(), 0.5);
    slider.set_value(0.1);
    assert_eq!(level.get(), 0.75);

    binding.activate();
    assert_eq!(slider.value(), 0.75);
}

#[test]
fn seed_then_broadcast_lifecycle() {
    let lives = TypedVariable::from_config(
        VariableConfig::new(3i32)
            .with_name("lives")
            .with_mutable(true),
    )
    .unwrap();
    let label = Rc::new(TextLabel::new());
    let mut registry = VariableRegistry::new();
    registry.register(&lives);

    // Left over from a previous session.
    lives.set(0);

    registry.seed_all_silently();
    let binding = TextIntBinding::new(TextLabelAdapter::new("x{value}"))
        .with_widget(Rc::clone(&label))
        .with_variable(&lives);
    binding.activate();
    assert_eq!(label.text(), "x3");

    let pushes = binding.stats().view_pushes;
    registry.broadcast_all();
    assert_eq!(binding.stats().view_pushes, pushes + 1);
    assert_eq!(label.text(), "x3");
}
