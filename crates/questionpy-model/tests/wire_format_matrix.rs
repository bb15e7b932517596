//! Wire shapes of the QuestionPy models as the application server sends them.

use indexmap::IndexMap;
use proptest::prelude::*;
use questionpy_array_converter::{from_value, to_raw, ConvertError, Converter, ConverterOptions};
use questionpy_model::condition::{DoesNotEqual, Equals, In, IsChecked, IsNotChecked};
use questionpy_model::form::{
    CheckboxElement, GroupElement, HiddenElement, SelectElement, TextFields, TextInputElement,
};
use questionpy_model::{
    parse, render, ChoiceOption, Condition, Conditions, FormElement, FormSection,
    OptionsFormDefinition, PackageInfo, PackageType, RepetitionElement, Scalar,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Options forms
// ---------------------------------------------------------------------------

fn sample_form() -> OptionsFormDefinition {
    OptionsFormDefinition {
        general: vec![
            FormElement::TextInput(TextInputElement {
                text: TextFields {
                    name: "title".into(),
                    label: "Title".into(),
                    required: true,
                    placeholder: Some("Untitled".into()),
                    ..TextFields::default()
                },
            }),
            FormElement::Checkbox(CheckboxElement {
                name: "shuffle".into(),
                left_label: None,
                right_label: Some("Shuffle".into()),
                required: false,
                selected: true,
                help: None,
                conditions: Conditions::default(),
            }),
        ],
        sections: vec![FormSection {
            name: "advanced".into(),
            header: "Advanced".into(),
            elements: vec![
                FormElement::Select(SelectElement {
                    name: "mode".into(),
                    label: "Mode".into(),
                    options: vec![
                        ChoiceOption {
                            label: "Easy".into(),
                            value: "easy".into(),
                            selected: true,
                        },
                        ChoiceOption {
                            label: "Hard".into(),
                            value: "hard".into(),
                            selected: false,
                        },
                    ],
                    multiple: false,
                    required: false,
                    help: None,
                    conditions: Conditions {
                        disable_if: vec![],
                        hide_if: vec![Condition::IsNotChecked(IsNotChecked {
                            name: "shuffle".into(),
                        })],
                    },
                }),
                FormElement::Repetition(RepetitionElement {
                    name: "hints".into(),
                    initial_repetitions: 2,
                    increment: 1,
                    button_label: Some("More hints".into()),
                    elements: vec![FormElement::Group(GroupElement {
                        name: "hint".into(),
                        label: "Hint".into(),
                        elements: vec![FormElement::Hidden(HiddenElement {
                            name: "id".into(),
                            value: None,
                        })],
                        help: None,
                        conditions: Conditions::default(),
                    })],
                }),
            ],
        }],
    }
}

#[test]
fn options_form_round_trips() {
    let form = sample_form();
    let raw = to_raw(&form).unwrap();
    let back: OptionsFormDefinition = from_value(raw).unwrap();
    assert_eq!(back, form);
}

#[test]
fn options_form_round_trips_through_text() {
    let form = sample_form();
    let text = render(&form).unwrap();
    let back: OptionsFormDefinition = parse(&text).unwrap();
    assert_eq!(back, form);
}

#[test]
fn elements_serialize_kind_after_fields() {
    let raw = to_raw(&sample_form()).unwrap();
    let checkbox = raw["general"][1].as_object().unwrap();
    let keys: Vec<&str> = checkbox.keys().map(String::as_str).collect();
    assert_eq!(keys.last(), Some(&"kind"));
    assert_eq!(checkbox["kind"], json!("checkbox"));
    assert_eq!(raw["sections"][0]["elements"][1]["elements"][0]["kind"], json!("group"));
}

#[test]
fn sparse_form_fills_defaults() {
    let form: OptionsFormDefinition = from_value(json!({
        "general": [
            {"kind": "text_area", "name": "body", "label": "Body"},
            {"kind": "radio_group", "name": "r", "label": "R", "options": [
                {"label": "One", "value": "1"}
            ]}
        ]
    }))
    .unwrap();
    assert!(form.sections.is_empty());
    let FormElement::TextArea(area) = &form.general[0] else {
        panic!("expected text area");
    };
    assert!(!area.text.required);
    assert!(area.text.conditions.is_empty());
    let FormElement::RadioGroup(radio) = &form.general[1] else {
        panic!("expected radio group");
    };
    assert!(!radio.options[0].selected);
}

#[test]
fn unknown_element_kind_points_at_element() {
    let err = from_value::<OptionsFormDefinition>(json!({
        "sections": [{"name": "s", "header": "S", "elements": [
            {"kind": "hidden", "name": "ok"},
            {"kind": "slider", "name": "nope"}
        ]}]
    }))
    .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::UnknownVariant { class: "FormElement", ref value, ref at, .. }
            if value == "slider" && at == "/sections/0/elements/1"
    ));
}

#[test]
fn missing_option_label_names_option_class() {
    let err = from_value::<FormElement>(json!({
        "kind": "select", "name": "s", "label": "S", "options": [{"value": "x"}]
    }))
    .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::MissingField { class: "Option", ref field, ref at }
            if field == "label" && at == "/options/0"
    ));
}

#[test]
fn conditions_on_nested_elements_are_converted() {
    let element: FormElement = from_value(json!({
        "kind": "group",
        "name": "g",
        "label": "G",
        "elements": [{
            "kind": "static_text",
            "name": "t",
            "label": "T",
            "text": "shown",
            "disable_if": [{"kind": "equals", "name": "mode", "value": "hard"}]
        }]
    }))
    .unwrap();
    let FormElement::StaticText(text) = &element.children()[0] else {
        panic!("expected static text");
    };
    assert_eq!(
        text.conditions.disable_if,
        vec![Condition::Equals(Equals {
            name: "mode".into(),
            value: Scalar::from("hard"),
        })]
    );
}

#[test]
fn condition_with_object_value_is_unconvertible() {
    let err = from_value::<Condition>(json!({"kind": "equals", "name": "a", "value": {}})).unwrap_err();
    assert_eq!(
        err,
        ConvertError::UnconvertibleValue {
            found: "object",
            expected: "scalar".into(),
            at: "/value".into(),
        }
    );
}

#[test]
fn non_finite_condition_value_fails_to_serialize() {
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let condition = Condition::Equals(Equals {
            name: "a".into(),
            value: Scalar::Float(value),
        });
        let err = to_raw(&condition).unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnconvertibleValue {
                found: "float",
                expected: "finite float".into(),
                at: "/value".into(),
            }
        );
    }
}

#[test]
fn float_condition_value_round_trips() {
    let condition = Condition::DoesNotEqual(DoesNotEqual {
        name: "ratio".into(),
        value: Scalar::Float(0.25),
    });
    let raw = to_raw(&condition).unwrap();
    assert_eq!(raw["value"], json!(0.25));
    assert_eq!(from_value::<Condition>(raw).unwrap(), condition);
}

// ---------------------------------------------------------------------------
// Package metadata
// ---------------------------------------------------------------------------

#[test]
fn package_info_round_trips_with_optional_fields() {
    let mut name = IndexMap::new();
    name.insert("en".to_string(), "Library".to_string());
    let info = PackageInfo {
        package_hash: "ff00".into(),
        short_name: "lib".into(),
        namespace: "acme".into(),
        name,
        version: "1.2.3".into(),
        package_type: PackageType::Library,
        author: Some("Acme".into()),
        url: None,
        languages: vec!["en".into()],
        description: IndexMap::new(),
        icon: None,
        license: Some("MIT".into()),
        tags: vec!["math".into(), "algebra".into()],
    };
    let raw = to_raw(&info).unwrap();
    assert_eq!(raw["type"], json!("LIBRARY"));
    assert_eq!(raw["url"], json!(null));
    let back: PackageInfo = from_value(raw).unwrap();
    assert_eq!(back, info);
}

#[test]
fn package_info_accepts_empty_array_for_empty_description() {
    let info: PackageInfo = from_value(json!({
        "package_hash": "h",
        "short_name": "q",
        "namespace": "n",
        "name": {"en": "Q"},
        "version": "0.0.1",
        "type": "QUESTION",
        "description": []
    }))
    .unwrap();
    assert!(info.description.is_empty());
    assert_eq!(info.package_type, PackageType::Question);
}

#[test]
fn converter_reuses_configuration_across_models() {
    let mut converter = Converter::with_options(ConverterOptions {
        strict_variants: true,
        ..ConverterOptions::default()
    });
    let first: FormElement = converter
        .from_value(json!({"kind": "hidden", "name": "a"}))
        .unwrap();
    let second: FormElement = converter
        .from_value(json!({"kind": "hidden", "name": "b"}))
        .unwrap();
    assert_eq!(first.name(), Some("a"));
    assert_eq!(second.name(), Some("b"));
    assert!(converter.warnings().is_empty());
}

// ---------------------------------------------------------------------------
// Round trip over generated conditions
// ---------------------------------------------------------------------------

fn scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<bool>().prop_map(Scalar::Bool),
        any::<i64>().prop_map(Scalar::Int),
        (-1.0e9f64..1.0e9).prop_map(Scalar::Float),
        "[a-z0-9]{0,8}".prop_map(Scalar::String),
    ]
}

fn condition() -> impl Strategy<Value = Condition> {
    let name = "[a-z_]{1,8}";
    prop_oneof![
        name.prop_map(|name| Condition::IsChecked(IsChecked { name })),
        name.prop_map(|name| Condition::IsNotChecked(IsNotChecked { name })),
        (name, scalar()).prop_map(|(name, value)| Condition::Equals(Equals { name, value })),
        (name, scalar()).prop_map(|(name, value)| Condition::DoesNotEqual(DoesNotEqual { name, value })),
        (name, prop::collection::vec(scalar(), 0..4))
            .prop_map(|(name, value)| Condition::In(In { name, value })),
    ]
}

proptest! {
    #[test]
    fn conditions_round_trip(
        disable_if in prop::collection::vec(condition(), 0..4),
        hide_if in prop::collection::vec(condition(), 0..4),
    ) {
        let element = FormElement::Checkbox(CheckboxElement {
            name: "c".into(),
            left_label: None,
            right_label: None,
            required: false,
            selected: false,
            help: None,
            conditions: Conditions { disable_if, hide_if },
        });
        let raw = to_raw(&element).unwrap();
        let back: FormElement = from_value(raw).unwrap();
        prop_assert_eq!(back, element);
    }
}
