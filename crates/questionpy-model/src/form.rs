//! Options-form definitions as sent by the application server.
//!
//! Elements are a closed set of variants keyed by `kind`. Most of them
//! include [`Conditional`] and carry their [`Conditions`] inline.

use questionpy_array_converter::{ConvertError, Convertible, Declaration, Fields, Record};

use crate::condition::{Conditional, Conditions};

/// One element of an options form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormElement {
    StaticText(StaticTextElement),
    TextInput(TextInputElement),
    TextArea(TextAreaElement),
    Checkbox(CheckboxElement),
    CheckboxGroup(CheckboxGroupElement),
    RadioGroup(RadioGroupElement),
    Select(SelectElement),
    Hidden(HiddenElement),
    Group(GroupElement),
    Repetition(RepetitionElement),
}

impl FormElement {
    /// The element's name. Checkbox groups have none of their own.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::StaticText(e) => Some(&e.name),
            Self::TextInput(e) => Some(&e.text.name),
            Self::TextArea(e) => Some(&e.text.name),
            Self::Checkbox(e) => Some(&e.name),
            Self::CheckboxGroup(_) => None,
            Self::RadioGroup(e) => Some(&e.name),
            Self::Select(e) => Some(&e.name),
            Self::Hidden(e) => Some(&e.name),
            Self::Group(e) => Some(&e.name),
            Self::Repetition(e) => Some(&e.name),
        }
    }

    /// Directly nested elements, for groups and repetitions.
    pub fn children(&self) -> &[FormElement] {
        match self {
            Self::Group(e) => &e.elements,
            Self::Repetition(e) => &e.elements,
            _ => &[],
        }
    }
}

impl Convertible for FormElement {
    const CLASS: &'static str = "FormElement";

    fn declare(decl: &mut Declaration<'_>) {
        decl.polymorphic("kind")
            .variant::<StaticTextElement>("static_text")
            .variant::<TextInputElement>("text_input")
            .variant::<TextAreaElement>("text_area")
            .variant::<CheckboxElement>("checkbox")
            .variant::<CheckboxGroupElement>("checkbox_group")
            .variant::<RadioGroupElement>("radio_group")
            .variant::<SelectElement>("select")
            .variant::<HiddenElement>("hidden")
            .variant::<GroupElement>("group")
            .variant::<RepetitionElement>("repetition");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        match fields.class() {
            StaticTextElement::CLASS => fields.into_variant().map(Self::StaticText),
            TextInputElement::CLASS => fields.into_variant().map(Self::TextInput),
            TextAreaElement::CLASS => fields.into_variant().map(Self::TextArea),
            CheckboxElement::CLASS => fields.into_variant().map(Self::Checkbox),
            CheckboxGroupElement::CLASS => fields.into_variant().map(Self::CheckboxGroup),
            RadioGroupElement::CLASS => fields.into_variant().map(Self::RadioGroup),
            SelectElement::CLASS => fields.into_variant().map(Self::Select),
            HiddenElement::CLASS => fields.into_variant().map(Self::Hidden),
            GroupElement::CLASS => fields.into_variant().map(Self::Group),
            RepetitionElement::CLASS => fields.into_variant().map(Self::Repetition),
            _ => Err(fields.unknown_variant()),
        }
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        match self {
            Self::StaticText(e) => record.variant(e),
            Self::TextInput(e) => record.variant(e),
            Self::TextArea(e) => record.variant(e),
            Self::Checkbox(e) => record.variant(e),
            Self::CheckboxGroup(e) => record.variant(e),
            Self::RadioGroup(e) => record.variant(e),
            Self::Select(e) => record.variant(e),
            Self::Hidden(e) => record.variant(e),
            Self::Group(e) => record.variant(e),
            Self::Repetition(e) => record.variant(e),
        }
    }
}

// -------------------------------------------------------------------------
// Text

#[derive(Debug, Clone, PartialEq)]
pub struct StaticTextElement {
    pub name: String,
    pub label: String,
    pub text: String,
    pub help: Option<String>,
    pub conditions: Conditions,
}

impl Convertible for StaticTextElement {
    const CLASS: &'static str = "StaticTextElement";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<FormElement>().include::<Conditional>();
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            name: fields.required("name")?,
            label: fields.required("label")?,
            text: fields.required("text")?,
            help: fields.optional("help")?,
            conditions: Conditions::read(fields)?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("name", &self.name)?;
        record.put("label", &self.label)?;
        record.put("text", &self.text)?;
        record.put("help", &self.help)?;
        self.conditions.write(record)
    }
}

/// Fields shared by single- and multi-line text inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFields {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub default: Option<String>,
    pub placeholder: Option<String>,
    pub help: Option<String>,
    pub conditions: Conditions,
}

impl TextFields {
    fn read(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            name: fields.required("name")?,
            label: fields.required("label")?,
            required: fields.or_default("required")?,
            default: fields.optional("default")?,
            placeholder: fields.optional("placeholder")?,
            help: fields.optional("help")?,
            conditions: Conditions::read(fields)?,
        })
    }

    fn write(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("name", &self.name)?;
        record.put("label", &self.label)?;
        record.put("required", &self.required)?;
        record.put("default", &self.default)?;
        record.put("placeholder", &self.placeholder)?;
        record.put("help", &self.help)?;
        self.conditions.write(record)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextInputElement {
    pub text: TextFields,
}

impl Convertible for TextInputElement {
    const CLASS: &'static str = "TextInputElement";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<FormElement>().include::<Conditional>();
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        TextFields::read(fields).map(|text| Self { text })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        self.text.write(record)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextAreaElement {
    pub text: TextFields,
}

impl Convertible for TextAreaElement {
    const CLASS: &'static str = "TextAreaElement";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<FormElement>().include::<Conditional>();
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        TextFields::read(fields).map(|text| Self { text })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        self.text.write(record)
    }
}

// -------------------------------------------------------------------------
// Choices

#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxElement {
    pub name: String,
    pub left_label: Option<String>,
    pub right_label: Option<String>,
    pub required: bool,
    pub selected: bool,
    pub help: Option<String>,
    pub conditions: Conditions,
}

impl Convertible for CheckboxElement {
    const CLASS: &'static str = "CheckboxElement";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<FormElement>().include::<Conditional>();
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            name: fields.required("name")?,
            left_label: fields.optional("left_label")?,
            right_label: fields.optional("right_label")?,
            required: fields.or_default("required")?,
            selected: fields.or_default("selected")?,
            help: fields.optional("help")?,
            conditions: Conditions::read(fields)?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("name", &self.name)?;
        record.put("left_label", &self.left_label)?;
        record.put("right_label", &self.right_label)?;
        record.put("required", &self.required)?;
        record.put("selected", &self.selected)?;
        record.put("help", &self.help)?;
        self.conditions.write(record)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxGroupElement {
    pub checkboxes: Vec<CheckboxElement>,
}

impl Convertible for CheckboxGroupElement {
    const CLASS: &'static str = "CheckboxGroupElement";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<FormElement>()
            .element_class::<CheckboxElement>("checkboxes");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            checkboxes: fields.required("checkboxes")?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("checkboxes", &self.checkboxes)
    }
}

/// One choice of a radio group or select.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
    pub selected: bool,
}

impl Convertible for ChoiceOption {
    const CLASS: &'static str = "Option";

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            label: fields.required("label")?,
            value: fields.required("value")?,
            selected: fields.or_default("selected")?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("label", &self.label)?;
        record.put("value", &self.value)?;
        record.put("selected", &self.selected)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadioGroupElement {
    pub name: String,
    pub label: String,
    pub options: Vec<ChoiceOption>,
    pub required: bool,
    pub help: Option<String>,
    pub conditions: Conditions,
}

impl Convertible for RadioGroupElement {
    const CLASS: &'static str = "RadioGroupElement";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<FormElement>()
            .include::<Conditional>()
            .element_class::<ChoiceOption>("options");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            name: fields.required("name")?,
            label: fields.required("label")?,
            options: fields.required("options")?,
            required: fields.or_default("required")?,
            help: fields.optional("help")?,
            conditions: Conditions::read(fields)?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("name", &self.name)?;
        record.put("label", &self.label)?;
        record.put("options", &self.options)?;
        record.put("required", &self.required)?;
        record.put("help", &self.help)?;
        self.conditions.write(record)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectElement {
    pub name: String,
    pub label: String,
    pub options: Vec<ChoiceOption>,
    pub multiple: bool,
    pub required: bool,
    pub help: Option<String>,
    pub conditions: Conditions,
}

impl Convertible for SelectElement {
    const CLASS: &'static str = "SelectElement";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<FormElement>()
            .include::<Conditional>()
            .element_class::<ChoiceOption>("options");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            name: fields.required("name")?,
            label: fields.required("label")?,
            options: fields.required("options")?,
            multiple: fields.or_default("multiple")?,
            required: fields.or_default("required")?,
            help: fields.optional("help")?,
            conditions: Conditions::read(fields)?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("name", &self.name)?;
        record.put("label", &self.label)?;
        record.put("options", &self.options)?;
        record.put("multiple", &self.multiple)?;
        record.put("required", &self.required)?;
        record.put("help", &self.help)?;
        self.conditions.write(record)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HiddenElement {
    pub name: String,
    pub value: Option<String>,
}

impl Convertible for HiddenElement {
    const CLASS: &'static str = "HiddenElement";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<FormElement>();
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            name: fields.required("name")?,
            value: fields.optional("value")?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("name", &self.name)?;
        record.put("value", &self.value)
    }
}

// -------------------------------------------------------------------------
// Containers

#[derive(Debug, Clone, PartialEq)]
pub struct GroupElement {
    pub name: String,
    pub label: String,
    pub elements: Vec<FormElement>,
    pub help: Option<String>,
    pub conditions: Conditions,
}

impl Convertible for GroupElement {
    const CLASS: &'static str = "GroupElement";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<FormElement>()
            .include::<Conditional>()
            .element_class::<FormElement>("elements");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            name: fields.required("name")?,
            label: fields.required("label")?,
            elements: fields.required("elements")?,
            help: fields.optional("help")?,
            conditions: Conditions::read(fields)?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("name", &self.name)?;
        record.put("label", &self.label)?;
        record.put("elements", &self.elements)?;
        record.put("help", &self.help)?;
        self.conditions.write(record)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepetitionElement {
    pub name: String,
    pub initial_repetitions: u32,
    pub increment: u32,
    pub button_label: Option<String>,
    pub elements: Vec<FormElement>,
}

impl Convertible for RepetitionElement {
    const CLASS: &'static str = "RepetitionElement";

    fn declare(decl: &mut Declaration<'_>) {
        decl.extends::<FormElement>()
            .alias("initial_repetitions", "minimum_repetitions")
            .element_class::<FormElement>("elements");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            name: fields.required("name")?,
            initial_repetitions: fields.or_else("initial_repetitions", || 1)?,
            increment: fields.or_else("increment", || 1)?,
            button_label: fields.optional("button_label")?,
            elements: fields.required("elements")?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("name", &self.name)?;
        record.put("initial_repetitions", &self.initial_repetitions)?;
        record.put("increment", &self.increment)?;
        record.put("button_label", &self.button_label)?;
        record.put("elements", &self.elements)
    }
}

// -------------------------------------------------------------------------
// Form

/// A titled section of an options form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSection {
    pub name: String,
    pub header: String,
    pub elements: Vec<FormElement>,
}

impl Convertible for FormSection {
    const CLASS: &'static str = "FormSection";

    fn declare(decl: &mut Declaration<'_>) {
        decl.element_class::<FormElement>("elements");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            name: fields.required("name")?,
            header: fields.required("header")?,
            elements: fields.or_default("elements")?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("name", &self.name)?;
        record.put("header", &self.header)?;
        record.put("elements", &self.elements)
    }
}

/// The options form of a question: general elements, then sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsFormDefinition {
    pub general: Vec<FormElement>,
    pub sections: Vec<FormSection>,
}

impl OptionsFormDefinition {
    /// Every element of the form, depth first, in declaration order.
    pub fn elements(&self) -> Vec<&FormElement> {
        fn walk<'a>(elements: &'a [FormElement], out: &mut Vec<&'a FormElement>) {
            for element in elements {
                out.push(element);
                walk(element.children(), out);
            }
        }

        let mut out = Vec::new();
        walk(&self.general, &mut out);
        for section in &self.sections {
            walk(&section.elements, &mut out);
        }
        out
    }
}

impl Convertible for OptionsFormDefinition {
    const CLASS: &'static str = "OptionsFormDefinition";

    fn declare(decl: &mut Declaration<'_>) {
        decl.element_class::<FormElement>("general")
            .element_class::<FormSection>("sections");
    }

    fn construct(fields: &mut Fields<'_>) -> Result<Self, ConvertError> {
        Ok(Self {
            general: fields.or_default("general")?,
            sections: fields.or_default("sections")?,
        })
    }

    fn deconstruct(&self, record: &mut Record<'_>) -> Result<(), ConvertError> {
        record.put("general", &self.general)?;
        record.put("sections", &self.sections)
    }
}
