//! Inputs bound to a single form field.

use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaEye, FaEyeSlash};
use dioxus_free_icons::Icon;
use signup::Field;

const INPUT_CLASS: &str = "w-full bg-white border border-neutral-300 rounded px-3 py-2 text-sm text-neutral-800 outline-none focus:border-primary-500 disabled:bg-neutral-100 disabled:text-neutral-500";

#[component]
fn FieldError(error: Option<String>) -> Element {
    rsx! {
        if let Some(message) = error {
            p { class: "mt-1 text-sm font-light text-red-400", "{message}" }
        }
    }
}

/// Text input with its error message underneath.
#[component]
pub fn FieldInput(
    field: Field,
    value: String,
    error: Option<String>,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = false)] disabled: bool,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        label {
            class: "w-full",
            input {
                class: INPUT_CLASS,
                r#type: input_type,
                name: field.as_str(),
                placeholder: field.label(),
                disabled,
                value: "{value}",
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
            FieldError { error }
        }
    }
}

/// Password input with the shared show/hide toggle.
#[component]
pub fn PasswordInput(
    field: Field,
    value: String,
    error: Option<String>,
    visible: bool,
    ontoggle: EventHandler<()>,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            class: "relative w-full",
            input {
                class: INPUT_CLASS,
                r#type: if visible { "text" } else { "password" },
                name: field.as_str(),
                placeholder: field.label(),
                value: "{value}",
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
            button {
                class: "absolute right-3 top-3 text-neutral-500",
                r#type: "button",
                onclick: move |_| ontoggle.call(()),
                if visible {
                    Icon { icon: FaEyeSlash, width: 16, height: 16 }
                } else {
                    Icon { icon: FaEye, width: 16, height: 16 }
                }
            }
            FieldError { error }
        }
    }
}

/// Terms-of-use checkbox.
#[component]
pub fn TermsCheckbox(checked: bool, error: Option<String>, onchange: EventHandler<bool>) -> Element {
    rsx! {
        label {
            class: "flex flex-col items-center",
            div {
                class: "flex items-center gap-2",
                input {
                    class: "accent-slate-500",
                    r#type: "checkbox",
                    name: Field::TermsAccepted.as_str(),
                    checked,
                    onchange: move |evt: FormEvent| onchange.call(evt.checked()),
                }
                p {
                    class: "whitespace-nowrap",
                    "Aceito os "
                    span { class: "cursor-pointer font-medium underline", "termos e condições" }
                }
            }
            FieldError { error }
        }
    }
}
