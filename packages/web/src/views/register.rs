//! Registration page: personal data, masked documents, CEP autofill, terms.

use std::rc::Rc;

use dioxus::prelude::*;
use signup::{Field, FieldValue, FormController, HttpCoordinator, LookupTicket, SignupConfig};

use crate::components::{FieldInput, PasswordInput, TermsCheckbox};
use crate::toast::{use_toasts, ToastNotifier};

/// Register page component.
#[component]
pub fn Register() -> Element {
    let config = use_context::<SignupConfig>();
    let toasts = use_toasts();
    let mut form = use_signal(|| FormController::new(&config));

    let coordinator: Option<Rc<HttpCoordinator<ToastNotifier>>> = use_hook(|| {
        match signup::http_coordinator(&config, ToastNotifier(toasts)) {
            Ok(coordinator) => Some(Rc::new(coordinator)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to build HTTP client");
                None
            }
        }
    });

    let lookup_coordinator = coordinator.clone();
    let autofill = use_callback(move |ticket: LookupTicket| {
        let Some(coordinator) = lookup_coordinator.clone() else {
            return;
        };
        spawn(async move {
            if let Some(address) = coordinator.resolve(&ticket).await {
                form.write().apply_address(&ticket, address);
            }
        });
    });

    let edit = use_callback(move |(field, value): (Field, FieldValue)| {
        let result = form.write().set_field(field, value);
        match result {
            Ok(Some(ticket)) => autofill.call(ticket),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Ignored form input"),
        }
    });

    let submit_coordinator = coordinator.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(coordinator) = submit_coordinator.clone() else {
            return;
        };
        let Some(record) = form.write().begin_submit() else {
            return;
        };
        spawn(async move {
            let result = coordinator.deliver(&record).await;
            coordinator.conclude(&mut form.write(), result);
        });
    };

    let state = form();
    let error = |field: Field| state.error(field).map(str::to_string);

    rsx! {
        div {
            class: "flex min-h-screen w-full items-center justify-center p-8 bg-white",

            form {
                onsubmit: handle_submit,
                class: "flex w-full max-w-[420px] flex-col items-center justify-center gap-4 rounded-xl border border-gray-300 p-5",

                for message in state.errors().form_messages() {
                    div {
                        class: "w-full px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                        "{message}"
                    }
                }

                FieldInput {
                    field: Field::Name,
                    value: state.value(Field::Name).to_string(),
                    error: error(Field::Name),
                    oninput: move |value: String| edit.call((Field::Name, value.into())),
                }
                FieldInput {
                    field: Field::Email,
                    input_type: "email",
                    value: state.value(Field::Email).to_string(),
                    error: error(Field::Email),
                    oninput: move |value: String| edit.call((Field::Email, value.into())),
                }
                for field in [Field::Password, Field::PasswordConfirmation] {
                    PasswordInput {
                        key: "{field}",
                        field,
                        value: state.value(field).to_string(),
                        error: error(field),
                        visible: state.password_visible(),
                        ontoggle: move |_| form.write().toggle_password_visibility(),
                        oninput: move |value: String| edit.call((field, value.into())),
                    }
                }
                for field in [Field::Phone, Field::NationalId, Field::PostalCode] {
                    FieldInput {
                        key: "{field}",
                        field,
                        value: state.value(field).to_string(),
                        error: error(field),
                        oninput: move |value: String| edit.call((field, value.into())),
                    }
                }
                for field in [Field::Address, Field::City] {
                    FieldInput {
                        key: "{field}",
                        field,
                        value: state.value(field).to_string(),
                        error: error(field),
                        disabled: true,
                        oninput: move |_| {},
                    }
                }
                TermsCheckbox {
                    checked: state.terms_accepted(),
                    error: error(Field::TermsAccepted),
                    onchange: move |accepted: bool| edit.call((Field::TermsAccepted, accepted.into())),
                }

                button {
                    class: "w-full rounded bg-slate-700 px-4 py-2 text-[0.9375rem] font-medium text-white disabled:opacity-60",
                    r#type: "submit",
                    disabled: state.is_submitting() || coordinator.is_none(),
                    if state.is_submitting() { "Cadastrando..." } else { "Cadastrar" }
                }
            }
        }
    }
}
