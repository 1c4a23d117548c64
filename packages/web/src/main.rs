use dioxus::prelude::*;
use signup::SignupConfig;

use toast::ToastProvider;
use views::Register;

mod components;
mod toast;
mod views;

/// Endpoints and policy baked in at build time.
const CONFIG: &str = include_str!("../signup.toml");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

fn load_config() -> SignupConfig {
    match SignupConfig::from_toml(CONFIG) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid {}, using defaults", SignupConfig::filename());
            SignupConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    use_context_provider(load_config);

    rsx! {
        ToastProvider {
            Register {}
        }
    }
}
