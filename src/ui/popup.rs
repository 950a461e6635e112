/// Popup UI for the Site Blocker extension

use crate::blocker::Blocker;
use crate::chrome::{ChromeRules, ChromeStorage};
use crate::error::SiteError;
use crate::storage::BlockState;
use crate::ui::components::{Feedback, SiteList};
use crate::ui::gate::ActionGate;
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum AppState {
    Loading,
    Idle,
    Busy,
    Error(String),
}

fn blocker() -> Blocker<ChromeStorage, ChromeRules> {
    Blocker::new(ChromeStorage, ChromeRules)
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading);
    let block_state = use_state(BlockState::default);
    let new_site = use_state(String::new);
    let feedback = use_state(|| None::<String>);
    // Every handler runs through this gate, so an action that arrives while
    // another one is still talking to storage or the rule table is dropped.
    let gate = use_memo((), |_| ActionGate::default());

    // Sync rules with storage on mount
    {
        let state = state.clone();
        let block_state = block_state.clone();
        let gate = gate.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                gate.run(async {
                    match blocker().initialize().await {
                        Ok(loaded) => {
                            block_state.set(loaded);
                            state.set(AppState::Idle);
                        }
                        Err(e) => {
                            state.set(AppState::Error(format!("Failed to load: {}", e)));
                        }
                    }
                })
                .await;
            });
            || ()
        });
    }

    let on_toggle = {
        let state = state.clone();
        let block_state = block_state.clone();
        let gate = gate.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let block_state = block_state.clone();
            let gate = gate.clone();

            spawn_local(async move {
                gate.run(async {
                    state.set(AppState::Busy);
                    match blocker().toggle().await {
                        Ok(toggled) => {
                            block_state.set(toggled);
                            state.set(AppState::Idle);
                        }
                        Err(e) => {
                            state.set(AppState::Error(format!("Failed to toggle: {}", e)));
                        }
                    }
                })
                .await;
            });
        })
    };

    let on_input = {
        let new_site = new_site.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                new_site.set(input.value());
            }
        })
    };

    let add_site = {
        let state = state.clone();
        let block_state = block_state.clone();
        let new_site = new_site.clone();
        let feedback = feedback.clone();
        let gate = gate.clone();

        Callback::from(move |_: ()| {
            if gate.is_busy() {
                return;
            }
            let state = state.clone();
            let block_state = block_state.clone();
            let new_site = new_site.clone();
            let feedback = feedback.clone();
            let gate = gate.clone();
            let input = (*new_site).clone();
            let enabled = block_state.enabled;

            spawn_local(async move {
                gate.run(async {
                    state.set(AppState::Busy);
                    feedback.set(None);
                    match blocker().add_site(&input).await {
                        Ok(sites) => {
                            block_state.set(BlockState { enabled, sites });
                            new_site.set(String::new());
                            state.set(AppState::Idle);
                        }
                        Err(SiteError::Storage(e)) => {
                            state.set(AppState::Error(format!("Failed to save: {}", e)));
                        }
                        Err(e) => {
                            feedback.set(Some(e.to_string()));
                            state.set(AppState::Idle);
                        }
                    }
                })
                .await;
            });
        })
    };

    let on_add_click = add_site.reform(|_: MouseEvent| ());

    let on_keypress = {
        let add_site = add_site.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                add_site.emit(());
            }
        })
    };

    let on_remove = {
        let state = state.clone();
        let block_state = block_state.clone();
        let gate = gate.clone();

        Callback::from(move |site: String| {
            let state = state.clone();
            let block_state = block_state.clone();
            let gate = gate.clone();
            let enabled = block_state.enabled;

            spawn_local(async move {
                gate.run(async {
                    state.set(AppState::Busy);
                    match blocker().remove_site(&site).await {
                        Ok(sites) => {
                            block_state.set(BlockState { enabled, sites });
                            state.set(AppState::Idle);
                        }
                        Err(e) => {
                            state.set(AppState::Error(format!("Failed to remove: {}", e)));
                        }
                    }
                })
                .await;
            });
        })
    };

    let is_busy = matches!(*state, AppState::Loading | AppState::Busy);
    let toggle_label = if block_state.enabled { "Disable Blocking" } else { "Enable Blocking" };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Site Blocker"}</h1>

            {match &*state {
                AppState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                AppState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                AppState::Idle | AppState::Busy => html! {}
            }}

            <Button
                onclick={on_toggle}
                disabled={is_busy}
                variant={if block_state.enabled { ButtonVariant::Secondary } else { ButtonVariant::Primary }}
                block={true}
            >
                {toggle_label}
            </Button>

            <div class="add-site-row">
                <input
                    type="text"
                    placeholder="example.com"
                    value={(*new_site).clone()}
                    oninput={on_input}
                    onkeypress={on_keypress}
                    class="site-input"
                />
                <Button onclick={on_add_click} disabled={is_busy}>
                    {"Add"}
                </Button>
            </div>
            <Feedback message={(*feedback).clone()} />

            <SiteList
                sites={block_state.sites.clone()}
                on_remove={on_remove}
                disabled={is_busy}
            />
        </div>
    }
}
