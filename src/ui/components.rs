/// Reusable UI components

use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SiteListProps {
    pub sites: Vec<String>,
    pub on_remove: Callback<String>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(SiteList)]
pub fn site_list(props: &SiteListProps) -> Html {
    if props.sites.is_empty() {
        return html! {
            <p class="empty-state">{"No websites blocked yet."}</p>
        };
    }

    html! {
        <ul class="blocked-list">
            {for props.sites.iter().map(|site| {
                let site_clone = site.clone();
                html! {
                    <li key={site.clone()} class="blocked-item">
                        <span class="blocked-site">{site}</span>
                        <Button
                            onclick={props.on_remove.reform(move |_| site_clone.clone())}
                            disabled={props.disabled}
                            variant={ButtonVariant::Danger}
                            size={ButtonSize::Small}
                        >
                            {"Delete"}
                        </Button>
                    </li>
                }
            })}
        </ul>
    }
}

#[derive(Properties, PartialEq)]
pub struct FeedbackProps {
    #[prop_or_default]
    pub message: Option<String>,
}

/// Validation message under the input field
#[function_component(Feedback)]
pub fn feedback(props: &FeedbackProps) -> Html {
    match &props.message {
        Some(message) => html! {
            <p class="feedback visible">{message}</p>
        },
        None => html! {},
    }
}
