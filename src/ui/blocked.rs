/// Page shown in place of a blocked site

use yew::prelude::*;

#[function_component(BlockedPage)]
pub fn blocked_page() -> Html {
    html! {
        <div class="blocked-container">
            <h1 class="blocked-title">{"🚫 Site Blocked"}</h1>
            <p class="blocked-text">
                {"This website is on your block list."}
            </p>
            <p class="blocked-hint">
                {"Open the Site Blocker popup to remove it or to turn blocking off."}
            </p>
        </div>
    }
}
