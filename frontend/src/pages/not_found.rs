use yew::prelude::*;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <main class={classes!("main", "container", "mx-auto", "max-w-[820px]", "py-16")}>
            <h2>{ "404 - Page not found" }</h2>
            <p>{ "Nothing lives at this address." }</p>
        </main>
    }
}
