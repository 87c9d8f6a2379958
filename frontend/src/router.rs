use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages;

#[derive(Routable, Clone, PartialEq, Debug)]
pub enum Route {
    #[cfg(not(feature = "mock"))]
    #[at("/posts/:slug")]
    Post { slug: String },
    #[cfg(feature = "mock")]
    #[at("/asteria/posts/:slug")]
    Post { slug: String },

    #[not_found]
    #[cfg(not(feature = "mock"))]
    #[at("/404")]
    NotFound,
    #[not_found]
    #[cfg(feature = "mock")]
    #[at("/asteria/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Post {
            slug,
        } => html! { <pages::post::PostPage slug={slug} /> },
        Route::NotFound => html! { <pages::not_found::NotFoundPage /> },
    }
}

#[function_component(AppRouter)]
pub fn app_router() -> Html {
    html! {
        <BrowserRouter>
            <div class="flex flex-col bg-[var(--bg)]" style="min-height: 100vh; min-height: 100svh;">
                <div class="flex-1 pt-[var(--space-sm)]">
                    <Switch<Route> render={switch} />
                </div>
            </div>
        </BrowserRouter>
    }
}

#[cfg(test)]
mod tests {
    use yew_router::Routable;

    use super::Route;

    #[cfg(not(feature = "mock"))]
    #[test]
    fn post_route_round_trips() {
        let route = Route::recognize("/posts/hello-toc");
        assert_eq!(
            route,
            Some(Route::Post {
                slug: "hello-toc".to_string()
            })
        );
        assert_eq!(
            Route::Post {
                slug: "hello-toc".to_string()
            }
            .to_path(),
            "/posts/hello-toc"
        );
    }

    #[test]
    fn not_found_is_the_fallback_route() {
        assert_eq!(Route::not_found_route(), Some(Route::NotFound));
    }
}
