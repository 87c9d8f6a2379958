use web_sys::window;
use yew::prelude::*;

use crate::{
    api::fetch_post,
    components::{
        article_body::ArticleBody,
        icons::{Icon, IconName},
        loading_spinner::LoadingSpinner,
        table_of_contents::TableOfContents,
    },
    hooks::use_scroll_to_top,
    models::Post,
    utils::{log_error, markdown_to_html},
};

#[derive(Properties, Clone, PartialEq)]
pub struct PostPageProps {
    pub slug: String,
}

#[derive(Clone, PartialEq)]
enum PostState {
    Loading,
    Loaded(Post),
    Missing,
    Failed(String),
}

#[function_component(PostPage)]
pub fn post_page(props: &PostPageProps) -> Html {
    use_scroll_to_top();

    let state = use_state(|| PostState::Loading);

    {
        let state = state.clone();
        use_effect_with(props.slug.clone(), move |slug| {
            let slug = slug.clone();
            state.set(PostState::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_post(&slug).await {
                    Ok(Some(post)) => state.set(PostState::Loaded(post)),
                    Ok(None) => state.set(PostState::Missing),
                    Err(e) => {
                        log_error(&format!("Failed to fetch post {slug}: {e}"));
                        state.set(PostState::Failed(e));
                    },
                }
            });
            || ()
        });
    }

    let body = match &*state {
        PostState::Loading => html! { <LoadingSpinner /> },
        PostState::Loaded(post) => render_post(post),
        PostState::Missing => html! {
            <section class={classes!("post-missing", "mx-auto", "max-w-[820px]", "py-16")}>
                <p class={classes!("m-0", "uppercase", "tracking-[0.2em]", "text-[var(--primary)]")}>{ "404" }</p>
                <h1 class={classes!("m-0", "text-[2.25rem]")}>{ "Post not found" }</h1>
                <p class={classes!("text-[var(--muted)]")}>{ "There is no post at this address." }</p>
            </section>
        },
        PostState::Failed(message) => html! {
            <section class={classes!("post-error", "mx-auto", "max-w-[820px]", "py-16")} role="alert">
                <h1 class={classes!("m-0", "text-[1.65rem]")}>{ "Something went wrong" }</h1>
                <p class={classes!("text-[var(--muted)]")}>{ message.clone() }</p>
            </section>
        },
    };

    html! {
        <main class={classes!("main", "container", "mt-[var(--space-lg)]")}>
            { body }
        </main>
    }
}

fn render_post(post: &Post) -> Html {
    let content = AttrValue::from(markdown_to_html(&post.content));
    let read_time = if post.read_time > 0 {
        post.read_time
    } else {
        post.estimated_read_time()
    };

    html! {
        <div class={classes!("post-layout", "grid", "gap-10", "xl:grid-cols-[minmax(0,820px)_240px]", "justify-center")}>
            <aside class={classes!("xl:order-2", "xl:sticky", "xl:top-[calc(var(--header-height-desktop)+2rem)]", "xl:self-start")}>
                <TableOfContents key={post.slug.clone()} has_comments={post.comments} />
            </aside>

            <div class={classes!("min-w-0", "xl:order-1")}>
                <ArticleBody html={content}>
                    <header class={classes!("flex", "flex-col", "gap-3", "mb-8")}>
                        <button
                            type="button"
                            class={classes!("inline-flex", "items-center", "gap-1", "self-start", "text-[var(--muted)]")}
                            onclick={Callback::from(go_back)}
                        >
                            <Icon name={IconName::ArrowLeft} size={16} />
                            { "Back" }
                        </button>
                        <h1 class={classes!("m-0", "text-[2.25rem]", "leading-[1.25]", "sm:text-[1.65rem]")}>
                            { post.title.clone() }
                        </h1>
                        <div class={classes!("flex", "flex-wrap", "gap-3", "text-[0.9rem]", "text-[var(--muted)]")}>
                            <span>{ post.date.clone() }</span>
                            <span>{ format!("{read_time} min read") }</span>
                            { for post.tags.iter().map(|tag| html! { <span class="post-tag">{ format!("#{tag}") }</span> }) }
                        </div>
                    </header>
                </ArticleBody>

                if post.comments {
                    <section id="comments" class={classes!("mt-12", "pt-8", "border-t", "border-[var(--border)]")}>
                        <p class={classes!("m-0", "inline-flex", "items-center", "gap-2", "font-semibold")}>
                            <Icon name={IconName::MessageSquare} size={18} />
                            { "Comments" }
                        </p>
                    </section>
                }
            </div>
        </div>
    }
}

// Browser history back, when there is somewhere to go.
fn go_back(e: MouseEvent) {
    e.prevent_default();
    if let Some(history) = window().and_then(|win| win.history().ok()) {
        if history.length().map(|length| length > 1).unwrap_or(false) {
            let _ = history.back();
        }
    }
}
