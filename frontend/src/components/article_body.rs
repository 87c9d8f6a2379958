use web_sys::Element;
use yew::prelude::*;

use crate::utils::log_warn;

#[derive(Properties, Clone, PartialEq)]
pub struct ArticleBodyProps {
    /// Sanitized HTML of the post body.
    pub html: AttrValue,
    /// Yew-rendered lead (title, meta line) placed ahead of the body.
    #[prop_or_default]
    pub children: Html,
}

/// The `<article>` the table of contents scans.
///
/// The lead is ordinary Yew markup, so the post title is the first heading
/// found. The body below it goes into a container written with
/// `innerHTML` and never diffed, so heading ids assigned later survive
/// re-renders.
#[function_component(ArticleBody)]
pub fn article_body(props: &ArticleBodyProps) -> Html {
    let content_ref = use_node_ref();

    {
        let content_ref = content_ref.clone();
        use_effect_with(props.html.clone(), move |body| {
            match content_ref.cast::<Element>() {
                Some(content) => content.set_inner_html(body),
                None => log_warn("article body: content container not mounted"),
            }
            || ()
        });
    }

    html! {
        <article class={classes!("post-article", "min-w-0")}>
            { props.children.clone() }
            <div ref={content_ref} class="article-content" />
        </article>
    }
}
