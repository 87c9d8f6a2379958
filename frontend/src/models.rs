// 重新导出 shared crate 的数据模型
pub use asteria_shared::Post;

// =============== Mock 数据 ===============

/// Built-in post for `mock` builds.
#[cfg(feature = "mock")]
pub fn get_mock_post(slug: &str) -> Option<Post> {
    mock_posts().into_iter().find(|post| post.slug == slug)
}

#[cfg(feature = "mock")]
fn mock_posts() -> Vec<Post> {
    vec![
        Post {
            slug: "hello-toc".to_string(),
            title: "Building a table of contents that keeps up".to_string(),
            summary: "Scroll tracking for long posts, in Rust and wasm.".to_string(),
            content: sample_long_markdown(),
            tags: vec!["rust".to_string(), "wasm".to_string()],
            date: "2024-05-01".to_string(),
            read_time: 0,
            comments: true,
        },
        Post {
            slug: "short-note".to_string(),
            title: "A short note".to_string(),
            summary: "No headings, so no table of contents.".to_string(),
            content: "Just a paragraph.".to_string(),
            tags: vec![],
            date: "2024-05-02".to_string(),
            read_time: 1,
            comments: false,
        },
    ]
}

#[cfg(feature = "mock")]
fn sample_long_markdown() -> String {
    let filler = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(40);
    format!(
        "# Intro\n\n{filler}\n\n## Setup\n\n{filler}\n\n### Installing the toolchain {{#toolchain}}\n\n{filler}\n\n\
         ## Usage\n\n{filler}\n\n#### Edge cases\n\n{filler}\n\n# FAQ\n\n{filler}\n"
    )
}
