#[cfg(not(feature = "mock"))]
use gloo_net::http::Request;

#[cfg(not(feature = "mock"))]
use crate::config::API_BASE;
#[cfg(feature = "mock")]
use crate::models;
use crate::models::Post;

/// Fetch one post by slug. `Ok(None)` when the server has no such post.
pub async fn fetch_post(slug: &str) -> Result<Option<Post>, String> {
    #[cfg(feature = "mock")]
    {
        return Ok(models::get_mock_post(slug));
    }

    #[cfg(not(feature = "mock"))]
    {
        let url = post_url(API_BASE, slug);

        let response = Request::get(&url)
            .header("Cache-Control", "no-cache")
            .send()
            .await
            .map_err(|e| format!("Network error: {:?}", e))?;

        if response.status() == 404 {
            return Ok(None);
        }

        if !response.ok() {
            return Err(format!("HTTP error: {}", response.status()));
        }

        let post: Post = response
            .json()
            .await
            .map_err(|e| format!("Parse error: {:?}", e))?;

        Ok(Some(post))
    }
}

#[cfg_attr(feature = "mock", allow(dead_code, reason = "mock builds never hit the network"))]
fn post_url(base: &str, slug: &str) -> String {
    format!("{}/posts/{}", base.trim_end_matches('/'), urlencoding::encode(slug))
}

#[cfg(test)]
mod tests {
    use super::post_url;

    #[test]
    fn post_url_encodes_slug_and_trims_base() {
        assert_eq!(post_url("http://x/api/", "hello toc"), "http://x/api/posts/hello%20toc");
        assert_eq!(post_url("http://x/api", "a"), "http://x/api/posts/a");
    }
}
