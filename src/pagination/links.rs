//! Page link generation
//!
//! Links keep every query parameter of the original request except the page
//! parameter, which is replaced in place (or appended when it was absent).

use url::form_urlencoded;

/// Build the URL of `page` from a base URI and the request's query pairs
pub fn page_url(base_uri: &str, query: &[(String, String)], page_name: &str, page: u64) -> String {
    let page_value = page.to_string();
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut placed = false;

    for (key, value) in query {
        if key == page_name {
            if !placed {
                serializer.append_pair(page_name, &page_value);
                placed = true;
            }
            continue;
        }
        serializer.append_pair(key, value);
    }

    if !placed {
        serializer.append_pair(page_name, &page_value);
    }

    format!("{base_uri}?{}", serializer.finish())
}
