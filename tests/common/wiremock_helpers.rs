use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount an HTML page at `url_path` on an existing server.
pub async fn mount_lookup_page(server: &MockServer, url_path: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html.to_string())
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Creates a mock lookup site serving one result page.
pub async fn mock_lookup_site(url_path: &str, html: &str) -> MockServer {
    let server = MockServer::start().await;
    mount_lookup_page(&server, url_path, html).await;
    server
}

/// Creates a mock server that answers every GET with `status_code` and `body`.
pub async fn mock_error_site(status_code: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status_code).set_body_string(body.to_string()))
        .mount(&server)
        .await;

    server
}

/// A base URL nothing listens on
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Mount `hops` chained 302 redirects starting at `from`, ending at `to`.
pub async fn mount_redirect_chain(server: &MockServer, from: &str, to: &str, hops: usize) {
    let mut current = from.to_string();
    for hop in 1..=hops {
        let next = if hop == hops {
            to.to_string()
        } else {
            format!("/hop-{}", hop)
        };
        Mock::given(method("GET"))
            .and(path(current.as_str()))
            .respond_with(ResponseTemplate::new(302).insert_header("location", next.as_str()))
            .expect(1)
            .mount(server)
            .await;
        current = next;
    }
}
