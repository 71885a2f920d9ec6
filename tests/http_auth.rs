use apiprobe::http::Auth;
use apiprobe::{HttpMethod, RequestBuilder};
use httpmock::Method::GET;
use httpmock::MockServer;

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

#[test]
fn test_basic_auth_header_sent() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/secure")
            .header("authorization", "Basic dXNlcjpwYXNz");
        then.status(200).body("ok");
    });

    let mut rb = RequestBuilder::with_default_adapter(server.base_url())
        .expect("adapter should build");
    let response = rb
        .set_method(HttpMethod::Get)
        .set_path("/secure")
        .add_header_value(Auth::basic_auth("user", "pass"))
        .build()
        .and_then(|response| response.validate_status_code(200))
        .expect("authorized request");
    assert_eq!(response.body(), "ok");

    mock.assert();
}

#[test]
fn test_bearer_token_header_sent() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/secure")
            .header("authorization", "Bearer t0k3n");
        then.status(200);
    });

    let mut rb = RequestBuilder::with_default_adapter(server.base_url())
        .expect("adapter should build");
    rb.set_method(HttpMethod::Get)
        .set_path("/secure")
        .add_header_value(Auth::bearer_token("t0k3n"))
        .build()
        .expect("authorized request");

    mock.assert();
}
