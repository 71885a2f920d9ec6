use apiprobe::{HttpMethod, RequestBuilder};
use httpmock::Method::{DELETE, GET, POST, PUT};
use httpmock::MockServer;

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn execute_with_method(server: &MockServer, method: HttpMethod) {
    let mock = server.mock(|when, then| {
        let when = match method {
            HttpMethod::Get => when.method(GET),
            HttpMethod::Post => when.method(POST),
            HttpMethod::Put => when.method(PUT),
            HttpMethod::Delete => when.method(DELETE),
        };
        when.path("/resource");
        then.status(200).body("ok");
    });

    let mut rb = RequestBuilder::with_default_adapter(server.base_url())
        .expect("adapter should build");
    let response = rb
        .set_method(method)
        .set_path("/resource")
        .build()
        .expect("request should succeed");
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body(), "ok");

    mock.assert();
}

#[test]
fn test_get_request() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start();
    execute_with_method(&server, HttpMethod::Get);
}

#[test]
fn test_post_request() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start();
    execute_with_method(&server, HttpMethod::Post);
}

#[test]
fn test_put_request() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start();
    execute_with_method(&server, HttpMethod::Put);
}

#[test]
fn test_delete_request() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start();
    execute_with_method(&server, HttpMethod::Delete);
}

#[test]
fn test_method_persists_across_builds() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/posts/5");
        then.status(200).body("{}");
    });

    let mut rb = RequestBuilder::with_default_adapter(server.base_url())
        .expect("adapter should build");
    rb.set_method(HttpMethod::Delete).set_path("/posts/5");
    rb.build().expect("first delete");

    let response = rb.set_path("/posts/5").build().expect("second delete");
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body(), "{}");

    mock.assert_hits(2);
}
