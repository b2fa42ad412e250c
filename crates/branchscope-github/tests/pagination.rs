//! Listing endpoints must follow the platform's pagination links to the
//! last page instead of stopping at the first one.
//!
//! A minimal local HTTP stub plays the platform: it serves canned JSON
//! pages and advertises the next page through a `Link` header, the same
//! mechanism the real API uses.

use std::collections::HashMap;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use branchscope_github::{GitHubHost, PullState, RepoHost};

#[derive(Clone)]
struct StubPage {
    body: String,
    next: Option<String>,
}

async fn serve(listener: TcpListener, pages: HashMap<String, StubPage>) {
    loop {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let request = String::from_utf8_lossy(&request);
        let path = request
            .lines()
            .next()
            .and_then(|line| line.split_whitespace().nth(1))
            .unwrap_or("/")
            .to_string();

        let response = match pages.get(&path) {
            Some(page) => {
                let link = page
                    .next
                    .as_ref()
                    .map(|next| format!("Link: <{next}>; rel=\"next\"\r\n"))
                    .unwrap_or_default();
                format!(
                    "HTTP/1.1 200 OK\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     {link}Connection: close\r\n\r\n{}",
                    page.body.len(),
                    page.body
                )
            }
            None => "HTTP/1.1 404 Not Found\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: 2\r\nConnection: close\r\n\r\n{}"
                .to_string(),
        };
        let _ = socket.write_all(response.as_bytes()).await;
    }
}

fn pull_json(number: u64, author: &str) -> String {
    format!(
        r#"{{"number":{number},"user":{{"login":"{author}"}},"head":{{"ref":"feature/x","sha":"h{number}"}},"base":{{"ref":"main","sha":"b"}}}}"#
    )
}

fn contributor_json(login: &str) -> String {
    format!(r#"{{"login":"{login}","contributions":1}}"#)
}

#[tokio::test]
async fn pull_request_listing_spans_every_page() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let first_route = "/repos/octo/demo/pulls?state=all&per_page=100".to_string();
    let second_route = "/repos/octo/demo/pulls?state=all&per_page=100&page=2".to_string();
    let mut pages = HashMap::new();
    pages.insert(
        first_route,
        StubPage {
            body: format!("[{},{}]", pull_json(1, "alice"), pull_json(2, "bob")),
            next: Some(format!("{base}{second_route}")),
        },
    );
    pages.insert(
        second_route,
        StubPage {
            body: format!("[{}]", pull_json(3, "bob")),
            next: None,
        },
    );
    tokio::spawn(serve(listener, pages));

    let host = GitHubHost::with_base_uri(Some("test-token"), "octo/demo", &base).unwrap();
    let pulls = host.pull_requests(PullState::All).await.unwrap();

    let numbers: Vec<u64> = pulls.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[tokio::test]
async fn contributor_listing_spans_every_page() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let first_route = "/repos/octo/demo/contributors?per_page=100".to_string();
    let second_route = "/repos/octo/demo/contributors?per_page=100&page=2".to_string();
    let mut pages = HashMap::new();
    pages.insert(
        first_route,
        StubPage {
            body: format!(
                "[{},{}]",
                contributor_json("alice"),
                contributor_json("bob")
            ),
            next: Some(format!("{base}{second_route}")),
        },
    );
    pages.insert(
        second_route,
        StubPage {
            body: format!("[{}]", contributor_json("carol")),
            next: None,
        },
    );
    tokio::spawn(serve(listener, pages));

    let host = GitHubHost::with_base_uri(Some("test-token"), "octo/demo", &base).unwrap();
    let contributors = host.contributors().await.unwrap();

    let logins: Vec<&str> = contributors.iter().map(|c| c.login.as_str()).collect();
    assert_eq!(logins, vec!["alice", "bob", "carol"]);
}

#[tokio::test]
async fn single_page_listing_needs_no_link_header() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let mut pages = HashMap::new();
    pages.insert(
        "/repos/octo/demo/contributors?per_page=100".to_string(),
        StubPage {
            body: format!("[{}]", contributor_json("alice")),
            next: None,
        },
    );
    tokio::spawn(serve(listener, pages));

    let host = GitHubHost::with_base_uri(Some("test-token"), "octo/demo", &base).unwrap();
    let contributors = host.contributors().await.unwrap();
    assert_eq!(contributors.len(), 1);
}
