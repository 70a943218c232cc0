//! These open real targets through the host's default handler, so they need a
//! desktop session and network access. Run with `cargo test -- --ignored`.

use uri_open::CancellationToken;

const GOOGLE_URI: &str = "http://google.com";
const INVALID_URI: &str = "xxxxxxxxxxxxxxx";

#[test]
#[ignore]
fn run() {
    uri_open::run(GOOGLE_URI).unwrap();
    assert!(uri_open::run(INVALID_URI).is_err());
}

#[tokio::test]
#[ignore]
async fn run_with_cancellation() {
    let cancel = CancellationToken::new();
    uri_open::run_with_cancellation(&cancel, GOOGLE_URI).await.unwrap();
    assert!(uri_open::run_with_cancellation(&cancel, INVALID_URI).await.is_err());
}

#[test]
#[ignore]
fn start() {
    uri_open::start(GOOGLE_URI).unwrap().wait().unwrap();

    let launch = uri_open::start(INVALID_URI).unwrap();
    assert!(launch.wait().is_err());
}

#[tokio::test]
#[ignore]
async fn start_with_cancellation() {
    let cancel = CancellationToken::new();
    let launch = uri_open::start_with_cancellation(&cancel, GOOGLE_URI).unwrap();
    launch.wait().await.unwrap();

    let launch = uri_open::start_with_cancellation(&cancel, INVALID_URI).unwrap();
    assert!(launch.wait().await.is_err());
}
