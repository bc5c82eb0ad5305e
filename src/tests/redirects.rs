use crate::{get, redirect};

#[tokio::test]
async fn test_default_policy_follows_redirects() {
    let mut server = mockito::Server::new_async().await;
    let hop = server
        .mock("GET", "/start")
        .with_status(302)
        .with_header("location", &format!("{}/end", server.url()))
        .create_async()
        .await;
    let end = server
        .mock("GET", "/end")
        .with_body("done")
        .create_async()
        .await;

    let resp = get(format!("{}/start", server.url()), &[]).await.unwrap();
    assert_eq!(resp.status_code(), 200);
    assert_eq!(resp.text().await.unwrap(), "done");
    hop.assert_async().await;
    end.assert_async().await;
}

#[tokio::test]
async fn test_redirect_zero_surfaces_the_redirect() {
    let mut server = mockito::Server::new_async().await;
    let hop = server
        .mock("GET", "/start")
        .with_status(302)
        .with_header("location", &format!("{}/end", server.url()))
        .create_async()
        .await;
    let end = server
        .mock("GET", "/end")
        .expect(0)
        .create_async()
        .await;

    let err = get(format!("{}/start", server.url()), &[redirect(0)])
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(302));
    let resp = err.into_response().unwrap();
    assert_eq!(resp.header("location").unwrap(), format!("{}/end", server.url()));
    hop.assert_async().await;
    end.assert_async().await;
}

#[tokio::test]
async fn test_redirect_cap_surfaces_first_unfollowed_hop() {
    let mut server = mockito::Server::new_async().await;
    let a = server
        .mock("GET", "/a")
        .with_status(302)
        .with_header("location", &format!("{}/b", server.url()))
        .create_async()
        .await;
    let b = server
        .mock("GET", "/b")
        .with_status(302)
        .with_header("location", &format!("{}/c", server.url()))
        .create_async()
        .await;
    let c = server.mock("GET", "/c").expect(0).create_async().await;

    // One hop allowed: /a -> /b is followed, /b's redirect is surfaced.
    let err = get(format!("{}/a", server.url()), &[redirect(1)])
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(302));
    let resp = err.into_response().unwrap();
    assert_eq!(resp.header("location").unwrap(), format!("{}/c", server.url()));
    a.assert_async().await;
    b.assert_async().await;
    c.assert_async().await;
}

#[tokio::test]
async fn test_redirect_cap_allows_chains_within_limit() {
    let mut server = mockito::Server::new_async().await;
    let hop = server
        .mock("GET", "/start")
        .with_status(302)
        .with_header("location", &format!("{}/ok", server.url()))
        .create_async()
        .await;
    let ok = server.mock("GET", "/ok").with_body("made it").create_async().await;

    let resp = get(format!("{}/start", server.url()), &[redirect(1)])
        .await
        .unwrap();
    assert_eq!(resp.status_code(), 200);
    assert_eq!(resp.text().await.unwrap(), "made it");
    hop.assert_async().await;
    ok.assert_async().await;
}
