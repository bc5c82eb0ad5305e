use crate::{header, query, Session};
use mockito::Matcher;

#[tokio::test]
async fn test_session_defaults_apply_to_calls() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("x-session", "value")
        .create_async()
        .await;

    let session = Session::new(vec![header("X-Session", "value")]);
    session.post(server.url(), &[]).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_per_call_option_overrides_session_default() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_header("x-key", "override")
        .create_async()
        .await;

    let session = Session::new(vec![header("X-Key", "default")]);
    session
        .get(server.url(), &[header("X-Key", "override")])
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_session_query_defaults_merge_with_per_call_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("q".into(), "rust".into()),
        ]))
        .create_async()
        .await;

    let session = Session::new(vec![query([("page", "1")])]);
    session
        .get(server.url(), &[query([("q", "rust")])])
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_session_methods_carry_defaults_for_every_verb() {
    let mut server = mockito::Server::new_async().await;
    let session = Session::new(vec![header("X-Session", "value")]);

    let put_mock = server
        .mock("PUT", "/")
        .match_header("x-session", "value")
        .create_async()
        .await;
    let patch_mock = server
        .mock("PATCH", "/")
        .match_header("x-session", "value")
        .create_async()
        .await;
    let delete_mock = server
        .mock("DELETE", "/")
        .match_header("x-session", "value")
        .with_status(204)
        .create_async()
        .await;
    let head_mock = server
        .mock("HEAD", "/")
        .match_header("x-session", "value")
        .create_async()
        .await;
    let options_mock = server
        .mock("OPTIONS", "/")
        .match_header("x-session", "value")
        .create_async()
        .await;

    session.put(server.url(), &[]).await.unwrap();
    session.patch(server.url(), &[]).await.unwrap();
    session.delete(server.url(), &[]).await.unwrap();
    session.head(server.url(), &[]).await.unwrap();
    session.options(server.url(), &[]).await.unwrap();

    put_mock.assert_async().await;
    patch_mock.assert_async().await;
    delete_mock.assert_async().await;
    head_mock.assert_async().await;
    options_mock.assert_async().await;
}

#[tokio::test]
async fn test_session_is_shareable_across_tasks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_header("x-session", "value")
        .expect(2)
        .create_async()
        .await;

    let session = std::sync::Arc::new(Session::new(vec![header("X-Session", "value")]));
    let url = server.url();

    let a = tokio::spawn({
        let session = session.clone();
        let url = url.clone();
        async move { session.get(url, &[]).await }
    });
    let b = tokio::spawn({
        let session = session.clone();
        async move { session.get(url, &[]).await }
    });

    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();
    mock.assert_async().await;
}
