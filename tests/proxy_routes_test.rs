mod common;

use axum::http::{StatusCode, header};
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, header as header_eq, method, path},
};

use common::*;

const MANIFEST: &str = "#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-TARGETDURATION:10\n#EXTINF:10.0,\nseg1.ts\n#EXTINF:10.0,\n/abs/seg2.ts\n#EXT-X-ENDLIST\n";

fn proxy_uri(route: &str, target: &str, extra: &str) -> String {
    let mut uri = format!("{route}?url={}", urlencoding::encode(target));
    if !extra.is_empty() {
        uri.push('&');
        uri.push_str(extra);
    }
    uri
}

#[tokio::test]
async fn test_segmented_manifest_is_rewritten_through_segment_proxy() {
    let origin = MockServer::start().await;
    let logos = logo_file();
    Mock::given(method("GET"))
        .and(path("/live/index.m3u8"))
        .and(header_eq("referer", "https://vavoo.to/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MANIFEST))
        .mount(&origin)
        .await;
    let app = app(test_config(&origin, &logos));

    let target = format!("{}/live/index.m3u8", origin.uri());
    let (status, headers, body) = send(&app, &proxy_uri("/proxy/m3u", &target, ""), &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/vnd.apple.mpegurl");
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache");

    let body = String::from_utf8(body.to_vec()).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), MANIFEST.lines().count());
    assert_eq!(lines[0], "#EXTM3U");
    assert_eq!(lines[3], "#EXTINF:10.0,");
    assert_eq!(lines[7], "#EXT-X-ENDLIST");

    let seg1 = format!("{}/live/seg1.ts", origin.uri());
    let seg2 = format!("{}/abs/seg2.ts", origin.uri());
    assert!(lines[4].starts_with(&format!("/proxy/ts?url={}&", urlencoding::encode(&seg1))));
    assert!(lines[6].starts_with(&format!("/proxy/ts?url={}&", urlencoding::encode(&seg2))));
    assert!(lines[4].contains("header_Referer=https%3A%2F%2Fvavoo.to%2F"));
    assert!(lines[4].contains("header_Origin=https%3A%2F%2Fvavoo.to"));
}

#[tokio::test]
async fn test_flat_playlist_passes_through_verbatim() {
    let origin = MockServer::start().await;
    let logos = logo_file();
    let flat = "#EXTM3U\nhttp://a.example/1.ts\nhttp://a.example/2.ts\n";
    Mock::given(method("GET"))
        .and(path("/flat.m3u"))
        .respond_with(ResponseTemplate::new(200).set_body_string(flat))
        .mount(&origin)
        .await;
    let app = app(test_config(&origin, &logos));

    let target = format!("{}/flat.m3u", origin.uri());
    let (status, headers, body) = send(&app, &proxy_uri("/proxy/m3u", &target, ""), &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "audio/x-mpegurl");
    assert_eq!(&body[..], flat.as_bytes());
}

#[tokio::test]
async fn test_relative_segments_resolve_against_post_redirect_url() {
    let origin = MockServer::start().await;
    let logos = logo_file();
    let edge = format!("{}/cdn/edge/index.m3u8", origin.uri());
    Mock::given(method("GET"))
        .and(path("/play/7/index.m3u8"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", edge.as_str()))
        .mount(&origin)
        .await;
    Mock::given(method("GET"))
        .and(path("/cdn/edge/index.m3u8"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MANIFEST))
        .mount(&origin)
        .await;
    let app = app(test_config(&origin, &logos));

    let target = format!("{}/play/7/index.m3u8", origin.uri());
    let (status, _, body) = send(&app, &proxy_uri("/proxy/m3u", &target, ""), &[]).await;

    assert_eq!(status, StatusCode::OK);
    let body = String::from_utf8(body.to_vec()).unwrap();
    let seg1 = format!("{}/cdn/edge/seg1.ts", origin.uri());
    assert!(body.contains(&*urlencoding::encode(&seg1)));
}

#[tokio::test]
async fn test_request_headers_override_defaults_upstream() {
    let origin = MockServer::start().await;
    let logos = logo_file();
    Mock::given(method("GET"))
        .and(path("/live/index.m3u8"))
        .and(header_eq("user-agent", "VLC/3.0"))
        .and(header_eq("x-token", "abc"))
        .and(header_eq("origin", "https://vavoo.to"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MANIFEST))
        .expect(1)
        .mount(&origin)
        .await;
    let app = app(test_config(&origin, &logos));

    let target = format!("{}/live/index.m3u8", origin.uri());
    let uri = proxy_uri("/proxy/m3u", &target, "header_User-Agent=VLC%2F3.0&header_x_token=abc");
    let (status, _, body) = send(&app, &uri, &[]).await;

    assert_eq!(status, StatusCode::OK);
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("header_User-Agent=VLC%2F3.0"));
    assert!(body.contains("header_X-Token=abc"));
}

#[tokio::test]
async fn test_missing_url_is_rejected_without_contacting_origin() {
    let origin = MockServer::start().await;
    let logos = logo_file();
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&origin)
        .await;
    let app = app(test_config(&origin, &logos));

    for uri in ["/proxy/m3u", "/proxy/ts", "/proxy/m3u?url=", "/proxy/ts?header_Referer=x"] {
        let (status, headers, body) = send(&app, uri, &[]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));
        assert!(String::from_utf8_lossy(&body).contains("url"));
    }
}

#[tokio::test]
async fn test_slow_origin_yields_gateway_timeout() {
    let origin = MockServer::start().await;
    let logos = logo_file();
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(MANIFEST)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&origin)
        .await;
    let app = app(test_config(&origin, &logos));

    let target = format!("{}/slow/index.m3u8", origin.uri());
    let (status, _, _) = send(&app, &proxy_uri("/proxy/m3u", &target, ""), &[]).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);

    let target = format!("{}/slow/seg.ts", origin.uri());
    let (status, _, _) = send(&app, &proxy_uri("/proxy/ts", &target, ""), &[]).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn test_origin_error_status_yields_internal_error() {
    let origin = MockServer::start().await;
    let logos = logo_file();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&origin)
        .await;
    let app = app(test_config(&origin, &logos));

    let target = format!("{}/gone/index.m3u8", origin.uri());
    let (status, _, body) = send(&app, &proxy_uri("/proxy/m3u", &target, ""), &[]).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(String::from_utf8_lossy(&body).starts_with("Error"));

    let target = format!("{}/gone/seg.ts", origin.uri());
    let (status, _, _) = send(&app, &proxy_uri("/proxy/ts", &target, ""), &[]).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_segment_bytes_are_relayed_unchanged() {
    let origin = MockServer::start().await;
    let logos = logo_file();
    let payload: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
    Mock::given(method("GET"))
        .and(path("/live/seg1.ts"))
        .and(header_eq("referer", "https://elsewhere.example/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
        .mount(&origin)
        .await;
    let app = app(test_config(&origin, &logos));

    let target = format!("{}/live/seg1.ts", origin.uri());
    let uri = proxy_uri(
        "/proxy/ts",
        &target,
        "header_Referer=https%3A%2F%2Felsewhere.example%2F",
    );
    let (status, headers, body) = send(&app, &uri, &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "video/mp2t");
    assert_eq!(headers[header::CONTENT_LENGTH], "5000");
    assert_eq!(body.to_vec(), payload);
}

#[tokio::test]
async fn test_rewritten_segment_url_round_trips_through_segment_proxy() {
    let origin = MockServer::start().await;
    let logos = logo_file();
    Mock::given(method("GET"))
        .and(path("/live/index.m3u8"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MANIFEST))
        .mount(&origin)
        .await;
    Mock::given(method("GET"))
        .and(path("/live/seg1.ts"))
        .and(header_eq("referer", "https://vavoo.to/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x47u8; 376]))
        .expect(1)
        .mount(&origin)
        .await;
    let app = app(test_config(&origin, &logos));

    let target = format!("{}/live/index.m3u8", origin.uri());
    let (_, _, body) = send(&app, &proxy_uri("/proxy/m3u", &target, ""), &[]).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    let segment_uri = body.lines().nth(4).unwrap().to_string();

    let (status, _, bytes) = send(&app, &segment_uri, &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes.len(), 376);
}
