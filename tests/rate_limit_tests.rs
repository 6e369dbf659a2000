//! 全局限流集成测试

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, HttpResponse, web};

use wordgate::api::rate_limit::{build_rate_limit_config, rate_limiter};
use wordgate::config::RateLimitConfig;

fn peer(ip: &str) -> SocketAddr {
    format!("{}:40000", ip).parse().unwrap()
}

async fn ok() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

macro_rules! init_limited_app {
    ($trusted:expr) => {{
        let conf = build_rate_limit_config(&RateLimitConfig::default(), $trusted).unwrap();
        test::init_service(
            App::new()
                .wrap(rate_limiter(&conf))
                .route("/search", web::get().to(ok))
                .route("/get-favorites", web::get().to(ok)),
        )
        .await
    }};
}

#[actix_rt::test]
async fn test_third_request_in_window_is_rejected() {
    let app = init_limited_app!(&[]);

    for _ in 0..2 {
        let req = TestRequest::get()
            .uri("/search")
            .peer_addr(peer("203.0.113.5"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("x-ratelimit-remaining"));
    }

    let req = TestRequest::get()
        .uri("/search")
        .peer_addr(peer("203.0.113.5"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[actix_rt::test]
async fn test_third_request_late_in_window_is_rejected() {
    // 缩放后的配额：突发 2 次，每 2 秒补充 1 个，窗口 2 秒
    let conf = build_rate_limit_config(
        &RateLimitConfig {
            burst_size: 2,
            seconds_per_request: 2,
        },
        &[],
    )
    .unwrap();
    let app = test::init_service(
        App::new()
            .wrap(rate_limiter(&conf))
            .route("/search", web::get().to(ok)),
    )
    .await;
    let client = peer("203.0.113.77");

    for _ in 0..2 {
        let req = TestRequest::get().uri("/search").peer_addr(client).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    tokio::time::sleep(Duration::from_millis(1100)).await;
    let req = TestRequest::get().uri("/search").peer_addr(client).to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    // 窗口结束后恢复
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let req = TestRequest::get().uri("/search").peer_addr(client).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[test]
fn test_default_quota_is_two_per_two_minutes() {
    let config = RateLimitConfig::default();
    assert_eq!(config.burst_size, 2);
    assert_eq!(config.seconds_per_request, 120);
}

#[actix_rt::test]
async fn test_limit_is_shared_across_endpoints() {
    let app = init_limited_app!(&[]);
    let client = peer("198.51.100.7");

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/search").peer_addr(client).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/get-favorites")
            .peer_addr(client)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/get-favorites")
            .peer_addr(client)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[actix_rt::test]
async fn test_clients_are_counted_separately() {
    let app = init_limited_app!(&[]);

    for _ in 0..2 {
        let req = TestRequest::get()
            .uri("/search")
            .peer_addr(peer("192.0.2.1"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = TestRequest::get()
        .uri("/search")
        .peer_addr(peer("192.0.2.2"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_forwarded_for_ignored_from_untrusted_peer() {
    let app = init_limited_app!(&[]);

    // 伪造不同的 X-Forwarded-For 不能绕过限流
    for (i, status) in [StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]
        .into_iter()
        .enumerate()
    {
        let req = TestRequest::get()
            .uri("/search")
            .peer_addr(peer("192.0.2.50"))
            .insert_header(("X-Forwarded-For", format!("10.9.9.{}", i)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), status);
    }
}

#[actix_rt::test]
async fn test_forwarded_for_honored_from_trusted_proxy() {
    let trusted = vec!["10.0.0.0/8".to_string()];
    let app = init_limited_app!(&trusted);

    // 同一个代理后面的不同客户端各自计数
    for i in 0..3 {
        let req = TestRequest::get()
            .uri("/search")
            .peer_addr(peer("10.0.0.2"))
            .insert_header(("X-Forwarded-For", format!("203.0.113.{}", i)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
