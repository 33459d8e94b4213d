//! End-to-end behavior of the fetch ladder against mock endpoints.

use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lottang_core::Rank;
use lottang_scraper::{fetch_winners, scan_archive, DebugDump, ScrapeConfig, Session};

fn config_for(desktop: &MockServer, mobile: &MockServer) -> ScrapeConfig {
    ScrapeConfig {
        desktop_base: format!("{}/store.do", desktop.uri()),
        mobile_base: format!("{}/store.do", mobile.uri()),
        user_agent: "lottang-test/0.1".to_string(),
        accept_language: "ko-KR,ko;q=0.9".to_string(),
        timeout_secs: 5,
        archive_max_pages: 3,
        archive_pause_min_ms: 0,
        archive_pause_max_ms: 1,
    }
}

fn winner_html(store: &str) -> String {
    format!(
        "<h3>1등 배출점</h3>\
         <table><thead><tr><th>상호</th><th>소재지</th></tr></thead>\
         <tbody><tr><td>{store}</td><td>서울 강남구 역삼동 1-1</td></tr></tbody></table>"
    )
}

const EMPTY_HTML: &str = "<html><body><p>조회된 결과가 없습니다.</p></body></html>";

#[tokio::test]
async fn first_strategy_success_stops_the_ladder() {
    let desktop = MockServer::start().await;
    let mobile = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store.do"))
        .and(query_param("method", "topStore"))
        .and(query_param("pageGubun", "L645"))
        .and(body_string_contains("drwNo=1101"))
        .respond_with(ResponseTemplate::new(200).set_body_string(winner_html("행운복권방")))
        .expect(1)
        .mount(&desktop)
        .await;

    // The mobile variant must see no traffic at all, warm-up included.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mobile)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mobile)
        .await;

    let config = config_for(&desktop, &mobile);
    let rows = fetch_winners(&config, 1101, &DebugDump::disabled())
        .await
        .expect("ladder runs");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].store_name, "행운복권방");
    assert_eq!(rows[0].rank, Some(Rank::First));
    assert_eq!(rows[0].draw_no, 1101);
}

#[tokio::test]
async fn empty_desktop_post_falls_back_to_mobile() {
    let desktop = MockServer::start().await;
    let mobile = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store.do"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_HTML))
        .expect(1)
        .mount(&desktop)
        .await;

    Mock::given(method("POST"))
        .and(path("/store.do"))
        .and(body_string_contains("drwNo=930"))
        .respond_with(ResponseTemplate::new(200).set_body_string(winner_html("모바일가게")))
        .expect(1)
        .mount(&mobile)
        .await;

    // The desktop GET strategy carries drwNo in the query and must not run.
    Mock::given(method("GET"))
        .and(query_param("drwNo", "930"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&desktop)
        .await;

    let config = config_for(&desktop, &mobile);
    let rows = fetch_winners(&config, 930, &DebugDump::disabled())
        .await
        .expect("ladder runs");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].store_name, "모바일가게");
}

#[tokio::test]
async fn network_failure_counts_as_zero_rows_and_ladder_continues() {
    let desktop = MockServer::start().await;
    let mobile = MockServer::start().await;

    // Strategy 1 blows up with a 500; strategy 2 parses to nothing;
    // strategy 3 (desktop GET) delivers.
    Mock::given(method("POST"))
        .and(path("/store.do"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&desktop)
        .await;
    Mock::given(method("POST"))
        .and(path("/store.do"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_HTML))
        .mount(&mobile)
        .await;
    Mock::given(method("GET"))
        .and(path("/store.do"))
        .and(query_param("drwNo", "800"))
        .respond_with(ResponseTemplate::new(200).set_body_string(winner_html("겟가게")))
        .expect(1)
        .mount(&desktop)
        .await;

    let config = config_for(&desktop, &mobile);
    let rows = fetch_winners(&config, 800, &DebugDump::disabled())
        .await
        .expect("ladder survives per-strategy failure");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].store_name, "겟가게");
}

#[tokio::test]
async fn archive_fallback_finds_the_draw_on_a_later_page() {
    let desktop = MockServer::start().await;
    let mobile = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_HTML))
        .mount(&desktop)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_HTML))
        .mount(&mobile)
        .await;
    Mock::given(method("GET"))
        .and(query_param("drwNo", "1050"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_HTML))
        .mount(&desktop)
        .await;

    let archive_hit = format!(
        "<h3>제 1050 회 2등 배출점</h3>\
         <table><thead><tr><th>상호</th><th>소재지</th></tr></thead>\
         <tbody><tr><td>아카이브가게</td><td>부산 해운대구 우동 2-2</td></tr></tbody></table>"
    );
    Mock::given(method("GET"))
        .and(query_param("nowPage", "1"))
        .and(query_param("method", "topStore"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<h3>제 1052 회</h3><p>다른 회차</p>"),
        )
        .expect(1)
        .mount(&desktop)
        .await;
    Mock::given(method("GET"))
        .and(query_param("nowPage", "2"))
        .and(query_param("method", "topStore"))
        .respond_with(ResponseTemplate::new(200).set_body_string(archive_hit))
        .expect(1)
        .mount(&desktop)
        .await;

    let config = config_for(&desktop, &mobile);
    let rows = fetch_winners(&config, 1050, &DebugDump::disabled())
        .await
        .expect("ladder runs");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].store_name, "아카이브가게");
    assert_eq!(rows[0].rank, Some(Rank::Second));
    assert_eq!(rows[0].draw_no, 1050);
}

#[tokio::test]
async fn full_miss_returns_empty_without_error() {
    let desktop = MockServer::start().await;
    let mobile = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_HTML))
        .mount(&desktop)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_HTML))
        .mount(&mobile)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_HTML))
        .mount(&desktop)
        .await;

    let config = config_for(&desktop, &mobile);
    let rows = fetch_winners(&config, 444, &DebugDump::disabled())
        .await
        .expect("a full miss is not an error");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn session_presents_warmup_cookies_on_later_requests() {
    let server = MockServer::start().await;
    let mobile = MockServer::start().await;

    // Warm-up GET hands out the session cookie.
    Mock::given(method("GET"))
        .and(path("/store.do"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("set-cookie", "JSESSIONID=abc123; Path=/"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/store.do"))
        .and(header("cookie", "JSESSIONID=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(winner_html("쿠키가게")))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, &mobile);
    let session = Session::open(&config, &config.desktop_referer())
        .await
        .expect("session opens");
    let body = session
        .post_form(
            &config.desktop_base,
            &[("method", "topStore"), ("pageGubun", "L645")],
            &[("drwNo", "1")],
        )
        .await
        .expect("cookie-bearing POST succeeds");
    assert!(body.contains("쿠키가게"));
}

#[tokio::test]
async fn warmup_failure_does_not_fail_session_open() {
    let server = MockServer::start().await;
    let mobile = MockServer::start().await;
    // No GET mock: the warm-up gets a 404 and is swallowed.
    Mock::given(method("POST"))
        .and(path("/store.do"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let config = config_for(&server, &mobile);
    let session = Session::open(&config, &config.desktop_referer())
        .await
        .expect("open succeeds despite warm-up miss");
    let body = session
        .post_form(&config.desktop_base, &[], &[("drwNo", "1")])
        .await
        .expect("requests still work without cookies");
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn archive_miss_scans_every_page_then_gives_up() {
    let server = MockServer::start().await;
    let mobile = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store.do"))
        .and(query_param("method", "topStore"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<h3>제 9999 회</h3><p>엉뚱한 회차</p>"),
        )
        .mount(&server)
        .await;

    let config = config_for(&server, &mobile);
    let session = Session::open(&config, &config.desktop_referer())
        .await
        .expect("session opens");

    let dump_dir = tempfile::tempdir().expect("tempdir");
    let dump = DebugDump::new(dump_dir.path());
    let rows = scan_archive(&session, &config, 3, 1050, &dump)
        .await
        .expect("scan completes");

    assert!(rows.is_empty());
    // The last page's body is preserved for diagnosis.
    let preserved = dump_dir.path().join("draw_1050_archive_last.html");
    assert!(preserved.exists(), "archive_last dump missing");
}
