//! Endpoint tests against a local mock HTTP server

use alpaca_config::Environment;
use alpaca_rest::{
    ActivityQuery, AlpacaClient, BarsQuery, OrderQuery, OrderRequest, PortfolioHistoryQuery, ReplaceOrderRequest,
    RestError,
};
use alpaca_types::{AccountActivity, ActionStatus, AssetClass, OrderSide, TimeInForce};
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY_ID: &str = "AKTESTKEY";
const SECRET_KEY: &str = "test-secret";

const ACCOUNT_JSON: &str = r#"{
    "account_blocked": false,
    "account_number": "010203ABCD",
    "buying_power": "262113.632",
    "cash": "-23140.2",
    "created_at": "2019-06-12T22:47:07.99658Z",
    "currency": "USD",
    "daytrade_count": 0,
    "daytrading_buying_power": "262113.632",
    "equity": "103820.56",
    "id": "e6fe16f3-64a4-4921-8928-cadf02f92f98",
    "initial_margin": "63480.38",
    "last_equity": "103529.24",
    "last_maintenance_margin": "38000.832",
    "long_market_value": "126960.76",
    "maintenance_margin": "38088.228",
    "multiplier": "4",
    "pattern_day_trader": false,
    "portfolio_value": "103820.56",
    "regt_buying_power": "80680.36",
    "short_market_value": "0",
    "shorting_enabled": true,
    "sma": "0",
    "status": "ACTIVE",
    "trade_suspended_by_user": false,
    "trading_blocked": false,
    "transfers_blocked": false
}"#;

const ORDER_JSON: &str = r#"{
    "id": "904837e3-3b76-47ec-b432-046db621571b",
    "client_order_id": "my-order",
    "created_at": "2018-10-05T05:48:59Z",
    "submitted_at": "2018-10-05T05:48:59Z",
    "asset_id": "904837e3-3b76-47ec-b432-046db621571b",
    "symbol": "AMD",
    "asset_class": "us_equity",
    "qty": "1",
    "filled_qty": "0",
    "type": "limit",
    "side": "sell",
    "time_in_force": "opg",
    "limit_price": "20.50",
    "status": "accepted",
    "extended_hours": false
}"#;

const POSITION_JSON: &str = r#"{
    "asset_id": "904837e3-3b76-47ec-b432-046db621571b",
    "symbol": "AAPL",
    "exchange": "NASDAQ",
    "asset_class": "us_equity",
    "avg_entry_price": "100.0",
    "qty": "5",
    "side": "long",
    "market_value": "600.0",
    "cost_basis": "500.0",
    "unrealized_pl": "100.0",
    "unrealized_plpc": "0.20",
    "unrealized_intraday_pl": "10.0",
    "unrealized_intraday_plpc": "0.0084",
    "current_price": "120.0",
    "lastday_price": "119.0",
    "change_today": "0.0084"
}"#;

const ASSET_JSON: &str = r#"{
    "id": "904837e3-3b76-47ec-b432-046db621571b",
    "class": "us_equity",
    "exchange": "NASDAQ",
    "symbol": "AAPL",
    "status": "active",
    "tradable": true,
    "marginable": true,
    "shortable": true,
    "easy_to_borrow": true
}"#;

const WATCHLIST_JSON: &str = r#"{
    "account_id": "1d5493c9-ea39-4377-aa94-340734c368ae",
    "assets": [{
        "class": "us_equity",
        "easy_to_borrow": true,
        "exchange": "ARCA",
        "id": "b28f4066-5c6d-479b-a2af-85dc1a8f16fb",
        "marginable": true,
        "shortable": true,
        "status": "active",
        "symbol": "SPY",
        "tradable": true
    }],
    "created_at": "2019-10-30T07:54:42.981322Z",
    "id": "fb306e55-16d3-4118-8c3d-c1615fcd4c03",
    "name": "Monday List",
    "updated_at": "2019-10-30T07:54:42.981322Z"
}"#;

fn json_response(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json")
}

/// Client with both hosts pointing at the same mock server
fn client_for(server: &MockServer) -> AlpacaClient {
    client_with_hosts(&server.uri(), &server.uri())
}

fn client_with_hosts(base_url: &str, data_url: &str) -> AlpacaClient {
    let mut env = Environment::from_credentials(KEY_ID, SECRET_KEY, base_url).with_data_url(data_url);
    AlpacaClient::new(&mut env).unwrap()
}

#[tokio::test]
async fn test_get_account_sends_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .and(header("APCA-API-KEY-ID", KEY_ID))
        .and(header("APCA-API-SECRET-KEY", SECRET_KEY))
        .respond_with(json_response(200, ACCOUNT_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let account = client_for(&server).get_account().await.unwrap();
    assert_eq!(account.account_number, "010203ABCD");
    assert_eq!(account.buying_power, dec!(262113.632));
    assert!(account.can_trade());
}

#[tokio::test]
async fn test_api_error_is_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/positions/TSLA"))
        .respond_with(json_response(404, r#"{"code":40410000,"message":"position does not exist"}"#))
        .mount(&server)
        .await;

    let err = client_for(&server).get_position("TSLA").await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        RestError::Api { status, code, message } => {
            assert_eq!(status, 404);
            assert_eq!(code, Some(40410000));
            assert_eq!(message, "position does not exist");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unparseable_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/clock"))
        .respond_with(json_response(200, r#"{"is_open": "maybe"}"#))
        .mount(&server)
        .await;

    let err = client_for(&server).get_clock().await.unwrap_err();
    assert!(matches!(err, RestError::Parse(_)));
}

#[tokio::test]
async fn test_account_configurations_roundtrip() {
    let server = MockServer::start().await;
    let body = json!({
        "dtbp_check": "entry",
        "no_shorting": true,
        "suspend_trade": false,
        "trade_confirm_email": "all"
    });
    Mock::given(method("GET"))
        .and(path("/v2/account/configurations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v2/account/configurations"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let configurations = client.get_account_configurations().await.unwrap();
    assert!(configurations.no_shorting);

    let updated = client.update_account_configurations(&configurations).await.unwrap();
    assert_eq!(updated, configurations);
}

#[tokio::test]
async fn test_get_account_activity() {
    let server = MockServer::start().await;
    let activities = r#"[
        {
            "activity_type": "FILL",
            "cum_qty": "1",
            "id": "20190524113406977::8efc7b9a-8b2b-4000-9955-d36e7db0df74",
            "leaves_qty": "0",
            "price": "1.63",
            "qty": "1",
            "side": "buy",
            "symbol": "LPCN",
            "transaction_time": "2019-05-24T15:34:06.977Z",
            "order_id": "904837e3-3b76-47ec-b432-046db621571b",
            "type": "fill"
        },
        {
            "activity_type": "DIV",
            "id": "20190801011955195::5f596936-6f23-4cef-bdf1-3806aae57dbf",
            "date": "2019-08-01",
            "net_amount": "1.02",
            "symbol": "T",
            "qty": "2",
            "per_share_amount": "0.51"
        }
    ]"#;
    Mock::given(method("GET"))
        .and(path("/v2/account/activities"))
        .and(query_param("activity_types", "FILL,DIV"))
        .respond_with(json_response(200, activities))
        .mount(&server)
        .await;

    let query = ActivityQuery::builder()
        .activity_types(vec!["FILL".to_string(), "DIV".to_string()])
        .build();
    let result = client_for(&server).get_account_activity(&query).await.unwrap();

    assert_eq!(result.len(), 2);
    assert!(matches!(result[0], AccountActivity::Trade(_)));
    assert!(matches!(result[1], AccountActivity::NonTrade(_)));
    assert_eq!(result[1].activity_type(), "DIV");
}

#[tokio::test]
async fn test_single_activity_type_uses_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account/activities/DIV"))
        .and(query_param("page_size", "5"))
        .respond_with(json_response(200, "[]"))
        .expect(1)
        .mount(&server)
        .await;

    let query = ActivityQuery::builder()
        .activity_types(vec!["DIV".to_string()])
        .page_size(5)
        .build();
    let result = client_for(&server).get_account_activity(&query).await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_submit_order_posts_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .and(body_json(json!({
            "symbol": "AMD",
            "qty": "1",
            "side": "sell",
            "type": "limit",
            "time_in_force": "opg",
            "limit_price": "20.50",
            "client_order_id": "my-order",
            "extended_hours": false
        })))
        .respond_with(json_response(200, ORDER_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let request = OrderRequest::limit("AMD", OrderSide::Sell, dec!(1), dec!(20.50))
        .with_time_in_force(TimeInForce::Opg)
        .with_client_order_id("my-order");
    let order = client_for(&server).submit_order(&request).await.unwrap();

    assert_eq!(order.symbol, "AMD");
    assert_eq!(order.limit_price, Some(dec!(20.50)));
    assert_eq!(order.status, "accepted");
}

#[tokio::test]
async fn test_invalid_order_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .respond_with(json_response(200, ORDER_JSON))
        .expect(0)
        .mount(&server)
        .await;

    let request = OrderRequest::market("AAPL", OrderSide::Buy, dec!(0));
    let err = client_for(&server).submit_order(&request).await.unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)));
}

#[tokio::test]
async fn test_list_and_lookup_orders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/orders"))
        .and(query_param("status", "closed"))
        .and(query_param("limit", "2"))
        .respond_with(json_response(200, &format!("[{}]", ORDER_JSON)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/orders:by_client_order_id"))
        .and(query_param("client_order_id", "my-order"))
        .respond_with(json_response(200, ORDER_JSON))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/orders/904837e3-3b76-47ec-b432-046db621571b"))
        .respond_with(json_response(200, ORDER_JSON))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = OrderQuery::builder().status(ActionStatus::Closed).limit(2).build();
    let orders = client.get_orders(&query).await.unwrap();
    assert_eq!(orders.len(), 1);

    let by_client_id = client.get_order_by_client_order_id("my-order").await.unwrap();
    let by_id = client.get_order(&by_client_id.id).await.unwrap();
    assert_eq!(by_id, by_client_id);
}

#[tokio::test]
async fn test_replace_and_cancel_orders() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v2/orders/abc"))
        .and(body_json(json!({"limit_price": "21"})))
        .respond_with(json_response(200, ORDER_JSON))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/orders/abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/orders"))
        .respond_with(json_response(
            207,
            &format!(
                r#"[{{"id":"o1","status":200,"body":{}}},{{"id":"o2","status":500,"body":{{"code":50010000,"message":"failed"}}}}]"#,
                ORDER_JSON
            ),
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let empty = client.replace_order("abc", &ReplaceOrderRequest::new()).await.unwrap_err();
    assert!(matches!(empty, RestError::InvalidParameter(_)));

    let replace = ReplaceOrderRequest::new().with_limit_price(dec!(21));
    client.replace_order("abc", &replace).await.unwrap();

    client.cancel_order("abc").await.unwrap();

    let results = client.cancel_orders().await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_success());
    assert_eq!(results[0].order().unwrap().symbol, "AMD");
    assert!(!results[1].is_success());
}

#[tokio::test]
async fn test_positions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/positions"))
        .respond_with(json_response(200, &format!("[{}]", POSITION_JSON)))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/positions/AAPL"))
        .respond_with(json_response(200, ORDER_JSON))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/positions"))
        .respond_with(json_response(
            207,
            &format!(r#"[{{"symbol":"AAPL","status":200,"body":{}}}]"#, ORDER_JSON),
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let positions = client.get_positions().await.unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].qty, dec!(5));

    let closing = client.close_position("AAPL").await.unwrap();
    assert_eq!(closing.side, OrderSide::Sell);

    let closed = client.close_positions().await.unwrap();
    assert_eq!(closed[0].id, "AAPL");
    assert!(closed[0].order().is_some());
}

#[tokio::test]
async fn test_slash_in_symbol_stays_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/positions/BTC%2FUSD"))
        .respond_with(json_response(200, POSITION_JSON))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/watchlists/fb306e55/BTC%2FUSD"))
        .respond_with(json_response(200, WATCHLIST_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let position = client.get_position("BTC/USD").await.unwrap();
    assert_eq!(position.symbol, "AAPL");

    let watchlist = client.remove_asset_from_watchlist("fb306e55", "BTC/USD").await.unwrap();
    assert_eq!(watchlist.name, "Monday List");
}

#[tokio::test]
async fn test_assets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/assets"))
        .and(query_param("status", "active"))
        .and(query_param("asset_class", "us_equity"))
        .respond_with(json_response(200, &format!("[{}]", ASSET_JSON)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/assets/AAPL"))
        .respond_with(json_response(200, ASSET_JSON))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let assets = client.get_assets(ActionStatus::Active, AssetClass::UsEquity).await.unwrap();
    assert_eq!(assets.len(), 1);

    let asset = client.get_asset("AAPL").await.unwrap();
    assert!(asset.tradable);
}

#[tokio::test]
async fn test_clock_and_calendar() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/clock"))
        .respond_with(json_response(
            200,
            r#"{"timestamp":"2018-04-01T12:00:00.000Z","is_open":true,
                "next_open":"2018-04-02T13:30:00.000Z","next_close":"2018-04-01T20:00:00.000Z"}"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/calendar"))
        .and(query_param("start", "2018-01-02"))
        .and(query_param("end", "2018-01-03"))
        .respond_with(json_response(
            200,
            r#"[{"date":"2018-01-02","open":"09:30","close":"16:00"},
                {"date":"2018-01-03","open":"09:30","close":"16:00"}]"#,
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.get_clock().await.unwrap().is_open);

    let days = client
        .get_calendar(NaiveDate::from_ymd_opt(2018, 1, 2), NaiveDate::from_ymd_opt(2018, 1, 3))
        .await
        .unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2018, 1, 3).unwrap());
}

#[tokio::test]
async fn test_watchlist_lifecycle() {
    let server = MockServer::start().await;
    let id = "fb306e55-16d3-4118-8c3d-c1615fcd4c03";
    Mock::given(method("POST"))
        .and(path("/v2/watchlists"))
        .and(body_json(json!({"name": "Monday List", "symbols": ["SPY"]})))
        .respond_with(json_response(200, WATCHLIST_JSON))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/watchlists"))
        .respond_with(json_response(200, &format!("[{}]", WATCHLIST_JSON)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v2/watchlists/{}", id)))
        .respond_with(json_response(200, WATCHLIST_JSON))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/v2/watchlists/{}", id)))
        .and(body_json(json!({"name": "Tuesday List", "symbols": []})))
        .respond_with(json_response(200, WATCHLIST_JSON))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/v2/watchlists/{}", id)))
        .and(body_json(json!({"symbol": "AMZN"})))
        .respond_with(json_response(200, WATCHLIST_JSON))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/v2/watchlists/{}/SPY", id)))
        .respond_with(json_response(200, WATCHLIST_JSON))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/v2/watchlists/{}", id)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client
        .create_watchlist("Monday List", &["SPY".to_string()])
        .await
        .unwrap();
    assert!(created.contains("SPY"));

    assert_eq!(client.get_watchlists().await.unwrap().len(), 1);
    assert_eq!(client.get_watchlist(id).await.unwrap().id, id);
    client.update_watchlist(id, "Tuesday List", &[]).await.unwrap();
    client.add_asset_to_watchlist(id, "AMZN").await.unwrap();
    client.remove_asset_from_watchlist(id, "SPY").await.unwrap();
    client.delete_watchlist(id).await.unwrap();
}

#[tokio::test]
async fn test_portfolio_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account/portfolio/history"))
        .and(query_param("period", "1W"))
        .and(query_param("timeframe", "15Min"))
        .and(query_param("extended_hours", "true"))
        .respond_with(json_response(
            200,
            r#"{"timestamp":[1580826600000,1580827500000],"equity":[27423.73,27408.19],
                "profit_loss":[11.8,-3.74],"profit_loss_pct":[0.0004,-0.0001],
                "base_value":27411.93,"timeframe":"15Min"}"#,
        ))
        .mount(&server)
        .await;

    let query = PortfolioHistoryQuery::builder()
        .period("1W")
        .timeframe("15Min")
        .extended_hours(true)
        .build();
    let history = client_for(&server).get_portfolio_history(&query).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.latest_equity(), Some(27408.19));
}

#[tokio::test]
async fn test_market_data_uses_data_host() {
    let trading = MockServer::start().await;
    let data = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/bars/1D"))
        .and(query_param("symbols", "AAPL,MSFT"))
        .and(query_param("start", "2020-04-01T09:30:00-04:00"))
        .and(query_param("limit", "100"))
        .and(header("APCA-API-KEY-ID", KEY_ID))
        .respond_with(json_response(
            200,
            r#"{"AAPL":[{"t":1585747800,"o":246.5,"h":248.72,"l":239.13,"c":240.91,"v":44054638}],"MSFT":[]}"#,
        ))
        .expect(1)
        .mount(&data)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/last/stocks/SPY"))
        .respond_with(json_response(
            200,
            r#"{"status":"success","symbol":"SPY","last":{"price":286.84,"size":100,"exchange":2,
                "cond1":12,"cond2":0,"cond3":0,"cond4":0,"timestamp":1588770424970329400}}"#,
        ))
        .mount(&data)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/last_quote/stocks/SPY"))
        .respond_with(json_response(
            200,
            r#"{"status":"success","symbol":"SPY","last":{"askprice":279.1,"asksize":1,"askexchange":15,
                "bidprice":287.05,"bidsize":10,"bidexchange":17,"timestamp":1588770424970329400}}"#,
        ))
        .mount(&data)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&trading)
        .await;

    let client = client_with_hosts(&trading.uri(), &data.uri());

    let query = BarsQuery::builder()
        .symbols(vec!["AAPL".to_string(), "MSFT".to_string()])
        .start("2020-04-01T09:30:00-04:00")
        .build();
    let bars = client.get_bars(&query).await.unwrap();
    let aapl = bars.get("AAPL").unwrap();
    assert_eq!(aapl.len(), 1);
    assert_eq!(aapl[0].open, dec!(246.5));
    assert!(bars.get("MSFT").unwrap().is_empty());

    let trade = client.get_last_trade("SPY").await.unwrap();
    assert_eq!(trade.trade.price, dec!(286.84));

    let quote = client.get_last_quote("SPY").await.unwrap();
    assert_eq!(quote.quote.ask_price, dec!(279.1));
}
