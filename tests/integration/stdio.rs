//! Newline-delimited JSON-RPC serving tests.

use crate::common::{self, envelope, fixtures};
use serde_json::{Value, json};
use servicenow_catalog_mcp::mcp_integration::stdio::PARSE_ERROR;
use tokio::io::BufReader;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve_lines(server: &MockServer, input: &str) -> Vec<Value> {
    let mcp_server = common::mock_mcp_server(server);
    let mut output = Vec::new();
    mcp_server
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .expect("serve should finish at end of input");

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).expect("each output line is JSON"))
        .collect()
}

#[tokio::test]
async fn test_stdio_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/now/table/sc_cat_item"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!([fixtures::laptop_item()]))),
        )
        .mount(&server)
        .await;

    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test-client","version":"1.0.0"}}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"list_catalog_items","arguments":{"query":"Mac"}}}"#,
    ]
    .join("\n");

    let responses = serve_lines(&server, &input).await;

    assert_eq!(responses.len(), 3, "notification and blank line get no reply");
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 7);

    let call = &responses[2];
    assert_eq!(call["id"], 3);
    assert_eq!(call["result"]["isError"], false);
    let text = call["result"]["content"][0]["text"].as_str().unwrap();
    let content: Value = serde_json::from_str(text).unwrap();
    assert_eq!(content["items"][0]["sys_id"], fixtures::LAPTOP_ITEM_ID);
}

#[tokio::test]
async fn test_stdio_recovers_after_bad_line() {
    let server = MockServer::start().await;

    let input = "{not json\n{\"jsonrpc\":\"2.0\",\"id\":\"p\",\"method\":\"ping\"}\n";
    let responses = serve_lines(&server, input).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[1]["id"], "p");
    assert_eq!(responses[1]["result"], json!({}));
    assert!(responses[1].get("error").is_none());
}

#[tokio::test]
async fn test_stdio_recovers_after_invalid_utf8() {
    let server = MockServer::start().await;
    let mcp_server = common::mock_mcp_server(&server);

    let mut input = br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#.to_vec();
    input.push(b'\n');
    input.extend_from_slice(&[0xff, 0xfe, b'\n']);
    input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);
    input.push(b'\n');

    let mut output = Vec::new();
    mcp_server
        .serve(BufReader::new(&input[..]), &mut output)
        .await
        .expect("invalid bytes should not stop the server");

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[1]["id"], Value::Null);
    assert_eq!(responses[1]["error"]["code"], PARSE_ERROR);
    assert_eq!(responses[2]["id"], 2);
    assert_eq!(responses[2]["result"], json!({}));
}

#[tokio::test]
async fn test_stdio_empty_input() {
    let server = MockServer::start().await;
    assert!(serve_lines(&server, "").await.is_empty());
}
