//! Integration tests for the scripting-endpoint client
//!
//! WireMock stands in for the remote script. Coverage:
//! - envelope tolerance (bare arrays vs. `{data: [...]}`)
//! - quotation normalization through the wire
//! - error passthrough (HTTP status, `{success:false}`, non-JSON bodies)
//! - action payload shapes for mutations

use procura_core::ports::{NegotiationUpdate, SheetGateway, StageUpdate};
use procura_domain::{IntakeForm, ProcuraError, SheetsConfig, Stage};
use procura_infra::SheetClient;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SheetClient {
    let config = SheetsConfig {
        script_url: server.uri(),
        read_url: None,
        update_url: None,
        timeout_seconds: 5,
    };
    SheetClient::new(config).unwrap()
}

fn client_with_split_urls(read: &MockServer, update: &MockServer) -> SheetClient {
    let config = SheetsConfig {
        script_url: update.uri(),
        read_url: Some(read.uri()),
        update_url: Some(update.uri()),
        timeout_seconds: 5,
    };
    SheetClient::new(config).unwrap()
}

#[tokio::test]
async fn submissions_accept_the_enveloped_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{
                "id": "7",
                "requestId": "REQ-2024-007",
                "requesterName": "Dana Cole",
                "itemName": "Laptop",
                "stage": "Sourcing"
            }]
        })))
        .mount(&server)
        .await;

    let submissions = client_for(&server).fetch_submissions().await.unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].effective_id(), "REQ-2024-007");
    assert_eq!(submissions[0].stage, Stage::Sourcing);
}

#[tokio::test]
async fn submissions_accept_a_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "itemName": "Monitor", "stage": "Intake"}
        ])))
        .mount(&server)
        .await;

    let submissions = client_for(&server).fetch_submissions().await.unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].stage, Stage::Intake);
}

#[tokio::test]
async fn quotations_are_normalized_on_the_way_in() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("action", "quotations"))
        .and(query_param("requestId", "REQ-2024-007"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "quotations": [{
                "requestid": "REQ-2024-007",
                "vendorname": "Acme",
                "unitprice": "51",
                "Unit Price": 999999,
                "Selected": "1",
                "agreementaccepted": "",
                "posent": 0
            }]
        })))
        .mount(&server)
        .await;

    let quotations = client_for(&server).fetch_quotations("REQ-2024-007").await.unwrap();
    assert_eq!(quotations.len(), 1);
    let q = &quotations[0];
    assert_eq!(q.vendor_name, "Acme");
    assert_eq!(q.unit_price, 51.0);
    assert_eq!(q.selected, 1);
    assert_eq!(q.agreement_accepted, 0);
    assert_eq!(q.po_sent, 0);
}

#[tokio::test]
async fn vendors_query_carries_the_item_filter() {
    let read = MockServer::start().await;
    let update = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("action", "vendors"))
        .and(query_param("itemName", "Laptop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "vendors": [
                {"name": "Acme", "itemName": "Laptop", "TIER": "gold"},
                {"name": "Globex", "itemName": "Laptop"}
            ]
        })))
        .mount(&read)
        .await;

    let vendors =
        client_with_split_urls(&read, &update).fetch_vendors(Some("Laptop")).await.unwrap();
    assert_eq!(vendors.len(), 2);
    assert_eq!(vendors[0].tier.as_deref(), Some("GOLD"));
    assert_eq!(vendors[1].tier, None);
}

#[tokio::test]
async fn html_error_pages_become_protocol_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Authorization needed</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_submissions().await.unwrap_err();
    match err {
        ProcuraError::UpstreamProtocol(preview) => {
            assert!(preview.contains("Authorization needed"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn upstream_http_errors_keep_their_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"error": "script overloaded"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_submissions().await.unwrap_err();
    match err {
        ProcuraError::Upstream { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "script overloaded");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn success_false_payloads_surface_the_upstream_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Request ID not found in sheet"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .update_vendor_approval("REQ-2024-404", "Acme", true)
        .await
        .unwrap_err();
    match err {
        ProcuraError::Upstream { message, .. } => {
            assert_eq!(message, "Request ID not found in sheet");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn intake_posts_a_joined_vendor_list_and_returns_the_receipt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({
            "itemName": "Laptop",
            "preferredVendor": "Acme, Globex",
            "stage": "Intake"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "requestId": "REQ-2024-101",
            "customerId": "CUST-12"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let form: IntakeForm = serde_json::from_value(json!({
        "itemName": "Laptop",
        "preferredVendor": ["Acme", "Globex"],
        "stage": "Intake"
    }))
    .unwrap();

    let receipt = client_for(&server).submit_intake(&form).await.unwrap();
    assert_eq!(receipt.request_id, "REQ-2024-101");
    assert_eq!(receipt.customer_id.as_deref(), Some("CUST-12"));
}

#[tokio::test]
async fn stage_updates_send_both_id_aliases() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "id": "REQ-2024-009",
            "requestId": "REQ-2024-009",
            "stage": "Negotiations"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "updated": true})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let update = StageUpdate {
        request_id: Some("REQ-2024-009".into()),
        stage: "Negotiations".into(),
        ..Default::default()
    };
    let value = client_for(&server).update_stage(&update).await.unwrap();
    assert_eq!(value["updated"], Value::Bool(true));
}

#[tokio::test]
async fn mutations_carry_their_action_keyword() {
    let server = MockServer::start().await;
    for action in
        ["updateVendorSelection", "updateQuotationNegotiation", "updateAgreementAcceptance"]
    {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"action": action})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    client.update_vendor_selection("REQ-1", "Acme", true).await.unwrap();
    client
        .update_negotiation(&NegotiationUpdate {
            request_id: "REQ-1".into(),
            vendor_name: "Acme".into(),
            negotiation_notes: "met in the middle".into(),
            negotiated_amount: Some(900.0),
        })
        .await
        .unwrap();
    client.update_agreement("REQ-1", "Acme", true).await.unwrap();
}

#[tokio::test]
async fn quote_requests_report_the_sent_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "sendQuoteRequests",
            "requestId": "REQ-2024-010",
            "vendors": ["Acme", "Globex"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "sentCount": 2,
            "message": "Emails sent"
        })))
        .mount(&server)
        .await;

    let receipt = client_for(&server)
        .send_quote_requests("REQ-2024-010", &["Acme".to_string(), "Globex".to_string()])
        .await
        .unwrap();
    assert_eq!(receipt.sent_count, 2);
    assert_eq!(receipt.message.as_deref(), Some("Emails sent"));
}
