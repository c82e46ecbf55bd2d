use crate::helpers::{spawn_app, valid_contact_body, when_sending_an_email, OWNER_EMAIL};
use wiremock::matchers::{any, bearer_token};
use wiremock::{Mock, ResponseTemplate};

fn provider_accepts() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "re_42" }))
}

#[tokio::test]
async fn contact_returns_200_and_the_provider_id_for_valid_data() {
    // Arrange
    let app = spawn_app().await;
    when_sending_an_email()
        .and(bearer_token("my-secret-token"))
        .respond_with(provider_accepts())
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_contact(&valid_contact_body()).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        serde_json::json!({
            "success": true,
            "message": "Email sent successfully",
            "id": "re_42"
        }),
        body
    );
}

#[tokio::test]
async fn contact_forwards_the_message_to_the_site_owner() {
    // Arrange
    let app = spawn_app().await;
    when_sending_an_email()
        .respond_with(provider_accepts())
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    app.post_contact(&serde_json::json!({
        "name": "Ursula Le Guin",
        "email": "ursula@earthsea.org",
        "subject": "Hiring",
        "message": "Would you like to build a lighthouse?"
    }))
    .await
    .error_for_status()
    .unwrap();

    // Assert
    let email_request = &app.email_server.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&email_request.body).unwrap();
    assert_eq!(serde_json::json!([OWNER_EMAIL]), body["to"]);
    assert_eq!("ursula@earthsea.org", body["reply_to"]);
    assert_eq!("New Contact: Hiring - Ursula Le Guin", body["subject"]);
    let html = body["html"].as_str().unwrap();
    let text = body["text"].as_str().unwrap();
    assert!(html.contains("Would you like to build a lighthouse?"));
    assert!(html.contains("Reply to Ursula"));
    assert!(text.contains("Email: ursula@earthsea.org"));
}

#[tokio::test]
async fn contact_returns_400_when_required_fields_are_missing() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;
    let test_cases = vec![
        (serde_json::json!({"email": "jo@x.com", "message": "hi"}), "name"),
        (serde_json::json!({"name": "Jo", "message": "hi"}), "email"),
        (serde_json::json!({"name": "Jo", "email": "jo@x.com"}), "message"),
        (
            serde_json::json!({"name": "  ", "email": "jo@x.com", "message": "hi"}),
            "name",
        ),
    ];

    for (invalid_body, missing_field) in test_cases {
        // Act
        let response = app.post_contact(&invalid_body).await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when {} was missing.",
            missing_field
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!("Missing required fields", body["error"]);
        assert!(body["fields"].get(missing_field).is_some());
    }
}

#[tokio::test]
async fn contact_returns_400_for_a_malformed_email() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .post_contact(&serde_json::json!({
            "name": "Jo",
            "email": "not-an-email",
            "message": "hi"
        }))
        .await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        serde_json::json!({
            "error": "Please enter a valid email",
            "fields": { "email": "Please enter a valid email" }
        }),
        body
    );
}

#[tokio::test]
async fn contact_returns_400_for_a_body_that_is_not_json() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .api_client
        .post(&app.contact_endpoint())
        .header("Content-Type", "application/json")
        .body("name=Jo")
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!("Invalid JSON body", body["error"]);
}

#[tokio::test]
async fn contact_returns_500_when_the_provider_fails() {
    // Arrange
    let app = spawn_app().await;
    when_sending_an_email()
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_contact(&valid_contact_body()).await;

    // Assert
    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!("Failed to send email", body["error"]);
    assert!(body["details"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn contact_rejects_other_methods() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get_contact().await;

    // Assert
    assert_eq!(405, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!("Method not allowed", body["error"]);
}

#[tokio::test]
async fn contact_treats_a_null_subject_as_absent() {
    // Arrange
    let app = spawn_app().await;
    when_sending_an_email()
        .respond_with(provider_accepts())
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app
        .post_contact(&serde_json::json!({
            "name": "Jo",
            "email": "jo@x.com",
            "subject": null,
            "message": "hi"
        }))
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let email_request = &app.email_server.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&email_request.body).unwrap();
    assert_eq!("New Contact: Portfolio Inquiry - Jo", body["subject"]);
}

#[tokio::test]
async fn contact_reports_a_null_required_field_as_missing() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app
        .post_contact(&serde_json::json!({
            "name": null,
            "email": "jo@x.com",
            "message": "hi"
        }))
        .await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!("Missing required fields", body["error"]);
    assert_eq!("Name is required", body["fields"]["name"]);
}
