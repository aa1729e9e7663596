// rest_api/tests/api.rs

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use reqwest::{redirect, Client, Response, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use dashboard_lib::predictor::stub::{FixedLabel, ThresholdStub};
use dashboard_lib::{Dashboard, PredictorRegistry, SessionConfig, SessionStore, NEED_MORE_TESTS_MESSAGE};
use rest_api::{serve, AppState};

struct TestServer {
    addr: SocketAddr,
    client: Client,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    async fn start() -> Self {
        // Diabetes is positive when glucose (column 1) exceeds 140.
        let registry = PredictorRegistry::new(
            Arc::new(ThresholdStub { feature: 1, threshold: 140.0 }),
            Arc::new(FixedLabel(1)),
            Arc::new(FixedLabel(0)),
        )
        .expect("stub registry");
        let state = AppState::new(Dashboard::new(registry), SessionStore::new(&SessionConfig::default()));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(serve(listener, state, async move {
            let _ = rx.await;
        }));

        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .expect("client");
        Self {
            addr,
            client,
            _shutdown: tx,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn predict(&self, disease: &str, cookie: Option<&str>, body: Value) -> Response {
        let mut request = self.client.post(self.url(&format!("/api/v1/predict/{}", disease))).json(&body);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        request.send().await.expect("predict request")
    }
}

fn session_cookie(response: &Response) -> String {
    let header = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .expect("Set-Cookie header");
    header.split(';').next().unwrap_or_default().to_string()
}

fn diabetes_body(glucose: f64, bmi: f64) -> Value {
    json!({
        "Pregnancies": 2,
        "Glucose": glucose,
        "BloodPressure": 72,
        "SkinThickness": 35,
        "Insulin": "0",
        "BMI": bmi,
        "DiabetesPedigreeFunction": "0.627",
        "Age": 50,
    })
}

#[tokio::test]
async fn health_and_catalogue_endpoints() {
    let server = TestServer::start().await;

    let health: Value = server.client.get(server.url("/api/v1/health")).send().await.unwrap().json().await.unwrap();
    assert_eq!(health["status"], "ok");

    let catalogue: Value = server.client.get(server.url("/api/v1/diseases")).send().await.unwrap().json().await.unwrap();
    let diseases = catalogue["diseases"].as_array().unwrap();
    assert_eq!(diseases.len(), 3);
    assert_eq!(diseases[0]["slug"], "diabetes");
    assert_eq!(diseases[0]["feature_count"], 18);
    assert_eq!(diseases[1]["feature_count"], 13);
    assert_eq!(diseases[2]["feature_count"], 15);
    assert_eq!(diseases[1]["fields"].as_array().unwrap().len(), 13);
}

#[tokio::test]
async fn second_submission_compares_with_the_previous_one() {
    let server = TestServer::start().await;

    let first = server.predict("diabetes", None, diabetes_body(148.0, 33.6)).await;
    assert_eq!(first.status(), StatusCode::OK);
    let cookie = session_cookie(&first);
    let first: Value = first.json().await.unwrap();
    assert_eq!(first["report"]["message"], "The person has diabetes");
    assert_eq!(first["report"]["info"], NEED_MORE_TESTS_MESSAGE);
    assert!(first["report"]["comparison"].is_null());

    let second = server.predict("diabetes", Some(&cookie), diabetes_body(110.0, 28.1)).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert!(second.headers().get(SET_COOKIE).is_none());
    let second: Value = second.json().await.unwrap();
    let report = &second["report"];
    assert_eq!(report["message"], "The person does not have diabetes");
    assert_eq!(report["tests"], 2);
    assert!(report["info"].is_null());

    let series = report["comparison"]["series"].as_array().unwrap();
    assert_eq!(series[0]["name"], "Previous Test");
    assert_eq!(series[0]["values"][0], 148.0);
    assert_eq!(series[1]["name"], "Current Test");
    assert_eq!(series[1]["values"][0], 110.0);
    assert_eq!(report["table"]["rows"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn invalid_fields_are_reported_together() {
    let server = TestServer::start().await;

    let response = server
        .predict("diabetes", None, json!({ "Glucose": "abc", "BMI": "25" }))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let cookie = session_cookie(&response);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");
    let fields = body["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 7);
    let glucose = fields.iter().find(|f| f["field"] == "Glucose").unwrap();
    assert_eq!(glucose["reason"], "not_a_number");
    assert!(fields.iter().any(|f| f["field"] == "Age" && f["reason"] == "missing"));

    // Nothing was recorded for the rejected form.
    let history: Value = server
        .client
        .get(server.url("/api/v1/history/diabetes"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history["report"]["tests"], 0);
}

#[tokio::test]
async fn unknown_disease_is_not_found() {
    let server = TestServer::start().await;

    let response = server.predict("liver", None, json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let page = server.client.get(server.url("/liver")).send().await.unwrap();
    assert_eq!(page.status(), StatusCode::NOT_FOUND);
    assert!(page.text().await.unwrap().contains("Page not found"));
}

#[tokio::test]
async fn html_pages_render_and_submit() {
    let server = TestServer::start().await;

    let root = server.client.get(server.url("/")).send().await.unwrap();
    assert!(root.status().is_redirection());
    assert_eq!(root.headers().get(LOCATION).unwrap(), "/diabetes");

    let page = server.client.get(server.url("/heart")).send().await.unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    let cookie = session_cookie(&page);
    let html = page.text().await.unwrap();
    assert!(html.contains("Heart Disease Prediction Using Machine Learning"));

    let form: Vec<(&str, &str)> = vec![
        ("age", "63"),
        ("sex", "1"),
        ("cp", "3"),
        ("trestbps", "145"),
        ("chol", "233"),
        ("fbs", "1"),
        ("restecg", "0"),
        ("thalach", "150"),
        ("exang", "0"),
        ("oldpeak", "2.3"),
        ("slope", "0"),
        ("ca", "0"),
        ("thal", "1"),
    ];
    let submitted = server
        .client
        .post(server.url("/heart"))
        .header(COOKIE, &cookie)
        .form(&form)
        .send()
        .await
        .unwrap();
    assert_eq!(submitted.status(), StatusCode::OK);
    let html = submitted.text().await.unwrap();
    assert!(html.contains("This person has heart disease"));
    assert!(html.contains(NEED_MORE_TESTS_MESSAGE));

    let rejected = server
        .client
        .post(server.url("/heart"))
        .header(COOKIE, &cookie)
        .form(&[("age", "old")])
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(rejected.text().await.unwrap().contains("value=\"old\""));
}

#[tokio::test]
async fn ending_a_session_drops_its_history() {
    let server = TestServer::start().await;

    let first = server.predict("kidney", None, json!({})).await;
    let cookie = session_cookie(&first);

    let ended: Value = server
        .client
        .delete(server.url("/api/v1/session"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ended["ended"], true);

    let history = server
        .client
        .get(server.url("/api/v1/history/kidney"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    // The old id is unknown now, so a fresh session is issued.
    assert!(history.headers().get(SET_COOKIE).is_some());
    let body: Value = history.json().await.unwrap();
    assert_eq!(body["report"]["tests"], 0);
}

#[tokio::test]
async fn sessions_do_not_share_history() {
    let server = TestServer::start().await;

    let alice = server.predict("diabetes", None, diabetes_body(150.0, 30.0)).await;
    let alice_cookie = session_cookie(&alice);
    let bob = server.predict("diabetes", None, diabetes_body(90.0, 22.0)).await;
    let bob_cookie = session_cookie(&bob);
    assert_ne!(alice_cookie, bob_cookie);

    let second = server.predict("diabetes", Some(&alice_cookie), diabetes_body(145.0, 29.0)).await;
    let second: Value = second.json().await.unwrap();
    assert_eq!(second["report"]["tests"], 2);
    assert_eq!(second["report"]["comparison"]["series"][0]["values"][0], 150.0);

    let bob_history: Value = server
        .client
        .get(server.url("/api/v1/history/diabetes"))
        .header(COOKIE, &bob_cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(bob_history["report"]["tests"], 1);
    assert!(bob_history["report"]["comparison"].is_null());

    // Histories are kept per disease as well.
    let heart: Value = server
        .client
        .get(server.url("/api/v1/history/heart"))
        .header(COOKIE, &alice_cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(heart["report"]["tests"], 0);
}

impl TestServer {
    async fn post_raw(&self, path: &str, content_type: &str, body: &'static str) -> Response {
        self.client
            .post(self.url(path))
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .expect("raw request")
    }
}

#[tokio::test]
async fn malformed_json_bodies_get_json_errors() {
    let server = TestServer::start().await;

    let truncated = server
        .post_raw("/api/v1/predict/diabetes", "application/json", r#"{"Glucose": "#)
        .await;
    assert_eq!(truncated.status(), StatusCode::BAD_REQUEST);
    let body: Value = truncated.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().starts_with("Invalid input:"));

    let plain = server
        .post_raw("/api/v1/predict/diabetes", "text/plain", "Glucose=148")
        .await;
    assert_eq!(plain.status(), StatusCode::BAD_REQUEST);
    let body: Value = plain.json().await.unwrap();
    assert_eq!(body["status"], "error");

    // Well-formed JSON that is not an object reports every field missing.
    let array = server.post_raw("/api/v1/predict/diabetes", "application/json", "[1,2]").await;
    assert_eq!(array.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = array.json().await.unwrap();
    assert_eq!(body["status"], "error");
    let fields = body["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 8);
    assert!(fields.iter().all(|f| f["reason"] == "missing"));
}

#[tokio::test]
async fn unknown_disease_wins_over_bad_body() {
    let server = TestServer::start().await;

    let response = server.post_raw("/api/v1/predict/liver", "application/json", "{").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn html_form_with_wrong_content_type_is_rejected_on_the_page() {
    let server = TestServer::start().await;

    let response = server.post_raw("/kidney", "application/json", r#"{"age": 40}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = response.text().await.unwrap();
    assert!(html.contains("Kidney Disease Prediction Using Machine Learning"));
    assert!(html.contains("<div class=\"failure\">Invalid input:"));
}

