//! Login, whoami and logout through the terminal commands.

use serde_json::json;
use tally_api::ApiClient;
use tally_terminal_lib::commands::auth::{login, logout, whoami};
use tally_terminal_lib::config::TerminalConfig;
use tally_terminal_lib::error::ErrorCode;
use tally_terminal_lib::state::ConfigState;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup(server: &MockServer, dir: &std::path::Path, located: bool) -> (ApiClient, ConfigState) {
    let mut config = TerminalConfig::default();
    config.api.base_url = server.uri();
    config.session.path = Some(dir.join("session.json"));
    if located {
        config.device.latitude = Some(21.0285);
        config.device.longitude = Some(105.8542);
    }
    let api = ApiClient::new(config.api_config()).unwrap();
    (api, ConfigState::new(config))
}

async fn mount_register(server: &MockServer) {
    let user = json!({
        "id": "7", "name": "Linh", "username": "linh", "password": "pw",
        "location": [{"latitude": 1.0, "longitude": 2.0}]
    });
    Mock::given(method("GET"))
        .and(path("/Register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user.clone()])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Register/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_then_logout() {
    let server = MockServer::start().await;
    mount_register(&server).await;
    Mock::given(method("PUT"))
        .and(path("/Register/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "7", "name": "Linh", "username": "linh", "password": "pw",
            "location": [
                {"latitude": 1.0, "longitude": 2.0},
                {"latitude": 21.0285, "longitude": 105.8542}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let (api, config) = setup(&server, dir.path(), true);

    assert_eq!(whoami(&api, &config).unwrap(), None);

    let session = login(&api, &config, "linh", "pw").await.unwrap();
    assert_eq!(session.user_id, "7");
    assert_eq!(session.name, "Linh");
    assert_eq!(session.login_count, 2);
    assert!((session.latitude - 21.0285).abs() < 1e-9);

    assert_eq!(whoami(&api, &config).unwrap(), Some(session));

    logout(&api, &config).unwrap();
    assert_eq!(whoami(&api, &config).unwrap(), None);
    logout(&api, &config).unwrap();
}

#[tokio::test]
async fn test_login_without_device_location_is_refused() {
    let server = MockServer::start().await;
    mount_register(&server).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let (api, config) = setup(&server, dir.path(), false);

    let err = login(&api, &config, "linh", "pw").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::LocationDenied);
    assert_eq!(whoami(&api, &config).unwrap(), None);
}

#[tokio::test]
async fn test_wrong_password() {
    let server = MockServer::start().await;
    mount_register(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let (api, config) = setup(&server, dir.path(), true);

    let err = login(&api, &config, "linh", "nope").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCredentials);
}
