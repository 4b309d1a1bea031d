//! Live adapter for the `BoardApi` port using the task backend's REST API.

use std::fmt::Display;
use std::future::Future;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{BoardPayload, StatusUpdate};
use crate::config::Config;
use crate::ports::board_api::{ApiError, ApiFuture, BoardApi, CreatedTask, NewTask};

const BOARD_PATH: &[&str] = &["api", "tareas", "board"];
const TASKS_PATH: &[&str] = &["api", "tasks"];
/// Estimated hours filed with every new task.
const DEFAULT_ESTIMATE_HOURS: f64 = 1.0;

/// Live board client that calls the task backend over HTTP.
pub struct LiveBoardApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
    project_id: u64,
}

impl LiveBoardApi {
    /// Creates a client for the backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend URL is not a usable base URL or the
    /// HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| ApiError::Client(format!("invalid backend URL {}: {e}", config.api_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Client(format!("backend URL cannot take a path: {base_url}")));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self { client, base_url, token: config.token.clone(), project_id: config.project_id })
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request made by `build` and returns the body of a
    /// successful response. A failed connection is retried once.
    async fn send(
        &self,
        url: &Url,
        build: impl Fn() -> RequestBuilder,
    ) -> Result<String, ApiError> {
        let transport = |source: reqwest::Error| ApiError::Transport { url: url.to_string(), source };
        let response =
            retry_once_on_connect(url.as_str(), || build().send(), reqwest::Error::is_connect)
                .await
                .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = serde_json::from_str::<BackendError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ApiError::Status { status: status.as_u16(), message });
        }

        debug!(%url, status = status.as_u16(), "backend request succeeded");
        Ok(body)
    }
}

/// Runs `attempt`, then runs it one more time if the first failure is a
/// connection error. Every other outcome is returned as is.
async fn retry_once_on_connect<T, E, F, Fut>(
    url: &str,
    mut attempt: F,
    is_connect: impl Fn(&E) -> bool,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    match attempt().await {
        Err(e) if is_connect(&e) => {
            warn!(%url, error = %e, "connection failed, retrying once");
            attempt().await
        }
        other => other,
    }
}

/// Error body returned by the backend.
#[derive(Deserialize)]
struct BackendError {
    error: String,
}

/// Request body for task creation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskBody<'a> {
    titulo: &'a str,
    descripcion: &'a str,
    tiempo_estimado: f64,
    proyecto_id: u64,
    prioridad_id: u8,
}

impl BoardApi for LiveBoardApi {
    fn fetch_board(&self) -> ApiFuture<'_, BoardPayload> {
        Box::pin(async move {
            let url = self.endpoint(BOARD_PATH);
            let body = self.send(&url, || self.authorize(self.client.get(url.clone()))).await?;
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
        })
    }

    fn update_status(&self, update: &StatusUpdate) -> ApiFuture<'_, ()> {
        let update = update.clone();
        Box::pin(async move {
            let url = self.endpoint(&["api", "tareas", update.task_id.as_str(), "estado"]);
            self.send(&url, || self.authorize(self.client.put(url.clone())).json(&update)).await?;
            Ok(())
        })
    }

    fn create_task(&self, task: &NewTask) -> ApiFuture<'_, CreatedTask> {
        let task = task.clone();
        Box::pin(async move {
            let url = self.endpoint(TASKS_PATH);
            let body = CreateTaskBody {
                titulo: &task.title,
                descripcion: task.description.as_deref().unwrap_or_default(),
                tiempo_estimado: DEFAULT_ESTIMATE_HOURS,
                proyecto_id: self.project_id,
                prioridad_id: task.priority.code(),
            };
            let response =
                self.send(&url, || self.authorize(self.client.post(url.clone())).json(&body)).await?;
            serde_json::from_str(&response).map_err(|e| ApiError::Decode(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Priority, TaskType};
    use serde_json::json;
    use std::cell::Cell;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer, token: Option<&str>) -> LiveBoardApi {
        let config = Config {
            api_url: server.uri(),
            token: token.map(String::from),
            ..Config::default()
        };
        LiveBoardApi::new(&config).unwrap()
    }

    #[tokio::test]
    async fn fetch_board_sends_token_and_decodes_columns() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tareas/board"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "columns": {"todo": [{"id": 1, "title": "a", "type": "task", "priority": "low"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let payload = api_for(&server, Some("secret")).fetch_board().await.unwrap();

        assert!(payload.columns.contains_key("todo"));
    }

    #[tokio::test]
    async fn update_status_puts_estado_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/tareas/7/estado"))
            .and(body_json(json!({"estadoId": 6})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "estadoId": 6})))
            .expect(1)
            .mount(&server)
            .await;

        let update = StatusUpdate { task_id: "7".into(), estado_id: 6 };
        api_for(&server, None).update_status(&update).await.unwrap();
    }

    #[tokio::test]
    async fn create_task_posts_backend_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks"))
            .and(body_json(json!({
                "titulo": "Write docs",
                "descripcion": "",
                "tiempoEstimado": 1.0,
                "proyectoId": 10,
                "prioridadId": 2
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"id": 55, "titulo": "Write docs"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let task = NewTask {
            title: "Write docs".into(),
            description: None,
            task_type: TaskType::Task,
            priority: Priority::High,
        };
        let created = api_for(&server, None).create_task(&task).await.unwrap();

        assert_eq!(created.id, "55");
        assert_eq!(created.titulo, "Write docs");
    }

    #[tokio::test]
    async fn unauthorized_maps_to_its_own_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = api_for(&server, Some("stale")).fetch_board().await.unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn server_error_carries_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "Error al actualizar"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let update = StatusUpdate { task_id: "1".into(), estado_id: 3 };
        let err = api_for(&server, None).update_status(&update).await.unwrap_err();

        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Error al actualizar");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_board_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = api_for(&server, None).fetch_board().await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let config = Config { api_url: "http://127.0.0.1:9".into(), ..Config::default() };
        let api = LiveBoardApi::new(&config).unwrap();

        let err = api.fetch_board().await.unwrap_err();

        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[tokio::test]
    async fn task_id_is_encoded_as_one_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/tareas/a%2Fb%20c/estado"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let update = StatusUpdate { task_id: "a/b c".into(), estado_id: 5 };
        api_for(&server, None).update_status(&update).await.unwrap();
    }

    #[tokio::test]
    async fn base_url_path_prefix_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/proxy/api/tareas/board"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"columns": {}})))
            .expect(1)
            .mount(&server)
            .await;
        let config = Config { api_url: format!("{}/proxy/", server.uri()), ..Config::default() };

        LiveBoardApi::new(&config).unwrap().fetch_board().await.unwrap();
    }

    #[test]
    fn unusable_backend_url_is_rejected() {
        for api_url in ["not a url", "mailto:board@example.com"] {
            let config = Config { api_url: api_url.into(), ..Config::default() };
            assert!(matches!(LiveBoardApi::new(&config), Err(ApiError::Client(_))), "{api_url}");
        }
    }

    #[derive(Debug)]
    enum Dial {
        Refused,
        Rejected,
    }

    impl Display for Dial {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{self:?}")
        }
    }

    fn refused(e: &Dial) -> bool {
        matches!(e, Dial::Refused)
    }

    #[tokio::test]
    async fn connect_failure_is_retried_once_then_succeeds() {
        let calls = Cell::new(0);
        let result = retry_once_on_connect(
            "http://backend",
            || {
                calls.set(calls.get() + 1);
                let first = calls.get() == 1;
                async move { if first { Err(Dial::Refused) } else { Ok("board") } }
            },
            refused,
        )
        .await;

        assert_eq!(result.unwrap(), "board");
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn second_connect_failure_is_not_retried() {
        let calls = Cell::new(0);
        let result: Result<(), Dial> = retry_once_on_connect(
            "http://backend",
            || {
                calls.set(calls.get() + 1);
                async { Err(Dial::Refused) }
            },
            refused,
        )
        .await;

        assert!(matches!(result, Err(Dial::Refused)));
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn other_failures_are_not_retried() {
        let calls = Cell::new(0);
        let result: Result<(), Dial> = retry_once_on_connect(
            "http://backend",
            || {
                calls.set(calls.get() + 1);
                async { Err(Dial::Rejected) }
            },
            refused,
        )
        .await;

        assert!(matches!(result, Err(Dial::Rejected)));
        assert_eq!(calls.get(), 1);
    }
}
