//! Recording repository double and request helpers for router tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use student_server::handlers::StudentHandler;
use student_server::models::student::Student;
use student_server::repository::{
    MemoryStudentRepository, RepositoryError, RepositoryResult, StudentRepository,
};
use student_server::routes::{student_router, StudentRouterState};

/// A repository call, with its argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FindAll,
    FindById(i64),
    Save(Student),
    DeleteById(i64),
}

#[derive(Debug, Default)]
struct Faults {
    find_all: Option<RepositoryError>,
    save: Option<RepositoryError>,
    delete_by_id: Option<RepositoryError>,
}

/// Memory-backed repository that logs every call and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingRepository {
    inner: MemoryStudentRepository,
    calls: Mutex<Vec<Call>>,
    faults: Mutex<Faults>,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_students(students: impl IntoIterator<Item = Student>) -> Self {
        Self {
            inner: MemoryStudentRepository::with_students(students).unwrap(),
            ..Self::default()
        }
    }

    pub fn fail_find_all(&self, err: RepositoryError) {
        self.faults.lock().unwrap().find_all = Some(err);
    }

    pub fn fail_save(&self, err: RepositoryError) {
        self.faults.lock().unwrap().save = Some(err);
    }

    pub fn fail_delete(&self, err: RepositoryError) {
        self.faults.lock().unwrap().delete_by_id = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn find_all_count(&self) -> usize {
        self.count(|c| matches!(c, Call::FindAll))
    }

    pub fn find_by_id_count(&self) -> usize {
        self.count(|c| matches!(c, Call::FindById(_)))
    }

    pub fn save_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Save(_)))
    }

    pub fn delete_count(&self) -> usize {
        self.count(|c| matches!(c, Call::DeleteById(_)))
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl StudentRepository for RecordingRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Student>> {
        self.record(Call::FindAll);
        let fault = self.faults.lock().unwrap().find_all.clone();
        match fault {
            Some(err) => Err(err),
            None => self.inner.find_all().await,
        }
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Student>> {
        self.record(Call::FindById(id));
        self.inner.find_by_id(id).await
    }

    async fn save(&self, student: Student) -> RepositoryResult<Student> {
        self.record(Call::Save(student.clone()));
        let fault = self.faults.lock().unwrap().save.clone();
        match fault {
            Some(err) => Err(err),
            None => self.inner.save(student).await,
        }
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        self.record(Call::DeleteById(id));
        let fault = self.faults.lock().unwrap().delete_by_id.clone();
        match fault {
            Some(err) => Err(err),
            None => self.inner.delete_by_id(id).await,
        }
    }
}

/// Router wired to `repo`.
pub fn app(repo: &Arc<RecordingRepository>) -> Router {
    let repo: Arc<dyn StudentRepository> = repo.clone();
    student_router(StudentRouterState::new(StudentHandler::new(repo)))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Send one request through the router.
pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    dispatch(app, request).await
}

/// Send a raw body, with an optional content type.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    dispatch(app, request).await
}

async fn dispatch(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        location,
        body,
    }
}

/// A string of exactly `len` characters.
pub fn text_of_len(len: usize) -> String {
    "abcdefghij".chars().cycle().take(len).collect()
}
