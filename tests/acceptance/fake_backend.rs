//! In-process stand-in for the test platform API.
//!
//! Implements the endpoints the plan touches with in-memory state, cookie
//! sessions and server-side grading. `Faults` switches individual behaviors
//! off so the runner's failure reporting can be exercised.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

pub const AUTH_COOKIE: &str = "auth-token";

/// Deliberate misbehaviors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Faults {
    /// A rejoin is assigned the next variant instead of the original one.
    pub non_sticky_variants: bool,
    /// Submissions are stored even after the room is closed.
    pub closed_room_accepts_submit: bool,
    /// Any authenticated user may call teacher and admin endpoints.
    pub roles_not_enforced: bool,
    /// Every signup fails with 500.
    pub reject_signup: bool,
    /// Grading reports a percentage that does not match the score.
    pub wrong_percentage: bool,
    /// Close answers 200 and grades, but the room stays `OPEN`.
    pub close_keeps_room_open: bool,
    /// A rejoin returns the same variant without `alreadyJoined`.
    pub rejoin_without_flag: bool,
    /// Room detail omits `status`.
    pub room_without_status: bool,
    /// Room detail reports its status in lowercase.
    pub lowercase_status: bool,
    /// Logout answers 200 but the session keeps working.
    pub logout_keeps_session: bool,
}

#[derive(Debug, Clone)]
struct User {
    id: String,
    name: String,
    email: Option<String>,
    password: Option<String>,
    role: String,
}

impl User {
    fn to_json(&self) -> Value {
        json!({"_id": self.id, "name": self.name, "email": self.email, "role": self.role})
    }
}

#[derive(Debug)]
struct ChoiceOption {
    id: String,
    text: String,
    correct: bool,
}

#[derive(Debug)]
struct Pair {
    id: String,
    left: String,
    right: String,
}

#[derive(Debug)]
struct Question {
    id: String,
    kind: String,
    text: String,
    points: f64,
    options: Vec<ChoiceOption>,
    pairs: Vec<Pair>,
}

impl Question {
    fn to_json(&self) -> Value {
        json!({
            "_id": self.id,
            "type": self.kind,
            "text": self.text,
            "points": self.points,
            "options": self.options.iter()
                .map(|o| json!({"_id": o.id, "text": o.text, "isCorrect": o.correct}))
                .collect::<Vec<_>>(),
            "pairs": self.pairs.iter()
                .map(|p| json!({"id": p.id, "left": p.left, "right": p.right}))
                .collect::<Vec<_>>(),
        })
    }

    /// Student view: no correctness flags, matching sides split.
    fn to_student_json(&self) -> Value {
        json!({
            "_id": self.id,
            "type": self.kind,
            "text": self.text,
            "points": self.points,
            "options": self.options.iter()
                .map(|o| json!({"_id": o.id, "text": o.text}))
                .collect::<Vec<_>>(),
            "lefts": self.pairs.iter()
                .map(|p| json!({"id": p.id, "text": p.left}))
                .collect::<Vec<_>>(),
            "rights": self.pairs.iter()
                .map(|p| json!({"id": p.id, "text": p.right}))
                .collect::<Vec<_>>(),
        })
    }

    fn is_correct(&self, answer: &Value) -> bool {
        match self.kind.as_str() {
            "MULTIPLE_CHOICE" => answer
                .as_str()
                .is_some_and(|choice| self.options.iter().any(|o| o.id == choice && o.correct)),
            "MATCHING" => answer.as_array().is_some_and(|pairs| {
                pairs.len() == self.pairs.len()
                    && pairs
                        .iter()
                        .all(|p| p["leftId"].is_string() && p["leftId"] == p["rightId"])
            }),
            _ => false,
        }
    }
}

#[derive(Debug)]
struct Variant {
    id: String,
    name: String,
    questions: Vec<Question>,
}

#[derive(Debug)]
struct Test {
    id: String,
    owner_id: String,
    title: String,
    variants: Vec<Variant>,
}

#[derive(Debug)]
struct Enrollment {
    id: String,
    student_id: String,
    student_name: String,
    variant_index: usize,
    answers: Value,
    result: Option<Value>,
}

#[derive(Debug)]
struct Room {
    id: String,
    test_id: String,
    name: String,
    closed: bool,
    enrollments: Vec<Enrollment>,
}

impl Room {
    fn status(&self) -> &'static str {
        if self.closed {
            "CLOSED"
        } else {
            "OPEN"
        }
    }

    fn to_json(&self) -> Value {
        json!({"_id": self.id, "name": self.name, "testId": self.test_id, "status": self.status()})
    }
}

#[derive(Debug, Default)]
struct Backend {
    faults: Faults,
    next_id: u64,
    users: Vec<User>,
    sessions: HashMap<String, String>,
    tests: Vec<Test>,
    rooms: Vec<Room>,
    accepted_submissions: usize,
}

type Shared = Arc<Mutex<Backend>>;

fn lock(state: &Shared) -> MutexGuard<'_, Backend> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"error": message}))).into_response()
}

fn ok(body: Value) -> Response {
    Json(body).into_response()
}

fn with_session(token: &str, body: Value) -> Response {
    (
        [(header::SET_COOKIE, format!("{AUTH_COOKIE}={token}; Path=/; HttpOnly"))],
        Json(body),
    )
        .into_response()
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|part| {
            part.trim()
                .strip_prefix(AUTH_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
                .map(str::to_string)
        })
}

impl Backend {
    fn new_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{:04}", self.next_id)
    }

    fn current(&self, headers: &HeaderMap) -> Option<User> {
        let token = session_token(headers)?;
        let user_id = self.sessions.get(&token)?;
        self.users.iter().find(|u| &u.id == user_id).cloned()
    }

    fn authorize(&self, headers: &HeaderMap, roles: &[&str]) -> Result<User, Response> {
        let user = self
            .current(headers)
            .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Unauthorized"))?;
        if self.faults.roles_not_enforced || roles.contains(&user.role.as_str()) {
            Ok(user)
        } else {
            Err(error(StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }

    fn start_session(&mut self, user: &User) -> String {
        let token = self.new_id("tok");
        self.sessions.insert(token.clone(), user.id.clone());
        token
    }

    fn room_mut(&mut self, id: &str) -> Result<&mut Room, Response> {
        self.rooms
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| error(StatusCode::NOT_FOUND, "Room not found"))
    }

    fn parse_test(&mut self, owner_id: &str, body: &Value) -> Option<Test> {
        let title = body["title"].as_str().filter(|t| !t.is_empty())?.to_string();
        let mut variants = Vec::new();
        for variant in body["variants"].as_array().cloned().unwrap_or_default() {
            let mut questions = Vec::new();
            for q in variant["questions"].as_array().cloned().unwrap_or_default() {
                let mut options = Vec::new();
                for o in q["options"].as_array().cloned().unwrap_or_default() {
                    options.push(ChoiceOption {
                        id: self.new_id("opt"),
                        text: o["text"].as_str().unwrap_or_default().to_string(),
                        correct: o["isCorrect"].as_bool().unwrap_or(false),
                    });
                }
                let mut pairs = Vec::new();
                for p in q["pairs"].as_array().cloned().unwrap_or_default() {
                    pairs.push(Pair {
                        id: self.new_id("pair"),
                        left: p["left"].as_str().unwrap_or_default().to_string(),
                        right: p["right"].as_str().unwrap_or_default().to_string(),
                    });
                }
                questions.push(Question {
                    id: self.new_id("q"),
                    kind: q["type"].as_str()?.to_string(),
                    text: q["text"].as_str().unwrap_or_default().to_string(),
                    points: q["points"].as_f64().unwrap_or(1.0),
                    options,
                    pairs,
                });
            }
            variants.push(Variant {
                id: self.new_id("var"),
                name: variant["name"].as_str().unwrap_or_default().to_string(),
                questions,
            });
        }
        Some(Test {
            id: self.new_id("test"),
            owner_id: owner_id.to_string(),
            title,
            variants,
        })
    }
}

// ---------------------------------------------------------------------------
// auth

async fn signup(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = lock(&state);
    if backend.faults.reject_signup {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Signup unavailable");
    }

    let (Some(name), Some(email), Some(password), Some(role)) = (
        body["name"].as_str(),
        body["email"].as_str(),
        body["password"].as_str(),
        body["role"].as_str(),
    ) else {
        return error(StatusCode::BAD_REQUEST, "Missing fields");
    };
    if backend.users.iter().any(|u| u.email.as_deref() == Some(email)) {
        return error(StatusCode::BAD_REQUEST, "Email already registered");
    }

    let user = User {
        id: backend.new_id("user"),
        name: name.to_string(),
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        role: role.to_string(),
    };
    backend.users.push(user.clone());
    ok(json!({"success": true, "user": user.to_json()}))
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = lock(&state);

    let user = if let Some(room_id) = body["roomId"].as_str() {
        let name = body["name"].as_str().unwrap_or_default().trim().to_string();
        if name.is_empty() || !backend.rooms.iter().any(|r| r.id == room_id) {
            return error(StatusCode::BAD_REQUEST, "Name and a valid roomId are required");
        }
        let user = User {
            id: backend.new_id("user"),
            name,
            email: None,
            password: None,
            role: "STUDENT".to_string(),
        };
        backend.users.push(user.clone());
        user
    } else {
        let email = body["email"].as_str();
        let password = body["password"].as_str();
        let found = backend.users.iter().find(|u| {
            email.is_some() && u.email.as_deref() == email && u.password.as_deref() == password
        });
        match found {
            Some(user) => user.clone(),
            None => return error(StatusCode::UNAUTHORIZED, "Invalid credentials"),
        }
    };

    let token = backend.start_session(&user);
    with_session(&token, json!({"success": true, "user": user.to_json()}))
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    match lock(&state).current(&headers) {
        Some(user) => ok(json!({"user": user.to_json()})),
        None => error(StatusCode::UNAUTHORIZED, "Not authenticated"),
    }
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut backend = lock(&state);
    if backend.faults.logout_keeps_session {
        return ok(json!({"success": true}));
    }
    if let Some(token) = session_token(&headers) {
        backend.sessions.remove(&token);
    }
    (
        [(header::SET_COOKIE, format!("{AUTH_COOKIE}=; Path=/; Max-Age=0"))],
        Json(json!({"success": true})),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// admin

async fn create_teacher(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = lock(&state);
    if let Err(denied) = backend.authorize(&headers, &["ADMIN"]) {
        return denied;
    }
    let (Some(name), Some(email), Some(password)) = (
        body["name"].as_str(),
        body["email"].as_str(),
        body["password"].as_str(),
    ) else {
        return error(StatusCode::BAD_REQUEST, "Missing fields");
    };
    let teacher = User {
        id: backend.new_id("user"),
        name: name.to_string(),
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        role: "TEACHER".to_string(),
    };
    let id = teacher.id.clone();
    backend.users.push(teacher);
    ok(json!({"success": true, "teacherId": id}))
}

async fn list_teachers(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let backend = lock(&state);
    if let Err(denied) = backend.authorize(&headers, &["ADMIN"]) {
        return denied;
    }
    let teachers: Vec<Value> = backend
        .users
        .iter()
        .filter(|u| u.role == "TEACHER")
        .map(User::to_json)
        .collect();
    ok(json!({"teachers": teachers}))
}

async fn delete_teacher(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut backend = lock(&state);
    if let Err(denied) = backend.authorize(&headers, &["ADMIN"]) {
        return denied;
    }
    let before = backend.users.len();
    backend.users.retain(|u| !(u.id == id && u.role == "TEACHER"));
    if backend.users.len() == before {
        return error(StatusCode::NOT_FOUND, "Teacher not found");
    }
    ok(json!({"success": true}))
}

// ---------------------------------------------------------------------------
// tests

async fn create_test(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = lock(&state);
    let teacher = match backend.authorize(&headers, &["TEACHER"]) {
        Ok(user) => user,
        Err(denied) => return denied,
    };
    let Some(test) = backend.parse_test(&teacher.id, &body) else {
        return error(StatusCode::BAD_REQUEST, "Invalid test");
    };
    let id = test.id.clone();
    backend.tests.push(test);
    ok(json!({"success": true, "testId": id}))
}

async fn list_tests(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let backend = lock(&state);
    let teacher = match backend.authorize(&headers, &["TEACHER"]) {
        Ok(user) => user,
        Err(denied) => return denied,
    };
    let tests: Vec<Value> = backend
        .tests
        .iter()
        .filter(|t| t.owner_id == teacher.id)
        .map(|t| json!({"_id": t.id, "title": t.title}))
        .collect();
    ok(json!({"tests": tests}))
}

async fn get_test(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let backend = lock(&state);
    if let Err(denied) = backend.authorize(&headers, &["TEACHER"]) {
        return denied;
    }
    let Some(test) = backend.tests.iter().find(|t| t.id == id) else {
        return error(StatusCode::NOT_FOUND, "Test not found");
    };
    let variants: Vec<Value> = test
        .variants
        .iter()
        .map(|v| {
            json!({
                "_id": v.id,
                "name": v.name,
                "questions": v.questions.iter().map(Question::to_json).collect::<Vec<_>>(),
            })
        })
        .collect();
    ok(json!({"test": {"_id": test.id, "title": test.title, "variants": variants}}))
}

async fn delete_test(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut backend = lock(&state);
    let teacher = match backend.authorize(&headers, &["TEACHER"]) {
        Ok(user) => user,
        Err(denied) => return denied,
    };
    let before = backend.tests.len();
    backend
        .tests
        .retain(|t| !(t.id == id && t.owner_id == teacher.id));
    if backend.tests.len() == before {
        return error(StatusCode::NOT_FOUND, "Test not found");
    }
    ok(json!({"success": true}))
}

// ---------------------------------------------------------------------------
// rooms

async fn create_room(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = lock(&state);
    if let Err(denied) = backend.authorize(&headers, &["TEACHER"]) {
        return denied;
    }
    let test_id = body["testId"].as_str().unwrap_or_default().to_string();
    if !backend.tests.iter().any(|t| t.id == test_id) {
        return error(StatusCode::NOT_FOUND, "Test not found");
    }
    let room = Room {
        id: backend.new_id("room"),
        test_id,
        name: body["name"].as_str().unwrap_or("Room").to_string(),
        closed: false,
        enrollments: Vec::new(),
    };
    let id = room.id.clone();
    backend.rooms.push(room);
    ok(json!({"success": true, "roomId": id}))
}

async fn list_rooms(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let backend = lock(&state);
    if let Err(denied) = backend.authorize(&headers, &["TEACHER"]) {
        return denied;
    }
    let rooms: Vec<Value> = backend.rooms.iter().map(Room::to_json).collect();
    ok(json!({"rooms": rooms}))
}

async fn get_room(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let backend = lock(&state);
    if backend.current(&headers).is_none() {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let Some(room) = backend.rooms.iter().find(|r| r.id == id) else {
        return error(StatusCode::NOT_FOUND, "Room not found");
    };
    let mut body = room.to_json();
    if backend.faults.room_without_status {
        if let Some(fields) = body.as_object_mut() {
            fields.remove("status");
        }
    } else if backend.faults.lowercase_status {
        body["status"] = json!(room.status().to_lowercase());
    }
    ok(json!({"room": body}))
}

fn variant_count(backend: &Backend, test_id: &str) -> usize {
    backend
        .tests
        .iter()
        .find(|t| t.id == test_id)
        .map_or(0, |t| t.variants.len())
}

fn variant_id(backend: &Backend, test_id: &str, index: usize) -> Option<String> {
    let test = backend.tests.iter().find(|t| t.id == test_id)?;
    test.variants.get(index).map(|v| v.id.clone())
}

async fn join_room(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut guard = lock(&state);
    let backend = &mut *guard;
    let student = match backend.authorize(&headers, &["STUDENT"]) {
        Ok(user) => user,
        Err(denied) => return denied,
    };
    let non_sticky = backend.faults.non_sticky_variants;
    let flag_rejoin = !backend.faults.rejoin_without_flag;
    let Some(room_index) = backend.rooms.iter().position(|r| r.id == id) else {
        return error(StatusCode::NOT_FOUND, "Room not found");
    };
    let test_id = backend.rooms[room_index].test_id.clone();
    let variants = variant_count(backend, &test_id);
    if variants == 0 {
        return error(StatusCode::BAD_REQUEST, "Test has no variants");
    }
    if backend.rooms[room_index].closed {
        return error(StatusCode::BAD_REQUEST, "Room is closed");
    }

    let room = &mut backend.rooms[room_index];
    let existing = room
        .enrollments
        .iter()
        .position(|e| e.student_id == student.id);
    let (index, already_joined) = match existing {
        Some(i) => {
            if non_sticky {
                let e = &mut room.enrollments[i];
                e.variant_index = (e.variant_index + 1) % variants;
            }
            (i, true)
        }
        None => {
            let joined = room.enrollments.len();
            room.enrollments.push(Enrollment {
                id: format!("{}-rs{}", room.id, joined + 1),
                student_id: student.id.clone(),
                student_name: student.name.clone(),
                variant_index: joined % variants,
                answers: json!([]),
                result: None,
            });
            (room.enrollments.len() - 1, false)
        }
    };

    let enrollment = &backend.rooms[room_index].enrollments[index];
    let assigned = variant_id(backend, &test_id, enrollment.variant_index);
    let mut body = json!({
        "success": true,
        "roomStudent": {
            "_id": enrollment.id,
            "roomId": id,
            "studentId": enrollment.student_id,
            "assignedVariantId": assigned,
        },
    });
    if already_joined && flag_rejoin {
        body["alreadyJoined"] = json!(true);
    }
    ok(body)
}

async fn room_questions(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let backend = lock(&state);
    let student = match backend.authorize(&headers, &["STUDENT"]) {
        Ok(user) => user,
        Err(denied) => return denied,
    };
    let Some(room) = backend.rooms.iter().find(|r| r.id == id) else {
        return error(StatusCode::NOT_FOUND, "Room not found");
    };
    let Some(enrollment) = room.enrollments.iter().find(|e| e.student_id == student.id) else {
        return error(StatusCode::BAD_REQUEST, "Not joined");
    };
    let questions: Vec<Value> = backend
        .tests
        .iter()
        .find(|t| t.id == room.test_id)
        .and_then(|t| t.variants.get(enrollment.variant_index))
        .map(|v| v.questions.iter().map(Question::to_student_json).collect())
        .unwrap_or_default();
    ok(json!({"questions": questions, "answers": enrollment.answers}))
}

async fn submit_answers(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = lock(&state);
    let student = match backend.authorize(&headers, &["STUDENT"]) {
        Ok(user) => user,
        Err(denied) => return denied,
    };
    let accepts_when_closed = backend.faults.closed_room_accepts_submit;
    let room = match backend.room_mut(&id) {
        Ok(room) => room,
        Err(missing) => return missing,
    };
    if room.closed && !accepts_when_closed {
        return error(StatusCode::BAD_REQUEST, "Room is closed, cannot submit");
    }
    let Some(enrollment) = room
        .enrollments
        .iter_mut()
        .find(|e| e.student_id == student.id)
    else {
        return error(StatusCode::BAD_REQUEST, "Not joined");
    };
    enrollment.answers = body["answers"].clone();
    backend.accepted_submissions += 1;
    ok(json!({"success": true}))
}

fn grade(questions: &[Question], answers: &Value, skew_percentage: bool) -> Value {
    let total: f64 = questions.iter().map(|q| q.points).sum();
    let score: f64 = questions
        .iter()
        .filter(|q| {
            answers
                .as_array()
                .and_then(|list| list.iter().find(|a| a["questionId"] == q.id.as_str()))
                .is_some_and(|a| q.is_correct(&a["answer"]))
        })
        .map(|q| q.points)
        .sum();
    let mut percentage = if total > 0.0 {
        (100.0 * score / total * 100.0).round() / 100.0
    } else {
        0.0
    };
    if skew_percentage {
        percentage += 5.0;
    }
    json!({"score": score, "totalPoints": total, "percentage": percentage})
}

async fn close_room(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut guard = lock(&state);
    let backend = &mut *guard;
    if let Err(denied) = backend.authorize(&headers, &["TEACHER"]) {
        return denied;
    }
    let skew = backend.faults.wrong_percentage;
    let keep_open = backend.faults.close_keeps_room_open;
    let Some(room) = backend.rooms.iter_mut().find(|r| r.id == id) else {
        return error(StatusCode::NOT_FOUND, "Room not found");
    };
    if room.closed {
        return error(StatusCode::BAD_REQUEST, "Room already closed");
    }
    room.closed = !keep_open;

    let Some(test) = backend.tests.iter().find(|t| t.id == room.test_id) else {
        return ok(json!({"success": true}));
    };
    for enrollment in &mut room.enrollments {
        let Some(variant) = test.variants.get(enrollment.variant_index) else {
            continue;
        };
        let mut result = grade(&variant.questions, &enrollment.answers, skew);
        result["_id"] = json!(format!("{}-result", enrollment.id));
        result["studentId"] = json!(enrollment.student_id);
        result["studentName"] = json!(enrollment.student_name);
        enrollment.result = Some(result);
    }
    ok(json!({"success": true}))
}

async fn room_results(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let backend = lock(&state);
    let Some(user) = backend.current(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let Some(room) = backend.rooms.iter().find(|r| r.id == id) else {
        return error(StatusCode::NOT_FOUND, "Room not found");
    };

    if user.role == "TEACHER" {
        let results: Vec<Value> = room
            .enrollments
            .iter()
            .filter_map(|e| e.result.clone())
            .collect();
        return ok(json!({"results": results, "room": room.to_json()}));
    }

    match room
        .enrollments
        .iter()
        .find(|e| e.student_id == user.id)
        .and_then(|e| e.result.clone())
    {
        Some(result) => ok(json!({"result": result, "room": room.to_json()})),
        None => error(StatusCode::NOT_FOUND, "Result not found"),
    }
}

fn router(state: Shared) -> Router {
    let api = Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/teachers", post(create_teacher).get(list_teachers))
        .route("/teachers/{id}", axum::routing::delete(delete_teacher))
        .route("/tests", post(create_test).get(list_tests))
        .route("/tests/{id}", get(get_test).delete(delete_test))
        .route("/rooms", post(create_room).get(list_rooms))
        .route("/rooms/{id}", get(get_room))
        .route("/rooms/{id}/join", post(join_room))
        .route("/rooms/{id}/questions", get(room_questions))
        .route("/rooms/{id}/submit", post(submit_answers))
        .route("/rooms/{id}/close", post(close_room))
        .route("/rooms/{id}/results", get(room_results))
        .with_state(state);
    Router::new().nest("/api", api)
}

/// A running backend on a random local port. The server thread lives until
/// the test process exits.
pub struct FakeBackend {
    addr: SocketAddr,
    state: Shared,
}

impl FakeBackend {
    pub fn start() -> Self {
        Self::with_faults(Faults::default())
    }

    pub fn with_faults(faults: Faults) -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind fake backend");
        listener
            .set_nonblocking(true)
            .expect("set listener non-blocking");
        let addr = listener.local_addr().expect("fake backend address");

        let state: Shared = Arc::new(Mutex::new(Backend {
            faults,
            ..Backend::default()
        }));
        let app = router(state.clone());

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("fake backend runtime");
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                axum::serve(listener, app).await.expect("fake backend server");
            });
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn accepted_submissions(&self) -> usize {
        lock(&self.state).accepted_submissions
    }

    pub fn test_count(&self) -> usize {
        lock(&self.state).tests.len()
    }

    pub fn room_status(&self, room_id: &str) -> Option<&'static str> {
        lock(&self.state)
            .rooms
            .iter()
            .find(|r| r.id == room_id)
            .map(Room::status)
    }

    pub fn teacher_count(&self) -> usize {
        lock(&self.state)
            .users
            .iter()
            .filter(|u| u.role == "TEACHER")
            .count()
    }
}
