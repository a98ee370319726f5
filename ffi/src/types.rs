//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use todo_list_core::{
    ApiError, HttpMethod, HttpRequest, Outcome, PendingRequest, TodoError, TodoItem, TodoSession,
};

/// Opaque handle to a `TodoSession`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiTodoSession {
    pub(crate) inner: TodoSession,
}

/// Copy `s` into a heap C string. Interior NULs are dropped rather than
/// failing the whole call.
pub(crate) fn c_string(s: String) -> *mut c_char {
    let bytes: Vec<u8> = s.into_bytes().into_iter().filter(|b| *b != 0).collect();
    CString::new(bytes).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request the C caller must execute.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let body = match req.body {
            Some(b) => c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            // boxed slice so todo_free_request can rebuild it from headers_len
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: c_string(req.path),
            headers,
            headers_len,
            body,
        }))
    }
}

/// A request issued by the session, tagged with the ticket to hand back to
/// `todo_session_complete`.
#[repr(C)]
pub struct FfiPendingRequest {
    pub ticket: u64,
    pub request: *mut FfiHttpRequest,
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request and
/// passes a pointer to `todo_session_complete`. The FFI layer reads but does
/// not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiTodoResult` and by the local operations.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Validation = 1,
    NotFoundLocal = 2,
    NotFound = 3,
    Http = 4,
    Deserialization = 5,
    Serialization = 6,
    Transport = 7,
    Panic = 8,
    NullArg = 9,
}

/// What a completed request did to the session.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiOutcome {
    /// Not a completion (begin calls, queries, errors).
    None = 0,
    Loaded = 1,
    Created = 2,
    Updated = 3,
    Deleted = 4,
    Stale = 5,
}

/// Tag that tells `todo_free_result` what `FfiTodoResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Todo = 1,
    TodoList = 2,
    Pending = 3,
}

/// A single todo item exposed to C.
#[repr(C)]
pub struct FfiTodo {
    pub id: i64,
    pub title: *mut c_char,
}

impl FfiTodo {
    fn from_core(item: TodoItem) -> Self {
        FfiTodo {
            id: item.id,
            title: c_string(item.title),
        }
    }
}

/// A list of todo items exposed to C.
#[repr(C)]
pub struct FfiTodoList {
    pub items: *mut FfiTodo,
    pub len: u32,
}

/// Result envelope for every call that can carry data or an error.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the payload tagged by `data_tag` (or is null for `None`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiTodoResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub outcome: FfiOutcome,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiTodoResult {
    fn ok(outcome: FfiOutcome, data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiTodoResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            outcome,
            data_tag,
            data,
        }))
    }

    fn err(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiTodoResult {
            error_code,
            error_message: c_string(msg),
            http_status,
            outcome: FfiOutcome::None,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn ok_todo(outcome: FfiOutcome, item: TodoItem) -> *mut Self {
        let todo = Box::new(FfiTodo::from_core(item));
        Self::ok(outcome, FfiDataTag::Todo, Box::into_raw(todo) as *mut c_void)
    }

    pub(crate) fn ok_todo_list(outcome: FfiOutcome, items: &[TodoItem]) -> *mut Self {
        let len = items.len() as u32;
        let items = if items.is_empty() {
            std::ptr::null_mut()
        } else {
            let todos: Box<[FfiTodo]> = items.iter().cloned().map(FfiTodo::from_core).collect();
            Box::into_raw(todos) as *mut FfiTodo
        };
        let list = Box::new(FfiTodoList { items, len });
        Self::ok(outcome, FfiDataTag::TodoList, Box::into_raw(list) as *mut c_void)
    }

    pub(crate) fn ok_pending(pending: PendingRequest) -> *mut Self {
        let pending = Box::new(FfiPendingRequest {
            ticket: pending.ticket,
            request: FfiHttpRequest::from_core(pending.request),
        });
        Self::ok(FfiOutcome::None, FfiDataTag::Pending, Box::into_raw(pending) as *mut c_void)
    }

    pub(crate) fn ok_empty(outcome: FfiOutcome) -> *mut Self {
        Self::ok(outcome, FfiDataTag::None, std::ptr::null_mut())
    }

    /// Convert a session completion into a result. `items` is the full list
    /// after the completion, used for `Loaded`.
    pub(crate) fn from_outcome(outcome: Outcome, items: &[TodoItem]) -> *mut Self {
        match outcome {
            Outcome::Loaded(_) => Self::ok_todo_list(FfiOutcome::Loaded, items),
            Outcome::Created(item) => Self::ok_todo(FfiOutcome::Created, item),
            Outcome::Updated(item) => Self::ok_todo(FfiOutcome::Updated, item),
            Outcome::Deleted(_) => Self::ok_empty(FfiOutcome::Deleted),
            Outcome::Stale => Self::ok_empty(FfiOutcome::Stale),
        }
    }

    pub(crate) fn from_error(err: TodoError) -> *mut Self {
        let msg = err.to_string();
        let (code, status) = error_code(&err);
        Self::err(code, status, msg)
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, 0, msg.to_string())
    }
}

/// Map a core error to its C error code and, where known, HTTP status.
pub(crate) fn error_code(err: &TodoError) -> (FfiErrorCode, u16) {
    match err {
        TodoError::Validation(_) => (FfiErrorCode::Validation, 0),
        TodoError::NotFoundLocal(_) => (FfiErrorCode::NotFoundLocal, 0),
        TodoError::Network(api) => match api {
            ApiError::NotFound => (FfiErrorCode::NotFound, 404),
            ApiError::HttpError { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::DeserializationError(_) => (FfiErrorCode::Deserialization, 0),
            ApiError::SerializationError(_) => (FfiErrorCode::Serialization, 0),
            ApiError::Transport(_) => (FfiErrorCode::Transport, 0),
        },
    }
}
