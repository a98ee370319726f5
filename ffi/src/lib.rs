//! C-ABI wrapper around `todo-list-core`'s sans-IO session.
//!
//! # Overview
//! A host written in any language with a C FFI owns rendering and network
//! I/O; this library owns the list state. Network operations come in two
//! halves: a `todo_session_begin_*` call returns the request to execute and
//! a ticket, and `todo_session_complete` applies whatever came back.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A single `FfiTodoResult` envelope with `FfiDataTag` + `void* data`
//!   conveys pending requests, items, and errors uniformly. Local operations
//!   that carry no data return a bare `FfiErrorCode`.
//! - The C caller owns all returned pointers and must call the matching
//!   `todo_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use todo_list_core::{ApiError, HttpResponse, TodoClient, TodoSession};

use types::*;

/// Read a C string argument. Invalid UTF-8 sequences become U+FFFD.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string.
unsafe fn read_str(ptr: *const c_char) -> String {
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// Create a session for the `todos` collection under `base_url`, revealing
/// `page_size` items at a time (0 is treated as 1).
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `todo_session_free`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_new(base_url: *const c_char, page_size: u32) -> *mut FfiTodoSession {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { read_str(base_url) };
        let session = TodoSession::new(TodoClient::new(&url), page_size as usize);
        Box::into_raw(Box::new(FfiTodoSession { inner: session }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a session created by `todo_session_new`. Safe to call with null.
/// Responses for its outstanding tickets must simply be discarded.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_free(session: *mut FfiTodoSession) {
    if !session.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(session) });
        });
    }
}

/// Forget every outstanding ticket; their completions become no-ops.
/// Returns how many were dropped.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_abandon(session: *mut FfiTodoSession) -> u32 {
    catch_unwind(|| {
        if session.is_null() {
            return 0;
        }
        let session = unsafe { &mut *session };
        session.inner.abandon_in_flight() as u32
    })
    .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Network operations: begin
// ---------------------------------------------------------------------------

/// Start a full reload. Returns a result with `data_tag = Pending`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_begin_load(session: *mut FfiTodoSession) -> *mut FfiTodoResult {
    catch_unwind(|| {
        if session.is_null() {
            return FfiTodoResult::null_arg("session");
        }
        let session = unsafe { &mut *session };
        FfiTodoResult::ok_pending(session.inner.begin_load())
    })
    .unwrap_or_else(|_| FfiTodoResult::panic("panic in todo_session_begin_load"))
}

/// Start creating a todo. Blank titles fail with `Validation` and issue no
/// request.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_begin_create(
    session: *mut FfiTodoSession,
    title: *const c_char,
) -> *mut FfiTodoResult {
    catch_unwind(|| {
        if session.is_null() {
            return FfiTodoResult::null_arg("session");
        }
        if title.is_null() {
            return FfiTodoResult::null_arg("title");
        }
        let session = unsafe { &mut *session };
        let title = unsafe { read_str(title) };
        match session.inner.begin_create(&title) {
            Ok(pending) => FfiTodoResult::ok_pending(pending),
            Err(e) => FfiTodoResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiTodoResult::panic("panic in todo_session_begin_create"))
}

/// Start creating a todo from the add box set with `todo_session_set_input`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_begin_submit(session: *mut FfiTodoSession) -> *mut FfiTodoResult {
    catch_unwind(|| {
        if session.is_null() {
            return FfiTodoResult::null_arg("session");
        }
        let session = unsafe { &mut *session };
        match session.inner.begin_submit() {
            Ok(pending) => FfiTodoResult::ok_pending(pending),
            Err(e) => FfiTodoResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiTodoResult::panic("panic in todo_session_begin_submit"))
}

/// Start deleting the item awaiting confirmation. `data_tag = None` when
/// there is nothing to send.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_begin_confirm_delete(session: *mut FfiTodoSession) -> *mut FfiTodoResult {
    catch_unwind(|| {
        if session.is_null() {
            return FfiTodoResult::null_arg("session");
        }
        let session = unsafe { &mut *session };
        match session.inner.begin_confirm_delete() {
            Ok(Some(pending)) => FfiTodoResult::ok_pending(pending),
            Ok(None) => FfiTodoResult::ok_empty(FfiOutcome::None),
            Err(e) => FfiTodoResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiTodoResult::panic("panic in todo_session_begin_confirm_delete"))
}

/// Start saving the active edit. `data_tag = None` when no edit is active
/// or the draft is blank.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_begin_commit_edit(session: *mut FfiTodoSession) -> *mut FfiTodoResult {
    catch_unwind(|| {
        if session.is_null() {
            return FfiTodoResult::null_arg("session");
        }
        let session = unsafe { &mut *session };
        match session.inner.begin_commit_edit() {
            Ok(Some(pending)) => FfiTodoResult::ok_pending(pending),
            Ok(None) => FfiTodoResult::ok_empty(FfiOutcome::None),
            Err(e) => FfiTodoResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiTodoResult::panic("panic in todo_session_begin_commit_edit"))
}

// ---------------------------------------------------------------------------
// Network operations: complete
// ---------------------------------------------------------------------------

/// Apply the response for `ticket`. Pass a null `response` when the request
/// could not be executed at all (connection refused, timeout).
///
/// `outcome` says what changed: `Loaded` carries the full list, `Created`
/// and `Updated` carry the item, `Deleted` and `Stale` carry nothing.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_complete(
    session: *mut FfiTodoSession,
    ticket: u64,
    response: *const FfiHttpResponse,
) -> *mut FfiTodoResult {
    catch_unwind(|| {
        if session.is_null() {
            return FfiTodoResult::null_arg("session");
        }
        let session = unsafe { &mut *session };
        let response = if response.is_null() {
            Err(ApiError::Transport("no response".to_string()))
        } else {
            Ok(ffi_response_to_core(unsafe { &*response }))
        };
        match session.inner.complete(ticket, response) {
            Ok(outcome) => FfiTodoResult::from_outcome(outcome, session.inner.state().items()),
            Err(e) => FfiTodoResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiTodoResult::panic("panic in todo_session_complete"))
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body reads
/// as empty.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { read_str(resp.body) }
    };
    HttpResponse::new(resp.status, body)
}

// ---------------------------------------------------------------------------
// Local operations
// ---------------------------------------------------------------------------

/// Run `f` against the session, mapping null and panics to error codes.
fn with_session<F>(session: *mut FfiTodoSession, f: F) -> FfiErrorCode
where
    F: FnOnce(&mut TodoSession) -> FfiErrorCode + std::panic::UnwindSafe,
{
    if session.is_null() {
        return FfiErrorCode::NullArg;
    }
    catch_unwind(|| {
        let session = unsafe { &mut *session };
        f(&mut session.inner)
    })
    .unwrap_or(FfiErrorCode::Panic)
}

/// Replace the add-box text; clears any alert.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_set_input(session: *mut FfiTodoSession, text: *const c_char) -> FfiErrorCode {
    if text.is_null() {
        return FfiErrorCode::NullArg;
    }
    with_session(session, |s| {
        s.set_input(unsafe { read_str(text) });
        FfiErrorCode::Ok
    })
}

/// Ask for confirmation before deleting `id`. `NotFoundLocal` if the id is
/// not in the list.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_request_delete(session: *mut FfiTodoSession, id: i64) -> FfiErrorCode {
    with_session(session, |s| match s.request_delete(id) {
        Ok(()) => FfiErrorCode::Ok,
        Err(e) => error_code(&e).0,
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_session_cancel_delete(session: *mut FfiTodoSession) -> FfiErrorCode {
    with_session(session, |s| {
        s.cancel_delete();
        FfiErrorCode::Ok
    })
}

/// Put `id` in edit mode with `title` as the initial draft.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_begin_edit(
    session: *mut FfiTodoSession,
    id: i64,
    title: *const c_char,
) -> FfiErrorCode {
    if title.is_null() {
        return FfiErrorCode::NullArg;
    }
    with_session(session, |s| {
        s.begin_edit(id, unsafe { read_str(title) });
        FfiErrorCode::Ok
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_session_update_draft(session: *mut FfiTodoSession, text: *const c_char) -> FfiErrorCode {
    if text.is_null() {
        return FfiErrorCode::NullArg;
    }
    with_session(session, |s| {
        s.update_draft(unsafe { read_str(text) });
        FfiErrorCode::Ok
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_session_cancel_edit(session: *mut FfiTodoSession) -> FfiErrorCode {
    with_session(session, |s| {
        s.cancel_edit();
        FfiErrorCode::Ok
    })
}

/// Grow the visible window by one page. Returns false if nothing changed.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_reveal(session: *mut FfiTodoSession) -> bool {
    if session.is_null() {
        return false;
    }
    catch_unwind(|| unsafe { &mut *session }.inner.reveal()).unwrap_or(false)
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_session_has_more(session: *const FfiTodoSession) -> bool {
    if session.is_null() {
        return false;
    }
    catch_unwind(|| unsafe { &*session }.inner.has_more()).unwrap_or(false)
}

/// The items currently inside the visible window (`data_tag = TodoList`).
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_visible_items(session: *const FfiTodoSession) -> *mut FfiTodoResult {
    catch_unwind(|| {
        if session.is_null() {
            return FfiTodoResult::null_arg("session");
        }
        let session = unsafe { &*session };
        FfiTodoResult::ok_todo_list(FfiOutcome::None, session.inner.visible_items())
    })
    .unwrap_or_else(|_| FfiTodoResult::panic("panic in todo_session_visible_items"))
}

/// Current alert text, or null when there is none. Free with
/// `todo_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_session_alert(session: *const FfiTodoSession) -> *mut c_char {
    catch_unwind(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        match unsafe { &*session }.inner.state().alert() {
            Some(alert) => c_string(alert.to_string()),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest`. Requests inside a result are freed with the
/// result; only call this on requests the caller detached.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_string(req.path);
        free_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len as usize))
            };
            for h in headers.iter() {
                free_string(h.key);
                free_string(h.value);
            }
        }
    });
}

/// Free an `FfiTodoResult` and everything it owns. Safe to call with null.
/// Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_result(result: *mut FfiTodoResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Todo => {
                let todo = unsafe { Box::from_raw(result.data as *mut FfiTodo) };
                free_string(todo.title);
            }
            FfiDataTag::TodoList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiTodoList) };
                if !list.items.is_null() && list.len > 0 {
                    let items = unsafe {
                        Box::from_raw(std::ptr::slice_from_raw_parts_mut(list.items, list.len as usize))
                    };
                    for item in items.iter() {
                        free_string(item.title);
                    }
                }
            }
            FfiDataTag::Pending => {
                let pending = unsafe { Box::from_raw(result.data as *mut FfiPendingRequest) };
                todo_free_request(pending.request);
            }
            FfiDataTag::None => {}
        }
    });
}

fn free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_string(s));
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn new_session() -> *mut FfiTodoSession {
        let url = CString::new("http://localhost:8000").unwrap();
        let session = todo_session_new(url.as_ptr(), 3);
        assert!(!session.is_null());
        session
    }

    /// Reinterpret `data` of a `Pending` result.
    fn pending_of(result: &FfiTodoResult) -> &FfiPendingRequest {
        assert!(matches!(result.data_tag, FfiDataTag::Pending));
        unsafe { &*(result.data as *const FfiPendingRequest) }
    }

    fn c_str_of(ptr: *const c_char) -> String {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string()
    }

    /// Complete `ticket` with a JSON body and return the result.
    fn complete(session: *mut FfiTodoSession, ticket: u64, status: u16, body: &str) -> *mut FfiTodoResult {
        let body = CString::new(body).unwrap();
        let resp = FfiHttpResponse {
            status,
            body: body.as_ptr(),
        };
        todo_session_complete(session, ticket, &resp)
    }

    fn begin_and_ticket(result: *mut FfiTodoResult) -> u64 {
        let r = unsafe { &*result };
        assert!(matches!(r.error_code, FfiErrorCode::Ok));
        let ticket = pending_of(r).ticket;
        todo_free_result(result);
        ticket
    }

    #[test]
    fn session_new_and_free() {
        let session = new_session();
        todo_session_free(session);
    }

    #[test]
    fn session_new_null_returns_null() {
        assert!(todo_session_new(std::ptr::null(), 3).is_null());
    }

    #[test]
    fn session_free_null_is_safe() {
        todo_session_free(std::ptr::null_mut());
    }

    #[test]
    fn begin_load_returns_get_request() {
        let session = new_session();
        let result = todo_session_begin_load(session);
        let r = unsafe { &*result };
        assert!(matches!(r.error_code, FfiErrorCode::Ok));
        assert!(!r.data.is_null());

        let pending = pending_of(r);
        let req = unsafe { &*pending.request };
        assert!(matches!(req.method, FfiHttpMethod::Get));
        assert_eq!(c_str_of(req.path), "http://localhost:8000/todos");
        assert!(req.body.is_null());
        assert_eq!(req.headers_len, 0);

        todo_free_result(result);
        todo_session_free(session);
    }

    #[test]
    fn begin_create_produces_post_with_json_body() {
        let session = new_session();
        let title = CString::new("Buy milk").unwrap();
        let result = todo_session_begin_create(session, title.as_ptr());
        let r = unsafe { &*result };
        let req = unsafe { &*pending_of(r).request };
        assert!(matches!(req.method, FfiHttpMethod::Post));
        assert_eq!(req.headers_len, 1);

        let body: serde_json::Value = serde_json::from_str(&c_str_of(req.body)).unwrap();
        assert_eq!(body, serde_json::json!({ "title": "Buy milk" }));

        todo_free_result(result);
        todo_session_free(session);
    }

    #[test]
    fn begin_create_blank_is_validation_error() {
        let session = new_session();
        let title = CString::new("   ").unwrap();
        let result = todo_session_begin_create(session, title.as_ptr());
        let r = unsafe { &*result };
        assert!(matches!(r.error_code, FfiErrorCode::Validation));
        assert!(!r.error_message.is_null());
        assert!(r.data.is_null());

        todo_free_result(result);
        todo_session_free(session);
    }

    #[test]
    fn load_then_page_through_items() {
        let session = new_session();
        let ticket = begin_and_ticket(todo_session_begin_load(session));
        let result = complete(
            session,
            ticket,
            200,
            r#"[{"id":1,"title":"a"},{"id":2,"title":"b"},{"id":3,"title":"c"},{"id":4,"title":"d"}]"#,
        );
        let r = unsafe { &*result };
        assert!(matches!(r.outcome, FfiOutcome::Loaded));
        let list = unsafe { &*(r.data as *const FfiTodoList) };
        assert_eq!(list.len, 4);
        todo_free_result(result);

        assert!(todo_session_has_more(session));
        let visible = todo_session_visible_items(session);
        let list = unsafe { &*((*visible).data as *const FfiTodoList) };
        assert_eq!(list.len, 3);
        let items = unsafe { std::slice::from_raw_parts(list.items, list.len as usize) };
        assert_eq!(items[2].id, 3);
        assert_eq!(c_str_of(items[2].title), "c");
        todo_free_result(visible);

        assert!(todo_session_reveal(session));
        assert!(!todo_session_has_more(session));
        assert!(!todo_session_reveal(session));

        todo_session_free(session);
    }

    #[test]
    fn create_completion_carries_item() {
        let session = new_session();
        let title = CString::new("New").unwrap();
        let ticket = begin_and_ticket(todo_session_begin_create(session, title.as_ptr()));

        let result = complete(session, ticket, 200, r#"{"id":9,"title":"New"}"#);
        let r = unsafe { &*result };
        assert!(matches!(r.outcome, FfiOutcome::Created));
        assert!(matches!(r.data_tag, FfiDataTag::Todo));
        let todo = unsafe { &*(r.data as *const FfiTodo) };
        assert_eq!(todo.id, 9);
        assert_eq!(c_str_of(todo.title), "New");
        todo_free_result(result);

        // second completion of the same ticket is stale
        let result = complete(session, ticket, 200, r#"{"id":9,"title":"New"}"#);
        assert!(matches!(unsafe { &*result }.outcome, FfiOutcome::Stale));
        todo_free_result(result);

        todo_session_free(session);
    }

    #[test]
    fn delete_flow_and_failure_codes() {
        let session = new_session();
        let ticket = begin_and_ticket(todo_session_begin_load(session));
        todo_free_result(complete(session, ticket, 200, r#"[{"id":1,"title":"a"}]"#));

        assert_eq!(todo_session_request_delete(session, 5), FfiErrorCode::NotFoundLocal);
        assert_eq!(todo_session_request_delete(session, 1), FfiErrorCode::Ok);

        let ticket = begin_and_ticket(todo_session_begin_confirm_delete(session));
        let result = complete(session, ticket, 404, r#"{"detail":"Todo not found"}"#);
        let r = unsafe { &*result };
        assert!(matches!(r.error_code, FfiErrorCode::NotFound));
        assert_eq!(r.http_status, 404);
        todo_free_result(result);

        // confirmation was cleared, so confirming again sends nothing
        let result = todo_session_begin_confirm_delete(session);
        assert!(matches!(unsafe { &*result }.data_tag, FfiDataTag::None));
        todo_free_result(result);

        todo_session_free(session);
    }

    #[test]
    fn null_response_is_transport_error() {
        let session = new_session();
        let ticket = begin_and_ticket(todo_session_begin_load(session));
        let result = todo_session_complete(session, ticket, std::ptr::null());
        assert!(matches!(unsafe { &*result }.error_code, FfiErrorCode::Transport));
        todo_free_result(result);
        todo_session_free(session);
    }

    #[test]
    fn abandon_makes_completion_stale() {
        let session = new_session();
        let ticket = begin_and_ticket(todo_session_begin_load(session));
        assert_eq!(todo_session_abandon(session), 1);
        let result = complete(session, ticket, 200, r#"[{"id":1,"title":"late"}]"#);
        assert!(matches!(unsafe { &*result }.outcome, FfiOutcome::Stale));
        todo_free_result(result);
        todo_session_free(session);
    }

    #[test]
    fn edit_commit_sends_put() {
        let session = new_session();
        let ticket = begin_and_ticket(todo_session_begin_load(session));
        todo_free_result(complete(session, ticket, 200, r#"[{"id":1,"title":"a"}]"#));

        let title = CString::new("a").unwrap();
        let draft = CString::new("A").unwrap();
        assert_eq!(todo_session_begin_edit(session, 1, title.as_ptr()), FfiErrorCode::Ok);
        assert_eq!(todo_session_update_draft(session, draft.as_ptr()), FfiErrorCode::Ok);

        let result = todo_session_begin_commit_edit(session);
        let req = unsafe { &*pending_of(&*result).request };
        assert!(matches!(req.method, FfiHttpMethod::Put));
        assert_eq!(c_str_of(req.path), "http://localhost:8000/todos/1");
        todo_free_result(result);

        todo_session_free(session);
    }

    #[test]
    fn blank_submit_sets_alert() {
        let session = new_session();
        let blank = CString::new(" ").unwrap();
        assert_eq!(todo_session_set_input(session, blank.as_ptr()), FfiErrorCode::Ok);

        let result = todo_session_begin_submit(session);
        assert!(matches!(unsafe { &*result }.error_code, FfiErrorCode::Validation));
        todo_free_result(result);

        let alert = todo_session_alert(session);
        assert_eq!(c_str_of(alert), "Please enter a todo.");
        todo_free_string(alert);

        todo_session_free(session);
    }

    #[test]
    fn non_utf8_title_is_kept_lossily() {
        let session = new_session();
        // "Caf\xE9" in Latin-1
        let title = CString::new(vec![b'C', b'a', b'f', 0xE9]).unwrap();
        let result = todo_session_begin_create(session, title.as_ptr());
        let r = unsafe { &*result };
        assert!(matches!(r.error_code, FfiErrorCode::Ok));

        let req = unsafe { &*pending_of(r).request };
        let body: serde_json::Value = serde_json::from_str(&c_str_of(req.body)).unwrap();
        assert_eq!(body["title"], "Caf\u{FFFD}");

        todo_free_result(result);
        todo_session_free(session);
    }

    #[test]
    fn non_utf8_draft_is_not_blanked() {
        let session = new_session();
        let ticket = begin_and_ticket(todo_session_begin_load(session));
        todo_free_result(complete(session, ticket, 200, r#"[{"id":1,"title":"a"}]"#));

        let title = CString::new("a").unwrap();
        let draft = CString::new(vec![0xFF, b'x']).unwrap();
        assert_eq!(todo_session_begin_edit(session, 1, title.as_ptr()), FfiErrorCode::Ok);
        assert_eq!(todo_session_update_draft(session, draft.as_ptr()), FfiErrorCode::Ok);

        // a blank draft would make commit a no-op
        let result = todo_session_begin_commit_edit(session);
        assert!(matches!(unsafe { &*result }.data_tag, FfiDataTag::Pending));
        todo_free_result(result);

        todo_session_free(session);
    }

    #[test]
    fn null_session_is_reported() {
        let result = todo_session_begin_load(std::ptr::null_mut());
        assert!(matches!(unsafe { &*result }.error_code, FfiErrorCode::NullArg));
        todo_free_result(result);

        assert_eq!(todo_session_cancel_edit(std::ptr::null_mut()), FfiErrorCode::NullArg);
        assert!(!todo_session_has_more(std::ptr::null()));
    }

    #[test]
    fn free_functions_accept_null() {
        todo_free_request(std::ptr::null_mut());
        todo_free_result(std::ptr::null_mut());
        todo_free_string(std::ptr::null_mut());
    }
}
