//! C-ABI wrapper around `pati-core`.
//!
//! # Overview
//! Exposes request building, response parsing, session handling and the
//! small form/deep-link helpers through `extern "C"` functions, so a mobile
//! shell written in any language with a C FFI can drive the backend without
//! reimplementing the client rules. The host performs all network I/O.
//!
//! # Design
//! - Every `extern "C"` function runs its body under `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Requests are generic (`pati_build_get/post/put/delete` over a path);
//!   responses come back either as the `{data, error}` JSON envelope or, for
//!   health records, as flattened `#[repr(C)]` structs.
//! - The C caller owns all returned pointers and must call the matching
//!   `pati_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use pati_core::deeplink;
use pati_core::validation::is_valid_date;
use pati_core::{
    ApiClient, ApiError, ApiResponse, ClientConfig, HealthRecordInput, HttpRequest, HttpResponse,
    RecordKind, SessionProvider, User,
};
use serde_json::Value;

use types::*;

/// Borrow a C string as UTF-8. Null or invalid UTF-8 is `None`.
fn str_arg<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

fn client_arg<'a>(client: *const FfiPatiClient) -> Option<&'a FfiPatiClient> {
    if client.is_null() {
        None
    } else {
        Some(unsafe { &*client })
    }
}

/// Copy a host response. `None` when the pointer is null; a null body is
/// empty, a body that is not UTF-8 is a `Deserialization` error.
fn response_arg(response: *const FfiHttpResponse) -> Option<Result<HttpResponse, ApiError>> {
    if response.is_null() {
        return None;
    }
    let response = unsafe { &*response };
    if response.body.is_null() {
        return Some(Ok(HttpResponse::new(response.status, "")));
    }
    let body = unsafe { CStr::from_ptr(response.body) }
        .to_str()
        .map(|body| HttpResponse::new(response.status, body))
        .map_err(|e| ApiError::Deserialization(format!("response body is not UTF-8: {e}")));
    Some(body)
}

/// Run `f`, turning a panic into `fallback`.
fn guard<T>(fallback: T, f: impl FnOnce() -> T) -> T {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or(fallback)
}

/// Run a result-producing body; a panic becomes an `FfiErrorCode::Panic`
/// result.
fn guard_result(f: impl FnOnce() -> *mut FfiPatiResult) -> *mut FfiPatiResult {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| FfiPatiResult::panic("internal panic"))
}

fn request_ptr(request: Result<HttpRequest, ApiError>) -> *mut FfiHttpRequest {
    match request {
        Ok(request) => FfiHttpRequest::from_core(request),
        Err(_) => std::ptr::null_mut(),
    }
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `base_url` with its own in-memory session.
///
/// `country_code` (digits, e.g. `"90"`) is used for messaging links; null
/// keeps the default. Returns null if `base_url` is null or not UTF-8.
/// Free with `pati_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn pati_client_new(
    base_url: *const c_char,
    country_code: *const c_char,
) -> *mut FfiPatiClient {
    guard(std::ptr::null_mut(), || {
        let Some(base_url) = str_arg(base_url) else {
            return std::ptr::null_mut();
        };
        let mut config = ClientConfig::new(base_url);
        if let Some(code) = str_arg(country_code) {
            let digits: String = code.chars().filter(char::is_ascii_digit).collect();
            if !digits.is_empty() {
                config.country_code = digits;
            }
        }
        let inner = ApiClient::new(&config, Arc::new(SessionProvider::in_memory()));
        Box::into_raw(Box::new(FfiPatiClient {
            inner,
            country_code: config.country_code,
        }))
    })
}

/// Free a client created by `pati_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pati_client_free(client: *mut FfiPatiClient) {
    if !client.is_null() {
        guard((), || drop(unsafe { Box::from_raw(client) }));
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Store a token and the user JSON (as produced by `pati_parse_login`).
/// Returns false on a null argument or malformed user JSON.
#[unsafe(no_mangle)]
pub extern "C" fn pati_session_establish(
    client: *const FfiPatiClient,
    token: *const c_char,
    user_json: *const c_char,
) -> bool {
    guard(false, || {
        let (Some(client), Some(token), Some(user_json)) =
            (client_arg(client), str_arg(token), str_arg(user_json))
        else {
            return false;
        };
        match serde_json::from_str::<User>(user_json) {
            Ok(user) => {
                client.inner.session().establish(token, &user);
                true
            }
            Err(_) => false,
        }
    })
}

/// Forget the session (logout).
#[unsafe(no_mangle)]
pub extern "C" fn pati_session_clear(client: *const FfiPatiClient) {
    guard((), || {
        if let Some(client) = client_arg(client) {
            client.inner.session().clear();
        }
    })
}

/// Current bearer token, or null when signed out.
/// Free with `pati_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn pati_session_token(client: *const FfiPatiClient) -> *mut c_char {
    guard(std::ptr::null_mut(), || {
        client_arg(client)
            .and_then(|c| c.inner.session().token())
            .map(c_string)
            .unwrap_or(std::ptr::null_mut())
    })
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// GET `path` (relative to the base URL; may carry a query string).
/// Returns null on a null argument. Free with `pati_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn pati_build_get(client: *const FfiPatiClient, path: *const c_char) -> *mut FfiHttpRequest {
    guard(std::ptr::null_mut(), || {
        let (Some(client), Some(path)) = (client_arg(client), str_arg(path)) else {
            return std::ptr::null_mut();
        };
        FfiHttpRequest::from_core(client.inner.build_get(path))
    })
}

/// POST `body_json` to `path`. Returns null if `body_json` is not JSON.
#[unsafe(no_mangle)]
pub extern "C" fn pati_build_post(
    client: *const FfiPatiClient,
    path: *const c_char,
    body_json: *const c_char,
) -> *mut FfiHttpRequest {
    guard(std::ptr::null_mut(), || {
        let (Some(client), Some(path), Some(body)) = (client_arg(client), str_arg(path), str_arg(body_json)) else {
            return std::ptr::null_mut();
        };
        let Ok(body) = serde_json::from_str::<Value>(body) else {
            return std::ptr::null_mut();
        };
        request_ptr(client.inner.build_post(path, &body))
    })
}

/// PUT `body_json` to `path`. Returns null if `body_json` is not JSON.
#[unsafe(no_mangle)]
pub extern "C" fn pati_build_put(
    client: *const FfiPatiClient,
    path: *const c_char,
    body_json: *const c_char,
) -> *mut FfiHttpRequest {
    guard(std::ptr::null_mut(), || {
        let (Some(client), Some(path), Some(body)) = (client_arg(client), str_arg(path), str_arg(body_json)) else {
            return std::ptr::null_mut();
        };
        let Ok(body) = serde_json::from_str::<Value>(body) else {
            return std::ptr::null_mut();
        };
        request_ptr(client.inner.build_put(path, &body))
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn pati_build_delete(client: *const FfiPatiClient, path: *const c_char) -> *mut FfiHttpRequest {
    guard(std::ptr::null_mut(), || {
        let (Some(client), Some(path)) = (client_arg(client), str_arg(path)) else {
            return std::ptr::null_mut();
        };
        FfiHttpRequest::from_core(client.inner.build_delete(path))
    })
}

/// Validate and build a health-record create request.
///
/// `input_json` uses the backend field names of `kind` (e.g. `vaccineName`,
/// `vaccinationDate`). When the input is rejected, returns null and, if
/// `out_error` is non-null, stores a message there that the caller frees
/// with `pati_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn pati_build_create_health_record(
    client: *const FfiPatiClient,
    pet_id: *const c_char,
    kind: FfiRecordKind,
    input_json: *const c_char,
    out_error: *mut *mut c_char,
) -> *mut FfiHttpRequest {
    guard(std::ptr::null_mut(), || {
        let report = |message: String| -> *mut FfiHttpRequest {
            if !out_error.is_null() {
                unsafe { *out_error = c_string(message) };
            }
            std::ptr::null_mut()
        };
        let (Some(client), Some(pet_id), Some(input_json)) =
            (client_arg(client), str_arg(pet_id), str_arg(input_json))
        else {
            return report("null or invalid argument".to_string());
        };
        let input = serde_json::from_str::<Value>(input_json)
            .and_then(|value| HealthRecordInput::from_value(RecordKind::from(kind), value));
        let input = match input {
            Ok(input) => input,
            Err(e) => return report(format!("invalid input: {e}")),
        };
        match client.inner.medical().build_create(pet_id, &input) {
            Ok(request) => FfiHttpRequest::from_core(request),
            Err(err) => report(err.user_message()),
        }
    })
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Interpret any response as the `{"data": ..., "error": ...}` envelope,
/// returned as JSON. Exactly one of the two keys is non-null; `error` is the
/// text to show the user. A 2xx with an empty body (a DELETE, say) reports
/// `"data": {}`. Returns null only on a null argument. Free with
/// `pati_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn pati_parse_envelope(
    client: *const FfiPatiClient,
    response: *const FfiHttpResponse,
) -> *mut c_char {
    guard(std::ptr::null_mut(), || {
        let (Some(client), Some(response)) = (client_arg(client), response_arg(response)) else {
            return std::ptr::null_mut();
        };
        let envelope = match response.and_then(|response| client.inner.parse::<Value>(response)) {
            Ok(Value::Null) => ApiResponse::ok(Value::Object(Default::default())),
            Ok(data) => ApiResponse::ok(data),
            Err(err) => ApiResponse::err(err.user_message()),
        };
        match serde_json::to_string(&envelope) {
            Ok(json) => c_string(json),
            Err(_) => std::ptr::null_mut(),
        }
    })
}

/// Records of `kind` for `pet_id`. A failed read yields an empty list, so
/// the result is always `Ok` unless an argument is null or the body is not
/// UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn pati_parse_health_records(
    client: *const FfiPatiClient,
    pet_id: *const c_char,
    kind: FfiRecordKind,
    response: *const FfiHttpResponse,
) -> *mut FfiPatiResult {
    guard_result(|| {
        let Some(client) = client_arg(client) else {
            return FfiPatiResult::null_arg("client");
        };
        let Some(pet_id) = str_arg(pet_id) else {
            return FfiPatiResult::null_arg("pet_id");
        };
        let response = match response_arg(response) {
            Some(Ok(response)) => response,
            Some(Err(err)) => return FfiPatiResult::from_error(err),
            None => return FfiPatiResult::null_arg("response"),
        };
        let records = client.inner.medical().parse_list(pet_id, kind.into(), response);
        FfiPatiResult::ok_record_list(records)
    })
}

/// A single created or updated record.
#[unsafe(no_mangle)]
pub extern "C" fn pati_parse_health_record(
    client: *const FfiPatiClient,
    pet_id: *const c_char,
    kind: FfiRecordKind,
    response: *const FfiHttpResponse,
) -> *mut FfiPatiResult {
    guard_result(|| {
        let Some(client) = client_arg(client) else {
            return FfiPatiResult::null_arg("client");
        };
        let Some(pet_id) = str_arg(pet_id) else {
            return FfiPatiResult::null_arg("pet_id");
        };
        let response = match response_arg(response) {
            Some(Ok(response)) => response,
            Some(Err(err)) => return FfiPatiResult::from_error(err),
            None => return FfiPatiResult::null_arg("response"),
        };
        match client.inner.medical().parse_create(pet_id, kind.into(), response) {
            Ok(record) => FfiPatiResult::ok_record(record),
            Err(err) => FfiPatiResult::from_error(err),
        }
    })
}

/// Parse a login or register response and establish the session.
/// On success `data` is the user as JSON.
#[unsafe(no_mangle)]
pub extern "C" fn pati_parse_login(
    client: *const FfiPatiClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPatiResult {
    guard_result(|| {
        let Some(client) = client_arg(client) else {
            return FfiPatiResult::null_arg("client");
        };
        let response = match response_arg(response) {
            Some(Ok(response)) => response,
            Some(Err(err)) => return FfiPatiResult::from_error(err),
            None => return FfiPatiResult::null_arg("response"),
        };
        let session = match client.inner.auth().parse_login(response) {
            Ok(session) => session,
            Err(err) => return FfiPatiResult::from_error(err),
        };
        match serde_json::to_string(&session.user) {
            Ok(json) => FfiPatiResult::ok_json(json),
            Err(e) => FfiPatiResult::from_error(ApiError::Serialization(e.to_string())),
        }
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// True for a real calendar date written `YYYY-MM-DD`.
#[unsafe(no_mangle)]
pub extern "C" fn pati_validate_date(value: *const c_char) -> bool {
    guard(false, || str_arg(value).is_some_and(is_valid_date))
}

/// `tel:` URI for `phone`, or null when the number is not dialable.
#[unsafe(no_mangle)]
pub extern "C" fn pati_tel_uri(phone: *const c_char) -> *mut c_char {
    guard(std::ptr::null_mut(), || {
        c_string_opt(str_arg(phone).and_then(deeplink::tel_uri))
    })
}

/// WhatsApp link for `phone` using the client's country code.
#[unsafe(no_mangle)]
pub extern "C" fn pati_whatsapp_uri(client: *const FfiPatiClient, phone: *const c_char) -> *mut c_char {
    guard(std::ptr::null_mut(), || {
        let (Some(client), Some(phone)) = (client_arg(client), str_arg(phone)) else {
            return std::ptr::null_mut();
        };
        c_string_opt(deeplink::whatsapp_uri(phone, &client.country_code))
    })
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by any `pati_build_*` function. Safe with null.
#[unsafe(no_mangle)]
pub extern "C" fn pati_free_request(req: *mut FfiHttpRequest) {
    if !req.is_null() {
        guard((), || unsafe { FfiHttpRequest::free(req) });
    }
}

/// Free a result returned by any `pati_parse_*` function. Safe with null.
#[unsafe(no_mangle)]
pub extern "C" fn pati_free_result(result: *mut FfiPatiResult) {
    if !result.is_null() {
        guard((), || unsafe { FfiPatiResult::free(result) });
    }
}

/// Free a string allocated by this library. Safe with null.
#[unsafe(no_mangle)]
pub extern "C" fn pati_free_string(s: *mut c_char) {
    guard((), || drop_c_string(s));
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    const USER: &str = r#"{"id":"u1","email":"ayse@example.com","first_name":"Ayşe","last_name":"Yılmaz","role":"user"}"#;

    fn cs(s: &str) -> CString {
        CString::new(s).unwrap()
    }

    fn read(s: *const c_char) -> String {
        assert!(!s.is_null());
        unsafe { CStr::from_ptr(s) }.to_str().unwrap().to_string()
    }

    fn new_client() -> *mut FfiPatiClient {
        let url = cs("http://localhost:3000/");
        pati_client_new(url.as_ptr(), std::ptr::null())
    }

    fn headers(req: &FfiHttpRequest) -> Vec<(String, String)> {
        if req.headers.is_null() {
            return Vec::new();
        }
        let slice = unsafe { std::slice::from_raw_parts(req.headers, req.headers_len as usize) };
        slice.iter().map(|h| (read(h.key), read(h.value))).collect()
    }

    fn response(status: u16, body: &CString) -> FfiHttpResponse {
        FfiHttpResponse {
            status,
            body: body.as_ptr(),
        }
    }

    #[test]
    fn client_new_null_url_returns_null() {
        assert!(pati_client_new(std::ptr::null(), std::ptr::null()).is_null());
        pati_client_free(std::ptr::null_mut());
    }

    #[test]
    fn build_get_joins_url_without_auth_when_signed_out() {
        let client = new_client();
        let path = cs("/pets");
        let req = pati_build_get(client, path.as_ptr());
        let req_ref = unsafe { &*req };
        assert_eq!(req_ref.method, FfiHttpMethod::Get);
        assert_eq!(read(req_ref.url), "http://localhost:3000/pets");
        assert!(req_ref.body.is_null());
        assert!(headers(req_ref).iter().all(|(k, _)| k != "authorization"));
        pati_free_request(req);
        pati_client_free(client);
    }

    #[test]
    fn session_token_attaches_bearer_header() {
        let client = new_client();
        let token = cs("tok-1");
        let user = cs(USER);
        assert!(pati_session_establish(client, token.as_ptr(), user.as_ptr()));
        assert_eq!(read(pati_session_token(client)), "tok-1");

        let path = cs("/auth/me");
        let req = pati_build_get(client, path.as_ptr());
        let hs = headers(unsafe { &*req });
        assert!(hs.contains(&("authorization".to_string(), "Bearer tok-1".to_string())));
        pati_free_request(req);

        pati_session_clear(client);
        assert!(pati_session_token(client).is_null());
        pati_client_free(client);
    }

    #[test]
    fn session_establish_rejects_bad_user_json() {
        let client = new_client();
        let token = cs("tok");
        let user = cs("not json");
        assert!(!pati_session_establish(client, token.as_ptr(), user.as_ptr()));
        pati_client_free(client);
    }

    #[test]
    fn build_post_carries_json_body() {
        let client = new_client();
        let path = cs("/pets");
        let body = cs(r#"{"name":"Pamuk","type":"Kedi"}"#);
        let req = pati_build_post(client, path.as_ptr(), body.as_ptr());
        let req_ref = unsafe { &*req };
        assert_eq!(req_ref.method, FfiHttpMethod::Post);
        let sent: Value = serde_json::from_str(&read(req_ref.body)).unwrap();
        assert_eq!(sent["name"], "Pamuk");
        pati_free_request(req);

        let bad = cs("{");
        assert!(pati_build_put(client, path.as_ptr(), bad.as_ptr()).is_null());
        pati_client_free(client);
    }

    #[test]
    fn create_health_record_reports_validation_error() {
        let client = new_client();
        let pet = cs("p1");
        let input = cs(r#"{"vaccineName":"Kuduz","vaccinationDate":"2024-13-40"}"#);
        let mut error: *mut c_char = std::ptr::null_mut();
        let req = pati_build_create_health_record(
            client,
            pet.as_ptr(),
            FfiRecordKind::Vaccine,
            input.as_ptr(),
            &mut error,
        );
        assert!(req.is_null());
        assert!(!error.is_null());
        pati_free_string(error);

        let input = cs(r#"{"vaccineName":"Kuduz","vaccinationDate":"2024-03-01"}"#);
        let req = pati_build_create_health_record(
            client,
            pet.as_ptr(),
            FfiRecordKind::Vaccine,
            input.as_ptr(),
            std::ptr::null_mut(),
        );
        let req_ref = unsafe { &*req };
        assert_eq!(req_ref.method, FfiHttpMethod::Post);
        assert_eq!(
            read(req_ref.url),
            "http://localhost:3000/pets/p1/medical-records/vaccinations"
        );
        pati_free_request(req);
        pati_client_free(client);
    }

    #[test]
    fn envelope_has_data_or_error() {
        let client = new_client();
        let ok = cs(r#"{"success":true,"data":[1,2]}"#);
        let json = pati_parse_envelope(client, &response(200, &ok));
        let envelope: Value = serde_json::from_str(&read(json)).unwrap();
        assert_eq!(envelope["data"], serde_json::json!([1, 2]));
        assert!(envelope["error"].is_null());
        pati_free_string(json);

        let failed = cs(r#"{"message":"Pet not found"}"#);
        let json = pati_parse_envelope(client, &response(400, &failed));
        let envelope: Value = serde_json::from_str(&read(json)).unwrap();
        assert!(envelope["data"].is_null());
        assert_eq!(envelope["error"], "Pet not found");
        pati_free_string(json);
        pati_client_free(client);
    }

    #[test]
    fn empty_success_envelope_has_object_data() {
        let client = new_client();
        let empty = cs("");
        let json = pati_parse_envelope(client, &response(204, &empty));
        let envelope: Value = serde_json::from_str(&read(json)).unwrap();
        assert_eq!(envelope["data"], serde_json::json!({}));
        assert!(envelope["error"].is_null());
        pati_free_string(json);
        pati_client_free(client);
    }

    #[test]
    fn non_utf8_body_is_rejected() {
        let client = new_client();
        let garbled = CString::new(vec![0xff, 0xfe, b'{']).unwrap();

        let json = pati_parse_envelope(client, &response(200, &garbled));
        let envelope: Value = serde_json::from_str(&read(json)).unwrap();
        assert!(envelope["data"].is_null());
        assert_eq!(envelope["error"], "The server sent an unexpected response.");
        pati_free_string(json);

        let result = pati_parse_login(client, &response(200, &garbled));
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::Deserialization);
        pati_free_result(result);
        assert!(pati_session_token(client).is_null());
        pati_client_free(client);
    }

    #[test]
    fn health_records_are_flattened() {
        let client = new_client();
        let pet = cs("p1");
        let body = cs(r#"[{"_id":"t1","treatmentName":"Kısırlaştırma","treatmentDate":"2024-02-01","cost":"350,50"}]"#);
        let result = pati_parse_health_records(client, pet.as_ptr(), FfiRecordKind::Treatment, &response(200, &body));
        let result_ref = unsafe { &*result };
        assert_eq!(result_ref.error_code, FfiErrorCode::Ok);
        assert_eq!(result_ref.data_tag, FfiDataTag::HealthRecordList);
        let list = unsafe { &*(result_ref.data as *const FfiHealthRecordList) };
        assert_eq!(list.len, 1);
        let record = unsafe { &*list.items };
        assert_eq!(read(record.id), "t1");
        assert_eq!(read(record.pet_id), "p1");
        assert_eq!(read(record.title), "Kısırlaştırma");
        assert_eq!(record.kind, FfiRecordKind::Treatment);
        assert!(record.has_cost);
        assert!((record.cost - 350.5).abs() < f64::EPSILON);
        assert!(!record.has_weight);
        assert!(record.dosage.is_null());
        pati_free_result(result);
        pati_client_free(client);
    }

    #[test]
    fn failed_list_read_is_empty() {
        let client = new_client();
        let pet = cs("p1");
        let body = cs("oops");
        let result = pati_parse_health_records(client, pet.as_ptr(), FfiRecordKind::Weight, &response(500, &body));
        let result_ref = unsafe { &*result };
        assert_eq!(result_ref.error_code, FfiErrorCode::Ok);
        let list = unsafe { &*(result_ref.data as *const FfiHealthRecordList) };
        assert_eq!(list.len, 0);
        assert!(list.items.is_null());
        pati_free_result(result);
        pati_client_free(client);
    }

    #[test]
    fn record_write_error_carries_status_and_message() {
        let client = new_client();
        let pet = cs("p1");
        let body = cs(r#"{"message":"Not allowed"}"#);
        let result = pati_parse_health_record(client, pet.as_ptr(), FfiRecordKind::Allergy, &response(403, &body));
        let result_ref = unsafe { &*result };
        assert_eq!(result_ref.error_code, FfiErrorCode::Http);
        assert_eq!(result_ref.http_status, 403);
        assert_eq!(read(result_ref.error_message), "Not allowed");
        assert!(result_ref.data.is_null());
        pati_free_result(result);
        pati_client_free(client);
    }

    #[test]
    fn login_establishes_session() {
        let client = new_client();
        let body = cs(r#"{"token":"abc","user":{"_id":"u1","email":"a@b.co","firstName":"Ali","lastName":"Veli"}}"#);
        let result = pati_parse_login(client, &response(200, &body));
        let result_ref = unsafe { &*result };
        assert_eq!(result_ref.error_code, FfiErrorCode::Ok);
        assert_eq!(result_ref.data_tag, FfiDataTag::Json);
        let user: Value = serde_json::from_str(&read(result_ref.data as *const c_char)).unwrap();
        assert_eq!(user["first_name"], "Ali");
        assert_eq!(read(pati_session_token(client)), "abc");
        pati_free_result(result);

        let unauthorized = cs("");
        let result = pati_parse_login(client, &response(401, &unauthorized));
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::Unauthorized);
        pati_free_result(result);
        pati_client_free(client);
    }

    #[test]
    fn null_arguments_are_reported() {
        let result = pati_parse_login(std::ptr::null(), std::ptr::null());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);
        pati_free_result(result);

        let client = new_client();
        let result = pati_parse_health_record(client, std::ptr::null(), FfiRecordKind::Vaccine, std::ptr::null());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);
        pati_free_result(result);
        pati_client_free(client);
    }

    #[test]
    fn helpers() {
        let good = cs("2024-02-29");
        let bad = cs("2023-02-29");
        assert!(pati_validate_date(good.as_ptr()));
        assert!(!pati_validate_date(bad.as_ptr()));
        assert!(!pati_validate_date(std::ptr::null()));

        let phone = cs("0532 123 45 67");
        let tel = pati_tel_uri(phone.as_ptr());
        assert_eq!(read(tel), "tel:05321234567");
        pati_free_string(tel);

        let client = new_client();
        let wa = pati_whatsapp_uri(client, phone.as_ptr());
        assert_eq!(read(wa), "https://wa.me/905321234567");
        pati_free_string(wa);

        let short = cs("123");
        assert!(pati_whatsapp_uri(client, short.as_ptr()).is_null());
        pati_client_free(client);
    }

    #[test]
    fn free_functions_accept_null() {
        pati_free_request(std::ptr::null_mut());
        pati_free_result(std::ptr::null_mut());
        pati_free_string(std::ptr::null_mut());
    }
}
