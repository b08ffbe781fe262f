//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String` (null for `None`), raw pointers instead
//! of `Vec`, and explicit-discriminant enums. Optional numbers travel as a
//! value plus a `has_*` flag. Conversions live here so `lib.rs` stays the
//! `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use pati_core::{ApiClient, ApiError, HealthRecord, HttpMethod, HttpRequest, RecordKind};

/// Opaque handle. C callers receive a pointer to this and pass it back into
/// every function that needs a client.
pub struct FfiPatiClient {
    pub(crate) inner: ApiClient,
    pub(crate) country_code: String,
}

/// Owned C string; interior NULs are dropped rather than failing.
pub(crate) fn c_string(s: impl Into<String>) -> *mut c_char {
    let mut s: String = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).map(CString::into_raw).unwrap_or(std::ptr::null_mut())
}

pub(crate) fn c_string_opt(s: Option<String>) -> *mut c_char {
    s.map(c_string).unwrap_or(std::ptr::null_mut())
}

/// Release a string made by `c_string`. Null is ignored.
pub(crate) fn drop_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Hand a vector to C as pointer + length (null when empty).
fn into_raw_parts<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let mut items = items.into_boxed_slice();
    let len = items.len() as u32;
    let ptr = items.as_mut_ptr();
    std::mem::forget(items);
    (ptr, len)
}

/// Take back a vector produced by `into_raw_parts`.
///
/// # Safety
/// `ptr`/`len` must come from `into_raw_parts` and not have been freed.
unsafe fn from_raw_parts<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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

#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A request for the host to execute. `body` is null for GET / DELETE.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: c_string(k),
                value: c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_parts(headers);
        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: c_string(req.url),
            headers,
            headers_len,
            body: c_string_opt(req.body),
        }))
    }

    /// # Safety
    /// `req` must come from `from_core` and not have been freed.
    pub(crate) unsafe fn free(req: *mut Self) {
        let req = unsafe { Box::from_raw(req) };
        drop_c_string(req.url);
        drop_c_string(req.body);
        for header in unsafe { from_raw_parts(req.headers, req.headers_len) } {
            drop_c_string(header.key);
            drop_c_string(header.value);
        }
    }
}

/// A response the host received. Read, never freed, by this library.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Health records
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiRecordKind {
    Vaccine = 0,
    Treatment = 1,
    Appointment = 2,
    Medication = 3,
    Allergy = 4,
    Weight = 5,
}

impl From<RecordKind> for FfiRecordKind {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Vaccine => FfiRecordKind::Vaccine,
            RecordKind::Treatment => FfiRecordKind::Treatment,
            RecordKind::Appointment => FfiRecordKind::Appointment,
            RecordKind::Medication => FfiRecordKind::Medication,
            RecordKind::Allergy => FfiRecordKind::Allergy,
            RecordKind::Weight => FfiRecordKind::Weight,
        }
    }
}

impl From<FfiRecordKind> for RecordKind {
    fn from(kind: FfiRecordKind) -> Self {
        match kind {
            FfiRecordKind::Vaccine => RecordKind::Vaccine,
            FfiRecordKind::Treatment => RecordKind::Treatment,
            FfiRecordKind::Appointment => RecordKind::Appointment,
            FfiRecordKind::Medication => RecordKind::Medication,
            FfiRecordKind::Allergy => RecordKind::Allergy,
            FfiRecordKind::Weight => RecordKind::Weight,
        }
    }
}

/// Flattened health record. Nullable strings are null when absent.
#[repr(C)]
pub struct FfiHealthRecord {
    pub id: *mut c_char,
    pub pet_id: *mut c_char,
    pub kind: FfiRecordKind,
    pub title: *mut c_char,
    pub description: *mut c_char,
    pub date: *mut c_char,
    pub veterinarian: *mut c_char,
    pub dosage: *mut c_char,
    pub frequency: *mut c_char,
    pub has_weight: bool,
    pub weight: f64,
    pub unit: *mut c_char,
    pub severity: *mut c_char,
    pub symptoms: *mut c_char,
    pub has_cost: bool,
    pub cost: f64,
    pub next_due_date: *mut c_char,
}

impl FfiHealthRecord {
    fn from_core(r: HealthRecord) -> Self {
        FfiHealthRecord {
            id: c_string(r.id),
            pet_id: c_string(r.pet_id),
            kind: r.kind.into(),
            title: c_string(r.title),
            description: c_string(r.description),
            date: c_string(r.date),
            veterinarian: c_string(r.veterinarian),
            dosage: c_string_opt(r.dosage),
            frequency: c_string_opt(r.frequency),
            has_weight: r.weight.is_some(),
            weight: r.weight.unwrap_or_default(),
            unit: c_string_opt(r.unit),
            severity: c_string_opt(r.severity),
            symptoms: c_string_opt(r.symptoms),
            has_cost: r.cost.is_some(),
            cost: r.cost.unwrap_or_default(),
            next_due_date: c_string_opt(r.next_due_date),
        }
    }

    fn free_fields(&self) {
        for s in [
            self.id,
            self.pet_id,
            self.title,
            self.description,
            self.date,
            self.veterinarian,
            self.dosage,
            self.frequency,
            self.unit,
            self.severity,
            self.symptoms,
            self.next_due_date,
        ] {
            drop_c_string(s);
        }
    }
}

#[repr(C)]
pub struct FfiHealthRecordList {
    pub items: *mut FfiHealthRecord,
    pub len: u32,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Transport = 1,
    Unauthorized = 2,
    NotFound = 3,
    Http = 4,
    Deserialization = 5,
    Serialization = 6,
    Validation = 7,
    Panic = 8,
    NullArg = 9,
}

/// Tells `pati_free_result` what `FfiPatiResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    /// `data` is a NUL-terminated JSON document.
    Json = 1,
    HealthRecord = 2,
    HealthRecordList = 3,
}

/// Result envelope for typed parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data` is
/// tagged by `data_tag`. On failure `error_message` is the text to show the
/// user and `data` is null.
#[repr(C)]
pub struct FfiPatiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiPatiResult {
    fn boxed(error_code: FfiErrorCode, error_message: *mut c_char, http_status: u16, data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiPatiResult {
            error_code,
            error_message,
            http_status,
            data_tag,
            data,
        }))
    }

    pub(crate) fn ok_json(json: String) -> *mut Self {
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 0, FfiDataTag::Json, c_string(json).cast())
    }

    pub(crate) fn ok_record(record: HealthRecord) -> *mut Self {
        let record = Box::into_raw(Box::new(FfiHealthRecord::from_core(record)));
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 0, FfiDataTag::HealthRecord, record.cast())
    }

    pub(crate) fn ok_record_list(records: Vec<HealthRecord>) -> *mut Self {
        let items: Vec<FfiHealthRecord> = records.into_iter().map(FfiHealthRecord::from_core).collect();
        let (items, len) = into_raw_parts(items);
        let list = Box::into_raw(Box::new(FfiHealthRecordList { items, len }));
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 0, FfiDataTag::HealthRecordList, list.cast())
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let code = match &err {
            ApiError::Transport(_) => FfiErrorCode::Transport,
            ApiError::Unauthorized => FfiErrorCode::Unauthorized,
            ApiError::NotFound => FfiErrorCode::NotFound,
            ApiError::Http { .. } => FfiErrorCode::Http,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
            ApiError::Serialization(_) => FfiErrorCode::Serialization,
            ApiError::Validation(_) => FfiErrorCode::Validation,
        };
        let status = err.status().unwrap_or(0);
        Self::boxed(code, c_string(err.user_message()), status, FfiDataTag::None, std::ptr::null_mut())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let msg = format!("null or invalid argument: {name}");
        Self::boxed(FfiErrorCode::NullArg, c_string(msg), 0, FfiDataTag::None, std::ptr::null_mut())
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::Panic, c_string(msg), 0, FfiDataTag::None, std::ptr::null_mut())
    }

    /// # Safety
    /// `result` must come from one of the constructors above and not have
    /// been freed.
    pub(crate) unsafe fn free(result: *mut Self) {
        let result = unsafe { Box::from_raw(result) };
        drop_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Json => drop_c_string(result.data.cast()),
            FfiDataTag::HealthRecord => {
                let record = unsafe { Box::from_raw(result.data.cast::<FfiHealthRecord>()) };
                record.free_fields();
            }
            FfiDataTag::HealthRecordList => {
                let list = unsafe { Box::from_raw(result.data.cast::<FfiHealthRecordList>()) };
                for record in unsafe { from_raw_parts(list.items, list.len) } {
                    record.free_fields();
                }
            }
            FfiDataTag::None => {}
        }
    }
}
