/**
 * Panic Recovery Middleware
 *
 * Outermost layer of the standard chain. A panic anywhere below it is caught
 * here exactly once: the payload and the backtrace go to the log and the
 * client gets a generic 500 with the usual security headers.
 * `Connection: close` tells the client not to reuse a connection that just
 * served a broken request.
 *
 * The backtrace has to be taken while the panicking frames still exist, so
 * [`install_panic_hook`] captures it into a thread-local at panic time and
 * [`recover_panic`] picks it up. Inner layers that catch a panic to clean up
 * (the session save) re-raise it with [`resume_panic`], which carries the
 * backtrace over to whichever thread resumes the unwind.
 */

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::panic::AssertUnwindSafe;
use std::sync::Once;

use axum::{
    extract::Request,
    http::{
        header::{HeaderValue, CONNECTION},
        StatusCode,
    },
    middleware::Next,
    response::Response,
};
use futures_util::FutureExt;

use crate::backend::error::status_text;
use crate::backend::middleware::headers::apply_security_headers;

thread_local! {
    static PANIC_BACKTRACE: RefCell<Option<Backtrace>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

/// Capture a backtrace for every panic, then run the previous hook
///
/// Safe to call more than once; the hook is installed a single time.
pub fn install_panic_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let backtrace = Backtrace::force_capture();
            PANIC_BACKTRACE.with(|slot| *slot.borrow_mut() = Some(backtrace));
            previous(info);
        }));
    });
}

/// Backtrace of the last panic on this thread, if the hook captured one
pub fn take_panic_backtrace() -> Option<Backtrace> {
    PANIC_BACKTRACE.with(|slot| slot.borrow_mut().take())
}

/// Re-raise a caught panic together with its backtrace
pub fn resume_panic(payload: Box<dyn Any + Send>, backtrace: Option<Backtrace>) -> ! {
    if let Some(backtrace) = backtrace {
        PANIC_BACKTRACE.with(|slot| *slot.borrow_mut() = Some(backtrace));
    }
    std::panic::resume_unwind(payload)
}

/// Best-effort text of a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

pub async fn recover_panic(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            let backtrace = match take_panic_backtrace() {
                Some(backtrace) => backtrace.to_string(),
                None => "unavailable, panic hook not installed".to_string(),
            };
            tracing::error!(
                %method,
                %uri,
                panic = %panic_message(payload.as_ref()),
                %backtrace,
                "recovered from panic while handling request"
            );

            let mut response = status_text(StatusCode::INTERNAL_SERVER_ERROR);
            let headers = response.headers_mut();
            headers.insert(CONNECTION, HeaderValue::from_static("close"));
            apply_security_headers(headers);
            response
        }
    }
}
