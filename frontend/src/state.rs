//! Per-page installation: the active configuration, the controller and its
//! click subscription.

use std::{cell::RefCell, rc::Rc};

use docs_nav_shared::{NavConfig, Result, TocController, TocVisibility};
use wasm_bindgen::{closure::Closure, JsCast};

use crate::{
    dom::WebDocument,
    events::{subscribe_clicks, ClickSubscription},
    matcher::WebMatcher,
    report_error,
    viewport::WindowViewport,
    WebController,
};

struct Installation {
    controller: Rc<RefCell<WebController>>,
    // Dropping it removes the listener.
    subscription: Option<ClickSubscription>,
}

thread_local! {
    static CONFIG: RefCell<NavConfig> = RefCell::new(NavConfig::default());
    static MATCHER: RefCell<Option<WebMatcher>> = const { RefCell::new(None) };
    static INSTALLATION: RefCell<Option<Installation>> = const { RefCell::new(None) };
}

/// The active configuration.
pub fn current_config() -> NavConfig {
    CONFIG.with(|config| config.borrow().clone())
}

/// Replace the active configuration and reinstall unless the page is still
/// loading, in which case the pending `DOMContentLoaded` hook picks it up.
pub fn set_config(config: NavConfig) {
    CONFIG.with(|current| *current.borrow_mut() = config);
    let ready = WebDocument::current()
        .filter(|doc| doc.0.ready_state() != "loading");
    if let Some(doc) = ready {
        install(&doc);
    }
}

fn matcher() -> WebMatcher {
    MATCHER.with(|slot| slot.borrow_mut().get_or_insert_with(WebMatcher::detect).clone())
}

/// Build the controller and subscribe clicks, replacing any earlier
/// installation.
pub fn install(doc: &WebDocument) {
    let config = current_config();
    let Some(viewport) = WindowViewport::current() else {
        return;
    };
    let controller = match TocController::new(doc, &config, matcher(), viewport) {
        Ok(controller) => Rc::new(RefCell::new(controller)),
        Err(err) => {
            report_error("install", &err);
            return;
        },
    };

    // Drop the old listener before adding a new one.
    INSTALLATION.with(|slot| slot.borrow_mut().take());
    let subscription = subscribe_clicks(doc, &controller);
    INSTALLATION.with(|slot| {
        *slot.borrow_mut() = Some(Installation {
            controller,
            subscription,
        })
    });
}

/// Install now, or once the DOM is parsed if the script runs from `<head>`.
pub fn install_when_ready() {
    let Some(doc) = WebDocument::current() else {
        return;
    };
    if doc.0.ready_state() != "loading" {
        install(&doc);
        return;
    }

    let callback = {
        let doc = doc.clone();
        Closure::wrap(Box::new(move || install(&doc)) as Box<dyn FnMut()>)
    };
    if let Err(err) = doc
        .0
        .add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref())
    {
        web_sys::console::error_1(&err);
        return;
    }
    // Fires once per page; the page owns it from here.
    callback.forget();
}

/// Run `f` against the installed controller, installing first if needed.
pub fn with_controller<T>(f: impl FnOnce(&mut WebController) -> Result<T>) -> Option<Result<T>> {
    let installed = INSTALLATION.with(|slot| slot.borrow().is_some());
    if !installed {
        install(&WebDocument::current()?);
    }
    let controller = INSTALLATION.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|installation| Rc::clone(&installation.controller))
    })?;
    let mut controller = controller.try_borrow_mut().ok()?;
    Some(f(&mut controller))
}

/// Flip the panel.
pub fn toggle() -> Option<TocVisibility> {
    match with_controller(TocController::toggle)? {
        Ok(state) => Some(state),
        Err(err) => {
            report_error("toggleToc", &err);
            None
        },
    }
}

/// Whether the document click listener is in place.
pub fn is_subscribed() -> bool {
    INSTALLATION.with(|slot| {
        slot.borrow()
            .as_ref()
            .is_some_and(|installation| installation.subscription.is_some())
    })
}
