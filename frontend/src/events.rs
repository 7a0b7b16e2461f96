//! The delegated click listener on the document.

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::{closure::Closure, JsCast};

use crate::{
    dom::{WebDocument, WebElement},
    report_error, WebController,
};

/// A click listener that is removed again when dropped.
pub struct ClickSubscription {
    target: web_sys::EventTarget,
    listener: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for ClickSubscription {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback("click", self.listener.as_ref().unchecked_ref())
        {
            web_sys::console::error_1(&err);
        }
    }
}

/// Forward every click on `doc` to `controller`.
///
/// One listener sees each click once, whichever rules its target matches.
pub fn subscribe_clicks(
    doc: &WebDocument,
    controller: &Rc<RefCell<WebController>>,
) -> Option<ClickSubscription> {
    let listener = {
        let controller = Rc::clone(controller);
        Closure::wrap(Box::new(move |event: web_sys::Event| {
            let Some(clicked) = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            else {
                return;
            };
            let Ok(mut controller) = controller.try_borrow_mut() else {
                return;
            };
            if let Err(err) = controller.handle_click(&WebElement(clicked)) {
                report_error("click", &err);
            }
        }) as Box<dyn FnMut(_)>)
    };

    let target: web_sys::EventTarget = doc.0.clone().into();
    if let Err(err) =
        target.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
    {
        web_sys::console::error_1(&err);
        return None;
    }
    Some(ClickSubscription {
        target,
        listener,
    })
}
