//! `Dom` backed by the real browser document.
//!
//! Listener and observer closures live for the whole page, so they are
//! released to the JS side with `Closure::forget`.

use gloo_timers::callback::{Interval, Timeout};
use js_sys::Date;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{
    Document, DocumentReadyState, Element, ErrorEvent, Event, FormData, HtmlElement, HtmlFormElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Node, ScrollBehavior, ScrollToOptions,
    Window,
};

use super::{Dom, DomEvent, Handler, IntersectionHandler, IntersectionOptions, Observation, ReadyState, Target};
use crate::error::{PortfolioError, Result};

const COLOR_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| PortfolioError::MissingElement("window".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| PortfolioError::MissingElement("document".to_owned()))?;
        Ok(Self { window, document })
    }

    fn body(&self) -> Result<HtmlElement> {
        self.document
            .body()
            .ok_or_else(|| PortfolioError::MissingElement("body".to_owned()))
    }
}

impl Dom for WebDom {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        // Invalid selectors (e.g. hrefs that are not `#id`) throw; treat as no match.
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_in(&self, root: &Element, selector: &str) -> Option<Element> {
        root.query_selector(selector).ok().flatten()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &Node = node;
        ancestor.contains(Some(node))
    }

    fn add_class(&self, el: &Element, class: &str) {
        let _ = el.class_list().add_1(class);
    }

    fn remove_class(&self, el: &Element, class: &str) {
        let _ = el.class_list().remove_1(class);
    }

    fn has_class(&self, el: &Element, class: &str) -> bool {
        el.class_list().contains(class)
    }

    fn set_class_name(&self, el: &Element, value: &str) {
        el.set_class_name(value);
    }

    fn attribute(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn set_attribute(&self, el: &Element, name: &str, value: &str) {
        let _ = el.set_attribute(name, value);
    }

    fn remove_attribute(&self, el: &Element, name: &str) {
        let _ = el.remove_attribute(name);
    }

    fn text(&self, el: &Element) -> String {
        el.text_content().unwrap_or_default()
    }

    fn set_text(&self, el: &Element, text: &str) {
        el.set_text_content(Some(text));
    }

    fn set_style(&self, el: &Element, property: &str, value: &str) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property(property, value);
        }
    }

    fn offset_top(&self, el: &Element) -> f64 {
        el.dyn_ref::<HtmlElement>()
            .map_or(0.0, |html| f64::from(html.offset_top()))
    }

    fn offset_height(&self, el: &Element) -> f64 {
        el.dyn_ref::<HtmlElement>()
            .map_or(0.0, |html| f64::from(html.offset_height()))
    }

    fn field_value(&self, form: &Element, name: &str) -> String {
        form.dyn_ref::<HtmlFormElement>()
            .and_then(|form| FormData::new_with_form(form).ok())
            .and_then(|data| data.get(name).as_string())
            .unwrap_or_default()
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn create_element(&self, tag: &str, class: &str, inner_html: &str) -> Result<Element> {
        let el = self.document.create_element(tag)?;
        el.set_class_name(class);
        el.set_inner_html(inner_html);
        Ok(el)
    }

    fn prepend_to_body(&self, el: &Element) -> Result<()> {
        self.body()?.prepend_with_node_1(el)?;
        Ok(())
    }

    fn append_to_body(&self, el: &Element) -> Result<()> {
        self.body()?.append_child(el)?;
        Ok(())
    }

    fn append_style(&self, css: &str) -> Result<()> {
        let head = self
            .document
            .head()
            .ok_or_else(|| PortfolioError::MissingElement("head".to_owned()))?;
        let style = self.document.create_element("style")?;
        style.set_text_content(Some(css));
        head.append_child(&style)?;
        Ok(())
    }

    fn remove(&self, el: &Element) {
        el.remove();
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn navigate(&self, href: &str) {
        if let Err(err) = self.window.location().set_href(href) {
            log::warn!("navigation to {href} rejected: {err:?}");
        }
    }

    fn prefers_dark(&self) -> bool {
        self.window
            .match_media(COLOR_SCHEME_QUERY)
            .ok()
            .flatten()
            .map_or(false, |mq| mq.matches())
    }

    fn now_ms(&self) -> f64 {
        Date::now()
    }

    fn ready_state(&self) -> ReadyState {
        match self.document.ready_state() {
            DocumentReadyState::Loading => ReadyState::Loading,
            DocumentReadyState::Complete => ReadyState::Complete,
            _ => ReadyState::Interactive,
        }
    }

    fn listen(&self, target: Target<Element>, event: &'static str, mut handler: Handler<Element>) {
        let callback = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
            let target = ev.target().and_then(|t| t.dyn_into::<Element>().ok());
            let message = ev.dyn_ref::<ErrorEvent>().map(ErrorEvent::message);
            let dom_event = DomEvent::new(target).with_message(message);
            handler(&dom_event);
            if dom_event.default_prevented() {
                ev.prevent_default();
            }
        });
        let function = callback.as_ref().unchecked_ref();

        let registered = match &target {
            Target::Window => self.window.add_event_listener_with_callback(event, function),
            Target::Document => self.document.add_event_listener_with_callback(event, function),
            Target::Element(el) => el.add_event_listener_with_callback(event, function),
            Target::ColorScheme => match self.window.match_media(COLOR_SCHEME_QUERY) {
                Ok(Some(mq)) => mq.add_event_listener_with_callback(event, function),
                Ok(None) => Ok(()),
                Err(err) => Err(err),
            },
        };
        if let Err(err) = registered {
            log::warn!("failed to register `{event}` listener: {err:?}");
        }
        callback.forget();
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, callback).forget();
    }

    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) {
        Interval::new(period_ms, callback).forget();
    }

    fn observe_intersection(
        &self,
        elements: Vec<Element>,
        options: IntersectionOptions,
        mut handler: IntersectionHandler<Element>,
    ) -> Result<()> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    if handler(&target, entry.is_intersecting()) == Observation::Stop {
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        for el in &elements {
            observer.observe(el);
        }
        callback.forget();
        Ok(())
    }
}
