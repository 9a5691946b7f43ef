//! In-memory `Dom` for component tests.
//!
//! Supports the selector shapes the components use (`tag`, `.class`, `#id`,
//! `[attr]`, `[attr="v"]`, `[attr^="v"]`, optionally prefixed by a tag), a
//! virtual clock, bubbling event dispatch, and manual intersection firing.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{Dom, DomEvent, Handler, IntersectionHandler, IntersectionOptions, Observation, ReadyState, Target};
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    inner_html: String,
    style: BTreeMap<String, String>,
    top: f64,
    height: f64,
    parent: Option<NodeId>,
    fields: BTreeMap<String, String>,
    attached: bool,
}

/// Builder for nodes inserted into the fake document.
#[derive(Default)]
pub struct NodeSpec {
    node: Node,
}

impl NodeSpec {
    pub fn new(tag: &str) -> Self {
        Self { node: Node { tag: tag.to_owned(), attached: true, ..Node::default() } }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        self.node.classes.push(class.to_owned());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.node.attrs.insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.node.text = text.to_owned();
        self
    }

    pub fn offsets(mut self, top: f64, height: f64) -> Self {
        self.node.top = top;
        self.node.height = height;
        self
    }

    pub fn child_of(mut self, parent: NodeId) -> Self {
        self.node.parent = Some(parent);
        self
    }

    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.node.fields.insert(name.to_owned(), value.to_owned());
        self
    }
}

enum TimerKind {
    Once(Box<dyn FnOnce()>),
    Repeat { period: u64, callback: Rc<RefCell<Box<dyn FnMut()>>> },
}

struct Timer {
    due: u64,
    seq: u64,
    kind: TimerKind,
}

struct Listener {
    target: Target<NodeId>,
    event: &'static str,
    handler: Rc<RefCell<Handler<NodeId>>>,
}

struct Watcher {
    elements: Vec<NodeId>,
    options: IntersectionOptions,
    handler: Rc<RefCell<IntersectionHandler<NodeId>>>,
}

pub struct FakeDom {
    nodes: RefCell<Vec<Node>>,
    body: RefCell<Vec<NodeId>>,
    styles: RefCell<Vec<String>>,
    listeners: RefCell<Vec<Listener>>,
    timers: RefCell<Vec<Timer>>,
    watchers: RefCell<Vec<Watcher>>,
    clock: Cell<u64>,
    next_seq: Cell<u64>,
    scroll_y: Cell<f64>,
    scroll_requests: RefCell<Vec<f64>>,
    navigations: RefCell<Vec<String>>,
    dark: Cell<bool>,
    ready: Cell<ReadyState>,
}

impl Default for FakeDom {
    fn default() -> Self {
        Self {
            nodes: RefCell::new(Vec::new()),
            body: RefCell::new(Vec::new()),
            styles: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            timers: RefCell::new(Vec::new()),
            watchers: RefCell::new(Vec::new()),
            clock: Cell::new(0),
            next_seq: Cell::new(0),
            scroll_y: Cell::new(0.0),
            scroll_requests: RefCell::new(Vec::new()),
            navigations: RefCell::new(Vec::new()),
            dark: Cell::new(false),
            ready: Cell::new(ReadyState::Complete),
        }
    }
}

impl FakeDom {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn insert(&self, spec: NodeSpec) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        if spec.node.parent.is_none() {
            self.body.borrow_mut().push(id);
        }
        nodes.push(spec.node);
        id
    }

    // =============================================================
    // Driving
    // =============================================================

    /// Move the virtual clock forward, firing due timers in order.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.get() + ms;
        loop {
            let next = {
                let timers = self.timers.borrow();
                timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i)
            };
            let Some(index) = next else {
                break;
            };
            let timer = self.timers.borrow_mut().remove(index);
            self.clock.set(timer.due);
            match timer.kind {
                TimerKind::Once(callback) => callback(),
                TimerKind::Repeat { period, callback } => {
                    (&mut *callback.borrow_mut())();
                    self.push_timer(timer.due + period, TimerKind::Repeat { period, callback });
                }
            }
        }
        self.clock.set(target);
    }

    pub fn set_scroll(&self, y: f64) {
        self.scroll_y.set(y);
    }

    /// Set the scroll offset and fire `scroll` on the window.
    pub fn scroll(&self, y: f64) {
        self.set_scroll(y);
        self.fire_window("scroll");
    }

    pub fn fire_window(&self, event: &str) -> DomEvent<NodeId> {
        self.dispatch(&[Target::Window], event, DomEvent::new(None))
    }

    pub fn fire_window_error(&self, message: &str) -> DomEvent<NodeId> {
        let ev = DomEvent::new(None).with_message(Some(message.to_owned()));
        self.dispatch(&[Target::Window], "error", ev)
    }

    pub fn fire_document(&self, event: &str) -> DomEvent<NodeId> {
        self.dispatch(&[Target::Document], event, DomEvent::new(None))
    }

    pub fn fire_color_scheme_change(&self, dark: bool) -> DomEvent<NodeId> {
        self.dark.set(dark);
        self.dispatch(&[Target::ColorScheme], "change", DomEvent::new(None))
    }

    /// Fire an event on an element, bubbling through ancestors to the document and window.
    pub fn fire(&self, el: NodeId, event: &str) -> DomEvent<NodeId> {
        let mut path = Vec::new();
        let mut cursor = Some(el);
        while let Some(id) = cursor {
            path.push(Target::Element(id));
            cursor = self.nodes.borrow()[id.0].parent;
        }
        path.push(Target::Document);
        path.push(Target::Window);
        self.dispatch(&path, event, DomEvent::new(Some(el)))
    }

    pub fn click(&self, el: NodeId) -> DomEvent<NodeId> {
        self.fire(el, "click")
    }

    pub fn submit(&self, form: NodeId) -> DomEvent<NodeId> {
        self.fire(form, "submit")
    }

    /// Report an intersection change for `el` to every watcher observing it.
    pub fn intersect(&self, el: NodeId, is_intersecting: bool) {
        let handlers: Vec<(usize, Rc<RefCell<IntersectionHandler<NodeId>>>)> = self
            .watchers
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, w)| w.elements.contains(&el))
            .map(|(i, w)| (i, Rc::clone(&w.handler)))
            .collect();
        for (index, handler) in handlers {
            let outcome = (&mut *handler.borrow_mut())(&el, is_intersecting);
            if outcome == Observation::Stop {
                self.watchers.borrow_mut()[index].elements.retain(|e| *e != el);
            }
        }
    }

    pub fn set_field(&self, form: NodeId, name: &str, value: &str) {
        self.nodes.borrow_mut()[form.0]
            .fields
            .insert(name.to_owned(), value.to_owned());
    }

    pub fn set_ready_state(&self, state: ReadyState) {
        self.ready.set(state);
    }

    pub fn set_prefers_dark(&self, dark: bool) {
        self.dark.set(dark);
    }

    // =============================================================
    // Inspection
    // =============================================================

    pub fn now(&self) -> u64 {
        self.clock.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn style(&self, el: NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[el.0].style.get(property).cloned()
    }

    pub fn class_name(&self, el: NodeId) -> String {
        self.nodes.borrow()[el.0].classes.join(" ")
    }

    pub fn inner_html(&self, el: NodeId) -> String {
        self.nodes.borrow()[el.0].inner_html.clone()
    }

    pub fn is_attached(&self, el: NodeId) -> bool {
        self.nodes.borrow()[el.0].attached
    }

    pub fn body_children(&self) -> Vec<NodeId> {
        self.body.borrow().clone()
    }

    pub fn injected_styles(&self) -> Vec<String> {
        self.styles.borrow().clone()
    }

    pub fn scroll_requests(&self) -> Vec<f64> {
        self.scroll_requests.borrow().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    pub fn is_observed(&self, el: NodeId) -> bool {
        self.watchers.borrow().iter().any(|w| w.elements.contains(&el))
    }

    pub fn observer_options(&self) -> Vec<IntersectionOptions> {
        self.watchers.borrow().iter().map(|w| w.options.clone()).collect()
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.borrow().iter().filter(|l| l.event == event).count()
    }

    // =============================================================
    // Internals
    // =============================================================

    fn dispatch(&self, path: &[Target<NodeId>], event: &str, dom_event: DomEvent<NodeId>) -> DomEvent<NodeId> {
        for target in path {
            let handlers: Vec<Rc<RefCell<Handler<NodeId>>>> = self
                .listeners
                .borrow()
                .iter()
                .filter(|l| &l.target == target && l.event == event)
                .map(|l| Rc::clone(&l.handler))
                .collect();
            for handler in handlers {
                (&mut *handler.borrow_mut())(&dom_event);
            }
        }
        dom_event
    }

    fn push_timer(&self, due: u64, kind: TimerKind) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer { due, seq, kind });
    }

    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut cursor = nodes[node.0].parent;
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = nodes[id.0].parent;
        }
        false
    }

    fn select(&self, selector: &str) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, node)| node.attached && matches_selector(node, selector))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    fn with_node<R>(&self, el: NodeId, f: impl FnOnce(&mut Node) -> R) -> R {
        f(&mut self.nodes.borrow_mut()[el.0])
    }
}

fn matches_selector(node: &Node, selector: &str) -> bool {
    let (head, attr) = match selector.find('[') {
        Some(i) => (&selector[..i], Some(selector[i + 1..].trim_end_matches(']'))),
        None => (selector, None),
    };
    let split = head.find(['.', '#']).unwrap_or(head.len());
    let (tag, rest) = head.split_at(split);
    if !tag.is_empty() && tag != node.tag {
        return false;
    }
    if let Some(class) = rest.strip_prefix('.') {
        if !node.classes.iter().any(|c| c == class) {
            return false;
        }
    } else if let Some(id) = rest.strip_prefix('#') {
        if node.attrs.get("id").map(String::as_str) != Some(id) {
            return false;
        }
    }
    let Some(attr) = attr else {
        return true;
    };
    if let Some((name, value)) = attr.split_once("^=") {
        let value = value.trim_matches('"');
        node.attrs.get(name).is_some_and(|v| v.starts_with(value))
    } else if let Some((name, value)) = attr.split_once('=') {
        let value = value.trim_matches('"');
        node.attrs.get(name).is_some_and(|v| v == value)
    } else {
        node.attrs.contains_key(attr)
    }
}

impl Dom for FakeDom {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.select(&format!("#{id}")).into_iter().next()
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.select(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(selector)
    }

    fn query_in(&self, root: &NodeId, selector: &str) -> Option<NodeId> {
        self.select(selector)
            .into_iter()
            .find(|id| self.is_descendant(*id, *root))
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        ancestor == node || self.is_descendant(*node, *ancestor)
    }

    fn add_class(&self, el: &NodeId, class: &str) {
        self.with_node(*el, |node| {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_owned());
            }
        });
    }

    fn remove_class(&self, el: &NodeId, class: &str) {
        self.with_node(*el, |node| node.classes.retain(|c| c != class));
    }

    fn has_class(&self, el: &NodeId, class: &str) -> bool {
        self.with_node(*el, |node| node.classes.iter().any(|c| c == class))
    }

    fn set_class_name(&self, el: &NodeId, value: &str) {
        self.with_node(*el, |node| {
            node.classes = value.split_whitespace().map(str::to_owned).collect();
        });
    }

    fn attribute(&self, el: &NodeId, name: &str) -> Option<String> {
        self.with_node(*el, |node| node.attrs.get(name).cloned())
    }

    fn set_attribute(&self, el: &NodeId, name: &str, value: &str) {
        self.with_node(*el, |node| {
            node.attrs.insert(name.to_owned(), value.to_owned());
        });
    }

    fn remove_attribute(&self, el: &NodeId, name: &str) {
        self.with_node(*el, |node| {
            node.attrs.remove(name);
        });
    }

    fn text(&self, el: &NodeId) -> String {
        self.with_node(*el, |node| node.text.clone())
    }

    fn set_text(&self, el: &NodeId, text: &str) {
        self.with_node(*el, |node| node.text = text.to_owned());
    }

    fn set_style(&self, el: &NodeId, property: &str, value: &str) {
        self.with_node(*el, |node| {
            node.style.insert(property.to_owned(), value.to_owned());
        });
    }

    fn offset_top(&self, el: &NodeId) -> f64 {
        self.with_node(*el, |node| node.top)
    }

    fn offset_height(&self, el: &NodeId) -> f64 {
        self.with_node(*el, |node| node.height)
    }

    fn field_value(&self, form: &NodeId, name: &str) -> String {
        self.with_node(*form, |node| node.fields.get(name).cloned().unwrap_or_default())
    }

    fn reset_form(&self, form: &NodeId) {
        self.with_node(*form, |node| node.fields.values_mut().for_each(String::clear));
    }

    fn create_element(&self, tag: &str, class: &str, inner_html: &str) -> Result<NodeId> {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(Node {
            tag: tag.to_owned(),
            classes: class.split_whitespace().map(str::to_owned).collect(),
            inner_html: inner_html.to_owned(),
            ..Node::default()
        });
        Ok(id)
    }

    fn prepend_to_body(&self, el: &NodeId) -> Result<()> {
        self.with_node(*el, |node| node.attached = true);
        self.body.borrow_mut().insert(0, *el);
        Ok(())
    }

    fn append_to_body(&self, el: &NodeId) -> Result<()> {
        self.with_node(*el, |node| node.attached = true);
        self.body.borrow_mut().push(*el);
        Ok(())
    }

    fn append_style(&self, css: &str) -> Result<()> {
        self.styles.borrow_mut().push(css.to_owned());
        Ok(())
    }

    fn remove(&self, el: &NodeId) {
        self.with_node(*el, |node| node.attached = false);
        self.body.borrow_mut().retain(|id| id != el);
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn scroll_to(&self, top: f64) {
        self.scroll_requests.borrow_mut().push(top);
    }

    fn navigate(&self, href: &str) {
        self.navigations.borrow_mut().push(href.to_owned());
    }

    fn prefers_dark(&self) -> bool {
        self.dark.get()
    }

    #[allow(clippy::cast_precision_loss)]
    fn now_ms(&self) -> f64 {
        self.clock.get() as f64
    }

    fn ready_state(&self) -> ReadyState {
        self.ready.get()
    }

    fn listen(&self, target: Target<NodeId>, event: &'static str, handler: Handler<NodeId>) {
        self.listeners
            .borrow_mut()
            .push(Listener { target, event, handler: Rc::new(RefCell::new(handler)) });
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let due = self.clock.get() + u64::from(delay_ms);
        self.push_timer(due, TimerKind::Once(callback));
    }

    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) {
        let period = u64::from(period_ms.max(1));
        let due = self.clock.get() + period;
        self.push_timer(due, TimerKind::Repeat { period, callback: Rc::new(RefCell::new(callback)) });
    }

    fn observe_intersection(
        &self,
        elements: Vec<NodeId>,
        options: IntersectionOptions,
        handler: IntersectionHandler<NodeId>,
    ) -> Result<()> {
        self.watchers
            .borrow_mut()
            .push(Watcher { elements, options, handler: Rc::new(RefCell::new(handler)) });
        Ok(())
    }
}
