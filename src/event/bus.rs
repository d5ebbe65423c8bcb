use crate::error::{EditorError, Result};
use crate::event::{EditorEvent, EventKind};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// A listener attached to the bus. Returning an error aborts the firing.
pub type Listener = Rc<dyn Fn(&EditorEvent) -> Result<()>>;

/// A named editor function callable through [`Events::invoke`].
pub type EditorFunction = Rc<dyn Fn(&[Value]) -> Result<Value>>;

/// Opaque handle identifying one attachment of a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Attached {
    id: ListenerId,
    kind: EventKind,
    listener: Listener,
}

struct Registration {
    kind: EventKind,
    listener: Listener,
}

#[derive(Default)]
struct Group {
    registrations: Vec<Registration>,
    /// Handles of the live attachments while the group is active
    attached: Option<Vec<ListenerId>>,
}

/// Publish/subscribe bus with named listener groups and a function namespace.
///
/// One instance exists per editor session and is shared as `Rc<Events>`.
/// Everything runs on the thread that calls [`Events::fire`].
pub struct Events {
    listeners: RefCell<Vec<Attached>>,
    groups: RefCell<HashMap<String, Group>>,
    functions: RefCell<HashMap<String, EditorFunction>>,
    next_id: Cell<u64>,
}

impl std::fmt::Debug for Events {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Events")
            .field("listeners", &format!("<{} listeners>", self.listeners.borrow().len()))
            .field("groups", &self.groups.borrow().keys().collect::<Vec<_>>())
            .field("functions", &self.functions.borrow().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}

impl Events {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            groups: RefCell::new(HashMap::new()),
            functions: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
        }
    }

    fn allocate_id(&self) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        ListenerId(id)
    }

    fn attach(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = self.allocate_id();
        self.listeners.borrow_mut().push(Attached { id, kind, listener });
        id
    }

    /// Attaches a listener directly to the live bus.
    pub fn on<F>(&self, kind: EventKind, listener: F) -> ListenerId
    where
        F: Fn(&EditorEvent) -> Result<()> + 'static,
    {
        self.attach(kind, Rc::new(listener))
    }

    /// Detaches one attachment. Unknown or already detached handles are ignored.
    pub fn off(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|attached| attached.id != id);
    }

    /// Number of listeners currently attached for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|attached| attached.kind == kind)
            .count()
    }

    /// Invokes every listener attached for the event's kind, in attachment order.
    ///
    /// The listener set is the one attached when the firing starts. The first
    /// listener error stops the firing and is returned to the caller.
    pub fn fire(&self, event: &EditorEvent) -> Result<()> {
        let kind = event.kind();
        let targets: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|attached| attached.kind == kind)
            .map(|attached| Rc::clone(&attached.listener))
            .collect();

        for listener in targets {
            listener(event)?;
        }
        Ok(())
    }

    /// Adds one listener for each of `kinds` to `group`, without attaching them.
    ///
    /// Registrations accumulate across calls and keep their order.
    pub fn on_group<F>(&self, group: &str, kinds: &[EventKind], listener: F)
    where
        F: Fn(&EditorEvent) -> Result<()> + 'static,
    {
        let listener: Listener = Rc::new(listener);
        let mut groups = self.groups.borrow_mut();
        let entry = groups.entry(group.to_string()).or_default();
        for &kind in kinds {
            entry.registrations.push(Registration {
                kind,
                listener: Rc::clone(&listener),
            });
        }
    }

    /// Attaches every registration of `group` to the live bus.
    ///
    /// Activating an already active group does nothing.
    pub fn activate_group(&self, group: &str) -> Result<()> {
        let pending: Vec<(EventKind, Listener)> = {
            let groups = self.groups.borrow();
            let entry = groups
                .get(group)
                .ok_or_else(|| EditorError::GroupNotFound(group.to_string()))?;
            if entry.attached.is_some() {
                log::warn!("event group '{}' is already active", group);
                return Ok(());
            }
            entry
                .registrations
                .iter()
                .map(|reg| (reg.kind, Rc::clone(&reg.listener)))
                .collect()
        };

        let ids: Vec<ListenerId> = pending
            .into_iter()
            .map(|(kind, listener)| self.attach(kind, listener))
            .collect();

        log::debug!("activated event group '{}' ({} listeners)", group, ids.len());
        if let Some(entry) = self.groups.borrow_mut().get_mut(group) {
            entry.attached = Some(ids);
        }
        Ok(())
    }

    /// Detaches the listeners attached by the matching [`Events::activate_group`].
    ///
    /// Deactivating an inactive group does nothing.
    pub fn deactivate_group(&self, group: &str) -> Result<()> {
        let ids = {
            let mut groups = self.groups.borrow_mut();
            let entry = groups
                .get_mut(group)
                .ok_or_else(|| EditorError::GroupNotFound(group.to_string()))?;
            entry.attached.take()
        };

        if let Some(ids) = ids {
            self.listeners
                .borrow_mut()
                .retain(|attached| !ids.contains(&attached.id));
            log::debug!("deactivated event group '{}'", group);
        }
        Ok(())
    }

    pub fn is_group_active(&self, group: &str) -> bool {
        self.groups
            .borrow()
            .get(group)
            .is_some_and(|entry| entry.attached.is_some())
    }

    /// Declares an editor function. Names are unique for the lifetime of the bus.
    pub fn function<F>(&self, name: &str, f: F) -> Result<()>
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        let mut functions = self.functions.borrow_mut();
        if functions.contains_key(name) {
            return Err(EditorError::DuplicateFunction(name.to_string()));
        }
        functions.insert(name.to_string(), Rc::new(f));
        Ok(())
    }

    /// Calls an editor function by name.
    ///
    /// An unknown name is logged and yields `Ok(None)`; an error raised by the
    /// function itself is returned as is.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Option<Value>> {
        let function = self.functions.borrow().get(name).cloned();
        match function {
            Some(function) => function(args).map(Some),
            None => {
                log::error!("function not found '{}'", name);
                Ok(None)
            }
        }
    }
}
