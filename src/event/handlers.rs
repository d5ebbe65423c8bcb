use crate::command::CommandHistory;
use crate::event::{EditorEvent, EventKind, Events, ListenerId};
use std::cell::RefCell;
use std::rc::Rc;

/// Feeds committed operations into `history` and drives undo/redo from the bus.
pub fn connect_history(events: &Events, history: &Rc<RefCell<CommandHistory>>) -> [ListenerId; 3] {
    let add = {
        let history = Rc::clone(history);
        events.on(EventKind::EditAdd, move |event| {
            if let EditorEvent::EditAdd(command) = event {
                history.borrow_mut().add(command.clone());
            }
            Ok(())
        })
    };

    let undo = {
        let history = Rc::clone(history);
        events.on(EventKind::EditUndo, move |_| history.borrow_mut().undo())
    };

    let redo = {
        let history = Rc::clone(history);
        events.on(EventKind::EditRedo, move |_| history.borrow_mut().redo())
    };

    [add, undo, redo]
}
